use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode digest bytes as a URL-safe token.
///
/// Equal to standard base64 with `+` mapped to `-`, `/` mapped to `_`, and
/// padding removed, which is what nginx `secure_link_md5` expects.
pub fn encode_token(digest: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(digest)
}

/// Drop everything from the first `?` onward
pub fn strip_query(value: &str) -> &str {
    match value.find('?') {
        Some(pos) => &value[..pos],
        None => value,
    }
}

/// Ensure the resource path is rooted and carries no query string
pub fn normalize_path(path: &str) -> String {
    let path = strip_query(path);
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_alphabet() {
        // 0xfbffbf encodes to "+/+/" in the standard alphabet
        assert_eq!(encode_token(&[0xfb, 0xff, 0xbf]), "-_-_");
    }

    #[test]
    fn test_padding_removed() {
        // "/w==" in the standard alphabet
        assert_eq!(encode_token(&[0xff]), "_w");
    }

    #[test]
    fn test_md5_sized_digest() {
        // standard alphabet: "+/+/+/+/+/+/+/+/+/+/+w=="
        let mut digest = [0xfb, 0xff, 0xbf].repeat(5);
        digest.push(0xfb);
        assert_eq!(encode_token(&digest), "-_-_-_-_-_-_-_-_-_-_-w");
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("example.com?foo=bar"), "example.com");
        assert_eq!(strip_query("example.com"), "example.com");
        assert_eq!(strip_query("?only"), "");
        assert_eq!(strip_query("a?b?c"), "a");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("images/photo.png"), "/images/photo.png");
        assert_eq!(normalize_path("/images/photo.png"), "/images/photo.png");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/files?v=2"), "/files");
        assert_eq!(normalize_path("files?v=2"), "/files");
    }

    #[test]
    fn test_normalize_path_idempotent() {
        for path in ["", "/", "a/b", "/a/b?x=1", "x?"] {
            let once = normalize_path(path);
            assert_eq!(normalize_path(&once), once);
        }
    }
}
