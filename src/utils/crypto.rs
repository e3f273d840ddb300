use md5::{Digest, Md5};

use super::encoding::encode_token;

/// Build the token key hashed into a secure link.
///
/// The edge server rebuilds this exact string, so the order is fixed:
/// expiry, path, secret, client IP. Absent values are empty strings.
pub fn token_key(expires: &str, path: &str, secret_key: &str, client_ip: &str) -> String {
    let mut key =
        String::with_capacity(expires.len() + path.len() + secret_key.len() + client_ip.len());
    key.push_str(expires);
    key.push_str(path);
    key.push_str(secret_key);
    key.push_str(client_ip);
    key
}

/// Generate the URL-safe MD5 token for a token key
pub fn generate_token(token_key: &str) -> String {
    let digest = Md5::digest(token_key.as_bytes());
    encode_token(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_key_order() {
        let key = token_key("1546300800", "/images/photo.png", "123abc", "1.3.2.2");
        assert_eq!(key, "1546300800/images/photo.png123abc1.3.2.2");
    }

    #[test]
    fn test_token_key_absent_fields() {
        assert_eq!(token_key("", "/", "123abc", ""), "/123abc");
    }

    #[test]
    fn test_token_generation() {
        let token = generate_token("1546300800/images/photo.png123abc1.3.2.2");
        assert_eq!(token, "13UShqpVn0pkzv_f7UzLLg");
        assert_eq!(token.len(), 22); // 16 bytes, unpadded base64
    }

    #[test]
    fn test_token_is_deterministic() {
        assert_eq!(generate_token("/123abc"), generate_token("/123abc"));
        assert_eq!(generate_token("/123abc"), "mMLZ7RdvCaiFIYVvCdlQpQ");
    }

    #[test]
    fn test_empty_key() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(generate_token(""), "1B2M2Y8AsgTpgAmY7PhCfg");
    }
}
