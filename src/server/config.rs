use clap::{Parser, Subcommand};

use crate::{Format, SigningRequest};

#[derive(Debug, Clone, Parser)]
#[command(name = "cdn-signer", about = "Signed URL generator for CDN resources")]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// URL signing key
    #[arg(short, long, env = "CDN_SIGNING_KEY", global = true, hide_env_values = true)]
    pub key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CDN_SIGNER_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a signed URL
    Sign(SignArgs),

    /// Serve signed URLs over HTTP
    Serve {
        /// Listen address
        #[arg(long, env = "CDN_SIGNER_LISTEN", default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct SignArgs {
    /// "path" for a path-based token, anything else for querystring
    #[arg(short, long, default_value = "querystring")]
    pub format: String,

    /// Scheme of the generated URL
    #[arg(short, long, default_value = "http")]
    pub scheme: String,

    /// CDN resource hostname, without scheme
    #[arg(short = 'r', long = "resource", default_value = "")]
    pub hostname: String,

    /// Resource path covered by the token
    #[arg(short, long, default_value = "/")]
    pub path: String,

    /// UNIX timestamp after which the link expires
    #[arg(short, long, default_value = "")]
    pub expires: String,

    /// Client IP allowed to use the link
    #[arg(short = 'i', long = "ip", default_value = "")]
    pub client_ip: String,
}

impl SignArgs {
    pub fn to_request(&self, key: &str) -> SigningRequest {
        SigningRequest::new(self.hostname.as_str(), key)
            .with_format(Format::from(self.format.as_str()))
            .with_scheme(self.scheme.as_str())
            .with_path(self.path.as_str())
            .with_expiry(&self.expires)
            .with_client_ip(self.client_ip.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_flags() {
        let config = Config::try_parse_from([
            "cdn-signer", "-k", "123abc", "sign", "-r", "example.com", "-p", "images/photo.png",
            "-e", "1546300800", "-i", "1.3.2.2", "-s", "http", "-f", "path",
        ])
        .unwrap();

        let Command::Sign(args) = &config.command else {
            panic!("expected sign command");
        };
        let url = args
            .to_request(config.key.as_deref().unwrap())
            .sign()
            .unwrap()
            .to_url();
        assert_eq!(
            url,
            "http://example.com/secure=13UShqpVn0pkzv_f7UzLLg&expires=1546300800&ip=1.3.2.2/images/photo.png"
        );
    }

    #[test]
    fn test_sign_defaults() {
        let config = Config::try_parse_from(["cdn-signer", "sign", "-r", "example.com"]).unwrap();
        let Command::Sign(args) = config.command else {
            panic!("expected sign command");
        };
        assert_eq!(args.format, "querystring");
        assert_eq!(args.scheme, "http");
        assert_eq!(args.path, "/");
        assert!(args.expires.is_empty());
    }

    #[test]
    fn test_sign_without_key_or_resource() {
        let config = Config::try_parse_from(["cdn-signer", "sign", "-p", "/files"]).unwrap();
        let Command::Sign(args) = &config.command else {
            panic!("expected sign command");
        };
        let err = args.to_request("").sign().unwrap_err();
        assert_eq!(
            err.to_string(),
            "URL Signing Key not given. Resource hostname not given. "
        );
    }

    #[test]
    fn test_serve_listen() {
        let config =
            Config::try_parse_from(["cdn-signer", "serve", "--listen", "127.0.0.1:9000"]).unwrap();
        assert!(matches!(
            config.command,
            Command::Serve { ref listen } if listen == "127.0.0.1:9000"
        ));
    }
}
