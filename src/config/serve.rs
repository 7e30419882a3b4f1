//! `serve` section configuration.

use super::defaults;
use educe::Educe;
use serde::Deserialize;

/// `serve` object in config.json - static file server settings.
///
/// # Example
/// ```json
/// "serve": { "interface": "0.0.0.0", "port": 3000 }
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 8080).
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_serve_config() {
        let config = SiteConfig::from_str(
            r#"{ "title": "Test", "serve": { "interface": "0.0.0.0", "port": 3000 } }"#,
        )
        .unwrap();

        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config = SiteConfig::from_str(r#"{ "title": "Test" }"#).unwrap();

        assert_eq!(config.serve.interface, "127.0.0.1");
        assert_eq!(config.serve.port, 8080);
    }
}
