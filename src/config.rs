//! Env-driven configuration for the worker and the CLI.
//!
//! Values are read from the process environment once at startup; `dotenv` is
//! loaded on demand by the binaries. Request handling never touches the
//! environment, it only sees what was captured here.
use std::env;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_IMGUR_API_URL: &str = "https://api.imgur.com";
pub const DEFAULT_PERCHANCE_API_URL: &str = "https://image-generation.perchance.org";
pub const DEFAULT_MAX_WAIT_POLLS: u32 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: String,
    pub api_port: String,
    pub imgur_client_id: String,
    pub imgur_api_url: String,
    pub perchance_api_url: String,
    pub perchance_user_key: String,
    pub perchance_max_wait_polls: u32,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Self {
        Config {
            api_host: env::var("API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            api_port: env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()),
            imgur_client_id: env::var("IMGUR_CLIENT_ID").unwrap_or_default(),
            imgur_api_url: env::var("IMGUR_API_URL").unwrap_or_else(|_| DEFAULT_IMGUR_API_URL.to_string()),
            perchance_api_url: env::var("PERCHANCE_API_URL").unwrap_or_else(|_| DEFAULT_PERCHANCE_API_URL.to_string()),
            perchance_user_key: env::var("PERCHANCE_USER_KEY").unwrap_or_default(),
            perchance_max_wait_polls: env::var("PERCHANCE_MAX_WAIT_POLLS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_WAIT_POLLS),
        }
    }

    /// Whether uploads can succeed at all. Reported verbatim by `/health`.
    pub fn imgur_configured(&self) -> bool {
        !self.imgur_client_id.is_empty()
    }

    /// Resolve the listening address, falling back to the defaults on bad input.
    pub fn socket_address(&self) -> SocketAddr {
        let ip: IpAddr = self.api_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid API_HOST '{}', falling back to {}", self.api_host, DEFAULT_HOST);
            IpAddr::from([0, 0, 0, 0])
        });
        let port: u16 = self.api_port.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid PORT '{}', falling back to {}", self.api_port, DEFAULT_PORT);
            DEFAULT_PORT
        });
        SocketAddr::new(ip, port)
    }

    pub fn print_env_vars(&self) {
        tracing::info!("API_HOST: {}", self.api_host);
        tracing::info!("PORT: {}", self.api_port);
        tracing::info!("IMGUR_CLIENT_ID: {}", mask(&self.imgur_client_id));
        tracing::info!("IMGUR_API_URL: {}", self.imgur_api_url);
        tracing::info!("PERCHANCE_API_URL: {}", self.perchance_api_url);
        tracing::info!("PERCHANCE_USER_KEY: {}", mask(&self.perchance_user_key));
        tracing::info!("PERCHANCE_MAX_WAIT_POLLS: {}", self.perchance_max_wait_polls);
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_host: DEFAULT_HOST.to_string(),
            api_port: DEFAULT_PORT.to_string(),
            imgur_client_id: String::new(),
            imgur_api_url: DEFAULT_IMGUR_API_URL.to_string(),
            perchance_api_url: DEFAULT_PERCHANCE_API_URL.to_string(),
            perchance_user_key: String::new(),
            perchance_max_wait_polls: DEFAULT_MAX_WAIT_POLLS,
        }
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<set>" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imgur_configured_tracks_client_id() {
        let mut config = Config::default();
        assert!(!config.imgur_configured());
        config.imgur_client_id = "abc123".to_string();
        assert!(config.imgur_configured());
    }

    #[test]
    fn test_socket_address_falls_back_on_bad_input() {
        let config = Config {
            api_host: "not-an-ip".to_string(),
            api_port: "seventy".to_string(),
            ..Config::default()
        };
        assert_eq!(config.socket_address(), SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));
    }

    #[test]
    fn test_socket_address_uses_configured_port() {
        let config = Config {
            api_host: "127.0.0.1".to_string(),
            api_port: "8080".to_string(),
            ..Config::default()
        };
        assert_eq!(config.socket_address(), SocketAddr::from(([127, 0, 0, 1], 8080)));
    }
}
