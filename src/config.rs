//! Server configuration parsed from Leptos metadata and environment variables.
//!
//! `[package.metadata.leptos]` supplies the defaults (site root, address);
//! `HOST` and `PORT` override the bind address for container deployments.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use leptos::config::{LeptosOptions, get_configuration};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("invalid {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub site_root: PathBuf,
    pub leptos: LeptosOptions,
}

impl ServerConfig {
    /// Build typed server config from Leptos metadata plus environment.
    ///
    /// Optional:
    /// - `HOST`: bind IP, default from `site-addr`
    /// - `PORT`: bind port, default from `site-addr`
    ///
    /// # Errors
    ///
    /// Returns an error if the Leptos metadata cannot be loaded or an
    /// override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let conf = get_configuration(None).map_err(|e| ConfigError::Leptos(e.to_string()))?;
        let leptos = conf.leptos_options;
        let addr = resolve_addr(
            leptos.site_addr,
            std::env::var("HOST").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )?;
        let site_root = PathBuf::from(leptos.site_root.as_ref());
        Ok(Self { addr, site_root, leptos })
    }

    /// Directory holding the hydration bundle served under `/pkg`.
    pub fn pkg_dir(&self) -> PathBuf {
        self.site_root.join(self.leptos.site_pkg_dir.as_ref())
    }
}

fn resolve_addr(default: SocketAddr, host: Option<&str>, port: Option<&str>) -> Result<SocketAddr, ConfigError> {
    let ip = match host {
        Some(raw) => raw
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidEnv { var: "HOST", value: raw.to_owned() })?,
        None => default.ip(),
    };
    let port = match port {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEnv { var: "PORT", value: raw.to_owned() })?,
        None => default.port(),
    };
    Ok(SocketAddr::new(ip, port))
}
