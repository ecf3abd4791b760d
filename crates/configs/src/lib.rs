use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_CACHE_URL: &str = "redis://0.0.0.0:6379";
pub const DEFAULT_WORKER_THREADS: usize = 4;

const CACHE_SCHEMES: [&str; 4] = ["redis://", "rediss://", "redis+unix://", "memory://"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Unset means "use the service's well-known port".
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: None, worker_threads: Some(DEFAULT_WORKER_THREADS) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_url")]
    pub url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { url: default_cache_url() }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_cache_url() -> String { DEFAULT_CACHE_URL.to_string() }

/// Environment overrides applied on top of the file, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub host: Option<String>,
    pub port: Option<String>,
    pub worker_threads: Option<String>,
    pub cache_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            host: var("SERVER_HOST"),
            port: var("SERVER_PORT"),
            worker_threads: var("TOKIO_WORKER_THREADS"),
            cache_url: var("REDIS_URL"),
        }
    }
}

/// Read `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    match std::fs::read_to_string(&path) {
        Ok(content) => parse(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(anyhow!("cannot read {path}: {e}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File, then environment, then normalization against the service's default port.
    pub fn load_for(default_port: u16) -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_overrides(&EnvOverrides::from_env())?;
        cfg.normalize_and_validate(default_port)?;
        Ok(cfg)
    }

    pub fn apply_overrides(&mut self, env: &EnvOverrides) -> Result<()> {
        if let Some(host) = &env.host {
            self.server.host = host.clone();
        }
        if let Some(port) = &env.port {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT `{port}` is not a valid port: {e}"))?;
            self.server.port = Some(port);
        }
        if let Some(threads) = &env.worker_threads {
            let threads = threads
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow!("TOKIO_WORKER_THREADS `{threads}` is invalid: {e}"))?;
            self.server.worker_threads = Some(threads);
        }
        if let Some(url) = &env.cache_url {
            self.cache.url = url.clone();
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self, default_port: u16) -> Result<()> {
        self.server.normalize(default_port)?;
        self.cache.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self, default_port: u16) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        match self.port {
            None => self.port = Some(default_port),
            Some(0) => return Err(anyhow!("server.port must be within 1..=65535")),
            Some(_) => {}
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let port = self.port.ok_or_else(|| anyhow!("server.port not resolved"))?;
        Ok(format!("{}:{}", self.host, port).parse()?)
    }
}

impl CacheConfig {
    /// A bare `host:port` location is taken to be a plain Redis endpoint.
    pub fn normalize(&mut self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(anyhow!("cache.url is empty; set it in config.toml or REDIS_URL"));
        }
        self.url = if url.contains("://") { url.to_string() } else { format!("redis://{url}") };
        if !CACHE_SCHEMES.iter().any(|s| self.url.starts_with(s)) {
            return Err(anyhow!(
                "cache.url `{}` must use one of {}",
                self.url,
                CACHE_SCHEMES.join(", ")
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gets_service_defaults() -> Result<()> {
        let mut cfg = parse("")?;
        cfg.normalize_and_validate(1090)?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, Some(1090));
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.cache.url, DEFAULT_CACHE_URL);
        assert_eq!(cfg.server.bind_addr()?.port(), 1090);
        Ok(())
    }

    #[test]
    fn file_values_win_over_defaults() -> Result<()> {
        let mut cfg = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            worker_threads = 0

            [cache]
            url = "memory://"
            "#,
        )?;
        cfg.normalize_and_validate(1080)?;
        assert_eq!(cfg.server.port, Some(9000));
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.cache.url, "memory://");
        Ok(())
    }

    #[test]
    fn env_overrides_apply_after_file() -> Result<()> {
        let mut cfg = parse("[server]\nport = 9000\n")?;
        let env = EnvOverrides {
            port: Some("1234".into()),
            cache_url: Some("cache:6379".into()),
            ..Default::default()
        };
        cfg.apply_overrides(&env)?;
        cfg.normalize_and_validate(1080)?;
        assert_eq!(cfg.server.port, Some(1234));
        assert_eq!(cfg.cache.url, "redis://cache:6379");
        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        let env = EnvOverrides { port: Some("http".into()), ..Default::default() };
        assert!(AppConfig::default().apply_overrides(&env).is_err());

        let mut cfg = AppConfig::default();
        cfg.cache.url = "postgres://db".into();
        assert!(cfg.normalize_and_validate(1080).is_err());

        let mut cfg = AppConfig::default();
        cfg.server.port = Some(0);
        assert!(cfg.normalize_and_validate(1080).is_err());
    }
}
