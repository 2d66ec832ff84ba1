use std::{fs::File, path::Path};

use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_PROVIDER_NAME: &str = "IPTVorg";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub listen_addr: String,
    /// Source name reported in stream links
    pub provider_name: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
}

impl Config {
    pub fn provider_name(&self) -> &str {
        self.provider_name.as_deref().unwrap_or(DEFAULT_PROVIDER_NAME)
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let file = File::open(path.as_ref())?;
    let config: Config = serde_yaml::from_reader(file)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_PROVIDER_NAME};

    #[test]
    fn test_full_config() {
        let config: Config = serde_yaml::from_str(
            r#"
listenAddr: 127.0.0.1:8080
providerName: World TV
http:
  userAgent: Kodi/20
  proxy: http://127.0.0.1:3128
"#,
        )
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.provider_name(), "World TV");
        assert_eq!(config.http.user_agent.as_deref(), Some("Kodi/20"));
        assert_eq!(config.http.proxy.as_deref(), Some("http://127.0.0.1:3128"));
    }

    #[test]
    fn test_minimal_config() {
        let config: Config = serde_yaml::from_str("listenAddr: 0.0.0.0:80").unwrap();
        assert_eq!(config.provider_name(), DEFAULT_PROVIDER_NAME);
        assert!(config.http.user_agent.is_none());
        assert!(config.http.proxy.is_none());
    }

    #[test]
    fn test_missing_listen_addr() {
        assert!(serde_yaml::from_str::<Config>("providerName: A").is_err());
    }
}
