use serde::Deserialize;

/// Output format for log lines
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    #[serde(alias = "PRETTY", alias = "Pretty")]
    Pretty,
    #[serde(alias = "JSON", alias = "Json")]
    Json,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON catalog file; the built-in demo catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Results returned by quiz submissions when the client sends no limit
    #[serde(default = "default_quiz_result_limit")]
    pub quiz_result_limit: usize,

    /// Results returned by keyword searches when the client sends no limit
    #[serde(default = "default_search_result_limit")]
    pub search_result_limit: usize,

    /// Upper bound on any client-requested limit
    #[serde(default = "default_max_result_limit")]
    pub max_result_limit: usize,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_quiz_result_limit() -> usize {
    6
}

fn default_search_result_limit() -> usize {
    10
}

fn default_max_result_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: None,
            quiz_result_limit: default_quiz_result_limit(),
            search_result_limit: default_search_result_limit(),
            max_result_limit: default_max_result_limit(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects limits that would make every response empty
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_result_limit == 0 {
            anyhow::bail!("MAX_RESULT_LIMIT must be at least 1");
        }
        if self.quiz_result_limit == 0 || self.search_result_limit == 0 {
            anyhow::bail!("Default result limits must be at least 1");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.quiz_result_limit, 6);
        assert_eq!(config.search_result_limit, 10);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides_from_env() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("CATALOG_PATH".to_string(), "/srv/catalog.json".to_string()),
            ("LOG_FORMAT".to_string(), "json".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.catalog_path.as_deref(), Some("/srv/catalog.json"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_accepts_uppercase() {
        let vars = vec![("LOG_FORMAT".to_string(), "JSON".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);

        let vars = vec![("LOG_FORMAT".to_string(), "Pretty".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = Config {
            max_result_limit: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
