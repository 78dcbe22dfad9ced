use serde::Deserialize;
use std::collections::HashMap;
use config::{Config, ConfigError, Environment, File};
use tracing::debug;

/// Environment variable carrying the backend base URL for every API call.
pub const BASE_URL_ENV: &str = "ADMIN_API_BASE_URL";

const DEFAULT_CONFIG_PATH: &str = "config/default";
const DEFAULT_EMULATION: &str = "chrome133";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Seconds a cached read is served without refetching. Zero refetches
    /// on every read.
    #[serde(default)]
    pub stale_time_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub emulation: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Layers the optional config file, `APP_*` variables and finally
    /// `ADMIN_API_BASE_URL`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("http.emulation", DEFAULT_EMULATION)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("api.base_url", std::env::var(BASE_URL_ENV).ok())?;

        let config = builder.build()?;

        if let Ok(headers) = config.get_table("api.headers") {
            debug!(
                header_count = headers.len(),
                "Loaded API headers from configuration"
            );
        }

        let settings: Settings = config.try_deserialize()?;

        debug!(
            base_url = %settings.api.base_url,
            emulation = %settings.http.emulation,
            stale_time_secs = settings.api.stale_time_secs,
            "Parsed settings"
        );

        Ok(settings)
    }

    /// Settings pointing at `base_url` with no extra headers.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                headers: HashMap::new(),
                stale_time_secs: 0,
            },
            http: HttpConfig {
                emulation: DEFAULT_EMULATION.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "api:\n  base_url: \"http://backend.test\"\n  headers:\n    authorization: \"Bearer abc\"\nhttp:\n  emulation: firefox136"
        )
        .unwrap();

        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        if std::env::var(BASE_URL_ENV).is_err() {
            assert_eq!(settings.api.base_url, "http://backend.test");
        }
        assert_eq!(settings.api.headers.get("authorization").unwrap(), "Bearer abc");
        assert_eq!(settings.http.emulation, "firefox136");
    }

    #[test]
    fn emulation_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minimal.yaml");
        std::fs::write(&path, "api:\n  base_url: \"http://backend.test\"\n").unwrap();

        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.http.emulation, DEFAULT_EMULATION);
        assert!(settings.api.headers.is_empty());
        assert_eq!(settings.api.stale_time_secs, 0);
    }

    #[test]
    fn reads_stale_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cached.yaml");
        std::fs::write(
            &path,
            "api:\n  base_url: \"http://backend.test\"\n  stale_time_secs: 30\n",
        )
        .unwrap();

        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.api.stale_time_secs, 30);
    }
}
