use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Config, DatabaseSettings, LoggingSettings, MethodologySettings, ServerSettings,
};

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, an optional
/// `config.toml` in the working directory, `GTI__*` environment variables
/// (e.g. `GTI__SERVER__PORT=8080`), and finally `DATABASE_URL`, which may also
/// come from a `.env` file.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok();
    build_config(None, database_url)
}

/// Like [`load_config`], but reads the given file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok();
    build_config(Some(path), database_url)
}

fn build_config(file: Option<&Path>, database_url: Option<String>) -> Result<Config, ConfigError> {
    let file_source = match file {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix("GTI")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        )
        .set_override_option("database.url", database_url)?
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::IpAddr;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let file = write_toml("");
        let config = build_config(Some(file.path()), None).unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.server.api_version, "0.1.0");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_toml(
            r#"
            [server]
            port = 8080
            cors_origins = ["https://trust.example.org"]

            [database]
            url = "postgresql://reader@db/trust"
            max_connections = 4

            [methodology]
            path = "/srv/methodology.yaml"
            "#,
        );
        let config = build_config(Some(file.path()), None).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins, vec!["https://trust.example.org"]);
        assert_eq!(config.database.url, "postgresql://reader@db/trust");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(
            config.methodology.path,
            std::path::PathBuf::from("/srv/methodology.yaml")
        );
    }

    #[test]
    fn database_url_override_wins_over_file() {
        let file = write_toml("[database]\nurl = \"postgresql://from-file/trust\"\n");
        let config = build_config(
            Some(file.path()),
            Some("postgresql://from-env/trust".to_string()),
        )
        .unwrap();
        assert_eq!(config.database.url, "postgresql://from-env/trust");
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let file = write_toml("[database]\nmax_connections = 0\n");
        let err = build_config(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_database_url_is_rejected() {
        let file = write_toml("[database]\nurl = \"\"\n");
        let err = build_config(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
