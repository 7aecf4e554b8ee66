use crate::cli::Args;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_ISS_URL: &str = "http://api.open-notify.org/iss-now.json";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    iss: Iss,
    metrics: Metrics,
}

impl AppConfig {
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let sources = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config_local").required(false))
            .add_source(
                Environment::with_prefix("ISS_EXPORTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(sources, args)
    }

    /// Layers the built-in defaults below `sources` and the command line flags above them.
    pub fn build(sources: ConfigBuilder<DefaultState>, args: &Args) -> Result<Self, ConfigError> {
        sources
            .set_default("iss.url", DEFAULT_ISS_URL)?
            .set_default("iss.interval_s", 10_i64)?
            .set_default("iss.request_timeout", "10s")?
            .set_default("metrics.bind_address", "0.0.0.0")?
            .set_default("metrics.port", 9280_i64)?
            .set_override_option("metrics.port", args.port.map(i64::from))?
            .set_override_option("iss.interval_s", args.interval.map(i64::from))?
            .build()?
            .try_deserialize()
    }

    pub fn iss(&self) -> &Iss {
        &self.iss
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[derive(Debug, Deserialize)]
pub struct Iss {
    url: String,
    interval_s: u64,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
}

impl Iss {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_s)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[derive(Debug, Deserialize)]
pub struct Metrics {
    bind_address: IpAddr,
    port: u16,
}

impl Metrics {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                iss: Iss {
                    url: "http://iss.url/iss-now.json".to_string(),
                    interval_s: 10,
                    request_timeout: Duration::from_secs(1),
                },
                metrics: Metrics {
                    bind_address: IpAddr::from([127, 0, 0, 1]),
                    port: 0,
                },
            },
        }
    }

    pub fn iss_url(mut self, url: String) -> Self {
        self.config.iss.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;

    fn toml(content: &str) -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(content, FileFormat::Toml))
    }

    #[test]
    fn defaults_match_the_original_exporter() -> Result<(), ConfigError> {
        let config = AppConfig::build(Config::builder(), &Args::default())?;

        assert_eq!(config.iss().url(), DEFAULT_ISS_URL);
        assert_eq!(config.iss().interval(), Duration::from_secs(10));
        assert_eq!(config.iss().request_timeout(), Duration::from_secs(10));
        assert_eq!(config.metrics().socket_addr(), "0.0.0.0:9280".parse::<SocketAddr>().unwrap());

        Ok(())
    }

    #[test]
    fn sources_override_defaults() -> Result<(), ConfigError> {
        let sources = toml(
            r#"
            [iss]
            url = "http://localhost:8080/iss-now.json"
            request_timeout = "2s 500ms"

            [metrics]
            bind_address = "127.0.0.1"
            port = 9000
            "#,
        );

        let config = AppConfig::build(sources, &Args::default())?;

        assert_eq!(config.iss().url(), "http://localhost:8080/iss-now.json");
        assert_eq!(config.iss().interval(), Duration::from_secs(10));
        assert_eq!(config.iss().request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.metrics().socket_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());

        Ok(())
    }

    #[test]
    fn command_line_flags_take_precedence() -> Result<(), ConfigError> {
        let sources = toml(
            r#"
            [iss]
            interval_s = 60

            [metrics]
            port = 9000
            "#,
        );
        let args = Args {
            port: Some(9281),
            interval: Some(5),
        };

        let config = AppConfig::build(sources, &args)?;

        assert_eq!(config.iss().interval(), Duration::from_secs(5));
        assert_eq!(config.metrics().socket_addr().port(), 9281);

        Ok(())
    }

    #[test]
    fn invalid_bind_address_is_an_error() {
        let sources = toml(
            r#"
            [metrics]
            bind_address = "not-an-address"
            "#,
        );

        assert!(AppConfig::build(sources, &Args::default()).is_err());
    }
}
