use crate::{Config, FetchError, WeatherSnapshot, provider::relay::RelayedWeatherApi};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod relay;

/// Something that can turn a city name into a validated snapshot.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the relay-backed source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let api_key = config.require_api_key()?.clone();
    let source = RelayedWeatherApi::new(api_key, &config.relay_url, &config.upstream_url)?;

    Ok(Arc::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn source_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = source_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn source_from_config_rejects_invalid_relay_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        cfg.relay_url = "not a url".into();

        let err = source_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid relay URL"));
    }

    #[test]
    fn source_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("SECRET_KEY_123");

        let source = source_from_config(&cfg).expect("source should build");
        assert!(!format!("{source:?}").contains("SECRET_KEY_123"));
    }
}
