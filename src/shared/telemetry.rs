//! Tracing subscriber setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter from `RUST_LOG`, falling back to the configured directive.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()))
}

/// Install the global subscriber. Fails if one is already set, which
/// lets a host application keep its own.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let json = config.is_json();

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, format: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: format.to_string(),
        }
    }

    #[test]
    fn test_bare_level_scopes_to_crate() {
        assert_eq!(
            logging("debug", "text").filter_directive(),
            "warn,paged_list=debug,paged_list_demo=debug"
        );
    }

    #[test]
    fn test_full_directive_is_kept() {
        assert_eq!(
            logging(" info,sea_orm=debug ", "text").filter_directive(),
            "info,sea_orm=debug"
        );
        assert_eq!(
            logging("paged_list=trace", "text").filter_directive(),
            "paged_list=trace"
        );
    }

    #[test]
    fn test_format_selection() {
        assert!(logging("info", "JSON").is_json());
        assert!(!logging("info", "text").is_json());
        assert!(!logging("info", "pretty").is_json());
    }

    #[test]
    fn test_second_install_fails() {
        let config = logging("info", "text");
        let _ = init_tracing(&config);

        assert!(init_tracing(&config).is_err());
    }
}
