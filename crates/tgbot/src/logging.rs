//! Tracing subscriber setup driven by the `log` config section
use crate::api::types::SERVICE_NAME;
use crate::config::{CONFIG, LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Create a filter for the subscriber
fn fmt_filter(cfg: &LogConfig) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    let mut fmt_filter = EnvFilter::new(cfg.filter_default.as_ref()).add_directive(
        format!("{}={}", SERVICE_NAME, cfg.filter_self_directive).parse()?,
    );
    for fmt in &cfg.directives {
        fmt_filter = fmt_filter.add_directive(fmt.fmt_filter_directive.parse()?);
    }

    Ok(fmt_filter)
}

/// Install a global subscriber configured from [`CONFIG`]
///
/// ## Errors
/// - invalid filter directive in the config
/// - a global subscriber is already installed
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    init_with(&CONFIG.log)
}

/// Install a global subscriber configured from `cfg`
pub fn init_with(cfg: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry();

    match cfg.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_filter(fmt_filter(cfg)?),
            )
            .try_init()?,
        LogFormat::Full => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(cfg.ansi)
                    .with_writer(std::io::stderr)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_filter(fmt_filter(cfg)?),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_ansi(cfg.ansi)
                    .with_writer(std::io::stderr)
                    .with_filter(fmt_filter(cfg)?),
            )
            .try_init()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FmtDirective;
    use std::borrow::Cow;

    #[test]
    fn test_fmt_filter_default_config() {
        let result = fmt_filter(&LogConfig::default());
        assert!(
            result.is_ok(),
            "Failed to create fmt filter: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_fmt_filter_with_invalid_directive() {
        let cfg = LogConfig {
            directives: vec![FmtDirective {
                fmt_filter_directive: Cow::Borrowed("reqwest=not_a_level"),
            }],
            ..Default::default()
        };
        assert!(fmt_filter(&cfg).is_err());
    }

    #[test]
    fn test_init_twice_fails() {
        let cfg = LogConfig {
            format: LogFormat::Json,
            ..Default::default()
        };
        let _ = init_with(&cfg);
        assert!(init_with(&cfg).is_err());
    }
}
