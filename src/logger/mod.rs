//! Logger initialization.
//!
//! Console tracing with an env-filter level and a choice of pretty or JSON
//! output, driven by [`LoggerSettings`].

use tracing_subscriber::EnvFilter;

use crate::config::LoggerSettings;

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "full" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format '{}'. Valid formats are: pretty, json",
                other
            )),
        }
    }
}

/// Installs the global tracing subscriber from logger settings.
///
/// The level string accepts plain levels ("info") as well as full env-filter
/// directives ("info,larder::repositories=debug").
pub fn init_logger(settings: &LoggerSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&settings.level)
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", settings.level, e))?;

    let format: LogFormat = settings
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_known_values() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn format_rejects_unknown_values() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("Invalid log format"));
    }
}
