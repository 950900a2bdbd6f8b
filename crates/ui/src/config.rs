use snafu::Snafu;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that opts the process into developer tooling.
pub const DEV_TOOLS_ENV_VAR: &str = "PARLOR_DEV_TOOLS";

/// Default filter for normal operation.
const PRODUCTION_FILTER: &str = "info";
/// Default filter once developer tooling is enabled.
const DEV_TOOLS_FILTER: &str = "debug,gpui=info,gpui_component=warn";

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[snafu(display("unrecognized PARLOR_DEV_TOOLS value `{value}`"))]
    InvalidDevToolsFlag { value: String },
}

/// Launch configuration read from the process environment.
///
/// There is deliberately no configuration file: the only recognized input is
/// the developer-tooling flag, and everything else is a compiled-in default.
#[derive(Debug, Clone, Default)]
pub struct LaunchConfig {
    dev_tools: bool,
    flag_error: Option<ConfigError>,
}

impl LaunchConfig {
    /// Reads the launch configuration from the environment.
    ///
    /// An unrecognized flag value is remembered so it can be reported once
    /// logging is up, and the process falls back to production behavior.
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var(DEV_TOOLS_ENV_VAR) else {
            return Self::default();
        };

        match parse_dev_tools_flag(&raw) {
            Ok(dev_tools) => Self {
                dev_tools,
                flag_error: None,
            },
            Err(error) => Self {
                dev_tools: false,
                flag_error: Some(error),
            },
        }
    }

    pub fn dev_tools(&self) -> bool {
        self.dev_tools
    }

    /// Installs the global tracing subscriber.
    ///
    /// `RUST_LOG` always wins; otherwise the default filter depends on whether
    /// developer tooling was requested.
    pub fn init_tracing(&self) {
        let default_filter = if self.dev_tools {
            DEV_TOOLS_FILTER
        } else {
            PRODUCTION_FILTER
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        if let Some(error) = &self.flag_error {
            tracing::warn!("{error}; developer tooling stays off");
        }
        if self.dev_tools {
            tracing::info!("developer tooling enabled via {DEV_TOOLS_ENV_VAR}");
        }
    }
}

fn parse_dev_tools_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        // An exported-but-empty variable counts as unset.
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidDevToolsFlag {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_spellings_enable_dev_tools() {
        for raw in ["1", "true", "TRUE", "yes", "On", " on "] {
            assert_eq!(parse_dev_tools_flag(raw), Ok(true), "{raw:?}");
        }
    }

    #[test]
    fn falsy_spellings_keep_dev_tools_off() {
        for raw in ["0", "false", "No", "off", "", "  "] {
            assert_eq!(parse_dev_tools_flag(raw), Ok(false), "{raw:?}");
        }
    }

    #[test]
    fn unrecognized_values_are_typed_errors() {
        let error = parse_dev_tools_flag("maybe").unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidDevToolsFlag {
                value: "maybe".to_string()
            }
        );
        assert!(error.to_string().contains("maybe"));
    }
}
