//! Observability configuration.
//!
//! | variable              | meaning                              | default |
//! |-----------------------|--------------------------------------|---------|
//! | `RUST_LOG`            | `EnvFilter` directives               | `info`  |
//! | `BANKLINE_LOG_FORMAT` | `json` or `pretty`                   | `json`  |

pub const LOG_FORMAT_VAR: &str = "BANKLINE_LOG_FORMAT";
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognised is `Json`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = lookup(LOG_FORMAT_VAR)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Self {
            format,
            ..Self::default()
        }
    }
}
