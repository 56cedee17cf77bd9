use serde::Deserialize;
use std::fmt;

/// The root configuration structure for the entire application.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Settings for the big-integer-safe JSON encoder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EncoderConfig {
    /// Suffix that tags big-integer tokens between the encoder's two passes.
    /// Change it when feed strings may legitimately end in the default.
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    "#bigint".to_string()
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(level)
    }
}

/// Parameters for replaying a capture against the logging host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayConfig {
    /// Page id the replayed script runs as.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Whether replayed events are flagged as real-time rather than history.
    #[serde(default)]
    pub real_time: bool,
    /// The host renders after this many replayed events.
    #[serde(default = "default_render_every")]
    pub render_every: usize,
}

fn default_page() -> u64 {
    1
}

fn default_render_every() -> usize {
    100
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            page: default_page(),
            real_time: false,
            render_every: default_render_every(),
        }
    }
}
