use serde_derive::Deserialize;

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct CmpConfig {
    #[serde(default)]
    pub parse: ParseOptions,

    #[serde(default)]
    pub report: ReportOptions,
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ParseOptions {
    #[serde(default)]
    pub actions: ActionPolicy,
}

/// What to do with `{ ... }` code blocks written after a sequence.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ActionPolicy {
    /// plain PEG only, a code block is a syntax error
    #[default]
    Reject,
    /// accept code blocks and compare them as part of the body
    Keep,
    /// accept code blocks and leave them out of the comparison
    Strip,
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ReportOptions {
    #[serde(default)]
    pub format: ReportFormat,

    /// exit with a non-zero status when any rule differs
    #[serde(default)]
    pub fail_on_mismatch: bool,
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigReadError {
    #[error("failed to read config: {0}")]
    ReadError(std::io::Error),

    #[error("invalid config: {0}")]
    ParseError(toml::de::Error),
}

pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<CmpConfig, ConfigReadError> {
    let config = std::fs::read_to_string(path).map_err(ConfigReadError::ReadError)?;

    toml::from_str::<CmpConfig>(&config).map_err(ConfigReadError::ParseError)
}
