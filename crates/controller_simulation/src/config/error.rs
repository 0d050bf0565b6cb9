//! Ошибки загрузки/валидации конфигурации контроллера

/// Errors that can occur when loading, saving, or validating controller config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read controller config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write controller config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse controller config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize controller config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A tuning value is outside of its allowed range.
    #[error("{field} = {value} is out of range ({expected})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}
