use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed song document: {0}")]
    Structure(String),

    #[error("Invalid {field}: {value} (expected {min}-{max})")]
    Config {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Line number {line} exceeds the BASIC limit")]
    LineNumberOverflow { line: u32 },

    #[error("Channels produced uneven line counts: {lengths:?}")]
    UnevenChannels { lengths: Vec<usize> },

    #[error("Output is not 7-bit clean: {0:?}")]
    NonAscii(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
