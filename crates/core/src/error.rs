use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum BarError {
    #[error("config error: {0}")]
    Config(String),

    #[error("display error: {0}")]
    Display(String),

    #[error("system error: {0}")]
    System(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BarError {
    /// Build a [`BarError::Display`] tagged with the operation that failed.
    ///
    /// Intended for `map_err`: `conn.flush().map_err(BarError::display("flush"))`.
    pub fn display<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> Self {
        move |e| Self::Display(format!("{what}: {e}"))
    }
}

pub type Result<T, E = BarError> = std::result::Result<T, E>;
