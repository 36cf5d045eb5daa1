//! Source configuration.

/// Options for reading the source document.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Error handling mode for per-page extraction.
    pub error_mode: ErrorMode,
}

impl SourceOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip pages whose content fails to decode (default).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Fail on the first page whose content cannot be decoded.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }
}

/// How to handle pages that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Log and continue with an empty page.
    #[default]
    Lenient,
    /// Propagate the error.
    Strict,
}
