//! Error types for spline loading and session configuration.

use thiserror::Error;

/// Errors produced while loading a spline or configuring a session.
///
/// Every variant is recoverable: a failed load leaves the previously loaded
/// track in place. The per-frame path never produces one of these.
#[derive(Debug, Error)]
pub enum CoasterError {
    /// Spline text did not match the expected layout or held a bad number.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number in the source text (0 when no line applies).
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Geometry that cannot be fitted or interpolated.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A configuration value outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be decoded.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl CoasterError {
    /// Creates a malformed input error for the given source line.
    #[must_use]
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// Creates a degenerate geometry error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry(reason.into())
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// True for errors raised by the text parser.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// True for errors raised by curve or track fitting.
    pub fn is_degenerate_geometry(&self) -> bool {
        matches!(self, Self::DegenerateGeometry(_))
    }
}

/// Result type for loading and configuration.
pub type Result<T> = std::result::Result<T, CoasterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_names_the_line() {
        let err = CoasterError::malformed(7, "expected 3 components");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("expected 3 components"));
        assert!(err.is_malformed_input());
    }

    #[test]
    fn degenerate_message() {
        let err = CoasterError::degenerate("bounding box has zero width");
        assert!(err.to_string().contains("degenerate geometry"));
        assert!(err.is_degenerate_geometry());
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn config_parse_converts_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoasterError = serde_err.into();
        assert!(err.to_string().contains("configuration parse error"));
    }
}
