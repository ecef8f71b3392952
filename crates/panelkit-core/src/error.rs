//! Error types shared by the PanelKit generator crates.
//!
//! Recoverable input anomalies never surface here: out-of-range parameters
//! are clamped and reported through warning notes (see [`crate::validate`]),
//! and unplaceable nesting parts come back as explicit overflow entries.
//! These error types cover the one category that must fail a request: the
//! boolean path engine returning a degenerate result for valid input, plus
//! malformed interchange data.

use thiserror::Error;

/// Top-level error for panel and layout generation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Parameters are structurally unusable (not merely out of range).
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A geometry operation produced an unusable result.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// A boolean path engine operation failed.
    #[error("Path operation error: {0}")]
    PathOp(#[from] PathOpError),

    /// Layout export failed.
    #[error("Export failed: {0}")]
    ExportFailed(String),
}

/// Errors raised at the boolean path engine boundary.
#[derive(Error, Debug)]
pub enum PathOpError {
    /// The underlying library returned an empty result for non-degenerate
    /// input. Silently continuing would produce an incorrect physical part,
    /// so this is a hard failure carrying enough context to diagnose.
    #[error("Boolean operation '{operation}' returned an empty result for {input}")]
    EmptyResult { operation: String, input: String },

    /// The underlying library rejected the operation outright.
    #[error("Boolean operation '{operation}' failed: {detail}")]
    Failed { operation: String, detail: String },

    /// A path string could not be parsed.
    #[error("Path parse error at token {position}: {detail}")]
    Parse { position: usize, detail: String },
}

impl PathOpError {
    /// Builds an [`PathOpError::EmptyResult`] with a short summary of the
    /// offending polygon (vertex count and bounding extent).
    pub fn empty(operation: &str, vertex_count: usize, extent: (f64, f64)) -> Self {
        Self::EmptyResult {
            operation: operation.to_string(),
            input: format!(
                "polygon with {} vertices ({:.2}x{:.2} mm)",
                vertex_count, extent.0, extent.1
            ),
        }
    }
}

/// Result type alias for generation operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type alias for boolean path engine operations.
pub type PathOpResult<T> = Result<T, PathOpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::InvalidParameters("finger width must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameters: finger width must be positive"
        );

        let err = EngineError::ExportFailed("no panels in layout".to_string());
        assert_eq!(err.to_string(), "Export failed: no panels in layout");
    }

    #[test]
    fn test_path_op_error_display() {
        let err = PathOpError::empty("union", 4, (100.0, 80.0));
        assert_eq!(
            err.to_string(),
            "Boolean operation 'union' returned an empty result for polygon with 4 vertices (100.00x80.00 mm)"
        );

        let err = PathOpError::Parse {
            position: 3,
            detail: "expected coordinate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Path parse error at token 3: expected coordinate"
        );
    }

    #[test]
    fn test_error_conversion() {
        let path_err = PathOpError::Failed {
            operation: "offset".to_string(),
            detail: "self-intersecting input".to_string(),
        };
        let engine_err: EngineError = path_err.into();
        assert!(matches!(engine_err, EngineError::PathOp(_)));
    }
}
