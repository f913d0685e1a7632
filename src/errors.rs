//! Error types with diagnostics using miette
//!
//! Only programmer errors surface here. Degenerate geometry (zero-sized shapes,
//! zero-width strokes, missing colours, zero shadow offsets) is skipped by the
//! renderers and never reported as an error.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the coordinate, style and rendering layers.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A conversion or constructor received an empty or non-finite value.
    #[error("invalid argument `{what}`: {reason}")]
    #[diagnostic(
        code(chartpaint::invalid_argument),
        help("coordinate conversion needs finite values and a rectangle/size with positive width and height")
    )]
    InvalidArgument { what: &'static str, reason: String },

    /// An enum value reached a dispatch that has no arm for it.
    #[error("invalid operation: unsupported {what} `{value}`")]
    #[diagnostic(
        code(chartpaint::invalid_operation),
        help("this is a caller or configuration bug, not a runtime condition")
    )]
    InvalidOperation { what: &'static str, value: String },

    /// A backend could not allocate or use its drawing surface.
    #[error("canvas error: {reason}")]
    #[diagnostic(code(chartpaint::canvas))]
    Canvas { reason: String },
}

impl RenderError {
    pub(crate) fn invalid_argument(what: &'static str, reason: impl Into<String>) -> Self {
        RenderError::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_operation(what: &'static str, value: impl ToString) -> Self {
        RenderError::InvalidOperation {
            what,
            value: value.to_string(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = RenderError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = RenderError::invalid_operation("marker style", "Hexagon");
        assert_eq!(
            err.to_string(),
            "invalid operation: unsupported marker style `Hexagon`"
        );

        let err = RenderError::invalid_argument("rect", "width is 0");
        assert_eq!(err.to_string(), "invalid argument `rect`: width is 0");
    }

    #[test]
    fn diagnostic_codes_are_stable() {
        let err = RenderError::invalid_argument("size", "height is NaN");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("chartpaint::invalid_argument"));
    }
}
