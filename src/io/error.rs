//! Error types for render operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all render operations
#[derive(Debug)]
pub enum RenderError {
    /// Failed to load the source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data cannot drive a render
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Render parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save the finished canvas to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Preview window creation or update failure
    Preview {
        /// Description of the display failure
        reason: String,
    },

    /// The render worker thread terminated abnormally
    Worker {
        /// Description of the worker failure
        reason: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Preview { reason } => {
                write!(f, "Preview display error: {reason}")
            }
            Self::Worker { reason } => {
                write!(f, "Render worker error: {reason}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for render results
pub type Result<T> = std::result::Result<T, RenderError>;

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> RenderError {
    RenderError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: impl Into<String>) -> RenderError {
    RenderError::InvalidSourceData {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display_includes_all_fields() {
        let err = invalid_parameter("width", &16, &"too narrow for sectioning");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'width' = '16': too narrow for sectioning"
        );
    }

    #[test]
    fn test_file_system_display_includes_operation_and_path() {
        let err = RenderError::FileSystem {
            path: PathBuf::from("/tmp/out.jpg"),
            operation: "create directory",
            source: std::io::Error::other("disk full"),
        };
        let message = err.to_string();
        assert!(message.contains("create directory"));
        assert!(message.contains("/tmp/out.jpg"));
    }

    #[test]
    fn test_io_error_converts_to_file_system_variant() {
        let err: RenderError = std::io::Error::other("boom").into();
        assert!(matches!(err, RenderError::FileSystem { .. }));
    }
}
