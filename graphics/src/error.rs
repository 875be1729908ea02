//! Graphics error types.

use std::fmt;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// Failed to initialize the graphics system.
    InitializationFailed(String),
    /// Failed to create a resource.
    ResourceCreationFailed(String),
    /// A requested feature is not supported by the device's capability tier.
    FeatureNotSupported(String),
    /// Out of GPU memory.
    OutOfMemory,
    /// The GPU device was lost or dropped.
    DeviceLost,
    /// An invalid parameter was provided.
    InvalidParameter(String),
    /// No device has been made current.
    NoCurrentDevice,
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailed(msg) => write!(f, "initialization failed: {msg}"),
            Self::ResourceCreationFailed(msg) => write!(f, "resource creation failed: {msg}"),
            Self::FeatureNotSupported(msg) => write!(f, "feature not supported: {msg}"),
            Self::OutOfMemory => write!(f, "out of GPU memory"),
            Self::DeviceLost => write!(f, "GPU device lost"),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::NoCurrentDevice => write!(f, "no current graphics device"),
        }
    }
}

impl std::error::Error for GraphicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphicsError::OutOfMemory;
        assert_eq!(err.to_string(), "out of GPU memory");

        let err = GraphicsError::FeatureNotSupported("vertex-id draws".to_string());
        assert_eq!(err.to_string(), "feature not supported: vertex-id draws");

        let err = GraphicsError::NoCurrentDevice;
        assert_eq!(err.to_string(), "no current graphics device");
    }
}
