use std::fmt;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Part of a frame being read when the peer went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStage {
    Length,
    Payload,
}

impl fmt::Display for FrameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameStage::Length => f.write_str("length prefix"),
            FrameStage::Payload => f.write_str("payload"),
        }
    }
}

/// Framing-specific error type
#[derive(Debug, Error)]
pub enum FramingError {
    #[error("Connection closed while reading the {stage}")]
    ConnectionClosed { stage: FrameStage },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame of {len} bytes exceeds the limit of {max} bytes")]
    FrameTooLarge { len: usize, max: usize },

    #[error("Frame payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Writer is unusable after an earlier write failure")]
    WriterPoisoned,

    #[error("Peer socket is not connected")]
    NotConnected,
}

impl FramingError {
    /// Metric label for this error
    pub fn kind(&self) -> &'static str {
        match self {
            FramingError::ConnectionClosed { .. } => "connection_closed",
            FramingError::Io(_) => "io",
            FramingError::FrameTooLarge { .. } => "frame_too_large",
            FramingError::InvalidUtf8(_) => "invalid_utf8",
            FramingError::WriterPoisoned => "writer_poisoned",
            FramingError::NotConnected => "not_connected",
        }
    }

    /// Peer closed the connection between two frames
    pub fn is_clean_close(&self) -> bool {
        matches!(
            self,
            FramingError::ConnectionClosed {
                stage: FrameStage::Length
            }
        )
    }
}

/// Result type for framing operations
pub type FramingResult<T> = Result<T, FramingError>;
