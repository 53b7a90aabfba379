//! Length-prefixed text messages over byte streams.
//!
//! Every message travels as a 4-byte big-endian length followed by its UTF-8
//! bytes. Readers and writers work over any `AsyncRead`/`AsyncWrite`, and
//! [`PeerSocket`] binds them to a TCP connection.

mod codec;
mod error;
mod peer;

pub use codec::{encode_frame, FrameReader, FrameWriter, DEFAULT_MAX_FRAME_LEN, LENGTH_PREFIX_LEN};
pub use error::{FrameStage, FramingError, FramingResult};
pub use peer::{ConnectionState, PeerSocket};
