//! Frame reader and writer.
//!
//! A frame is a `u32` big-endian (network order) byte count followed by that many bytes of UTF-8.

use futures::Stream;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::metrics::FrameMetrics;

use super::error::{FrameStage, FramingError, FramingResult};

/// Size of the length prefix in bytes
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Default cap on a single payload
pub const DEFAULT_MAX_FRAME_LEN: usize = 1024 * 1024;

/// Build a complete frame for `message` in one buffer
pub fn encode_frame(message: &str) -> FramingResult<Vec<u8>> {
    let payload = message.as_bytes();
    let len = u32::try_from(payload.len()).map_err(|_| FramingError::FrameTooLarge {
        len: payload.len(),
        max: u32::MAX as usize,
    })?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Writes one frame per message
#[derive(Debug)]
pub struct FrameWriter<W> {
    inner: W,
    max_frame_len: usize,
    poisoned: bool,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_max_frame_len(inner, DEFAULT_MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(inner: W, max_frame_len: usize) -> Self {
        Self {
            inner,
            max_frame_len,
            poisoned: false,
        }
    }

    /// Write `message` as a single frame and flush it.
    ///
    /// An oversized message is rejected before anything is written. An I/O failure
    /// leaves a partial frame on the stream, so the writer refuses all later writes.
    pub async fn write_message(&mut self, message: &str) -> FramingResult<()> {
        let result = self.write_frame(message).await;
        if let Err(e) = &result {
            FrameMetrics::record_error(e.kind());
        }
        result
    }

    async fn write_frame(&mut self, message: &str) -> FramingResult<()> {
        if self.poisoned {
            return Err(FramingError::WriterPoisoned);
        }
        if message.len() > self.max_frame_len {
            return Err(FramingError::FrameTooLarge {
                len: message.len(),
                max: self.max_frame_len,
            });
        }

        let frame = encode_frame(message)?;
        if let Err(e) = self.send(&frame).await {
            self.poisoned = true;
            tracing::warn!(error = %e, "Frame write failed, writer poisoned");
            return Err(FramingError::Io(e));
        }

        FrameMetrics::record_written(frame.len());
        Ok(())
    }

    async fn send(&mut self, frame: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(frame).await?;
        self.inner.flush().await
    }

    /// Flush and close the write direction so the peer reads end-of-stream
    pub async fn shutdown(&mut self) -> FramingResult<()> {
        self.inner.shutdown().await?;
        Ok(())
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Reads frames one at a time
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    max_frame_len: usize,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_max_frame_len(inner, DEFAULT_MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(inner: R, max_frame_len: usize) -> Self {
        Self {
            inner,
            max_frame_len,
        }
    }

    /// Read the next complete message
    pub async fn read_message(&mut self) -> FramingResult<String> {
        let result = self.read_frame().await;
        if let Err(e) = &result {
            FrameMetrics::record_error(e.kind());
        }
        result
    }

    async fn read_frame(&mut self) -> FramingResult<String> {
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        self.inner
            .read_exact(&mut prefix)
            .await
            .map_err(|e| short_read(e, FrameStage::Length))?;

        let len = u32::from_be_bytes(prefix) as usize;
        if len > self.max_frame_len {
            return Err(FramingError::FrameTooLarge {
                len,
                max: self.max_frame_len,
            });
        }

        let mut payload = vec![0u8; len];
        self.inner
            .read_exact(&mut payload)
            .await
            .map_err(|e| short_read(e, FrameStage::Payload))?;

        let message = String::from_utf8(payload)?;
        FrameMetrics::record_read(LENGTH_PREFIX_LEN + len);
        Ok(message)
    }

    /// Messages as a lazy stream.
    ///
    /// The stream yields each message in order. The first error is yielded as the
    /// last item. Cancelling `shutdown` ends the stream without an error.
    pub fn into_stream(
        self,
        shutdown: CancellationToken,
    ) -> impl Stream<Item = FramingResult<String>> {
        let mut reader = self;
        async_stream::stream! {
            loop {
                let next = tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => None,
                    result = reader.read_message() => Some(result),
                };

                match next {
                    None => break,
                    Some(Ok(message)) => yield Ok(message),
                    Some(Err(e)) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

fn short_read(error: std::io::Error, stage: FrameStage) -> FramingError {
    if error.kind() == std::io::ErrorKind::UnexpectedEof {
        FramingError::ConnectionClosed { stage }
    } else {
        FramingError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio_test::io::Builder;

    #[test]
    fn test_encode_frame() {
        assert_eq!(
            encode_frame("look").unwrap(),
            vec![0, 0, 0, 4, b'l', b'o', b'o', b'k']
        );
        assert_eq!(encode_frame("").unwrap(), vec![0, 0, 0, 0]);

        let frame = encode_frame("café").unwrap();
        assert_eq!(&frame[..4], &[0, 0, 0, 5]);
        assert_eq!(frame.len(), 9);
    }

    #[tokio::test]
    async fn test_write_single_frame() {
        let mock = Builder::new()
            .write(&[0, 0, 0, 4, b'l', b'o', b'o', b'k'])
            .build();
        let mut writer = FrameWriter::new(mock);
        writer.write_message("look").await.unwrap();
        assert!(!writer.is_poisoned());
    }

    #[tokio::test]
    async fn test_read_split_prefix() {
        let mock = Builder::new()
            .read(&[0, 0])
            .read(&[0, 4])
            .read(b"lo")
            .read(b"ok")
            .build();
        let mut reader = FrameReader::new(mock);
        assert_eq!(reader.read_message().await.unwrap(), "look");
    }

    #[tokio::test]
    async fn test_write_failure_poisons_writer() {
        let mock = Builder::new()
            .write_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
            .build();
        let mut writer = FrameWriter::new(mock);

        assert!(matches!(
            writer.write_message("look").await,
            Err(FramingError::Io(_))
        ));
        assert!(writer.is_poisoned());
        assert!(matches!(
            writer.write_message("look").await,
            Err(FramingError::WriterPoisoned)
        ));
    }

    #[tokio::test]
    async fn test_oversized_write_rejected_without_writing() {
        let mock = Builder::new().write(&[0, 0, 0, 2, b'o', b'k']).build();
        let mut writer = FrameWriter::with_max_frame_len(mock, 3);

        assert!(matches!(
            writer.write_message("toolong").await,
            Err(FramingError::FrameTooLarge { len: 7, max: 3 })
        ));
        assert!(!writer.is_poisoned());
        writer.write_message("ok").await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_ends_peer_stream() {
        let (client, server) = tokio::io::duplex(64);
        let mut writer = FrameWriter::new(client);
        let mut reader = FrameReader::new(server);

        writer.write_message("bye").await.unwrap();
        writer.shutdown().await.unwrap();

        assert_eq!(reader.read_message().await.unwrap(), "bye");
        assert!(matches!(
            reader.read_message().await,
            Err(FramingError::ConnectionClosed {
                stage: FrameStage::Length
            })
        ));
    }

    #[tokio::test]
    async fn test_oversized_length_prefix() {
        let mock = Builder::new().read(&[1, 0, 0, 0]).build();
        let mut reader = FrameReader::with_max_frame_len(mock, 1024);
        assert!(matches!(
            reader.read_message().await,
            Err(FramingError::FrameTooLarge { len: 16_777_216, max: 1024 })
        ));
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let mock = Builder::new().read(&[0, 0, 0, 2, 0xff, 0xfe]).build();
        let mut reader = FrameReader::new(mock);
        assert!(matches!(
            reader.read_message().await,
            Err(FramingError::InvalidUtf8(_))
        ));
    }

    #[tokio::test]
    async fn test_eof_stages() {
        let mut reader = FrameReader::new(Builder::new().build());
        let err = reader.read_message().await.unwrap_err();
        assert!(err.is_clean_close());

        let mut reader = FrameReader::new(Builder::new().read(&[0, 0]).build());
        assert!(matches!(
            reader.read_message().await,
            Err(FramingError::ConnectionClosed {
                stage: FrameStage::Length
            })
        ));
    }

    #[tokio::test]
    async fn test_stream_short_payload_yields_one_error_then_ends() {
        let mock = Builder::new()
            .read(&[0, 0, 0, 2, b'h', b'i'])
            .read(&[0, 0, 0, 4])
            .read(b"lo")
            .build();
        let stream = FrameReader::new(mock).into_stream(CancellationToken::new());
        tokio::pin!(stream);

        assert_eq!(stream.next().await.unwrap().unwrap(), "hi");
        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            FramingError::ConnectionClosed {
                stage: FrameStage::Payload
            }
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_ends_on_cancel() {
        let (_client, server) = tokio::io::duplex(64);
        let shutdown = CancellationToken::new();
        let stream = FrameReader::new(server).into_stream(shutdown.clone());
        tokio::pin!(stream);

        shutdown.cancel();
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_duplex_round_trip() {
        let (client, server) = tokio::io::duplex(64);
        let mut writer = FrameWriter::new(client);
        let mut reader = FrameReader::new(server);

        let messages = ["look", "", "café", "get trophy"];
        let write = async {
            for message in messages {
                writer.write_message(message).await.unwrap();
            }
        };
        let read = async {
            let mut received = Vec::new();
            for _ in 0..messages.len() {
                received.push(reader.read_message().await.unwrap());
            }
            received
        };

        let ((), received) = tokio::join!(write, read);
        assert_eq!(received, messages);
    }
}
