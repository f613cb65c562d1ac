use async_trait::async_trait;
use bytes::Bytes;
use crate::Result;

/// 브로커와의 연결 하나. 한 번에 한 호출만 사용해야 함
///
/// Frames are the wire unit: an int32 size followed by exactly that many
/// bytes. Implementations own the buffered reader/writer.
#[async_trait]
pub trait Connection: Send {
    fn client_id(&self) -> Option<&str>;

    fn next_correlation_id(&mut self) -> i32;

    /// Buffers the whole frame (size prefix included) and flushes once.
    async fn write_frame(&mut self, frame: &[u8]) -> Result<()>;

    /// Reads the size prefix, then exactly that many bytes.
    async fn read_frame(&mut self) -> Result<Bytes>;

    /// Called when a stage was aborted mid-frame; later frames must be refused.
    fn mark_broken(&mut self);
}
