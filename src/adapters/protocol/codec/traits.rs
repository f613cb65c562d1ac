use bytes::{Buf, BufMut};
use crate::application::error::ApplicationError;
use crate::Result;

/// 남은 예산(remain)과 버퍼에 `required` 바이트가 있는지 확인하고 줄어든 예산을 돌려줌
pub fn ensure_remaining<B: Buf>(buf: &B, remain: usize, required: usize, what: &str) -> Result<usize> {
    if remain < required {
        return Err(ApplicationError::Framing(format!(
            "{} needs {} bytes but only {} remain in the frame",
            what, required, remain
        )));
    }
    if buf.remaining() < required {
        return Err(ApplicationError::Framing(format!(
            "{} needs {} bytes but the buffer holds {}",
            what,
            required,
            buf.remaining()
        )));
    }
    Ok(remain - required)
}

/// 와이어 포맷으로 직렬화하는 trait
///
/// `size` must equal the number of bytes `encode` writes.
pub trait Encode {
    fn size(&self) -> i32;
    fn encode<B: BufMut>(&self, dst: &mut B) -> Result<()>;
}

/// 와이어 포맷에서 역직렬화하는 trait
///
/// `remain` is the byte budget left in the enclosing frame. Implementations
/// consume exactly their own bytes and return the reduced budget.
pub trait Decode: Sized {
    fn decode<B: Buf>(src: &mut B, remain: usize) -> Result<(Self, usize)>;
}
