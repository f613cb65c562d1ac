use bytes::{Buf, BufMut};
use crate::application::error::ApplicationError;
use crate::Result;
use super::traits::{Decode, Encode};

/// ARRAY: int32 element count followed by each element in order.
impl<T: Encode> Encode for Vec<T> {
    fn size(&self) -> i32 {
        self.iter().map(T::size).fold(4i32, i32::saturating_add)
    }

    fn encode<B: BufMut>(&self, dst: &mut B) -> Result<()> {
        let count = i32::try_from(self.len()).map_err(|_| {
            ApplicationError::EncodingInvariant(format!(
                "array of {} elements does not fit an int32 count",
                self.len()
            ))
        })?;
        dst.put_i32(count);
        for item in self {
            item.encode(dst)?;
        }
        Ok(())
    }
}

/// 음수 카운트는 null 배열이므로 빈 Vec으로 읽음
impl<T: Decode> Decode for Vec<T> {
    fn decode<B: Buf>(src: &mut B, remain: usize) -> Result<(Self, usize)> {
        let (count, mut remain) = i32::decode(src, remain)?;
        if count < 0 {
            return Ok((Vec::new(), remain));
        }

        // every element takes at least one byte
        let mut items = Vec::with_capacity((count as usize).min(remain));
        for read in 0..count {
            if remain == 0 {
                return Err(ApplicationError::Framing(format!(
                    "array declares {} elements but the frame ran out after {}",
                    count, read
                )));
            }
            let (item, left) = T::decode(src, remain)?;
            items.push(item);
            remain = left;
        }

        Ok((items, remain))
    }
}
