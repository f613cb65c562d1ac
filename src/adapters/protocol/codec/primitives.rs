use bytes::{Buf, BufMut};
use crate::application::error::ApplicationError;
use crate::Result;
use super::traits::{ensure_remaining, Decode, Encode};

/// Length prefix written for an absent nullable string.
pub const NULL_LENGTH: i16 = -1;

macro_rules! fixed_width {
    ($ty:ty, $width:expr, $put:ident, $get:ident) => {
        impl Encode for $ty {
            fn size(&self) -> i32 {
                $width
            }

            fn encode<B: BufMut>(&self, dst: &mut B) -> Result<()> {
                dst.$put(*self);
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode<B: Buf>(src: &mut B, remain: usize) -> Result<(Self, usize)> {
                let remain = ensure_remaining(src, remain, $width, stringify!($ty))?;
                Ok((src.$get(), remain))
            }
        }
    };
}

// big-endian, two's complement
fixed_width!(i8, 1, put_i8, get_i8);
fixed_width!(i16, 2, put_i16, get_i16);
fixed_width!(i32, 4, put_i32, get_i32);
fixed_width!(i64, 8, put_i64, get_i64);

impl Encode for bool {
    fn size(&self) -> i32 {
        1
    }

    fn encode<B: BufMut>(&self, dst: &mut B) -> Result<()> {
        dst.put_u8(*self as u8);
        Ok(())
    }
}

impl Decode for bool {
    fn decode<B: Buf>(src: &mut B, remain: usize) -> Result<(Self, usize)> {
        let remain = ensure_remaining(src, remain, 1, "bool")?;
        match src.get_u8() {
            0 => Ok((false, remain)),
            1 => Ok((true, remain)),
            other => Err(ApplicationError::Framing(format!(
                "invalid boolean byte: {}",
                other
            ))),
        }
    }
}

fn string_length(s: &str) -> Result<i16> {
    i16::try_from(s.len()).map_err(|_| {
        ApplicationError::EncodingInvariant(format!(
            "string of {} bytes does not fit an int16 length prefix",
            s.len()
        ))
    })
}

fn decode_string_body<B: Buf>(src: &mut B, remain: usize, len: usize) -> Result<(String, usize)> {
    let remain = ensure_remaining(src, remain, len, "string body")?;
    let bytes = src.copy_to_bytes(len);
    let s = String::from_utf8(bytes.to_vec())
        .map_err(|e| ApplicationError::Framing(format!("invalid UTF-8 sequence: {}", e)))?;
    Ok((s, remain))
}

/// STRING: int16 byte length, then the bytes.
/// A negative length is read back as the empty string.
impl Encode for String {
    fn size(&self) -> i32 {
        // saturates so oversized strings reach the encode-time check
        i32::try_from(self.len()).unwrap_or(i32::MAX).saturating_add(2)
    }

    fn encode<B: BufMut>(&self, dst: &mut B) -> Result<()> {
        dst.put_i16(string_length(self)?);
        dst.put_slice(self.as_bytes());
        Ok(())
    }
}

impl Decode for String {
    fn decode<B: Buf>(src: &mut B, remain: usize) -> Result<(Self, usize)> {
        let (len, remain) = i16::decode(src, remain)?;
        if len < 0 {
            return Ok((String::new(), remain));
        }
        decode_string_body(src, remain, len as usize)
    }
}

/// NULLABLE_STRING: `None` is written as length -1.
impl Encode for Option<String> {
    fn size(&self) -> i32 {
        match self {
            Some(s) => s.size(),
            None => 2,
        }
    }

    fn encode<B: BufMut>(&self, dst: &mut B) -> Result<()> {
        match self {
            Some(s) => s.encode(dst),
            None => {
                dst.put_i16(NULL_LENGTH);
                Ok(())
            }
        }
    }
}

impl Decode for Option<String> {
    fn decode<B: Buf>(src: &mut B, remain: usize) -> Result<(Self, usize)> {
        let (len, remain) = i16::decode(src, remain)?;
        if len < 0 {
            return Ok((None, remain));
        }
        let (s, remain) = decode_string_body(src, remain, len as usize)?;
        Ok((Some(s), remain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{Bytes, BytesMut};

    fn encoded<T: Encode>(value: &T) -> Bytes {
        let mut buf = BytesMut::new();
        value.encode(&mut buf).unwrap();
        assert_eq!(buf.len() as i32, value.size());
        buf.freeze()
    }

    #[test]
    fn test_integers_are_big_endian() {
        assert_eq!(&encoded(&0x0102i16)[..], &[0x01, 0x02]);
        assert_eq!(&encoded(&-2i32)[..], &[0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(&encoded(&1i64)[..], &[0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_decode_consumes_budget() {
        let mut buf = encoded(&1000i32);
        let (value, remain) = i32::decode(&mut buf, 10).unwrap();
        assert_eq!(value, 1000);
        assert_eq!(remain, 6);
    }

    #[test]
    fn test_decode_fails_when_budget_is_short() {
        let mut buf = encoded(&7i32);
        let err = i32::decode(&mut buf, 3).unwrap_err();
        assert!(matches!(err, ApplicationError::Framing(_)));
    }

    #[test]
    fn test_decode_fails_when_buffer_is_short() {
        let mut buf = Bytes::from_static(&[0x00, 0x01]);
        let err = i32::decode(&mut buf, 4).unwrap_err();
        assert!(matches!(err, ApplicationError::Framing(_)));
    }

    #[test]
    fn test_bool_encoding() {
        assert_eq!(&encoded(&true)[..], &[1]);
        assert_eq!(&encoded(&false)[..], &[0]);

        let mut bad = Bytes::from_static(&[2]);
        assert!(bool::decode(&mut bad, 1).is_err());
    }

    #[test]
    fn test_string_length_prefix_counts_bytes() {
        let s = "héllo".to_string();
        let buf = encoded(&s);
        assert_eq!(&buf[..2], &[0x00, 0x06]);
        assert_eq!(s.size(), 8);

        let mut src = buf.clone();
        let (decoded, remain) = String::decode(&mut src, buf.len()).unwrap();
        assert_eq!(decoded, s);
        assert_eq!(remain, 0);
    }

    #[test]
    fn test_negative_string_length_reads_as_empty() {
        let mut src = Bytes::from_static(&[0xff, 0xff]);
        let (decoded, remain) = String::decode(&mut src, 2).unwrap();
        assert_eq!(decoded, "");
        assert_eq!(remain, 0);
    }

    #[test]
    fn test_nullable_string() {
        let none: Option<String> = None;
        assert_eq!(&encoded(&none)[..], &[0xff, 0xff]);

        let mut src = Bytes::from_static(&[0xff, 0xff]);
        assert_eq!(Option::<String>::decode(&mut src, 2).unwrap(), (None, 0));

        let some = Some("id".to_string());
        let mut src = encoded(&some);
        assert_eq!(Option::<String>::decode(&mut src, 4).unwrap(), (some, 0));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut src = Bytes::from_static(&[0x00, 0x02, 0xc3, 0x28]);
        let err = String::decode(&mut src, 4).unwrap_err();
        assert!(matches!(err, ApplicationError::Framing(_)));
    }

    #[test]
    fn test_oversized_string_is_an_encoding_defect() {
        let s = "x".repeat(i16::MAX as usize + 1);
        let mut buf = BytesMut::new();
        let err = s.encode(&mut buf).unwrap_err();
        assert!(matches!(err, ApplicationError::EncodingInvariant(_)));
    }

    #[test]
    fn test_oversized_string_size_is_not_truncated() {
        let s = "x".repeat(u16::MAX as usize + 10);
        assert_eq!(s.size(), u16::MAX as i32 + 12);
    }
}
