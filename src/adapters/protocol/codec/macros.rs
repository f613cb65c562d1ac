/// 메시지의 와이어 필드 순서를 명시적으로 선언하고 `Encode`/`Decode`를 만들어 줌
///
/// The list is the wire contract: fields are sized, written and read in
/// exactly the order given here, independent of the struct declaration.
///
/// ```ignore
/// wire_fields!(ConfigEntry {
///     name: String,
///     value: String,
/// });
/// ```
macro_rules! wire_fields {
    ($ty:ident { $($field:ident : $fty:ty),+ $(,)? }) => {
        impl $crate::adapters::protocol::codec::Encode for $ty {
            fn size(&self) -> i32 {
                0 $(+ <$fty as $crate::adapters::protocol::codec::Encode>::size(&self.$field))+
            }

            fn encode<B: ::bytes::BufMut>(&self, dst: &mut B) -> $crate::Result<()> {
                $(<$fty as $crate::adapters::protocol::codec::Encode>::encode(&self.$field, dst)?;)+
                Ok(())
            }
        }

        impl $crate::adapters::protocol::codec::Decode for $ty {
            fn decode<B: ::bytes::Buf>(src: &mut B, remain: usize) -> $crate::Result<(Self, usize)> {
                $(let ($field, remain) =
                    <$fty as $crate::adapters::protocol::codec::Decode>::decode(src, remain)?;)+
                Ok((Self { $($field),+ }, remain))
            }
        }
    };
}

pub(crate) use wire_fields;
