use crate::adapters::protocol::codec::{wire_fields, Encode};

/// 모든 요청 앞에 붙는 헤더 (request header v1)
///
/// `message_size` counts everything after itself: the rest of the header
/// plus the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub message_size: i32,
    pub api_key: i16,
    pub api_version: i16,
    pub correlation_id: i32,
    pub client_id: Option<String>,
}

wire_fields!(RequestEnvelope {
    message_size: i32,
    api_key: i16,
    api_version: i16,
    correlation_id: i32,
    client_id: Option<String>,
});

impl RequestEnvelope {
    pub fn new(
        api_key: i16,
        api_version: i16,
        correlation_id: i32,
        client_id: Option<String>,
        body_size: i32,
    ) -> Self {
        let mut envelope = Self {
            message_size: 0,
            api_key,
            api_version,
            correlation_id,
            client_id,
        };
        // the length field does not count itself
        envelope.message_size = envelope.size().saturating_sub(4).saturating_add(body_size);
        envelope
    }
}

/// 응답 헤더 (response header v0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseHeader {
    pub correlation_id: i32,
}

wire_fields!(ResponseHeader {
    correlation_id: i32,
});
