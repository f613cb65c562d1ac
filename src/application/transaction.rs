use bytes::{Bytes, BytesMut};
use std::fmt;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use crate::adapters::protocol::codec::{Decode, Encode};
use crate::adapters::protocol::dto::{ApiRequest, EntityErrors, RequestEnvelope, ResponseHeader};
use crate::application::error::{ApplicationError, CallError, CallResult};
use crate::ports::outgoing::connection::Connection;
use crate::Result;

/// 호출 하나의 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Sending,
    AwaitingResponse,
    Completed,
    Failed,
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallState::Idle => "idle",
            CallState::Sending => "sending",
            CallState::AwaitingResponse => "awaiting response",
            CallState::Completed => "completed",
            CallState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs one write-then-read exchange on `conn`.
///
/// The caller must hold exclusive access to the connection for the whole
/// call; responses are not demultiplexed by correlation id. `timeout` is a
/// single deadline covering both the write and the read stage.
///
/// On a non-zero per-entity error code the first one in response order is
/// returned together with the decoded response.
pub async fn round_trip<C, R>(conn: &mut C, request: &R, timeout: Duration) -> CallResult<R::Response>
where
    C: Connection + ?Sized,
    R: ApiRequest,
{
    let deadline = Instant::now() + timeout;
    let correlation_id = conn.next_correlation_id();
    debug!(
        api_key = R::API_KEY,
        api_version = R::API_VERSION,
        correlation_id,
        state = %CallState::Idle,
        "starting call"
    );

    let frame = encode_frame(conn.client_id(), correlation_id, request)?;

    debug!(correlation_id, bytes = frame.len(), state = %CallState::Sending, "writing request");
    let written = match timeout_at(deadline, conn.write_frame(&frame)).await {
        Ok(result) => result,
        Err(_) => Err(ApplicationError::Timeout {
            stage: CallState::Sending,
            after: timeout,
        }),
    };
    if let Err(error) = written {
        return Err(fail(conn, correlation_id, error));
    }

    debug!(correlation_id, state = %CallState::AwaitingResponse, "waiting for response");
    let received = match timeout_at(deadline, conn.read_frame()).await {
        Ok(result) => result,
        Err(_) => Err(ApplicationError::Timeout {
            stage: CallState::AwaitingResponse,
            after: timeout,
        }),
    };
    let frame = match received {
        Ok(frame) => frame,
        Err(error) => return Err(fail(conn, correlation_id, error)),
    };

    // the whole declared frame was consumed, so the stream stays on a frame boundary
    let response = match decode_frame::<R::Response>(frame, correlation_id) {
        Ok(response) => response,
        Err(error) => {
            debug!(correlation_id, state = %CallState::Failed, %error, "response did not decode");
            return Err(CallError::from(error));
        }
    };

    debug!(correlation_id, state = %CallState::Completed, "response decoded");
    match response.first_error() {
        Some(error) => {
            debug!(correlation_id, code = %error.code, entity = %error.entity, "broker reported an error");
            Err(CallError::protocol(response, error))
        }
        None => Ok(response),
    }
}

fn fail<C, T>(conn: &mut C, correlation_id: i32, error: ApplicationError) -> CallError<T>
where
    C: Connection + ?Sized,
{
    if error.breaks_connection() {
        conn.mark_broken();
    }
    debug!(correlation_id, state = %CallState::Failed, %error, "call failed");
    CallError::from(error)
}

const MAX_PREALLOCATED_FRAME: usize = 64 * 1024;

/// 헤더와 본문을 하나의 버퍼에 쓰고, 계산한 크기와 실제 바이트 수가 같은지 확인
pub fn encode_frame<R: ApiRequest>(client_id: Option<&str>, correlation_id: i32, request: &R) -> Result<Bytes> {
    let envelope = RequestEnvelope::new(
        R::API_KEY,
        R::API_VERSION,
        correlation_id,
        client_id.map(str::to_string),
        request.size(),
    );

    let expected = usize::try_from(envelope.message_size)
        .ok()
        .and_then(|size| size.checked_add(4))
        .ok_or_else(|| {
            ApplicationError::EncodingInvariant(format!(
                "api key {} computed a message size of {}",
                R::API_KEY,
                envelope.message_size
            ))
        })?;
    let mut buf = BytesMut::with_capacity(expected.min(MAX_PREALLOCATED_FRAME));
    envelope.encode(&mut buf)?;
    request.encode(&mut buf)?;

    if buf.len() != expected {
        return Err(ApplicationError::EncodingInvariant(format!(
            "api key {} computed {} bytes but wrote {}",
            R::API_KEY,
            expected,
            buf.len()
        )));
    }
    Ok(buf.freeze())
}

/// 응답 헤더와 본문을 읽고, 프레임을 정확히 다 소비했는지 확인
pub fn decode_frame<T: Decode>(mut frame: Bytes, correlation_id: i32) -> Result<T> {
    let size = frame.len();
    let (header, remain) = ResponseHeader::decode(&mut frame, size)?;
    if header.correlation_id != correlation_id {
        warn!(
            expected = correlation_id,
            received = header.correlation_id,
            "correlation id mismatch"
        );
    }

    let (response, remain) = T::decode(&mut frame, remain)?;
    if remain != 0 {
        return Err(ApplicationError::Framing(format!(
            "{} of {} response bytes left after decoding",
            remain, size
        )));
    }
    Ok(response)
}
