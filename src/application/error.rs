use crate::application::transaction::CallState;
use crate::domain::error::ErrorCode;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 선언된 프레임 크기와 실제로 소비한 바이트 수가 맞지 않음
    #[error("Framing error: {0}")]
    Framing(String),
    #[error("IO error: {0}")]
    Transport(#[from] std::io::Error),
    #[error("Timed out while {stage} (deadline {after:?})")]
    Timeout { stage: CallState, after: Duration },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// 계산한 크기와 실제로 쓴 바이트 수가 다름. 복구 대상이 아닌 버그임
    #[error("Encoding invariant violated: {0}")]
    EncodingInvariant(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApplicationError {
    /// Raised while writing or reading a frame, these leave the stream position
    /// unknown and the connection must not be reused. A `Framing` error here is a
    /// bad declared size; decode errors after a complete frame are not routed here.
    pub fn breaks_connection(&self) -> bool {
        matches!(
            self,
            ApplicationError::Transport(_)
                | ApplicationError::Timeout { .. }
                | ApplicationError::Framing(_)
        )
    }
}

/// 응답 안의 엔티티별 에러 코드를 타입으로 올린 것
#[derive(Debug, Clone, PartialEq, Error)]
#[error("broker returned {code} for `{entity}`{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
pub struct ProtocolError {
    pub code: ErrorCode,
    pub entity: String,
    pub message: Option<String>,
}

/// Failure of a single call. `response` is only populated for protocol errors,
/// where the decoded body is still meaningful.
pub struct CallError<T> {
    pub response: Option<T>,
    pub error: ApplicationError,
}

impl<T> CallError<T> {
    pub fn protocol(response: T, error: ProtocolError) -> Self {
        Self {
            response: Some(response),
            error: ApplicationError::Protocol(error),
        }
    }

    pub fn protocol_error(&self) -> Option<&ProtocolError> {
        match &self.error {
            ApplicationError::Protocol(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<ApplicationError> for CallError<T> {
    fn from(error: ApplicationError) -> Self {
        Self {
            response: None,
            error,
        }
    }
}

impl<T> fmt::Debug for CallError<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallError")
            .field("response", &self.response)
            .field("error", &self.error)
            .finish()
    }
}

impl<T> fmt::Display for CallError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T> std::error::Error for CallError<T>
where
    T: fmt::Debug,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}

pub type Result<T> = std::result::Result<T, ApplicationError>;

pub type CallResult<T> = std::result::Result<T, CallError<T>>;
