use crate::adapters::protocol::codec::{Decode, Encode};
use crate::application::error::ProtocolError;
use crate::domain::error::ErrorCode;

/// 한 번의 요청/응답 호출을 정의하는 trait
pub trait ApiRequest: Encode + Send + Sync {
    const API_KEY: i16;
    const API_VERSION: i16;
    type Response: Decode + EntityErrors + Send;
}

/// One per-entity status embedded in a response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityStatus<'a> {
    pub entity: &'a str,
    pub error_code: i16,
    pub error_message: Option<&'a str>,
}

/// Responses that report a status per requested resource.
pub trait EntityErrors {
    /// Statuses in response order.
    fn statuses(&self) -> Vec<EntityStatus<'_>>;

    /// 응답 순서대로 훑어서 처음 나온 0이 아닌 코드를 에러로 돌려줌
    fn first_error(&self) -> Option<ProtocolError> {
        self.statuses()
            .into_iter()
            .find(|status| status.error_code != 0)
            .map(|status| ProtocolError {
                code: ErrorCode::from(status.error_code),
                entity: status.entity.to_string(),
                message: status.error_message.map(str::to_string),
            })
    }
}
