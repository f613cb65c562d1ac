use crate::adapters::protocol::codec::wire_fields;
use crate::adapters::protocol::constants::{DELETE_TOPICS_KEY, DELETE_TOPICS_VERSION};
use super::api::{ApiRequest, EntityErrors, EntityStatus};

/// See http://kafka.apache.org/protocol.html#The_Messages_DeleteTopics
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTopicsRequest {
    pub topic_names: Vec<String>,
    pub timeout_ms: i32,
}

wire_fields!(DeleteTopicsRequest {
    topic_names: Vec<String>,
    timeout_ms: i32,
});

impl ApiRequest for DeleteTopicsRequest {
    const API_KEY: i16 = DELETE_TOPICS_KEY;
    const API_VERSION: i16 = DELETE_TOPICS_VERSION;
    type Response = DeleteTopicsResponse;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletableTopicResult {
    pub name: String,
    pub error_code: i16,
}

wire_fields!(DeletableTopicResult {
    name: String,
    error_code: i16,
});

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTopicsResponse {
    pub throttle_time_ms: i32,
    pub responses: Vec<DeletableTopicResult>,
}

wire_fields!(DeleteTopicsResponse {
    throttle_time_ms: i32,
    responses: Vec<DeletableTopicResult>,
});

impl EntityErrors for DeleteTopicsResponse {
    fn statuses(&self) -> Vec<EntityStatus<'_>> {
        self.responses
            .iter()
            .map(|result| EntityStatus {
                entity: &result.name,
                error_code: result.error_code,
                error_message: None,
            })
            .collect()
    }
}
