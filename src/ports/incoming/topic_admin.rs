use async_trait::async_trait;
use crate::adapters::protocol::dto::{
    CreateTopicsRequest, CreateTopicsResponse, DeleteTopicsRequest, DeleteTopicsResponse,
};
use crate::application::error::CallResult;

#[async_trait]
pub trait TopicAdmin: Send + Sync {
    async fn create_topics(&self, request: CreateTopicsRequest) -> CallResult<CreateTopicsResponse>;
    async fn delete_topics(&self, request: DeleteTopicsRequest) -> CallResult<DeleteTopicsResponse>;
}
