use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::adapters::outgoing::broker_connection::BrokerConnection;
use crate::adapters::protocol::dto::{
    ApiRequest, CreateTopicsRequest, CreateTopicsResponse, DeleteTopicsRequest, DeleteTopicsResponse,
};
use crate::application::error::CallResult;
use crate::application::transaction::round_trip;
use crate::config::ClientConfig;
use crate::ports::incoming::topic_admin::TopicAdmin;
use crate::ports::outgoing::connection::Connection;
use crate::Result;

/// 토픽 관리용 클라이언트
///
/// The connection sits behind a mutex, so calls on one client are serialized
/// and never interleave on the wire.
pub struct AdminClient<C> {
    connection: Mutex<C>,
    config: ClientConfig,
}

impl AdminClient<BrokerConnection<TcpStream>> {
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let connection = BrokerConnection::connect(&config).await?;
        Ok(Self::new(connection, config))
    }
}

impl<C: Connection> AdminClient<C> {
    pub fn new(connection: C, config: ClientConfig) -> Self {
        Self {
            connection: Mutex::new(connection),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn call<R: ApiRequest>(&self, request: &R) -> CallResult<R::Response> {
        let mut connection = self.connection.lock().await;
        round_trip(&mut *connection, request, self.config.request_timeout).await
    }
}

#[async_trait]
impl<C: Connection> TopicAdmin for AdminClient<C> {
    async fn create_topics(&self, request: CreateTopicsRequest) -> CallResult<CreateTopicsResponse> {
        debug!(
            topics = request.topics.len(),
            validate_only = request.validate_only,
            "creating topics"
        );
        let response = self.call(&request).await?;
        if response.throttle_time_ms > 0 {
            warn!(throttle_time_ms = response.throttle_time_ms, "broker throttled create topics");
        }
        Ok(response)
    }

    async fn delete_topics(&self, request: DeleteTopicsRequest) -> CallResult<DeleteTopicsResponse> {
        debug!(topics = request.topic_names.len(), "deleting topics");
        let response = self.call(&request).await?;
        if response.throttle_time_ms > 0 {
            warn!(throttle_time_ms = response.throttle_time_ms, "broker throttled delete topics");
        }
        Ok(response)
    }
}
