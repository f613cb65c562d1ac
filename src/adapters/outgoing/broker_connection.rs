use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tracing::{info, trace};

use crate::application::error::ApplicationError;
use crate::config::ClientConfig;
use crate::ports::outgoing::connection::Connection;
use crate::Result;

/// 버퍼링된 스트림 위에서 프레임 단위로 읽고 쓰는 브로커 연결
pub struct BrokerConnection<S> {
    stream: BufStream<S>,
    client_id: Option<String>,
    correlation_id: i32,
    max_frame_bytes: usize,
    broken: bool,
}

impl BrokerConnection<TcpStream> {
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let addr = config.bootstrap_server.as_str();
        let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("connecting to {} took longer than {:?}", addr, config.connect_timeout),
                )
            })??;
        stream.set_nodelay(true)?;

        info!(broker = addr, "connected to broker");
        Ok(Self::new(stream, config))
    }
}

impl<S> BrokerConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S, config: &ClientConfig) -> Self {
        Self {
            stream: BufStream::new(stream),
            client_id: config.client_id.clone(),
            correlation_id: 0,
            max_frame_bytes: config.max_frame_bytes,
            broken: false,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.broken {
            return Err(ApplicationError::Transport(io::Error::new(
                io::ErrorKind::NotConnected,
                "connection was abandoned mid-frame and must be re-established",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<S> Connection for BrokerConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    fn next_correlation_id(&mut self) -> i32 {
        self.correlation_id = self.correlation_id.wrapping_add(1);
        self.correlation_id
    }

    async fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.ensure_usable()?;
        trace!(bytes = frame.len(), frame = %hex::encode(frame), "writing frame");

        self.stream.write_all(frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn read_frame(&mut self) -> Result<Bytes> {
        self.ensure_usable()?;

        // 1. 응답 크기 읽기
        let size = self.stream.read_i32().await?;
        if size < 0 || size as usize > self.max_frame_bytes {
            return Err(ApplicationError::Framing(format!(
                "declared response size {} outside 0..={}",
                size, self.max_frame_bytes
            )));
        }

        // 2. 응답 데이터 읽기
        let mut body = vec![0u8; size as usize];
        self.stream.read_exact(&mut body).await?;
        trace!(bytes = body.len(), frame = %hex::encode(&body), "read frame");

        Ok(Bytes::from(body))
    }

    fn mark_broken(&mut self) {
        self.broken = true;
    }
}
