use std::path::Path;
use std::time::Duration;

use crate::application::error::ApplicationError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub bootstrap_server: String,
    pub client_id: Option<String>,
    pub request_timeout: Duration, // 쓰기와 읽기 단계를 합친 호출 전체 데드라인
    pub connect_timeout: Duration,
    pub max_frame_bytes: usize,    // 응답 프레임 최대 크기
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bootstrap_server: "127.0.0.1:9092".to_string(),
            client_id: Some("kafka-admin".to_string()),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_frame_bytes: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl ClientConfig {
    /// Java 스타일 `.properties` 파일에서 설정을 읽음
    pub fn from_properties(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ApplicationError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse_properties(&contents)
    }

    pub fn parse_properties(contents: &str) -> Result<Self> {
        let mut config = Self::default();

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once(['=', ':']) else {
                return Err(ApplicationError::Config(format!("expected key=value, got `{}`", line)));
            };
            let value = value.trim();

            match key.trim() {
                "bootstrap.servers" => {
                    let first = value.split(',').map(str::trim).find(|s| !s.is_empty());
                    config.bootstrap_server = first
                        .ok_or_else(|| ApplicationError::Config("bootstrap.servers is empty".to_string()))?
                        .to_string();
                }
                "client.id" => {
                    config.client_id = if value.is_empty() { None } else { Some(value.to_string()) };
                }
                "request.timeout.ms" => config.request_timeout = parse_millis(key, value)?,
                "socket.connection.setup.timeout.ms" => config.connect_timeout = parse_millis(key, value)?,
                "max.response.bytes" => {
                    config.max_frame_bytes = value.parse().map_err(|_| invalid_number(key, value))?;
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| invalid_number(key, value))
}

fn invalid_number(key: &str, value: &str) -> ApplicationError {
    ApplicationError::Config(format!("{} must be a non-negative integer, got `{}`", key.trim(), value))
}
