use crate::adapters::protocol::codec::wire_fields;
use crate::adapters::protocol::constants::{CREATE_TOPICS_KEY, CREATE_TOPICS_VERSION, UNSET};
use super::api::{ApiRequest, EntityErrors, EntityStatus};

/// 토픽 단위 설정 오버라이드
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
}

wire_fields!(ConfigEntry {
    name: String,
    value: String,
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicaAssignment {
    pub partition: i32,
    pub replica: i32,
}

wire_fields!(ReplicaAssignment {
    partition: i32,
    replica: i32,
});

/// 생성할 토픽 하나
///
/// When `replica_assignments` is non-empty the broker expects both
/// `num_partitions` and `replication_factor` to be -1. The encoder does not
/// check this; use [`TopicSpec::with_assignments`] to get it right.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSpec {
    pub name: String,
    pub num_partitions: i32,
    pub replication_factor: i16,
    pub replica_assignments: Vec<ReplicaAssignment>,
    pub config_entries: Vec<ConfigEntry>,
}

wire_fields!(TopicSpec {
    name: String,
    num_partitions: i32,
    replication_factor: i16,
    replica_assignments: Vec<ReplicaAssignment>,
    config_entries: Vec<ConfigEntry>,
});

impl TopicSpec {
    pub fn with_partitions(name: impl Into<String>, num_partitions: i32, replication_factor: i16) -> Self {
        Self {
            name: name.into(),
            num_partitions,
            replication_factor,
            replica_assignments: Vec::new(),
            config_entries: Vec::new(),
        }
    }

    /// Partition and replication count are left unset (-1).
    pub fn with_assignments(name: impl Into<String>, replica_assignments: Vec<ReplicaAssignment>) -> Self {
        Self {
            name: name.into(),
            num_partitions: UNSET,
            replication_factor: UNSET as i16,
            replica_assignments,
            config_entries: Vec::new(),
        }
    }

    pub fn config(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_entries.push(ConfigEntry {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// See http://kafka.apache.org/protocol.html#The_Messages_CreateTopics
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTopicsRequest {
    /// 같은 이름의 토픽이 두 번 들어가면 브로커가 INVALID_REQUEST로 거절함
    pub topics: Vec<TopicSpec>,
    /// <= 0 이면 브로커가 생성을 시작만 하고 바로 응답함
    pub timeout_ms: i32,
    pub validate_only: bool,
}

wire_fields!(CreateTopicsRequest {
    topics: Vec<TopicSpec>,
    timeout_ms: i32,
    validate_only: bool,
});

impl ApiRequest for CreateTopicsRequest {
    const API_KEY: i16 = CREATE_TOPICS_KEY;
    const API_VERSION: i16 = CREATE_TOPICS_VERSION;
    type Response = CreateTopicsResponse;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicResult {
    pub name: String,
    pub error_code: i16,
    pub error_message: Option<String>,
}

wire_fields!(TopicResult {
    name: String,
    error_code: i16,
    error_message: Option<String>,
});

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTopicsResponse {
    pub throttle_time_ms: i32,
    /// 요청과 같은 순서로 옴
    pub topic_results: Vec<TopicResult>,
}

wire_fields!(CreateTopicsResponse {
    throttle_time_ms: i32,
    topic_results: Vec<TopicResult>,
});

impl EntityErrors for CreateTopicsResponse {
    fn statuses(&self) -> Vec<EntityStatus<'_>> {
        self.topic_results
            .iter()
            .map(|result| EntityStatus {
                entity: &result.name,
                error_code: result.error_code,
                error_message: result.error_message.as_deref(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::protocol::codec::{Decode, Encode};
    use crate::domain::error::ErrorCode;
    use bytes::BytesMut;

    fn encode<T: Encode>(value: &T) -> BytesMut {
        let mut buf = BytesMut::new();
        value.encode(&mut buf).unwrap();
        buf
    }

    fn sample_response() -> CreateTopicsResponse {
        CreateTopicsResponse {
            throttle_time_ms: 1,
            topic_results: vec![TopicResult {
                name: "topic".to_string(),
                error_code: 2,
                error_message: Some("topic error".to_string()),
            }],
        }
    }

    #[test]
    fn test_response_round_trip_leaves_no_budget() {
        let item = sample_response();
        let buf = encode(&item);
        let len = buf.len();

        let (found, remain) = CreateTopicsResponse::decode(&mut buf.freeze(), len).unwrap();
        assert_eq!(remain, 0);
        assert_eq!(found, item);
    }

    #[test]
    fn test_request_size_matches_written_bytes() {
        let requests = vec![
            CreateTopicsRequest {
                topics: vec![],
                timeout_ms: 0,
                validate_only: true,
            },
            CreateTopicsRequest {
                topics: vec![TopicSpec::with_partitions("a", 3, 1)],
                timeout_ms: 1000,
                validate_only: false,
            },
            CreateTopicsRequest {
                topics: vec![
                    TopicSpec::with_assignments(
                        "assigned",
                        vec![
                            ReplicaAssignment { partition: 0, replica: 1 },
                            ReplicaAssignment { partition: 1, replica: 2 },
                        ],
                    )
                    .config("cleanup.policy", "compact")
                    .config("retention.ms", "-1"),
                    TopicSpec::with_partitions("plain", 1, 1),
                ],
                timeout_ms: 500,
                validate_only: false,
            },
        ];

        for request in requests {
            assert_eq!(encode(&request).len() as i32, request.size());
        }
    }

    #[test]
    fn test_topic_wire_order() {
        let topic = TopicSpec::with_partitions("t", 2, 3).config("k", "v");
        let buf = encode(&topic);
        assert_eq!(
            &buf[..],
            &[
                0x00, 0x01, b't', // name
                0x00, 0x00, 0x00, 0x02, // num partitions
                0x00, 0x03, // replication factor
                0x00, 0x00, 0x00, 0x00, // assignments
                0x00, 0x00, 0x00, 0x01, // configs
                0x00, 0x01, b'k', 0x00, 0x01, b'v',
            ]
        );
    }

    #[test]
    fn test_with_assignments_leaves_counts_unset() {
        let topic = TopicSpec::with_assignments("t", vec![ReplicaAssignment { partition: 0, replica: 1 }]);
        assert_eq!(topic.num_partitions, -1);
        assert_eq!(topic.replication_factor, -1);
    }

    #[test]
    fn test_config_entries_keep_insertion_order() {
        let topic = TopicSpec::with_partitions("t", 1, 1)
            .config("z", "1")
            .config("a", "2");
        let names: Vec<_> = topic.config_entries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_first_error_wins() {
        let response = CreateTopicsResponse {
            throttle_time_ms: 0,
            topic_results: vec![
                TopicResult { name: "ok".to_string(), error_code: 0, error_message: None },
                TopicResult { name: "three".to_string(), error_code: 3, error_message: None },
                TopicResult { name: "five".to_string(), error_code: 5, error_message: None },
            ],
        };

        let err = response.first_error().unwrap();
        assert_eq!(err.code, ErrorCode::UnknownTopicOrPartition);
        assert_eq!(err.entity, "three");
    }

    #[test]
    fn test_all_zero_codes_is_success() {
        let response = CreateTopicsResponse {
            throttle_time_ms: 0,
            topic_results: vec![TopicResult { name: "ok".to_string(), error_code: 0, error_message: None }],
        };
        assert!(response.first_error().is_none());
    }

    #[test]
    fn test_truncated_response_is_framing_error() {
        let buf = encode(&sample_response());
        let short = buf.len() - 3;
        let err = CreateTopicsResponse::decode(&mut buf.freeze(), short).unwrap_err();
        assert!(matches!(err, crate::ApplicationError::Framing(_)));
    }
}
