/// CreateTopics API의 키 값
/// Kafka 프로토콜에서 정의된 표준 API 키임
pub const CREATE_TOPICS_KEY: i16 = 19;

/// CreateTopics는 버전 2만 사용
/// v2 응답에는 throttle_time_ms와 토픽별 error_message가 포함됨
pub const CREATE_TOPICS_VERSION: i16 = 2;

/// DeleteTopics API의 키 값
pub const DELETE_TOPICS_KEY: i16 = 20;
pub const DELETE_TOPICS_VERSION: i16 = 1;

/// Partition count / replication factor left for the broker to decide.
pub const UNSET: i32 = -1;
