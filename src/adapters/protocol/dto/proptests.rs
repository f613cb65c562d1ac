use bytes::BytesMut;
use proptest::prelude::*;

use super::*;
use crate::adapters::protocol::codec::{Decode, Encode};

fn name() -> impl Strategy<Value = String> {
    "\\PC{0,24}"
}

fn config_entry() -> impl Strategy<Value = ConfigEntry> {
    (name(), name()).prop_map(|(name, value)| ConfigEntry { name, value })
}

fn replica_assignment() -> impl Strategy<Value = ReplicaAssignment> {
    (any::<i32>(), any::<i32>()).prop_map(|(partition, replica)| ReplicaAssignment { partition, replica })
}

fn topic_spec() -> impl Strategy<Value = TopicSpec> {
    (
        name(),
        any::<i32>(),
        any::<i16>(),
        prop::collection::vec(replica_assignment(), 0..4),
        prop::collection::vec(config_entry(), 0..4),
    )
        .prop_map(
            |(name, num_partitions, replication_factor, replica_assignments, config_entries)| TopicSpec {
                name,
                num_partitions,
                replication_factor,
                replica_assignments,
                config_entries,
            },
        )
}

fn create_topics_request() -> impl Strategy<Value = CreateTopicsRequest> {
    (prop::collection::vec(topic_spec(), 0..4), any::<i32>(), any::<bool>()).prop_map(
        |(topics, timeout_ms, validate_only)| CreateTopicsRequest {
            topics,
            timeout_ms,
            validate_only,
        },
    )
}

fn topic_result() -> impl Strategy<Value = TopicResult> {
    (name(), any::<i16>(), prop::option::of(name())).prop_map(|(name, error_code, error_message)| {
        TopicResult {
            name,
            error_code,
            error_message,
        }
    })
}

fn create_topics_response() -> impl Strategy<Value = CreateTopicsResponse> {
    (any::<i32>(), prop::collection::vec(topic_result(), 0..4)).prop_map(|(throttle_time_ms, topic_results)| {
        CreateTopicsResponse {
            throttle_time_ms,
            topic_results,
        }
    })
}

fn delete_topics_request() -> impl Strategy<Value = DeleteTopicsRequest> {
    (prop::collection::vec(name(), 0..4), any::<i32>())
        .prop_map(|(topic_names, timeout_ms)| DeleteTopicsRequest { topic_names, timeout_ms })
}

fn delete_topics_response() -> impl Strategy<Value = DeleteTopicsResponse> {
    (
        any::<i32>(),
        prop::collection::vec(
            (name(), any::<i16>()).prop_map(|(name, error_code)| DeletableTopicResult { name, error_code }),
            0..4,
        ),
    )
        .prop_map(|(throttle_time_ms, responses)| DeleteTopicsResponse {
            throttle_time_ms,
            responses,
        })
}

fn request_envelope() -> impl Strategy<Value = RequestEnvelope> {
    (any::<i16>(), any::<i16>(), any::<i32>(), prop::option::of(name()), 0i32..4096).prop_map(
        |(api_key, api_version, correlation_id, client_id, body_size)| {
            RequestEnvelope::new(api_key, api_version, correlation_id, client_id, body_size)
        },
    )
}

/// Encodes `value`, checks the size law, then decodes it back with the
/// encoded length as budget.
fn round_trip<T>(value: &T) -> std::result::Result<(), TestCaseError>
where
    T: Encode + Decode + PartialEq + std::fmt::Debug,
{
    let mut buf = BytesMut::new();
    value.encode(&mut buf).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(buf.len() as i32, value.size());

    let len = buf.len();
    let (decoded, remain) = T::decode(&mut buf.freeze(), len).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(remain, 0);
    prop_assert_eq!(&decoded, value);
    Ok(())
}

proptest! {
    #[test]
    fn topic_spec_round_trips(topic in topic_spec()) {
        round_trip(&topic)?;
    }

    #[test]
    fn create_topics_request_round_trips(request in create_topics_request()) {
        round_trip(&request)?;
    }

    #[test]
    fn create_topics_response_round_trips(response in create_topics_response()) {
        round_trip(&response)?;
    }

    #[test]
    fn delete_topics_request_round_trips(request in delete_topics_request()) {
        round_trip(&request)?;
    }

    #[test]
    fn delete_topics_response_round_trips(response in delete_topics_response()) {
        round_trip(&response)?;
    }

    #[test]
    fn request_envelope_round_trips(envelope in request_envelope()) {
        round_trip(&envelope)?;
    }

    #[test]
    fn first_error_is_first_nonzero_code(response in create_topics_response()) {
        let expected = response.topic_results.iter().find(|r| r.error_code != 0);
        match (response.first_error(), expected) {
            (None, None) => {}
            (Some(err), Some(result)) => {
                prop_assert_eq!(i16::from(err.code), result.error_code);
                prop_assert_eq!(&err.entity, &result.name);
                prop_assert_eq!(err.message.as_deref(), result.error_message.as_deref());
            }
            (found, expected) => prop_assert!(false, "found {:?}, expected {:?}", found, expected),
        }
    }
}
