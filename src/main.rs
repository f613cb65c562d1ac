use anyhow::Context;
use clap::{Parser, Subcommand};
use kafka_admin_client::adapters::protocol::constants::UNSET;
use kafka_admin_client::adapters::protocol::dto::{CreateTopicsRequest, DeleteTopicsRequest, TopicSpec};
use kafka_admin_client::{AdminClient, CallError, ClientConfig, TopicAdmin};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Topic administration against a single Kafka broker.
#[derive(Parser, Debug)]
#[command(name = "kafka-admin", about = "Create and delete Kafka topics", long_about = None)]
struct Cli {
    /// Client properties file (bootstrap.servers, client.id, ...).
    properties: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Create one topic.
    Create {
        topic: String,

        /// Partition count; the broker default when omitted.
        partitions: Option<i32>,

        /// Replication factor; the broker default when omitted.
        replication: Option<i16>,
    },

    /// Delete one or more topics.
    Delete {
        #[arg(required = true)]
        topics: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_properties(&cli.properties)
        .with_context(|| format!("loading {}", cli.properties.display()))?;
    let timeout_ms = i32::try_from(config.request_timeout.as_millis()).unwrap_or(i32::MAX);
    let admin: Arc<dyn TopicAdmin> = Arc::new(
        AdminClient::connect(config.clone())
            .await
            .with_context(|| format!("connecting to {}", config.bootstrap_server))?,
    );

    match cli.command {
        Command::Create { topic, partitions, replication } => {
            let request = CreateTopicsRequest {
                topics: vec![TopicSpec::with_partitions(
                    topic,
                    partitions.unwrap_or(UNSET),
                    replication.unwrap_or(UNSET as i16),
                )],
                timeout_ms,
                validate_only: false,
            };

            match admin.create_topics(request).await {
                Ok(response) => {
                    for result in &response.topic_results {
                        println!("{}: created", result.name);
                    }
                }
                Err(err) => return Err(report(err, |r| {
                    r.topic_results
                        .iter()
                        .map(|t| (t.name.clone(), t.error_code, t.error_message.clone()))
                        .collect()
                })),
            }
        }
        Command::Delete { topics } => {
            let request = DeleteTopicsRequest {
                topic_names: topics,
                timeout_ms,
            };

            match admin.delete_topics(request).await {
                Ok(response) => {
                    for result in &response.responses {
                        println!("{}: deleted", result.name);
                    }
                }
                Err(err) => return Err(report(err, |r| {
                    r.responses
                        .iter()
                        .map(|t| (t.name.clone(), t.error_code, None))
                        .collect()
                })),
            }
        }
    }

    Ok(())
}

/// Prints every per-topic status from a partially failed call, then hands back the error.
fn report<T, F>(err: CallError<T>, rows: F) -> anyhow::Error
where
    F: Fn(&T) -> Vec<(String, i16, Option<String>)>,
{
    if let Some(response) = &err.response {
        for (name, code, message) in rows(response) {
            let code = kafka_admin_client::ErrorCode::from(code);
            match message {
                Some(message) => println!("{}: {} {}", name, code, message),
                None => println!("{}: {}", name, code),
            }
        }
    }
    if let Some(protocol) = err.protocol_error() {
        if protocol.code.is_retriable() {
            eprintln!("{} is retriable; try again later", protocol.code);
        }
    }
    anyhow::Error::new(err.error)
}
