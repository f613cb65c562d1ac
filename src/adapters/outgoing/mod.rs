pub mod broker_connection;
