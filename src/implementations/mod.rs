pub mod config;
pub mod chat_client;
pub mod code_relay;
