//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod fetch;
mod id;
mod title;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use fetch::run_fetch;
pub use id::run_id;
pub use title::run_title;
