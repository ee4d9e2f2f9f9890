// Event Admin Client - library root

pub mod auth;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod forms;
pub mod http_client;
pub mod session;

pub use config::Config;
pub use error::ApiError;
pub use http_client::{EventAdminClient, RequestOptions};
pub use session::{Session, SessionSink};
