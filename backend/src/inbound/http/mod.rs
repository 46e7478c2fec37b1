//! HTTP inbound adapter: server-rendered pages, a small JSON API, and the
//! session plumbing they share.

pub mod admin;
pub mod api;
pub mod app;
pub mod catalogue;
pub mod context;
pub mod error;
pub mod forms;
pub mod health;
pub mod remember;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

pub use app::{configure, session_middleware};
pub use error::{ApiResult, PageError, PageResult};
