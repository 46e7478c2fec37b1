//! PC parts storefront: catalogue pages, admin product maintenance, and a
//! read-only JSON API over PostgreSQL.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
