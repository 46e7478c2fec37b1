//! In-memory repository adapters.
//!
//! Used by the HTTP test suites and for running the app without PostgreSQL.
//! They hold the same invariants as the database schema: unique usernames and
//! products that reference existing categories.

mod catalogue;
mod users;

pub use catalogue::InMemoryCatalogueRepository;
pub use users::InMemoryUserRepository;
