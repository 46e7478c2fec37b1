//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: process-local repositories with matching invariants.
//!
//! Adapters only translate between domain types and storage
//! representations; they contain no business logic.

pub mod memory;
pub mod persistence;
