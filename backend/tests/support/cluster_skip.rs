//! What to do when the embedded cluster cannot start.
//!
//! Hosts without the PostgreSQL binaries (or network access to fetch them)
//! skip the database suites with a `SKIP-TEST-CLUSTER` marker. Setting
//! `REQUIRE_TEST_CLUSTER` turns that skip into a failure so CI cannot pass
//! without exercising the adapters.

/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a setup failure, returning `None` when the suite may be skipped.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_required() {
        panic!("test cluster setup failed: {reason}");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
