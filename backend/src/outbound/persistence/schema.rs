//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int4,
        /// Unique login name (max 64 characters).
        username -> Varchar,
        /// Argon2 digest in PHC string format.
        password_hash -> Varchar,
        is_admin -> Bool,
    }
}

diesel::table! {
    /// Product categories, provisioned out-of-band.
    categories (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Catalogue products.
    products (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        /// `NUMERIC(10, 2)`, constrained to be non-negative.
        price -> Numeric,
        /// Constrained to be non-negative.
        stock -> Int4,
        category_id -> Int4,
    }
}

diesel::joinable!(products -> categories (category_id));
diesel::allow_tables_to_appear_in_same_query!(categories, products, users);
