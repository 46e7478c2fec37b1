//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, plus the account and bootstrap use-cases. Invariants
//! are documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / Username / PasswordDigest: accounts and their credentials.
//! - Category / Product / NewProduct: the catalogue.
//! - AccountService, ensure_admin: use-cases over the ports.

pub mod accounts;
pub mod admin_bootstrap;
pub mod auth;
pub mod catalogue;
pub mod error;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountService;
pub use self::admin_bootstrap::{ADMIN_USERNAME, AdminBootstrap, ensure_admin};
pub use self::auth::{Credentials, CredentialsError};
pub use self::catalogue::{
    CatalogueValidationError, Category, CategoryId, NewProduct, Product, ProductDraft, ProductId,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{PasswordDigest, PasswordHashError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
