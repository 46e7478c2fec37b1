//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AccountService;
use crate::domain::ports::{CatalogueRepository, UserRepository};
use crate::inbound::http::remember::RememberMe;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub remember: RememberMe,
}

impl HttpState {
    /// Construct state from the repository ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use actix_web::cookie::Key;
    /// use storefront::inbound::http::remember::RememberMe;
    /// use storefront::inbound::http::state::HttpState;
    /// use storefront::outbound::memory::{InMemoryCatalogueRepository, InMemoryUserRepository};
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(InMemoryCatalogueRepository::new()),
    ///     RememberMe::new(Key::generate(), false),
    /// );
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(
        users: Arc<dyn UserRepository>,
        catalogue: Arc<dyn CatalogueRepository>,
        remember: RememberMe,
    ) -> Self {
        Self {
            accounts: AccountService::new(users),
            catalogue,
            remember,
        }
    }
}
