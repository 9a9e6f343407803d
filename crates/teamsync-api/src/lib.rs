//! JSON REST API for TeamSync.
//!
//! Exposes an axum [`Router`] backed by any [`TeamStore`] and any
//! [`TextGenerator`]. Identity is whatever `actor` the client names; TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", teamsync_api::api_router(store.clone(), advisor.clone()))
//! ```

pub mod advisory;
pub mod error;
pub mod events;
pub mod log;
pub mod members;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use teamsync_core::{advisory::TextGenerator, store::TeamStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S, G> {
  pub store:   Arc<S>,
  pub advisor: Arc<G>,
}

impl<S, G> Clone for ApiState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      advisor: Arc::clone(&self.advisor),
    }
  }
}

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(store: Arc<S>, advisor: Arc<G>) -> Router<()>
where
  S: TeamStore + 'static,
  G: TextGenerator + 'static,
{
  Router::new()
    // Registry
    .route("/members", get(members::list::<S, G>))
    .route("/members/{name}", get(members::get_one::<S, G>))
    .route("/statuses", get(members::statuses))
    .route("/status", post(members::set_status::<S, G>))
    // Log
    .route("/log", get(log::list::<S, G>))
    .route("/message", post(log::post_message::<S, G>))
    .route("/photo", post(log::share_photo::<S, G>))
    .route("/support", post(log::request_support::<S, G>))
    // Derived
    .route("/advisory", post(advisory::handler::<S, G>))
    .route("/events", get(events::stream::<S, G>))
    .with_state(ApiState { store, advisor })
}

#[cfg(test)]
mod tests;
