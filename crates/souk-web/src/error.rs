//! Web-layer error type.
//!
//! Handlers resolve expected failures to flash messages and redirects
//! themselves; anything that escapes lands here, gets logged, and sends
//! the visitor back to the shop front. Nothing is fatal to the process.

use axum::response::{IntoResponse, Redirect, Response};
use souk_auth::AuthError;
use souk_commerce::CommerceError;
use souk_store::StoreError;
use thiserror::Error;

use crate::collaborators::CollaboratorError;

/// Errors that can escape a handler.
#[derive(Error, Debug)]
pub enum WebError {
    /// Domain rule violation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Collaborator failure.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "unhandled handler error");
        Redirect::to("/").into_response()
    }
}
