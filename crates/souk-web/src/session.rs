//! Session storage and the cookie middleware.
//!
//! Sessions live in a process-local map keyed by the value of the
//! `souk_session` cookie. Every request passes through the middleware,
//! which loads the visitor's session or creates a fresh anonymous one and
//! hands the ID to handlers through request extensions.

use crate::state::SharedState;
use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use parking_lot::RwLock;
use souk_auth::{Flash, Session, SessionId};
use std::collections::HashMap;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "souk_session";

/// Process-local session map.
#[derive(Default)]
pub struct Sessions {
    inner: RwLock<HashMap<SessionId, Session>>,
}

impl Sessions {
    /// Create an empty session map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the session for a cookie value, or create a fresh anonymous
    /// one. Expired sessions are dropped and replaced.
    ///
    /// Returns the session ID and whether a new session was created.
    pub fn load_or_create(&self, cookie_value: Option<&str>) -> (SessionId, bool) {
        let mut inner = self.inner.write();

        if let Some(value) = cookie_value {
            let id = SessionId::from(value);
            match inner.get_mut(&id) {
                Some(session) if !session.is_expired() => {
                    session.touch();
                    return (id, false);
                }
                Some(_) => {
                    inner.remove(&id);
                }
                None => {}
            }
        }

        let session = Session::anonymous();
        let id = session.id.clone();
        inner.insert(id.clone(), session);
        (id, true)
    }

    /// Clone the session for reading. Missing sessions read as a fresh
    /// anonymous one so rendering never fails mid-request.
    pub fn snapshot(&self, id: &SessionId) -> Session {
        self.inner
            .read()
            .get(id)
            .cloned()
            .unwrap_or_else(Session::anonymous)
    }

    /// Mutate the session under the write lock.
    pub fn update<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.inner.write().get_mut(id).map(f)
    }

    /// Queue a flash message on the session.
    pub fn push_flash(&self, id: &SessionId, flash: Flash) {
        self.update(id, |s| s.push_flash(flash));
    }

    /// Drain pending flash messages.
    pub fn take_flash(&self, id: &SessionId) -> Vec<Flash> {
        self.update(id, |s| s.take_flash()).unwrap_or_default()
    }

    /// Remove a session entirely.
    pub fn remove(&self, id: &SessionId) {
        self.inner.write().remove(id);
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if no sessions exist.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Extract the session cookie value from a request's Cookie headers.
fn session_cookie(req: &Request) -> Option<String> {
    let header = req.headers().get(COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(SESSION_COOKIE) {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}

/// Middleware that attaches the visitor's session ID to every request.
///
/// The cookie is (re-)issued when the session is created and whenever its
/// lifetime changes during the request, so a "remember me" signin extends
/// the browser cookie along with the server-side record.
pub async fn session_middleware(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Response {
    let cookie_value = session_cookie(&req);
    let (session_id, created) = state.sessions.load_or_create(cookie_value.as_deref());
    let expires_before = state.sessions.snapshot(&session_id).expires_at;

    req.extensions_mut().insert(session_id.clone());
    let mut response = next.run(req).await;

    let expires_after = state.sessions.snapshot(&session_id).expires_at;
    if created || expires_after != expires_before {
        let max_age = (expires_after - souk_commerce::current_timestamp()).max(0);
        let cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            session_id.as_str(),
            max_age
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}
