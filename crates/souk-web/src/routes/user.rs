//! Account handlers: signup, signin, signout, profile.

use crate::carts::merge_on_login;
use crate::state::SharedState;
use crate::views::{self, user as user_views, PageContext};
use axum::extract::{Extension, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use souk_auth::{
    hash_password, validate_password, verify_password, Account, AvatarUpload, Flash, SessionId,
};
use souk_store::StoreError;

/// GET /user/signup.
pub async fn signup_form(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    if state.sessions.snapshot(&session_id).is_signed_in() {
        return Redirect::to("/user/profile").into_response();
    }
    let ctx = PageContext::build(&state, &session_id, "Sign up");
    Html(views::render_page(&ctx, &user_views::signup_page())).into_response()
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// POST /user/signup.
///
/// Validation failures flash back to the form. On success the visitor is
/// signed in and the session cart reconciled with the new account.
pub async fn signup(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<SignupForm>,
) -> Redirect {
    let email = form.email.trim().to_string();
    let username = form.username.trim().to_string();

    let mut problems = Vec::new();
    if email.is_empty() || !email.contains('@') {
        problems.push("A valid email is required.".to_string());
    }
    if username.is_empty() {
        problems.push("A username is required.".to_string());
    }
    if let Err(e) = validate_password(&form.password, &form.confirm_password) {
        problems.push(e.to_string());
    }
    if !problems.is_empty() {
        for p in problems {
            state.sessions.push_flash(&session_id, Flash::error(p));
        }
        return Redirect::to("/user/signup");
    }

    let password_hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Something went wrong, please try again."));
            return Redirect::to("/user/signup");
        }
    };

    let account = Account::new(email, username, password_hash);
    let account_id = account.id.clone();
    match state.store.insert_account(account) {
        Ok(()) => {}
        Err(StoreError::Duplicate(field)) => {
            tracing::warn!(%field, "signup rejected");
            state
                .sessions
                .push_flash(&session_id, Flash::error("That email or username is taken."));
            return Redirect::to("/user/signup");
        }
        Err(e) => {
            tracing::error!(error = %e, "signup insert failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Something went wrong, please try again."));
            return Redirect::to("/user/signup");
        }
    }

    state
        .sessions
        .update(&session_id, |s| s.sign_in(account_id.clone(), false));
    merge_on_login(&state, &session_id, &account_id);
    state
        .sessions
        .push_flash(&session_id, Flash::success("Welcome to Souk!"));

    let target = state
        .sessions
        .update(&session_id, |s| s.take_return_to())
        .flatten()
        .unwrap_or_else(|| "/user/profile".to_string());
    Redirect::to(&target)
}

/// GET /user/signin.
pub async fn signin_form(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    if state.sessions.snapshot(&session_id).is_signed_in() {
        return Redirect::to("/user/profile").into_response();
    }
    let ctx = PageContext::build(&state, &session_id, "Sign in");
    Html(views::render_page(&ctx, &user_views::signin_page())).into_response()
}

#[derive(Deserialize)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: Option<String>,
}

/// POST /user/signin.
pub async fn signin(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<SigninForm>,
) -> Redirect {
    let failed = || {
        state
            .sessions
            .push_flash(&session_id, Flash::error("Invalid email or password."));
        Redirect::to("/user/signin")
    };

    let Some(account) = state.store.find_account_by_email(form.email.trim()) else {
        return failed();
    };
    if verify_password(&form.password, &account.password_hash).is_err() {
        return failed();
    }

    let remember = form.remember.is_some();
    state
        .sessions
        .update(&session_id, |s| s.sign_in(account.id.clone(), remember));
    merge_on_login(&state, &session_id, &account.id);

    let target = state
        .sessions
        .update(&session_id, |s| s.take_return_to())
        .flatten()
        .unwrap_or_else(|| "/user/profile".to_string());
    Redirect::to(&target)
}

/// GET /user/signout.
pub async fn signout(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Redirect {
    state.sessions.update(&session_id, |s| s.sign_out());
    Redirect::to("/")
}

fn require_account(state: &SharedState, session_id: &SessionId) -> Result<Account, Redirect> {
    let session = state.sessions.snapshot(session_id);
    let Some(account_id) = session.account_id else {
        return Err(Redirect::to("/user/signin"));
    };
    state.store.account(&account_id).map_err(|e| {
        tracing::error!(account = %account_id, error = %e, "session account missing");
        Redirect::to("/user/signin")
    })
}

/// GET /user/profile - order history.
pub async fn profile(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let account = match require_account(&state, &session_id) {
        Ok(account) => account,
        Err(redirect) => return redirect.into_response(),
    };

    let orders = state.store.list_orders_by_account(&account.id);
    let ctx = PageContext::build(&state, &session_id, "Your profile");
    Html(views::render_page(&ctx, &user_views::profile_page(&account, &orders))).into_response()
}

/// GET /user/edit-profile.
pub async fn edit_profile_form(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let account = match require_account(&state, &session_id) {
        Ok(account) => account,
        Err(redirect) => return redirect.into_response(),
    };
    let ctx = PageContext::build(&state, &session_id, "Edit profile");
    Html(views::render_page(&ctx, &user_views::edit_profile_page(&account))).into_response()
}

#[derive(Deserialize)]
pub struct EditProfileForm {
    pub username: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub avatar_path: String,
}

/// POST /user/edit-profile.
///
/// The avatar decision is made here at the boundary: an empty upload field
/// keeps the stored avatar, anything else replaces it.
pub async fn edit_profile(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<EditProfileForm>,
) -> Redirect {
    let mut account = match require_account(&state, &session_id) {
        Ok(account) => account,
        Err(redirect) => return redirect,
    };

    let username = form.username.trim();
    if username.is_empty() {
        state
            .sessions
            .push_flash(&session_id, Flash::error("A username is required."));
        return Redirect::to("/user/edit-profile");
    }

    let avatar = if form.avatar_path.trim().is_empty() {
        AvatarUpload::None
    } else {
        AvatarUpload::Present {
            path: form.avatar_path.trim().to_string(),
        }
    };

    account.apply_profile_edit(username, form.address.trim(), avatar);
    match state.store.update_account(account) {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("Profile updated."));
            Redirect::to("/user/profile")
        }
        Err(e) => {
            tracing::error!(error = %e, "profile update failed");
            state
                .sessions
                .push_flash(&session_id, Flash::error("Could not save your profile."));
            Redirect::to("/user/edit-profile")
        }
    }
}
