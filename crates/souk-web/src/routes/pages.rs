//! Marketing pages, contact form, newsletter signup.

use crate::collaborators::{CollaboratorError, ContactMessage};
use crate::state::SharedState;
use crate::views::{self, pages as page_views, PageContext};
use axum::extract::{Extension, State};
use axum::response::Html;
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use souk_auth::{Flash, SessionId};

/// GET /about-us.
pub async fn about_us(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let ctx = PageContext::build(&state, &session_id, "About us");
    Html(views::render_page(&ctx, &page_views::about_us()))
}

/// GET /shipping-policy.
pub async fn shipping_policy(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let ctx = PageContext::build(&state, &session_id, "Shipping policy");
    Html(views::render_page(&ctx, &page_views::shipping_policy()))
}

/// GET /careers.
pub async fn careers(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let ctx = PageContext::build(&state, &session_id, "Careers");
    Html(views::render_page(&ctx, &page_views::careers()))
}

/// GET /contact.
pub async fn contact_form(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let ctx = PageContext::build(&state, &session_id, "Contact us");
    Html(views::render_page(&ctx, &page_views::contact()))
}

#[derive(Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /contact - forward through the mail collaborator.
pub async fn submit_contact(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<ContactForm>,
) -> Redirect {
    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();
    if name.is_empty() || !email.contains('@') || message.is_empty() {
        state.sessions.push_flash(
            &session_id,
            Flash::error("Please fill in your name, a valid email, and a message."),
        );
        return Redirect::to("/contact");
    }

    let result = state
        .mail
        .send_contact(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
        .await;
    match result {
        Ok(()) => {
            state.sessions.push_flash(
                &session_id,
                Flash::success("Thanks for reaching out. We will get back to you soon."),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "contact mail failed");
            state.sessions.push_flash(
                &session_id,
                Flash::error("We could not send your message, please try again later."),
            );
        }
    }
    Redirect::to("/contact")
}

#[derive(Deserialize)]
pub struct NewsletterForm {
    pub email: String,
}

/// POST /newsletter - subscribe through the newsletter collaborator.
pub async fn subscribe_newsletter(
    State(state): State<SharedState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<NewsletterForm>,
) -> Redirect {
    let email = form.email.trim();
    if !email.contains('@') {
        state
            .sessions
            .push_flash(&session_id, Flash::error("Please enter a valid email."));
        return Redirect::to("/");
    }

    match state.newsletter.subscribe(email).await {
        Ok(()) => {
            state
                .sessions
                .push_flash(&session_id, Flash::success("You are on the list!"));
        }
        Err(CollaboratorError::AlreadySubscribed(_)) => {
            state
                .sessions
                .push_flash(&session_id, Flash::error("That address is already subscribed."));
        }
        Err(e) => {
            tracing::error!(error = %e, "newsletter subscribe failed");
            state.sessions.push_flash(
                &session_id,
                Flash::error("We could not subscribe you, please try again later."),
            );
        }
    }
    Redirect::to("/")
}
