use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::models::session::Session;
use crate::state::AppState;

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Outcome of an access gate: let the request through or bounce it.
#[derive(Debug, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    Redirect(&'static str),
}

/// Gate for routes that need a logged-in visitor.
///
/// # Arguments
///
/// * `session` - The session resolved for this request, if any.
///
/// # Returns
///
/// `Gate::Proceed` when the session holds a bound record, otherwise a
/// redirect to the login entry point.
pub fn require_authenticated(session: Option<&Session>) -> Gate {
    match session {
        Some(_) => Gate::Proceed,
        None => Gate::Redirect("/login"),
    }
}

/// Gate for routes that only make sense for anonymous visitors.
///
/// # Arguments
///
/// * `session` - The session resolved for this request, if any.
///
/// # Returns
///
/// `Gate::Proceed` when no record is bound, otherwise a redirect to the
/// authenticated landing page.
pub fn require_anonymous(session: Option<&Session>) -> Gate {
    match session {
        None => Gate::Proceed,
        Some(_) => Gate::Redirect("/perfil"),
    }
}

/// Extracts the session token from the request cookies.
///
/// # Arguments
///
/// * `cookies` - The request cookies.
///
/// # Returns
///
/// An `Option` containing the session id if found.
fn extract_session_token(cookies: &Cookies) -> Option<Uuid> {
    cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Resolves the cookie-named session against the session store.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
///
/// # Returns
///
/// The live `Session`, or `None` for a missing, malformed or expired id.
pub async fn current_session(state: &AppState, cookies: &Cookies) -> Option<Session> {
    let id = extract_session_token(cookies)?;
    state.sessions.get(id).await
}

/// A middleware that requires a valid session to be present.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// The downstream `Response` on proceed, with the session riding along as a
/// request extension; a redirect to `/login` otherwise.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = current_session(&state, &cookies).await;
    if let Gate::Redirect(path) = require_authenticated(session.as_ref()) {
        return Redirect::to(path).into_response();
    }
    if let Some(session) = session {
        request.extensions_mut().insert(session);
    }
    next.run(request).await
}

/// A middleware that requires the visitor to be anonymous.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// The downstream `Response` on proceed; a redirect to `/perfil` otherwise.
pub async fn require_anon(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request<Body>,
    next: Next,
) -> Response {
    let session = current_session(&state, &cookies).await;
    match require_anonymous(session.as_ref()) {
        Gate::Proceed => next.run(request).await,
        Gate::Redirect(path) => Redirect::to(path).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registro::{Edad, Registro};
    use chrono::Utc;

    fn session() -> Session {
        Session {
            datos_usuario: Registro {
                nombre: "Ana".to_string(),
                useremail: "ana@example.com".to_string(),
                edad: Edad::Numero(28),
                ciudad: None,
                intereses: Vec::new(),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn anonymous_visitors_are_sent_to_login() {
        assert_eq!(require_authenticated(None), Gate::Redirect("/login"));
        assert_eq!(require_authenticated(Some(&session())), Gate::Proceed);
    }

    #[test]
    fn logged_in_visitors_are_sent_to_their_profile() {
        assert_eq!(require_anonymous(Some(&session())), Gate::Redirect("/perfil"));
        assert_eq!(require_anonymous(None), Gate::Proceed);
    }
}
