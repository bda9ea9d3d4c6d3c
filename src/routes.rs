use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::handlers;
use crate::middleware_layer;
use crate::state::AppState;

/// Builds the full application router over `state`.
///
/// Three groups: anonymous-only routes (login and registration bounce
/// logged-in visitors to /perfil), authenticated routes (bounce anonymous
/// visitors to /login) and open routes. Static assets are the fallback.
pub fn app(state: AppState) -> Router {
    let anon_routes = Router::new()
        .route(
            "/login",
            get(handlers::pages::login_page).post(handlers::auth::login),
        )
        .route(
            "/registro",
            get(handlers::pages::registro_page).post(handlers::registro::registro),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_anon,
        ))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/perfil", get(handlers::perfil::perfil))
        .route("/recomendaciones", get(handlers::perfil::recomendaciones))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let open_routes = Router::new()
        .route("/preferencias", get(handlers::pages::preferencias_page))
        .route("/tema/{modo}", get(handlers::pages::tema))
        .route("/contacto", get(handlers::pages::contacto))
        .with_state(state);

    Router::new()
        .merge(anon_routes)
        .merge(protected_routes)
        .merge(open_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .fallback_service(ServeDir::new("public"))
}
