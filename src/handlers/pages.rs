use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{Html, Redirect},
    Json,
};
use serde::Serialize;
use tower_cookies::{cookie::time::Duration, Cookie, Cookies};

use crate::middleware_layer::auth::current_session;
use crate::models::registro::Registro;
use crate::state::AppState;

/// Anonymous-only page shells. Everything else under public/ is served by
/// the router's static fallback.
pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../public/login.html"))
}

pub async fn registro_page() -> Html<&'static str> {
    Html(include_str!("../../public/registro.html"))
}

/// Open page shell; routed explicitly because the static fallback does not
/// map the extensionless `/preferencias` onto its html file.
pub async fn preferencias_page() -> Html<&'static str> {
    Html(include_str!("../../public/preferencias.html"))
}

/// Stores the chosen theme in a client-readable cookie and bounces back to
/// wherever the visitor came from.
pub async fn tema(Path(modo): Path<String>, headers: HeaderMap, cookies: Cookies) -> Redirect {
    let mut cookie = Cookie::new("tema", modo);
    // read by client-side scripts, so deliberately not HttpOnly
    cookie.set_http_only(false);
    cookie.set_max_age(Duration::days(7));
    cookie.set_path("/");
    cookies.add(cookie);

    let destino = headers
        .get(header::REFERER)
        .and_then(|valor| valor.to_str().ok())
        .unwrap_or("/");
    Redirect::to(destino)
}

/// Static contact information.
#[derive(Serialize)]
pub struct InfoContacto {
    pub email: &'static str,
    pub tlf: &'static str,
    pub direccion: &'static str,
}

/// The contact page payload. `user` rides along when the visitor has a live
/// session; the route itself is open to everyone.
#[derive(Serialize)]
pub struct ContactoResponse {
    pub user: Option<Registro>,
    pub info_contacto: InfoContacto,
}

#[axum::debug_handler]
pub async fn contacto(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Json<ContactoResponse> {
    let user = current_session(&state, &cookies)
        .await
        .map(|session| session.datos_usuario);

    Json(ContactoResponse {
        user,
        info_contacto: InfoContacto {
            email: "supraconciencia@suenosvalenti.com",
            tlf: "+34 666 666 666",
            direccion: "Calle Falsa 1234, Springfield",
        },
    })
}
