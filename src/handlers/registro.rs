use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::registro::{uno_o_varios, Edad, Registro};
use crate::state::AppState;
use crate::validation::registro::validar_registro;

/// The request payload for user registration. `intereses` arrives as a
/// scalar or a list depending on how many boxes the form had ticked; it is
/// normalized here, before anything reaches the store.
#[derive(Deserialize, Debug)]
pub struct RegistroRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub useremail: String,
    pub edad: Option<Edad>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default, deserialize_with = "uno_o_varios")]
    pub intereses: Vec<String>,
}

/// The response payload for a completed registration.
#[derive(Serialize)]
pub struct RegistroResponse {
    pub success: bool,
    pub message: String,
}

/// The response payload listing every validation failure.
#[derive(Serialize)]
pub struct ErroresResponse {
    pub success: bool,
    pub errores: Vec<String>,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn registro(
    State(state): State<AppState>,
    Json(payload): Json<RegistroRequest>,
) -> Result<Response> {
    tracing::info!("📝 Register attempt - {}", payload.useremail);

    let errores = validar_registro(&payload.nombre, &payload.useremail, payload.edad.as_ref());
    if !errores.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ErroresResponse {
                success: false,
                errores,
            }),
        )
            .into_response());
    }

    // validation guarantees edad is present from here on
    let edad = payload.edad.ok_or_else(|| {
        AppError::Validation("Debes cubrir el campo edad y debe ser mayor que 0.".to_string())
    })?;

    let nuevo = Registro {
        nombre: payload.nombre,
        useremail: payload.useremail,
        edad,
        ciudad: payload.ciudad,
        intereses: payload.intereses,
    };

    state.store.append(&nuevo).await?;
    tracing::info!("✅ User registered: {}", nuevo.useremail);

    let response = RegistroResponse {
        success: true,
        message: format!("Registro realizado. ¡Bienvenido, {}!", nuevo.nombre),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}
