use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::registro::Registro;
use crate::models::session::Session;
use crate::state::AppState;

/// Interest tag → label shown to the user. Tags outside this table were
/// stored as submitted and are simply dropped from the rendered list.
const MAPA_INTERESES: [(&str, &str); 4] = [
    ("meditacion", "Meditación profunda"),
    ("oracion", "Oración devota"),
    ("conexion", "Conexión astrológica"),
    ("ecm", "Experiencias cercanas a la muerte"),
];

fn etiqueta_interes(clave: &str) -> Option<&'static str> {
    MAPA_INTERESES
        .iter()
        .find(|(tag, _)| *tag == clave)
        .map(|(_, etiqueta)| *etiqueta)
}

fn etiquetas(registro: &Registro) -> Vec<&'static str> {
    registro
        .intereses
        .iter()
        .filter_map(|interes| etiqueta_interes(interes))
        .collect()
}

/// The profile of the logged-in user.
#[derive(Serialize)]
pub struct PerfilResponse {
    pub user: Registro,
    pub intereses: Vec<&'static str>,
}

#[axum::debug_handler]
pub async fn perfil(Extension(session): Extension<Session>) -> Json<PerfilResponse> {
    let intereses = etiquetas(&session.datos_usuario);
    Json(PerfilResponse {
        user: session.datos_usuario,
        intereses,
    })
}

/// One entry of the session catalog (`data/sesiones.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sesion {
    pub titulo: String,
    pub categoria: String,
    pub fecha: String,
}

/// The recommendations for the logged-in user.
#[derive(Serialize)]
pub struct RecomendacionesResponse {
    pub user: Registro,
    pub sesiones_recomendadas: Vec<Sesion>,
}

/// Recommends catalog sessions whose category matches one of the user's
/// interests, with dates reformatted for display.
#[axum::debug_handler]
pub async fn recomendaciones(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<RecomendacionesResponse>> {
    let catalogo = cargar_sesiones(&state).await?;
    let etiquetas = etiquetas(&session.datos_usuario);

    let sesiones_recomendadas = catalogo
        .into_iter()
        .filter(|sesion| etiquetas.contains(&sesion.categoria.as_str()))
        .map(|sesion| Sesion {
            fecha: formato_fecha(&sesion.fecha),
            ..sesion
        })
        .collect();

    Ok(Json(RecomendacionesResponse {
        user: session.datos_usuario,
        sesiones_recomendadas,
    }))
}

/// `YYYY-MM-DD` → `DD / MM / YY`; anything else passes through untouched.
fn formato_fecha(fecha: &str) -> String {
    let partes: Vec<&str> = fecha.split('-').collect();
    match partes.as_slice() {
        [ano, mes, dia] if ano.len() == 4 && ano.is_ascii() => {
            format!("{} / {} / {}", dia, mes, &ano[2..])
        }
        _ => fecha.to_string(),
    }
}

/// Catalog read path mirrors the record store's semantics: a missing file is
/// an empty catalog, unreadable content is an error.
async fn cargar_sesiones(state: &AppState) -> Result<Vec<Sesion>> {
    let contenido = match tokio::fs::read_to_string(&state.config.catalog_file).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            state.logger.error(&e).await;
            return Err(AppError::Io(e));
        }
    };

    serde_json::from_str(&contenido).map_err(|e| {
        AppError::Corrupt(format!("{}: {}", state.config.catalog_file.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registro::Edad;

    #[test]
    fn known_tags_translate_and_unknown_tags_are_dropped() {
        let registro = Registro {
            nombre: "Ana".to_string(),
            useremail: "ana@example.com".to_string(),
            edad: Edad::Numero(28),
            ciudad: None,
            intereses: vec![
                "ecm".to_string(),
                "jardineria".to_string(),
                "meditacion".to_string(),
            ],
        };

        assert_eq!(
            etiquetas(&registro),
            vec!["Experiencias cercanas a la muerte", "Meditación profunda"]
        );
    }

    #[test]
    fn dates_render_day_first_with_a_two_digit_year() {
        assert_eq!(formato_fecha("2026-03-15"), "15 / 03 / 26");
        assert_eq!(formato_fecha("sin fecha"), "sin fecha");
    }
}
