use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Placeholder credential shared by every account, carried over from the
/// original design. Known security gap: a real deployment must store a salted
/// hash per record and verify against that instead of this constant.
const PASSWORD_MAESTRA: &str = "1234";

/// Validates a credential pair against the record store and binds the matched
/// record into a fresh session, returning its opaque id.
///
/// Unknown email and wrong password both come back as `InvalidCredentials`;
/// callers cannot tell which check failed. Store failures surface as
/// `Internal`, never as a credential failure.
pub async fn authenticate(state: &AppState, useremail: &str, password: &str) -> Result<Uuid> {
    let conocido = match state.store.exists(useremail).await {
        Ok(v) => v,
        Err(e) => return Err(internal(state, e).await),
    };

    let password_ok: bool = password
        .as_bytes()
        .ct_eq(PASSWORD_MAESTRA.as_bytes())
        .into();

    if !conocido || !password_ok {
        return Err(AppError::InvalidCredentials);
    }

    let registro = match state.store.find_by_key(useremail).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            // exists() said yes, so the file changed between the two reads
            return Err(internal(
                state,
                AppError::Internal(format!("record for {useremail} vanished between reads")),
            )
            .await);
        }
        Err(e) => return Err(internal(state, e).await),
    };

    let session_id = state.sessions.create(registro).await;
    state
        .logger
        .info(&format!("Login realizado con éxito - {useremail}"))
        .await;

    Ok(session_id)
}

/// Invalidates the session unconditionally; never fails.
pub async fn deauthenticate(state: &AppState, session_id: Uuid) {
    state.logger.info("Usuario cierra sesión.").await;
    state.sessions.remove(session_id).await;
}

async fn internal(state: &AppState, e: AppError) -> AppError {
    let err = AppError::Internal(format!("Error de autenticación: {e}"));
    state.logger.error(&err).await;
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::registro::{Edad, Registro};
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> AppState {
        let config = Config {
            data_file: dir.path().join("data/usuarios.json"),
            catalog_file: dir.path().join("data/sesiones.json"),
            log_dir: dir.path().join("logs"),
            port: 0,
            session_ttl_minutes: 30,
        };
        AppState::new(&config)
    }

    fn registro(useremail: &str) -> Registro {
        Registro {
            nombre: "Ana".to_string(),
            useremail: useremail.to_string(),
            edad: Edad::Numero(28),
            ciudad: Some("Vigo".to_string()),
            intereses: vec!["oracion".to_string()],
        }
    }

    #[tokio::test]
    async fn valid_credentials_bind_the_full_record_into_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        state.store.append(&registro("a@b.com")).await.unwrap();

        let session_id = authenticate(&state, "a@b.com", "1234").await.unwrap();

        let session = state.sessions.get(session_id).await.unwrap();
        assert_eq!(session.datos_usuario, registro("a@b.com"));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        state.store.append(&registro("a@b.com")).await.unwrap();

        let desconocido = authenticate(&state, "missing@x.com", "1234").await;
        let equivocada = authenticate(&state, "a@b.com", "wrong").await;

        assert!(matches!(desconocido, Err(AppError::InvalidCredentials)));
        assert!(matches!(equivocada, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn store_failures_surface_as_internal_not_as_bad_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/usuarios.json"), "\"not an array\"").unwrap();

        let resultado = authenticate(&state, "a@b.com", "1234").await;
        assert!(matches!(resultado, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn deauthenticate_always_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        state.store.append(&registro("a@b.com")).await.unwrap();

        let session_id = authenticate(&state, "a@b.com", "1234").await.unwrap();
        deauthenticate(&state, session_id).await;
        assert!(state.sessions.get(session_id).await.is_none());

        // a second call on the same id is still fine
        deauthenticate(&state, session_id).await;
    }
}
