use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::registro::Registro;

/// Server-side session state bound to one authenticated record. Sessions
/// live only in process memory and are never serialized.
#[derive(Debug, Clone)]
pub struct Session {
    /// The record fetched from the store at login time.
    pub datos_usuario: Registro,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
}

struct Entry {
    session: Session,
    last_seen: DateTime<Utc>,
}

/// In-memory session store keyed by the opaque id carried in the cookie.
///
/// Lookups refresh the inactivity window; entries past it are dropped on
/// access, and a background sweep removes the ones nobody asks about.
/// Two different ids never interact.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Creates a session bound to `registro` and returns its opaque id.
    pub async fn create(&self, registro: Registro) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            datos_usuario: registro,
            created_at: Utc::now(),
        };
        self.inner.write().await.insert(
            id,
            Entry {
                session,
                last_seen: Utc::now(),
            },
        );
        id
    }

    /// Fetches the session for `id`, touching its inactivity window.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let mut map = self.inner.write().await;
        let entry = map.get_mut(&id)?;
        if Utc::now() - entry.last_seen > self.ttl {
            map.remove(&id);
            return None;
        }
        entry.last_seen = Utc::now();
        Some(entry.session.clone())
    }

    /// Removes the session unconditionally; an absent id is not an error.
    pub async fn remove(&self, id: Uuid) {
        self.inner.write().await.remove(&id);
    }

    /// Drops every entry past its inactivity window.
    pub async fn sweep_expired(&self) {
        let now = Utc::now();
        self.inner
            .write()
            .await
            .retain(|_, entry| now - entry.last_seen <= self.ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registro::Edad;

    fn registro() -> Registro {
        Registro {
            nombre: "Ana".to_string(),
            useremail: "ana@example.com".to_string(),
            edad: Edad::Numero(28),
            ciudad: None,
            intereses: Vec::new(),
        }
    }

    #[tokio::test]
    async fn created_sessions_are_found_and_bound_to_the_record() {
        let sessions = SessionStore::new(30);
        let id = sessions.create(registro()).await;

        let session = sessions.get(id).await.expect("session should exist");
        assert_eq!(session.datos_usuario.useremail, "ana@example.com");
    }

    #[tokio::test]
    async fn removal_is_unconditional() {
        let sessions = SessionStore::new(30);
        let id = sessions.create(registro()).await;

        sessions.remove(id).await;
        assert!(sessions.get(id).await.is_none());

        // removing again, or removing an id that never existed, is fine
        sessions.remove(id).await;
        sessions.remove(Uuid::new_v4()).await;
    }

    #[tokio::test]
    async fn unknown_ids_resolve_to_no_session() {
        let sessions = SessionStore::new(30);
        assert!(sessions.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn sessions_expire_after_the_inactivity_window() {
        let sessions = SessionStore::new(0);
        let id = sessions.create(registro()).await;

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(sessions.get(id).await.is_none());
    }

    #[tokio::test]
    async fn sweep_drops_only_expired_entries() {
        let fresh = SessionStore::new(30);
        let kept = fresh.create(registro()).await;
        fresh.sweep_expired().await;
        assert!(fresh.get(kept).await.is_some());

        let stale = SessionStore::new(0);
        let gone = stale.create(registro()).await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        stale.sweep_expired().await;
        assert!(stale.inner.read().await.is_empty());
        assert!(stale.get(gone).await.is_none());
    }
}
