//! Sueños Valenti: a small registration and session-login web service.
//!
//! Registrations live in a single JSON array file (`data/usuarios.json`)
//! rewritten whole on every append; sessions are in-memory, cookie-keyed and
//! expire after a fixed inactivity window. Application events additionally go
//! to a pair of append-only log files next to the data.

pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod state;

pub mod models {
    pub mod registro;
    pub mod session;
}

pub mod repositories {
    pub mod registros;
}

pub mod services {
    pub mod auth;
}

pub mod handlers {
    pub mod auth;
    pub mod pages;
    pub mod perfil;
    pub mod registro;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod registro;
}
