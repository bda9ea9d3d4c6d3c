use serde::{Deserialize, Serialize};

/// One persisted user registration entry.
///
/// The JSON field names are the storage contract of `usuarios.json`;
/// `useremail` is the record key. Uniqueness of the key is advisory only:
/// nothing rejects a duplicate on write, lookups return the first match.
/// Records are immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registro {
    pub nombre: String,
    pub useremail: String,
    /// Kept exactly as submitted: a number or its string form.
    pub edad: Edad,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub intereses: Vec<String>,
}

/// An age in its original JSON shape. HTML forms submit strings, API clients
/// tend to submit numbers; the store never normalizes between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Edad {
    Numero(i64),
    Texto(String),
}

impl Edad {
    /// Numeric value, when the submitted shape parses as an integer.
    pub fn as_numero(&self) -> Option<i64> {
        match self {
            Edad::Numero(n) => Some(*n),
            Edad::Texto(s) => s.trim().parse().ok(),
        }
    }
}

/// Deserializes a field that may arrive as a single string or as a list of
/// strings, normalizing both into an ordered sequence. A form with one
/// checkbox ticked submits a scalar; the store only ever sees the sequence.
pub fn uno_o_varios<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum UnoOVarios {
        Uno(String),
        Varios(Vec<String>),
    }

    Ok(match Option::<UnoOVarios>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(UnoOVarios::Uno(valor)) => vec![valor],
        Some(UnoOVarios::Varios(valores)) => valores,
    })
}
