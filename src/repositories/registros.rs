use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::logger::Logger;
use crate::models::registro::Registro;

/// Durable append and read-only lookup over a single JSON array file.
///
/// Every operation is a full read-parse cycle and appends rewrite the whole
/// file, never patch it in place; the expected dataset is small and the
/// design trades throughput for simplicity. Writers are serialized behind an
/// async mutex so two appends cannot interleave their read-modify-write.
/// Reads take no lock: a read racing a write observes either the previous or
/// the new file content, which is the limitation inherited from the original
/// design.
#[derive(Clone)]
pub struct RecordStore {
    path: PathBuf,
    logger: Logger,
    write_lock: Arc<Mutex<()>>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, logger: Logger) -> Self {
        Self {
            path: path.into(),
            logger,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `registro` as the last element of the stored sequence.
    ///
    /// The containing directory is created on demand. Nothing is written when
    /// the existing content fails to read or parse, so the prior file content
    /// survives every failure.
    pub async fn append(&self, registro: &Registro) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let result = self.append_inner(registro).await;
        match &result {
            Ok(()) => {
                self.logger
                    .info(&format!(
                        "Registro guardado correctamente en {} - {}",
                        self.path.display(),
                        registro.useremail
                    ))
                    .await;
            }
            Err(e) => self.logger.error(e).await,
        }
        result
    }

    async fn append_inner(&self, registro: &Registro) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let mut registros = self.read_all().await?;
        registros.push(registro.clone());

        let json = serde_json::to_string_pretty(&registros)
            .map_err(|e| AppError::Internal(format!("Record serialization failed: {}", e)))?;
        fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Whether any stored record's key equals `useremail`.
    /// A missing or empty file means "no", not an error.
    pub async fn exists(&self, useremail: &str) -> Result<bool> {
        match self.read_all().await {
            Ok(registros) => Ok(registros.iter().any(|r| r.useremail == useremail)),
            Err(e) => {
                self.logger.error(&e).await;
                Err(e)
            }
        }
    }

    /// First record whose key equals `useremail`, insertion order preserved.
    /// A missing or empty file means "not found", not an error.
    pub async fn find_by_key(&self, useremail: &str) -> Result<Option<Registro>> {
        match self.read_all().await {
            Ok(registros) => Ok(registros.into_iter().find(|r| r.useremail == useremail)),
            Err(e) => {
                self.logger.error(&e).await;
                Err(e)
            }
        }
    }

    /// Current stored sequence; a missing or empty file is an empty sequence.
    async fn read_all(&self) -> Result<Vec<Registro>> {
        let contenido = match fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        if contenido.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contenido)
            .map_err(|e| AppError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }
}
