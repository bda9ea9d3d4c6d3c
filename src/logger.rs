use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const INFO_FILE: &str = "app.log";
const ERROR_FILE: &str = "error.log";

/// Appends timestamped lines to a pair of plain-text log files.
///
/// One line per entry, `[ISO-8601] - LEVEL: message`. The log directory is
/// created lazily on first write. Write failures are reported on the tracing
/// channel and never returned: logging must not abort the operation that
/// produced the entry.
#[derive(Clone)]
pub struct Logger {
    dir: PathBuf,
    info_path: PathBuf,
    error_path: PathBuf,
}

impl Logger {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            info_path: dir.join(INFO_FILE),
            error_path: dir.join(ERROR_FILE),
            dir,
        }
    }

    /// Appends an INFO line to app.log.
    pub async fn info(&self, message: &str) {
        let line = format!("[{}] - INFO: {}\n", timestamp(), message);
        self.append(&self.info_path, &line).await;
    }

    /// Appends an ERROR line to error.log with the string form of the failure.
    pub async fn error<E: std::fmt::Display>(&self, error: E) {
        let line = format!("[{}] - ERROR: {}\n", timestamp(), error);
        self.append(&self.error_path, &line).await;
    }

    async fn append(&self, path: &Path, line: &str) {
        if let Err(e) = self.try_append(path, line).await {
            tracing::error!("Failed to write log line to {}: {}", path.display(), e);
        }
    }

    async fn try_append(&self, path: &Path, line: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn info_lines_are_appended_with_level_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("logs"));

        logger.info("primera línea").await;
        logger.info("segunda línea").await;

        let contents = std::fs::read_to_string(dir.path().join("logs/app.log")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].contains("] - INFO: primera línea"));
        assert!(lines[1].contains("] - INFO: segunda línea"));
    }

    #[tokio::test]
    async fn errors_go_to_their_own_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("logs"));

        logger.error("algo se rompió").await;

        assert!(!dir.path().join("logs/app.log").exists());
        let contents = std::fs::read_to_string(dir.path().join("logs/error.log")).unwrap();
        assert!(contents.contains("] - ERROR: algo se rompió"));
    }

    #[tokio::test]
    async fn write_failure_is_swallowed() {
        // a file where the directory should be makes create_dir_all fail
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("logs");
        std::fs::write(&blocked, b"not a directory").unwrap();

        let logger = Logger::new(&blocked);
        logger.info("se pierde sin pánico").await;
    }
}
