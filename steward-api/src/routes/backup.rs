//! Backup status, manual trigger, and artifact download.
//!
//! Manual backups run the same routine the scheduler daemon uses, in-process
//! and synchronously: the response is only sent once the artifact exists.

use axum::{
    body::Body,
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio_util::io::ReaderStream;

use steward_backup::backup::{
    list_backups, perform_backup, recent_log_lines, BackupConfig, BackupFileInfo,
};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

const LOG_TAIL_LINES: usize = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatus {
    pub engine: String,
    pub files: Vec<BackupFileInfo>,
    pub last_backup: Option<BackupFileInfo>,
    /// Tail of the backup log, newline-joined.
    pub logs: String,
}

fn backup_config(state: &AppState) -> BackupConfig {
    BackupConfig::from_env(&state.config.database)
}

/// GET /api/backup
pub async fn status(State(state): State<AppState>) -> ApiResult<Json<BackupStatus>> {
    let config = backup_config(&state);
    let files = list_backups(&config.backup_dir)?;
    let last_backup = files.first().cloned();
    let logs = recent_log_lines(&config.log_file, LOG_TAIL_LINES);

    Ok(Json(BackupStatus {
        engine: state.engine().label().to_string(),
        files,
        last_backup,
        logs,
    }))
}

/// POST /api/backup
pub async fn run(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let config = backup_config(&state);
    perform_backup(&config)
        .await
        .map_err(|e| ApiError::InternalError(format!("Backup failed: {e:#}")))?;

    let files = list_backups(&config.backup_dir)?;
    Ok(Json(json!({
        "success": true,
        "files": files,
    })))
}

/// Rejects anything that is not a bare `backup-*` artifact basename, so a
/// crafted filename cannot reach outside the backup directory.
fn valid_artifact_name(filename: &str) -> bool {
    filename.starts_with("backup-")
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains("..")
}

/// GET /api/backup/download/:filename
pub async fn download(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
) -> ApiResult<Response> {
    if !valid_artifact_name(&filename) {
        return Err(ApiError::BadRequest("Invalid backup filename".to_string()));
    }

    let config = backup_config(&state);
    let path = config.backup_dir.join(&filename);
    if !path.is_file() {
        return Err(ApiError::NotFound(format!("No such backup: {filename}")));
    }

    let file = tokio::fs::File::open(&path).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(body)
        .map_err(|e| ApiError::InternalError(format!("Response build failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name_guard() {
        assert!(valid_artifact_name("backup-sqlite-2026-01-01T02-00-00.db"));
        assert!(valid_artifact_name("backup-mysql-2026-01-01T02-00-00.sql"));
        assert!(!valid_artifact_name("../secrets.txt"));
        assert!(!valid_artifact_name("backup-../../etc/passwd"));
        assert!(!valid_artifact_name("backup-a/b.db"));
        assert!(!valid_artifact_name("backup-a\\b.db"));
        assert!(!valid_artifact_name("database.sqlite"));
    }
}
