//! File attachments of actions, rewards/punishments and lectures.
//!
//! Uploads arrive as `multipart/form-data` with one `json` part holding the
//! record and up to [`MAX_FILES`] `files` parts. Each file is streamed to the
//! feature's directory under a random name while its MD5 is computed. If
//! anything about the request is rejected, the files already written for it
//! are removed again.
//!
//! Downloads never trust the requested name: it is checked for traversal
//! sequences before any filesystem call, and the resolved path must stay
//! inside the upload directory.

use actix_files::NamedFile;
use actix_multipart::{Field, Multipart};
use common::model::attachment::Attachment;
use futures_util::StreamExt;
use log::{info, warn};
use md5::Context;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

pub const MAX_FILES: usize = 10;
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
const MAX_JSON_PART: usize = 1024 * 1024;

pub const ACTIONS_DIR: &str = "trainer-actions";
pub const REWARD_PUNISHMENT_DIR: &str = "trainer-reward-punishment";
pub const LECTURES_DIR: &str = "lectures";

/// Parent of the per-feature upload directories.
#[derive(Debug, Clone)]
pub struct UploadRoot(PathBuf);

impl UploadRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn dir(&self, feature: &str) -> PathBuf {
        self.0.join(feature)
    }

    /// Creates every feature directory.
    pub fn prepare(&self) -> std::io::Result<()> {
        for feature in [ACTIONS_DIR, REWARD_PUNISHMENT_DIR, LECTURES_DIR] {
            std::fs::create_dir_all(self.dir(feature))?;
        }
        Ok(())
    }
}

/// A parsed upload: the record metadata and the files stored for it.
pub struct Upload<T> {
    pub meta: T,
    pub files: Vec<Attachment>,
}

/// Reads a multipart upload into `dir`. On error nothing stays on disk.
pub async fn receive<T>(payload: Multipart, dir: &Path) -> Result<Upload<T>, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let mut files = Vec::new();
    match receive_parts(payload, dir, &mut files).await {
        Ok(meta) => Ok(Upload { meta, files }),
        Err(e) => {
            remove_files(dir, &files).await;
            Err(e)
        }
    }
}

async fn receive_parts<T>(
    mut payload: Multipart,
    dir: &Path,
    files: &mut Vec<Attachment>,
) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let mut meta: Option<T> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("json") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    bytes.extend_from_slice(&chunk?);
                    if bytes.len() > MAX_JSON_PART {
                        return Err(ApiError::BadRequest("json part too large".into()));
                    }
                }
                let parsed: T = serde_json::from_slice(&bytes)
                    .map_err(|e| ApiError::BadRequest(format!("invalid json part: {}", e)))?;
                parsed.validate()?;
                meta = Some(parsed);
            }
            Some("files") | Some("file") => {
                if files.len() >= MAX_FILES {
                    return Err(ApiError::BadRequest(format!(
                        "at most {} files per submission",
                        MAX_FILES
                    )));
                }
                let original_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                if original_name.is_empty() {
                    // An empty file input still sends a part without a filename.
                    drain(&mut field).await?;
                    continue;
                }
                let attachment = store_file(&mut field, dir, &original_name, files).await?;
                files.push(attachment);
            }
            _ => drain(&mut field).await?,
        }
    }

    meta.ok_or_else(|| ApiError::BadRequest("missing json part".into()))
}

async fn drain(field: &mut Field) -> Result<(), ApiError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}

/// Streams one file part to disk. A partially written file is removed
/// before an error is returned.
async fn store_file(
    field: &mut Field,
    dir: &Path,
    original_name: &str,
    stored: &[Attachment],
) -> Result<Attachment, ApiError> {
    let filename = random_filename(original_name)?;
    let path = dir.join(&filename);

    let result: Result<(usize, String), ApiError> = async {
        let mut writer = BufWriter::new(File::create(&path)?);
        let mut hasher = Context::new();
        let mut size = 0usize;
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            size += chunk.len();
            if size > MAX_FILE_SIZE {
                return Err(ApiError::BadRequest(format!(
                    "file '{}' exceeds {} MB",
                    original_name,
                    MAX_FILE_SIZE / (1024 * 1024)
                )));
            }
            hasher.consume(&chunk);
            writer.write_all(&chunk)?;
        }
        writer.flush()?;
        Ok((size, format!("{:x}", hasher.finalize())))
    }
    .await;

    match result {
        Ok((size, md5)) => {
            info!(
                "stored upload '{}' as {} ({} bytes, file {} of request)",
                original_name,
                filename,
                size,
                stored.len() + 1
            );
            Ok(Attachment {
                path: path.to_string_lossy().into_owned(),
                filename,
                original_name: original_name.to_string(),
                size: size as u64,
                md5: Some(md5),
            })
        }
        Err(e) => {
            let _ = std::fs::remove_file(&path);
            Err(e)
        }
    }
}

/// `<uuid>.<ext>`, keeping the original extension only when it is short and
/// alphanumeric.
fn random_filename(original_name: &str) -> Result<String, ApiError> {
    let ext_re = Regex::new(r"^[A-Za-z0-9]{1,10}$")
        .map_err(|e| ApiError::BadRequest(format!("regex error: {}", e)))?;
    let id = Uuid::new_v4().to_string();
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| ext_re.is_match(e));
    Ok(match ext {
        Some(ext) => format!("{}.{}", id, ext.to_ascii_lowercase()),
        None => id,
    })
}

/// Unlinks a record's files. Files already gone are skipped with a warning;
/// names that could escape `dir` are never touched.
pub async fn remove_files(dir: &Path, files: &[Attachment]) {
    for file in files {
        if check_filename(&file.filename).is_err() {
            warn!("refusing to delete suspicious attachment name {:?}", file.filename);
            continue;
        }
        match tokio::fs::remove_file(dir.join(&file.filename)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("attachment {} already missing from disk", file.filename);
            }
            Err(e) => warn!("could not delete attachment {}: {}", file.filename, e),
        }
    }
}

/// Rejects names that could address anything outside a single directory.
pub fn check_filename(filename: &str) -> Result<(), ApiError> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(ApiError::BadRequest("invalid filename".into()));
    }
    Ok(())
}

/// Opens `filename` from `dir` for download.
pub async fn open_download(dir: &Path, filename: &str) -> Result<NamedFile, ApiError> {
    check_filename(filename)?;

    let base = tokio::fs::canonicalize(dir)
        .await
        .map_err(|_| ApiError::not_found("file", filename))?;
    let resolved = tokio::fs::canonicalize(base.join(filename))
        .await
        .map_err(|_| ApiError::not_found("file", filename))?;
    if !resolved.starts_with(&base) {
        return Err(ApiError::Forbidden("access denied".into()));
    }

    Ok(NamedFile::open_async(resolved).await?)
}
