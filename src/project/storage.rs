//! File-backed project store.
//!
//! Projects are written as versioned JSON, gzip-compressed once they grow
//! past a threshold. Writers take an exclusive lock on a sibling `.lock`
//! file, write to a temporary file and rename it over the target, keeping the
//! previous version as `.bak`. Readers take a shared lock.

use super::Project;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for project files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

/// Tuning for [`save_project`] and [`load_project`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    pub max_file_size_bytes: u64,
    /// Keep the previous file as `.bak` when overwriting
    pub keep_backup: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            max_file_size_bytes: 50 * 1024 * 1024,
            keep_backup: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectFile {
    version: u32,
    last_modified: String,
    #[serde(flatten)]
    project: Project,
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("project"));
    name.push(suffix);
    path.with_file_name(name)
}

pub fn lock_file_path(path: &Path) -> PathBuf {
    sibling(path, ".lock")
}

pub fn backup_file_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

fn open_lock(path: &Path) -> Result<(File, PathBuf)> {
    let lock_path = lock_file_path(path);
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open project lock file {}", lock_path.display()))?;
    Ok((lock_file, lock_path))
}

fn release_lock(lock_file: &File, lock_path: &Path) {
    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock project file {}: {}",
            lock_path.display(),
            err
        )
    });
}

/// Writes `project` to `path` atomically.
pub fn save_project(path: &Path, project: &Project, options: &StoreOptions) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create project directory {}", dir.display()))?;
    }

    let (lock_file, lock_path) = open_lock(path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock project file {}", lock_path.display()))?;

    let result = save_project_inner(path, project, options);
    release_lock(&lock_file, &lock_path);
    result
}

fn save_project_inner(path: &Path, project: &Project, options: &StoreOptions) -> Result<()> {
    let payload = ProjectFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        project: project.clone(),
    };

    let mut bytes =
        serde_json::to_vec_pretty(&payload).context("failed to serialise project payload")?;

    if bytes.len() as u64 > options.max_file_size_bytes {
        bail!(
            "project data is {} bytes which exceeds the limit of {} bytes",
            bytes.len(),
            options.max_file_size_bytes
        );
    }

    let should_compress = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => bytes.len() as u64 >= options.auto_compress_threshold_bytes,
    };
    if should_compress {
        bytes = compress_bytes(&bytes)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| {
                format!(
                    "failed to open temporary project file {}",
                    tmp_path.display()
                )
            })?;
        tmp_file
            .write_all(&bytes)
            .context("failed to write project payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary project file")?;
    }

    if path.exists() && options.keep_backup {
        let backup_path = backup_file_path(path);
        if backup_path.exists() {
            fs::remove_file(&backup_path).ok();
        }
        fs::rename(path, &backup_path).with_context(|| {
            format!(
                "failed to rotate previous project file {} -> {}",
                path.display(),
                backup_path.display()
            )
        })?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary project file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    info!(
        "Project '{}' saved to {} ({} bytes, compression={})",
        project.name,
        path.display(),
        bytes.len(),
        should_compress
    );
    Ok(())
}

/// Reads a project file, plain or gzip-compressed.
pub fn load_project(path: &Path, options: &StoreOptions) -> Result<Project> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat project file {}", path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        bail!(
            "project file {} is {} bytes which exceeds the limit of {} bytes",
            path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
    }

    let (lock_file, lock_path) = open_lock(path)?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = load_project_inner(path);
    release_lock(&lock_file, &lock_path);
    result
}

fn load_project_inner(path: &Path) -> Result<Project> {
    let mut file_bytes = Vec::new();
    File::open(path)
        .with_context(|| format!("failed to open project file {}", path.display()))?
        .read_to_end(&mut file_bytes)
        .context("failed to read project file")?;

    let compressed = is_gzip(&file_bytes);
    let json = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress project file")?;
        out
    } else {
        file_bytes
    };

    let file: ProjectFile = serde_json::from_slice(&json)
        .with_context(|| format!("failed to parse project file {}", path.display()))?;
    if file.version > CURRENT_VERSION {
        warn!(
            "Project file {} has version {} (newer than {}); loading anyway",
            path.display(),
            file.version,
            CURRENT_VERSION
        );
    }

    debug!(
        "Loaded project '{}' from {} (compressed={compressed}, {} symbol(s), {} shape(s))",
        file.project.name,
        path.display(),
        file.project.symbols.len(),
        file.project.shapes.len()
    );
    Ok(file.project)
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress project payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed project payload")
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = sibling(target, ".tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = sibling(target, &format!(".tmp{counter}"));
    }
    candidate
}
