//! JSON registry store for student registrations.
//!
//! # File Layout
//!
//! ```text
//! data/
//!   registrations.json        # RegistryData document
//!   registrations.json.lock   # advisory lock file
//! ```
//!
//! ```json
//! {
//!   "students": [{"id": "A1111", "courses": ["SOCI 101"], "registered_at": "..."}],
//!   "metadata": {"last_updated": "...", "total_registrations": 1, "cache_key": "blake3:..."},
//!   "cached_centrality": {"students": {}, "courses": {}}
//! }
//! ```
//!
//! # Invariants
//!
//! - Every read holds a shared lock; every read-modify-write cycle holds one
//!   exclusive lock from the read through the rename of the new file.
//! - `cached_centrality` is replaced wholesale after each mutation, never
//!   merged. `metadata.cache_key` identifies the record set and the engine
//!   settings it was computed from.
//! - A missing or unparsable data file reads as an empty registry.

use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::StoreConfig;
use crate::error::ErrorCode;
use crate::lock::{LockError, RegistryReadLock, RegistryWriteLock};
use crate::model::{CachedCentrality, StudentRecord};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while reading or writing the registry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error while writing the registry file.
    #[error("registry I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serializing the registry document failed.
    #[error("registry encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Lock acquisition failed.
    #[error("lock error: {0}")]
    Lock(#[from] LockError),
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::RegistryWriteFailed,
            Self::Encode(_) => ErrorCode::InternalUnexpected,
            Self::Lock(err) => err.code(),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Registry bookkeeping used for polling and cache validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    pub last_updated: DateTime<Utc>,
    pub total_registrations: usize,
    /// [`cache_key`] of the records and settings `cached_centrality` was
    /// computed from.
    #[serde(default, alias = "records_hash", skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
}

/// The whole on-disk registry document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryData {
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    pub metadata: RegistryMetadata,
    #[serde(default)]
    pub cached_centrality: CachedCentrality,
}

impl RegistryData {
    /// A fresh, empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            students: Vec::new(),
            metadata: RegistryMetadata {
                last_updated: Utc::now(),
                total_registrations: 0,
                cache_key: None,
            },
            cached_centrality: CachedCentrality::default(),
        }
    }

    /// Whether `cached_centrality` was computed from the current records
    /// under `provider`'s settings.
    ///
    /// An empty registry with an empty cache is always current.
    #[must_use]
    pub fn cache_is_current(&self, provider: &impl CentralityProvider) -> bool {
        if self.students.is_empty() {
            return self.cached_centrality.is_empty();
        }
        let expected = cache_key(&self.students, &provider.settings_fingerprint());
        self.metadata.cache_key.as_deref() == Some(expected.as_str())
    }
}

/// Recomputes the cached centrality pair from a record set.
///
/// Implemented by the network engine; the store calls it after every
/// mutation while still holding the write lock.
pub trait CentralityProvider {
    fn recompute(&self, students: &[StudentRecord]) -> CachedCentrality;

    /// Canonical text of every setting that changes [`Self::recompute`]'s
    /// output. Folded into the cache key.
    fn settings_fingerprint(&self) -> String {
        String::new()
    }
}

impl<F> CentralityProvider for F
where
    F: Fn(&[StudentRecord]) -> CachedCentrality,
{
    fn recompute(&self, students: &[StudentRecord]) -> CachedCentrality {
        self(students)
    }
}

/// BLAKE3 hash of a record set plus provider settings, independent of
/// record order.
///
/// Course order within a record is significant; registration timestamps
/// are not.
#[must_use]
pub fn cache_key(students: &[StudentRecord], settings: &str) -> String {
    let mut sorted: Vec<&StudentRecord> = students.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut hasher = blake3::Hasher::new();
    hasher.update(settings.as_bytes());
    hasher.update(b"\n");
    for record in sorted {
        hasher.update(record.id.as_bytes());
        for course in &record.courses {
            hasher.update(b"\x00");
            hasher.update(course.as_bytes());
        }
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

// ---------------------------------------------------------------------------
// RegistryStore
// ---------------------------------------------------------------------------

/// Lock-protected JSON file holding every registration.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    data_file: PathBuf,
    lock_file: PathBuf,
    lock_timeout: Duration,
}

impl RegistryStore {
    /// Store backed by `data_file`, locking `<data_file>.lock`.
    pub fn open(data_file: impl Into<PathBuf>, lock_timeout: Duration) -> Self {
        let data_file = data_file.into();
        let mut lock_name = data_file.clone().into_os_string();
        lock_name.push(".lock");
        Self {
            data_file,
            lock_file: PathBuf::from(lock_name),
            lock_timeout,
        }
    }

    /// Store at `data_file` with the configured lock timeout.
    pub fn from_config(data_file: impl Into<PathBuf>, config: &StoreConfig) -> Self {
        Self::open(data_file, config.lock_timeout())
    }

    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    #[must_use]
    pub fn lock_file(&self) -> &Path {
        &self.lock_file
    }

    /// Read the whole registry under a shared lock.
    ///
    /// # Errors
    ///
    /// Only lock failures; unreadable content yields an empty registry.
    #[instrument(skip(self), fields(path = %self.data_file.display()))]
    pub fn read(&self) -> Result<RegistryData, StoreError> {
        let _lock = RegistryReadLock::acquire(&self.lock_file, self.lock_timeout)?;
        Ok(self.read_unlocked())
    }

    /// All registered students, in registration order.
    ///
    /// # Errors
    ///
    /// See [`RegistryStore::read`].
    pub fn students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(self.read()?.students)
    }

    /// Registry metadata only, for cheap polling.
    ///
    /// # Errors
    ///
    /// See [`RegistryStore::read`].
    pub fn status(&self) -> Result<RegistryMetadata, StoreError> {
        Ok(self.read()?.metadata)
    }

    /// Add a registration, replacing any existing record with the same ID,
    /// then recompute and cache centrality.
    ///
    /// The record is stamped with the current time.
    ///
    /// # Errors
    ///
    /// Lock, I/O or encoding failures while writing.
    #[instrument(skip(self, record, provider), fields(student = %record.id))]
    pub fn add_student(
        &self,
        record: StudentRecord,
        provider: &impl CentralityProvider,
    ) -> Result<(), StoreError> {
        self.update(
            |data| {
                let replaced = data.students.iter().any(|s| s.id == record.id);
                data.students.retain(|s| s.id != record.id);
                data.students.push(record.registered(Utc::now()));

                if replaced {
                    info!("replaced existing registration");
                } else {
                    info!("added registration");
                }
                true
            },
            provider,
        )
        .map(|_| ())
    }

    /// Remove a registration and recompute centrality.
    ///
    /// Returns `false` (and leaves the file untouched) when no record has
    /// this ID.
    ///
    /// # Errors
    ///
    /// Lock, I/O or encoding failures while writing.
    #[instrument(skip(self, provider))]
    pub fn remove_student(
        &self,
        student_id: &str,
        provider: &impl CentralityProvider,
    ) -> Result<bool, StoreError> {
        self.update(
            |data| {
                let before = data.students.len();
                data.students.retain(|s| s.id != student_id);
                let removed = data.students.len() < before;
                if removed {
                    info!("removed registration");
                } else {
                    debug!("no registration to remove");
                }
                removed
            },
            provider,
        )
    }

    /// Recompute the cache for the current records and write it back.
    ///
    /// # Errors
    ///
    /// Lock, I/O or encoding failures while writing.
    #[instrument(skip(self, provider))]
    pub fn refresh_cache(
        &self,
        provider: &impl CentralityProvider,
    ) -> Result<RegistryData, StoreError> {
        let _lock = RegistryWriteLock::acquire(&self.lock_file, self.lock_timeout)?;
        let mut data = self.read_unlocked();
        recompute_into(&mut data, provider);
        self.write_unlocked(&mut data)?;
        Ok(data)
    }

    /// Run one locked read-modify-write cycle.
    ///
    /// `mutate` returns whether it changed anything; nothing is written
    /// when it did not.
    fn update(
        &self,
        mutate: impl FnOnce(&mut RegistryData) -> bool,
        provider: &impl CentralityProvider,
    ) -> Result<bool, StoreError> {
        let _lock = RegistryWriteLock::acquire(&self.lock_file, self.lock_timeout)?;
        let mut data = self.read_unlocked();

        if !mutate(&mut data) {
            return Ok(false);
        }

        data.metadata.total_registrations = data.students.len();
        recompute_into(&mut data, provider);
        self.write_unlocked(&mut data)?;
        Ok(true)
    }

    fn read_unlocked(&self) -> RegistryData {
        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return RegistryData::empty(),
            Err(err) => {
                warn!(error = %err, "registry unreadable, starting empty");
                return RegistryData::empty();
            }
        };

        match serde_json::from_str::<RegistryData>(&content) {
            Ok(data) => data,
            Err(err) => {
                warn!(
                    code = ErrorCode::CorruptRegistry.code(),
                    error = %err,
                    "registry unparsable, starting empty"
                );
                RegistryData::empty()
            }
        }
    }

    fn write_unlocked(&self, data: &mut RegistryData) -> Result<(), StoreError> {
        data.metadata.last_updated = Utc::now();

        let io_err = |source: io::Error| StoreError::Io {
            path: self.data_file.clone(),
            source,
        };

        if let Some(parent) = self.data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let encoded = serde_json::to_vec_pretty(data)?;

        let mut tmp_name = self.data_file.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = fs::File::create(&tmp_path).map_err(io_err)?;
        file.write_all(&encoded).map_err(io_err)?;
        file.write_all(b"\n").map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&tmp_path, &self.data_file).map_err(io_err)?;
        debug!(bytes = encoded.len(), "registry written");
        Ok(())
    }
}

fn recompute_into(data: &mut RegistryData, provider: &impl CentralityProvider) {
    data.cached_centrality = if data.students.is_empty() {
        CachedCentrality::default()
    } else {
        provider.recompute(&data.students)
    };
    data.metadata.cache_key = Some(cache_key(&data.students, &provider.settings_fingerprint()));
}
