use crate::error::ErrorCode;
use fs2::FileExt;
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

/// Advisory lock errors for the registry lock file.
#[derive(Debug)]
pub enum LockError {
    Timeout { path: PathBuf, waited: Duration },
    IoError(io::Error),
}

impl From<io::Error> for LockError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl LockError {
    /// Machine-readable code associated with this lock error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout { .. } => ErrorCode::LockContention,
            Self::IoError(_) => ErrorCode::RegistryWriteFailed,
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout { path, waited } => {
                write!(
                    f,
                    "{}: lock timed out after {:?} at {}",
                    self.code().code(),
                    waited,
                    path.display()
                )
            }
            Self::IoError(err) => write!(f, "{}: {}", self.code().code(), err),
        }
    }
}

impl std::error::Error for LockError {}

#[derive(Clone, Copy)]
enum LockKind {
    Shared,
    Exclusive,
}

#[derive(Debug)]
struct FileGuard {
    file: File,
}

impl FileGuard {
    fn acquire(path: &Path, timeout: Duration, kind: LockKind) -> Result<Self, LockError> {
        let parent = path.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "lock path has no parent")
        })?;
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }

        let start = Instant::now();
        loop {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(path)?;

            let contended = match kind {
                LockKind::Shared => file.try_lock_shared().is_err(),
                LockKind::Exclusive => file.try_lock_exclusive().is_err(),
            };

            if !contended {
                return Ok(Self { file });
            }

            if start.elapsed() >= timeout {
                return Err(LockError::Timeout {
                    path: path.to_path_buf(),
                    waited: start.elapsed(),
                });
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// RAII guard for a shared registry read lock.
///
/// Any number of readers may hold it at once; it excludes writers.
#[derive(Debug)]
pub struct RegistryReadLock {
    _guard: FileGuard,
}

impl RegistryReadLock {
    /// Acquire a shared advisory lock on `path`, waiting up to `timeout`.
    ///
    /// # Errors
    ///
    /// [`LockError::Timeout`] if a writer holds the lock past the timeout.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, LockError> {
        Ok(Self {
            _guard: FileGuard::acquire(path, timeout, LockKind::Shared)?,
        })
    }
}

/// RAII guard held across a registry read-modify-write cycle.
#[derive(Debug)]
pub struct RegistryWriteLock {
    _guard: FileGuard,
}

impl RegistryWriteLock {
    /// Acquire an exclusive advisory lock on `path`, waiting up to `timeout`.
    ///
    /// # Errors
    ///
    /// [`LockError::Timeout`] if another holder keeps the lock past the timeout.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, LockError> {
        Ok(Self {
            _guard: FileGuard::acquire(path, timeout, LockKind::Exclusive)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{LockError, RegistryReadLock, RegistryWriteLock};
    use crate::error::ErrorCode;
    use std::{
        sync::{Arc, Barrier},
        thread,
        time::Duration,
    };
    use tempfile::TempDir;

    #[test]
    fn write_lock_is_released_on_drop() -> Result<(), LockError> {
        let dir = TempDir::new()?;
        let path = dir.path().join("registrations.json.lock");
        let lock = RegistryWriteLock::acquire(&path, Duration::from_millis(50))?;
        assert!(path.exists());
        drop(lock);

        let again = RegistryWriteLock::acquire(&path, Duration::from_millis(50))?;
        drop(again);
        Ok(())
    }

    #[test]
    fn lock_creates_missing_parent_directory() -> Result<(), LockError> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested/data/registrations.json.lock");
        let lock = RegistryReadLock::acquire(&path, Duration::from_millis(50))?;
        assert!(path.exists());
        drop(lock);
        Ok(())
    }

    #[test]
    fn readers_share_the_lock() -> Result<(), LockError> {
        let dir = TempDir::new()?;
        let path = dir.path().join("shared.lock");
        let first = RegistryReadLock::acquire(&path, Duration::from_millis(50))?;
        let second = RegistryReadLock::acquire(&path, Duration::from_millis(50))?;
        drop(first);
        drop(second);
        Ok(())
    }

    #[test]
    fn second_writer_times_out_while_first_holds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contended.lock");
        let barrier = Arc::new(Barrier::new(2));

        let holder_path = path.clone();
        let holder_barrier = Arc::clone(&barrier);
        let holder = thread::spawn(move || {
            let lock =
                RegistryWriteLock::acquire(&holder_path, Duration::from_millis(200)).unwrap();
            holder_barrier.wait();
            thread::sleep(Duration::from_millis(200));
            drop(lock);
        });

        barrier.wait();
        let err = RegistryWriteLock::acquire(&path, Duration::from_millis(30)).unwrap_err();
        assert!(matches!(err, LockError::Timeout { .. }));
        assert_eq!(err.code(), ErrorCode::LockContention);
        assert!(err.to_string().starts_with("E5002"));
        assert!(err.hint().is_some());

        holder.join().unwrap();
    }

    #[test]
    fn reader_waits_out_writer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rw.lock");
        let writer = RegistryWriteLock::acquire(&path, Duration::from_millis(50)).unwrap();

        let err = RegistryReadLock::acquire(&path, Duration::from_millis(30)).unwrap_err();
        assert!(matches!(err, LockError::Timeout { .. }));

        drop(writer);
        let reader = RegistryReadLock::acquire(&path, Duration::from_millis(50)).unwrap();
        drop(reader);
    }
}
