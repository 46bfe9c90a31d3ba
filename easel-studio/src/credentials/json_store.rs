//! JSON file-backed credential store
//!
//! The registry lives in a single JSON document (default
//! `<data_dir>/easel/users.json`). Every operation reads the whole document;
//! every mutation rewrites it through a temporary sibling file and an atomic
//! rename, so readers never observe a half-written registry.
//!
//! Writers are serialized twice over: an in-process mutex, and an exclusive
//! advisory lock on `<file>.lock` held across the read-modify-write so two
//! processes registering at once cannot lose each other's account.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use fs2::FileExt;

use super::{CredentialStore, HashMode, Registry};
use crate::constants::{APP_DIR_NAME, USERS_FILE_NAME};
use crate::error::AuthError;

/// File permissions for the registry on Unix (owner read/write only)
#[cfg(unix)]
const REGISTRY_FILE_MODE: u32 = 0o600;

/// Credential store persisted as a JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    /// Registry document path
    path: PathBuf,
    /// Hash format for new accounts
    hash_mode: HashMode,
    /// Serializes writers within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`
    ///
    /// Nothing is read or created until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            hash_mode: HashMode::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Use a different hash format for new accounts
    pub fn with_hash_mode(mut self, hash_mode: HashMode) -> Self {
        self.hash_mode = hash_mode;
        self
    }

    /// Get the platform-specific default registry path
    ///
    /// Returns None if the data directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(USERS_FILE_NAME))
    }

    /// Registry document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used for atomic writes (`.users.json.tmp`)
    fn temp_path(&self) -> PathBuf {
        self.sibling(|name| format!(".{name}.tmp"))
    }

    /// Sibling path used for the writer lock (`users.json.lock`)
    fn lock_path(&self) -> PathBuf {
        self.sibling(|name| format!("{name}.lock"))
    }

    fn sibling(&self, name: impl FnOnce(&str) -> String) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| USERS_FILE_NAME.to_string());
        self.path.with_file_name(name(&file_name))
    }

    /// Create the parent directory if it doesn't exist
    fn ensure_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Write `contents` to the temp file, flush it to disk, then rename over the registry
    fn write_atomic(&self, contents: &[u8]) -> io::Result<()> {
        let temp_path = self.temp_path();
        let result = (|| {
            let mut file = create_private_file(&temp_path)?;
            file.write_all(contents)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl JsonFileStore {
    /// Read the registry for a read-modify-write
    ///
    /// Unlike `load`, a document that exists but cannot be read is an error,
    /// so the rewrite that follows never replaces accounts it did not see.
    /// A missing, blank, or malformed document still reads as empty.
    fn load_for_update(&self) -> Result<Registry, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(self.parse(&contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Registry::new()),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "registry unreadable, refusing to rewrite");
                Err(AuthError::Io(e))
            }
        }
    }

    fn parse(&self, contents: &str) -> Registry {
        if contents.trim().is_empty() {
            return Registry::new();
        }

        serde_json::from_str(contents).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "registry malformed, treating as empty");
            Registry::new()
        })
    }
}

impl CredentialStore for JsonFileStore {
    fn load(&self) -> Registry {
        match fs::read_to_string(&self.path) {
            Ok(contents) => self.parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Registry::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "registry unreadable, treating as empty");
                Registry::new()
            }
        }
    }

    fn save(&self, registry: &Registry) -> Result<(), AuthError> {
        self.ensure_parent()?;
        let json = serde_json::to_string_pretty(registry)?;
        self.write_atomic(json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), accounts = registry.len(), "registry saved");
        Ok(())
    }

    fn register(&self, identity: &str, secret: &str) -> Result<(), AuthError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.ensure_parent()?;
        let _file_lock = RegistryLock::acquire(&self.lock_path())?;

        let mut registry = self.load_for_update()?;
        registry.register(identity, secret, self.hash_mode)?;
        self.save(&registry).inspect_err(|e| {
            tracing::error!(identity, error = %e, "failed to persist new account");
        })?;

        tracing::info!(identity, "account registered");
        Ok(())
    }
}

/// Exclusive advisory lock on the registry's lock file, released on drop
struct RegistryLock {
    file: File,
}

impl RegistryLock {
    fn acquire(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for RegistryLock {
    fn drop(&mut self) {
        // The lock file itself stays; removing it would race a waiting writer
        let _ = FileExt::unlock(&self.file);
    }
}

/// Create (or truncate) a file that only the owner can read
///
/// On Unix the mode is applied at creation, so the registry is never briefly
/// world-readable.
fn create_private_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(REGISTRY_FILE_MODE);
    }

    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("users.json")).with_hash_mode(HashMode::Sha256)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        assert!(store.load().is_empty());
        assert!(matches!(
            store.authenticate("u@x.com", "secret1"),
            Err(AuthError::NotFound)
        ));
    }

    #[test]
    fn test_register_writes_document() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        store.register("u@x.com", "secret1").unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(
            json["u@x.com"]["secretHash"],
            easel_common::hash::sha256_hex("secret1")
        );
        assert!(!contents.contains("\"secret1\""));
        // Temp file is gone after the rename
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_register_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/users.json"))
            .with_hash_mode(HashMode::Sha256);

        store.register("u@x.com", "secret1").unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_malformed_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
        // Registration still works and replaces the broken document
        store.register("u@x.com", "secret1").unwrap();
        assert!(store.authenticate("u@x.com", "secret1").is_ok());
    }

    #[test]
    fn test_blank_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        fs::write(store.path(), "  \n").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_unreadable_document_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.register("alice@x.com", "secret1").unwrap();

        // Invalid UTF-8 makes the document unreadable as text
        let mut bytes = fs::read(store.path()).unwrap();
        bytes.insert(1, 0xE9);
        fs::write(store.path(), &bytes).unwrap();

        let result = store.register("bob@x.com", "secret2");

        assert!(matches!(result, Err(AuthError::Io(_))));
        assert_eq!(fs::read(store.path()).unwrap(), bytes);
        // Login still treats the unreadable document as empty
        assert!(matches!(
            store.authenticate("alice@x.com", "secret1"),
            Err(AuthError::NotFound)
        ));
    }

    #[test]
    fn test_failed_write_leaves_registry_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.register("first@x.com", "secret1").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        // A directory where the temp file should go makes the write fail
        fs::create_dir(store.temp_path()).unwrap();
        let result = store.register("second@x.com", "secret2");

        assert!(matches!(result, Err(AuthError::Io(_))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert!(!store.load().contains("second@x.com"));
    }

    #[test]
    fn test_unwritable_parent_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();
        let store =
            JsonFileStore::new(blocker.join("users.json")).with_hash_mode(HashMode::Sha256);

        assert!(matches!(
            store.register("u@x.com", "secret1"),
            Err(AuthError::Io(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_registry_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.register("u@x.com", "secret1").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, REGISTRY_FILE_MODE);
    }

    #[test]
    fn test_concurrent_registrations_are_not_lost() {
        use std::sync::Arc;
        use std::thread;

        let dir = TempDir::new().unwrap();
        let store = Arc::new(test_store(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.register(&format!("user{i}@x.com"), "secret1"))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert_eq!(store.load().len(), 8);
    }

    #[test]
    fn test_two_handles_share_the_file() {
        let dir = TempDir::new().unwrap();
        let first = test_store(&dir);
        let second = test_store(&dir);

        first.register("a@x.com", "secret1").unwrap();
        second.register("b@x.com", "secret2").unwrap();

        let registry = first.load();
        assert!(registry.contains("a@x.com"));
        assert!(registry.contains("b@x.com"));
    }
}
