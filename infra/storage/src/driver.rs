//! The store driver: the operation surface over the directory tree.
//!
//! Layout on disk is `<root>/<collection>/<resource>.<suffix>`. Writes and
//! deletes take the collection's lock from the [`LockRegistry`]; reads never
//! lock and rely on rename atomicity instead.

use crate::builder::{DriverBuilder, Options};
use crate::codec::{Codec, JsonCodec};
use crate::error::{StoreError, StoreErrorExt};
use crate::logger::Logger;
use crate::name::{CollectionName, ResourceName};
use crate::registry::LockRegistry;
use crate::resolver;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// The internal shared state of a [`Driver`].
#[derive(Debug)]
pub struct DriverInner<C: Codec> {
    /// Lexically cleaned root directory; fixed for the driver's lifetime.
    pub(crate) root: PathBuf,
    pub(crate) codec: C,
    /// One lock per collection, never shrinks.
    pub(crate) locks: LockRegistry,
    pub(crate) log: Arc<dyn Logger>,
    /// Whether writes `fsync` the temp file and its directory.
    pub(crate) durable: bool,
}

/// A thread-safe handle to a filesystem document store.
///
/// Collections are directories below the root, resources are files holding
/// one encoded record followed by a newline. The handle is reference-counted;
/// clones share the same lock registry.
///
/// # Concurrency
///
/// * `write` and `delete` on the same collection are serialized.
/// * Operations on different collections never wait on each other.
/// * `read`/`read_all` take no lock. They observe either the previous or the
///   new content of a file being replaced, never a mix, but may miss a write
///   that has not been renamed into place yet.
///
/// Locking is in-process only. Two processes sharing a root directory are
/// not coordinated and can corrupt each other's writes.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use shelf_store::{Driver, StoreError};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u8,
/// }
///
/// # fn main() -> Result<(), StoreError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// # let root = tmp.path().join("data");
/// let db = Driver::builder().root(&root).open()?;
///
/// let john = User { name: "John".into(), age: 23 };
/// db.write("users", "john", &john)?;
///
/// let back: User = db.read("users", "john")?;
/// assert_eq!(back, john);
/// assert_eq!(db.read_all("users")?.len(), 1);
///
/// db.delete("users", "")?;
/// assert!(db.read_all("users").unwrap_err().is_not_found());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Driver<C: Codec = JsonCodec> {
    inner: Arc<DriverInner<C>>,
}

impl<C: Codec> Clone for Driver<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C: Codec> Deref for Driver<C> {
    type Target = DriverInner<C>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Driver {
    #[must_use = "The driver is not opened until you call .root(..).open()"]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Opens a JSON store rooted at `dir`.
    ///
    /// Without a logger in `options` the driver logs through
    /// [`TracingLogger`](crate::TracingLogger) at `info`.
    ///
    /// # Errors
    ///
    /// Currently infallible for this configuration; the `Result` mirrors
    /// [`DriverBuilder::open`].
    pub fn new(dir: impl Into<PathBuf>, options: Option<Options>) -> Result<Self, StoreError> {
        let options = options.unwrap_or_default();
        let builder = Self::builder().root(dir);
        match options.logger {
            Some(logger) => builder.logger(logger).open(),
            None => builder.open(),
        }
    }
}

impl<C: Codec> Driver<C> {
    pub(crate) fn from_inner(inner: DriverInner<C>) -> Self {
        Self { inner: Arc::new(inner) }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Writes `value` as resource `resource` of `collection`, replacing any previous record.
    ///
    /// The encoded bytes (plus a trailing newline) go to `<resource>.<suffix>.tmp`
    /// first and are then renamed onto `<resource>.<suffix>`, so readers see
    /// either the old or the new record. The collection directory is created
    /// on demand.
    ///
    /// # Errors
    ///
    /// * [`StoreError::MissingCollection`] / [`StoreError::MissingResource`] for empty names.
    /// * [`StoreError::InvalidName`] for names that are not a single path segment.
    /// * [`StoreError::Serialization`] if the codec rejects the value.
    /// * [`StoreError::Io`] for filesystem failures.
    pub fn write<T>(&self, collection: &str, resource: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let collection = CollectionName::try_from(collection)?;
        let resource = ResourceName::try_from(resource)?;

        let mut bytes = self
            .codec
            .encode(value)
            .context(format!("Failed to encode '{collection}/{resource}'"))?;
        bytes.push(b'\n');

        let lock = self.locks.get_or_create(collection.as_str());
        let _guard = lock.lock();

        let dir = self.root.join(&collection);
        create_dir_all(&dir).context(format!("Failed to create collection: {}", dir.display()))?;

        let target = resolver::canonical(&dir, &resource, self.codec.extension());
        let temp = resolver::temp_path(&target);

        if let Err(err) = self.commit(&temp, &target, &bytes) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    self.log.warn(format_args!(
                        "Failed to remove temp file '{}': {cleanup}",
                        temp.display()
                    ));
                }
            }
            self.log.error(format_args!("Write of '{collection}/{resource}' failed: {err}"));
            return Err(err);
        }

        self.log.debug(format_args!("Saved '{}'", target.display()));
        Ok(())
    }

    /// Reads and decodes resource `resource` of `collection`.
    ///
    /// `resource` may be given with or without the storage suffix.
    ///
    /// # Errors
    ///
    /// * [`StoreError::MissingCollection`] / [`StoreError::MissingResource`] for empty names.
    /// * [`StoreError::InvalidName`] for names that are not a single path segment.
    /// * [`StoreError::NotFound`] if the record does not exist.
    /// * [`StoreError::Serialization`] if the content cannot be decoded.
    /// * [`StoreError::Io`] for filesystem failures.
    pub fn read<T>(&self, collection: &str, resource: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let collection = CollectionName::try_from(collection)?;
        let resource = ResourceName::try_from(resource)?;

        let record = resolver::resolve(
            self.root.join(&collection).join(&resource),
            self.codec.extension(),
        )?;

        let bytes = fs::read(&record)
            .map_err(|e| vanished_or_io(e, &record, format!("Read failed: {}", record.display())))?;
        self.codec.decode(&bytes).context(format!("Failed to decode {}", record.display()))
    }

    /// Returns the raw encoded content of every record in `collection`.
    ///
    /// The order follows the directory listing and is unspecified. Temp files
    /// and sub-directories are skipped. The first unreadable record aborts the
    /// whole call; a partial collection is never returned.
    ///
    /// # Errors
    ///
    /// * [`StoreError::MissingCollection`] / [`StoreError::InvalidName`] for a bad name.
    /// * [`StoreError::NotFound`] if the collection does not exist.
    /// * [`StoreError::Io`] if the directory or any record cannot be read.
    pub fn read_all(&self, collection: &str) -> Result<Vec<Vec<u8>>, StoreError> {
        let collection = CollectionName::try_from(collection)?;
        let dir = resolver::resolve(self.root.join(&collection), self.codec.extension())?;

        let entries = fs::read_dir(&dir).map_err(|e| {
            vanished_or_io(e, &dir, format!("Failed to list collection: {}", dir.display()))
        })?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.context(format!("Failed to list collection: {}", dir.display()))?;
            let path = entry.path();
            if resolver::is_temp(&path) {
                continue;
            }

            // Entries that vanish after the listing were removed by a committed delete.
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(err).context(format!("Failed to inspect record: {}", path.display()));
                },
            };
            if !file_type.is_file() {
                continue;
            }

            match fs::read(&path) {
                Ok(bytes) => records.push(bytes),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {},
                Err(err) => return Err(err).context(format!("Read failed: {}", path.display())),
            }
        }

        self.log.trace(format_args!(
            "Loaded {} record(s) from '{}'",
            records.len(),
            dir.display()
        ));
        Ok(records)
    }

    /// Reads every record of `collection` and decodes each one with the driver's codec.
    ///
    /// # Errors
    ///
    /// Everything [`Driver::read_all`] returns, plus [`StoreError::Serialization`]
    /// for the first record that fails to decode.
    pub fn read_all_as<T>(&self, collection: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.read_all(collection)?
            .iter()
            .map(|bytes| {
                self.codec.decode(bytes).context(format!("Failed to decode a '{collection}' record"))
            })
            .collect()
    }

    /// Deletes one resource, or the whole collection when `resource` is empty.
    ///
    /// With an empty `resource` the collection directory is removed
    /// recursively, records included. Otherwise only the record
    /// `<resource>.<suffix>` is removed, so `delete("users", "john.json")`
    /// targets the record named `john.json`, never `john`. A sub-directory
    /// named exactly `resource` is removed recursively.
    ///
    /// # Errors
    ///
    /// * [`StoreError::MissingCollection`] / [`StoreError::InvalidName`] for bad names.
    /// * [`StoreError::NotFound`] if nothing matches.
    /// * [`StoreError::Io`] if removal fails.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<(), StoreError> {
        let collection = CollectionName::try_from(collection)?;
        let resource =
            if resource.is_empty() { None } else { Some(ResourceName::try_from(resource)?) };

        let lock = self.locks.get_or_create(collection.as_str());
        let _guard = lock.lock();

        let dir = self.root.join(&collection);
        let target = match resource {
            None => resolver::resolve(&dir, self.codec.extension())?,
            Some(resource) => {
                let nested = dir.join(&resource);
                if nested.is_dir() {
                    nested
                } else {
                    resolver::canonical(&dir, &resource, self.codec.extension())
                }
            },
        };
        remove_path(&target)?;

        self.log.debug(format_args!("Deleted '{}'", target.display()));
        Ok(())
    }

    /// Whether the record (or, with an empty `resource`, the collection) exists.
    ///
    /// # Errors
    ///
    /// Only name validation errors are returned.
    pub fn exists(&self, collection: &str, resource: &str) -> Result<bool, StoreError> {
        let collection = CollectionName::try_from(collection)?;
        let path = if resource.is_empty() {
            self.root.join(&collection)
        } else {
            self.root.join(&collection).join(ResourceName::try_from(resource)?)
        };

        Ok(resolver::resolve(path, self.codec.extension()).is_ok())
    }

    /// Names of all collection directories below the root, in no particular order.
    ///
    /// Returns an empty list while the root has not been created yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the root cannot be listed.
    pub fn collections(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry
                .map_err(io::Error::from)
                .context(format!("Failed to list store root: {}", self.root.display()))?;
            if entry.file_type().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn commit(&self, temp: &Path, target: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        {
            let mut file = create_file(temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(bytes).context(format!("Write failed: {}", temp.display()))?;
            if self.durable {
                file.sync_all().context("Hardware sync failed")?;
            }
        }

        fs::rename(temp, target).context(format!(
            "Atomic swap failed: {} -> {}",
            temp.display(),
            target.display()
        ))?;

        if self.durable {
            if let Some(parent) = target.parent() {
                self.sync_dir(parent);
            }
        }
        Ok(())
    }

    fn sync_dir(&self, path: &Path) {
        match File::open(path).and_then(|dir| dir.sync_all()) {
            Ok(()) => {},
            Err(err) => {
                self.log.warn(format_args!("Directory sync failed for '{}': {err}", path.display()));
            },
        }
    }
}

/// Reports a path that disappeared as [`StoreError::NotFound`], anything else as I/O failure.
fn vanished_or_io(err: io::Error, path: &Path, context: String) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound { path: path.display().to_string().into(), context: None }
    } else {
        StoreError::Io { source: err, context: Some(context.into()) }
    }
}

fn remove_path(path: &Path) -> Result<(), StoreError> {
    let removed = if path.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };
    removed.map_err(|e| vanished_or_io(e, path, format!("Failed to delete: {}", path.display())))
}

/// Idempotent recursive directory creation (`0o755` on Unix).
pub(crate) fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

/// Opens `path` for writing, truncating leftovers of an earlier failed write (`0o644` on Unix).
fn create_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn open(temp: &TempDir) -> Driver {
        Driver::builder().root(temp.path().join("data")).open().unwrap()
    }

    #[test]
    fn held_collection_lock_does_not_block_other_collections() {
        let temp = TempDir::new().unwrap();
        let db = open(&temp);

        let users = db.locks.get_or_create("users");
        let _held = users.lock();

        let (tx, rx) = mpsc::channel();
        let writer = db.clone();
        thread::spawn(move || {
            let _ = tx.send(writer.write("orders", "o-1", &42_u32));
        });

        let outcome = rx.recv_timeout(Duration::from_secs(5)).expect("write to orders blocked");
        assert!(outcome.is_ok());
    }

    #[test]
    fn held_collection_lock_blocks_writes_to_that_collection() {
        let temp = TempDir::new().unwrap();
        let db = open(&temp);

        let users = db.locks.get_or_create("users");
        let held = users.lock();

        let (tx, rx) = mpsc::channel();
        let writer = db.clone();
        let handle = thread::spawn(move || {
            let _ = tx.send(writer.write("users", "john", &"John"));
        });

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err(), "write must wait");
        drop(held);
        assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap().is_ok());
        handle.join().unwrap();
    }

    #[test]
    fn clones_share_one_registry() {
        let temp = TempDir::new().unwrap();
        let db = open(&temp);
        let clone = db.clone();

        db.write("users", "john", &1_u8).unwrap();
        clone.write("users", "sarah", &2_u8).unwrap();

        assert_eq!(db.locks.len(), 1);
        assert!(Arc::ptr_eq(&db.locks.get_or_create("users"), &clone.locks.get_or_create("users")));
    }

    #[test]
    fn failed_encode_leaves_no_trace() {
        use serde::ser::Error as _;

        struct Unencodable;
        impl Serialize for Unencodable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(S::Error::custom("refusing to encode"))
            }
        }

        let temp = TempDir::new().unwrap();
        let db = open(&temp);

        let err = db.write("users", "ghost", &Unencodable).unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }), "unexpected: {err:?}");
        assert!(!db.root().join("users").exists());
    }

    #[test]
    fn stale_temp_file_is_overwritten_by_next_write() {
        let temp = TempDir::new().unwrap();
        let db = open(&temp);
        let dir = db.root().join("users");
        create_dir_all(&dir).unwrap();
        fs::write(dir.join("john.json.tmp"), b"garbage from a crashed write").unwrap();

        db.write("users", "john", &"John").unwrap();

        assert!(!dir.join("john.json.tmp").exists());
        assert_eq!(fs::read_to_string(dir.join("john.json")).unwrap(), "\"John\"\n");
    }

    #[cfg(unix)]
    #[test]
    fn created_entries_use_expected_modes() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let db = open(&temp);
        db.write("users", "john", &"John").unwrap();

        let dir_mode = fs::metadata(db.root().join("users")).unwrap().permissions().mode();
        let file_mode =
            fs::metadata(db.root().join("users/john.json")).unwrap().permissions().mode();

        // The process umask can only remove bits.
        assert_eq!(dir_mode & 0o777 & !DIR_MODE, 0);
        assert_eq!(file_mode & 0o777 & !FILE_MODE, 0);
    }
}
