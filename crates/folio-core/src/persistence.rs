use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

pub const PREFERENCES_FILE: &str = "preferences.json";
const PREFERENCES_VERSION: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Client-local key/value storage for preferences.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store. `blocked()` models storage the host has denied.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    blocked: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocked() -> Self {
        Self {
            values: HashMap::new(),
            blocked: true,
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.blocked {
            return Err(StoreError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.blocked {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PreferenceFile {
    version: u8,
    updated_at_ms: i64,
    values: BTreeMap<String, String>,
}

/// JSON-file backed store, rewritten on every write.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    file: PreferenceFile,
}

impl FilePreferenceStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(PREFERENCES_FILE);
        let file = load_file(path.as_path())?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.file.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.file.clone();
        next.version = PREFERENCES_VERSION;
        next.updated_at_ms = chrono::Utc::now().timestamp_millis();
        next.values.insert(key.to_string(), value.to_string());
        let encoded = serde_json::to_vec_pretty(&next)?;
        write_file(self.path.as_path(), &encoded)?;
        self.file = next;
        Ok(())
    }
}

fn load_file(path: &Path) -> Result<PreferenceFile, StoreError> {
    if !path.exists() {
        return Ok(PreferenceFile::default());
    }
    let bytes = std::fs::read(path)?;
    match serde_json::from_slice::<PreferenceFile>(&bytes) {
        Ok(file) => Ok(file),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable preference file");
            Ok(PreferenceFile::default())
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}
