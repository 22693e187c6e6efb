use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::StorageBackend;

/// Storage target kept as a flat JSON object in a single file.
///
/// The file is read on open and rewritten after every change. A missing
/// file behaves like an empty object.
#[derive(Debug)]
pub struct JsonFileBackend {
    entries: BTreeMap<String, String>,
    file_path: PathBuf,
}

impl JsonFileBackend {
    /// Opens the backend at `file_path`, loading any existing entries.
    ///
    /// # Returns
    ///
    /// * `io::Result<Self>` - The backend, or an IO error if the file exists
    ///   but cannot be read or parsed
    pub fn open(file_path: impl Into<PathBuf>) -> io::Result<Self> {
        let mut backend = JsonFileBackend {
            entries: BTreeMap::new(),
            file_path: file_path.into(),
        };
        backend.load()?;
        Ok(backend)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load(&mut self) -> io::Result<()> {
        match fs::read_to_string(&self.file_path) {
            Ok(contents) if contents.trim().is_empty() => Ok(()),
            Ok(contents) => {
                self.entries = serde_json::from_str(&contents)
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
                Ok(())
            }
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.file_path, contents)?;
        secure_file_permissions(&self.file_path)
    }
}

impl StorageBackend for JsonFileBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.save()
    }
}

fn secure_file_permissions(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        if perms.mode() & 0o077 != 0 {
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
