//! Key/value stores backing a [`Session`](crate::Session).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use log::*;

use crate::error::Error;

/// String key/value store.
pub trait Storage: Send {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

/// Store that lives only as long as the process. Holds the CSRF nonce, which
/// must never outlive the login attempt that created it.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// A missing file reads as an empty store. Every write rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File contents, or `None` when there is no file yet.
    fn read(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, Error> {
        match self.read()? {
            Some(contents) => Ok(parse_entries(&contents)?),
            None => Ok(BTreeMap::new()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        trace!("Wrote session store {}", self.path.display());
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    // An unreadable file holds nothing worth keeping, so removing from it
    // deletes the file instead of failing.
    fn remove(&mut self, key: &str) -> Result<(), Error> {
        let Some(contents) = self.read()? else {
            return Ok(());
        };

        match parse_entries(&contents) {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.save(&entries)?;
                }
            }
            Err(e) => {
                warn!(
                    "Discarding unreadable session store {}: {e}",
                    self.path.display()
                );
                fs::remove_file(&self.path)?;
            }
        }
        Ok(())
    }
}

fn parse_entries(contents: &str) -> Result<BTreeMap<String, String>, serde_json::Error> {
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(contents)
}
