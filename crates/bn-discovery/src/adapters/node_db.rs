//! Node databases.
//!
//! An empty path selects an ephemeral in-memory store. Anything else is a
//! JSON file mapping hex node IDs to local sequence numbers.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::NodeId;
use crate::ports::{NodeDbError, NodeStore};

/// Open the node database at `path`.
pub fn open_node_db(path: &str) -> Result<Arc<dyn NodeStore>, NodeDbError> {
    if path.is_empty() {
        return Ok(Arc::new(MemoryNodeDb::new()));
    }
    Ok(Arc::new(FileNodeDb::open(path)?))
}

/// Ephemeral store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryNodeDb {
    seqs: Mutex<HashMap<NodeId, u64>>,
}

impl MemoryNodeDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeStore for MemoryNodeDb {
    fn local_seq(&self, id: &NodeId) -> Result<u64, NodeDbError> {
        Ok(self.seqs.lock().get(id).copied().unwrap_or(0))
    }

    fn store_local_seq(&self, id: &NodeId, seq: u64) -> Result<(), NodeDbError> {
        self.seqs.lock().insert(*id, seq);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileContents {
    #[serde(default)]
    local_seq: BTreeMap<String, u64>,
}

/// JSON-file backed store.
#[derive(Debug)]
pub struct FileNodeDb {
    path: PathBuf,
    contents: Mutex<FileContents>,
}

impl FileNodeDb {
    /// Open or create the database file. Parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NodeDbError> {
        let path = path.as_ref().to_path_buf();
        let contents = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => FileContents::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                FileContents::default()
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = contents.local_seq.len(), "Opened node database");

        Ok(Self {
            path,
            contents: Mutex::new(contents),
        })
    }

    fn flush(&self, contents: &FileContents) -> Result<(), NodeDbError> {
        let json = serde_json::to_vec_pretty(contents)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl NodeStore for FileNodeDb {
    fn local_seq(&self, id: &NodeId) -> Result<u64, NodeDbError> {
        Ok(self
            .contents
            .lock()
            .local_seq
            .get(&id.to_string())
            .copied()
            .unwrap_or(0))
    }

    fn store_local_seq(&self, id: &NodeId, seq: u64) -> Result<(), NodeDbError> {
        let mut contents = self.contents.lock();
        contents.local_seq.insert(id.to_string(), seq);
        self.flush(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> NodeId {
        NodeId([byte; 32])
    }

    #[test]
    fn test_memory_db() {
        let db = MemoryNodeDb::new();
        assert_eq!(db.local_seq(&id(1)).unwrap(), 0);
        db.store_local_seq(&id(1), 42).unwrap();
        assert_eq!(db.local_seq(&id(1)).unwrap(), 42);
        assert_eq!(db.local_seq(&id(2)).unwrap(), 0);
    }

    #[test]
    fn test_file_db_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes").join("db.json");

        {
            let db = FileNodeDb::open(&path).unwrap();
            db.store_local_seq(&id(7), 1234).unwrap();
        }

        let db = FileNodeDb::open(&path).unwrap();
        assert_eq!(db.local_seq(&id(7)).unwrap(), 1234);
        assert_eq!(db.local_seq(&id(8)).unwrap(), 0);
    }

    #[test]
    fn test_file_db_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, b"not json").unwrap();

        assert!(matches!(
            FileNodeDb::open(&path),
            Err(NodeDbError::Corrupt(_))
        ));
    }

    #[test]
    fn test_open_node_db_empty_path_is_memory() {
        let db = open_node_db("").unwrap();
        db.store_local_seq(&id(1), 5).unwrap();
        assert_eq!(db.local_seq(&id(1)).unwrap(), 5);
    }
}
