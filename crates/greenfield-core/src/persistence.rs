//! Snapshot persistence.
//!
//! The whole [`SimulationState`] is written as one versioned document,
//! either as bincode (compact) or as JSON (for hosts that store text, such
//! as browser storage). Both formats round-trip losslessly.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::SimulationState;

/// Version number for the snapshot format (increment when the state changes shape)
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    state: &'a SimulationState,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    state: SimulationState,
}

impl Snapshot {
    fn into_state(self) -> Result<SimulationState, SaveError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: self.version,
            });
        }
        Ok(self.state)
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

fn snapshot(state: &SimulationState) -> SnapshotRef<'_> {
    SnapshotRef {
        version: SNAPSHOT_VERSION,
        state,
    }
}

/// Write a bincode snapshot.
pub fn write_snapshot<W: Write>(writer: W, state: &SimulationState) -> Result<(), SaveError> {
    bincode::serialize_into(writer, &snapshot(state))?;
    Ok(())
}

/// Read a bincode snapshot.
pub fn read_snapshot<R: Read>(reader: R) -> Result<SimulationState, SaveError> {
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    snapshot.into_state()
}

pub fn save_snapshot(state: &SimulationState) -> Result<Vec<u8>, SaveError> {
    Ok(bincode::serialize(&snapshot(state))?)
}

pub fn load_snapshot(bytes: &[u8]) -> Result<SimulationState, SaveError> {
    read_snapshot(bytes)
}

pub fn save_snapshot_json(state: &SimulationState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&snapshot(state))?)
}

pub fn load_snapshot_json(json: &str) -> Result<SimulationState, SaveError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    snapshot.into_state()
}

pub fn save_to_file(path: impl AsRef<Path>, state: &SimulationState) -> Result<(), SaveError> {
    let file = std::fs::File::create(path)?;
    write_snapshot(std::io::BufWriter::new(file), state)
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<SimulationState, SaveError> {
    let file = std::fs::File::open(path)?;
    read_snapshot(std::io::BufReader::new(file))
}

/// Host-side storage for opaque snapshot blobs.
pub trait SnapshotStore {
    fn put(&mut self, key: &str, blob: Vec<u8>) -> Result<(), SaveError>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError>;

    fn save(&mut self, key: &str, state: &SimulationState) -> Result<(), SaveError> {
        self.put(key, save_snapshot(state)?)
    }

    fn load(&self, key: &str) -> Result<Option<SimulationState>, SaveError> {
        self.get(key)?.map(|blob| load_snapshot(&blob)).transpose()
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn put(&mut self, key: &str, blob: Vec<u8>) -> Result<(), SaveError> {
        self.blobs.insert(key.to_string(), blob);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        Ok(self.blobs.get(key).cloned())
    }
}
