//! Participant result log: one JSON file holding the array of participant
//! records. Persistence is best-effort by design — any load or save failure
//! degrades to an empty or unsaved log and never reaches the trial flow.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cogbat_core::{Participant, TrialRecord};
use tracing::warn;

pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored participants. Missing, unreadable or corrupt data loads
    /// as an empty list.
    pub fn load(&self) -> Vec<Participant> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "result log unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(participants) => participants,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "result log corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Store one finished participant under the next sequential id and
    /// return the record. A write failure is logged and swallowed.
    pub fn append(&self, trials: Vec<TrialRecord>) -> Participant {
        let mut participants = self.load();
        let participant = Participant {
            id: participants.len() as u32 + 1,
            trials,
        };
        participants.push(participant.clone());
        if let Err(err) = self.write(&participants) {
            warn!(path = %self.path.display(), %err, "could not save results, continuing unsaved");
        }
        participant
    }

    fn write(&self, participants: &[Participant]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, participants).map_err(io::Error::from)
    }
}
