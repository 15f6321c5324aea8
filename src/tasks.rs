/*! Stage bookkeeping.

Each pipeline stage is run through [Runner::stage], which records
completed stages (and the files they produced) in a `state.json` under
the save directory. A re-run after a failure skips every stage that is
recorded as complete and whose outputs still exist, instead of redoing
hours of downloading and tokenization.

The state file is advisory: deleting it, or passing `force`, reruns
everything.
!*/
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A completed stage: what it produced and when it finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRecord {
    pub outputs: Vec<PathBuf>,
    pub finished_at: String,
}

/// Recorded pipeline progress.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct State {
    stages: BTreeMap<String, StageRecord>,
}

impl State {
    /// Load recorded progress, starting empty when the file is missing
    /// or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!("ignoring corrupt state file {}: {}", path.display(), e);
                    State::default()
                }
            },
            Err(_) => State::default(),
        }
    }

    fn save(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Runs stages in order, skipping the ones already recorded as complete.
pub struct Runner {
    state: State,
    state_file: PathBuf,
}

impl Runner {
    pub fn new(state_file: &Path, force: bool) -> Self {
        let state = if force {
            info!("ignoring recorded progress, every stage will run");
            State::default()
        } else {
            State::load(state_file)
        };
        Self {
            state,
            state_file: state_file.to_path_buf(),
        }
    }

    /// Run `stage` unless it is recorded as complete and all of its
    /// recorded outputs still exist. On success the stage is recorded
    /// together with `outputs` and the state file is rewritten.
    pub fn stage<F>(&mut self, name: &str, outputs: &[PathBuf], run: F) -> Result<(), Error>
    where
        F: FnOnce() -> Result<(), Error>,
    {
        if let Some(record) = self.state.stages.get(name) {
            if record.outputs.iter().all(|path| path.exists()) {
                info!("[{}] already complete, skipping", name);
                return Ok(());
            }
            warn!(
                "[{}] recorded as complete but outputs are missing, running again",
                name
            );
        }

        info!("[{}] starting", name);
        run()?;

        self.state.stages.insert(
            name.to_string(),
            StageRecord {
                outputs: outputs.to_vec(),
                finished_at: humantime::format_rfc3339_seconds(SystemTime::now()).to_string(),
            },
        );
        self.state.save(&self.state_file)?;
        info!("[{}] done", name);
        Ok(())
    }
}
