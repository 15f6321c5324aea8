/*! External toolkit resolution.

The tokenizer scripts (Moses) and the BPE learner/applier (subword-nmt)
are not bundled. A caller either points at an existing checkout or lets
the pipeline clone the public repository into the current working
directory. Either way the resolved scripts directory is canonicalized
once, so the stage commands carry absolute paths.
!*/
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Error;
use crate::exec::Cmd;

const MOSES_REPO: &str = "https://github.com/moses-smt/mosesdecoder.git";
const SUBWORD_NMT_REPO: &str = "https://github.com/rsennrich/subword-nmt.git";

fn resolve(
    supplied: Option<&Path>,
    repo: &str,
    clone_dir: &str,
    scripts_subdir: &str,
) -> Result<PathBuf, Error> {
    if let Some(path) = supplied {
        if path.is_dir() {
            info!("scripts found at {}", path.display());
            return Ok(path.canonicalize()?);
        }
        warn!(
            "{} is not a directory, falling back to a clone",
            path.display()
        );
    }

    let clone_root = Path::new(clone_dir);
    if clone_root.is_dir() {
        info!("reusing existing clone at {}", clone_root.display());
    } else {
        info!("cloning {} into the current working directory", repo);
        Cmd::new("git").args(["clone", repo]).run()?;
    }

    let scripts = clone_root.join(scripts_subdir);
    scripts.canonicalize().map_err(|e| {
        Error::Custom(format!(
            "missing scripts directory {}: {}",
            scripts.display(),
            e
        ))
    })
}

/// Moses tokenizer toolkit.
#[derive(Debug, Clone)]
pub struct Moses {
    scripts: PathBuf,
}

impl Moses {
    /// Use the supplied `mosesdecoder/scripts` directory, or clone the
    /// repository when it is absent or invalid.
    pub fn ensure(supplied: Option<&Path>) -> Result<Self, Error> {
        Ok(Self {
            scripts: resolve(supplied, MOSES_REPO, "mosesdecoder", "scripts")?,
        })
    }

    pub fn tokenizer(&self, lang: &str, threads: usize) -> Cmd {
        Cmd::new("perl")
            .arg(self.scripts.join("tokenizer/tokenizer.perl"))
            .args(["--threads", &threads.to_string(), "-a", "-l", lang])
    }

    pub fn normalize_punctuation(&self, lang: &str) -> Cmd {
        Cmd::new("perl")
            .arg(self.scripts.join("tokenizer/normalize-punctuation.perl"))
            .arg(lang)
    }

    pub fn remove_non_printing_char(&self) -> Cmd {
        Cmd::new("perl").arg(self.scripts.join("tokenizer/remove-non-printing-char.perl"))
    }
}

/// Subword-nmt BPE toolkit.
#[derive(Debug, Clone)]
pub struct SubwordNmt {
    scripts: PathBuf,
}

impl SubwordNmt {
    /// Use the supplied `subword-nmt/subword_nmt` directory, or clone the
    /// repository when it is absent or invalid.
    pub fn ensure(supplied: Option<&Path>) -> Result<Self, Error> {
        Ok(Self {
            scripts: resolve(supplied, SUBWORD_NMT_REPO, "subword-nmt", "subword_nmt")?,
        })
    }

    pub fn learn_bpe(&self, merge_ops: usize) -> Cmd {
        Cmd::new("python")
            .arg(self.scripts.join("learn_bpe.py"))
            .args(["-s", &merge_ops.to_string()])
    }

    pub fn apply_bpe(&self, code: &Path) -> Cmd {
        Cmd::new("python")
            .arg(self.scripts.join("apply_bpe.py"))
            .arg("-c")
            .arg(code)
    }
}
