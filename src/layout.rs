/*! Save-directory layout and corpus file naming.

Stages communicate through files on disk only; the names encode the split,
the processing stage, the language pair tag and the language code. All of
the conventions live here so that no stage hardcodes a path.

Layout under the save directory:

```text
<save_dir>/
├── orig/        raw archives and extracted corpora
├── processed/   tokenized, split and BPE-segmented files
├── cleaned/     final filtered file pairs + the learned merge table
├── binarized/   output of the external binarizer (optional)
├── log          plain-text copy of the console log
└── state.json   completed-stage bookkeeping
```
!*/
use std::fmt;
use std::path::{Path, PathBuf};

use crate::lang::LanguagePair;

/// Corpus split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths under the save directory.
#[derive(Debug, Clone)]
pub struct SaveDir {
    root: PathBuf,
}

impl SaveDir {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn orig(&self) -> PathBuf {
        self.root.join("orig")
    }

    pub fn processed(&self) -> PathBuf {
        self.root.join("processed")
    }

    pub fn cleaned(&self) -> PathBuf {
        self.root.join("cleaned")
    }

    pub fn binarized(&self) -> PathBuf {
        self.root.join("binarized")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join("log")
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.json")
    }

    /// Create the stage directories. `binarized/` only when requested.
    pub fn ensure_layout(&self, binarize: bool) -> Result<(), std::io::Error> {
        for dir in [self.orig(), self.processed(), self.cleaned()] {
            std::fs::create_dir_all(dir)?;
        }
        if binarize {
            std::fs::create_dir_all(self.binarized())?;
        }
        Ok(())
    }

    /// Concatenated tokenized training data, before the train/val split:
    /// `processed/train.unsplit.processed.{pair}.{lang}`.
    pub fn unsplit_file(&self, pair: &LanguagePair, lang: &str) -> PathBuf {
        self.processed()
            .join(format!("train.unsplit.processed.{}.{}", pair.tag(), lang))
    }

    /// Tokenized per-split file. Test files carry no stage tag
    /// (`test.{pair}.{lang}`), train/val do (`{split}.processed.{pair}.{lang}`).
    pub fn processed_file(&self, split: Split, pair: &LanguagePair, lang: &str) -> PathBuf {
        let name = match split {
            Split::Test => format!("test.{}.{}", pair.tag(), lang),
            _ => format!("{}.processed.{}.{}", split, pair.tag(), lang),
        };
        self.processed().join(name)
    }

    /// Both training sides merged into one file for BPE learning:
    /// `processed/train.processed.{pair}`.
    pub fn merged_file(&self, pair: &LanguagePair) -> PathBuf {
        self.processed().join(format!("train.processed.{}", pair.tag()))
    }

    /// The learned BPE merge table: `cleaned/code`.
    pub fn code_file(&self) -> PathBuf {
        self.cleaned().join("code")
    }

    /// BPE-segmented sibling of [Self::processed_file].
    pub fn bpe_file(&self, split: Split, pair: &LanguagePair, lang: &str) -> PathBuf {
        bpe_sibling(&self.processed_file(split, pair, lang))
    }

    /// Final filtered file: `cleaned/{split}.{pair}.{lang}`. Processing-stage
    /// tags are dropped on purpose, only split and languages remain.
    pub fn cleaned_file(&self, split: Split, pair: &LanguagePair, lang: &str) -> PathBuf {
        self.cleaned()
            .join(format!("{}.{}.{}", split, pair.tag(), lang))
    }

    /// Pair prefix handed to the binarizer: `cleaned/{split}.{pair}`.
    pub fn cleaned_prefix(&self, split: Split, pair: &LanguagePair) -> PathBuf {
        self.cleaned().join(format!("{}.{}", split, pair.tag()))
    }
}

/// Sibling of `path` with a `bpe.` name prefix.
pub fn bpe_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("bpe.{}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save() -> SaveDir {
        SaveDir::new(Path::new("save"))
    }

    const PAIR: LanguagePair = LanguagePair::new("en", "fr");

    #[test]
    fn unsplit_name() {
        assert_eq!(
            save().unsplit_file(&PAIR, "en"),
            Path::new("save/processed/train.unsplit.processed.en-fr.en")
        );
    }

    #[test]
    fn split_names() {
        let save = save();
        assert_eq!(
            save.processed_file(Split::Train, &PAIR, "fr"),
            Path::new("save/processed/train.processed.en-fr.fr")
        );
        assert_eq!(
            save.processed_file(Split::Val, &PAIR, "en"),
            Path::new("save/processed/val.processed.en-fr.en")
        );
        // test files never carry the stage tag
        assert_eq!(
            save.processed_file(Split::Test, &PAIR, "en"),
            Path::new("save/processed/test.en-fr.en")
        );
    }

    #[test]
    fn bpe_names() {
        let save = save();
        assert_eq!(
            save.bpe_file(Split::Train, &PAIR, "en"),
            Path::new("save/processed/bpe.train.processed.en-fr.en")
        );
        assert_eq!(
            save.bpe_file(Split::Test, &PAIR, "fr"),
            Path::new("save/processed/bpe.test.en-fr.fr")
        );
    }

    #[test]
    fn cleaned_names_drop_stage_tags() {
        let save = save();
        assert_eq!(
            save.cleaned_file(Split::Train, &PAIR, "en"),
            Path::new("save/cleaned/train.en-fr.en")
        );
        assert_eq!(
            save.cleaned_prefix(Split::Val, &PAIR),
            Path::new("save/cleaned/val.en-fr")
        );
    }

    #[test]
    fn merged_and_code() {
        assert_eq!(
            save().merged_file(&PAIR),
            Path::new("save/processed/train.processed.en-fr")
        );
        assert_eq!(save().code_file(), Path::new("save/cleaned/code"));
    }
}
