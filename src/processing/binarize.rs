//! Binarizer hand-off.
//!
//! The cleaned file-pair prefixes are handed to `fairseq-preprocess` in
//! one invocation. The binary format is that tool's contract, nothing
//! here inspects its output.
use crate::error::Error;
use crate::exec::Cmd;
use crate::lang::LanguagePair;
use crate::layout::{SaveDir, Split};

/// Worker count handed to the external binarizer.
pub const BINARIZE_WORKERS: usize = 20;

fn binarize_cmd(save: &SaveDir, pair: &LanguagePair) -> Cmd {
    Cmd::new("fairseq-preprocess")
        .args(["--source-lang", pair.src(), "--target-lang", pair.tgt()])
        .arg("--trainpref")
        .arg(save.cleaned_prefix(Split::Train, pair))
        .arg("--validpref")
        .arg(save.cleaned_prefix(Split::Val, pair))
        .arg("--testpref")
        .arg(save.cleaned_prefix(Split::Test, pair))
        .arg("--destdir")
        .arg(save.binarized())
        .args(["--workers", &BINARIZE_WORKERS.to_string()])
}

/// Binarize the cleaned train/val/test pairs into `binarized/`.
pub fn binarize(save: &SaveDir, pair: &LanguagePair) -> Result<(), Error> {
    binarize_cmd(save, pair).run()
}
