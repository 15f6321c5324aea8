/*! Train/validation splitting.

Splits the tokenized training stream by 1-based line number: every
[VAL_STRIDE]th line goes to validation, everything else to training.
The rule is purely positional, so applying it to both language files of
an aligned pair keeps them aligned, provided both have the same line
count. That precondition is checked here before the unsplit inputs are
deleted.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::lang::LanguagePair;
use crate::layout::{SaveDir, Split};

/// Every 1333rd line of the training stream becomes validation data.
pub const VAL_STRIDE: usize = 1333;

/// Line counts produced by one [split_file] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitCounts {
    pub train: usize,
    pub val: usize,
}

impl SplitCounts {
    pub fn total(&self) -> usize {
        self.train + self.val
    }
}

/// Split `src` by 1-based line number: lines whose number is a multiple
/// of `stride` go to `val_dest`, all others to `train_dest`.
pub fn split_file(
    src: &Path,
    train_dest: &Path,
    val_dest: &Path,
    stride: usize,
) -> Result<SplitCounts, Error> {
    if stride == 0 {
        return Err(Error::Custom("split stride must be positive".to_string()));
    }

    let reader = BufReader::new(File::open(src)?);
    let mut train = BufWriter::new(File::create(train_dest)?);
    let mut val = BufWriter::new(File::create(val_dest)?);
    let mut counts = SplitCounts::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if (idx + 1) % stride == 0 {
            writeln!(val, "{}", line)?;
            counts.val += 1;
        } else {
            writeln!(train, "{}", line)?;
            counts.train += 1;
        }
    }
    train.flush()?;
    val.flush()?;
    Ok(counts)
}

fn split_side(save: &SaveDir, pair: &LanguagePair, lang: &str) -> Result<SplitCounts, Error> {
    let unsplit = save.unsplit_file(pair, lang);
    info!("[{}] splitting {}", lang, unsplit.display());

    let counts = split_file(
        &unsplit,
        &save.processed_file(Split::Train, pair, lang),
        &save.processed_file(Split::Val, pair, lang),
        VAL_STRIDE,
    )?;
    info!(
        "[{}] {} train lines, {} val lines",
        lang, counts.train, counts.val
    );
    Ok(counts)
}

/// Split both language sides of the tokenized training data, verify they
/// stayed aligned, then delete the unsplit inputs.
pub fn split_train(save: &SaveDir, pair: &LanguagePair) -> Result<(), Error> {
    let src_counts = split_side(save, pair, pair.src())?;
    let tgt_counts = split_side(save, pair, pair.tgt())?;

    // refuse to delete the inputs of a corrupt split
    if src_counts.total() != tgt_counts.total() {
        return Err(Error::UnalignedPair {
            src: save.unsplit_file(pair, pair.src()),
            tgt: save.unsplit_file(pair, pair.tgt()),
            src_lines: src_counts.total(),
            tgt_lines: tgt_counts.total(),
        });
    }

    for lang in pair.langs() {
        std::fs::remove_file(save.unsplit_file(pair, lang))?;
    }
    Ok(())
}
