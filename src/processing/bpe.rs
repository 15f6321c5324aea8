/*! BPE learning and application.

The merge table is learned once, from both training sides concatenated
into a single file, then applied to every produced file. Applications
are independent of each other (one input file, one output file, the
shared merge table is read-only), so they fan out across a thread pool.
!*/
use std::fs::File;
use std::io;
use std::path::PathBuf;

use itertools::Itertools;
use log::info;
use rayon::prelude::*;

use crate::error::Error;
use crate::lang::LanguagePair;
use crate::layout::{SaveDir, Split};
use crate::tools::SubwordNmt;

/// Concatenate both training sides and learn `merge_ops` BPE merge
/// operations from the result.
pub fn learn(
    subword: &SubwordNmt,
    save: &SaveDir,
    pair: &LanguagePair,
    merge_ops: usize,
) -> Result<(), Error> {
    let merged = save.merged_file(pair);
    info!("merging both training sides into {}", merged.display());
    let mut out = File::create(&merged)?;
    for lang in pair.langs() {
        let mut side = File::open(save.processed_file(Split::Train, pair, lang))?;
        io::copy(&mut side, &mut out)?;
    }

    let code = save.code_file();
    info!(
        "learning {} BPE merge operations into {}",
        merge_ops,
        code.display()
    );
    subword
        .learn_bpe(merge_ops)
        .stdin_from(&merged)
        .stdout_to(&code)
        .run()
}

/// Input/output pairs of the application fan-out: every split, both
/// languages.
fn apply_jobs(save: &SaveDir, pair: &LanguagePair) -> Vec<(PathBuf, PathBuf)> {
    Split::ALL
        .iter()
        .cartesian_product(pair.langs())
        .map(|(split, lang)| {
            (
                save.processed_file(*split, pair, lang),
                save.bpe_file(*split, pair, lang),
            )
        })
        .collect()
}

/// Apply the learned merge table to every produced file, in parallel.
pub fn apply_all(subword: &SubwordNmt, save: &SaveDir, pair: &LanguagePair) -> Result<(), Error> {
    let code = save.code_file();
    apply_jobs(save, pair)
        .par_iter()
        .map(|(input, output)| {
            info!("applying BPE to {}", input.display());
            subword
                .apply_bpe(&code)
                .stdin_from(input)
                .stdout_to(output)
                .run()
        })
        .collect::<Result<(), Error>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn six_application_jobs() {
        let save = SaveDir::new(Path::new("save"));
        let pair = LanguagePair::new("en", "fr");
        let jobs = apply_jobs(&save, &pair);

        assert_eq!(jobs.len(), 6);
        assert!(jobs.contains(&(
            PathBuf::from("save/processed/train.processed.en-fr.en"),
            PathBuf::from("save/processed/bpe.train.processed.en-fr.en"),
        )));
        assert!(jobs.contains(&(
            PathBuf::from("save/processed/test.en-fr.fr"),
            PathBuf::from("save/processed/bpe.test.en-fr.fr"),
        )));
    }
}
