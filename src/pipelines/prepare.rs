//! Corpus preparation pipeline
//!
//! Turns a [Recipe]'s raw archives into trainer-ready parallel data under
//! the save directory.
//!
//! # Processing
//! 1. Resolve the external toolkits (cloning them when no path is given).
//! 1. Fetch and unpack the raw archives, unless an original-data directory
//!    is supplied.
//! 1. Normalize, strip and tokenize every training corpus into one file
//!    per language, then extract and tokenize the SGML test set.
//! 1. Split training data into train/val by line stride.
//! 1. Learn one BPE merge table from both training sides, apply it to all
//!    produced files in parallel.
//! 1. Drop train/val pairs violating the length and ratio bounds, copy the
//!    test pair through verbatim.
//! 1. Optionally hand the cleaned pairs to the external binarizer.
//!
//! Each step runs through [Runner::stage], so an interrupted run resumes
//! after the last completed stage.
use std::path::PathBuf;

use log::{info, warn};

use crate::cli;
use crate::cli::OverwritePolicy;
use crate::error::Error;
use crate::layout::{SaveDir, Split};
use crate::pipelines::pipeline::Pipeline;
use crate::processing::{binarize, bpe, clean, sgml, split, tokenize};
use crate::recipe::Recipe;
use crate::sources;
use crate::tasks::Runner;
use crate::tools::{Moses, SubwordNmt};

pub struct Prepare {
    recipe: Recipe,
    moses_path: Option<PathBuf>,
    subword_nmt: Option<PathBuf>,
    bpe_tokens: usize,
    binarize: bool,
    orig_dir: Option<PathBuf>,
    save: SaveDir,
    overwrite: OverwritePolicy,
    force: bool,
}

impl Prepare {
    pub fn from_args(recipe: &Recipe, args: cli::Prepare) -> Self {
        Self {
            recipe: recipe.clone(),
            moses_path: args.moses_path,
            subword_nmt: args.subword_nmt,
            bpe_tokens: args.bpe_tokens,
            binarize: args.binarize,
            orig_dir: args.orig_dir,
            save: SaveDir::new(&args.save_dir),
            overwrite: args.overwrite,
            force: args.force,
        }
    }

    /// Original-data directory to read raw corpora from. A valid supplied
    /// directory is used as-is, otherwise everything is fetched into
    /// `orig/`.
    fn ensure_orig(&self, runner: &mut Runner) -> Result<PathBuf, Error> {
        if let Some(dir) = &self.orig_dir {
            if dir.is_dir() {
                info!("original data found at {}", dir.display());
                return Ok(dir.clone());
            }
            warn!("{} is not a directory, fetching instead", dir.display());
        }

        let orig = self.save.orig();
        runner.stage("fetch", &[orig.clone()], || {
            sources::fetch_all(&self.recipe, &orig)
        })?;
        Ok(orig)
    }
}

impl Pipeline<()> for Prepare {
    fn version() -> &'static str {
        "1.0.0"
    }

    fn run(&self) -> Result<(), Error> {
        if self.bpe_tokens == 0 {
            return Err(Error::Custom(
                "number of BPE merge operations must be positive".to_string(),
            ));
        }
        self.save.ensure_layout(self.binarize)?;

        let moses = Moses::ensure(self.moses_path.as_deref())?;
        let subword = SubwordNmt::ensure(self.subword_nmt.as_deref())?;

        let mut runner = Runner::new(&self.save.state_file(), self.force);
        let orig_dir = self.ensure_orig(&mut runner)?;

        let pair = &self.recipe.pair;

        // products are deleted again by the split stage, so completion is
        // tracked without declared outputs
        runner.stage("tokenize", &[], || {
            tokenize::tokenize_train(&moses, &self.recipe, &orig_dir, &self.save, self.overwrite)
        })?;

        let test_outputs = [
            self.save.processed_file(Split::Test, pair, pair.src()),
            self.save.processed_file(Split::Test, pair, pair.tgt()),
        ];
        runner.stage("extract-test", &test_outputs, || {
            sgml::extract_test(&moses, &self.recipe, &orig_dir, &self.save)
        })?;

        let mut split_outputs = Vec::new();
        for split in [Split::Train, Split::Val] {
            for lang in pair.langs() {
                split_outputs.push(self.save.processed_file(split, pair, lang));
            }
        }
        runner.stage("split", &split_outputs, || {
            split::split_train(&self.save, pair)
        })?;

        let learn_outputs = [self.save.merged_file(pair), self.save.code_file()];
        runner.stage("learn-bpe", &learn_outputs, || {
            bpe::learn(&subword, &self.save, pair, self.bpe_tokens)
        })?;

        let mut bpe_outputs = Vec::new();
        for split in Split::ALL {
            for lang in pair.langs() {
                bpe_outputs.push(self.save.bpe_file(split, pair, lang));
            }
        }
        runner.stage("apply-bpe", &bpe_outputs, || {
            bpe::apply_all(&subword, &self.save, pair)
        })?;

        let mut cleaned_outputs = Vec::new();
        for split in Split::ALL {
            for lang in pair.langs() {
                cleaned_outputs.push(self.save.cleaned_file(split, pair, lang));
            }
        }
        runner.stage("clean", &cleaned_outputs, || {
            clean::clean_all(&clean::PairCleaner::default(), &self.save, pair)
        })?;

        if self.binarize {
            // the binarized layout belongs to the external tool
            runner.stage("binarize", &[], || binarize::binarize(&self.save, pair))?;
        }

        info!("done");
        Ok(())
    }
}
