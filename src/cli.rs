//! Command line arguments and parameters management/parsing.
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use structopt::StructOpt;

use crate::error::Error;

#[derive(Debug, StructOpt)]
#[structopt(name = "shelob", about = "corpus preparation tool for machine translation.")]
/// Holds every command that is callable by the `shelob` command.
pub enum Shelob {
    #[structopt(about = "Prepare a parallel corpus end to end")]
    Prepare(Prepare),
    #[structopt(about = "Split files into train/val parts by line stride")]
    Split(SplitCmd),
    #[structopt(about = "Filter an aligned file pair by length and ratio bounds")]
    Clean(CleanCmd),
}

#[derive(Debug, StructOpt)]
/// Prepare command and parameters.
///
/// ```sh
/// shelob-prepare 0.1.0
/// Prepare a parallel corpus end to end
///
/// USAGE:
///     shelob prepare [FLAGS] [OPTIONS] --bpe-tokens <bpe-tokens> --save-dir <save-dir>
///
/// FLAGS:
///         --binarize    binarize the cleaned corpus with fairseq-preprocess
///         --force       rerun every stage, ignoring recorded progress
///     -h, --help        Prints help information
///     -V, --version     Prints version information
///
/// OPTIONS:
///     -b, --bpe-tokens <bpe-tokens>      number of BPE merge operations to learn
///     -m, --moses-path <moses-path>      path to the mosesdecoder/scripts directory
///     -o, --orig-dir <orig-dir>          path to already extracted original data
///         --overwrite <overwrite>        always, never or ask [default: ask]
///     -d, --save-dir <save-dir>          directory receiving all produced data
///     -s, --subword-nmt <subword-nmt>    path to the subword-nmt/subword_nmt directory
/// ```
pub struct Prepare {
    #[structopt(
        parse(from_os_str),
        short = "m",
        long = "moses-path",
        help = "path to the mosesdecoder/scripts directory. Cloned from GitHub into the current working directory if not specified."
    )]
    pub moses_path: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        short = "s",
        long = "subword-nmt",
        help = "path to the subword-nmt/subword_nmt directory. Cloned from GitHub into the current working directory if not specified."
    )]
    pub subword_nmt: Option<PathBuf>,
    #[structopt(
        short = "b",
        long = "bpe-tokens",
        help = "number of BPE merge operations to learn from the training data"
    )]
    pub bpe_tokens: usize,
    #[structopt(
        long = "binarize",
        help = "binarize the cleaned corpus with fairseq-preprocess"
    )]
    pub binarize: bool,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "orig-dir",
        help = "path to already extracted original data, searched recursively. Downloaded into <save-dir>/orig if not specified."
    )]
    pub orig_dir: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        short = "d",
        long = "save-dir",
        help = "directory receiving original as well as processed data"
    )]
    pub save_dir: PathBuf,
    #[structopt(
        long = "overwrite",
        default_value = "ask",
        help = "what to do when a tokenized destination file already exists: always, never or ask"
    )]
    pub overwrite: OverwritePolicy,
    #[structopt(long = "force", help = "rerun every stage, ignoring recorded progress")]
    pub force: bool,
}

#[derive(Debug, StructOpt)]
/// Split command and parameters.
pub struct SplitCmd {
    #[structopt(
        parse(from_os_str),
        required = true,
        help = "files to split, each producing .train/.val siblings"
    )]
    pub files: Vec<PathBuf>,
    #[structopt(
        long = "stride",
        default_value = "1333",
        help = "1-based line stride: every stride-th line goes to the val part"
    )]
    pub stride: usize,
}

#[derive(Debug, StructOpt)]
/// Clean command and parameters.
pub struct CleanCmd {
    #[structopt(parse(from_os_str), help = "source-language input file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "target-language input file")]
    pub tgt: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "output prefix, input file extensions are appended"
    )]
    pub out_prefix: PathBuf,
    #[structopt(
        long = "min-tokens",
        default_value = "1",
        help = "minimum token count per side"
    )]
    pub min_tokens: usize,
    #[structopt(
        long = "max-tokens",
        default_value = "250",
        help = "maximum token count per side"
    )]
    pub max_tokens: usize,
    #[structopt(
        long = "max-ratio",
        default_value = "1.5",
        help = "maximum cross-lingual token ratio"
    )]
    pub max_ratio: f64,
}

/// What to do when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Always,
    Never,
    Ask,
}

impl OverwritePolicy {
    /// Whether `path` may be deleted and rebuilt. [OverwritePolicy::Ask]
    /// prompts on the terminal until it gets a y/n answer.
    pub fn allows_overwrite(&self, path: &Path) -> Result<bool, Error> {
        match self {
            OverwritePolicy::Always => Ok(true),
            OverwritePolicy::Never => Ok(false),
            OverwritePolicy::Ask => Self::prompt(path),
        }
    }

    fn prompt(path: &Path) -> Result<bool, Error> {
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            eprint!("File existed: {}. Overwrite? (y/n) ", path.display());
            std::io::stderr().flush()?;
            match lines.next() {
                Some(line) => match line?.trim() {
                    "y" => return Ok(true),
                    "n" => return Ok(false),
                    _ => eprintln!("Wrong input!"),
                },
                None => {
                    return Err(Error::Custom(
                        "stdin closed while waiting for an overwrite answer".to_string(),
                    ))
                }
            }
        }
    }
}

impl FromStr for OverwritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(OverwritePolicy::Always),
            "never" => Ok(OverwritePolicy::Never),
            "ask" => Ok(OverwritePolicy::Ask),
            other => Err(format!(
                "invalid overwrite policy {:?}, expected always, never or ask",
                other
            )),
        }
    }
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverwritePolicy::Always => "always",
            OverwritePolicy::Never => "never",
            OverwritePolicy::Ask => "ask",
        })
    }
}
