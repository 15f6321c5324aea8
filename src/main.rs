//! # Shelob
//!
//! 🕸️ Shelob prepares the WMT'14 English-French release for machine
//! translation training: it fetches the raw archives, tokenizes and splits
//! the parallel text, learns and applies a BPE merge table, filters out
//! misaligned-looking pairs and optionally binarizes the result.
//!
//! This project can be used both as a tool to prepare corpora,
//! or as a lib to integrate the individual stages into other projects.
//!
//! ## Getting started
//!
//! ```sh
//! shelob 0.1.0
//! corpus preparation tool for machine translation.
//!
//! USAGE:
//!     shelob <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     clean      Filter an aligned file pair by length and ratio bounds
//!     help       Prints this message or the help of the given subcommand(s)
//!     prepare    Prepare a parallel corpus end to end
//!     split      Split files into train/val parts by line stride
//! ```
//!
use std::path::{Path, PathBuf};

use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;
mod error;
mod exec;
mod filtering;
mod lang;
mod layout;
mod logging;
mod pipelines;
mod processing;
mod recipe;
mod sources;
mod tasks;
mod tools;

use pipelines::Pipeline;

fn main() -> Result<(), error::Error> {
    let opt = cli::Shelob::from_args();

    match opt {
        cli::Shelob::Prepare(p) => {
            std::fs::create_dir_all(&p.save_dir)?;
            let save = layout::SaveDir::new(&p.save_dir);
            logging::init(Some(&save.log_file()), None)?;
            debug!("cli args\n{:#?}", p);

            let pipeline = pipelines::Prepare::from_args(&recipe::WMT14_EN_FR, p);
            pipeline.run()?;
        }

        cli::Shelob::Split(s) => {
            logging::init(None, None)?;
            debug!("cli args\n{:#?}", s);

            for file in &s.files {
                let counts = processing::split::split_file(
                    file,
                    &with_suffix(file, "train"),
                    &with_suffix(file, "val"),
                    s.stride,
                )?;
                info!(
                    "{}: {} train lines, {} val lines",
                    file.display(),
                    counts.train,
                    counts.val
                );
            }
        }

        cli::Shelob::Clean(c) => {
            logging::init(None, None)?;
            debug!("cli args\n{:#?}", c);

            let cleaner =
                processing::clean::PairCleaner::new(c.min_tokens, c.max_tokens, c.max_ratio);
            let src_out = with_lang_extension(&c.out_prefix, &c.src)?;
            let tgt_out = with_lang_extension(&c.out_prefix, &c.tgt)?;
            let stats =
                processing::clean::clean_pair(&cleaner, &c.src, &c.tgt, &src_out, &tgt_out)?;
            info!("kept {} pairs, dropped {}", stats.kept, stats.dropped);
        }
    };
    Ok(())
}

/// `file` with an extra `.suffix` appended to its name.
fn with_suffix(file: &Path, suffix: &str) -> PathBuf {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file.with_file_name(format!("{}.{}", name, suffix))
}

/// `prefix` extended with the language extension of `input`, following the
/// usual `prefix.lang` output convention of corpus cleaners.
fn with_lang_extension(prefix: &Path, input: &Path) -> Result<PathBuf, error::Error> {
    let ext = input.extension().and_then(|e| e.to_str()).ok_or_else(|| {
        error::Error::Custom(format!(
            "cannot derive a language extension from {}",
            input.display()
        ))
    })?;
    let mut name = prefix.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    Ok(PathBuf::from(name))
}
