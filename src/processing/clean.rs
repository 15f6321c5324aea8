/*! Pair cleaning.

Walks an aligned file pair line by line and keeps only the pairs that
pass the length and ratio filters, writing both sides synchronously so
the outputs stay aligned. Evaluation data is exempt: the test pair is
copied through verbatim, dropping a hard test sentence would make the
benchmark easier.

Input files that are not aligned to begin with are rejected before any
output is trusted.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::Error;
use crate::filtering::{Filter, Length, Ratio};
use crate::lang::LanguagePair;
use crate::layout::{SaveDir, Split};

/// Length and ratio bounds applied to every candidate pair.
#[derive(Default)]
pub struct PairCleaner {
    length: Length,
    ratio: Ratio,
}

impl PairCleaner {
    pub fn new(min_tokens: usize, max_tokens: usize, max_ratio: f64) -> Self {
        Self {
            length: Length::with_bounds(min_tokens, max_tokens),
            ratio: Ratio::with_max(max_ratio),
        }
    }

    /// Verdict for one aligned sentence pair.
    pub fn keep(&self, src: &str, tgt: &str) -> bool {
        self.length.detect(src) && self.length.detect(tgt) && self.ratio.detect((src, tgt))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CleanStats {
    pub kept: usize,
    pub dropped: usize,
}

/// Filter one aligned file pair into `src_out`/`tgt_out`.
pub fn clean_pair(
    cleaner: &PairCleaner,
    src_in: &Path,
    tgt_in: &Path,
    src_out: &Path,
    tgt_out: &Path,
) -> Result<CleanStats, Error> {
    let mut src_lines = BufReader::new(File::open(src_in)?).lines();
    let mut tgt_lines = BufReader::new(File::open(tgt_in)?).lines();
    let mut src_sink = BufWriter::new(File::create(src_out)?);
    let mut tgt_sink = BufWriter::new(File::create(tgt_out)?);

    let mut stats = CleanStats::default();
    let mut line_no = 0usize;
    loop {
        line_no += 1;
        match (src_lines.next(), tgt_lines.next()) {
            (None, None) => break,
            (Some(src), Some(tgt)) => {
                let (src, tgt) = (src?, tgt?);
                if cleaner.keep(&src, &tgt) {
                    writeln!(src_sink, "{}", src)?;
                    writeln!(tgt_sink, "{}", tgt)?;
                    stats.kept += 1;
                } else {
                    debug!("dropping pair at line {}", line_no);
                    stats.dropped += 1;
                }
            }
            (Some(_), None) => {
                return Err(Error::UnalignedPair {
                    src: src_in.to_path_buf(),
                    tgt: tgt_in.to_path_buf(),
                    src_lines: line_no + src_lines.count(),
                    tgt_lines: line_no - 1,
                });
            }
            (None, Some(_)) => {
                return Err(Error::UnalignedPair {
                    src: src_in.to_path_buf(),
                    tgt: tgt_in.to_path_buf(),
                    src_lines: line_no - 1,
                    tgt_lines: line_no + tgt_lines.count(),
                });
            }
        }
    }
    src_sink.flush()?;
    tgt_sink.flush()?;
    Ok(stats)
}

/// Copy a file pair through unchanged.
pub fn passthrough_pair(
    src_in: &Path,
    tgt_in: &Path,
    src_out: &Path,
    tgt_out: &Path,
) -> Result<(), Error> {
    std::fs::copy(src_in, src_out)?;
    std::fs::copy(tgt_in, tgt_out)?;
    Ok(())
}

/// Clean every split: train and val are filtered, test is copied verbatim.
pub fn clean_all(cleaner: &PairCleaner, save: &SaveDir, pair: &LanguagePair) -> Result<(), Error> {
    for split in Split::ALL {
        let src_in = save.bpe_file(split, pair, pair.src());
        let tgt_in = save.bpe_file(split, pair, pair.tgt());
        let src_out = save.cleaned_file(split, pair, pair.src());
        let tgt_out = save.cleaned_file(split, pair, pair.tgt());

        match split {
            Split::Test => {
                info!("[{}] copying through unfiltered", split);
                passthrough_pair(&src_in, &tgt_in, &src_out, &tgt_out)?;
            }
            _ => {
                let stats = clean_pair(cleaner, &src_in, &tgt_in, &src_out, &tgt_out)?;
                info!("[{}] kept {} pairs, dropped {}", split, stats.kept, stats.dropped);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_lines(path: &Path, lines: &[&str]) {
        let mut content: String = lines.join("\n");
        content.push('\n');
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn keep_applies_all_bounds() {
        let cleaner = PairCleaner::default();
        assert!(cleaner.keep("un deux trois", "one two three"));
        // 3:2 is exactly the default ratio bound
        assert!(cleaner.keep("un deux trois", "one two"));
        assert!(!cleaner.keep("un deux trois quatre", "one two"));
        assert!(!cleaner.keep("", "one"));

        let long = vec!["mot"; 251].join(" ");
        assert!(!cleaner.keep(&long, &long));
    }

    #[test]
    fn violating_pairs_are_dropped_synchronously() {
        let dir = tempfile::tempdir().unwrap();
        let src_in = dir.path().join("src_in");
        let tgt_in = dir.path().join("tgt_in");
        let src_out = dir.path().join("src_out");
        let tgt_out = dir.path().join("tgt_out");

        write_lines(&src_in, &["a b", "a b c d e f", "a b c"]);
        write_lines(&tgt_in, &["x y", "x y", "x y z"]);

        let stats = clean_pair(&PairCleaner::default(), &src_in, &tgt_in, &src_out, &tgt_out)
            .unwrap();
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.dropped, 1);

        // the 3:1 pair is gone from both sides
        assert_eq!(std::fs::read_to_string(&src_out).unwrap(), "a b\na b c\n");
        assert_eq!(std::fs::read_to_string(&tgt_out).unwrap(), "x y\nx y z\n");
    }

    #[test]
    fn unaligned_inputs_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let src_in = dir.path().join("src_in");
        let tgt_in = dir.path().join("tgt_in");

        write_lines(&src_in, &["a", "b", "c"]);
        write_lines(&tgt_in, &["x"]);

        let result = clean_pair(
            &PairCleaner::default(),
            &src_in,
            &tgt_in,
            &dir.path().join("src_out"),
            &dir.path().join("tgt_out"),
        );
        match result {
            Err(Error::UnalignedPair {
                src_lines,
                tgt_lines,
                ..
            }) => {
                assert_eq!(src_lines, 3);
                assert_eq!(tgt_lines, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn passthrough_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let src_in = dir.path().join("src_in");
        let tgt_in = dir.path().join("tgt_in");
        let src_out = dir.path().join("src_out");
        let tgt_out = dir.path().join("tgt_out");

        // would be dropped by the filters if this were training data
        let long = vec!["mot"; 300].join(" ");
        write_lines(&src_in, &[long.as_str(), "court"]);
        write_lines(&tgt_in, &["x", "y z w a b c"]);

        passthrough_pair(&src_in, &tgt_in, &src_out, &tgt_out).unwrap();
        assert_eq!(
            std::fs::read(&src_in).unwrap(),
            std::fs::read(&src_out).unwrap()
        );
        assert_eq!(
            std::fs::read(&tgt_in).unwrap(),
            std::fs::read(&tgt_out).unwrap()
        );
    }

    #[test]
    fn custom_bounds() {
        let cleaner = PairCleaner::new(2, 4, 2.0);
        assert!(!cleaner.keep("seul", "alone word"));
        assert!(cleaner.keep("deux mots", "three small words"));
        assert!(cleaner.keep("un deux", "one two three four"));
        assert!(!cleaner.keep("un deux", "one two three four five"));
    }
}
