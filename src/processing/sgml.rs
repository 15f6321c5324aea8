/*! Test-set extraction.

WMT test releases ship as SGML documents where each sentence lives in a
`<seg id="n">...</seg>` element. Extraction keeps only segment lines,
strips the markup, normalizes curly apostrophes and feeds the plain
sentences through the tokenizer into the test files. No filtering and no
splitting happen here.
!*/
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::lang::Side;
use crate::layout::{SaveDir, Split};
use crate::recipe::Recipe;
use crate::sources;
use crate::tools::Moses;

use super::tokenize::TOKENIZER_THREADS;

/// Segment payload of one SGML line, `None` for non-segment lines.
pub fn seg_line(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with("<seg id") {
        return None;
    }
    let rest = trimmed.split_once('>')?.1.trim_start();
    let body = match rest.find("</seg>") {
        Some(pos) => rest[..pos].trim_end(),
        None => rest.trim_end(),
    };
    Some(body.replace('’', "'"))
}

/// All segment payloads of an SGML document, one sentence per line.
pub fn extract_segments(sgml: &str) -> String {
    let mut out = String::new();
    for line in sgml.lines() {
        if let Some(seg) = seg_line(line) {
            out.push_str(&seg);
            out.push('\n');
        }
    }
    out
}

/// Extract and tokenize both sides of the held-out test set.
pub fn extract_test(
    moses: &Moses,
    recipe: &Recipe,
    orig_dir: &Path,
    save: &SaveDir,
) -> Result<(), Error> {
    for side in Side::BOTH {
        let lang = recipe.pair.lang(side);
        let raw = sources::find_unique(orig_dir, &recipe.test_sgm_filename(side))?;
        info!("[{}] extracting test segments from {}", lang, raw.display());

        let segments = extract_segments(&std::fs::read_to_string(&raw)?);
        let dest = save.processed_file(Split::Test, &recipe.pair, lang);
        moses
            .tokenizer(lang, TOKENIZER_THREADS)
            .stdout_to(&dest)
            .run_feeding(&segments)?;
    }
    Ok(())
}
