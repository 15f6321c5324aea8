/*! Training-corpus tokenization.

For each language side, every training corpus named by the recipe is
located under the original-data tree and piped through punctuation
normalization, non-printing-character removal and the tokenizer, the
results appending to one growing per-language file.

The destination file is the unit of overwriting: when it already exists
the configured [OverwritePolicy] decides whether it is rebuilt from
scratch or left alone entirely. Declining keeps the existing file and
skips every corpus for that language, so a partially appended file is
never extended a second time.
!*/
use std::path::Path;

use log::info;

use crate::cli::OverwritePolicy;
use crate::error::Error;
use crate::exec::run_pipeline;
use crate::layout::SaveDir;
use crate::recipe::Recipe;
use crate::sources;
use crate::tools::Moses;

/// Thread count handed to the external tokenizer.
pub const TOKENIZER_THREADS: usize = 8;

pub fn tokenize_train(
    moses: &Moses,
    recipe: &Recipe,
    orig_dir: &Path,
    save: &SaveDir,
    overwrite: OverwritePolicy,
) -> Result<(), Error> {
    for lang in recipe.pair.langs() {
        let dest = save.unsplit_file(&recipe.pair, lang);
        if dest.exists() {
            if overwrite.allows_overwrite(&dest)? {
                std::fs::remove_file(&dest)?;
            } else {
                info!("[{}] keeping existing {}, skipping", lang, dest.display());
                continue;
            }
        }

        for corpus in &recipe.train_corpora {
            let raw = sources::find_unique(orig_dir, &format!("{}.{}", corpus, lang))?;
            info!("[{}] tokenizing {}", lang, raw.display());
            let stages = [
                moses.normalize_punctuation(lang),
                moses.remove_non_printing_char(),
                moses.tokenizer(lang, TOKENIZER_THREADS),
            ];
            run_pipeline(&stages, &raw, &dest, true)?;
        }
    }
    Ok(())
}
