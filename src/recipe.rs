/*! Corpus recipes.

A [Recipe] names everything that is specific to one preparation target:
the language pair, the archives to fetch, the training corpora to pull
out of them and the SGML stem of the held-out test set. The pipeline
itself is recipe-agnostic.
!*/
use lazy_static::lazy_static;

use crate::lang::{LanguagePair, Side};

/// A remote archive holding source corpora.
#[derive(Debug, Clone)]
pub struct Archive {
    /// Download location.
    pub url: &'static str,
    /// Glob over extracted member names whose matches are gzip files
    /// that still need decompressing after the archive itself is unpacked.
    pub gunzip_members: Option<&'static str>,
}

impl Archive {
    pub const fn new(url: &'static str) -> Self {
        Self {
            url,
            gunzip_members: None,
        }
    }

    pub const fn with_gunzip(url: &'static str, members: &'static str) -> Self {
        Self {
            url,
            gunzip_members: Some(members),
        }
    }
}

/// One preparation target.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub pair: LanguagePair,
    pub archives: Vec<Archive>,
    /// Basenames (without the language extension) of the training corpora.
    pub train_corpora: Vec<&'static str>,
    /// Stem of the test SGML files, expanded by [Self::test_sgm_filename].
    pub test_sgm_stem: &'static str,
}

impl Recipe {
    /// SGML filename of one test side, e.g. `newstest2014-fren-src.en.sgm`.
    pub fn test_sgm_filename(&self, side: Side) -> String {
        format!(
            "{}-{}.{}.sgm",
            self.test_sgm_stem,
            side.sgm_designator(),
            self.pair.lang(side)
        )
    }
}

lazy_static! {
    /// WMT'14 English-French.
    pub static ref WMT14_EN_FR: Recipe = Recipe {
        pair: LanguagePair::new("en", "fr"),
        archives: vec![
            Archive::new("http://statmt.org/wmt13/training-parallel-europarl-v7.tgz"),
            Archive::new("http://statmt.org/wmt13/training-parallel-commoncrawl.tgz"),
            Archive::new("http://statmt.org/wmt13/training-parallel-un.tgz"),
            Archive::new("http://statmt.org/wmt14/training-parallel-nc-v9.tgz"),
            Archive::with_gunzip(
                "http://statmt.org/wmt10/training-giga-fren.tar",
                "giga-fren.release2.fixed.*.gz",
            ),
            Archive::new("http://statmt.org/wmt14/test-full.tgz"),
        ],
        // The full WMT'14 set also has europarl-v7.fr-en, commoncrawl.fr-en,
        // undoc.2000.fr-en and giga-fren.release2.fixed. Add them here to
        // train on more than news commentary.
        train_corpora: vec!["news-commentary-v9.fr-en"],
        test_sgm_stem: "newstest2014-fren",
    };
}

// TODO: add a WMT'16 en-de recipe once the de-side corpora list is settled.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgm_names() {
        let recipe = &*WMT14_EN_FR;
        assert_eq!(
            recipe.test_sgm_filename(Side::Source),
            "newstest2014-fren-src.en.sgm"
        );
        assert_eq!(
            recipe.test_sgm_filename(Side::Target),
            "newstest2014-fren-ref.fr.sgm"
        );
    }

    #[test]
    fn en_fr_archives() {
        let recipe = &*WMT14_EN_FR;
        assert_eq!(recipe.archives.len(), 6);
        let gunzipped: Vec<_> = recipe
            .archives
            .iter()
            .filter_map(|a| a.gunzip_members)
            .collect();
        assert_eq!(gunzipped, vec!["giga-fren.release2.fixed.*.gz"]);
    }
}
