//! Language pairs and corpus sides.
//!
//! A parallel corpus has two line-aligned sides; most of the pipeline
//! iterates over both of them with the same code. WMT test releases name
//! their files by side designator (`src`/`ref`) rather than by language,
//! so the two notions live together here.
use std::fmt;

/// One side of a parallel corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Source, Side::Target];

    /// Designator used in WMT SGML test-set file names
    /// (`newstest2014-fren-src.en.sgm`, `newstest2014-fren-ref.fr.sgm`).
    pub fn sgm_designator(&self) -> &'static str {
        match self {
            Side::Source => "src",
            Side::Target => "ref",
        }
    }
}

/// An ordered language pair, e.g. en→fr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    src: &'static str,
    tgt: &'static str,
}

impl LanguagePair {
    pub const fn new(src: &'static str, tgt: &'static str) -> Self {
        Self { src, tgt }
    }

    pub fn src(&self) -> &'static str {
        self.src
    }

    pub fn tgt(&self) -> &'static str {
        self.tgt
    }

    pub fn lang(&self, side: Side) -> &'static str {
        match side {
            Side::Source => self.src,
            Side::Target => self.tgt,
        }
    }

    /// Both language codes, source first.
    pub fn langs(&self) -> [&'static str; 2] {
        [self.src, self.tgt]
    }

    /// Corpus tag used in file names, e.g. `en-fr`.
    pub fn tag(&self) -> String {
        format!("{}-{}", self.src, self.tgt)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.src, self.tgt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag() {
        let pair = LanguagePair::new("en", "fr");
        assert_eq!(pair.tag(), "en-fr");
        assert_eq!(pair.to_string(), "en-fr");
    }

    #[test]
    fn sides() {
        let pair = LanguagePair::new("en", "fr");
        assert_eq!(pair.lang(Side::Source), "en");
        assert_eq!(pair.lang(Side::Target), "fr");
        assert_eq!(Side::Source.sgm_designator(), "src");
        assert_eq!(Side::Target.sgm_designator(), "ref");
    }
}
