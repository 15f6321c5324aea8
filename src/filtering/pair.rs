//! sentence-pair filtering
use super::Filter;

/// Whitespace-delimited token count of a tokenized sentence.
pub fn token_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

/// Token-length filter.
/// Returns `false` if the provided sentence holds fewer than [Length::min]
/// or more than [Length::max] whitespace tokens (bounds inclusive).
///
/// Bounds are 1 and 250 by default.
pub struct Length {
    min: usize,
    max: usize,
}

impl Length {
    /// specify inclusive token-count bounds
    pub fn with_bounds(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for Length {
    /// Default bounds keep sentences of 1 to 250 tokens.
    fn default() -> Self {
        Length { min: 1, max: 250 }
    }
}

impl Filter<&str> for Length {
    fn detect(&self, sentence: &str) -> bool {
        let count = token_count(sentence);
        count >= self.min && count <= self.max
    }
}

/// Cross-lingual length-ratio filter.
/// Returns `false` when one side of the pair is more than [Ratio::max]
/// times longer, in tokens, than the other. An empty side always fails.
///
/// The maximum ratio is 1.5 by default.
pub struct Ratio {
    max: f64,
}

impl Ratio {
    /// specify a maximum length ratio
    pub fn with_max(max: f64) -> Self {
        Self { max }
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for Ratio {
    /// Default maximum ratio is 1.5.
    fn default() -> Self {
        Ratio { max: 1.5 }
    }
}

impl Filter<(&str, &str)> for Ratio {
    fn detect(&self, pair: (&str, &str)) -> bool {
        let (src, tgt) = pair;
        let src_count = token_count(src);
        let tgt_count = token_count(tgt);
        if src_count == 0 || tgt_count == 0 {
            return false;
        }
        let ratio = src_count.max(tgt_count) as f64 / src_count.min(tgt_count) as f64;
        ratio <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(tokens: usize) -> String {
        vec!["mot"; tokens].join(" ")
    }

    #[test]
    fn token_count_ignores_extra_whitespace() {
        assert_eq!(token_count("un  deux\ttrois "), 3);
        assert_eq!(token_count(""), 0);
        assert_eq!(token_count("   "), 0);
    }

    #[test]
    fn length_default() {
        let f = Length::default();
        assert_eq!((f.min(), f.max()), (1, 250));
        assert!(f.detect(&sentence(1)));
        assert!(f.detect(&sentence(250)));
        assert!(!f.detect(&sentence(251)));
        assert!(!f.detect(""));
    }

    #[test]
    fn length_custom_bounds() {
        let f = Length::with_bounds(2, 3);
        assert!(!f.detect(&sentence(1)));
        assert!(f.detect(&sentence(2)));
        assert!(f.detect(&sentence(3)));
        assert!(!f.detect(&sentence(4)));
    }

    #[test]
    fn ratio_default() {
        let f = Ratio::default();
        assert_eq!(f.max(), 1.5);
        assert!(f.detect((sentence(2).as_str(), sentence(3).as_str())));
        assert!(f.detect((sentence(3).as_str(), sentence(2).as_str())));
        assert!(f.detect((sentence(5).as_str(), sentence(5).as_str())));
        assert!(!f.detect((sentence(2).as_str(), sentence(4).as_str())));
        assert!(!f.detect((sentence(6).as_str(), sentence(2).as_str())));
    }

    #[test]
    fn ratio_rejects_empty_sides() {
        let f = Ratio::default();
        assert!(!f.detect(("", sentence(1).as_str())));
        assert!(!f.detect((sentence(1).as_str(), "")));
        assert!(!f.detect(("", "")));
    }

    #[test]
    fn ratio_is_inclusive_at_the_bound() {
        let f = Ratio::default();
        // 3:2 is exactly 1.5
        assert!(f.detect((sentence(3).as_str(), sentence(2).as_str())));
    }
}
