//! Approximate word-level string comparison via Levenshtein distance.

/// Similarity floor used when no threshold is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Word-level fuzzy matcher with a fixed similarity threshold.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    pub threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Classic edit distance: insertion, deletion and substitution each cost 1.
    ///
    /// Case-sensitive and computed over `char`s, not bytes.
    pub fn distance(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        // track[j][i]: distance between the first i chars of a and first j of b.
        let mut track = vec![vec![0usize; a.len() + 1]; b.len() + 1];
        for (i, cell) in track[0].iter_mut().enumerate() {
            *cell = i;
        }
        for (j, row) in track.iter_mut().enumerate() {
            row[0] = j;
        }

        for j in 1..=b.len() {
            for i in 1..=a.len() {
                let indicator = usize::from(a[i - 1] != b[j - 1]);
                track[j][i] = (track[j][i - 1] + 1)
                    .min(track[j - 1][i] + 1)
                    .min(track[j - 1][i - 1] + indicator);
            }
        }

        track[b.len()][a.len()]
    }

    /// Normalized similarity in `0.0..=1.0`; two empty strings are identical.
    pub fn similarity(a: &str, b: &str) -> f64 {
        let longest = a.chars().count().max(b.chars().count());
        if longest == 0 {
            return 1.0;
        }
        1.0 - Self::distance(a, b) as f64 / longest as f64
    }

    /// Whether `text` matches `pattern` at this matcher's threshold.
    pub fn is_match(&self, text: &str, pattern: &str) -> bool {
        Self::matches_with(text, pattern, self.threshold)
    }

    /// Word-level fuzzy match.
    ///
    /// A pattern word counts as matched when any text word reaches
    /// `threshold` similarity; the overall match needs the matched fraction
    /// of pattern words to reach `threshold` as well.
    pub fn matches_with(text: &str, pattern: &str, threshold: f64) -> bool {
        let text = text.to_lowercase();
        let pattern = pattern.to_lowercase();
        let words: Vec<&str> = text.split_whitespace().collect();
        let pattern_words: Vec<&str> = pattern.split_whitespace().collect();

        if words.is_empty() || pattern_words.is_empty() {
            return false;
        }

        let matched = pattern_words
            .iter()
            .filter(|p_word| {
                words
                    .iter()
                    .any(|word| Self::similarity(word, p_word) >= threshold)
            })
            .count();

        matched as f64 / pattern_words.len() as f64 >= threshold
    }
}
