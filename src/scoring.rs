//! Text statistics used to rank candidate decryptions.

/// Index of coincidence over the uppercase letters in `text`.
///
/// Returns 0 for texts with fewer than two letters (undefined otherwise).
pub fn ic(text: &str) -> f64 {
    let mut counts = [0u32; 26];
    let mut n = 0u32;
    for c in text.chars() {
        if let Some(i) = crate::alphabet::letter_to_index(c) {
            counts[i as usize] += 1;
            n += 1;
        }
    }
    if n < 2 {
        return 0.0;
    }
    let total = (n * (n - 1)) as f64;
    let sum: u32 = counts.iter().map(|&c| c * c.saturating_sub(1)).sum();
    sum as f64 / total
}

/// Per-letter relative frequencies plus the count of distinct letters seen.
pub fn frequencies(text: &str) -> ([f64; 26], usize) {
    let mut counts = [0u32; 26];
    let mut total = 0u32;
    for c in text.chars() {
        if let Some(i) = crate::alphabet::letter_to_index(c) {
            counts[i as usize] += 1;
            total += 1;
        }
    }
    let mut freqs = [0.0; 26];
    let mut distinct = 0;
    for (i, &count) in counts.iter().enumerate() {
        if total > 0 {
            freqs[i] = count as f64 / total as f64;
        }
        if count > 0 {
            distinct += 1;
        }
    }
    (freqs, distinct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_text_has_low_ic() {
        let text: String = (0..26).map(crate::alphabet::index_to_letter).collect();
        // Every letter appears exactly once: no repeats at all.
        assert_eq!(ic(&text), 0.0);
    }

    #[test]
    fn repeated_letter_maximises_ic() {
        let text = "AAAA";
        assert!((ic(text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn frequencies_sum_to_one() {
        let (freqs, distinct) = frequencies("AABBBC");
        let sum: f64 = freqs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(distinct, 3);
    }

    #[test]
    fn short_text_has_zero_ic() {
        assert_eq!(ic("A"), 0.0);
        assert_eq!(ic(""), 0.0);
    }
}
