//! Greedy plugboard recovery: for a fixed rotor configuration, score every
//! single-pair plugboard setting by index of coincidence and chain the
//! highest-scoring pairs together.

use rayon::prelude::*;

use crate::config::Configuration;
use crate::error::Result;
use crate::scoring;
use crate::stream::{ConfigStream, DictPlugStream};

/// Scores every 325 single-pair plugboard settings for `config` against
/// `text` in parallel via a `DictPlugStream` over that one line, then keeps
/// the `top_k` highest-scoring pairs.
pub fn rank_pairs(text: &str, config: &Configuration, top_k: usize) -> Result<Vec<(char, char)>> {
    let line = config.to_json_line()?;
    let stream = ConfigStream::DictPlug(DictPlugStream::new(text.to_string(), vec![line]));

    let mut scored: Vec<(f64, (char, char))> = stream
        .par_bridge()
        .map(|item| {
            let (plaintext, config) = item?;
            Ok((scoring::ic(&plaintext), config.plugboard[0]))
        })
        .collect::<Result<Vec<_>>>()?;

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    Ok(scored.into_iter().rev().take(top_k).map(|(_, pair)| pair).collect())
}

/// For each dictionary line, chains the top-k single-pair plugboard guesses
/// into that configuration's `plugboard` field and emits the result.
pub fn run(text: &str, dictionary: &[String], top_k: usize) -> Result<Vec<Configuration>> {
    let mut out = Vec::with_capacity(dictionary.len());
    for line in dictionary {
        let config = Configuration::parse_json_line(line)?;
        let pairs = rank_pairs(text, &config, top_k)?;
        let mut emitted = config;
        emitted.plugboard = pairs;
        out.push(emitted);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflector::ReflectorId;
    use crate::rotor::RotorId;

    fn sample_config() -> Configuration {
        Configuration {
            rotors: vec![RotorId::I, RotorId::II, RotorId::III],
            reflector: ReflectorId::B,
            ring: vec![0, 0, 0],
            plugboard: Vec::new(),
            key: vec![0, 0, 0],
        }
    }

    #[test]
    fn ranks_exactly_325_pairs_and_returns_top_k() {
        let config = sample_config();
        let ranked = rank_pairs("THISISATESTCIPHERTEXT", &config, 4).unwrap();
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn run_sets_the_plugboard_field_per_line() {
        let config = sample_config();
        let line = config.to_json_line().unwrap();
        let results = run("THISISATESTCIPHERTEXT", &[line], 2).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].plugboard.len(), 2);
    }
}
