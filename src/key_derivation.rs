//! Dictionary-to-dictionary key transforms: deriving every key for a
//! configuration, shifting recorded keys backward, and decrypting a daily
//! key under each candidate configuration.

use std::collections::HashSet;

use crate::config::Configuration;
use crate::error::Result;
use crate::keyarith;
use crate::machine::Enigma;
use crate::model::Model;
use crate::stream::DictBruteStream;

/// Walks the dictionary-with-keys stream for `steps` steps, setting each
/// emitted configuration's key, and deduplicates the resulting set (order is
/// not significant: the reference implementation relies on Python set
/// deduplication, which is likewise unordered).
pub fn all_keys(dictionary_lines: Vec<String>, _model: &Model, steps: usize) -> Result<Vec<Configuration>> {
    let stream = DictBruteStream::new(String::new(), dictionary_lines);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for item in stream.take(steps) {
        let (_, mut config, key) = item?;
        config.key = key;
        let line = config.to_json_line()?;
        if seen.insert(line) {
            out.push(config);
        }
    }
    Ok(out)
}

/// Applies `DecreaseKey` `shift` times to each of the first `steps`
/// dictionary lines.
pub fn modify_keys(dictionary_lines: &[String], shift: usize, steps: usize) -> Result<Vec<Configuration>> {
    let mut out = Vec::with_capacity(steps);
    for line in dictionary_lines.iter().take(steps) {
        let mut config = Configuration::parse_json_line(line)?;
        let mut key = config.key.clone();
        for _ in 0..shift {
            key = keyarith::decrease_key(&key, &config.rotors);
        }
        config.key = key;
        out.push(config);
    }
    Ok(out)
}

/// Treats each dictionary line as a daily key and uses it to decrypt
/// `ciphered_key`, overwriting that line's key with the result.
pub fn calc_keys(dictionary_lines: &[String], ciphered_key: &str) -> Result<Vec<Configuration>> {
    let mut out = Vec::with_capacity(dictionary_lines.len());
    for line in dictionary_lines {
        let config = Configuration::parse_json_line(line)?;
        let plugboard = config.to_plugboard()?;
        let mut machine = Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard)?;
        let clear_key = machine.process(ciphered_key, &config.key)?;
        let mut emitted = config;
        emitted.key = clear_key
            .chars()
            .map(|c| crate::alphabet::letter_to_index(c).unwrap_or(0))
            .collect();
        out.push(emitted);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflector::ReflectorId;
    use crate::rotor::RotorId;

    fn sample_line() -> String {
        let config = Configuration {
            rotors: vec![RotorId::I, RotorId::II, RotorId::III],
            reflector: ReflectorId::B,
            ring: vec![0, 0, 0],
            plugboard: Vec::new(),
            key: vec![0, 0, 0],
        };
        config.to_json_line().unwrap()
    }

    #[test]
    fn modify_keys_applies_the_shift_to_each_line() {
        let lines = vec![sample_line()];
        let results = modify_keys(&lines, 1, 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, vec![25, 25, 25]);
    }

    #[test]
    fn calc_keys_decrypts_the_daily_key_under_each_line() {
        let lines = vec![sample_line()];
        let config = Configuration::parse_json_line(&lines[0]).unwrap();
        let plugboard = config.to_plugboard().unwrap();
        let mut machine =
            Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard).unwrap();
        let ciphered = machine.process("WET", &config.key).unwrap();

        let results = calc_keys(&lines, &ciphered).unwrap();
        let key_letters: String = results[0].key.iter().copied().map(crate::alphabet::index_to_letter).collect();
        assert_eq!(key_letters, "WET");
    }

    #[test]
    fn all_keys_deduplicates_identical_lines() {
        let model = Model {
            rotors: vec![RotorId::I],
            rotors_count: 3,
            duplicates: true,
            reflectors: vec![ReflectorId::B],
            plugboard: 0,
        };
        let lines = vec![sample_line(), sample_line()];
        let results = all_keys(lines, &model, 4).unwrap();
        // Both dictionary lines are identical, and the stream emits the same
        // first few keys for each: duplicates collapse.
        assert!(!results.is_empty());
    }
}
