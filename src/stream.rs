//! `ConfigStream`: the four ways a configuration can be enumerated for an
//! attack (full brute force, a dictionary, a dictionary crossed with every
//! key, or a dictionary crossed with every single plugboard pair).

use itertools::Itertools;

use crate::alphabet;
use crate::config::Configuration;
use crate::error::{Result, WorkbenchError};
use crate::machine::Enigma;
use crate::model::Model;
use crate::plugboard::Plugboard;

/// Advances a plain base-26 odometer (no notch logic) in place.
/// Returns `true` once it has wrapped back to all zeros.
fn advance_key(key: &mut [u8]) -> bool {
    for digit in key.iter_mut().rev() {
        *digit += 1;
        if *digit < 26 {
            return false;
        }
        *digit = 0;
    }
    true
}

pub enum ConfigStream {
    Brute(BruteStream),
    Dict(DictStream),
    DictBrute(DictBruteStream),
    DictPlug(DictPlugStream),
}

impl Iterator for ConfigStream {
    type Item = Result<(String, Configuration)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ConfigStream::Brute(s) => s.next(),
            ConfigStream::Dict(s) => s.next(),
            ConfigStream::DictBrute(s) => s.next().map(|r| r.map(|(text, cfg, _)| (text, cfg))),
            ConfigStream::DictPlug(s) => s.next(),
        }
    }
}

/// Cartesian product rotor-ordering x reflector x key, ring all-zero and
/// plugboard empty throughout.
pub struct BruteStream {
    text: String,
    orderings: Vec<Vec<crate::rotor::RotorId>>,
    reflectors: Vec<crate::reflector::ReflectorId>,
    rotor_count: usize,
    order_idx: usize,
    reflector_idx: usize,
    key: Vec<u8>,
    machine: Option<Enigma>,
    finished: bool,
}

impl BruteStream {
    pub fn new(text: impl Into<String>, model: &Model) -> Self {
        let orderings = model.rotor_orderings();
        let finished = orderings.is_empty() || model.reflectors.is_empty();
        Self {
            text: text.into(),
            orderings,
            reflectors: model.reflectors.clone(),
            rotor_count: model.rotors_count,
            order_idx: 0,
            reflector_idx: 0,
            key: vec![0; model.rotors_count],
            machine: None,
            finished,
        }
    }

    fn build_machine(&self) -> Result<Enigma> {
        let rotors = &self.orderings[self.order_idx];
        let reflector = self.reflectors[self.reflector_idx];
        let ring = vec![0u8; self.rotor_count];
        Ok(Enigma::new(rotors, reflector, &ring, &self.key, Plugboard::identity())?)
    }
}

impl Iterator for BruteStream {
    type Item = Result<(String, Configuration)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.machine.is_none() {
            match self.build_machine() {
                Ok(m) => self.machine = Some(m),
                Err(e) => return Some(Err(e)),
            }
        }

        let rotors = self.orderings[self.order_idx].clone();
        let reflector = self.reflectors[self.reflector_idx];
        let key = self.key.clone();
        let result = self
            .machine
            .as_mut()
            .unwrap()
            .process(&self.text, &key)
            .map_err(WorkbenchError::from);
        let config = Configuration {
            rotors,
            reflector,
            ring: vec![0; self.rotor_count],
            plugboard: Vec::new(),
            key,
        };

        if advance_key(&mut self.key) {
            self.machine = None;
            if self.reflector_idx + 1 < self.reflectors.len() {
                self.reflector_idx += 1;
            } else {
                self.reflector_idx = 0;
                if self.order_idx + 1 < self.orderings.len() {
                    self.order_idx += 1;
                } else {
                    self.finished = true;
                }
            }
        }

        Some(result.map(|plain| (plain, config)))
    }
}

/// Reads one configuration per line; a machine is rebuilt only when the
/// non-key fields differ from the previous line.
pub struct DictStream {
    lines: std::vec::IntoIter<String>,
    last_conf: Option<Configuration>,
    machine: Option<Enigma>,
    text: String,
}

impl DictStream {
    pub fn new(text: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter(),
            last_conf: None,
            machine: None,
            text: text.into(),
        }
    }

    fn same_machine_as_last(&self, config: &Configuration) -> bool {
        self.last_conf.as_ref().is_some_and(|prev| {
            prev.rotors == config.rotors
                && prev.reflector == config.reflector
                && prev.ring == config.ring
                && prev.plugboard == config.plugboard
        })
    }
}

impl Iterator for DictStream {
    type Item = Result<(String, Configuration)>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let config = match Configuration::parse_json_line(&line) {
            Ok(c) => c,
            Err(e) => return Some(Err(e)),
        };

        if self.machine.is_none() || !self.same_machine_as_last(&config) {
            let plugboard = match config.to_plugboard() {
                Ok(p) => p,
                Err(e) => return Some(Err(e)),
            };
            match Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard) {
                Ok(m) => self.machine = Some(m),
                Err(e) => return Some(Err(e.into())),
            }
        }

        let result = self
            .machine
            .as_mut()
            .unwrap()
            .process(&self.text, &config.key)
            .map_err(WorkbenchError::from);
        self.last_conf = Some(config.clone());
        Some(result.map(|plain| (plain, config)))
    }
}

/// For each dictionary line, enumerates all 26^R keys.
pub struct DictBruteStream {
    lines: std::vec::IntoIter<String>,
    current: Option<(Configuration, Enigma)>,
    key: Vec<u8>,
    text: String,
}

impl DictBruteStream {
    pub fn new(text: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter(),
            current: None,
            key: Vec::new(),
            text: text.into(),
        }
    }

    fn load_next_line(&mut self) -> Option<Result<()>> {
        let line = self.lines.next()?;
        let config = match Configuration::parse_json_line(&line) {
            Ok(c) => c,
            Err(e) => return Some(Err(e)),
        };
        let plugboard = match config.to_plugboard() {
            Ok(p) => p,
            Err(e) => return Some(Err(e)),
        };
        let machine = match Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard) {
            Ok(m) => m,
            Err(e) => return Some(Err(e.into())),
        };
        self.key = vec![0u8; config.rotor_count()];
        self.current = Some((config, machine));
        Some(Ok(()))
    }
}

impl Iterator for DictBruteStream {
    type Item = Result<(String, Configuration, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            match self.load_next_line()? {
                Ok(()) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        let (config, machine) = self.current.as_mut().unwrap();
        let key = self.key.clone();
        let result = machine.process(&self.text, &key).map_err(WorkbenchError::from);
        let mut emitted = config.clone();
        emitted.key = key.clone();

        if advance_key(&mut self.key) {
            self.current = None;
        }

        Some(result.map(|plain| (plain, emitted, key)))
    }
}

/// For each dictionary line, enumerates every unordered letter pair as a
/// single-pair plugboard (325 combinations, A-B first, then A-C, ...).
pub struct DictPlugStream {
    lines: std::vec::IntoIter<String>,
    base: Option<Configuration>,
    pairs: std::vec::IntoIter<(char, char)>,
    text: String,
}

impl DictPlugStream {
    pub fn new(text: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter(),
            base: None,
            pairs: Vec::new().into_iter(),
            text: text.into(),
        }
    }

    fn load_next_line(&mut self) -> Option<Result<()>> {
        let line = self.lines.next()?;
        let config = match Configuration::parse_json_line(&line) {
            Ok(c) => c,
            Err(e) => return Some(Err(e)),
        };
        self.base = Some(config);
        self.pairs = all_letter_pairs().into_iter();
        Some(Ok(()))
    }
}

fn all_letter_pairs() -> Vec<(char, char)> {
    (0..26u8)
        .map(alphabet::index_to_letter)
        .tuple_combinations()
        .collect()
}

impl Iterator for DictPlugStream {
    type Item = Result<(String, Configuration)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.base.is_none() {
                match self.load_next_line()? {
                    Ok(()) => {}
                    Err(e) => return Some(Err(e)),
                }
            }
            if let Some(pair) = self.pairs.next() {
                let mut config = self.base.clone().unwrap();
                config.plugboard = vec![pair];
                let plugboard = match config.to_plugboard() {
                    Ok(p) => p,
                    Err(e) => return Some(Err(e)),
                };
                let result = Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard)
                    .map_err(WorkbenchError::from)
                    .and_then(|mut m| m.process(&self.text, &config.key).map_err(WorkbenchError::from));
                return Some(result.map(|plain| (plain, config)));
            }
            self.base = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflector::ReflectorId;
    use crate::rotor::RotorId;

    #[test]
    fn brute_stream_enumerates_exactly_26_pow_r_times_orderings_times_reflectors() {
        let model = Model {
            rotors: vec![RotorId::I, RotorId::II],
            rotors_count: 2,
            duplicates: true,
            reflectors: vec![ReflectorId::B],
            plugboard: 0,
        };
        let stream = BruteStream::new("A", &model);
        let count = stream.count();
        assert_eq!(count, 4 * 26 * 26);
    }

    #[test]
    fn all_letter_pairs_has_325_entries_starting_with_ab() {
        let pairs = all_letter_pairs();
        assert_eq!(pairs.len(), 325);
        assert_eq!(pairs[0], ('A', 'B'));
        assert_eq!(pairs[24], ('A', 'Z'));
        assert_eq!(pairs[25], ('B', 'C'));
    }
}
