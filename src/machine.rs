//! The Enigma machine: substitution chain, double-stepping, and `process`.

use crate::alphabet;
use crate::plugboard::Plugboard;
use crate::reflector::ReflectorId;
use crate::rotor::{Rotor, RotorId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    BadRotorCount { expected: usize, got: usize },
}

impl std::fmt::Display for MachineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineError::BadRotorCount { expected, got } => write!(
                f,
                "rotors/ring/key length mismatch: expected {expected}, got {got}"
            ),
        }
    }
}

impl std::error::Error for MachineError {}

/// An assembled Enigma machine, right-to-left rotor order internally (index 0
/// is the fastest, rightmost rotor).
#[derive(Debug, Clone)]
pub struct Enigma {
    rotors: Vec<Rotor>,
    reflector: ReflectorId,
    plugboard: Plugboard,
}

impl Enigma {
    /// `rotors`, `ring` and `key` are given leftmost-first, matching the
    /// external configuration format; they are reversed internally so index 0
    /// is the fastest rotor.
    pub fn new(
        rotors: &[RotorId],
        reflector: ReflectorId,
        ring: &[u8],
        key: &[u8],
        plugboard: Plugboard,
    ) -> Result<Self, MachineError> {
        let r = rotors.len();
        if ring.len() != r || key.len() != r {
            return Err(MachineError::BadRotorCount {
                expected: r,
                got: ring.len().max(key.len()),
            });
        }
        log::debug!("assembling machine: rotors={rotors:?} reflector={reflector:?}");
        let mut built: Vec<Rotor> = rotors
            .iter()
            .zip(ring.iter())
            .zip(key.iter())
            .map(|((&id, &ring), &pos)| Rotor::new(id, pos, ring))
            .collect();
        built.reverse();
        Ok(Self {
            rotors: built,
            reflector,
            plugboard,
        })
    }

    pub fn set_key(&mut self, key: &[u8]) -> Result<(), MachineError> {
        if key.len() != self.rotors.len() {
            return Err(MachineError::BadRotorCount {
                expected: self.rotors.len(),
                got: key.len(),
            });
        }
        for (rotor, &pos) in self.rotors.iter_mut().rev().zip(key.iter()) {
            rotor.position = pos;
        }
        Ok(())
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    pub fn set_plugboard(&mut self, plugboard: Plugboard) {
        self.plugboard = plugboard;
    }

    /// Current display, leftmost first.
    pub fn display(&self) -> Vec<u8> {
        self.rotors.iter().rev().map(|r| r.position).collect()
    }

    fn step(&mut self) {
        let r0_at_notch = self.rotors[0].is_at_notch();
        let r1_at_notch = self.rotors.get(1).is_some_and(Rotor::is_at_notch);

        if r1_at_notch {
            self.rotors[1].turnover();
            if let Some(r2) = self.rotors.get_mut(2) {
                r2.turnover();
            }
        } else if r0_at_notch {
            if let Some(r1) = self.rotors.get_mut(1) {
                r1.turnover();
            }
        }
        self.rotors[0].turnover();
    }

    fn encrypt_letter(&mut self, c: u8) -> u8 {
        self.step();

        let mut signal = self.plugboard.swap(c);
        for rotor in &self.rotors {
            signal = rotor.forward(signal);
        }
        signal = self.reflector.reflect(signal);
        for rotor in self.rotors.iter().rev() {
            signal = rotor.backward(signal);
        }
        self.plugboard.swap(signal)
    }

    /// Encrypts/decrypts `text` starting from display `key` (leftmost first).
    /// Non-letters pass through unchanged; the display advances by the number
    /// of letters processed.
    pub fn process(&mut self, text: &str, key: &[u8]) -> Result<String, MachineError> {
        self.set_key(key)?;
        Ok(self.process_continuing(text))
    }

    /// Like [`process`](Self::process) but does not reset the display first:
    /// the machine keeps stepping from wherever the last call left it.
    pub fn process_continuing(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match alphabet::letter_to_index(c) {
                Some(idx) => {
                    let enc = self.encrypt_letter(idx);
                    out.push(alphabet::index_to_letter(enc));
                }
                None => out.push(c),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflector::ReflectorId;
    use crate::rotor::RotorId;

    fn three_rotor(rotors: [RotorId; 3], key: [u8; 3]) -> Enigma {
        Enigma::new(
            &rotors,
            ReflectorId::B,
            &[0, 0, 0],
            &key,
            Plugboard::identity(),
        )
        .unwrap()
    }

    #[test]
    fn process_is_an_involution() {
        let mut enc = three_rotor([RotorId::I, RotorId::II, RotorId::III], [0, 0, 0]);
        let mut dec = three_rotor([RotorId::I, RotorId::II, RotorId::III], [0, 0, 0]);
        let plain = "HELLOWORLD";
        let cipher = enc.process(plain, &[0, 0, 0]).unwrap();
        let roundtrip = dec.process(&cipher, &[0, 0, 0]).unwrap();
        assert_eq!(roundtrip, plain);
    }

    #[test]
    fn no_letter_ever_enciphers_to_itself() {
        let mut m = three_rotor([RotorId::I, RotorId::II, RotorId::III], [0, 0, 0]);
        let text: String = (0..26).map(alphabet::index_to_letter).collect();
        let cipher = m.process(&text, &[0, 0, 0]).unwrap();
        for (p, c) in text.chars().zip(cipher.chars()) {
            assert_ne!(p, c);
        }
    }

    #[test]
    fn non_letters_pass_through_and_do_not_advance_the_display() {
        let mut m = three_rotor([RotorId::I, RotorId::II, RotorId::III], [0, 0, 0]);
        let out = m.process("AB 12", &[0, 0, 0]).unwrap();
        assert_eq!(&out[2..], " 12");
    }

    #[test]
    fn double_step_anomaly_matches_the_historical_sequence() {
        // ADU -> ADV -> AEW: only the fast rotor (III) turns over into its
        // own notch letter (V) on the first press; on the second press that
        // notch triggers the double-step, advancing both II and III.
        let mut m = three_rotor([RotorId::I, RotorId::II, RotorId::III], [0, 3, 20]);
        m.process("A", &[0, 3, 20]).unwrap();
        assert_eq!(m.display(), vec![0, 3, 21]);
        m.process("A", &[0, 3, 21]).unwrap();
        assert_eq!(m.display(), vec![0, 4, 22]);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = Enigma::new(
            &[RotorId::I, RotorId::II, RotorId::III],
            ReflectorId::B,
            &[0, 0],
            &[0, 0, 0],
            Plugboard::identity(),
        );
        assert!(result.is_err());
    }
}
