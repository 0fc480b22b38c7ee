//! Rotor identities: historical wiring, notch tables, and the thin-rotor flag.
//!
//! Because rotor wiring is a fixed historical value, the permutation tables
//! are generated at compile time rather than parsed or looked up at runtime.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RotorId {
    I = 0,
    II = 1,
    III = 2,
    IV = 3,
    V = 4,
    VI = 5,
    VII = 6,
    VIII = 7,
    Beta = 8,
    Gamma = 9,
}

impl RotorId {
    pub const ALL: [RotorId; 10] = [
        RotorId::I,
        RotorId::II,
        RotorId::III,
        RotorId::IV,
        RotorId::V,
        RotorId::VI,
        RotorId::VII,
        RotorId::VIII,
        RotorId::Beta,
        RotorId::Gamma,
    ];

    pub fn parse(s: &str) -> Option<RotorId> {
        match s {
            "I" => Some(RotorId::I),
            "II" => Some(RotorId::II),
            "III" => Some(RotorId::III),
            "IV" => Some(RotorId::IV),
            "V" => Some(RotorId::V),
            "VI" => Some(RotorId::VI),
            "VII" => Some(RotorId::VII),
            "VIII" => Some(RotorId::VIII),
            "Beta" => Some(RotorId::Beta),
            "Gamma" => Some(RotorId::Gamma),
            _ => None,
        }
    }

    /// True for Beta and Gamma: thin rotors never step and never cause a
    /// neighbour to step.
    pub fn is_thin(self) -> bool {
        matches!(self, RotorId::Beta | RotorId::Gamma)
    }

    /// Turnover notch letters, as raw display positions 0..26. Thin rotors
    /// have none.
    pub fn notches(self) -> &'static [u8] {
        match self {
            RotorId::I => &[16],        // Q
            RotorId::II => &[4],        // E
            RotorId::III => &[21],      // V
            RotorId::IV => &[9],        // J
            RotorId::V => &[25],        // Z
            RotorId::VI => &[25, 12],   // Z, M
            RotorId::VII => &[25, 12],  // Z, M
            RotorId::VIII => &[25, 12], // Z, M
            RotorId::Beta | RotorId::Gamma => &[],
        }
    }

    pub fn is_at_notch(self, display_position: u8) -> bool {
        self.notches().contains(&display_position)
    }

    const fn wiring_letters(self) -> &'static [u8; 26] {
        match self {
            RotorId::I => b"EKMFLGDQVZNTOWYHXUSPAIBRCJ",
            RotorId::II => b"AJDKSIRUXBLHWTMCQGZNPYFVOE",
            RotorId::III => b"BDFHJLCPRTXVZNYEIWGAKMUSQO",
            RotorId::IV => b"ESOVPZJAYQUIRHXLNFTGKDCMWB",
            RotorId::V => b"VZBRGITYUPSDNHLXAWMJQOFECK",
            RotorId::VI => b"JPGVOUMFYQBENHZRDKASXLICTW",
            RotorId::VII => b"NZJHGRCXMYSWBOUFAIVLPEKQDT",
            RotorId::VIII => b"FKQHTLXOCBJSPDZRAMEWNIUYGV",
            RotorId::Beta => b"LEYJVCNIXWPBQMDRTAKZGFUHOS",
            RotorId::Gamma => b"FSOKANUERHMBTIYCWLQPZXVGJD",
        }
    }

    const fn gen_forward_wiring(self) -> [u8; 26] {
        let letters = self.wiring_letters();
        let mut wiring = [0u8; 26];
        let mut i = 0;
        while i < 26 {
            wiring[i] = letters[i] - b'A';
            i += 1;
        }
        wiring
    }

    const fn gen_backward_wiring(self) -> [u8; 26] {
        let forward = self.gen_forward_wiring();
        let mut backward = [0u8; 26];
        let mut i = 0;
        while i < 26 {
            backward[forward[i] as usize] = i as u8;
            i += 1;
        }
        backward
    }

    fn forward_wiring(self) -> &'static [u8; 26] {
        &ROTOR_FORWARD_WIRING[self as usize]
    }

    fn backward_wiring(self) -> &'static [u8; 26] {
        &ROTOR_BACKWARD_WIRING[self as usize]
    }
}

impl fmt::Display for RotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RotorId::I => "I",
            RotorId::II => "II",
            RotorId::III => "III",
            RotorId::IV => "IV",
            RotorId::V => "V",
            RotorId::VI => "VI",
            RotorId::VII => "VII",
            RotorId::VIII => "VIII",
            RotorId::Beta => "Beta",
            RotorId::Gamma => "Gamma",
        };
        f.write_str(s)
    }
}

const ROTOR_FORWARD_WIRING: [[u8; 26]; 10] = [
    RotorId::I.gen_forward_wiring(),
    RotorId::II.gen_forward_wiring(),
    RotorId::III.gen_forward_wiring(),
    RotorId::IV.gen_forward_wiring(),
    RotorId::V.gen_forward_wiring(),
    RotorId::VI.gen_forward_wiring(),
    RotorId::VII.gen_forward_wiring(),
    RotorId::VIII.gen_forward_wiring(),
    RotorId::Beta.gen_forward_wiring(),
    RotorId::Gamma.gen_forward_wiring(),
];

const ROTOR_BACKWARD_WIRING: [[u8; 26]; 10] = [
    RotorId::I.gen_backward_wiring(),
    RotorId::II.gen_backward_wiring(),
    RotorId::III.gen_backward_wiring(),
    RotorId::IV.gen_backward_wiring(),
    RotorId::V.gen_backward_wiring(),
    RotorId::VI.gen_backward_wiring(),
    RotorId::VII.gen_backward_wiring(),
    RotorId::VIII.gen_backward_wiring(),
    RotorId::Beta.gen_backward_wiring(),
    RotorId::Gamma.gen_backward_wiring(),
];

/// A rotor placed in a machine slot: its identity plus the mutable display
/// position and the fixed ring setting for this configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotor {
    pub id: RotorId,
    pub position: u8,
    pub ring: u8,
}

impl Rotor {
    pub fn new(id: RotorId, position: u8, ring: u8) -> Self {
        debug_assert!(position < 26);
        debug_assert!(ring < 26);
        Self { id, position, ring }
    }

    pub fn is_at_notch(&self) -> bool {
        !self.id.is_thin() && self.id.is_at_notch(self.position)
    }

    pub fn turnover(&mut self) {
        if self.id.is_thin() {
            return;
        }
        self.position = (self.position + 1) % 26;
    }

    /// Hot path: encrypt one letter through this rotor in a given direction,
    /// applying the ring/position displacement.
    fn encypher(c: u8, position: u8, ring: u8, mapping: &[u8; 26]) -> u8 {
        let shift = (position + 26 - ring) % 26;
        let idx = (c + shift) % 26;
        let val = mapping[idx as usize];
        (val + 26 - shift) % 26
    }

    pub fn forward(&self, c: u8) -> u8 {
        Self::encypher(c, self.position, self.ring, self.id.forward_wiring())
    }

    pub fn backward(&self, c: u8) -> u8 {
        Self::encypher(c, self.position, self.ring, self.id.backward_wiring())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_backward_invert() {
        for &id in &RotorId::ALL {
            let rotor = Rotor::new(id, 5, 3);
            for c in 0..26u8 {
                assert_eq!(rotor.backward(rotor.forward(c)), c);
            }
        }
    }

    #[test]
    fn notch_table_matches_historical_turnovers() {
        assert!(RotorId::I.is_at_notch(16));
        assert!(RotorId::III.is_at_notch(21));
        assert!(RotorId::VI.is_at_notch(25));
        assert!(RotorId::VI.is_at_notch(12));
        assert!(!RotorId::Beta.is_at_notch(0));
    }

    #[test]
    fn thin_rotors_never_turn_over() {
        let mut r = Rotor::new(RotorId::Beta, 10, 0);
        r.turnover();
        assert_eq!(r.position, 10);
    }
}
