//! The plugboard (Steckerbrett): a fixed involution built from disjoint pairs.

use std::fmt;

use crate::alphabet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlugboardError {
    BadToken(String),
    RepeatedLetter(char),
}

impl fmt::Display for PlugboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlugboardError::BadToken(t) => write!(f, "not a two-letter plug pair: {t:?}"),
            PlugboardError::RepeatedLetter(c) => write!(f, "letter {c} wired more than once"),
        }
    }
}

impl std::error::Error for PlugboardError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    wiring: [u8; 26],
}

impl Plugboard {
    pub fn identity() -> Self {
        let mut wiring = [0u8; 26];
        for (i, w) in wiring.iter_mut().enumerate() {
            *w = i as u8;
        }
        Self { wiring }
    }

    /// Builds a plugboard from a set of disjoint letter pairs, e.g. `[('A', 'B')]`
    /// wires A<->B and leaves everything else unplugged.
    pub fn from_pairs(pairs: &[(char, char)]) -> Result<Self, PlugboardError> {
        let mut wiring = Self::identity().wiring;
        let mut used = [false; 26];
        for &(a, b) in pairs {
            let ia = alphabet::letter_to_index(a)
                .ok_or_else(|| PlugboardError::BadToken(format!("{a}{b}")))? as usize;
            let ib = alphabet::letter_to_index(b)
                .ok_or_else(|| PlugboardError::BadToken(format!("{a}{b}")))? as usize;
            if used[ia] {
                return Err(PlugboardError::RepeatedLetter(a));
            }
            if used[ib] {
                return Err(PlugboardError::RepeatedLetter(b));
            }
            used[ia] = true;
            used[ib] = true;
            wiring[ia] = ib as u8;
            wiring[ib] = ia as u8;
        }
        Ok(Self { wiring })
    }

    /// Parses the space-separated two-letter token form, e.g. `"AB CD"`.
    pub fn parse(s: &str) -> Result<Self, PlugboardError> {
        let mut pairs = Vec::new();
        for token in s.split_whitespace() {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() != 2 {
                return Err(PlugboardError::BadToken(token.to_string()));
            }
            pairs.push((chars[0], chars[1]));
        }
        Self::from_pairs(&pairs)
    }

    pub fn swap(&self, c: u8) -> u8 {
        self.wiring[c as usize]
    }

    pub fn pairs(&self) -> Vec<(char, char)> {
        let mut seen = [false; 26];
        let mut out = Vec::new();
        for i in 0..26u8 {
            if seen[i as usize] {
                continue;
            }
            let j = self.wiring[i as usize];
            seen[i as usize] = true;
            seen[j as usize] = true;
            if i != j {
                out.push((alphabet::index_to_letter(i), alphabet::index_to_letter(j)));
            }
        }
        out
    }
}

impl fmt::Display for Plugboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.pairs().iter().map(|(a, b)| format!("{a}{b}")).collect();
        f.write_str(&tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_a_no_op() {
        let pb = Plugboard::identity();
        for c in 0..26u8 {
            assert_eq!(pb.swap(c), c);
        }
    }

    #[test]
    fn swap_is_an_involution() {
        let pb = Plugboard::from_pairs(&[('A', 'B'), ('C', 'D')]).unwrap();
        for c in 0..26u8 {
            assert_eq!(pb.swap(pb.swap(c)), c);
        }
    }

    #[test]
    fn rejects_repeated_letters() {
        assert!(Plugboard::from_pairs(&[('A', 'B'), ('A', 'C')]).is_err());
    }

    #[test]
    fn parse_and_display_round_trip() {
        let pb = Plugboard::parse("AB CD").unwrap();
        assert_eq!(pb.to_string(), "AB CD");
    }
}
