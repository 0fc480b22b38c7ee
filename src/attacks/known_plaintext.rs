//! Known-plaintext attack: exact match, plugboard inference from mismatches,
//! or consistency-checking a user-supplied plugboard cycle.

use crate::config::Configuration;
use crate::error::Result;
use crate::machine::Enigma;
use crate::stream::ConfigStream;

pub enum Mode {
    Exact,
    InputPlugboard,
    /// Raw anchor list, e.g. `"P0 E2 P3"`.
    CyclePlugboard(String),
}

/// Attempts to build a plugboard of at most `limit` pairs that turns
/// `decrypted` into `plaintext`, following the mismatched-position pairing
/// rule from the reference attack. Returns `None` if any position conflicts
/// with an already-accepted pair.
fn infer_plugboard(decrypted: &str, plaintext: &str, limit: usize) -> Option<Vec<(char, char)>> {
    let mut plugs: Vec<(char, char)> = Vec::new();
    let letter_used = |plugs: &[(char, char)], c: char| plugs.iter().any(|&(a, b)| a == c || b == c);

    for (uchar, pchar) in decrypted.chars().zip(plaintext.chars()) {
        if uchar != pchar {
            if plugs.contains(&(uchar, pchar)) || plugs.contains(&(pchar, uchar)) {
                continue;
            }
            if letter_used(&plugs, pchar) || letter_used(&plugs, uchar) {
                return None;
            }
            plugs.push((uchar, pchar));
        } else if letter_used(&plugs, pchar) {
            return None;
        }
    }

    if plugs.len() <= limit {
        Some(plugs)
    } else {
        None
    }
}

struct Anchor {
    from_plaintext: bool,
    index: usize,
}

fn parse_anchors(anchors: &str) -> Option<Vec<Anchor>> {
    anchors
        .split_whitespace()
        .map(|tok| {
            let mut chars = tok.chars();
            let tag = chars.next()?;
            let index: usize = chars.as_str().parse().ok()?;
            match tag {
                'P' => Some(Anchor { from_plaintext: true, index }),
                'E' => Some(Anchor { from_plaintext: false, index }),
                _ => None,
            }
        })
        .collect()
}

/// Checks every consecutive (wrapping) anchor pair agrees, per the asymmetric
/// rule: an anchor tagged `P` reads its *current* character from the
/// ciphertext and its *next* character (when it is itself the next anchor)
/// from the decrypt; `E` does the reverse.
fn cycle_is_consistent(anchors: &[Anchor], ciphertext: &str, decrypted: &str) -> bool {
    let ciphertext: Vec<char> = ciphertext.chars().collect();
    let decrypted: Vec<char> = decrypted.chars().collect();
    let n = anchors.len();
    if n == 0 {
        return true;
    }
    for i in 0..n {
        let current = &anchors[i];
        let next = &anchors[(i + 1) % n];
        let current_char = if current.from_plaintext {
            ciphertext[current.index]
        } else {
            decrypted[current.index]
        };
        let next_char = if next.from_plaintext {
            decrypted[next.index]
        } else {
            ciphertext[next.index]
        };
        if current_char != next_char {
            return false;
        }
    }
    true
}

pub fn run(
    ciphertext: &str,
    plaintext: &str,
    stream: ConfigStream,
    mode: Mode,
    plugboard_limit: usize,
    steps: usize,
) -> Result<Vec<Configuration>> {
    let anchors = if let Mode::CyclePlugboard(ref raw) = mode {
        parse_anchors(raw)
    } else {
        None
    };

    let mut out = Vec::new();
    for item in stream.take(steps) {
        let (decrypted, mut config) = item?;
        if decrypted == plaintext {
            out.push(config);
            continue;
        }
        match &mode {
            Mode::Exact => {}
            Mode::InputPlugboard => {
                if let Some(plugs) = infer_plugboard(&decrypted, plaintext, plugboard_limit) {
                    config.plugboard = plugs;
                    let plugboard = config.to_plugboard()?;
                    let mut machine =
                        Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard)?;
                    if machine.process(ciphertext, &config.key)? == plaintext {
                        out.push(config);
                    }
                }
            }
            Mode::CyclePlugboard(_) => {
                if let Some(anchors) = &anchors {
                    if cycle_is_consistent(anchors, ciphertext, &decrypted) {
                        out.push(config);
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_a_consistent_single_pair() {
        let plugs = infer_plugboard("HELLO", "HELLA", 1);
        assert_eq!(plugs, Some(vec![('O', 'A')]));
    }

    #[test]
    fn reuses_an_already_accepted_pair_without_conflict() {
        let plugs = infer_plugboard("ABC", "BAD", 2);
        assert_eq!(plugs, Some(vec![('A', 'B'), ('C', 'D')]));
    }

    #[test]
    fn rejects_a_letter_claimed_by_two_different_pairs() {
        // A is already paired with B; a later mismatch tries to pair A with C.
        let plugs = infer_plugboard("AB", "BC", 2);
        assert_eq!(plugs, None);
    }

    #[test]
    fn exceeding_the_plugboard_limit_fails() {
        let plugs = infer_plugboard("ABCD", "WXYZ", 2);
        assert!(plugs.is_none());
    }

    #[test]
    fn cycle_anchors_round_trip() {
        let anchors = parse_anchors("P0 E2 P3").unwrap();
        assert_eq!(anchors.len(), 3);
        assert!(anchors[0].from_plaintext);
        assert!(!anchors[1].from_plaintext);
    }
}
