//! Ring-setting recovery from the count of leading wrong characters produced
//! by an almost-correct configuration.

use crate::config::Configuration;
use crate::error::Result;
use crate::keyarith;
use crate::rotor::RotorId;

/// Given a configuration and the number of leading characters that decrypted
/// incorrectly, derives the ring setting at fault and the matching key shift,
/// returning the corrected configuration.
pub fn recover_ring(config: &Configuration, errors: usize) -> Result<Configuration> {
    let mut new_ring = errors;
    let mut position_from_right: usize = 1;

    if errors < 26 {
        new_ring = 26 - errors;
    } else {
        while new_ring >= 26 {
            new_ring /= 26;
            position_from_right += 1;
        }
    }

    let mut config = config.clone();
    let len = config.ring.len();
    let idx = len - position_from_right;

    config.ring[idx] = new_ring as u8;

    let rotors: [RotorId; 0] = [];
    let mut key_digit = vec![config.key[idx]];
    for _ in 0..new_ring {
        key_digit = keyarith::increase_key(&key_digit, &rotors);
    }
    config.key[idx] = key_digit[0];

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflector::ReflectorId;

    fn sample() -> Configuration {
        Configuration {
            rotors: vec![RotorId::I, RotorId::II, RotorId::III],
            reflector: ReflectorId::B,
            ring: vec![0, 0, 0],
            plugboard: Vec::new(),
            key: vec![0, 0, 0],
        }
    }

    #[test]
    fn twelve_errors_sets_the_rightmost_ring_to_fourteen() {
        let config = sample();
        let fixed = recover_ring(&config, 12).unwrap();
        assert_eq!(fixed.ring, vec![0, 0, 14]);
        assert_eq!(fixed.key[2], 14);
    }

    #[test]
    fn errors_past_26_walk_left_through_the_ring_positions() {
        let config = sample();
        let fixed = recover_ring(&config, 52).unwrap();
        assert_eq!(fixed.ring[1], 2);
        assert_eq!(fixed.ring[0], 0);
        assert_eq!(fixed.ring[2], 0);
    }
}
