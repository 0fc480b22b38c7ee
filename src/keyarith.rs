//! Key odometer arithmetic: shifting a display key under the stepping laws
//! without actually running the machine letter-by-letter.

use crate::rotor::RotorId;

fn increment(v: u8) -> u8 {
    (v + 1) % 26
}

fn decrement(v: u8) -> u8 {
    (v + 25) % 26
}

/// Advances `key` (leftmost first) one position under `rotors`' double-step
/// rules, as if one letter had been processed.
pub fn increase_key(key: &[u8], rotors: &[RotorId]) -> Vec<u8> {
    if key.is_empty() {
        return Vec::new();
    }
    let n = key.len();
    let mut out = key.to_vec();
    let old_last = out[n - 1];
    out[n - 1] = increment(old_last);

    if n > 1 {
        let last_at_notch = rotors[n - 1].is_at_notch(old_last);
        if last_at_notch && !rotors[n - 2].is_thin() {
            let carried = increase_key(&out[..n - 1], &rotors[..n - 1]);
            out[..n - 1].copy_from_slice(&carried);
        } else if n > 2 && !rotors[n - 3].is_thin() && rotors[n - 2].is_at_notch(out[n - 2]) {
            let old_mid = out[n - 2];
            out[n - 2] = increment(old_mid);
            let carried = increase_key(&out[..n - 2], &rotors[..n - 2]);
            out[..n - 2].copy_from_slice(&carried);
        }
    }
    out
}

/// The exact inverse of [`increase_key`].
pub fn decrease_key(key: &[u8], rotors: &[RotorId]) -> Vec<u8> {
    if key.is_empty() {
        return Vec::new();
    }
    let n = key.len();
    let mut out = key.to_vec();
    out[n - 1] = decrement(out[n - 1]);
    let new_last = out[n - 1];

    if n > 1 {
        let last_at_notch = rotors[n - 1].is_at_notch(new_last);
        if last_at_notch && !rotors[n - 2].is_thin() {
            let carried = decrease_key(&out[..n - 1], &rotors[..n - 1]);
            out[..n - 1].copy_from_slice(&carried);
        } else if n > 2 && !rotors[n - 3].is_thin() && rotors[n - 2].is_at_notch(decrement(out[n - 2]))
        {
            let old_mid = out[n - 2];
            out[n - 2] = decrement(old_mid);
            let carried = decrease_key(&out[..n - 2], &rotors[..n - 2]);
            out[..n - 2].copy_from_slice(&carried);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_unaffected() {
        assert_eq!(increase_key(&[], &[]), Vec::<u8>::new());
        assert_eq!(decrease_key(&[], &[]), Vec::<u8>::new());
    }

    #[test]
    fn single_letter_key_rolls_over_without_notch_logic() {
        let rotors = [RotorId::I];
        assert_eq!(increase_key(&[25], &rotors), vec![0]);
        assert_eq!(decrease_key(&[0], &rotors), vec![25]);
    }

    #[test]
    fn increase_then_decrease_is_identity() {
        let rotors = [RotorId::I, RotorId::II, RotorId::III];
        let mut key = vec![0u8, 3, 20];
        for _ in 0..40 {
            let next = increase_key(&key, &rotors);
            let back = decrease_key(&next, &rotors);
            assert_eq!(back, key);
            key = next;
        }
    }

    #[test]
    fn double_step_propagates_through_the_odometer() {
        let rotors = [RotorId::I, RotorId::II, RotorId::III];
        // III is at its notch (V=21); stepping carries into II as well.
        let key = vec![0u8, 3, 21];
        assert_eq!(increase_key(&key, &rotors), vec![0, 4, 22]);
    }

    #[test]
    fn beta_rotor_blocks_carry_into_it() {
        // Position 1 (I) sits at its own notch (Q=16), which would normally
        // double-step its left neighbour; Beta in that slot never turns.
        let rotors = [RotorId::Beta, RotorId::I, RotorId::III];
        let key = vec![5u8, 16, 0];
        let next = increase_key(&key, &rotors);
        assert_eq!(next, vec![5, 16, 1]);
    }
}
