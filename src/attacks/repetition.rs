//! Repetition attack: the same plaintext enciphered more than once under one
//! initial configuration, found via a pad built from the first fragment.

use crate::config::Configuration;
use crate::error::{Result, WorkbenchError};
use crate::machine::Enigma;
use crate::stream::ConfigStream;

/// Splits a composite repeated-text argument into its identical-length
/// fragments and the filler-letter gap following each one.
///
/// `:` separates adjacent repetitions (all gaps zero). `.` marks one unknown
/// letter per dot between repetitions; the gap list is derived by counting
/// consecutive empty splits between non-empty fragments, dropping the
/// leading (pre-first-fragment) count, and appending a trailing zero.
pub fn parse_repeated_text(s: &str) -> Result<(Vec<String>, Vec<usize>)> {
    if s.contains(':') {
        let fragments: Vec<String> = s.split(':').map(str::to_string).collect();
        let gaps = vec![0; fragments.len()];
        Ok((fragments, gaps))
    } else if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        let mut gaps = Vec::new();
        let mut counter = 0usize;
        for part in &parts {
            if part.is_empty() {
                counter += 1;
            } else {
                gaps.push(counter + 1);
                counter = 0;
            }
        }
        let mut gaps: Vec<usize> = gaps.into_iter().skip(1).collect();
        gaps.push(0);
        let fragments: Vec<String> = parts.into_iter().filter(|p| !p.is_empty()).map(str::to_string).collect();
        Ok((fragments, gaps))
    } else {
        Err(WorkbenchError::MalformedInput(
            "repeated text must use ':' or '.' separators".to_string(),
        ))
    }
}

fn build_pad(first_guess: &str, fragment_count: usize, gaps: &[usize]) -> String {
    let mut pad = String::new();
    for n in 0..fragment_count {
        pad.push_str(first_guess);
        pad.push_str(&"x".repeat(gaps[n]));
    }
    pad
}

fn slice_fragments(reencrypted: &str, fragment_len: usize, gaps: &[usize]) -> Vec<String> {
    let chars: Vec<char> = reencrypted.chars().collect();
    let mut out = Vec::with_capacity(gaps.len());
    let mut start = 0;
    let mut end = fragment_len;
    for &gap in gaps {
        out.push(chars[start..end].iter().collect());
        start = end + gap;
        end = start + fragment_len;
    }
    out
}

pub fn run(repeated_text: &str, stream: ConfigStream, steps: usize) -> Result<Vec<Configuration>> {
    let (fragments, gaps) = parse_repeated_text(repeated_text)?;
    let fragment_len = fragments.first().map_or(0, |f| f.chars().count());

    let mut out = Vec::new();
    for item in stream.take(steps) {
        let (first_guess, config) = item?;

        let plugboard = config.to_plugboard()?;
        let mut machine = Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard)?;

        let pad = build_pad(&first_guess, fragments.len(), &gaps);
        let reencrypted = machine.process(&pad, &config.key)?;
        let observed = slice_fragments(&reencrypted, fragment_len, &gaps);

        if observed == fragments {
            out.push(config);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugboard::Plugboard;
    use crate::reflector::ReflectorId;
    use crate::rotor::RotorId;
    use crate::stream::DictStream;

    #[test]
    fn colon_form_has_zero_gaps() {
        let (fragments, gaps) = parse_repeated_text("ABC:DEF").unwrap();
        assert_eq!(fragments, vec!["ABC", "DEF"]);
        assert_eq!(gaps, vec![0, 0]);
    }

    #[test]
    fn dot_form_derives_the_documented_gap_list() {
        let (fragments, gaps) = parse_repeated_text("NOBCB.....MHJBD").unwrap();
        assert_eq!(fragments, vec!["NOBCB", "MHJBD"]);
        assert_eq!(gaps, vec![5, 0]);
    }

    #[test]
    fn rejects_text_without_a_recognised_separator() {
        assert!(parse_repeated_text("NOSEPARATORHERE").is_err());
    }

    #[test]
    fn run_recovers_the_configuration_behind_a_genuine_repeat() {
        let config = Configuration {
            rotors: vec![RotorId::I, RotorId::II, RotorId::III],
            reflector: ReflectorId::B,
            ring: vec![0, 0, 0],
            plugboard: Vec::new(),
            key: vec![0, 0, 0],
        };
        let mut machine = Enigma::new(
            &config.rotors,
            config.reflector,
            &config.ring,
            &config.key,
            Plugboard::identity(),
        )
        .unwrap();

        let plain = "HELLOTHERE";
        let frag0 = machine.process(plain, &config.key).unwrap();
        let frag1 = machine.process_continuing(plain);
        let repeated_text = format!("{frag0}:{frag1}");

        let stream = ConfigStream::Dict(DictStream::new(frag0.clone(), vec![config.to_json_line().unwrap()]));
        let results = run(&repeated_text, stream, 10).unwrap();
        assert_eq!(results, vec![config]);
    }
}
