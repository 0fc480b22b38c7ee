//! Top-K index-of-coincidence rotor/configuration attack.

use crate::config::Configuration;
use crate::error::Result;
use crate::scoring;
use crate::stream::ConfigStream;

/// One retained candidate, ordered ascending by `score` so the weakest entry
/// sits at index 0.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub score: f64,
    pub configuration: Configuration,
}

/// Runs `stream` for up to `steps` candidates, keeping the `top_k` with the
/// highest index of coincidence, returned ascending by score.
pub fn run(stream: ConfigStream, top_k: usize, steps: usize) -> Result<Vec<Candidate>> {
    let mut held: Vec<Candidate> = Vec::with_capacity(top_k);

    for item in stream.take(steps) {
        let (plaintext, configuration) = item?;
        let score = scoring::ic(&plaintext);

        if held.len() < top_k {
            held.push(Candidate { score, configuration });
            held.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap());
        } else if score > held[0].score {
            held[0] = Candidate { score, configuration };
            held.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap());
        }
    }

    Ok(held)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::reflector::ReflectorId;
    use crate::rotor::RotorId;

    #[test]
    fn keeps_the_highest_scoring_candidates_ascending() {
        let model = Model {
            rotors: vec![RotorId::I, RotorId::II, RotorId::III],
            rotors_count: 3,
            duplicates: false,
            reflectors: vec![ReflectorId::B],
            plugboard: 0,
        };
        let stream = ConfigStream::Brute(crate::stream::BruteStream::new("AAAA", &model));
        let candidates = run(stream, 3, 2000).unwrap();
        assert_eq!(candidates.len(), 3);
        for pair in candidates.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
    }
}
