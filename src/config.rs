//! The external, line-delimited JSON configuration record and the typed
//! `Configuration` it parses into.

use serde::{Deserialize, Serialize};

use crate::alphabet;
use crate::error::{Result, WorkbenchError};
use crate::plugboard::Plugboard;
use crate::reflector::ReflectorId;
use crate::rotor::RotorId;

/// The wire format: exactly the field names and shapes used by external
/// dictionary files and attack output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationLine {
    #[serde(rename = "Rotors")]
    pub rotors: String,
    #[serde(rename = "Reflector")]
    pub reflector: String,
    #[serde(rename = "Ring")]
    pub ring: Vec<u8>,
    #[serde(rename = "Plugboard")]
    pub plugboard: String,
    #[serde(rename = "Key")]
    pub key: String,
}

/// A typed, validated configuration: the form every internal component
/// operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub rotors: Vec<RotorId>,
    pub reflector: ReflectorId,
    pub ring: Vec<u8>,
    pub plugboard: Vec<(char, char)>,
    pub key: Vec<u8>,
}

impl Configuration {
    pub fn rotor_count(&self) -> usize {
        self.rotors.len()
    }

    pub fn to_plugboard(&self) -> Result<Plugboard> {
        Ok(Plugboard::from_pairs(&self.plugboard)?)
    }

    pub fn to_line(&self) -> ConfigurationLine {
        let rotors = self
            .rotors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let plugboard = self
            .plugboard
            .iter()
            .map(|(a, b)| format!("{a}{b}"))
            .collect::<Vec<_>>()
            .join(" ");
        let key = self.key.iter().copied().map(alphabet::index_to_letter).collect();
        ConfigurationLine {
            rotors,
            reflector: self.reflector.to_string(),
            ring: self.ring.clone(),
            plugboard,
            key,
        }
    }

    pub fn from_line(line: &ConfigurationLine) -> Result<Self> {
        let rotors: Vec<RotorId> = line
            .rotors
            .split_whitespace()
            .map(|tok| {
                RotorId::parse(tok)
                    .ok_or_else(|| WorkbenchError::InvalidConfiguration(format!("unknown rotor {tok:?}")))
            })
            .collect::<Result<_>>()?;
        let reflector = ReflectorId::parse(&line.reflector).ok_or_else(|| {
            WorkbenchError::InvalidConfiguration(format!("unknown reflector {:?}", line.reflector))
        })?;
        let key: Vec<u8> = line
            .key
            .chars()
            .map(|c| {
                alphabet::letter_to_index(c)
                    .ok_or_else(|| WorkbenchError::InvalidConfiguration(format!("bad key letter {c:?}")))
            })
            .collect::<Result<_>>()?;
        let plugboard = parse_plugboard_tokens(&line.plugboard)?;

        let r = rotors.len();
        if line.ring.len() != r || key.len() != r {
            return Err(WorkbenchError::InvalidConfiguration(format!(
                "rotors/ring/key length mismatch: {} rotors, {} ring, {} key",
                r,
                line.ring.len(),
                key.len()
            )));
        }

        Ok(Configuration {
            rotors,
            reflector,
            ring: line.ring.clone(),
            plugboard,
            key,
        })
    }

    pub fn parse_json_line(s: &str) -> Result<Self> {
        let line: ConfigurationLine = serde_json::from_str(s)?;
        Self::from_line(&line)
    }

    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_line())?)
    }
}

fn parse_plugboard_tokens(s: &str) -> Result<Vec<(char, char)>> {
    let mut pairs = Vec::new();
    for token in s.split_whitespace() {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() != 2 {
            return Err(WorkbenchError::InvalidConfiguration(format!(
                "not a two-letter plug pair: {token:?}"
            )));
        }
        pairs.push((chars[0], chars[1]));
    }
    Ok(pairs)
}
