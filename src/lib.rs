pub mod alphabet;
pub mod attacks;
pub mod cli;
pub mod config;
pub mod error;
pub mod key_derivation;
pub mod keyarith;
pub mod machine;
pub mod model;
pub mod plugboard;
pub mod reflector;
pub mod ring_recovery;
pub mod rotor;
pub mod scoring;
pub mod stream;

pub use error::{Result, WorkbenchError};
