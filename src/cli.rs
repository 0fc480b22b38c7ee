//! Command-line surface: process a text, run an attack, recover a ring
//! setting, or print the notch table.

use std::fs;
use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use crate::attacks::{ic_attack, known_plaintext, plugboard_ic, repetition};
use crate::config::Configuration;
use crate::error::{Result, WorkbenchError};
use crate::machine::Enigma;
use crate::model::Model;
use crate::rotor::RotorId;
use crate::scoring;
use crate::stream::{BruteStream, ConfigStream, DictStream};

#[derive(Parser)]
#[command(name = "enigma-workbench", about = "A cryptanalysis workbench for the Enigma cipher family")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Encrypt or decrypt a text under an explicit configuration
    Process {
        text: String,
        #[arg(long)]
        configuration: String,
    },
    /// Attack a ciphertext
    Attack(AttackArgs),
    /// Recover a ring setting from a count of leading wrong characters
    RecoverRing {
        #[arg(long)]
        configuration: String,
        #[arg(long)]
        errors: usize,
    },
    /// Print the turnover notch table for every rotor
    NotchTable,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AttackMode {
    I,
    P,
    R,
}

#[derive(Parser)]
pub struct AttackArgs {
    pub text: String,

    #[arg(long)]
    pub output: Option<String>,

    #[arg(long)]
    pub bruteforce: bool,

    #[arg(long)]
    pub dictionary: Option<String>,

    #[arg(long, value_enum)]
    pub mode: AttackMode,

    #[arg(long)]
    pub model: Option<String>,

    /// Attack I: keep the top N rotor/key candidates by index of coincidence
    #[arg(long, conflicts_with = "plugboard")]
    pub rotor: Option<usize>,

    /// Attack I: recover the plugboard for each dictionary line
    #[arg(long, conflicts_with = "rotor")]
    pub plugboard: bool,

    /// Attack P: the known plaintext to search for
    #[arg(long)]
    pub known_plaintext: Option<String>,

    /// Attack P: infer the plugboard from mismatched positions
    #[arg(long, conflicts_with = "cycle_plugboard")]
    pub input_plugboard: bool,

    /// Attack P: verify a plugboard cycle of anchors, e.g. "P0 E2 P3"
    #[arg(long, conflicts_with = "input_plugboard")]
    pub cycle_plugboard: Option<String>,

    /// Attack R: text is a repeated-plaintext ciphertext ("A:B" or "A...B")
    #[arg(long)]
    pub repeated_text: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Process { text, configuration } => run_process(&text, &configuration),
        Command::Attack(args) => run_attack(args),
        Command::RecoverRing { configuration, errors } => run_recover_ring(&configuration, errors),
        Command::NotchTable => {
            run_notch_table();
            Ok(())
        }
    }
}

fn run_process(text: &str, configuration: &str) -> Result<()> {
    let config = Configuration::parse_json_line(configuration)?;
    info!("processing text under configuration {}", config.to_json_line()?);
    let plugboard = config.to_plugboard()?;
    let mut machine = Enigma::new(&config.rotors, config.reflector, &config.ring, &config.key, plugboard)?;
    let out = machine.process(text, &config.key)?;
    println!("{out}");
    Ok(())
}

fn run_recover_ring(configuration: &str, errors: usize) -> Result<()> {
    let config = Configuration::parse_json_line(configuration)?;
    let fixed = crate::ring_recovery::recover_ring(&config, errors)?;
    println!("{}", fixed.to_json_line()?);
    Ok(())
}

fn run_notch_table() {
    for &id in &RotorId::ALL {
        let notches: Vec<String> = id
            .notches()
            .iter()
            .map(|&p| crate::alphabet::index_to_letter(p).to_string())
            .collect();
        println!("{id}: {}", notches.join(", "));
    }
}

fn parse_model(raw: &str) -> Result<Model> {
    #[derive(serde::Deserialize)]
    struct RawModel {
        #[serde(rename = "Rotors")]
        rotors: Vec<String>,
        #[serde(rename = "RotorsCount")]
        rotors_count: usize,
        #[serde(rename = "Duplicates")]
        duplicates: bool,
        #[serde(rename = "Reflectors")]
        reflectors: Vec<String>,
        #[serde(rename = "Plugboard")]
        plugboard: usize,
    }
    let raw: RawModel = serde_json::from_str(raw)?;
    let rotors = raw
        .rotors
        .iter()
        .map(|s| RotorId::parse(s).ok_or_else(|| WorkbenchError::InvalidConfiguration(format!("unknown rotor {s:?}"))))
        .collect::<Result<Vec<_>>>()?;
    let reflectors = raw
        .reflectors
        .iter()
        .map(|s| {
            crate::reflector::ReflectorId::parse(s)
                .ok_or_else(|| WorkbenchError::InvalidConfiguration(format!("unknown reflector {s:?}")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Model {
        rotors,
        rotors_count: raw.rotors_count,
        duplicates: raw.duplicates,
        reflectors,
        plugboard: raw.plugboard,
    })
}

fn read_dictionary(path: &str) -> Result<Vec<String>> {
    Ok(fs::read_to_string(path)?.lines().map(str::to_string).collect())
}

fn write_lines(path: &str, lines: &[String]) -> Result<()> {
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

fn run_attack(args: AttackArgs) -> Result<()> {
    if !args.bruteforce && args.dictionary.is_none() {
        return Err(WorkbenchError::MissingParameter(
            "attack requires --bruteforce or --dictionary".to_string(),
        ));
    }

    match args.mode {
        AttackMode::I => run_attack_ic(&args),
        AttackMode::P => run_attack_known_plaintext(&args),
        AttackMode::R => run_attack_repetition(&args),
    }
}

fn require_model(args: &AttackArgs) -> Result<Model> {
    let raw = args
        .model
        .as_deref()
        .ok_or_else(|| WorkbenchError::MissingParameter("--model".to_string()))?;
    parse_model(raw)
}

fn build_stream(text: String, args: &AttackArgs) -> Result<ConfigStream> {
    if args.bruteforce {
        let model = require_model(args)?;
        Ok(ConfigStream::Brute(BruteStream::new(text, &model)))
    } else {
        let path = args.dictionary.as_deref().expect("checked by run_attack");
        let lines = read_dictionary(path)?;
        Ok(ConfigStream::Dict(DictStream::new(text, lines)))
    }
}

fn run_attack_ic(args: &AttackArgs) -> Result<()> {
    if args.plugboard {
        let path = args
            .dictionary
            .as_deref()
            .ok_or_else(|| WorkbenchError::MissingParameter("--plugboard requires --dictionary".to_string()))?;
        let model = require_model(args)?;
        let lines = read_dictionary(path)?;
        let results = plugboard_ic::run(&args.text, &lines, model.plugboard)?;
        let out: Vec<String> = results.iter().map(|c| c.to_json_line()).collect::<Result<_>>()?;
        write_or_print(args.output.as_deref(), &out)
    } else if let Some(top_k) = args.rotor {
        let stream = build_stream(args.text.clone(), args)?;
        let candidates = ic_attack::run(stream, top_k, usize::MAX)?;
        let out: Vec<String> = candidates
            .iter()
            .map(|c| c.configuration.to_json_line())
            .collect::<Result<_>>()?;
        info!("kept {} candidates, best ic {:.4}", out.len(), scoring::ic(&args.text));
        write_or_print(args.output.as_deref(), &out)
    } else {
        Err(WorkbenchError::MissingParameter(
            "attack mode I requires --rotor or --plugboard".to_string(),
        ))
    }
}

fn run_attack_known_plaintext(args: &AttackArgs) -> Result<()> {
    let plaintext = args
        .known_plaintext
        .as_deref()
        .ok_or_else(|| WorkbenchError::MissingParameter("--known-plaintext".to_string()))?;
    let mode = if let Some(anchors) = &args.cycle_plugboard {
        known_plaintext::Mode::CyclePlugboard(anchors.clone())
    } else if args.input_plugboard {
        known_plaintext::Mode::InputPlugboard
    } else {
        known_plaintext::Mode::Exact
    };
    let stream = build_stream(args.text.clone(), args)?;
    let limit = args
        .model
        .as_deref()
        .map(parse_model)
        .transpose()?
        .map_or(0, |m| m.plugboard);
    let results = known_plaintext::run(&args.text, plaintext, stream, mode, limit, usize::MAX)?;
    let out: Vec<String> = results.iter().map(Configuration::to_json_line).collect::<Result<_>>()?;
    write_or_print(args.output.as_deref(), &out)
}

fn run_attack_repetition(args: &AttackArgs) -> Result<()> {
    if !args.repeated_text {
        return Err(WorkbenchError::MissingParameter(
            "attack mode R requires --repeated-text".to_string(),
        ));
    }
    let (fragments, _) = repetition::parse_repeated_text(&args.text)?;
    let first_fragment = fragments.first().cloned().unwrap_or_default();
    let stream = build_stream(first_fragment, args)?;
    let results = repetition::run(&args.text, stream, usize::MAX)?;
    let out: Vec<String> = results.iter().map(Configuration::to_json_line).collect::<Result<_>>()?;
    write_or_print(args.output.as_deref(), &out)
}

fn write_or_print(output: Option<&str>, lines: &[String]) -> Result<()> {
    match output {
        Some(path) => write_lines(path, lines),
        None => {
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
    }
}
