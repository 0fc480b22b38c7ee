use clap::Parser;
use log::info;

use enigma_workbench::cli::{self, Cli};

fn main() {
    env_logger::init();
    info!("starting enigma-workbench");

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
