use std::process;

use client::{args, run_client};
use common::GameConfig;

fn main() {
    let config = match args::parse_dimensions(std::env::args().skip(1)) {
        Ok(dimensions) => args::with_overrides(GameConfig::from_env(), dimensions),
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", args::USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = run_client(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!("Thanks for playing.");
}
