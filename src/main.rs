//! Single-shot solar position for a fixed facing direction - entry point.

mod azimuth;
mod cli;
mod config;
mod engine;
mod error;
mod offset;
mod report;
mod time_standard;

use engine::{SolarPositionRequest, SpaEngine};
use std::io;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let params = match cli::parse_cli(args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    let wall_clock = params.clock.now();
    let request = SolarPositionRequest::assemble(&params, wall_clock);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let status = report::run(
        &request,
        &SpaEngine,
        params.output.show_inputs,
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    match status {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
