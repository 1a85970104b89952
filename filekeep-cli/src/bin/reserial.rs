use clap::Parser;
use filekeep::reserial::handle_reserial;
use filekeep::{logging, ReserialCli};
use std::io::{self, IsTerminal};
use std::process;

fn main() {
    let cli = ReserialCli::parse();
    logging::init(cli.common.verbose);
    let use_color = !cli.no_color && io::stdout().is_terminal();

    match handle_reserial(&cli, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        },
    }
}
