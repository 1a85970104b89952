use clap::Parser;
use filekeep::retime::handle_retime;
use filekeep::{logging, RetimeCli};
use std::process;

fn main() {
    let cli = RetimeCli::parse();
    logging::init(cli.common.verbose);

    match handle_retime(&cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            process::exit(1);
        },
    }
}
