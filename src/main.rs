//! CLI entry point for the bitart image generator

use bitart::io::cli::{Cli, Session};
use bitart::io::logging;
use clap::Parser;

fn main() -> bitart::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.quiet);

    let mut session = Session::new(cli);
    session.process().map(|_| ())
}
