//! CLI entry point for the chassis tile layout editor

use clap::Parser;
use chassistile::io::cli::{Cli, CommandRunner};
use chassistile::io::logging;

fn main() -> chassistile::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    let mut runner = CommandRunner::new(cli, std::io::stdout().lock());
    runner.run()
}
