use clap::Parser;
use miette::Result;
use vectile::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => vectile::cli::convert::run(args)?,
        Commands::Inspect(args) => vectile::cli::inspect::run(args)?,
        Commands::Completions(args) => vectile::cli::completions::run(args)?,
    }

    Ok(())
}
