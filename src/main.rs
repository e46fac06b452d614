use clap::Parser;
use miette::Result;
use reflexpx::cli::{Cli, Commands};
use reflexpx::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => reflexpx::cli::convert::run(args, &printer)?,
        Commands::Init(args) => reflexpx::cli::init::run(args, &printer)?,
        Commands::Check(args) => reflexpx::cli::check::run(args, &printer)?,
        Commands::Completions(args) => reflexpx::cli::completions::run(args)?,
    }

    Ok(())
}
