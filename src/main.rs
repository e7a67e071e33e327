use clap::Parser;
use miette::Result;
use tokens_to::cli::{Cli, Commands};
use tokens_to::output::Printer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Css(args) => tokens_to::cli::css::run(args, &printer)?,
        Commands::Json(args) => tokens_to::cli::json::run(args, &printer)?,
        Commands::Completions(args) => tokens_to::cli::completions::run(args)?,
    }

    Ok(())
}
