pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::analyze::AnalyzeArgs;
use commands::config::ConfigArgs;
use commands::suggest::SuggestArgs;

#[derive(Debug, Parser)]
#[command(
    name = "skumatch",
    about = "SKU matching operator CLI",
    long_about = "Propose mappings between catalog SKUs that describe the same product, inspect how a SKU is read, and check effective configuration.",
    after_help = "Examples:\n  skumatch suggest --catalog catalog.json --mapped mapped.txt\n  skumatch suggest --catalog catalog.json --sku PTB-GBC-HIO\n  skumatch analyze --sku VANTAGE-GBC-HIO --title \"Vantage Golf Ball Case\"\n  skumatch config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Score the catalog and print a JSON suggestion report for human review")]
    Suggest(SuggestArgs),
    #[command(about = "Print the structural and title analysis of a single SKU as JSON")]
    Analyze(AnalyzeArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config(ConfigArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Suggest(args) => {
            logging::init_from_config(args.config.as_deref());
            commands::suggest::run(&args)
        }
        Command::Analyze(args) => commands::analyze::run(&args),
        Command::Config(args) => commands::config::run(&args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
