//! nslog CLI
//!
//! Inspect and exercise namespaced level rules from the command line.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "nslog")]
#[command(about = "nslog - namespaced level rules", long_about = None)]
struct Cli {
    #[command(flatten)]
    rules: commands::RuleArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the effective level for a namespace and the rule that decided it
    Resolve(commands::resolve::ResolveArgs),
    /// Send a message through the registry's gate to the console
    Emit(commands::emit::EmitArgs),
    /// List the configured rules in registration order
    Rules,
}

fn main() {
    let cli = Cli::parse();

    let result = commands::build_registry(&cli.rules).and_then(|registry| match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(&registry, args),
        Commands::Emit(args) => commands::emit::execute(&registry, args),
        Commands::Rules => commands::rules::execute(&registry),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
