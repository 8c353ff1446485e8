//! Trueline - command-line entry point

mod cli;

use clap::Parser;
use tracing::{error, info};

use cli::commands::{self, Session};
use cli::{Cli, Commands};
use trueline::config::AppConfig;

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            std::process::exit(2);
        }
    };

    config.logging.init();
    info!("trueline starting: {}", config.digest());

    let mut session = Session::new(config, cli.json);
    if let Err(e) = run(&mut session, &cli.command) {
        error!(error = %e, "command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(session: &mut Session, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Convert(args) => commands::convert(session, args),
        Commands::TrueOdds(args) => commands::true_odds(session, args),
        Commands::Devig(args) => commands::devig_market(session, args),
        Commands::Compare(args) => commands::compare(session, args),
        Commands::Edge(args) => commands::edge(session, args),
        Commands::Kelly(args) => commands::kelly(session, args),
    }
}
