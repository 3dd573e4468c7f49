use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;

use decision_rs::config::ServerConfig;
use decision_rs::server;
use decision_rs::table::{engine, DecisionContext, TableLoader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a table against a context and print the resulting context
    Eval {
        /// Path to the rule table (.csv, .yaml or .yml)
        #[arg(short, long)]
        table: PathBuf,

        /// JSON file holding the starting context
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Context assignments applied after --context, e.g. `--set age=20`
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Report which rule fired on stderr
        #[arg(long)]
        trace: bool,
    },
    /// Print a parsed table as YAML
    Show {
        /// Path to the rule table
        #[arg(short, long)]
        table: PathBuf,
    },
    /// Serve a directory of tables over HTTP
    Serve(ServerConfig),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();

    let args = Args::parse();

    match args.command {
        Commands::Eval {
            table,
            context,
            set,
            trace,
        } => {
            env_logger::init();

            let rules = TableLoader::new()
                .load(&table)
                .with_context(|| format!("Failed to load table {}", table.display()))?;

            let mut ctx = match context {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read context {}", path.display()))?;
                    let json: serde_json::Value = serde_json::from_str(&content)?;
                    DecisionContext::from_json(&json)?
                }
                None => DecisionContext::new(),
            };
            for assignment in &set {
                ctx.assign(assignment)?;
            }

            let outcome = engine::evaluate_traced(&rules, &mut ctx);
            if trace {
                match outcome.rule_index {
                    Some(index) => eprintln!("Matched rule {}", index + 1),
                    None => eprintln!("No rule matched"),
                }
            }

            println!("{}", serde_json::to_string_pretty(&ctx.to_json())?);

            if outcome.matched() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Show { table } => {
            env_logger::init();

            let rules = TableLoader::new()
                .load(&table)
                .with_context(|| format!("Failed to load table {}", table.display()))?;
            print!("{}", serde_yaml::to_string(&rules)?);

            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve(config) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "info,tower_http=debug".into()),
                )
                .init();

            log::info!("Serving tables from {}", config.tables_dir.display());
            server::serve(&config).await?;

            Ok(ExitCode::SUCCESS)
        }
    }
}
