use clap::{Parser, Subcommand};
use rentcollect_workflow::AppContext;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rentcollect-cli")]
#[command(about = "Operator tools for the rental payment collector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Send today's reminders now, outside the daily schedule.
    Collect,
    /// Print the customer roster as the collector reads it.
    Roster,
    /// Load configuration and print it with secrets redacted.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = rentcollect_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Collect => {
            let ctx = AppContext::from_config(&config)?;
            let result = rentcollect_workflow::run_collection_cycle(&ctx).await;
            println!(
                "attempted: {}  succeeded: {}  failed: {}",
                result.attempted, result.succeeded, result.failed
            );
        }
        Commands::Roster => {
            let ctx = AppContext::from_config(&config)?;
            let customers = ctx.roster.try_fetch_customers().await?;
            for customer in &customers {
                println!(
                    "{:<30} {:<16} R$ {}",
                    customer.name, customer.phone_identity, customer.amount
                );
            }
            println!("{} customers", customers.len());
        }
        Commands::CheckConfig => println!("{config:#?}"),
    }

    Ok(())
}
