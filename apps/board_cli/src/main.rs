use anyhow::Result;
use board_client::ActivityClient;
use clap::{Parser, Subcommand};

/// Command-line client for the activity sign-up API.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the activities backend.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current roster.
    List,
    /// Sign an email up for an activity.
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove an email from an activity.
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let client = ActivityClient::new(&args.server_url)?;
    match args.command {
        Command::List => {
            let roster = client.fetch_activities().await?;
            for (name, activity) in &roster {
                println!("{name}");
                println!("  {}", activity.description);
                println!("  Schedule: {}", activity.schedule);
                println!(
                    "  Availability: {} of {} spots left",
                    activity.spots_left(),
                    activity.max_participants
                );
                for participant in &activity.participants {
                    println!("  - {participant}");
                }
                println!();
            }
        }
        Command::Signup { activity, email } => {
            let message = client.signup(&activity, &email).await?;
            println!("{message}");
        }
        Command::Unregister { activity, email } => {
            let message = client.unregister(&activity, &email).await?;
            println!("{message}");
        }
    }

    Ok(())
}
