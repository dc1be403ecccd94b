use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use lttr::{
    config::{self, database},
    core::{
        Tracker,
        forms::{LetterDraft, ResponseDraft, SupplyDraft},
        query, report,
    },
    errors::{Error, Result},
};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "lttr", about = "Track letters, responses and supplies")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show profitability metrics
    Dashboard,
    /// Print a backup of all data
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace all data with a backup
    Import {
        /// Backup file produced by `export`
        file: PathBuf,
    },
    /// Delete everything and restore the sample companies
    Reset,
    /// Mark a letter as having received a response
    Confirm {
        /// Letter id
        letter_id: Uuid,
    },
    /// Log a batch of letters
    AddLetter {
        /// Recipient company
        #[arg(long)]
        company: String,
        /// Expected response per letter
        #[arg(long)]
        expected: String,
        /// Copies sent
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Log a response
    AddResponse {
        /// Company that responded
        #[arg(long)]
        company: String,
        /// Amount received
        #[arg(long)]
        amount: String,
        /// Letter this answers
        #[arg(long)]
        letter: Option<Uuid>,
        /// Notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Log a supply purchase
    AddSupply {
        /// What was bought
        #[arg(long)]
        name: String,
        /// Amount paid
        #[arg(long)]
        cost: String,
        /// Units bought
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load configuration and open the database
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let db = database::create_connection(&app_config.database_url())
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 4. Build the store (loads and seeds)
    let mut tracker = Tracker::open(db, app_config.company_seeds()).await;

    run(&mut tracker, cli.command.unwrap_or(Command::Dashboard)).await
}

async fn run(tracker: &mut Tracker, command: Command) -> Result<()> {
    let now = chrono::Utc::now();
    match command {
        Command::Dashboard => {
            println!("{}", report::render_dashboard(&tracker.dashboard(now), tracker.settings()));
            let due = query::letters_due_for_follow_up(tracker.state(), now);
            if !due.is_empty() {
                println!("\n{} letters need a follow-up:", due.len());
                for letter in due {
                    println!("  {} ({})", letter.company_name, letter.date_sent.date_naive());
                }
            }
        }
        Command::Export { output } => {
            let text = tracker.export_bundle()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    info!("Exported to {}", path.display());
                }
                None => println!("{text}"),
            }
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            match tracker.import_bundle(&text).await {
                Ok(summary) => println!("{summary}"),
                Err(e) => {
                    println!("{e}");
                    return Err(e);
                }
            }
        }
        Command::Reset => {
            tracker.reset_all().await;
            println!("All data reset");
        }
        Command::Confirm { letter_id } => {
            if !tracker.set_confirmed(letter_id).await {
                let err = Error::LetterNotFound { id: letter_id };
                println!("{err}");
                return Err(err);
            }
            println!("Letter {letter_id} confirmed");
        }
        Command::AddLetter {
            company,
            expected,
            quantity,
            notes,
        } => {
            let draft = LetterDraft {
                company_name: company,
                expected_response: expected,
                quantity,
                notes,
                ..LetterDraft::new(now)
            };
            let letter = validated(draft.can_save(), draft.validate())?;
            println!("Letter {} logged", letter.id);
            tracker.add_letter(letter).await;
        }
        Command::AddResponse {
            company,
            amount,
            letter,
            notes,
        } => {
            let draft = ResponseDraft {
                company_name: company,
                amount,
                linked_letter_id: letter,
                notes,
                ..ResponseDraft::new(now)
            };
            let response = validated(draft.can_save(), draft.validate())?;
            println!("Response {} logged", response.id);
            tracker.add_response(response).await;
        }
        Command::AddSupply {
            name,
            cost,
            quantity,
        } => {
            let draft = SupplyDraft {
                name,
                cost,
                quantity,
                ..SupplyDraft::new(now)
            };
            let supply = validated(draft.can_save(), draft.validate())?;
            println!("Supply {} logged", supply.id);
            tracker.add_supply(supply).await;
        }
    }
    Ok(())
}

/// A draft that cannot be saved is a no-op for the store; report why.
fn validated<T>(can_save: bool, parsed: Result<T>) -> Result<T> {
    if !can_save {
        warn!("Required fields missing, nothing saved");
    }
    parsed.inspect_err(|e| println!("Nothing saved: {e}"))
}
