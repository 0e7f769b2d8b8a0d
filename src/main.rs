use std::io::Read;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::error;

use quizsmith::app::convert_use_case::ConvertUseCase;
use quizsmith::app::create_quiz_use_case::CreateQuizUseCase;
use quizsmith::config::Config;
use quizsmith::infra::chat_backend::ChatBackend;
use quizsmith::infra::reply_archive::FsReplyArchive;
use quizsmith::logging;
use quizsmith::observability;
use quizsmith::server::{start_server, AppState};
use quizsmith::storage::{FsQuizStore, QuizStore};

#[derive(Parser)]
#[command(name = "quizsmith")]
#[command(about = "LLM-backed quiz conversion and storage service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Convert quiz text once and print the records as JSON
    Convert {
        /// Input file; reads stdin when omitted
        #[arg(long)]
        input: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();
    observability::init_metrics();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let api_key = config.backend.api_key()?;
    let archive = Arc::new(FsReplyArchive::new(config.storage.history_dir.clone()));
    let backend = Arc::new(ChatBackend::new(&config.backend, api_key).with_archive(archive));
    let convert = Arc::new(ConvertUseCase::new(backend, config.prompt.system.joined()));

    match cli.command {
        Commands::Serve { port } => {
            let store: Arc<dyn QuizStore> =
                Arc::new(FsQuizStore::new(config.storage.quizzes_dir.clone()));
            let create_quiz = Arc::new(CreateQuizUseCase::new(convert.clone(), store.clone()));
            let state = AppState {
                convert,
                create_quiz,
                store,
                auth: config.auth.clone(),
            };
            start_server(state, port).await?;
        }
        Commands::Convert { input } => {
            let text = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            match convert.convert(&text).await {
                Ok(reply) => {
                    println!("{}", serde_json::to_string_pretty(&reply.records)?);
                    eprintln!("✅ {} questions parsed", reply.accepted);
                }
                Err(e) => {
                    error!("conversion failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
