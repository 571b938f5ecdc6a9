use crate::commands::{
    run_catalog_import, run_quiz_recommend, run_quiz_steps, CatalogImportArgs, RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use toolstack::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ToolStack",
    about = "Serve the ToolStack directory and quiz API, or run the recommender from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the questionnaire or score a set of answers
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
    /// Validate catalog exports before loading them into the service
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// Print the quiz steps and their option values
    Steps,
    /// Rank the configured catalog for the given answers
    Recommend(RecommendArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Parse a tools CSV and summarize the scoring snapshot it produces
    Import(CatalogImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz {
            command: QuizCommand::Steps,
        } => run_quiz_steps(),
        Command::Quiz {
            command: QuizCommand::Recommend(args),
        } => run_quiz_recommend(args),
        Command::Catalog {
            command: CatalogCommand::Import(args),
        } => run_catalog_import(args),
    }
}
