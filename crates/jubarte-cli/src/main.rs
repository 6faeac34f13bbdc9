use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "jubarte", version, about = "Spaced-repetition study tracker")]
struct Cli {
    /// JSON data file (overrides storage.data_file from the config)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new study topic and schedule its reviews
    Add {
        /// Topic title
        title: String,
        /// Free-text notes
        #[arg(long, short, default_value = "")]
        notes: String,
    },
    /// List scheduled reviews
    List {
        /// Only reviews due today (UTC)
        #[arg(long)]
        due_today: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Record the result of a review
    Review {
        /// Item ID
        item_id: String,
        /// Review result: again, hard, good or easy
        #[arg(long)]
        result: String,
    },
    /// Export reviews to an .ics calendar file
    Export {
        /// Output file
        output: PathBuf,
    },
    /// Remove a topic and its reviews
    Remove {
        /// Topic title
        title: String,
    },
    /// Remove all topics and reviews
    Clear,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let data_file = cli.data_file;
    let result = match cli.command {
        Commands::Add { title, notes } => commands::items::add(data_file, &title, &notes),
        Commands::List { due_today, json } => commands::items::list(data_file, due_today, json),
        Commands::Review { item_id, result } => commands::review::run(data_file, &item_id, &result),
        Commands::Export { output } => commands::export::run(data_file, &output),
        Commands::Remove { title } => commands::items::remove(data_file, &title),
        Commands::Clear => commands::items::clear(data_file),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
