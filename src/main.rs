use clap::{Parser, Subcommand};
use podd_edit::commands::edit::{edit_command, parse_assignment};
use podd_edit::commands::search::search_command;
use podd_edit::commands::show::{dump_command, show_command};
use podd_edit::config::{Config, CONFIG_FILE};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "podd-edit")]
#[command(about = "Edit PODD artifacts through metadata-driven forms", long_about = None)]
struct Cli {
    /// Config file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Server base URL, overrides the config file
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the form for an object type, filled from an artifact if given
    Show {
        /// RDF class of the object
        #[arg(long = "type")]
        object_type: String,

        /// Artifact to load values from
        #[arg(long)]
        artifact: Option<String>,
    },

    /// Print an artifact's triples as N-Triples
    Dump {
        #[arg(long)]
        artifact: String,
    },

    /// Set field values on an existing artifact's object and submit
    Edit {
        #[arg(long = "type")]
        object_type: String,

        #[arg(long)]
        artifact: String,

        /// PROPERTY=VALUE, property given by URI or label
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },

    /// Create a new artifact whose top object has the given field values
    Create {
        #[arg(long = "type")]
        object_type: String,

        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },

    /// Search for labelled resources to use as values
    Search {
        term: String,

        /// Types to search, repeatable (default owl:Thing)
        #[arg(long = "search-type")]
        search_types: Vec<String>,

        #[arg(long)]
        artifact: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    match cli.command {
        Commands::Show {
            object_type,
            artifact,
        } => show_command(&config, &object_type, artifact.as_deref()).await,
        Commands::Dump { artifact } => dump_command(&config, &artifact).await,
        Commands::Edit {
            object_type,
            artifact,
            assignments,
        } => edit_command(&config, &object_type, Some(&artifact), &assignments).await,
        Commands::Create {
            object_type,
            assignments,
        } => edit_command(&config, &object_type, None, &assignments).await,
        Commands::Search {
            term,
            search_types,
            artifact,
            json,
        } => search_command(&config, &term, &search_types, artifact.as_deref(), json).await,
    }
}
