//! entable CLI
//!
//! Compiles an entity definition file to SQLite `CREATE TABLE` statements.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use entable::{Database, create_all_tables_sql};
use thiserror::Error;

mod config;
mod entities;
#[cfg(test)]
mod scratch;

use config::ConfigError;
use entities::DefinitionError;

#[derive(Parser)]
#[command(name = "entable")]
#[command(author, version, about = "Compile entity definitions to SQLite CREATE TABLE statements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CREATE TABLE statement of every entity
    Generate {
        /// Entity definitions file (defaults to the one named in .config/entable.styx)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Validate entity definitions without printing SQL
    Check {
        /// Entity definitions file (defaults to the one named in .config/entable.styx)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read the current directory: {0}")]
    CurrentDir(std::io::Error),

    #[error("{} doesn't name an entities file; pass --file", .0.display())]
    NoEntities(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Definition {
        path: PathBuf,
        source: DefinitionError,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("entable=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate { file } => {
            let database = load_database(file)?;
            for stmt in create_all_tables_sql(&database) {
                println!("{stmt};");
            }
        }
        Commands::Check { file } => {
            let database = load_database(file)?;
            println!("{} entities OK", database.len());
        }
    }
    Ok(())
}

fn load_database(file: Option<PathBuf>) -> Result<Database, CliError> {
    let cwd = std::env::current_dir().map_err(CliError::CurrentDir)?;
    load_database_from(file, &cwd)
}

/// Load `file`, or the entities file of the project enclosing `start`.
fn load_database_from(file: Option<PathBuf>, start: &Path) -> Result<Database, CliError> {
    let path = match file {
        Some(path) => path,
        None => {
            let project = config::load_from(start)?;
            project
                .entities
                .ok_or(CliError::NoEntities(project.config_path))?
        }
    };

    let source = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;

    let database = entities::parse(&source)
        .and_then(|file| file.to_database())
        .map_err(|source| CliError::Definition {
            path: path.clone(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        entities = database.len(),
        "loaded entity definitions"
    );

    Ok(database)
}
