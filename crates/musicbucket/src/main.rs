use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use musicbucket_config::AppConfig;
use musicbucket_core::{run_script, BoardStore, TierBoard, TierEditor};

/// Rank music into tiers, with undo/redo over every edit.
#[derive(Parser, Debug)]
#[command(name = "musicbucket", version, about)]
struct Cli {
    /// Config file to use instead of `musicbucket.json` next to the binary.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the board database.
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Create a board from the configured default tiers.
    New {
        list: String,
        /// Comma-separated item ids to put in the bank.
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,
        /// Replace an existing board with the same id.
        #[arg(long)]
        force: bool,
    },
    /// Print a board.
    Show { list: String },
    /// Run an edit script against a board and save the result.
    Edit {
        list: String,
        /// Script file, or `-` for stdin.
        script: PathBuf,
    },
    /// Write a board as JSON.
    Export {
        list: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Store a board read from a JSON file.
    Import { list: String, file: PathBuf },
    /// List stored boards.
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_or_create(&config_path);
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.resolve_data_dir());

    tracing::info!("Starting musicbucket (data dir: {})", data_dir.display());
    let store = BoardStore::open(&data_dir)?;

    run(cli.command, &config, &store)
}

fn run(command: CliCommand, config: &AppConfig, store: &BoardStore) -> Result<()> {
    match command {
        CliCommand::New { list, items, force } => {
            if !force && store.load(&list)?.is_some() {
                bail!("board {list} already exists (use --force to replace it)");
            }
            let items = items.iter().map(|s| s.trim()).filter(|s| !s.is_empty());
            let board = TierBoard::from_presets(&config.default_tiers, items);
            board.validate().context("Invalid --items")?;
            store.save(&list, &board)?;
            tracing::info!("Created board {list} with {} items", board.item_count());
            print!("{board}");
        }
        CliCommand::Show { list } => {
            let stored = load_existing(store, &list)?;
            if let Some(at) = stored.saved_at() {
                println!("{list} (saved {})", at.format("%Y-%m-%d %H:%M:%S"));
            }
            print!("{}", stored.board);
        }
        CliCommand::Edit { list, script } => {
            let stored = load_existing(store, &list)?;
            let text = read_script(&script)?;

            let mut editor = TierEditor::open(stored.board, config);
            let outcome = run_script(&mut editor, &text)
                .with_context(|| format!("Edit script failed for board {list}"))?;
            for rendered in &outcome.shown {
                println!("{rendered}");
            }

            if editor.is_dirty() {
                store.save(&list, editor.current())?;
                editor.mark_saved();
                tracing::info!(
                    "Saved board {list} ({} edits, {} undos, {} redos)",
                    outcome.applied,
                    outcome.undos,
                    outcome.redos
                );
            } else {
                tracing::info!("Board {list} unchanged");
            }
        }
        CliCommand::Export { list, out } => {
            let stored = load_existing(store, &list)?;
            let json = serde_json::to_string_pretty(&stored.board)
                .context("Failed to serialize board")?;
            match out {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        CliCommand::Import { list, file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let board: TierBoard = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse board from {}", file.display()))?;
            let board = TierBoard::new(board.tiers, board.bank_items);
            board
                .validate()
                .with_context(|| format!("Invalid board in {}", file.display()))?;
            store.save(&list, &board)?;
            tracing::info!("Imported board {list} from {}", file.display());
        }
        CliCommand::List => {
            for id in store.list()? {
                println!("{id}");
            }
        }
    }
    Ok(())
}

fn load_existing(store: &BoardStore, list: &str) -> Result<musicbucket_core::StoredBoard> {
    store
        .load(list)?
        .with_context(|| format!("No board named {list}"))
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))
    }
}
