//! Binary entrypoint for the row-operation puzzle.
//!
//! Commands:
//! - `play` (default) - interactive puzzle on the terminal
//! - `stats` - list saved games
//! - `export [--output <path>]` - write saved games as CSV
//! - `init` - create a starter `rowop.toml`
//!
//! Type `help` at the `>` prompt for the in-game commands.
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Local};
use clap::{Parser, Subcommand};
use log::{info, warn};

use rowop_puzzle::config::{Config, Settings};
use rowop_puzzle::game::input::{Key, PointerEvent};
use rowop_puzzle::game::{AddSign, AppliedOperation, BoardView, OperationKind, ScaleMode};
use rowop_puzzle::generator::SourceKind;
use rowop_puzzle::puzzle::clock_seed;
use rowop_puzzle::session::{format_clock, SystemClock};
use rowop_puzzle::stats::{export_file_name, FileStore, StatsHistory};
use rowop_puzzle::{format_cell, GameObserver, Puzzle};

#[derive(Parser)]
#[command(name = "rowop-puzzle")]
#[command(about = "Reduce a random matrix to upper-triangular form with row operations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "rowop.toml", global = true)]
    config: String,

    /// Number of rows (overrides the config file)
    #[arg(long, global = true)]
    rows: Option<usize>,

    /// Number of columns (overrides the config file)
    #[arg(long, global = true)]
    cols: Option<usize>,

    /// Seed for the matrix generator
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Cell source: sine or chacha
    #[arg(long, global = true)]
    source: Option<SourceKind>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play on the terminal
    Play,
    /// List saved games
    Stats,
    /// Export saved games as CSV
    Export {
        /// Output file; defaults to a dated name in the current directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a default configuration file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        init_logging(None, cli.verbose);
        if std::path::Path::new(&cli.config).exists() {
            bail!("{} already exists", cli.config);
        }
        Config::create_default(&cli.config)?;
        println!("Wrote default configuration to {}", cli.config);
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config)?;
    init_logging(Some(&config), cli.verbose);
    let store = FileStore::new(&config.storage.data_dir);

    match cli.command {
        Some(Commands::Stats) => {
            print_stats(&StatsHistory::load(&store));
            Ok(())
        }
        Some(Commands::Export { output }) => {
            let csv = StatsHistory::load(&store).export_csv()?;
            let path = output
                .unwrap_or_else(|| PathBuf::from(export_file_name(Local::now().date_naive())));
            std::fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
            println!("Exported stats to {}", path.display());
            Ok(())
        }
        _ => {
            let mut settings = config.puzzle.settings(clock_seed(&SystemClock));
            if let Some(rows) = cli.rows {
                settings.rows = rows;
            }
            if let Some(cols) = cli.cols {
                settings.cols = cols;
            }
            if let Some(seed) = cli.seed {
                settings.seed = seed;
            }
            if let Some(source) = cli.source {
                settings.source = source;
            }
            play(settings, store)
        }
    }
}

fn init_logging(config: Option<&Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 => config.map(Config::log_level).unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    // RUST_LOG still wins when set
    builder.parse_default_env();
    let _ = builder.try_init();
}

fn print_stats(history: &StatsHistory) {
    if history.is_empty() {
        println!("No games recorded yet.");
        return;
    }
    println!("{:<24} {:>8} {:>4} {:>6}  Seed", "Date", "Time", "Ops", "Size");
    for record in history.records() {
        println!(
            "{:<24} {:>8} {:>4} {:>6}  {}",
            record.date.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            format_clock(Duration::milliseconds(record.time_used_ms)),
            record.operations_used,
            record.matrix_size,
            record.seed
        );
    }
}

/// Prints the board and messages to stdout.
struct TerminalObserver;

impl GameObserver for TerminalObserver {
    fn render(&mut self, board: &BoardView<'_>) {
        println!();
        for (i, row) in board.matrix.rows().into_iter().enumerate() {
            let cursor = if board.highlighted == Some(i) { '>' } else { ' ' };
            let mark = if board.selected.contains(&i) { '*' } else { ' ' };
            let cells: Vec<String> = row
                .iter()
                .map(|v| format!("{:>7}", format_cell(*v)))
                .collect();
            println!("{}{} R{} [{} ]", cursor, mark, i + 1, cells.join(""));
        }
        if let Some(op) = board.operation {
            println!("   operation: {}", op);
        }
    }

    fn show_message(&mut self, text: &str) {
        println!("{}", text);
    }

    fn on_game_start(&mut self) {
        println!("Timer started.");
    }

    fn on_operation_applied(&mut self, operation: &AppliedOperation, operations: u32) {
        println!("{}   (operations: {})", operation, operations);
    }

    fn on_win(&mut self, elapsed: Duration, operations: u32) {
        println!(
            "Solved in {} with {} operations!",
            format_clock(elapsed),
            operations
        );
    }
}

const HELP: &str = "\
Commands:
  op add|swap|scale      choose an operation
  row N                  select row N (1-based)
  sign +|-               add or subtract the selected rows
  mul V / div V          multiply or divide the selected row by V
  cancel                 drop the current selection
  key K [K...]           VIM keys: a s d q e f space enter esc backspace 0-9 . -
  new                    new matrix with a fresh seed
  restart                same matrix again
  size R C               change the matrix size
  seed S                 play a specific seed
  time                   show the timer
  stats                  list saved games
  export [path]          write saved games as CSV
  help / quit";

fn play(settings: Settings, store: FileStore) -> Result<()> {
    let mut puzzle = Puzzle::new(settings, store, SystemClock)?;
    let mut observer = TerminalObserver;
    info!(
        "Playing {} (seed {})",
        settings.matrix_size(),
        settings.seed
    );
    println!("Bring the matrix to upper-triangular form. Type `help` for commands.");
    puzzle.refresh(&mut observer);

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if matches!(words.first(), Some(&"quit") | Some(&"exit") | Some(&"q")) && words.len() == 1
        {
            break;
        }
        if let Err(e) = run_command(&mut puzzle, &mut observer, &words) {
            println!("{:#}", e);
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn parse_row(word: Option<&&str>) -> Result<usize> {
    let n: usize = word
        .context("missing row number")?
        .parse()
        .context("row must be a number")?;
    if n == 0 {
        bail!("rows are numbered from 1");
    }
    Ok(n - 1)
}

fn run_command(
    puzzle: &mut Puzzle<FileStore>,
    observer: &mut TerminalObserver,
    words: &[&str],
) -> Result<()> {
    let Some(&command) = words.first() else {
        return Ok(());
    };
    // Game errors are already shown through the observer
    match command {
        "op" => {
            let op = match words.get(1).copied() {
                Some("add") => OperationKind::Add,
                Some("swap") => OperationKind::Swap,
                Some("scale") | Some("mul") => OperationKind::Scale,
                other => bail!("unknown operation {:?}", other.unwrap_or("")),
            };
            let _ = puzzle.pointer(PointerEvent::Operation(op), observer);
        }
        "row" => {
            let row = parse_row(words.get(1))?;
            let _ = puzzle.pointer(PointerEvent::Row(row), observer);
        }
        "sign" => {
            let sign = match words.get(1).copied() {
                Some("+") | Some("add") => AddSign::Add,
                Some("-") | Some("sub") => AddSign::Subtract,
                other => bail!("unknown sign {:?}", other.unwrap_or("")),
            };
            let _ = puzzle.pointer(PointerEvent::Sign(sign), observer);
        }
        "mul" | "div" => {
            let mode = if command == "mul" {
                ScaleMode::Multiply
            } else {
                ScaleMode::Divide
            };
            let input = words.get(1).copied().unwrap_or("").to_string();
            let _ = puzzle.pointer(PointerEvent::Scale { mode, input }, observer);
        }
        "cancel" => {
            let _ = puzzle.pointer(PointerEvent::Cancel, observer);
        }
        "key" => {
            for token in &words[1..] {
                let key = Key::parse(token).with_context(|| format!("unknown key {:?}", token))?;
                if puzzle.key(key, observer).is_err() {
                    break;
                }
            }
        }
        "new" => puzzle.new_matrix(observer)?,
        "restart" => puzzle.new_game(observer)?,
        "size" => {
            let rows: usize = words.get(1).context("usage: size R C")?.parse()?;
            let cols: usize = words.get(2).context("usage: size R C")?.parse()?;
            let settings = Settings {
                rows,
                cols,
                ..puzzle.settings()
            };
            puzzle.apply_settings(settings, observer)?;
        }
        "seed" => {
            let seed: u64 = words.get(1).context("usage: seed S")?.parse()?;
            let settings = Settings {
                seed,
                ..puzzle.settings()
            };
            puzzle.apply_settings(settings, observer)?;
        }
        "time" => println!(
            "{}   operations: {}",
            puzzle.clock_text(),
            puzzle.operations()
        ),
        "stats" => print_stats(puzzle.history()),
        "export" => {
            let csv = puzzle.export_csv()?;
            let path = words
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(export_file_name(Local::now().date_naive())));
            std::fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
            println!("Exported {} games to {}", puzzle.history().len(), path.display());
        }
        "help" | "?" => println!("{}", HELP),
        other => {
            warn!("Unknown command {:?}", other);
            println!("Unknown command {:?}; type `help`", other);
        }
    }
    Ok(())
}
