//! dungen: seeded dungeon layout generator
//!
//! Generates a layout and prints it as ASCII followed by a summary line.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dg_core::dungeon::{ConfigError, Dungeon, DungeonConfig};
use dg_core::Seed;

/// Seeded room-and-door dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate a seeded room-and-door dungeon", long_about = None)]
struct Args {
    /// JSON configuration file; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long = "cols")]
    cols: Option<usize>,

    /// Grid height
    #[arg(long = "rows")]
    rows: Option<usize>,

    /// Seed (number or text); omitted means a random seed
    #[arg(short = 's', long = "seed")]
    seed: Option<String>,

    /// Minimum distance between a door and a room corner
    #[arg(long = "door-padding")]
    door_padding: Option<usize>,

    /// Smallest room width
    #[arg(long = "room-cols-min")]
    room_cols_min: Option<usize>,

    /// Largest room width
    #[arg(long = "room-cols-max")]
    room_cols_max: Option<usize>,

    /// Smallest room height
    #[arg(long = "room-rows-min")]
    room_rows_min: Option<usize>,

    /// Largest room height
    #[arg(long = "room-rows-max")]
    room_rows_max: Option<usize>,

    /// Upper bound on the number of rooms
    #[arg(short = 'n', long = "max-rooms")]
    max_rooms: Option<usize>,

    /// Cap on the area of a single room
    #[arg(long = "max-area")]
    max_area: Option<usize>,

    /// Print only the summary line
    #[arg(long = "summary-only")]
    summary_only: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl Args {
    /// Build the generation config: file values first, then flag overrides
    fn to_config(&self) -> Result<DungeonConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => DungeonConfig::default(),
        };

        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(seed) = &self.seed {
            config.seed = Some(Seed::from(seed.as_str()));
        }
        if let Some(padding) = self.door_padding {
            config.door_padding = padding;
        }
        if let Some(min) = self.room_cols_min {
            config.room_cols.min = min;
        }
        if let Some(max) = self.room_cols_max {
            config.room_cols.max = max;
        }
        if let Some(min) = self.room_rows_min {
            config.room_rows.min = min;
        }
        if let Some(max) = self.room_rows_max {
            config.room_rows.max = max;
        }
        if let Some(max_rooms) = self.max_rooms {
            config.max_rooms = max_rooms;
        }
        if self.max_area.is_some() {
            config.max_area = self.max_area;
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,dg_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("dungen: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = args.to_config()?;
    let dungeon = Dungeon::new(&config)?;

    if !args.summary_only {
        print!("{}", dungeon);
    }
    println!("{}", summary(&dungeon));
    Ok(())
}

fn summary(dungeon: &Dungeon) -> String {
    let stats = dungeon.stats();
    format!(
        "seed {} | {}x{} | {} rooms | {} doors | {} attempts ({} abandoned)",
        dungeon.seed(),
        dungeon.cols(),
        dungeon.rows(),
        stats.rooms,
        stats.doors,
        stats.attempts,
        stats.abandoned
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::dungeon::SizeRange;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("dungen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let config = parse(&[]).to_config().unwrap();
        assert_eq!(config, DungeonConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--cols", "80", "--rows", "60", "--seed", "0", "--door-padding", "2",
            "--room-cols-min", "4", "--room-rows-max", "7", "-n", "12", "--max-area", "40",
        ])
        .to_config()
        .unwrap();

        assert_eq!((config.cols, config.rows), (80, 60));
        assert_eq!(config.seed, Some(Seed::Text("0".to_string())));
        assert_eq!(config.door_padding, 2);
        assert_eq!(config.room_cols, SizeRange::new(4, 10));
        assert_eq!(config.room_rows, SizeRange::new(5, 7));
        assert_eq!(config.max_rooms, 12);
        assert_eq!(config.max_area, Some(40));
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse(&["--config", "/nonexistent/dungen.json"]);
        assert!(matches!(args.to_config(), Err(CliError::Io(_))));
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("dungen-test-{}.json", std::process::id()));
        fs::write(&path, r#"{ "cols": 30, "rows": 20, "max_rooms": 4 }"#).unwrap();

        let args = parse(&["--config", path.to_str().unwrap(), "--rows", "25"]);
        let config = args.to_config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.cols, 30);
        assert_eq!(config.rows, 25);
        assert_eq!(config.max_rooms, 4);
    }

    #[test]
    fn test_invalid_config_reported() {
        let args = parse(&["--cols", "2", "--seed", "1"]);
        let config = args.to_config().unwrap();
        let err = CliError::from(Dungeon::new(&config).unwrap_err());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_summary_line() {
        let config = parse(&["--seed", "9", "-n", "1"]).to_config().unwrap();
        let dungeon = Dungeon::new(&config).unwrap();
        assert_eq!(
            summary(&dungeon),
            "seed 9 | 40x40 | 1 rooms | 0 doors | 0 attempts (0 abandoned)"
        );
    }
}
