//! Replay driver - runs a protocol script against the engine.
//!
//! Reads protocol lines from a file (or stdin), writes the report to
//! stdout, and can export the final board as CSV.

use clap::Parser;
use frostboard::protocol;
use frostboard::{Command, Scoreboard};
use serde::Serialize;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

/// Deterministic contest scoreboard replay
#[derive(Parser, Debug)]
#[command(name = "frostboard", version, about)]
struct Args {
    /// Protocol script to replay (stdin if omitted)
    input: Option<PathBuf>,

    /// Write the final board to this CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

/// One CSV row of the exported board
#[derive(Serialize)]
struct CsvRow {
    name: String,
    rank: usize,
    solved: u32,
    penalty: u64,
    cells: String,
}

fn export_csv(board: &mut Scoreboard, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = board.flush();
    let mut writer = csv::Writer::from_path(path)?;
    for row in &snapshot {
        writer.serialize(CsvRow {
            name: row.name.clone(),
            rank: row.rank,
            solved: row.solved,
            penalty: row.penalty,
            cells: row
                .cells
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut board = Scoreboard::new();
    for line in input.lines() {
        let Some(cmd) = protocol::parse_line(line) else {
            continue;
        };
        let is_end = cmd == Command::End;
        for report in protocol::execute(&mut board, &cmd) {
            writeln!(out, "{}", report)?;
        }
        if is_end {
            break;
        }
    }
    out.flush()?;

    if let Some(path) = &args.export_csv {
        export_csv(&mut board, path)?;
    }

    Ok(())
}
