//! Scoreboard viewer - steps through a protocol script in a terminal UI.
//!
//! Space steps one command, `r` runs to the end, `q` quits. The board
//! panel shows the ranking as it would appear after a FLUSH at the
//! current point of the script (pending cells included while frozen).

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use frostboard::protocol;
use frostboard::{Command, Scoreboard};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Interactive replay of a contest scoreboard script
#[derive(Parser, Debug)]
#[command(name = "frostboard-tui", version, about)]
struct Args {
    /// Protocol script to step through
    script: PathBuf,
}

struct App {
    board: Scoreboard,
    commands: Vec<Command>,
    cursor: usize,
    /// Report lines from the most recent command
    last_report: Vec<String>,
}

impl App {
    fn new(commands: Vec<Command>) -> Self {
        Self {
            board: Scoreboard::new(),
            commands,
            cursor: 0,
            last_report: Vec::new(),
        }
    }

    fn finished(&self) -> bool {
        self.cursor >= self.commands.len()
    }

    fn step(&mut self) {
        if self.finished() {
            return;
        }
        let cmd = self.commands[self.cursor].clone();
        self.last_report = protocol::execute(&mut self.board, &cmd);
        self.cursor += 1;
        if cmd == Command::End {
            self.cursor = self.commands.len();
        }
    }

    fn run_to_end(&mut self) {
        while !self.finished() {
            self.step();
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(8),
        ])
        .split(frame.size());

    let status = format!(
        "step {}/{}  frozen: {}  [space] step  [r] run  [q] quit",
        app.cursor,
        app.commands.len(),
        if app.board.is_frozen() { "yes" } else { "no" },
    );
    frame.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL).title("frostboard")),
        chunks[0],
    );

    // A probe clone keeps the viewer's flush from touching the replayed
    // engine's query snapshot.
    let snapshot = app.board.clone().flush();
    let rows: Vec<Row> = snapshot
        .iter()
        .map(|r| {
            let cells = r
                .cells
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            Row::new(vec![
                r.rank.to_string(),
                r.name.clone(),
                r.solved.to_string(),
                r.penalty.to_string(),
                cells,
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(24),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(vec!["#", "team", "solved", "penalty", "problems"]).style(Style::default().bold()))
    .block(Block::default().borders(Borders::ALL).title("scoreboard"));
    frame.render_widget(table, chunks[1]);

    let report = app.last_report.join("\n");
    frame.render_widget(
        Paragraph::new(report).block(Block::default().borders(Borders::ALL).title("last output")),
        chunks[2],
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let script = std::fs::read_to_string(&args.script)?;
    let commands: Vec<Command> = script.lines().filter_map(protocol::parse_line).collect();
    let mut app = App::new(commands);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Enter => app.step(),
                    KeyCode::Char('r') => app.run_to_end(),
                    _ => {}
                }
            }
        }
    }
}
