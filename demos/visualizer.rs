//! Terminal A* visualizer using crossterm.
//!
//! Run: cargo run --bin visualizer -- --size 25
//!
//! Each cell is drawn two columns wide. Grey cells are free, black are
//! walls, yellow is the start, turquoise the goal; during a search green
//! marks the frontier, red the visited set and purple the final path.

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridstar_core::{Coord, Layout};
use gridstar_demos::{DEFAULT_DENSITY, DEFAULT_SIZE, Editor, Effect, HELP_TEXT, Input};
use gridstar_search::EngineConfig;

/// Largest grid side the terminal renderer accepts.
const MAX_SIZE: i32 = 200;

/// Idle poll interval when no search is animating.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "visualizer", about = "Step-by-step A* search on an editable grid")]
struct Args {
    /// Grid side length (ignored with --map).
    #[arg(
        long,
        default_value_t = DEFAULT_SIZE,
        value_parser = clap::value_parser!(i32).range(1..=i64::from(MAX_SIZE))
    )]
    size: i32,
    /// Load the grid from a text layout using `.`, `#`, `S` and `G`.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Delay between animated search steps, in milliseconds.
    #[arg(long, default_value_t = 15)]
    delay_ms: u64,
    /// Cancel a search after this many expansion steps.
    #[arg(long)]
    max_steps: Option<usize>,
    /// Wall probability for the scatter command.
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    density: f64,
    /// Seed for the scatter command.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = EngineConfig {
        max_steps: args.max_steps,
        ..EngineConfig::default()
    };
    let mut editor = match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let layout = Layout::parse(&text)?;
            let (rows, cols) = (layout.grid.rows(), layout.grid.cols());
            if rows > MAX_SIZE || cols > MAX_SIZE {
                let msg = format!("map is {rows}x{cols}, the limit is {MAX_SIZE}x{MAX_SIZE}");
                return Err(msg.into());
            }
            Editor::from_layout(layout, config, args.density, args.seed)
        }
        None => Editor::new(args.size, config, args.density, args.seed),
    };

    let mut term = Terminal::enter()?;
    event_loop(&mut editor, &mut term.out, Duration::from_millis(args.delay_ms))
}

/// Raw-mode alternate screen, restored on drop.
struct Terminal {
    out: Stdout,
}

impl Terminal {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn event_loop(editor: &mut Editor, out: &mut Stdout, delay: Duration) -> Result<(), Box<dyn Error>> {
    loop {
        draw(editor, out)?;
        let Some(input) = read_input(IDLE_POLL)? else {
            continue;
        };
        match editor.update(input) {
            Some(Effect::Quit) => return Ok(()),
            Some(Effect::Animate) => {
                if animate(editor, out, delay)? == Some(Effect::Quit) {
                    return Ok(());
                }
            }
            None => {}
        }
    }
}

/// Step the running search once per frame, still listening for Esc / q.
fn animate(editor: &mut Editor, out: &mut Stdout, delay: Duration) -> io::Result<Option<Effect>> {
    while editor.is_searching() {
        if let Some(input) = read_input(delay)? {
            if editor.update(input) == Some(Effect::Quit) {
                return Ok(Some(Effect::Quit));
            }
            if !editor.is_searching() {
                break;
            }
        }
        editor.step_search();
        draw(editor, out)?;
    }
    Ok(None)
}

fn read_input(timeout: Duration) -> io::Result<Option<Input>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let input = match event::read()? {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => key_input(code),
        Event::Mouse(me) => {
            let c = Coord::new(me.row as i32, me.column as i32 / 2);
            match me.kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(Input::PrimaryAt(c))
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => Some(Input::SecondaryAt(c)),
                _ => None,
            }
        }
        _ => None,
    };
    Ok(input)
}

fn key_input(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Right),
        KeyCode::Char(' ') => Some(Input::Primary),
        KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => Some(Input::Secondary),
        KeyCode::Enter => Some(Input::Run),
        KeyCode::Esc => Some(Input::Cancel),
        KeyCode::Char('r') => Some(Input::ClearOverlay),
        KeyCode::Char('c') => Some(Input::ClearAll),
        KeyCode::Char('n') => Some(Input::Scatter),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Input::Quit),
        _ => None,
    }
}

fn draw(editor: &Editor, out: &mut impl Write) -> io::Result<()> {
    let grid = editor.grid();
    for row in 0..grid.rows() {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        for col in 0..grid.cols() {
            let c = Coord::new(row, col);
            let (r, g, b) = editor.tile(c).rgb();
            let glyph = if c == editor.cursor() { "[]" } else { "  " };
            queue!(
                out,
                SetBackgroundColor(Color::Rgb { r, g, b }),
                SetForegroundColor(Color::White),
                Print(glyph)
            )?;
        }
        queue!(out, ResetColor)?;
    }

    let y = grid.rows() as u16 + 1;
    queue!(
        out,
        cursor::MoveTo(0, y),
        terminal::Clear(ClearType::CurrentLine),
        Print(editor.status())
    )?;
    for (i, line) in HELP_TEXT.lines().enumerate() {
        queue!(
            out,
            cursor::MoveTo(0, y + 1 + i as u16),
            terminal::Clear(ClearType::CurrentLine),
            Print(line)
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_range_checked() {
        assert!(Args::try_parse_from(["visualizer", "--size", "70000"]).is_err());
        assert!(Args::try_parse_from(["visualizer", "--size", "0"]).is_err());
        let args = Args::try_parse_from(["visualizer", "--size", "200"]).unwrap();
        assert_eq!(args.size, 200);
        let args = Args::try_parse_from(["visualizer"]).unwrap();
        assert_eq!(args.size, DEFAULT_SIZE);
    }
}
