//! Terminal output: frame drawing, screen session and stop polling.

use crate::grid::Grid;
use crate::world::{Seeding, TickReport};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

/// Owns the terminal for the duration of a run: raw mode, hidden cursor,
/// cleared screen. [`Screen::restore`] gives it back; `Drop` covers panic
/// and early-return paths so the cursor never stays hidden.
pub struct Screen {
    out: BufWriter<Stdout>,
    rows_drawn: u16,
    restored: bool,
}

impl Screen {
    /// Take over the terminal.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = BufWriter::new(io::stdout());
        execute!(
            out,
            cursor::Hide,
            Clear(ClearType::All),
            Clear(ClearType::Purge),
            cursor::MoveTo(0, 0)
        )?;
        Ok(Self {
            out,
            rows_drawn: 0,
            restored: false,
        })
    }

    /// Overdraw the whole frame: cell rows, then the status line.
    pub fn draw(&mut self, grid: &Grid, report: TickReport, seeding: &Seeding) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        render_frame(&mut self.out, grid, report, seeding)?;
        self.rows_drawn = grid.height() as u16 + 1;
        self.out.flush()
    }

    /// Give the terminal back. With `clear` the frame is wiped (user-initiated
    /// stop); otherwise the final frame stays visible and the cursor is parked
    /// below it for the game-over message.
    pub fn restore(&mut self, clear: bool) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        if clear {
            execute!(
                self.out,
                Clear(ClearType::All),
                Clear(ClearType::Purge),
                cursor::MoveTo(0, 0),
                cursor::Show
            )?;
        } else {
            execute!(self.out, cursor::MoveTo(0, self.rows_drawn), cursor::Show)?;
        }
        terminal::disable_raw_mode()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.restore(false);
    }
}

fn render_frame<W: Write>(
    out: &mut W,
    grid: &Grid,
    report: TickReport,
    seeding: &Seeding,
) -> io::Result<()> {
    let width = grid.width();
    let mut row = String::with_capacity(width);

    for chunk in grid.cells().chunks(width) {
        row.clear();
        row.extend(chunk.iter().map(|&alive| if alive { '#' } else { '.' }));
        queue!(out, Print(&row), Print("\r\n"))?;
    }
    let status = format!(
        "Live cells: {}/{} {} Tick: {}",
        report.live_cells,
        grid.cells().len(),
        seeding,
        report.generation
    );
    // Trailing Clear covers leftovers when the status line grows shorter.
    queue!(out, Print(status), Clear(ClearType::UntilNewLine))?;
    Ok(())
}

/// Drain pending input without blocking; true if a quit key was pressed.
pub fn quit_pending() -> io::Result<bool> {
    let mut quit = false;
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_quit(&key) {
                quit = true;
            }
        }
    }
    Ok(quit)
}

/// Wait out the rest of the frame, waking early only for a quit key.
/// Returns true if the user asked to stop.
pub fn pace_until(deadline: Instant) -> io::Result<bool> {
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        if event::poll(deadline - now)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_quit(&key) {
                    return Ok(true);
                }
            }
        }
    }
}

/// Quit keys: `q`, `Esc`, and `Ctrl-C` (raw mode delivers it as a key event).
fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;

    #[test]
    fn test_frame_rows_use_hash_and_dot() {
        let mut grid = Grid::new(4, 2);
        grid.set(0, 0, true);
        grid.set(2, 1, true);
        let seeding = Seeding::Random { seed: 7 };
        let report = TickReport { generation: 3, live_cells: 2 };

        let mut buf = Vec::new();
        render_frame(&mut buf, &grid, report, &seeding).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("#...\r\n"));
        assert!(text.contains("..#.\r\n"));
        assert!(text.contains("Live cells: 2/8 Seed: 7 Tick: 3"));
    }

    #[test]
    fn test_status_line_names_the_shape() {
        let mut grid = Grid::new(8, 8);
        let glider = patterns::lookup("glider").unwrap();
        let live = patterns::stamp(&mut grid, glider, 0, 0);
        let seeding = Seeding::Shape {
            shape: glider,
            x_offset: 0,
            y_offset: 0,
        };
        let report = TickReport { generation: 0, live_cells: live };

        let mut buf = Vec::new();
        render_frame(&mut buf, &grid, report, &seeding).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Shape: glider"));
        assert!(text.contains("Live cells: 5/64"));
    }

    #[test]
    fn test_quit_keys() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert!(is_quit(&press(KeyCode::Char('q'))));
        assert!(is_quit(&press(KeyCode::Esc)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&press(KeyCode::Char('c'))));
        assert!(!is_quit(&press(KeyCode::Char('x'))));
        assert!(!is_quit(&press(KeyCode::Enter)));
    }
}
