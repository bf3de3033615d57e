use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A keypress classified for the navigation state machine. Anything the
/// browser does not bind maps to `Unknown` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Backspace,
    Quit,
    OpenTerminal,
    Unknown,
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Key::Quit,
            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Key::Quit,
            (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Key::Up,
            (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Key::Down,
            (_, KeyCode::Enter) => Key::Enter,
            (_, KeyCode::Backspace) => Key::Backspace,
            (_, KeyCode::Char('c')) => Key::OpenTerminal,
            _ => Key::Unknown,
        }
    }
}

/// Blocks until the next input event. Returns `None` for non-key events
/// (resize, focus) so the caller redraws and reads again.
pub fn read_key() -> io::Result<Option<Key>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(Key::from(key))),
        _ => Ok(None),
    }
}

/// Scoped ownership of the terminal: raw mode plus the alternate screen.
///
/// The prior terminal state must come back on every exit path, so release is
/// wired three ways: an explicit `restore()` on the normal path, `Drop` for
/// `?` propagation out of `main`, and a chained panic hook so a panic report
/// lands on a usable screen. All three funnel through the same idempotent
/// reset.
pub struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen. Fails if stdin is not a
    /// terminal, which is fatal at startup.
    pub fn enter() -> Result<(Self, Tui)> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            reset_terminal();
            hook(info);
        }));

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok((Self { restored: false }, terminal))
    }

    pub fn restore(&mut self) {
        if !self.restored {
            self.restored = true;
            reset_terminal();
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn reset_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
