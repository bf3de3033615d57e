use crate::actions::{Action, ExternalCommands};
use crate::config::Config;
use crate::listing::{self, Entry, NavError};
use crate::term::{self, Key, Tui};
use crate::ui;
use color_eyre::Result;
use std::path::{Path, PathBuf};

pub struct App {
    pub current_path: PathBuf,
    pub entries: Vec<Entry>,
    pub selected: usize,
    pub config: Config,
    pub should_quit: bool,
    // One-slot selection memory for returning from a descent (see
    // remember_on_descend / restore_on_ascend).
    last_selected: usize,
}

impl App {
    pub fn new(path: PathBuf) -> Result<Self, NavError> {
        let entries = listing::read_dir(&path)?;
        Ok(Self {
            current_path: path,
            entries,
            selected: 0,
            config: Config::load(),
            should_quit: false,
            last_selected: 0,
        })
    }

    pub fn run(&mut self, terminal: &mut Tui, commands: &ExternalCommands) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            if let Some(key) = term::read_key()? {
                if let Some(action) = self.handle_key(key) {
                    commands.run(&action);
                    // An external program may have painted over us; repaint
                    // from scratch rather than trusting the diff buffer.
                    terminal.clear()?;
                }
            }
        }
        Ok(())
    }

    /// The transition function: one classified keypress in, an optional
    /// side effect out. All state mutation happens here; the selection is
    /// re-clamped after every transition.
    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        let action = match key {
            Key::Up => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                }
                None
            }
            Key::Down => {
                if !self.entries.is_empty() {
                    self.selected += 1;
                }
                None
            }
            Key::Enter => self.open_selected(),
            Key::Backspace => {
                self.ascend();
                None
            }
            Key::Quit => {
                self.should_quit = true;
                None
            }
            Key::OpenTerminal => Some(Action::SpawnTerminal(self.current_path.clone())),
            Key::Unknown => None,
        };
        self.clamp_selection();
        action
    }

    fn open_selected(&mut self) -> Option<Action> {
        let entry = self.entries.get(self.selected)?;
        if entry.is_dir {
            self.descend(entry.path.clone());
            None
        } else {
            Some(Action::EditFile(entry.path.clone()))
        }
    }

    fn descend(&mut self, target: PathBuf) {
        match listing::read_dir(&target) {
            Ok(entries) => {
                self.remember_on_descend(entries.len());
                self.current_path = target;
                self.entries = entries;
            }
            // Target vanished or is unreadable: stay exactly where we are.
            Err(NavError::DirectoryUnreadable { .. }) => {}
        }
    }

    fn ascend(&mut self) {
        let parent = self
            .current_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        match listing::read_dir(&parent) {
            Ok(entries) => {
                self.restore_on_ascend(entries.len());
                self.current_path = parent;
                self.entries = entries;
            }
            Err(NavError::DirectoryUnreadable { .. }) => {}
        }
    }

    // The one-slot memory stands in for a real directory stack: a shrinking
    // listing looks like a descent (remember the cursor), a growing one like
    // a return to the parent (put it back). Sibling directories with equal
    // child counts fool it.
    fn remember_on_descend(&mut self, new_len: usize) {
        if new_len < self.entries.len() {
            self.last_selected = self.selected;
        }
    }

    fn restore_on_ascend(&mut self, new_len: usize) {
        if new_len > self.entries.len() {
            self.selected = self.last_selected;
        }
    }

    fn clamp_selection(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.entries.len() - 1);
        }
    }
}
