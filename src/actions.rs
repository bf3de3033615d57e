use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A side effect requested by the state machine. The controller only ever
/// produces these; executing them is this module's job, so tests can inspect
/// transitions without spawning anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditFile(PathBuf),
    SpawnTerminal(PathBuf),
}

/// The external collaborators: a file classifier, an editor, and a terminal
/// launcher, each invoked as a separate process.
pub struct ExternalCommands {
    classifier: String,
    editor: String,
    terminal: String,
}

impl ExternalCommands {
    pub fn new(
        classifier: impl Into<String>,
        editor: impl Into<String>,
        terminal: impl Into<String>,
    ) -> Self {
        Self {
            classifier: classifier.into(),
            editor: editor.into(),
            terminal: terminal.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            "file",
            env::var("EDITOR")
                .or_else(|_| env::var("VISUAL"))
                .unwrap_or_else(|_| "nano".into()),
            env::var("TERMINAL").unwrap_or_else(|_| "gnome-terminal".into()),
        )
    }

    /// Runs one action. Failures of the external programs are deliberately
    /// swallowed: a missing classifier or a non-zero editor exit must not
    /// take the session down.
    pub fn run(&self, action: &Action) {
        match action {
            Action::EditFile(path) => {
                let _ = self.classify_and_edit(path);
            }
            Action::SpawnTerminal(dir) => {
                let _ = self.spawn_terminal(dir);
            }
        }
    }

    /// Asks the classifier to describe `path` and opens the editor on it iff
    /// the description says it is a text format. The editor inherits the
    /// terminal and blocks until the user exits it.
    fn classify_and_edit(&self, path: &Path) -> io::Result<()> {
        let output = Command::new(&self.classifier).arg(path).output()?;
        let description = String::from_utf8_lossy(&output.stdout);
        if is_text(&description) {
            Command::new(&self.editor).arg(path).status()?;
        }
        Ok(())
    }

    /// Opens a new terminal window in `dir`, fire-and-forget. The working
    /// directory of the whole process moves so the spawned terminal inherits
    /// it, matching how external launchers pick their start directory.
    fn spawn_terminal(&self, dir: &Path) -> io::Result<()> {
        env::set_current_dir(dir)?;
        Command::new(&self.terminal).spawn()?;
        Ok(())
    }
}

/// Case-sensitive substring probe on the classifier's description, e.g.
/// "ASCII text" or "UTF-8 Unicode text, with very long lines".
pub fn is_text(description: &str) -> bool {
    description.contains("text")
}
