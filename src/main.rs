mod actions;
mod app;
mod config;
mod listing;
mod term;
mod ui;

use actions::ExternalCommands;
use app::App;
use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirnav")]
#[command(about = "A keyboard-driven terminal directory browser")]
struct Args {
    #[arg(default_value = ".")]
    path: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let path = args.path.canonicalize()?;

    // Raw mode comes first: without exclusive keyboard control there is no
    // point building any session state. The guard restores the terminal on
    // every exit path, including the error returns below.
    let (mut guard, mut terminal) = term::TerminalGuard::enter()?;

    let mut app = App::new(path)?;
    let commands = ExternalCommands::from_env();
    let result = app.run(&mut terminal, &commands);

    guard.restore();
    result
}
