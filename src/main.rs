use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use pennywise::cli::{Reply, Session};
use pennywise::config::PennywisePaths;
use pennywise::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "pennywise",
    version,
    about = "Personal expense tracker with recurring budgets",
    long_about = "Pennywise records expenses against recurring budgets, schedules \
                  future payments and keeps an undo/redo history of every change. \
                  Run without arguments for an interactive session, or pass one \
                  session command to run it and exit."
)]
struct Cli {
    /// Directory holding settings, data and the audit log
    #[arg(long, env = "PENNYWISE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// A single session command to run, e.g. `add Kopi 1.40 -c food`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => PennywisePaths::with_base_dir(dir),
        None => PennywisePaths::new()?,
    };
    let mut session = Session::open(&paths)?;

    let stdout = io::stdout();
    if !cli.command.is_empty() {
        let line = shell_words::join(&cli.command);
        let mut out = stdout.lock();
        write!(out, "{}", session.greeting()?)?;
        if let Reply::Output(text) = session.handle_line(&line) {
            write!(out, "{}", text)?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("Pennywise - type 'help' for commands, 'exit' to quit.");
    }
    session.run(stdin.lock(), stdout.lock(), interactive)?;
    Ok(())
}
