//! Interactive roster shell.
//!
//! Reads one command per line from stdin, prints the result message and the
//! list displayed on the current page, and stops on `exit` or end of input.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clipboard_core::{
    default_log_level, init_logging, open_db, AppConfig, LogicError, LogicManager,
    SnapshotRepository, SqliteSnapshotRepository, DEFAULT_DATA_FILE,
};
use log::info;

#[derive(Parser)]
#[command(name = "clipboard", version, about = "Course roster and attendance shell")]
struct CliArgs {
    /// SQLite data file, created on first use
    #[arg(long, value_name = "path", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,
    /// Directory for rolling log files; logging is off when omitted
    #[arg(long, value_name = "dir")]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, value_name = "level")]
    log_level: Option<String>,
}

impl CliArgs {
    fn into_config(self) -> Result<AppConfig> {
        let log_dir = match self.log_dir {
            Some(dir) if dir.is_relative() => Some(
                std::env::current_dir()
                    .context("resolving current directory")?
                    .join(dir),
            ),
            other => other,
        };
        Ok(AppConfig {
            data_path: self.data,
            log_dir,
            log_level: self
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
        })
    }
}

fn main() -> Result<()> {
    let config = CliArgs::parse().into_config()?;

    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir)
            .map_err(|err| anyhow::anyhow!("starting logging: {err}"))?;
    }

    let conn = open_db(&config.data_path)
        .with_context(|| format!("opening data file {}", config.data_path.display()))?;
    let repo = SqliteSnapshotRepository::try_new(&conn).context("preparing snapshot store")?;
    let mut manager = LogicManager::new(repo).context("loading saved roster")?;

    run_shell(&mut manager, io::stdin().lock(), io::stdout().lock())?;
    info!("event=shell_stop module=cli status=ok");
    Ok(())
}

fn run_shell<R: SnapshotRepository>(
    manager: &mut LogicManager<R>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    print_page(manager, &mut out)?;

    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "{}> ", manager.selection().page())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        match manager.execute(&line) {
            Ok(result) => {
                writeln!(out, "{}", result.message())?;
                if result.is_exit() {
                    break;
                }
                print_page(manager, &mut out)?;
            }
            Err(LogicError::Command(err)) => writeln!(out, "{err}")?,
            Err(err @ LogicError::Storage(_)) => {
                writeln!(out, "{err}")?;
                print_page(manager, &mut out)?;
            }
        }
    }
    Ok(())
}

fn print_page<R: SnapshotRepository>(
    manager: &LogicManager<R>,
    out: &mut impl Write,
) -> Result<()> {
    let selection = manager.selection();
    let mut header = selection.page().to_string();
    if let Some(code) = selection.selected_course() {
        header.push_str(&format!(" | {code}"));
    }
    if let Some(group) = selection.selected_group() {
        header.push_str(&format!(" > {group}"));
    }
    if let Some(session) = selection.selected_session() {
        header.push_str(&format!(" > {session}"));
    }
    writeln!(out, "== {header} ==")?;
    for line in manager.page_listing() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
