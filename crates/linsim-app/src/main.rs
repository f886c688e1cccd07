//! linsim terminal entry point.
//!
//! Boots a simulated machine and runs a read-eval-print loop over stdin.
//! The configuration file comes from the first CLI argument or the
//! `LINSIM_CONFIG` environment variable; without either, defaults apply.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use linsim_platform::DesktopTime;
use linsim_terminal::{CommandOutput, Shell};
use linsim_types::config::SimConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    log::info!("Starting linsim as {}@{}", config.user, config.hostname);

    let mut shell = Shell::new(config, Box::new(DesktopTime::new()))?;
    let mut session = shell.new_session();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}\n", shell.banner())?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{}", shell.prompt(&session))?;
        stdout.flush()?;

        // EOF ends the session like `exit`.
        let Some(line) = lines.next().transpose()? else {
            writeln!(stdout)?;
            break;
        };

        match shell.execute(&line, &mut session) {
            CommandOutput::Clear => {
                // ANSI clear screen + cursor home.
                write!(stdout, "\x1b[2J\x1b[H{}\n\n", shell.banner())?;
            },
            CommandOutput::Exit => {
                writeln!(stdout, "{}", CommandOutput::Exit.render())?;
                break;
            },
            CommandOutput::None => {},
            output => writeln!(stdout, "{}", output.render())?,
        }
        if session.logged_out {
            break;
        }
    }

    log::info!("Session ended after {} commands", session.history.len());
    Ok(())
}

/// Config from the CLI argument, then `LINSIM_CONFIG`, then defaults.
fn load_config() -> SimConfig {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LINSIM_CONFIG").ok())
        .map(PathBuf::from);

    let Some(path) = path else {
        return SimConfig::default();
    };
    match SimConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{e}; using default config");
            SimConfig::default()
        },
    }
}
