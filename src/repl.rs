//! Interactive keypad loop and text rendering for the terminal front-end.

use crate::calculator::Session;
use crate::config::Config;
use crate::items::History;
use crate::keypad::parse_keys;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Read key lines from `input` until EOF, `quit` or `exit`, rendering the
/// session after each line.
pub fn run_interactive(
    session: &mut Session,
    config: &Config,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut lines = input.lines();

    loop {
        write!(out, "{}", config.prompt)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        match line {
            "quit" | "exit" => break,
            "history" => {
                print_history(session.history(), out)?;
                continue;
            }
            _ => {}
        }

        let len = line.chars().count();
        if len > config.max_input_len {
            warn!(len, max = config.max_input_len, "input line too long");
            writeln!(out, "input longer than {} characters ignored", config.max_input_len)?;
            continue;
        }

        match parse_keys(line) {
            Ok(keys) => {
                debug!(count = keys.len(), "applying keys");
                session.press_all(keys);
                render(session, out)?;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    Ok(())
}

/// Print the expression line, and the result line unless "=" was just pressed
/// (the expression line already shows the result then).
pub fn render(session: &Session, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", session.expression_text())?;
    if !session.is_finalized() {
        writeln!(out, "{}", session.result_text())?;
    }
    Ok(())
}

pub fn print_history(history: &History, out: &mut impl Write) -> Result<()> {
    if history.is_empty() {
        writeln!(out, "(no history)")?;
        return Ok(());
    }
    for entry in history {
        writeln!(out, "{}", entry.render())?;
    }
    Ok(())
}
