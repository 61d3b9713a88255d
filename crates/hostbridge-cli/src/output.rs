//! Terminal output for command results.
//!
//! Results go to stdout so they can be piped; notes and failures go to stderr.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn failure(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// A dimmed remark that is not part of the result.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Writes a result as pretty JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One name per line, or `empty` as a note when there are none.
pub fn names(names: &[String], empty: &str) {
    if names.is_empty() {
        note(empty);
        return;
    }

    for name in names {
        println!("{}", name);
    }
}
