// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command output. Results go to stdout as pretty JSON so they can be piped;
//! human-facing status lines go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn success(message: impl AsRef<str>) {
    eprintln!("{}", format!("✓ {}", message.as_ref()).green());
}

pub fn warning(message: impl AsRef<str>) {
    eprintln!("{}", format!("⚠ {}", message.as_ref()).yellow());
}
