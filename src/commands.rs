//! Command handlers.
//!
//! One function per operation. Each one takes the computed [`Paths`], the
//! positional arguments left after switch parsing, and the [`Ui`], and prints
//! its result. The library logic itself lives in `crate::library` and
//! `crate::resolve`.

use anstyle::AnsiColor;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::KconfError;
use crate::library::{Entry, add_entry, list_entries, remove_entry};
use crate::operation::Operation;
use crate::paths::{KUBECONFIG_VAR, Paths};
use crate::resolve::resolve_args;
use crate::shell::Shell;
use crate::ui::Ui;

/// How the listing is rendered
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// `* 1) alias`, one entry per line
    #[default]
    Plain,
    /// Table with targets and link status
    Targets,
    Json,
}

/// Run `op` against the library
pub fn dispatch(
    op: Operation,
    paths: &Paths,
    args: &[String],
    format: ListFormat,
    shell: Shell,
    ui: &Ui,
) -> Result<()> {
    match op {
        Operation::Add => add(paths, args, ui),
        Operation::Set => set(paths, args, shell, ui),
        Operation::List => list(paths, format, ui),
        Operation::Remove => remove(paths, args, ui),
        Operation::None => {
            tracing::debug!(argc = args.len(), "no operation selected");
            Ok(())
        }
    }
}

/// Add a kubeconfig: `args[0]` is the file, `args[1]` an optional alias
pub fn add(paths: &Paths, args: &[String], ui: &Ui) -> Result<()> {
    let file = args
        .first()
        .ok_or_else(|| KconfError::usage("not enough arguments"))?;
    let alias = args.get(1).map(String::as_str);
    if args.len() > 2 {
        tracing::debug!(ignored = ?&args[2..], "ignoring extra arguments");
    }

    let entry = add_entry(paths, file, alias)?;
    ui.println(format!(
        "{} -> {} added",
        ui.bold(&entry.alias),
        entry.target.display()
    ));
    Ok(())
}

/// List all entries, marking the one KUBECONFIG points at
pub fn list(paths: &Paths, format: ListFormat, ui: &Ui) -> Result<()> {
    let entries = list_entries(paths)?;
    let active = active_selection();

    match format {
        ListFormat::Plain => {
            for (i, entry) in entries.iter().enumerate() {
                let marked = is_active(entry, active.as_deref());
                ui.println(list_line(ui, i + 1, entry, marked));
            }
        }
        ListFormat::Targets => {
            if !entries.is_empty() {
                ui.println(targets_table(ui, &entries, active.as_deref()).to_string());
            }
        }
        ListFormat::Json => {
            let listed = listed_entries(&entries, active.as_deref());
            let json = serde_json::to_string_pretty(&listed)
                .context("Failed to serialize library listing")?;
            ui.println(json);
        }
    }

    Ok(())
}

/// Print the statement that activates the selected entry
pub fn set(paths: &Paths, args: &[String], shell: Shell, ui: &Ui) -> Result<()> {
    let entries = list_entries(paths)?;
    let entry = resolve_args(args, &entries)?;
    ui.println(shell.activation_line(&entry.path));
    Ok(())
}

/// Remove the selected entry's symlink
pub fn remove(paths: &Paths, args: &[String], ui: &Ui) -> Result<()> {
    let entries = list_entries(paths)?;
    let entry = resolve_args(args, &entries)?;
    let target = remove_entry(entry)?;
    ui.println(format!("{} -> {} removed", entry.alias, target.display()));
    Ok(())
}

/// Current value of KUBECONFIG, if any
pub fn active_selection() -> Option<PathBuf> {
    std::env::var_os(KUBECONFIG_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn is_active(entry: &Entry, active: Option<&Path>) -> bool {
    active.is_some_and(|a| a == entry.path)
}

/// One line of the plain listing: `* 2) prod` or `  2) prod`
pub fn list_line(ui: &Ui, index: usize, entry: &Entry, active: bool) -> String {
    if active {
        format!(
            "{}{}) {}",
            ui.colored("* ", AnsiColor::Green),
            index,
            ui.colored(&entry.alias, AnsiColor::Green)
        )
    } else {
        format!("  {}) {}", index, entry.alias)
    }
}

fn targets_table(ui: &Ui, entries: &[Entry], active: Option<&Path>) -> comfy_table::Table {
    let mut table = ui.simple_table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("#"),
        ui.header_cell("Alias"),
        ui.header_cell("Target"),
        ui.header_cell("Status"),
    ]);

    for (i, entry) in entries.iter().enumerate() {
        let marker = if is_active(entry, active) { "*" } else { " " };
        let status = if entry.target_exists() {
            ui.colored_cell("ok", AnsiColor::Green)
        } else {
            ui.colored_cell("missing", AnsiColor::Red)
        };
        table.add_row(vec![
            ui.cell(marker),
            ui.cell((i + 1).to_string()),
            ui.cell(&entry.alias),
            ui.cell(entry.target.display().to_string()),
            status,
        ]);
    }

    table
}

/// Listing record used for `--json`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ListedEntry<'a> {
    pub index: usize,
    pub alias: &'a str,
    pub target: &'a Path,
    pub active: bool,
}

pub fn listed_entries<'a>(entries: &'a [Entry], active: Option<&Path>) -> Vec<ListedEntry<'a>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| ListedEntry {
            index: i + 1,
            alias: &entry.alias,
            target: &entry.target,
            active: is_active(entry, active),
        })
        .collect()
}
