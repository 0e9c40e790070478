use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Markdown table of `rows`, or `None` when there is nothing to show.
pub fn render_table<T>(rows: &[T]) -> Option<String>
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return None;
    }
    Some(Table::new(rows.to_vec()).with(Style::markdown()).to_string())
}

pub fn print_table<T>(title: &str, note: Option<&str>, rows: &[T])
where
    T: Tabled + Clone,
{
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    match render_table(rows) {
        Some(table) => println!("{}\n", table),
        None => println!("(no rows)\n"),
    }
}
