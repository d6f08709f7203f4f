//! `utilkit query <sql>` – print the rows of a query, tab-separated.

use anyhow::Result;
use utilkit_core::db::{Database, Row};

pub fn run_query(db: &Database, sql: &str) -> Result<()> {
    let rows = db.query(sql)?;
    if rows.is_empty() {
        println!("No rows.");
        return Ok(());
    }
    println!("{}", rows[0].columns().join("\t"));
    for row in &rows {
        println!("{}", render_row(row));
    }
    Ok(())
}

fn render_row(row: &Row) -> String {
    row.values()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\t")
}
