//! `utilkit headers [file]` – format a pasted header block.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use utilkit_core::format::format_headers;

pub fn run_headers(path: Option<&Path>) -> Result<()> {
    let block = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let headers: BTreeMap<_, _> = format_headers(&block)?.into_iter().collect();
    for (name, value) in headers {
        println!("{name}: {value}");
    }
    Ok(())
}
