//! `utilkit params <url>` – split a URL into base and decoded parameters.

use anyhow::Result;
use std::collections::BTreeMap;
use utilkit_core::format::format_parameters;

pub fn run_params(url: &str) -> Result<()> {
    let (base, params) = format_parameters(url)?;
    println!("{base}");
    let params: BTreeMap<_, _> = params.into_iter().collect();
    for (name, value) in params {
        println!("  {name} = {value}");
    }
    Ok(())
}
