//! `utilkit exec <sql>` – execute and commit a statement.

use anyhow::Result;
use utilkit_core::config::RetryConfig;
use utilkit_core::db::{Database, DbError};
use utilkit_core::retry::{Retrier, RetryPolicy};

/// How hard `exec` tries before reporting failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecMode {
    /// Use the inline single-retry helper.
    pub retry_once: bool,
    /// Run under the retry executor with this many retries.
    pub retries: Option<u32>,
}

pub fn run_exec(db: &Database, retry_cfg: &RetryConfig, sql: &str, mode: ExecMode) -> Result<()> {
    let execute = |sql: &str| {
        if mode.retry_once {
            db.execute_with_single_retry(sql)
        } else {
            db.execute(sql)
        }
    };

    match mode.retries {
        Some(retry_limit) => {
            let policy = RetryPolicy {
                retry_limit,
                ..RetryPolicy::from_config(retry_cfg)
            };
            // Missing settings will not fix themselves between attempts.
            Retrier::<str, DbError>::new("exec", policy)
                .retry_if(|e| !matches!(e, DbError::Config(_)))
                .call(sql, execute)?;
        }
        None => execute(sql)?,
    }

    println!("OK");
    Ok(())
}
