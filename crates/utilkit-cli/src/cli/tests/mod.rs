//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_query() {
    match parse(&["utilkit", "query", "SELECT 1"]) {
        CliCommand::Query { sql } => assert_eq!(sql, "SELECT 1"),
        _ => panic!("expected Query"),
    }
}

#[test]
fn cli_parse_exec_defaults() {
    match parse(&["utilkit", "exec", "DELETE FROM t"]) {
        CliCommand::Exec {
            sql,
            retry_once,
            retries,
        } => {
            assert_eq!(sql, "DELETE FROM t");
            assert!(!retry_once);
            assert!(retries.is_none());
        }
        _ => panic!("expected Exec"),
    }
}

#[test]
fn cli_parse_exec_retry_flags() {
    match parse(&["utilkit", "exec", "--retry-once", "--retries", "4", "UPDATE t SET x = 1"]) {
        CliCommand::Exec {
            sql,
            retry_once,
            retries,
        } => {
            assert_eq!(sql, "UPDATE t SET x = 1");
            assert!(retry_once);
            assert_eq!(retries, Some(4));
        }
        _ => panic!("expected Exec with flags"),
    }
}

#[test]
fn cli_parse_headers_with_and_without_file() {
    match parse(&["utilkit", "headers"]) {
        CliCommand::Headers { path } => assert!(path.is_none()),
        _ => panic!("expected Headers"),
    }
    match parse(&["utilkit", "headers", "req.txt"]) {
        CliCommand::Headers { path } => assert_eq!(path.as_deref(), Some("req.txt")),
        _ => panic!("expected Headers with path"),
    }
}

#[test]
fn cli_parse_params() {
    match parse(&["utilkit", "params", "http://x.com/a?b=1"]) {
        CliCommand::Params { url } => assert_eq!(url, "http://x.com/a?b=1"),
        _ => panic!("expected Params"),
    }
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["utilkit", "download"]).is_err());
}
