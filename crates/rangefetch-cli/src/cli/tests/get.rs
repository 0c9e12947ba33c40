//! Tests for the get subcommand and output naming.

use super::parse;
use crate::cli::commands::default_output;
use crate::cli::CliCommand;
use std::path::{Path, PathBuf};
use url::Url;

#[test]
fn cli_parse_get_defaults() {
    match parse(&["rangefetch", "get", "https://example.com/file.iso"]) {
        CliCommand::Get {
            url,
            output,
            max_attempts,
            chunks,
            stage,
        } => {
            assert_eq!(url, "https://example.com/file.iso");
            assert!(output.is_none());
            assert!(max_attempts.is_none());
            assert!(chunks.is_none());
            assert!(!stage);
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_all_options() {
    match parse(&[
        "rangefetch",
        "get",
        "https://example.com/x",
        "-o",
        "/tmp/x.bin",
        "--max-attempts",
        "5",
        "--chunks",
        "20",
        "--stage",
    ]) {
        CliCommand::Get {
            output,
            max_attempts,
            chunks,
            stage,
            ..
        } => {
            assert_eq!(output.as_deref(), Some(Path::new("/tmp/x.bin")));
            assert_eq!(max_attempts, Some(5));
            assert_eq!(chunks, Some(20));
            assert!(stage);
        }
        _ => panic!("expected Get with options"),
    }
}

#[test]
fn cli_parse_get_long_output() {
    match parse(&["rangefetch", "get", "https://example.com/x", "--output", "y"]) {
        CliCommand::Get { output, .. } => assert_eq!(output, Some(PathBuf::from("y"))),
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_rejects_non_numeric_attempts() {
    use crate::cli::Cli;
    use clap::Parser;
    let res = Cli::try_parse_from([
        "rangefetch",
        "get",
        "https://example.com/x",
        "--max-attempts",
        "many",
    ]);
    assert!(res.is_err());
}

#[test]
fn default_output_uses_last_segment() {
    let url = Url::parse("https://deb.example.org/pool/main/c/curl/curl_8.5.0.deb?x=1").unwrap();
    assert_eq!(default_output(&url), PathBuf::from("curl_8.5.0.deb"));
}

#[test]
fn default_output_falls_back() {
    for u in ["https://example.com/", "https://example.com", "https://example.com/dir/"] {
        let url = Url::parse(u).unwrap();
        assert_eq!(default_output(&url), PathBuf::from("download.bin"), "{}", u);
    }
}
