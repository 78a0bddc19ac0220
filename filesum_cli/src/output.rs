//! Result printing for the CLI

use anyhow::Result;
use colored::*;
use filesum_core::DigestResult;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::progress::utils::format_duration;

/// Everything a finished run produced, in delivery order
#[derive(Default)]
pub struct RunReport {
    pub results: Vec<(PathBuf, DigestResult)>,
    pub failures: Vec<(PathBuf, String)>,
    pub cancelled: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    failures: Vec<JsonFailure<'a>>,
    cancelled: bool,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a PathBuf,
    digests: Vec<&'a DigestResult>,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    path: &'a PathBuf,
    error: &'a str,
}

/// Group per-algorithm results by file, preserving batch order
fn group_by_file(results: &[(PathBuf, DigestResult)]) -> Vec<(&PathBuf, Vec<&DigestResult>)> {
    let mut grouped: Vec<(&PathBuf, Vec<&DigestResult>)> = Vec::new();
    for (path, result) in results {
        match grouped.last_mut() {
            Some((last_path, digests)) if *last_path == path => digests.push(result),
            _ => grouped.push((path, vec![result])),
        }
    }
    grouped
}

pub fn print_report(report: &RunReport, json: bool, elapsed: Duration) -> Result<()> {
    if json {
        let doc = JsonReport {
            files: group_by_file(&report.results)
                .into_iter()
                .map(|(path, digests)| JsonFile { path, digests })
                .collect(),
            failures: report
                .failures
                .iter()
                .map(|(path, error)| JsonFailure {
                    path,
                    error: error.as_str(),
                })
                .collect(),
            cancelled: report.cancelled,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for (path, digests) in group_by_file(&report.results) {
        println!("{}", path.display().to_string().bold());
        for result in digests {
            println!(
                "  {:<8} {}",
                result.algorithm.display_name().cyan(),
                result.digest
            );
        }
    }

    for (path, error) in &report.failures {
        eprintln!("{} {}: {}", "✗".red(), path.display(), error);
    }

    let hashed = group_by_file(&report.results).len();
    if report.cancelled {
        eprintln!("{}", "cancelled".yellow());
    } else {
        eprintln!(
            "{} file(s) hashed in {}",
            hashed,
            format_duration(elapsed)
        );
    }

    Ok(())
}

pub fn print_text_results(results: &[DigestResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    for result in results {
        println!(
            "{:<8} {}",
            result.algorithm.display_name().cyan(),
            result.digest
        );
    }
    Ok(())
}
