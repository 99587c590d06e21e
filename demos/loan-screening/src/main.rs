//! Loan screening demo.
//!
//! Filters counterfactuals for two rejected loan applicants against the tabu
//! rules in `sift.toml` and prints a reason for every surviving suggestion.
//!
//! Run with `cargo run -p loan-screening [path/to/sift.toml]`.

use std::collections::HashMap;
use std::error::Error;

use cfsift::prelude::*;
use cfsift::top_features;

const DEFAULT_CONFIG: &str = include_str!("../sift.toml");

#[allow(clippy::too_many_arguments)]
fn applicant(
    age: f64,
    income: f64,
    loan_amount: f64,
    employment: &str,
    housing: &str,
    education: &str,
    approved: i32,
) -> Instance {
    Instance::new()
        .with("age", age)
        .with("income", income)
        .with("loan_amount", loan_amount)
        .with("employment", employment)
        .with("housing", housing)
        .with("education", education)
        .with("approved", approved)
}

fn batch() -> QueryBatch {
    let first = applicant(34.0, 42_000.0, 25_000.0, "Employed", "Rent", "Bachelors", 0);
    let first_candidates = vec![
        applicant(34.0, 48_000.0, 25_000.0, "Employed", "Rent", "Bachelors", 1),
        applicant(31.0, 42_000.0, 25_000.0, "Employed", "Rent", "Bachelors", 1),
        applicant(34.0, 42_000.0, 18_000.0, "Employed", "Own", "Bachelors", 1),
        applicant(34.0, 42_000.0, 40_000.0, "Unemployed", "Rent", "Bachelors", 1),
        applicant(36.0, 42_000.2, 25_000.0, "Employed", "Rent", "Masters", 1),
    ];

    let second = applicant(52.0, 61_000.0, 90_000.0, "Self-Employed", "Mortgage", "Masters", 0);
    let second_candidates = vec![
        applicant(52.0, 130_000.0, 90_000.0, "Self-Employed", "Mortgage", "Masters", 1),
        applicant(52.0, 61_000.0, 60_000.0, "Self-Employed", "Mortgage", "Masters", 1),
        applicant(52.0, 61_000.0, 90_000.0, "Self-Employed", "Mortgage", "HS-grad", 1),
        applicant(55.0, 70_000.0, 90_000.0, "Employed", "Mortgage", "Masters", 1),
        applicant(52.0, 64_000.0, 75_000.0, "Self-Employed", "Own", "Masters", 1),
    ];

    QueryBatch::from(vec![(first, first_candidates), (second, second_candidates)])
}

fn main() -> Result<(), Box<dyn Error>> {
    cfsift::init_console();

    let config = match std::env::args().nth(1) {
        Some(path) => SiftConfig::load(path)?,
        None => SiftConfig::from_toml_str(DEFAULT_CONFIG)?,
    };

    let sifter = Sifter::from_config(&config)?;
    let (filtered, reasons) = sifter.explain(batch(), "approved")?;

    let importance = HashMap::from([
        ("income".to_string(), 0.41),
        ("loan_amount".to_string(), 0.27),
        ("education".to_string(), 0.14),
        ("employment".to_string(), 0.11),
        ("age".to_string(), 0.05),
        ("housing".to_string(), 0.02),
    ]);
    let top: Vec<String> = top_features(&importance, 3)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    println!();
    println!("Most important features: {}", top.join(", "));
    for query in 0..filtered.len() {
        println!();
        println!("Applicant {query}:");
        for reason in reasons.iter().filter(|r| r.query == query) {
            println!("  {}. {}", reason.counterfactual + 1, reason.sentence);
        }
    }

    let report = &filtered.report;
    println!();
    println!(
        "Kept {} per applicant, excluded {} of {} ({} infeasible, {} truncated).",
        report.min_retained,
        report.excluded,
        report.candidates_per_query,
        report.total_infeasible(),
        report.total_truncated()
    );
    for (rule, count) in report.violations() {
        println!("  rule {rule} rejected {count}");
    }

    Ok(())
}
