//! `buildfarm resolve`: show where a closure's packages come from

use std::collections::BTreeSet;

use colored::Colorize;
use farm_resolve::{DependencyResolver, PackageClassifier, ResolverOptions};
use serde::Serialize;

use crate::commands::load_context;
use crate::config::FarmConfig;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    distribution: &'a str,
    system: &'a BTreeSet<String>,
    runtime: &'a BTreeSet<String>,
    source: &'a BTreeSet<String>,
}

/// Run the resolve command
pub fn run_resolve(config: &FarmConfig, packages: &[String], json: bool) -> Result<()> {
    let context = load_context(config)?;
    let resolver = DependencyResolver::with_options(
        &context.releases,
        ResolverOptions {
            python_major: config.target.python_major.clone(),
            ..ResolverOptions::default()
        },
    );

    let resolved = resolver.resolve_all(packages.iter().map(String::as_str));
    let classification =
        PackageClassifier::new(&context.system_table, &context.runtime_table).classify(&resolved);

    if json {
        let report = ResolveReport {
            distribution: &context.distribution,
            system: &classification.system,
            runtime: &classification.runtime,
            source: &classification.source,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} depends on {} packages",
        "=>".blue().bold(),
        packages.join(", ").cyan(),
        resolved.len()
    );
    for (label, names) in [
        ("system", &classification.system),
        ("runtime", &classification.runtime),
        ("source", &classification.source),
    ] {
        println!("{} ({})", label.bold(), names.len());
        for name in names {
            println!("   {} {name}", "-".dimmed());
        }
    }
    Ok(())
}
