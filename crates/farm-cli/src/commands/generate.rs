//! `buildfarm generate`: write the files a build container needs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use colored::Colorize;
use farm_fs::{StructuredStore, io};
use farm_graph::{
    ContainerImage, GraphSerializer, MakefileSerializer, Plan, PlanRequest, reference_table,
};
use farm_resolve::ResolverOptions;

use crate::commands::load_context;
use crate::config::FarmConfig;
use crate::error::Result;

pub const REFERENCE_FILE: &str = "rosdep.yaml";
pub const MAKEFILE: &str = "Makefile";
pub const CONTAINER_FILE: &str = "Dockerfile";

/// Run the generate command
pub fn run_generate(config: &FarmConfig, targets: &[String], output: &Path) -> Result<()> {
    println!(
        "{} Planning {} for {} {}...",
        "=>".blue().bold(),
        targets.join(", ").cyan(),
        config.target.os_name,
        config.target.os_distribution
    );

    let context = load_context(config)?;
    let plan = Plan::assemble(&context, &request(config, targets), &config.layout);
    let written = write_outputs(config, &plan, output)?;

    println!(
        "{} {} packages to build, {} OS packages, {} targets",
        "OK".green().bold(),
        plan.build_set.len(),
        plan.os_packages.packages.len(),
        plan.graph.len()
    );
    for path in written {
        println!("   {} {}", "+".green(), path.display());
    }
    if !plan.os_packages.unmapped.is_empty() {
        println!(
            "{} {} packages have no {} rule and were left out of the image",
            "WARN".yellow().bold(),
            plan.os_packages.unmapped.len(),
            config.target.os_distribution
        );
    }
    Ok(())
}

pub fn request(config: &FarmConfig, targets: &[String]) -> PlanRequest {
    PlanRequest {
        roots: targets.iter().cloned().collect::<BTreeSet<_>>(),
        resolver: ResolverOptions {
            python_major: config.target.python_major.clone(),
            ..ResolverOptions::default()
        },
        os_name: config.target.os_name.clone(),
        os_distribution: config.target.os_distribution.clone(),
    }
}

/// Write the reference table, build description and container description
/// into `output`. Returns the written paths.
pub fn write_outputs(config: &FarmConfig, plan: &Plan, output: &Path) -> Result<Vec<PathBuf>> {
    let reference = output.join(REFERENCE_FILE);
    StructuredStore::new().save(
        &reference,
        &reference_table(
            &plan.build_set,
            &config.target.os_name,
            &config.target.package_prefix(config.distribution()),
        ),
    )?;

    let makefile = output.join(MAKEFILE);
    io::write_text(&makefile, &MakefileSerializer.render(&plan.graph))?;

    let container = output.join(CONTAINER_FILE);
    let image = ContainerImage::new(&config.target.os_name, &config.target.os_distribution)
        .install(&plan.os_packages.packages);
    io::write_text(&container, &image.render())?;

    Ok(vec![reference, makefile, container])
}
