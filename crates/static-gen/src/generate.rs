//! Batch driver: walk the configuration table and generate every instance.
//!
//! Errors never cascade. A missing source file skips that file's
//! instances; a failed instance is logged and the batch moves on. The
//! final tally is the only signal of overall success.

use std::{
    fs::{create_dir_all, read, write},
    path::Path,
};

use anyhow::{Context, Result};
use font_instancer::{AxisLocation, instantiate};
use log::error;

use crate::config::{FamilyConfig, InstanceSpec};

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub generated: usize,
    pub total: usize,
}

impl Summary {
    /// True when every requested instance was generated. Drives the
    /// process exit code.
    pub fn is_complete(&self) -> bool {
        self.generated == self.total
    }
}

/// Generate one static instance from `source` at the instance's pinned
/// axes, overwriting `dest` if it already exists.
pub fn generate_instance(source: &Path, dest: &Path, spec: &InstanceSpec) -> Result<()> {
    let pins: Vec<String> = spec
        .axes
        .iter()
        .map(|(tag, value)| format!("{tag}={value}"))
        .collect();
    println!("    Generating {} ({})...", spec.name, pins.join(", "));

    let data = read(source).with_context(|| format!("Failed to read {}", source.display()))?;

    let locations: Vec<AxisLocation> = spec
        .axes
        .iter()
        .map(|(tag, value)| AxisLocation::new(tag, *value))
        .collect();

    let static_data = instantiate(&data, &locations)
        .with_context(|| format!("Failed to instantiate {}", spec.name))?;

    if let Some(parent) = dest.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    write(dest, &static_data).with_context(|| format!("Failed to write {}", dest.display()))?;

    let size_kb = static_data.len() as f64 / 1024.0;
    println!("    ✓ {} ({size_kb:.1} KB)", spec.name);

    Ok(())
}

/// Walk the whole table, tallying successes against requested instances.
pub fn run(families: &[FamilyConfig]) -> Summary {
    println!("═══════════════════════════════════════════════════════════");
    println!("Static Font Generator");
    println!("═══════════════════════════════════════════════════════════");

    let mut total = 0;
    let mut generated = 0;

    for family in families {
        println!("\n[{}]", family.name.to_uppercase());

        if let Err(e) = create_dir_all(&family.dest_dir) {
            error!("Failed to create {}: {e}", family.dest_dir.display());
            total += family.instance_count();
            continue;
        }

        for file in &family.files {
            let source = family.source_dir.join(&file.source);

            if !source.exists() {
                println!("  ✗ Source not found: {}", source.display());
                total += file.instances.len();
                continue;
            }

            println!("  Processing {}...", file.source);

            for spec in &file.instances {
                total += 1;
                let dest = family.dest_dir.join(&spec.name);

                match generate_instance(&source, &dest, spec) {
                    Ok(()) => generated += 1,
                    Err(e) => {
                        error!("{}: {e:#}", spec.name);
                        println!("    ✗ {}", spec.name);
                    }
                }
            }
        }
    }

    println!("\nGeneration complete: {generated}/{total} fonts created");

    Summary { generated, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_complete_only_when_counts_match() {
        assert!(Summary { generated: 3, total: 3 }.is_complete());
        assert!(Summary { generated: 0, total: 0 }.is_complete());
        assert!(!Summary { generated: 2, total: 3 }.is_complete());
    }
}
