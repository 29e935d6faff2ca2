//! The table of static instances to generate.
//!
//! One entry per font family the application ships: where the variable
//! sources live, where the static instances go, and which axis pins each
//! output file gets. The table is built once at startup and never changes.

use std::path::PathBuf;

/// One static instance derived from a variable font: the output file name
/// and the axis values it is pinned to.
#[derive(Debug, Clone)]
pub struct InstanceSpec {
    pub name: String,
    pub axes: Vec<(String, f32)>,
}

impl InstanceSpec {
    pub fn new(name: impl Into<String>, axes: &[(&str, f32)]) -> Self {
        Self {
            name: name.into(),
            axes: axes
                .iter()
                .map(|(tag, value)| (tag.to_string(), *value))
                .collect(),
        }
    }
}

/// A variable font source file and the instances derived from it.
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub source: String,
    pub instances: Vec<InstanceSpec>,
}

impl FileConfig {
    pub fn new(source: impl Into<String>, instances: Vec<InstanceSpec>) -> Self {
        Self {
            source: source.into(),
            instances,
        }
    }
}

/// A font family: its source and destination directories plus the files
/// to process.
#[derive(Debug, Clone)]
pub struct FamilyConfig {
    pub name: String,
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub files: Vec<FileConfig>,
}

impl FamilyConfig {
    pub fn new(
        name: impl Into<String>,
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        files: Vec<FileConfig>,
    ) -> Self {
        Self {
            name: name.into(),
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            files,
        }
    }

    /// Total number of instances requested across all files.
    pub fn instance_count(&self) -> usize {
        self.files.iter().map(|f| f.instances.len()).sum()
    }
}

fn family(key: &str, files: Vec<FileConfig>) -> FamilyConfig {
    FamilyConfig::new(
        key,
        PathBuf::from("fonts/ofl").join(key),
        PathBuf::from("assets/google_fonts").join(key),
        files,
    )
}

/// Regular/Medium/Bold at wght 400/500/700.
fn upright_weights(prefix: &str) -> Vec<InstanceSpec> {
    vec![
        InstanceSpec::new(format!("{prefix}-Regular.ttf"), &[("wght", 400.0)]),
        InstanceSpec::new(format!("{prefix}-Medium.ttf"), &[("wght", 500.0)]),
        InstanceSpec::new(format!("{prefix}-Bold.ttf"), &[("wght", 700.0)]),
    ]
}

/// The italic counterparts of `upright_weights`.
fn italic_weights(prefix: &str) -> Vec<InstanceSpec> {
    vec![
        InstanceSpec::new(format!("{prefix}-Italic.ttf"), &[("wght", 400.0)]),
        InstanceSpec::new(format!("{prefix}-MediumItalic.ttf"), &[("wght", 500.0)]),
        InstanceSpec::new(format!("{prefix}-BoldItalic.ttf"), &[("wght", 700.0)]),
    ]
}

/// Every font family the application bundles.
pub fn families() -> Vec<FamilyConfig> {
    vec![
        family(
            "jetbrainsmono",
            vec![
                FileConfig::new("JetBrainsMono[wght].ttf", upright_weights("JetBrainsMono")),
                FileConfig::new(
                    "JetBrainsMono-Italic[wght].ttf",
                    italic_weights("JetBrainsMono"),
                ),
            ],
        ),
        family(
            "firacode",
            vec![FileConfig::new(
                "FiraCode[wght].ttf",
                upright_weights("FiraCode"),
            )],
        ),
        family(
            "notosansmono",
            // Noto Sans Mono also carries a width axis, pinned to normal.
            vec![FileConfig::new(
                "NotoSansMono[wdth,wght].ttf",
                vec![
                    InstanceSpec::new(
                        "NotoSansMono-Regular.ttf",
                        &[("wght", 400.0), ("wdth", 100.0)],
                    ),
                    InstanceSpec::new(
                        "NotoSansMono-Medium.ttf",
                        &[("wght", 500.0), ("wdth", 100.0)],
                    ),
                    InstanceSpec::new(
                        "NotoSansMono-Bold.ttf",
                        &[("wght", 700.0), ("wdth", 100.0)],
                    ),
                ],
            )],
        ),
        family(
            "overpassmono",
            vec![FileConfig::new(
                "OverpassMono[wght].ttf",
                upright_weights("OverpassMono"),
            )],
        ),
        family(
            "robotomono",
            vec![
                FileConfig::new("RobotoMono[wght].ttf", upright_weights("RobotoMono")),
                FileConfig::new(
                    "RobotoMono-Italic[wght].ttf",
                    italic_weights("RobotoMono"),
                ),
            ],
        ),
        family(
            "sourcecodepro",
            vec![
                FileConfig::new("SourceCodePro[wght].ttf", upright_weights("SourceCodePro")),
                FileConfig::new(
                    "SourceCodePro-Italic[wght].ttf",
                    italic_weights("SourceCodePro"),
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_lists_all_bundled_families() {
        let names: Vec<String> = families().into_iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "jetbrainsmono",
                "firacode",
                "notosansmono",
                "overpassmono",
                "robotomono",
                "sourcecodepro",
            ]
        );
    }

    #[test]
    fn every_instance_pins_at_least_one_axis() {
        for family in families() {
            for file in &family.files {
                assert!(!file.instances.is_empty(), "{}: no instances", file.source);
                for spec in &file.instances {
                    assert!(!spec.axes.is_empty(), "{}: no axes", spec.name);
                }
            }
        }
    }

    #[test]
    fn axis_tags_are_four_characters() {
        for family in families() {
            for file in &family.files {
                for spec in &file.instances {
                    for (tag, _) in &spec.axes {
                        assert_eq!(tag.len(), 4, "{}: bad tag '{tag}'", spec.name);
                    }
                }
            }
        }
    }

    #[test]
    fn output_paths_are_unique() {
        let mut seen = HashSet::new();
        for family in families() {
            for file in &family.files {
                for spec in &file.instances {
                    let dest = family.dest_dir.join(&spec.name);
                    assert!(seen.insert(dest.clone()), "duplicate output: {dest:?}");
                }
            }
        }
    }

    #[test]
    fn noto_pins_width_on_every_instance() {
        let families = families();
        let noto = families.iter().find(|f| f.name == "notosansmono").unwrap();
        for file in &noto.files {
            for spec in &file.instances {
                assert!(
                    spec.axes.iter().any(|(tag, value)| tag == "wdth" && *value == 100.0),
                    "{}: wdth not pinned",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn instance_count_sums_over_files() {
        let families = families();
        let jetbrains = families.iter().find(|f| f.name == "jetbrainsmono").unwrap();
        assert_eq!(jetbrains.instance_count(), 6);

        let total: usize = families.iter().map(FamilyConfig::instance_count).sum();
        assert_eq!(total, 27);
    }
}
