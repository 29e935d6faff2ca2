//! Static font generation for offline bundling.
//!
//! The application bundles its fonts instead of fetching them at runtime,
//! which means every (family, weight) pair it uses must exist as a static
//! TTF in the asset tree. This crate holds the table of instances to
//! derive and the batch driver that walks it, delegating the actual axis
//! pinning to `font_instancer`.

pub mod config;
pub mod generate;

pub use config::{FamilyConfig, FileConfig, InstanceSpec};
pub use generate::{Summary, run};
