//! Template rendering facade.

pub mod engine;
pub mod parser;
pub mod source;

pub use engine::{Lookup, Template};

use crate::config::TemplateConfig;
use anyhow::{Context, Result};

/// Built-in list item used when the configuration names no template.
pub const DEFAULT_TEMPLATE: &str =
    "<li>${title} | ${composer} | ${arranger} | ${date_added} | ${instruments}</li>";

/// Read and compile the configured template. Called once at startup.
pub fn load(cfg: &TemplateConfig) -> Result<Template> {
    let src = match (&cfg.inline, &cfg.file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(file)) => source::from_file(file, cfg.name.as_deref())?,
        (None, None) => DEFAULT_TEMPLATE.to_owned(),
    };

    Template::compile(&src).context("compile template")
}
