//! Sequential generation run over a [`FixtureCatalog`].

use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::catalog::{FixtureCatalog, FixtureSpec};
use crate::config::GeneratorConfig;
use crate::error::{FixtureError, Result};
use crate::postprocess::apply_mutations;
use crate::timed;
use crate::writer::{render_frame, write_atomic};

/// Outcome of one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFixture {
    pub id: String,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub bytes: usize,
    pub mutations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub out_dir: PathBuf,
    pub fixtures: Vec<GeneratedFixture>,
}

pub struct FixtureGenerator {
    config: GeneratorConfig,
    catalog: FixtureCatalog,
}

impl FixtureGenerator {
    /// Build the standard catalog for `config`, narrowed by `config.only`
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let catalog = FixtureCatalog::standard(&config).select(&config.only)?;
        Ok(Self { config, catalog })
    }

    pub fn catalog(&self) -> &FixtureCatalog {
        &self.catalog
    }

    /// Write every selected fixture in catalog order, stopping at the first error
    pub fn run(&self) -> Result<GenerationReport> {
        profiling::scope!("generate_fixtures");

        let out_dir = &self.config.out_dir;
        if self.catalog.is_empty() {
            tracing::warn!("no fixtures selected");
        }
        fs::create_dir_all(out_dir).map_err(|e| FixtureError::io(out_dir, e))?;

        let mut fixtures = Vec::with_capacity(self.catalog.len());
        for spec in &self.catalog.fixtures {
            let generated = self.generate_one(spec).inspect_err(|err| {
                tracing::error!(fixture = %spec.id, category = err.title(), "{err}");
            })?;
            fixtures.push(generated);
        }

        tracing::info!(
            count = fixtures.len(),
            out_dir = %out_dir.display(),
            "fixture generation complete"
        );

        Ok(GenerationReport {
            out_dir: out_dir.clone(),
            fixtures,
        })
    }

    fn generate_one(&self, spec: &FixtureSpec) -> Result<GeneratedFixture> {
        let path = self.config.out_dir.join(&spec.file_name);

        let frame = timed!("build_frame", spec.recipe.build())?;
        let bytes = timed!("render_frame", render_frame(&frame, &spec.dialect))?;
        write_atomic(&path, &bytes)?;

        let size = if spec.mutations.is_empty() {
            bytes.len()
        } else {
            apply_mutations(&path, &spec.mutations, spec.dialect.line_ending)?
        };

        tracing::info!(
            fixture = %spec.id,
            path = %path.display(),
            rows = frame.height(),
            bytes = size,
            "wrote fixture"
        );

        Ok(GeneratedFixture {
            id: spec.id.clone(),
            path,
            rows: frame.height(),
            columns: frame.width(),
            bytes: size,
            mutations: spec.mutations.iter().map(|m| m.describe()).collect(),
        })
    }
}
