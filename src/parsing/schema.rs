use anyhow::{bail, Context};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;

use crate::util::json_io::load_json;

/// Describes where the coordinates of a CNV live in a source table
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMapping {
    /// Separate chromosome / start / end columns
    Columns {
        chromosome: String,
        start: String,
        end: String
    },
    /// One column holding a combined `[chr]<chrom>:<start>-<end>` string
    Region {
        column: String
    }
}

impl FieldMapping {
    /// Convenience constructor for the column variant
    pub fn columns(chromosome: &str, start: &str, end: &str) -> Self {
        FieldMapping::Columns {
            chromosome: chromosome.to_string(),
            start: start.to_string(),
            end: end.to_string()
        }
    }

    /// Convenience constructor for the region variant
    pub fn region(column: &str) -> Self {
        FieldMapping::Region { column: column.to_string() }
    }
}

/// Schemas that ship with the tool
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display, strum_macros::EnumIter)]
pub enum BuiltinSchema {
    /// GenomeStudio exports
    #[strum(serialize = "genomestudio")]
    GenomeStudio,
    /// NxClinical exports, which use a single region column
    #[strum(serialize = "nxclinical")]
    NxClinical,
    /// Omer Software exports
    #[strum(serialize = "omer")]
    Omer,
    /// The curated gold standard table
    #[strum(serialize = "gold_standard")]
    GoldStandard,
    /// Already normalized tables, e.g. our own outputs
    #[strum(serialize = "standard")]
    Standard,
}

impl BuiltinSchema {
    pub fn mapping(&self) -> FieldMapping {
        match self {
            BuiltinSchema::GenomeStudio |
            BuiltinSchema::GoldStandard => FieldMapping::columns("Chr", "Start", "End"),
            BuiltinSchema::NxClinical => FieldMapping::region("Chromosome Region"),
            BuiltinSchema::Omer => FieldMapping::columns("Chromosome", "Start", "End"),
            BuiltinSchema::Standard => FieldMapping::columns("Chromosome", "Start_Pos", "End_Pos"),
        }
    }
}

/// Lookup from a schema name to its field mapping.
/// New sources are added as entries here (or in a JSON config), never as new code paths.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, FieldMapping>
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        let schemas = BuiltinSchema::iter()
            .map(|b| (b.to_string(), b.mapping()))
            .collect();
        Self { schemas }
    }
}

impl SchemaRegistry {
    /// Builds the registry from the built-ins plus an optional JSON config.
    /// The config is an object from schema name to mapping, e.g. `{"cnvkit": {"kind": "columns", "chromosome": "chromosome", "start": "start", "end": "end"}}`.
    /// # Arguments
    /// * `opt_config` - optional path to the JSON config
    /// # Errors
    /// * if the config cannot be loaded or parsed
    /// * if the config re-defines a built-in schema
    pub fn load(opt_config: Option<&Path>) -> anyhow::Result<Self> {
        let mut registry = Self::default();
        if let Some(config_fn) = opt_config {
            let custom: IndexMap<String, FieldMapping> = load_json(config_fn)
                .with_context(|| format!("Error while loading schema config {config_fn:?}:"))?;
            for (name, mapping) in custom.into_iter() {
                registry.insert(name, mapping)?;
            }
        }
        Ok(registry)
    }

    /// Adds a new schema
    /// # Errors
    /// * if the name is already registered, ignoring ASCII case
    pub fn insert(&mut self, name: String, mapping: FieldMapping) -> anyhow::Result<()> {
        if self.get(&name).is_some() {
            bail!("Duplicate schema name: {name:?}");
        }
        self.schemas.insert(name, mapping);
        Ok(())
    }

    /// Looks up a schema by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&FieldMapping> {
        self.schemas.get(name).or_else(|| {
            self.schemas.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, mapping)| mapping)
        })
    }

    /// All registered names, built-ins first
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(|k| k.as_str()).collect()
    }
}
