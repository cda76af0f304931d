// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Lacrima and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! A single JSON document; every field is optional and falls back to the built-in catalog and
//! layout constants.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::model::{Catalog, CatalogDef, CategoryId};

const DEFAULT_REFERENCE_CATEGORY: &str = "eyelid";
const DEFAULT_PADDING_TOP: f64 = 32.0;
const DEFAULT_RESIZE_SETTLE_MS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Category whose marker/panel pair drives the alignment offsets.
    pub reference_category: CategoryId,
    /// Top padding of the content container; panels reaching above it get extra clearance.
    pub padding_top: f64,
    /// Quiet period after the last resize before connectors are recomputed.
    pub resize_settle_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reference_category: CategoryId::from_static(DEFAULT_REFERENCE_CATEGORY),
            padding_top: DEFAULT_PADDING_TOP,
            resize_settle_ms: DEFAULT_RESIZE_SETTLE_MS,
        }
    }
}

impl LayoutConfig {
    pub fn resize_settle(&self) -> Duration {
        Duration::from_millis(self.resize_settle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[schemars(with = "CatalogDef")]
    pub catalog: Catalog,
    pub layout: LayoutConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
    UnknownReferenceCategory { category_id: CategoryId },
    InvalidPadding { padding_top: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::UnknownReferenceCategory { category_id } => {
                write!(f, "reference category {category_id} is not in the catalog")
            }
            Self::InvalidPadding { padding_top } => {
                write!(f, "padding_top must be a finite, non-negative number (got {padding_top})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let reference = &self.layout.reference_category;
        if self.catalog.category(reference).is_none() {
            return Err(ConfigError::UnknownReferenceCategory { category_id: reference.clone() });
        }

        let padding_top = self.layout.padding_top;
        if !padding_top.is_finite() || padding_top < 0.0 {
            return Err(ConfigError::InvalidPadding { padding_top });
        }

        Ok(())
    }

    /// JSON schema for the config file, pretty-printed.
    pub fn json_schema() -> String {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }
}
