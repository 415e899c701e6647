// ABOUTME: Command modules for recipe-generator plus command-line configuration overrides
// ABOUTME: Flags are layered over environment variables before configuration is loaded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

pub mod catalog;
pub mod favorites;
pub mod generate;

use std::env;
use std::path::PathBuf;

use recipe_generator::config::{data_dir_from_lookup, LlmProviderType, RecipeConfig, DATA_DIR_ENV_VAR};
use recipe_generator::errors::AppResult;
use recipe_generator::favorites::{Favorites, FileStore};

/// Command-line values that take precedence over the environment
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    fn lookup(&self, key: &str) -> Option<String> {
        let overridden = match key {
            LlmProviderType::ENV_VAR => self.provider.clone(),
            LlmProviderType::MODEL_ENV_VAR => self.model.clone(),
            DATA_DIR_ENV_VAR => self
                .data_dir
                .as_ref()
                .map(|dir| dir.display().to_string()),
            _ => None,
        };
        overridden.or_else(|| env::var(key).ok())
    }

    /// Full configuration, provider included
    pub fn recipe_config(&self) -> AppResult<RecipeConfig> {
        RecipeConfig::from_lookup(&|key: &str| self.lookup(key))
    }

    /// Favorites only need the data directory, not provider credentials
    pub fn favorites(&self) -> AppResult<Favorites<FileStore>> {
        let data_dir = data_dir_from_lookup(&|key: &str| self.lookup(key))?;
        Ok(Favorites::load(FileStore::new(data_dir)))
    }
}
