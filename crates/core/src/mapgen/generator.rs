//! Validated entry points over the generation pipeline.

mod pipeline;

use log::debug;

use crate::config::GeneratorConfig;
use crate::error::ConfigError;

use super::model::GeneratedDungeon;
use pipeline::run_pipeline;

#[derive(Clone, Debug)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self) -> GeneratedDungeon {
        run_pipeline(&self.config)
    }

    /// Same configuration under a different seed.
    pub fn generate_with_seed(&self, seed: u64) -> GeneratedDungeon {
        run_pipeline(&self.config.clone().with_seed(seed))
    }
}

/// Holds at most one generated dungeon. Regenerating always discards the
/// previous result before the new pass starts.
#[derive(Clone, Debug)]
pub struct DungeonSession {
    generator: DungeonGenerator,
    current: Option<GeneratedDungeon>,
}

impl DungeonSession {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Ok(Self { generator: DungeonGenerator::new(config)?, current: None })
    }

    pub fn current(&self) -> Option<&GeneratedDungeon> {
        self.current.as_ref()
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.generator.config()
    }

    pub fn regenerate(&mut self, seed: u64) -> &GeneratedDungeon {
        self.clear();
        self.generator.config.seed = seed;
        self.current.insert(self.generator.generate())
    }

    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            debug!("cleared generated dungeon");
        }
    }
}
