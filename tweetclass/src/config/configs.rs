//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use crate::config::data::DataConfig;
use crate::config::model::{FeaturesConfig, SplitConfig};
use crate::config::output::OutputConfig;
use crate::config::system::SystemConfig;
use camino::Utf8Path;
use config::Config;
use serde::{Deserialize, Serialize};
use svm::GridConfig;
use text_processing::configs::NormalizerConfig;

/// A collection of all configs used in a run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename(serialize = "Config"))]
pub struct Configs {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub text: NormalizerConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub training: GridConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Configs {
    /// Loads the configs from the working dir and the [folder], the environment overrides both.
    pub fn load_from<P: AsRef<Utf8Path>>(folder: P) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("./config").required(false))
            .add_source(config::File::with_name(folder.as_ref().join("tweetclass").as_str()).required(false))
            .add_source(config::File::with_name(folder.as_ref().join("config").as_str()).required(false))
            .add_source(config::Environment::with_prefix("TWEETCLASS").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Tries to find a config at the default paths, falls back to the defaults.
    pub fn discover_or_default() -> Result<Self, config::ConfigError> {
        match Config::builder()
            .add_source(config::File::with_name("./config").required(false))
            .add_source(config::File::with_name("./tweetclass").required(false))
            .add_source(config::Environment::with_prefix("TWEETCLASS").separator("."))
            .build()
        {
            Ok(value) => value.try_deserialize(),
            Err(_) => Ok(Default::default()),
        }
    }
}
