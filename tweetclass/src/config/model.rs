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

use serde::{Deserialize, Serialize};
use text_processing::features::DEFAULT_MIN_DOCUMENT_FRACTION;

/// The default share of every label assigned to the training subset
pub const DEFAULT_SPLIT_RATIO: f64 = 0.7;

/// The default seed for the split and the cross validation folds
pub const DEFAULT_SEED: u64 = 42;

/// Config of the vocabulary pruning
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
#[serde(rename(serialize = "Features"))]
pub struct FeaturesConfig {
    /// A term is kept if it appears in at least this fraction of all documents.
    /// Has to be in (0, 1].
    #[serde(default = "_default_min_document_fraction")]
    pub min_document_fraction: f64,
}

const fn _default_min_document_fraction() -> f64 {
    DEFAULT_MIN_DOCUMENT_FRACTION
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            min_document_fraction: _default_min_document_fraction(),
        }
    }
}

/// Config of the train/test split
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
#[serde(rename(serialize = "Split"))]
pub struct SplitConfig {
    /// The share of every label used for training. Has to be in (0, 1].
    #[serde(default = "_default_ratio")]
    pub ratio: f64,

    /// Seeds the split and the cross validation folds
    #[serde(default = "_default_seed")]
    pub seed: u64,
}

const fn _default_ratio() -> f64 {
    DEFAULT_SPLIT_RATIO
}
const fn _default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            ratio: _default_ratio(),
            seed: _default_seed(),
        }
    }
}
