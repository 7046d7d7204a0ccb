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

use std::ops::Deref;
use isolang::Language;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use crate::stopword_registry::StopWordRepository;

/// The config for a stopword registry
#[derive(Debug, Clone, Serialize, Deserialize, Eq)]
#[serde(transparent)]
pub struct StopwordRegistryConfig {
    pub registries: Vec<StopWordRepository>,
}

impl Default for StopwordRegistryConfig {
    fn default() -> Self {
        Self {
            registries: vec![StopWordRepository::Bundled],
        }
    }
}

impl PartialEq for StopwordRegistryConfig {
    fn eq(&self, other: &Self) -> bool {
        self.registries.len() == other.registries.len()
            && self.registries.iter().all(|value| other.registries.contains(value))
    }
}

impl Deref for StopwordRegistryConfig {
    type Target = [StopWordRepository];

    fn deref(&self) -> &Self::Target {
        &self.registries
    }
}

/// The config of the text normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// If set to true the text is NFC normalized before cleaning
    #[serde(default = "_default_normalize_text")]
    pub normalize_text: bool,
    /// The language used to select the stopword list
    #[serde(default = "_default_language")]
    pub language: Language,
    /// The stemmer, no stemming if not set
    #[serde(default = "_default_stemmer")]
    pub stemmer: Option<Algorithm>,
    /// Where to look for stopwords
    #[serde(default)]
    pub stopwords: StopwordRegistryConfig,
    /// Terms present in every document of the corpus, e.g. the search keyword.
    #[serde(default = "_default_domain_terms")]
    pub domain_terms: Vec<String>,
}

const fn _default_normalize_text() -> bool {
    true
}
const fn _default_language() -> Language {
    Language::Eng
}
const fn _default_stemmer() -> Option<Algorithm> {
    Some(Algorithm::English)
}
fn _default_domain_terms() -> Vec<String> {
    vec!["java".to_string()]
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            normalize_text: _default_normalize_text(),
            language: _default_language(),
            stemmer: _default_stemmer(),
            stopwords: StopwordRegistryConfig::default(),
            domain_terms: _default_domain_terms(),
        }
    }
}
