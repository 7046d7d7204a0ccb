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

use isolang::Language;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use crate::cleaning::clean;
use crate::configs::NormalizerConfig;
use crate::stopword_registry::{ContainsKind, StopWordList, StopWordRegistry};

/// The normalized stems of a single document.
pub type TokenStream = Vec<String>;

/// Lowercases, strips punctuation, drops stopwords and stems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Normalizer {
    language: Language,
    normalize: bool,
    stop_words: StopWordList,
    stemmer: Option<rust_stemmers::Algorithm>,
}

impl Normalizer {
    pub fn new(
        language: Language,
        normalize: bool,
        stop_words: StopWordList,
        stemmer: Option<rust_stemmers::Algorithm>,
    ) -> Self {
        Self {
            language,
            normalize,
            stop_words,
            stemmer,
        }
    }

    /// Creates the normalizer described by [cfg]. The domain terms are appended to
    /// whatever stopword list the registry provides for the configured language.
    pub fn from_config(cfg: &NormalizerConfig) -> Self {
        let registry = StopWordRegistry::initialize(&cfg.stopwords);
        let mut stop_words = match registry.load(&cfg.language, cfg.normalize_text) {
            Some(found) => found,
            None => {
                log::warn!(
                    "No stopwords found for {}, only the domain terms are filtered.",
                    cfg.language.to_name()
                );
                StopWordList::from_raw(Default::default(), cfg.normalize_text)
            }
        };
        stop_words.extend(cfg.domain_terms.iter().map(|value| value.to_lowercase()));
        Self::new(cfg.language, cfg.normalize_text, stop_words, cfg.stemmer)
    }

    /// Normalizes a single text.
    pub fn normalize(&self, text: &str) -> TokenStream {
        let stemmer = self.stemmer.map(rust_stemmers::Stemmer::create);
        self.normalize_with(text, stemmer.as_ref())
    }

    /// Normalizes every text of a corpus, keeping the order.
    pub fn normalize_all<I: IntoIterator<Item = T>, T: AsRef<str>>(&self, texts: I) -> Vec<TokenStream> {
        let stemmer = self.stemmer.map(rust_stemmers::Stemmer::create);
        texts
            .into_iter()
            .map(|text| self.normalize_with(text.as_ref(), stemmer.as_ref()))
            .collect()
    }

    fn normalize_with(&self, text: &str, stemmer: Option<&rust_stemmers::Stemmer>) -> TokenStream {
        let cleaned = clean(text, self.normalize);
        let words = cleaned
            .split_whitespace()
            .filter(|value| !self.stop_words.contains(ContainsKind::Raw, *value));
        match stemmer {
            Some(stemmer) => words.map(|value| stemmer.stem(value).into_owned()).collect_vec(),
            None => words.map(str::to_owned).collect_vec(),
        }
    }
}
