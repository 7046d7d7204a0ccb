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

use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// The statistics over the documents in a corpus
pub trait CorpusDocumentStatistics {
    /// The number of documents in the corpus
    fn document_count(&self) -> u64;
    /// The number of words in the corpus
    fn word_count(&self) -> u64;
    /// The number of unique words in the corpus
    fn unique_word_count(&self) -> usize;
    /// The frequency of a [word] in a corpus
    fn word_frequency(&self, word: &str) -> Option<u64>;
    /// The number of documents containing [word]
    fn document_frequency(&self, word: &str) -> Option<u64>;
}

/// Frequencies of a single term
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TermStatistics {
    pub word_frequency: u64,
    pub document_frequency: u64,
}

/// Collects the frequencies in a corpus.
/// Terms are kept in lexicographic order so that iteration is stable across runs.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct CorpusStatisticsCollector {
    document_count: u64,
    word_count: u64,
    terms: BTreeMap<String, TermStatistics>,
}

impl CorpusStatisticsCollector {
    pub fn add<D: IntoIterator<Item = W>, W: AsRef<str>>(&mut self, doc: D) {
        self.document_count = self.document_count.saturating_add(1);
        let mut seen = HashSet::new();
        for value in doc {
            let value = value.as_ref();
            self.word_count = self.word_count.saturating_add(1);
            let first_in_doc = seen.insert(value.to_owned());
            match self.terms.get_mut(value) {
                Some(stats) => {
                    stats.word_frequency = stats.word_frequency.saturating_add(1);
                    if first_in_doc {
                        stats.document_frequency = stats.document_frequency.saturating_add(1);
                    }
                }
                None => {
                    self.terms.insert(
                        value.to_owned(),
                        TermStatistics {
                            word_frequency: 1,
                            document_frequency: 1,
                        },
                    );
                }
            }
        }
    }

    /// Returns an iterator over the terms in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TermStatistics)> {
        self.terms.iter()
    }

    /// The terms contained in at least [min_fraction] of the documents, in lexicographic order.
    pub fn terms_with_document_fraction(&self, min_fraction: f64) -> Vec<&str> {
        if self.document_count == 0 {
            return Vec::new();
        }
        let documents = self.document_count as f64;
        self.terms
            .iter()
            .filter(|(_, stats)| stats.document_frequency as f64 / documents >= min_fraction)
            .map(|(term, _)| term.as_str())
            .collect()
    }
}

impl Display for CorpusStatisticsCollector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Document Count: {}", self.document_count)?;
        writeln!(f, "Word Count: {}", self.word_count)?;
        write!(f, "Unique Word Count: {}", self.unique_word_count())
    }
}

impl CorpusDocumentStatistics for CorpusStatisticsCollector {
    #[inline]
    fn document_count(&self) -> u64 {
        self.document_count
    }

    #[inline]
    fn word_count(&self) -> u64 {
        self.word_count
    }

    #[inline]
    fn unique_word_count(&self) -> usize {
        self.terms.len()
    }

    fn word_frequency(&self, word: &str) -> Option<u64> {
        self.terms.get(word).map(|value| value.word_frequency)
    }

    fn document_frequency(&self, word: &str) -> Option<u64> {
        self.terms.get(word).map(|value| value.document_frequency)
    }
}
