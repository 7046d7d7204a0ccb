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

use std::cmp::Reverse;
use std::collections::BTreeMap;
use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use crate::corpus::{CorpusDocumentStatistics, CorpusStatisticsCollector};
use crate::error::FeatureError;
use crate::identifiers::sanitize_identifiers;
use crate::normalizer::TokenStream;

/// The default minimum fraction of documents a term has to appear in.
pub const DEFAULT_MIN_DOCUMENT_FRACTION: f64 = 0.01;

/// The pruned terms of a corpus.
///
/// Terms are sorted lexicographically, the position of a term is its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: Vec<String>,
}

impl Vocabulary {
    /// Keeps every term of [statistics] whose document frequency reaches [min_document_fraction].
    pub fn prune(
        statistics: &CorpusStatisticsCollector,
        min_document_fraction: f64,
    ) -> Result<Self, FeatureError> {
        if !(min_document_fraction > 0.0 && min_document_fraction <= 1.0) {
            return Err(FeatureError::InvalidThreshold(min_document_fraction));
        }
        if statistics.document_count() == 0 {
            return Err(FeatureError::EmptyCorpus);
        }
        let terms: Vec<String> = statistics
            .terms_with_document_fraction(min_document_fraction)
            .into_iter()
            .map(str::to_owned)
            .collect();
        if terms.is_empty() {
            return Err(FeatureError::EmptyVocabulary {
                threshold: min_document_fraction,
                documents: statistics.document_count(),
                raw_terms: statistics.unique_word_count(),
            });
        }
        log::info!(
            "Pruned the vocabulary from {} to {} terms (min document fraction {}).",
            statistics.unique_word_count(),
            terms.len(),
            min_document_fraction
        );
        Ok(Self::from_sorted_terms(terms))
    }

    fn from_sorted_terms(terms: Vec<String>) -> Self {
        let columns = sanitize_identifiers(&terms);
        Self { terms, columns }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The stems, in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The sanitized column identifiers, in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|value| value.as_str().cmp(term)).ok()
    }

    /// Counts the vocabulary terms of [tokens]; unknown tokens are ignored.
    pub fn vectorize<T: AsRef<str>>(&self, tokens: &[T]) -> Array1<f64> {
        let mut row = Array1::zeros(self.len());
        for token in tokens {
            if let Some(column) = self.column_of(token.as_ref()) {
                row[column] += 1.0;
            }
        }
        row
    }
}

/// Builds the document-term matrix.
#[derive(Debug, Copy, Clone)]
pub struct FeatureBuilder {
    min_document_fraction: f64,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DOCUMENT_FRACTION)
    }
}

impl FeatureBuilder {
    pub fn new(min_document_fraction: f64) -> Self {
        Self {
            min_document_fraction,
        }
    }

    /// Collects the statistics of all [documents] without pruning.
    pub fn collect_statistics(documents: &[TokenStream]) -> CorpusStatisticsCollector {
        let mut statistics = CorpusStatisticsCollector::default();
        for document in documents {
            statistics.add(document);
        }
        statistics
    }

    /// Builds one feature row per document over the pruned vocabulary.
    /// Documents without any vocabulary term are kept as zero rows.
    /// The unpruned statistics are kept in the table.
    pub fn build<L>(
        &self,
        documents: &[TokenStream],
        labels: Vec<L>,
    ) -> Result<FeatureTable<L>, FeatureError> {
        if documents.len() != labels.len() {
            return Err(FeatureError::LengthMismatch {
                documents: documents.len(),
                labels: labels.len(),
            });
        }
        let statistics = Self::collect_statistics(documents);
        let vocabulary = Vocabulary::prune(&statistics, self.min_document_fraction)?;
        let mut features = Array2::zeros((documents.len(), vocabulary.len()));
        for (mut row, document) in features.axis_iter_mut(Axis(0)).zip_eq(documents) {
            row.assign(&vocabulary.vectorize(document));
        }
        Ok(FeatureTable {
            statistics,
            vocabulary,
            features,
            labels,
        })
    }
}

/// The dense labelled document-term matrix.
#[derive(Debug, Clone)]
pub struct FeatureTable<L> {
    statistics: CorpusStatisticsCollector,
    vocabulary: Vocabulary,
    features: Array2<f64>,
    labels: Vec<L>,
}

impl<L> FeatureTable<L> {
    /// The statistics of the corpus before pruning
    pub fn statistics(&self) -> &CorpusStatisticsCollector {
        &self.statistics
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn row(&self, index: usize) -> ArrayView1<f64> {
        self.features.row(index)
    }

    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }
}

impl<L: Clone> FeatureTable<L> {
    /// Copies the given [rows] (in the given order) out of the table.
    pub fn select(&self, rows: &[usize]) -> (Array2<f64>, Vec<L>) {
        (
            self.features.select(Axis(0), rows),
            rows.iter().map(|row| self.labels[*row].clone()).collect(),
        )
    }
}

impl<L: Ord + Clone> FeatureTable<L> {
    /// The [n] most frequent vocabulary terms per label with their total count.
    /// Ties are resolved by column order.
    pub fn top_terms_by_label(&self, n: usize) -> BTreeMap<L, Vec<(&str, u64)>> {
        let mut sums: BTreeMap<L, Array1<f64>> = BTreeMap::new();
        for (row, label) in self.features.axis_iter(Axis(0)).zip_eq(&self.labels) {
            let sum = sums
                .entry(label.clone())
                .or_insert_with(|| Array1::zeros(self.vocabulary.len()));
            *sum += &row;
        }
        sums.into_iter()
            .map(|(label, sum)| {
                let top = sum
                    .iter()
                    .enumerate()
                    .filter(|(_, count)| **count > 0.0)
                    .map(|(column, count)| (self.vocabulary.terms[column].as_str(), *count as u64))
                    .sorted_by_key(|(_, count)| Reverse(*count))
                    .take(n)
                    .collect();
                (label, top)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{FeatureBuilder, Vocabulary};
    use crate::corpus::CorpusDocumentStatistics;
    use crate::error::FeatureError;
    use crate::normalizer::TokenStream;

    fn streams(raw: &[&str]) -> Vec<TokenStream> {
        raw.iter()
            .map(|value| value.split_whitespace().map(str::to_owned).collect())
            .collect()
    }

    #[test]
    fn rows_and_columns_follow_documents_and_vocabulary() {
        let docs = streams(&["job hire hire", "coffe", "", "job learn"]);
        let table = FeatureBuilder::new(0.5).build(&docs, vec!["a", "b", "b", "a"]).unwrap();
        assert_eq!(4, table.len());
        assert_eq!(vec!["job"], table.vocabulary().terms());
        assert_eq!((4, 1), table.features().dim());
        assert_eq!(vec![1.0, 0.0, 0.0, 1.0], table.features().column(0).to_vec());
    }

    #[test]
    fn statistics_cover_the_unpruned_corpus() {
        let docs = streams(&["job hire hire", "coffe", "", "job learn"]);
        let table = FeatureBuilder::new(0.5).build(&docs, vec![0, 1, 1, 0]).unwrap();
        let statistics = table.statistics();
        assert_eq!(4, statistics.document_count());
        assert_eq!(6, statistics.word_count());
        assert_eq!(4, statistics.unique_word_count());
        assert_eq!(1, table.vocabulary().len());
    }

    #[test]
    fn zero_rows_are_kept() {
        let docs = streams(&["job hire", "", "job"]);
        let table = FeatureBuilder::new(0.1).build(&docs, vec![0, 1, 0]).unwrap();
        assert_eq!(3, table.len());
        assert!(table.row(1).iter().all(|value| *value == 0.0));
        assert_eq!(vec!["hire", "job"], table.vocabulary().terms());
        assert_eq!(vec![1.0, 1.0], table.row(0).to_vec());
    }

    #[test]
    fn counts_are_occurrences() {
        let docs = streams(&["hire hire hire", "hire"]);
        let table = FeatureBuilder::new(1.0).build(&docs, vec![(), ()]).unwrap();
        assert_eq!(vec![3.0, 1.0], table.features().column(0).to_vec());
    }

    #[test]
    fn strict_threshold_without_shared_term_fails() {
        let docs = streams(&["job", "coffe", "learn job"]);
        let err = FeatureBuilder::new(1.0).build(&docs, vec![0, 1, 2]).unwrap_err();
        assert_eq!(
            FeatureError::EmptyVocabulary {
                threshold: 1.0,
                documents: 3,
                raw_terms: 3
            },
            err
        );
    }

    #[test]
    fn invalid_inputs() {
        let docs = streams(&["job"]);
        assert_eq!(
            FeatureError::InvalidThreshold(0.0),
            FeatureBuilder::new(0.0).build(&docs, vec![0]).unwrap_err()
        );
        assert_eq!(
            FeatureError::LengthMismatch { documents: 1, labels: 0 },
            FeatureBuilder::new(0.5).build(&docs, Vec::<u8>::new()).unwrap_err()
        );
        assert_eq!(
            FeatureError::EmptyCorpus,
            FeatureBuilder::new(0.5).build(&[], Vec::<u8>::new()).unwrap_err()
        );
    }

    #[test]
    fn columns_are_sanitized() {
        let docs = streams(&["5 job", "5 job"]);
        let table = FeatureBuilder::new(0.5).build(&docs, vec![0, 0]).unwrap();
        assert_eq!(vec!["5", "job"], table.vocabulary().terms());
        assert_eq!(vec!["X5", "job"], table.vocabulary().columns());
        assert_eq!(Some(0), table.vocabulary().column_of("5"));
        assert_eq!(None, table.vocabulary().column_of("X5"));
    }

    #[test]
    fn pruning_is_monotone() {
        let docs = streams(&["a b c", "a b", "a", "d", "a d e"]);
        let statistics = FeatureBuilder::collect_statistics(&docs);
        let mut last = usize::MAX;
        for step in 1..=10 {
            let kept = match Vocabulary::prune(&statistics, step as f64 / 10.0) {
                Ok(vocabulary) => vocabulary.len(),
                Err(FeatureError::EmptyVocabulary { .. }) => 0,
                Err(err) => panic!("unexpected {err}"),
            };
            assert!(kept <= last);
            last = kept;
        }
    }

    #[test]
    fn top_terms_per_label() {
        let docs = streams(&["job job hire", "job", "coffe bean", "coffe"]);
        let table = FeatureBuilder::new(0.2)
            .build(&docs, vec!["job", "job", "coffee", "coffee"])
            .unwrap();
        let top = table.top_terms_by_label(1);
        assert_eq!(vec![("job", 3)], top["job"]);
        assert_eq!(vec![("coffe", 2)], top["coffee"]);
    }
}
