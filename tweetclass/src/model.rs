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

use camino::Utf8Path;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use svm::{HyperParameters, OneVsOneSvm, PersistenceError};
use text_processing::normalizer::TokenStream;
use text_processing::{Normalizer, Vocabulary};
use crate::data::LabelSet;
use crate::error::PipelineError;

/// Everything needed to classify unseen messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainedModel {
    normalizer: Normalizer,
    vocabulary: Vocabulary,
    labels: LabelSet,
    classifier: OneVsOneSvm,
}

impl TrainedModel {
    pub fn new(normalizer: Normalizer, vocabulary: Vocabulary, labels: LabelSet, classifier: OneVsOneSvm) -> Self {
        Self {
            normalizer,
            vocabulary,
            labels,
            classifier,
        }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn parameters(&self) -> &HyperParameters {
        self.classifier.parameters()
    }

    /// Vectorizes already normalized documents over the vocabulary.
    pub fn vectorize(&self, documents: &[TokenStream]) -> Array2<f64> {
        let mut features = Array2::zeros((documents.len(), self.vocabulary.len()));
        for (mut row, document) in features.axis_iter_mut(Axis(0)).zip(documents) {
            row.assign(&self.vocabulary.vectorize(document));
        }
        features
    }

    /// Predicts the label of every raw text.
    pub fn predict<T: AsRef<str>>(&self, texts: &[T]) -> Result<Vec<&str>, PipelineError> {
        let documents = self.normalizer.normalize_all(texts.iter().map(AsRef::as_ref));
        let features = self.vectorize(&documents);
        self.classifier
            .predict(features.view())?
            .into_iter()
            .map(|class| self.labels.get(class).ok_or(PipelineError::UnknownClass(class)))
            .collect()
    }

    pub fn save(&self, path: impl AsRef<Utf8Path>) -> Result<(), PersistenceError> {
        svm::save_model(self, path)
    }

    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self, PersistenceError> {
        svm::load_model(path)
    }
}
