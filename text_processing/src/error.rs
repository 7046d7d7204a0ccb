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

use thiserror::Error;

/// An error while building the document-term matrix
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("The corpus does not contain any document.")]
    EmptyCorpus,
    #[error("The minimum document fraction has to be in (0, 1] but was {0}.")]
    InvalidThreshold(f64),
    #[error("No term out of {raw_terms} appears in at least {threshold} of the {documents} documents, lower the threshold.")]
    EmptyVocabulary {
        threshold: f64,
        documents: u64,
        raw_terms: usize,
    },
    #[error("Got {documents} token streams but {labels} labels.")]
    LengthMismatch { documents: usize, labels: usize },
}
