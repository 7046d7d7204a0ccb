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

/// An error from training or applying a support vector machine
#[derive(Debug, Error)]
pub enum SvmError {
    #[error(transparent)]
    Solver(#[from] linfa_svm::SvmError),
    #[error("At least two classes are required for training, got {0}.")]
    TooFewClasses(usize),
    #[error("Got {records} records but {targets} targets.")]
    LengthMismatch { records: usize, targets: usize },
    #[error("At least two cross validation folds are required, got {0}.")]
    TooFewFolds(usize),
    #[error("The class {class} has {members} training members, which can not be stratified over {folds} folds.")]
    DegenerateFolds {
        class: usize,
        members: usize,
        folds: usize,
    },
    #[error("The hyperparameter grid is empty.")]
    EmptyGrid,
    #[error("Invalid hyperparameters: {0}")]
    InvalidParameters(String),
    #[error("The model expects {expected} features but got {actual}.")]
    FeatureMismatch { expected: usize, actual: usize },
    #[error("The label index pair ({actual}, {predicted}) is outside of {labels} labels.")]
    LabelOutOfRange { actual: usize, predicted: usize, labels: usize },
}

/// An error while storing or restoring a trained model
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Serialisation(#[from] bincode::Error),
}
