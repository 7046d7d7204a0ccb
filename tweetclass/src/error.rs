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

use std::io;
use camino::Utf8PathBuf;
use svm::{PersistenceError, SvmError};
use text_processing::FeatureError;
use thiserror::Error;
use crate::data::{LoadError, SplitError};

/// Any error while running the classification pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No input file is configured, set data.input or pass --input.")]
    MissingInput,
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Features(#[from] FeatureError),
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Svm(#[from] SvmError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Failed to export the confusion matrix: {0}")]
    Export(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("The model predicted the class {0}, which has no label.")]
    UnknownClass(usize),
}

/// Errors of loading or writing the configs.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialisation(#[from] serde_json::Error),
    #[error("The config {0} already exists, delete it before regenerating.")]
    AlreadyExists(Utf8PathBuf),
}
