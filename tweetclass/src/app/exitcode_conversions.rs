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

use std::process::ExitCode;
use svm::{PersistenceError, SvmError};
use text_processing::FeatureError;
use crate::data::{LoadError, SplitError};
use crate::error::{ConfigurationError, PipelineError};

impl From<ConfigurationError> for ExitCode {
    fn from(value: ConfigurationError) -> Self {
        match value {
            ConfigurationError::Load(_) => ExitCode::from(2),
            ConfigurationError::Io(_) => ExitCode::from(3),
            ConfigurationError::Serialisation(_) => ExitCode::from(4),
            ConfigurationError::AlreadyExists(_) => ExitCode::from(5),
        }
    }
}

impl From<PipelineError> for ExitCode {
    fn from(value: PipelineError) -> Self {
        let code: u8 = match value {
            PipelineError::MissingInput => 6,
            PipelineError::Load(value) => match value {
                LoadError::Open { .. } => 10,
                LoadError::Csv(_) => 11,
                LoadError::MissingColumn(_) => 12,
                LoadError::MissingField { .. } => 13,
                LoadError::InvalidUtf8 { .. } => 14,
                LoadError::UnknownLabel { .. } => 15,
                LoadError::NoDocuments => 16,
            },
            PipelineError::Features(value) => match value {
                FeatureError::EmptyCorpus => 20,
                FeatureError::InvalidThreshold(_) => 21,
                FeatureError::EmptyVocabulary { .. } => 22,
                FeatureError::LengthMismatch { .. } => 23,
            },
            PipelineError::Split(value) => match value {
                SplitError::InvalidRatio(_) => 30,
                SplitError::Empty => 31,
            },
            PipelineError::Svm(value) => match value {
                SvmError::Solver(_) => 40,
                SvmError::TooFewClasses(_) => 41,
                SvmError::LengthMismatch { .. } => 42,
                SvmError::TooFewFolds(_) => 43,
                SvmError::DegenerateFolds { .. } => 44,
                SvmError::EmptyGrid => 45,
                SvmError::InvalidParameters(_) => 46,
                SvmError::FeatureMismatch { .. } => 47,
                SvmError::LabelOutOfRange { .. } => 48,
            },
            PipelineError::Persistence(value) => match value {
                PersistenceError::IO(_) => 50,
                PersistenceError::Serialisation(_) => 51,
            },
            PipelineError::Export(_) => 60,
            PipelineError::Io(_) => 61,
            PipelineError::UnknownClass(_) => 70,
        };
        ExitCode::from(code)
    }
}
