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

use std::fs::File;
use std::io::BufWriter;
use camino::Utf8Path;
use svm::{ConfusionMatrix, GridSearch, GridSearchReport};
use text_processing::features::FeatureBuilder;
use text_processing::{FeatureTable, Normalizer};
use crate::config::Configs;
use crate::data::{DataLoader, LabelSet, LoadedData, SplitAssignment, Splitter};
use crate::error::PipelineError;
use crate::model::TrainedModel;

/// The result of loading, normalizing and vectorizing the input.
#[derive(Debug)]
pub struct Inspection {
    pub data: LoadedData,
    pub table: FeatureTable<usize>,
}

/// The result of a complete run.
#[derive(Debug)]
pub struct RunOutcome {
    pub labels: LabelSet,
    pub documents: usize,
    pub skipped: usize,
    pub vocabulary_size: usize,
    pub split: SplitAssignment,
    pub grid: GridSearchReport,
    pub confusion: ConfusionMatrix,
    pub model: TrainedModel,
}

impl RunOutcome {
    pub fn accuracy(&self) -> Option<f64> {
        self.confusion.accuracy()
    }
}

/// Load, normalize, vectorize, split, train and evaluate.
#[derive(Debug, Clone)]
pub struct Pipeline {
    configs: Configs,
}

impl Pipeline {
    pub fn new(configs: Configs) -> Self {
        Self { configs }
    }

    pub fn configs(&self) -> &Configs {
        &self.configs
    }

    pub fn load(&self) -> Result<LoadedData, PipelineError> {
        let input = self
            .configs
            .data
            .input
            .as_deref()
            .ok_or(PipelineError::MissingInput)?;
        Ok(DataLoader::from_config(&self.configs.data).load_path(input)?)
    }

    /// Runs the stages up to the feature table.
    pub fn inspect(&self) -> Result<Inspection, PipelineError> {
        self.inspect_data(self.load()?)
    }

    pub fn inspect_data(&self, data: LoadedData) -> Result<Inspection, PipelineError> {
        let (_, table) = self.vectorize(&data)?;
        Ok(Inspection { data, table })
    }

    /// Runs every stage on the configured input and writes the configured artifacts.
    pub fn run(&self) -> Result<RunOutcome, PipelineError> {
        let outcome = self.run_on(self.load()?)?;
        self.write_artifacts(&outcome)?;
        Ok(outcome)
    }

    /// Runs every stage on already loaded [data].
    pub fn run_on(&self, data: LoadedData) -> Result<RunOutcome, PipelineError> {
        let (normalizer, table) = self.vectorize(&data)?;

        let split = Splitter::new(self.configs.split.ratio, self.configs.split.seed)?
            .split(table.labels())?;
        let (train_features, train_targets) = table.select(split.train());
        let (test_features, test_targets) = table.select(split.test());

        let (classifier, grid) = GridSearch::new(self.configs.training.clone(), self.configs.split.seed)
            .fit(train_features.view(), &train_targets)?;
        log::info!("Trained the final model with {}.", classifier.parameters());

        let predicted = classifier.predict(test_features.view())?;
        let confusion = ConfusionMatrix::new(data.labels.as_slice(), &test_targets, &predicted)?;
        match confusion.accuracy() {
            Some(accuracy) => log::info!(
                "Accuracy on {} test documents: {:.4}",
                test_targets.len(),
                accuracy
            ),
            None => log::warn!("The test subset is empty, the accuracy is undefined."),
        }

        let vocabulary_size = table.vocabulary().len();
        let model = TrainedModel::new(
            normalizer,
            table.into_vocabulary(),
            data.labels.clone(),
            classifier,
        );
        Ok(RunOutcome {
            labels: data.labels,
            documents: data.documents.len(),
            skipped: data.skipped,
            vocabulary_size,
            split,
            grid,
            confusion,
            model,
        })
    }

    fn vectorize(
        &self,
        data: &LoadedData,
    ) -> Result<(Normalizer, FeatureTable<usize>), PipelineError> {
        let normalizer = Normalizer::from_config(&self.configs.text);
        let documents = normalizer.normalize_all(data.texts());
        let empty = documents.iter().filter(|value| value.is_empty()).count();
        if empty > 0 {
            log::info!("{empty} documents have no tokens left after normalization.");
        }
        let table = FeatureBuilder::new(self.configs.features.min_document_fraction)
            .build(&documents, data.classes())?;
        Ok((normalizer, table))
    }

    /// Stores the model and the confusion matrix if configured.
    pub fn write_artifacts(&self, outcome: &RunOutcome) -> Result<(), PipelineError> {
        if let Some(path) = &self.configs.output.model {
            outcome.model.save(path)?;
        }
        if let Some(path) = &self.configs.output.confusion_csv {
            Self::export_confusion(&outcome.confusion, path)?;
        }
        Ok(())
    }

    fn export_confusion(confusion: &ConfusionMatrix, path: &Utf8Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        confusion.write_csv(BufWriter::new(file))?;
        log::info!("Exported the confusion matrix to {path}.");
        Ok(())
    }
}
