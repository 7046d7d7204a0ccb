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

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::{tempdir, Utf8TempDir};
use float_cmp::approx_eq;
use svm::{GridConfig, Kernel};
use text_processing::FeatureError;
use tweetclass::config::Configs;
use tweetclass::data::DataLoader;
use tweetclass::{Pipeline, PipelineError, TrainedModel};

const WORD_DISJOINT: &str = "text,class
Hiring #java,A
\"We are hiring, java\",A
hiring hiring hiring,A
Java: hiring!,A
They are hiring,A
Java coffee mug,B
coffee in my mug,B
my Java coffee,B
the mug,B
\"coffee, coffee and a mug\",B
";

fn write_input(dir: &Utf8TempDir, content: &str) -> Utf8PathBuf {
    let path = dir.path().join("tweets.csv");
    std::fs::write(&path, content).unwrap();
    path
}

fn configs(input: &Utf8Path) -> Configs {
    let mut configs = Configs::default();
    configs.data.input = Some(input.to_path_buf());
    configs.split.ratio = 0.7;
    configs.split.seed = 17;
    configs.training = GridConfig {
        folds: 2,
        kernels: vec![Kernel::Linear],
        costs: vec![1.0, 10.0],
        gammas: vec![],
    };
    configs
}

#[test]
fn word_disjoint_classes_are_perfectly_separated() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, WORD_DISJOINT);
    let outcome = Pipeline::new(configs(&input)).run().unwrap();

    assert_eq!(10, outcome.documents);
    assert_eq!(3, outcome.vocabulary_size);
    assert_eq!(
        vec!["coffe", "hire", "mug"],
        outcome.model.vocabulary().terms()
    );
    assert_eq!(8, outcome.split.train().len());
    assert_eq!(2, outcome.split.test().len());
    assert_eq!(2, outcome.confusion.total());
    assert_eq!(1, outcome.confusion.row_sum(0));
    assert_eq!(1, outcome.confusion.row_sum(1));
    assert!(approx_eq!(f64, 1.0, outcome.accuracy().unwrap()));
    assert_eq!(Kernel::Linear, outcome.model.parameters().kernel);
}

#[test]
fn runs_are_reproducible() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, WORD_DISJOINT);
    let first = Pipeline::new(configs(&input)).run().unwrap();
    let second = Pipeline::new(configs(&input)).run().unwrap();
    assert_eq!(first.split, second.split);
    assert_eq!(first.grid, second.grid);
    assert_eq!(first.confusion, second.confusion);
    assert_eq!(first.model.parameters(), second.model.parameters());
}

#[test]
fn stored_model_classifies_new_texts() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, WORD_DISJOINT);
    let mut configs = configs(&input);
    let model_path = dir.path().join("out").join("model.bin");
    let confusion_path = dir.path().join("out").join("confusion.csv");
    configs.output.model = Some(model_path.clone());
    configs.output.confusion_csv = Some(confusion_path.clone());
    Pipeline::new(configs).run().unwrap();

    let model = TrainedModel::load(&model_path).unwrap();
    let texts = ["Is anyone hiring?", "A mug of coffee"];
    assert_eq!(vec!["A", "B"], model.predict(&texts).unwrap());

    let exported = std::fs::read_to_string(&confusion_path).unwrap();
    assert!(exported.starts_with("actual,A,B\n"));
    assert_eq!(3, exported.lines().count());
}

#[test]
fn stopword_only_document_is_a_zero_row() {
    let input = format!("{WORD_DISJOINT}the and of it,A\n");
    let pipeline = Pipeline::new(Configs::default());
    let data = DataLoader::from_config(&pipeline.configs().data)
        .load(input.as_bytes())
        .unwrap();
    let inspection = pipeline.inspect_data(data).unwrap();
    assert_eq!(11, inspection.table.len());
    assert!(inspection.table.row(10).iter().all(|value| *value == 0.0));
    assert_eq!(11, inspection.data.documents[10].row);
}

#[test]
fn strict_threshold_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, WORD_DISJOINT);
    let mut configs = configs(&input);
    configs.features.min_document_fraction = 1.0;
    match Pipeline::new(configs).run() {
        Err(PipelineError::Features(FeatureError::EmptyVocabulary {
            documents,
            raw_terms,
            ..
        })) => {
            assert_eq!(10, documents);
            assert_eq!(3, raw_terms);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_input_is_reported() {
    assert!(matches!(
        Pipeline::new(Configs::default()).run(),
        Err(PipelineError::MissingInput)
    ));
}
