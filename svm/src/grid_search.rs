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

use std::fmt::{Display, Formatter};
use itertools::Itertools;
use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use crate::classifier::OneVsOneSvm;
use crate::config::{GridConfig, HyperParameters};
use crate::error::SvmError;
use crate::folds::StratifiedFolds;

/// The cross validation result of a single grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPointScore {
    pub parameters: HyperParameters,
    pub fold_accuracies: Vec<f64>,
}

impl GridPointScore {
    pub fn mean(&self) -> f64 {
        if self.fold_accuracies.is_empty() {
            return 0.0;
        }
        self.fold_accuracies.iter().sum::<f64>() / self.fold_accuracies.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.fold_accuracies.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.fold_accuracies.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// All scores of a grid search in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSearchReport {
    folds: usize,
    scores: Vec<GridPointScore>,
    best: usize,
}

impl GridSearchReport {
    pub fn folds(&self) -> usize {
        self.folds
    }

    pub fn scores(&self) -> &[GridPointScore] {
        &self.scores
    }

    pub fn best(&self) -> &GridPointScore {
        &self.scores[self.best]
    }

    pub fn best_parameters(&self) -> &HyperParameters {
        &self.best().parameters
    }
}

impl Display for GridSearchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid search with {} folds:", self.folds)?;
        for (idx, score) in self.scores.iter().enumerate() {
            let marker = if idx == self.best { '*' } else { ' ' };
            writeln!(
                f,
                "{marker} {:<36} mean {:.4}  min {:.4}  max {:.4}",
                score.parameters.to_string(),
                score.mean(),
                score.min(),
                score.max()
            )?;
        }
        Ok(())
    }
}

/// The index of the first score with the strictly highest mean.
fn best_index(scores: &[GridPointScore]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, score) in scores.iter().enumerate() {
        let mean = score.mean();
        match best {
            Some((_, best_mean)) if mean <= best_mean => {}
            _ => best = Some((idx, mean)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Selects hyperparameters by stratified k-fold cross validation.
#[derive(Debug, Clone)]
pub struct GridSearch {
    config: GridConfig,
    seed: u64,
}

impl GridSearch {
    pub fn new(config: GridConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Scores every grid point on the same folds.
    ///
    /// The first point with the strictly highest mean accuracy is the best one.
    pub fn search(
        &self,
        records: ArrayView2<f64>,
        targets: &[usize],
    ) -> Result<GridSearchReport, SvmError> {
        if records.nrows() != targets.len() {
            return Err(SvmError::LengthMismatch {
                records: records.nrows(),
                targets: targets.len(),
            });
        }
        let points = self.config.points();
        if points.is_empty() {
            return Err(SvmError::EmptyGrid);
        }
        for point in &points {
            point.validate()?;
        }
        let folds = StratifiedFolds::new(targets, self.config.folds, self.seed)?;
        let splits = folds.splits().collect_vec();

        let mut scores = Vec::with_capacity(points.len());
        for parameters in points {
            let mut fold_accuracies = Vec::with_capacity(splits.len());
            for (train, validation) in &splits {
                let train_targets = train.iter().map(|row| targets[*row]).collect_vec();
                let model = OneVsOneSvm::fit(
                    &parameters,
                    records.select(Axis(0), train).view(),
                    &train_targets,
                )?;
                let predicted = model.predict(records.select(Axis(0), validation).view())?;
                let correct = predicted
                    .iter()
                    .zip_eq(validation)
                    .filter(|(predicted, row)| **predicted == targets[**row])
                    .count();
                fold_accuracies.push(correct as f64 / validation.len() as f64);
            }
            let score = GridPointScore {
                parameters,
                fold_accuracies,
            };
            log::info!(
                "Cross validated {}: mean accuracy {:.4} (min {:.4}, max {:.4}).",
                score.parameters,
                score.mean(),
                score.min(),
                score.max()
            );
            scores.push(score);
        }

        let best = best_index(&scores).unwrap_or_default();
        log::info!("Selected {} from {} grid points.", scores[best].parameters, scores.len());
        Ok(GridSearchReport {
            folds: folds.len(),
            scores,
            best,
        })
    }

    /// Runs [GridSearch::search] and refits the best point on all [records].
    pub fn fit(
        &self,
        records: ArrayView2<f64>,
        targets: &[usize],
    ) -> Result<(OneVsOneSvm, GridSearchReport), SvmError> {
        let report = self.search(records, targets)?;
        let model = OneVsOneSvm::fit(report.best_parameters(), records, targets)?;
        Ok((model, report))
    }
}

#[cfg(test)]
mod test {
    use super::{best_index, GridPointScore, GridSearch};
    use crate::config::{GridConfig, HyperParameters, Kernel};
    use crate::error::SvmError;
    use float_cmp::approx_eq;
    use ndarray::Array2;

    fn separable(per_class: usize) -> (Array2<f64>, Vec<usize>) {
        let rows = per_class * 2;
        let mut records = Array2::zeros((rows, 2));
        let mut targets = Vec::with_capacity(rows);
        for row in 0..rows {
            let class = row % 2;
            records[[row, class]] = 1.0 + (row / 2) as f64 * 0.1;
            targets.push(class);
        }
        (records, targets)
    }

    fn grid(folds: usize) -> GridConfig {
        GridConfig {
            folds,
            kernels: vec![Kernel::Linear],
            costs: vec![1.0, 10.0],
            gammas: vec![],
        }
    }

    #[test]
    fn separable_data_scores_perfectly() {
        let (records, targets) = separable(6);
        let (model, report) = GridSearch::new(grid(3), 1).fit(records.view(), &targets).unwrap();
        assert_eq!(2, report.scores().len());
        assert_eq!(3, report.folds());
        assert!(approx_eq!(f64, 1.0, report.best().mean()));
        assert_eq!(&HyperParameters::linear(1.0), report.best_parameters());
        assert_eq!(targets, model.predict(records.view()).unwrap());
    }

    #[test]
    fn search_is_deterministic() {
        let (records, targets) = separable(5);
        let config = GridConfig {
            folds: 5,
            kernels: vec![Kernel::Linear, Kernel::Rbf],
            costs: vec![0.1, 1.0],
            gammas: vec![0.1, 1.0],
        };
        let first = GridSearch::new(config.clone(), 9).search(records.view(), &targets).unwrap();
        let second = GridSearch::new(config, 9).search(records.view(), &targets).unwrap();
        assert_eq!(first, second);
        assert_eq!(6, first.scores().len());
    }

    /// Two classes on the diagonals of the unit square, four points per corner.
    fn xor() -> (Array2<f64>, Vec<usize>) {
        let corners = [(0.0, 0.0, 0), (1.0, 1.0, 0), (0.0, 1.0, 1), (1.0, 0.0, 1)];
        let offsets = [(0.0, 0.0), (0.05, 0.0), (0.0, 0.05), (0.05, 0.05)];
        let mut records = Array2::zeros((corners.len() * offsets.len(), 2));
        let mut targets = Vec::with_capacity(records.nrows());
        let mut row = 0;
        for (x, y, class) in corners {
            for (dx, dy) in offsets {
                records[[row, 0]] = x + dx;
                records[[row, 1]] = y + dy;
                targets.push(class);
                row += 1;
            }
        }
        (records, targets)
    }

    #[test]
    fn later_point_wins_when_strictly_better() {
        let (records, targets) = xor();
        let config = GridConfig {
            folds: 4,
            kernels: vec![Kernel::Linear, Kernel::Rbf],
            costs: vec![10.0],
            gammas: vec![1.0],
        };
        let report = GridSearch::new(config, 5).search(records.view(), &targets).unwrap();
        assert_eq!(2, report.scores().len());
        assert!(report.scores()[0].mean() < report.scores()[1].mean());
        assert_eq!(Kernel::Rbf, report.best_parameters().kernel);
        assert!(report.to_string().contains("* rbf"), "{report}");
    }

    #[test]
    fn best_is_the_first_strict_maximum() {
        let scores = |means: &[f64]| {
            means
                .iter()
                .map(|mean| GridPointScore {
                    parameters: HyperParameters::linear(1.0),
                    fold_accuracies: vec![*mean],
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(Some(1), best_index(&scores(&[0.5, 0.8, 0.8, 0.7])));
        assert_eq!(Some(2), best_index(&scores(&[0.5, 0.6, 0.9])));
        assert_eq!(Some(0), best_index(&scores(&[0.9, 0.9])));
        assert_eq!(None, best_index(&[]));
    }

    #[test]
    fn configuration_errors() {
        let (records, targets) = separable(2);
        assert!(matches!(
            GridSearch::new(grid(3), 1).search(records.view(), &targets),
            Err(SvmError::DegenerateFolds { members: 2, folds: 3, .. })
        ));
        let empty = GridConfig {
            folds: 2,
            kernels: vec![],
            costs: vec![1.0],
            gammas: vec![],
        };
        assert!(matches!(
            GridSearch::new(empty, 1).search(records.view(), &targets),
            Err(SvmError::EmptyGrid)
        ));
    }

    #[test]
    fn score_summary() {
        let score = GridPointScore {
            parameters: HyperParameters::linear(1.0),
            fold_accuracies: vec![0.5, 1.0, 0.75],
        };
        assert!(approx_eq!(f64, 0.75, score.mean()));
        assert!(approx_eq!(f64, 0.5, score.min()));
        assert!(approx_eq!(f64, 1.0, score.max()));
    }
}
