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

use std::fmt::{Debug, Formatter};
use itertools::Itertools;
use linfa::prelude::*;
use linfa::Dataset;
use linfa_svm::Svm;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use crate::config::{HyperParameters, Kernel};
use crate::error::SvmError;

/// A binary machine separating [positive] (true) from [negative] (false).
/// Both are positions in [OneVsOneSvm::classes].
#[derive(Serialize, Deserialize)]
struct PairwiseMachine {
    positive: usize,
    negative: usize,
    model: Svm<f64, bool>,
}

/// A multi-class support vector machine built from one binary machine per pair of classes.
///
/// Classes are plain indices. A prediction is the class with the most pairwise votes,
/// ties go to the lowest class index.
#[derive(Serialize, Deserialize)]
pub struct OneVsOneSvm {
    parameters: HyperParameters,
    classes: Vec<usize>,
    features: usize,
    machines: Vec<PairwiseMachine>,
}

impl Debug for OneVsOneSvm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneVsOneSvm")
            .field("parameters", &self.parameters)
            .field("classes", &self.classes)
            .field("features", &self.features)
            .field("machines", &self.machines.len())
            .finish()
    }
}

impl OneVsOneSvm {
    /// Trains one machine for every pair of classes present in [targets].
    pub fn fit(
        parameters: &HyperParameters,
        records: ArrayView2<f64>,
        targets: &[usize],
    ) -> Result<Self, SvmError> {
        parameters.validate()?;
        if records.nrows() != targets.len() {
            return Err(SvmError::LengthMismatch {
                records: records.nrows(),
                targets: targets.len(),
            });
        }
        let classes = targets.iter().copied().sorted().dedup().collect_vec();
        if classes.len() < 2 {
            return Err(SvmError::TooFewClasses(classes.len()));
        }

        let mut machines = Vec::with_capacity(classes.len() * (classes.len() - 1) / 2);
        for (positive, negative) in (0..classes.len()).tuple_combinations() {
            let (positive_class, negative_class) = (classes[positive], classes[negative]);
            let rows = targets
                .iter()
                .enumerate()
                .filter(|(_, target)| **target == positive_class || **target == negative_class)
                .map(|(row, _)| row)
                .collect_vec();
            let pair_records = records.select(Axis(0), &rows);
            let pair_targets: Array1<bool> = rows
                .iter()
                .map(|row| targets[*row] == positive_class)
                .collect();
            let dataset = Dataset::new(pair_records, pair_targets);

            let svm_params = Svm::<f64, bool>::params().pos_neg_weights(parameters.cost, parameters.cost);
            let model = match (parameters.kernel, parameters.gamma) {
                (Kernel::Rbf, Some(gamma)) => svm_params.gaussian_kernel(1.0 / gamma).fit(&dataset)?,
                _ => svm_params.linear_kernel().fit(&dataset)?,
            };
            log::trace!(
                "Trained the machine {positive_class} vs {negative_class} on {} records.",
                rows.len()
            );
            machines.push(PairwiseMachine {
                positive,
                negative,
                model,
            });
        }

        log::debug!(
            "Trained {} pairwise machines for {} classes with {}.",
            machines.len(),
            classes.len(),
            parameters
        );

        Ok(Self {
            parameters: *parameters,
            classes,
            features: records.ncols(),
            machines,
        })
    }

    pub fn parameters(&self) -> &HyperParameters {
        &self.parameters
    }

    /// The classes seen while training, sorted ascending.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Predicts the class of every row in [records].
    pub fn predict(&self, records: ArrayView2<f64>) -> Result<Vec<usize>, SvmError> {
        if records.ncols() != self.features {
            return Err(SvmError::FeatureMismatch {
                expected: self.features,
                actual: records.ncols(),
            });
        }
        if records.nrows() == 0 {
            return Ok(Vec::new());
        }
        let records = records.to_owned();

        let mut votes: Array2<usize> = Array2::zeros((records.nrows(), self.classes.len()));
        for machine in &self.machines {
            let decisions: Array1<bool> = machine.model.predict(&records);
            for (row, decision) in decisions.iter().enumerate() {
                let winner = if *decision { machine.positive } else { machine.negative };
                votes[[row, winner]] += 1;
            }
        }

        Ok(votes
            .axis_iter(Axis(0))
            .map(|row| {
                let mut best = 0;
                for (idx, count) in row.iter().enumerate() {
                    if *count > row[best] {
                        best = idx;
                    }
                }
                self.classes[best]
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::OneVsOneSvm;
    use crate::config::HyperParameters;
    use crate::error::SvmError;
    use ndarray::{array, Array2};

    fn three_blobs() -> (Array2<f64>, Vec<usize>) {
        let records = array![
            [3.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [4.0, 1.0, 0.0],
            [0.0, 3.0, 0.0],
            [0.0, 2.0, 0.0],
            [1.0, 4.0, 0.0],
            [0.0, 0.0, 3.0],
            [0.0, 0.0, 2.0],
            [0.0, 1.0, 4.0],
        ];
        (records, vec![0, 0, 0, 1, 1, 1, 2, 2, 2])
    }

    #[test]
    fn separates_three_classes_linear() {
        let (records, targets) = three_blobs();
        let model = OneVsOneSvm::fit(&HyperParameters::linear(10.0), records.view(), &targets).unwrap();
        assert_eq!(&[0, 1, 2], model.classes());
        assert_eq!(targets, model.predict(records.view()).unwrap());
    }

    #[test]
    fn separates_three_classes_rbf() {
        let (records, targets) = three_blobs();
        let model = OneVsOneSvm::fit(&HyperParameters::rbf(10.0, 0.5), records.view(), &targets).unwrap();
        assert_eq!(targets, model.predict(records.view()).unwrap());
    }

    #[test]
    fn class_indices_need_not_be_contiguous() {
        let records = array![[1.0, 0.0], [2.0, 0.0], [0.0, 1.0], [0.0, 2.0]];
        let targets = vec![4, 4, 7, 7];
        let model = OneVsOneSvm::fit(&HyperParameters::linear(1.0), records.view(), &targets).unwrap();
        assert_eq!(targets, model.predict(records.view()).unwrap());
    }

    #[test]
    fn rejects_bad_input() {
        let records = array![[1.0], [2.0]];
        assert!(matches!(
            OneVsOneSvm::fit(&HyperParameters::linear(1.0), records.view(), &[0, 0]),
            Err(SvmError::TooFewClasses(1))
        ));
        assert!(matches!(
            OneVsOneSvm::fit(&HyperParameters::linear(1.0), records.view(), &[0]),
            Err(SvmError::LengthMismatch { records: 2, targets: 1 })
        ));
        let (records, targets) = three_blobs();
        let model = OneVsOneSvm::fit(&HyperParameters::linear(1.0), records.view(), &targets).unwrap();
        assert!(matches!(
            model.predict(array![[1.0, 2.0]].view()),
            Err(SvmError::FeatureMismatch { expected: 3, actual: 2 })
        ));
        assert!(model.predict(Array2::zeros((0, 3)).view()).unwrap().is_empty());
    }

    #[test]
    fn survives_serialisation() {
        let (records, targets) = three_blobs();
        let model = OneVsOneSvm::fit(&HyperParameters::linear(10.0), records.view(), &targets).unwrap();
        let bytes = bincode::serialize(&model).unwrap();
        let restored: OneVsOneSvm = bincode::deserialize(&bytes).unwrap();
        assert_eq!(
            model.predict(records.view()).unwrap(),
            restored.predict(records.view()).unwrap()
        );
    }
}
