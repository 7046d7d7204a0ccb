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

use std::collections::BTreeMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::error::SvmError;

/// Stratified k-fold assignment.
///
/// The members of every class are shuffled and dealt round-robin into the folds.
/// The dealing counter continues across classes so that the folds stay balanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratifiedFolds {
    folds: usize,
    fold_of: Vec<usize>,
}

impl StratifiedFolds {
    pub fn new(targets: &[usize], folds: usize, seed: u64) -> Result<Self, SvmError> {
        if folds < 2 {
            return Err(SvmError::TooFewFolds(folds));
        }
        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (row, target) in targets.iter().enumerate() {
            members.entry(*target).or_default().push(row);
        }
        if let Some((class, rows)) = members.iter().find(|(_, rows)| rows.len() < folds) {
            return Err(SvmError::DegenerateFolds {
                class: *class,
                members: rows.len(),
                folds,
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut fold_of = vec![0; targets.len()];
        let mut counter = 0usize;
        for rows in members.values_mut() {
            rows.shuffle(&mut rng);
            for row in rows.iter() {
                fold_of[*row] = counter % folds;
                counter += 1;
            }
        }
        Ok(Self { folds, fold_of })
    }

    pub fn len(&self) -> usize {
        self.folds
    }

    pub fn is_empty(&self) -> bool {
        self.folds == 0
    }

    /// The fold of every row
    pub fn assignment(&self) -> &[usize] {
        &self.fold_of
    }

    /// Returns the (training, validation) rows for [fold], both ascending.
    pub fn split(&self, fold: usize) -> (Vec<usize>, Vec<usize>) {
        let mut train = Vec::new();
        let mut validation = Vec::new();
        for (row, assigned) in self.fold_of.iter().enumerate() {
            if *assigned == fold {
                validation.push(row);
            } else {
                train.push(row);
            }
        }
        (train, validation)
    }

    pub fn splits(&self) -> impl Iterator<Item = (Vec<usize>, Vec<usize>)> + '_ {
        (0..self.folds).map(|fold| self.split(fold))
    }
}

#[cfg(test)]
mod test {
    use super::StratifiedFolds;
    use crate::error::SvmError;

    fn targets() -> Vec<usize> {
        let mut targets = vec![0; 12];
        targets.extend(vec![1; 7]);
        targets.extend(vec![2; 5]);
        targets
    }

    #[test]
    fn every_fold_holds_every_class() {
        let targets = targets();
        let folds = StratifiedFolds::new(&targets, 5, 42).unwrap();
        for (train, validation) in folds.splits() {
            assert_eq!(targets.len(), train.len() + validation.len());
            for class in 0..3 {
                assert!(validation.iter().any(|row| targets[*row] == class));
                assert!(train.iter().any(|row| targets[*row] == class));
            }
        }
    }

    #[test]
    fn fold_sizes_are_balanced() {
        let targets = targets();
        let folds = StratifiedFolds::new(&targets, 5, 7).unwrap();
        let sizes: Vec<usize> = folds.splits().map(|(_, validation)| validation.len()).collect();
        let min = *sizes.iter().min().unwrap();
        let max = *sizes.iter().max().unwrap();
        assert!(max - min <= 1, "{sizes:?}");
    }

    #[test]
    fn seeded_assignment_is_reproducible() {
        let targets = targets();
        assert_eq!(
            StratifiedFolds::new(&targets, 4, 3).unwrap(),
            StratifiedFolds::new(&targets, 4, 3).unwrap()
        );
    }

    #[test]
    fn rare_class_is_a_configuration_error() {
        let targets = targets();
        assert!(matches!(
            StratifiedFolds::new(&targets, 6, 1),
            Err(SvmError::DegenerateFolds { class: 2, members: 5, folds: 6 })
        ));
        assert!(matches!(
            StratifiedFolds::new(&targets, 1, 1),
            Err(SvmError::TooFewFolds(1))
        ));
    }
}
