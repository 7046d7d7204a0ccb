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
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    #[error("The split ratio has to be in (0, 1] but was {0}.")]
    InvalidRatio(f64),
    #[error("Can not split an empty dataset.")]
    Empty,
}

/// The disjoint train and test rows, both sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAssignment {
    train: Vec<usize>,
    test: Vec<usize>,
}

impl SplitAssignment {
    pub fn train(&self) -> &[usize] {
        &self.train
    }

    pub fn test(&self) -> &[usize] {
        &self.test
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stratified, seeded train/test splitter.
#[derive(Debug, Copy, Clone)]
pub struct Splitter {
    ratio: f64,
    seed: u64,
}

impl Splitter {
    pub fn new(ratio: f64, seed: u64) -> Result<Self, SplitError> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(SplitError::InvalidRatio(ratio));
        }
        Ok(Self { ratio, seed })
    }

    /// The number of training rows for a label with [members] rows.
    pub fn train_size(&self, members: usize) -> usize {
        let size = (members as f64 * self.ratio - 1e-9).ceil();
        (size.max(0.0) as usize).min(members)
    }

    /// Splits the rows per class. Classes are visited in ascending order and
    /// share a single random generator.
    pub fn split(&self, classes: &[usize]) -> Result<SplitAssignment, SplitError> {
        if classes.is_empty() {
            return Err(SplitError::Empty);
        }
        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (row, class) in classes.iter().enumerate() {
            members.entry(*class).or_default().push(row);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut train = Vec::new();
        let mut test = Vec::new();
        for (class, mut rows) in members {
            rows.shuffle(&mut rng);
            let size = self.train_size(rows.len());
            log::debug!(
                "Class {class}: {size} of {} rows are used for training.",
                rows.len()
            );
            train.extend_from_slice(&rows[..size]);
            test.extend_from_slice(&rows[size..]);
        }
        train.sort_unstable();
        test.sort_unstable();
        log::info!(
            "Split {} rows into {} training and {} test rows.",
            classes.len(),
            train.len(),
            test.len()
        );
        Ok(SplitAssignment { train, test })
    }
}

#[cfg(test)]
mod test {
    use super::{SplitError, Splitter};
    use itertools::Itertools;

    fn classes() -> Vec<usize> {
        let mut classes = Vec::new();
        for (class, count) in [(0, 17), (1, 5), (2, 1), (3, 40)] {
            classes.extend(std::iter::repeat(class).take(count));
        }
        classes
    }

    #[test]
    fn partition_is_complete() {
        let classes = classes();
        let split = Splitter::new(0.7, 1).unwrap().split(&classes).unwrap();
        assert_eq!(classes.len(), split.len());
        let all = split.train().iter().chain(split.test()).copied().sorted().collect_vec();
        assert_eq!((0..classes.len()).collect_vec(), all);
        assert!(split.train().windows(2).all(|pair| pair[0] < pair[1]));
        assert!(split.test().windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn every_class_is_stratified() {
        let classes = classes();
        let ratio = 0.7;
        let split = Splitter::new(ratio, 5).unwrap().split(&classes).unwrap();
        let total = classes.len() as f64;
        for class in 0..4 {
            let members = classes.iter().filter(|value| **value == class).count() as f64;
            let in_train = split.train().iter().filter(|row| classes[**row] == class).count() as f64;
            let in_test = split.test().iter().filter(|row| classes[**row] == class).count() as f64;
            assert!((in_train - members * ratio).abs() < 1.0);
            let train_share = in_train / split.train().len() as f64;
            let full_share = members / total;
            assert!((train_share - full_share).abs() <= 1.0 / split.train().len() as f64 + 1e-12);
            if !split.test().is_empty() {
                let test_share = in_test / split.test().len() as f64;
                assert!((test_share - full_share).abs() <= 1.0 / split.test().len() as f64 + 1e-12);
            }
        }
    }

    #[test]
    fn same_seed_same_split() {
        let classes = classes();
        let splitter = Splitter::new(0.7, 42).unwrap();
        assert_eq!(splitter.split(&classes).unwrap(), splitter.split(&classes).unwrap());
        let other = Splitter::new(0.7, 43).unwrap().split(&classes).unwrap();
        assert_eq!(splitter.split(&classes).unwrap().train().len(), other.train().len());
    }

    #[test]
    fn train_sizes() {
        let splitter = Splitter::new(0.7, 0).unwrap();
        assert_eq!(7, splitter.train_size(10));
        assert_eq!(4, splitter.train_size(5));
        assert_eq!(1, splitter.train_size(1));
        assert_eq!(0, splitter.train_size(0));
        assert_eq!(10, Splitter::new(1.0, 0).unwrap().train_size(10));
    }

    #[test]
    fn invalid_input() {
        assert_eq!(SplitError::InvalidRatio(0.0), Splitter::new(0.0, 1).unwrap_err());
        assert_eq!(SplitError::InvalidRatio(1.5), Splitter::new(1.5, 1).unwrap_err());
        assert_eq!(SplitError::Empty, Splitter::new(0.5, 1).unwrap().split(&[]).unwrap_err());
    }
}
