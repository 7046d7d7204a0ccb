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
use std::io::Write;
use itertools::Itertools;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use crate::error::SvmError;

/// A confusion matrix over a fixed set of labels.
///
/// Rows are the actual labels, columns the predicted ones. Labels without
/// any observation are kept as zero rows and columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Array2<u64>,
}

impl ConfusionMatrix {
    /// Counts the pairs of [actual] and [predicted] label indices.
    pub fn new<S: ToString>(
        labels: &[S],
        actual: &[usize],
        predicted: &[usize],
    ) -> Result<Self, SvmError> {
        if actual.len() != predicted.len() {
            return Err(SvmError::LengthMismatch {
                records: predicted.len(),
                targets: actual.len(),
            });
        }
        let size = labels.len();
        let mut counts = Array2::zeros((size, size));
        for (actual, predicted) in actual.iter().zip_eq(predicted) {
            if *actual >= size || *predicted >= size {
                return Err(SvmError::LabelOutOfRange {
                    actual: *actual,
                    predicted: *predicted,
                    labels: size,
                });
            }
            counts[[*actual, *predicted]] += 1;
        }
        Ok(Self {
            labels: labels.iter().map(ToString::to_string).collect(),
            counts,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn counts(&self) -> &Array2<u64> {
        &self.counts
    }

    pub fn count(&self, actual: usize, predicted: usize) -> u64 {
        self.counts[[actual, predicted]]
    }

    /// The number of documents with the actual label
    pub fn row_sum(&self, actual: usize) -> u64 {
        self.counts.row(actual).sum()
    }

    /// The number of documents predicted as the label
    pub fn column_sum(&self, predicted: usize) -> u64 {
        self.counts.column(predicted).sum()
    }

    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    pub fn trace(&self) -> u64 {
        self.counts.diag().sum()
    }

    /// The share of correct predictions, `None` without any prediction.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.trace() as f64 / total as f64),
        }
    }

    pub fn precision(&self, label: usize) -> Option<f64> {
        match self.column_sum(label) {
            0 => None,
            predicted => Some(self.count(label, label) as f64 / predicted as f64),
        }
    }

    pub fn recall(&self, label: usize) -> Option<f64> {
        match self.row_sum(label) {
            0 => None,
            actual => Some(self.count(label, label) as f64 / actual as f64),
        }
    }

    /// Writes the matrix as csv with a header of predicted labels
    /// and the actual label in the first column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(
            std::iter::once("actual").chain(self.labels.iter().map(String::as_str)),
        )?;
        for (label, row) in self.labels.iter().zip_eq(self.counts.axis_iter(Axis(0))) {
            writer.write_record(
                std::iter::once(label.clone()).chain(row.iter().map(u64::to_string)),
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self
            .labels
            .iter()
            .map(|label| label.chars().count())
            .chain(std::iter::once(self.total().to_string().len()))
            .chain(std::iter::once("actual \\ predicted".len()))
            .max()
            .unwrap_or_default();

        write!(f, "{:>width$}", "actual \\ predicted")?;
        for label in &self.labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip_eq(self.counts.axis_iter(Axis(0))) {
            write!(f, "{label:>width$}")?;
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f)?;
        }
        match self.accuracy() {
            Some(accuracy) => writeln!(f, "Accuracy: {:.4}", accuracy),
            None => writeln!(f, "Accuracy: undefined"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ConfusionMatrix;
    use crate::error::SvmError;
    use float_cmp::approx_eq;

    fn matrix() -> ConfusionMatrix {
        ConfusionMatrix::new(
            &["coffee", "java", "jobs"],
            &[0, 0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0, 0],
        )
        .unwrap()
    }

    #[test]
    fn sums_match_the_input() {
        let matrix = matrix();
        assert_eq!(6, matrix.total());
        assert_eq!(3, matrix.row_sum(0));
        assert_eq!(3, matrix.row_sum(1));
        assert_eq!(0, matrix.row_sum(2));
        assert_eq!(0, matrix.column_sum(2));
        assert_eq!(
            matrix.total(),
            (0..3).map(|label| matrix.row_sum(label)).sum::<u64>()
        );
        assert_eq!(4, matrix.trace());
    }

    #[test]
    fn scores() {
        let matrix = matrix();
        assert!(approx_eq!(f64, 4.0 / 6.0, matrix.accuracy().unwrap()));
        assert!(approx_eq!(f64, 2.0 / 3.0, matrix.precision(0).unwrap()));
        assert!(approx_eq!(f64, 2.0 / 3.0, matrix.recall(1).unwrap()));
        assert_eq!(None, matrix.precision(2));
        assert_eq!(None, matrix.recall(2));
    }

    #[test]
    fn empty_matrix_has_no_accuracy() {
        let matrix = ConfusionMatrix::new(&["a", "b"], &[], &[]).unwrap();
        assert_eq!(None, matrix.accuracy());
        assert!(matrix.to_string().contains("undefined"));
    }

    #[test]
    fn rejects_bad_indices() {
        assert!(matches!(
            ConfusionMatrix::new(&["a"], &[0], &[1]),
            Err(SvmError::LabelOutOfRange { actual: 0, predicted: 1, labels: 1 })
        ));
        assert!(matches!(
            ConfusionMatrix::new(&["a", "b"], &[2], &[0]),
            Err(SvmError::LabelOutOfRange { actual: 2, predicted: 0, labels: 2 })
        ));
        assert!(matches!(
            ConfusionMatrix::new(&["a"], &[0, 0], &[0]),
            Err(SvmError::LengthMismatch { records: 1, targets: 2 })
        ));
    }

    #[test]
    fn csv_export() {
        let mut out = Vec::new();
        matrix().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            "actual,coffee,java,jobs\ncoffee,2,1,0\njava,1,2,0\njobs,0,0,0\n",
            text
        );
    }

    #[test]
    fn display_has_every_label() {
        let rendered = matrix().to_string();
        for label in ["coffee", "java", "jobs"] {
            assert!(rendered.contains(label));
        }
        assert!(rendered.contains("Accuracy: 0.6667"));
    }
}
