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
use text_processing::corpus::CorpusDocumentStatistics;
use crate::pipeline::{Inspection, RunOutcome};

/// The printable summary of a run
pub struct RunReport<'a>(pub &'a RunOutcome);

impl Display for RunReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let outcome = self.0;
        writeln!(
            f,
            "Documents: {} ({} unlabelled rows skipped)",
            outcome.documents, outcome.skipped
        )?;
        writeln!(f, "Labels: {}", outcome.labels)?;
        writeln!(f, "Vocabulary: {} terms", outcome.vocabulary_size)?;
        writeln!(
            f,
            "Split: {} training / {} test documents",
            outcome.split.train().len(),
            outcome.split.test().len()
        )?;
        writeln!(f)?;
        write!(f, "{}", outcome.grid)?;
        writeln!(f, "Selected: {}", outcome.model.parameters())?;
        writeln!(f)?;
        write!(f, "{}", outcome.confusion)?;
        writeln!(f)?;
        writeln!(f, "{:<20} {:>9} {:>9}", "label", "precision", "recall")?;
        for (idx, label) in outcome.labels.iter().enumerate() {
            writeln!(
                f,
                "{:<20} {:>9} {:>9}",
                label,
                format_score(outcome.confusion.precision(idx)),
                format_score(outcome.confusion.recall(idx))
            )?;
        }
        Ok(())
    }
}

fn format_score(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.4}"),
        None => "-".to_string(),
    }
}

/// The printable corpus statistics and the top terms per label.
pub struct InspectionReport<'a> {
    pub inspection: &'a Inspection,
    pub top: usize,
}

impl Display for InspectionReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inspection = self.inspection;
        let statistics = inspection.table.statistics();
        writeln!(
            f,
            "Documents: {} ({} unlabelled rows skipped)",
            statistics.document_count(),
            inspection.data.skipped
        )?;
        writeln!(
            f,
            "Tokens: {}, distinct stems: {}, kept after pruning: {}",
            statistics.word_count(),
            statistics.unique_word_count(),
            inspection.table.vocabulary().len()
        )?;
        let empty_rows = inspection
            .table
            .features()
            .rows()
            .into_iter()
            .filter(|row| row.iter().all(|value| *value == 0.0))
            .count();
        writeln!(f, "Documents without any vocabulary term: {empty_rows}")?;
        writeln!(f)?;

        let top = inspection.table.top_terms_by_label(self.top);
        for (class, label) in inspection.data.labels.iter().enumerate() {
            let members = inspection.table.labels().iter().filter(|value| **value == class).count();
            write!(f, "{label} ({members}):")?;
            match top.get(&class) {
                Some(terms) if !terms.is_empty() => {
                    for (term, count) in terms {
                        write!(f, " {term}={count}")?;
                    }
                    writeln!(f)?;
                }
                _ => writeln!(f, " -")?,
            }
        }
        Ok(())
    }
}
