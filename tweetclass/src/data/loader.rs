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
use std::io;
use std::io::BufReader;
use camino::{Utf8Path, Utf8PathBuf};
use csv::{ByteRecord, ReaderBuilder};
use thiserror::Error;
use crate::config::DataConfig;
use crate::data::labels::LabelSet;

/// A single labelled message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The 1-based data row in the source file, the header not counted.
    pub row: usize,
    pub text: String,
    pub label: String,
    /// The position of [label] in the [LabelSet]
    pub class: usize,
}

/// The labelled documents of an input file.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub documents: Vec<Document>,
    pub labels: LabelSet,
    /// Rows without a label
    pub skipped: usize,
}

impl LoadedData {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|value| value.text.as_str())
    }

    pub fn classes(&self) -> Vec<usize> {
        self.documents.iter().map(|value| value.class).collect()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: Utf8PathBuf,
        source: io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("The header has no column named {0:?}.")]
    MissingColumn(String),
    #[error("Row {row} has no value for the column {column:?}.")]
    MissingField { row: usize, column: String },
    #[error("Row {row} contains invalid UTF-8 in the column {column:?}.")]
    InvalidUtf8 { row: usize, column: String },
    #[error("Row {row} has the label {label:?}, which is not one of the configured classes.")]
    UnknownLabel { row: usize, label: String },
    #[error("The input does not contain any labelled row.")]
    NoDocuments,
}

/// Reads labelled messages from csv.
#[derive(Debug, Clone)]
pub struct DataLoader {
    text_column: String,
    class_column: String,
    classes: Option<LabelSet>,
}

impl DataLoader {
    pub fn new(text_column: impl Into<String>, class_column: impl Into<String>, classes: Option<LabelSet>) -> Self {
        Self {
            text_column: text_column.into(),
            class_column: class_column.into(),
            classes,
        }
    }

    pub fn from_config(cfg: &DataConfig) -> Self {
        Self::new(
            cfg.text_column.as_str(),
            cfg.class_column.as_str(),
            cfg.classes.as_ref().map(|value| LabelSet::from_labels(value.iter().cloned())),
        )
    }

    pub fn load_path(&self, path: impl AsRef<Utf8Path>) -> Result<LoadedData, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading documents from {path}.");
        self.load(BufReader::new(file))
    }

    /// Reads every row of [reader]. Fails on the first malformed row.
    pub fn load<R: io::Read>(&self, reader: R) -> Result<LoadedData, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let header = reader.headers()?.clone();
        let text_idx = Self::column_position(&header, &self.text_column)?;
        let class_idx = Self::column_position(&header, &self.class_column)?;

        let mut raw = Vec::new();
        let mut skipped = 0usize;
        let mut record = ByteRecord::new();
        let mut row = 0usize;
        while reader.read_byte_record(&mut record)? {
            row += 1;
            let text = Self::field(&record, text_idx, row, &self.text_column)?.ok_or_else(|| {
                LoadError::MissingField {
                    row,
                    column: self.text_column.clone(),
                }
            })?;
            let label = match Self::field(&record, class_idx, row, &self.class_column)? {
                Some(value) if !value.trim().is_empty() => value.trim(),
                _ => {
                    log::debug!("Skipping the unlabelled row {row}.");
                    skipped += 1;
                    continue;
                }
            };
            if let Some(classes) = &self.classes {
                if !classes.contains(label) {
                    return Err(LoadError::UnknownLabel {
                        row,
                        label: label.to_string(),
                    });
                }
            }
            raw.push((row, text.to_string(), label.to_string()));
        }

        if raw.is_empty() {
            return Err(LoadError::NoDocuments);
        }

        let labels = match &self.classes {
            Some(classes) => classes.clone(),
            None => LabelSet::from_labels(raw.iter().map(|(_, _, label)| label.as_str())),
        };
        let documents = raw
            .into_iter()
            .map(|(row, text, label)| {
                let class = labels
                    .index_of(&label)
                    .ok_or_else(|| LoadError::UnknownLabel {
                        row,
                        label: label.clone(),
                    })?;
                Ok(Document {
                    row,
                    text,
                    label,
                    class,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        log::info!(
            "Loaded {} documents with the labels {labels}, skipped {skipped} unlabelled rows.",
            documents.len()
        );
        Ok(LoadedData {
            documents,
            labels,
            skipped,
        })
    }

    fn column_position(header: &csv::StringRecord, column: &str) -> Result<usize, LoadError> {
        header
            .iter()
            .position(|value| value.trim() == column)
            .ok_or_else(|| LoadError::MissingColumn(column.to_string()))
    }

    fn field<'a>(
        record: &'a ByteRecord,
        idx: usize,
        row: usize,
        column: &str,
    ) -> Result<Option<&'a str>, LoadError> {
        match record.get(idx) {
            None => Ok(None),
            Some(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|_| LoadError::InvalidUtf8 {
                    row,
                    column: column.to_string(),
                }),
        }
    }
}
