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

pub mod classifier;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod folds;
pub mod grid_search;

pub use classifier::OneVsOneSvm;
pub use config::{GridConfig, HyperParameters, Kernel};
pub use error::{PersistenceError, SvmError};
pub use evaluation::ConfusionMatrix;
pub use grid_search::{GridSearch, GridSearchReport};

use camino::Utf8Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

/// Stores [model] as bincode at [path], replacing an existing file.
pub fn save_model<T: Serialize>(model: &T, path: impl AsRef<Utf8Path>) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut outp = BufWriter::new(
        File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?,
    );
    bincode::serialize_into(&mut outp, model)?;
    outp.flush()?;
    log::info!("Stored the model at {path}.");
    Ok(())
}

/// Restores a model written by [save_model].
pub fn load_model<T: DeserializeOwned>(path: impl AsRef<Utf8Path>) -> Result<T, PersistenceError> {
    let path = path.as_ref();
    let mut inp = BufReader::new(File::options().read(true).open(path)?);
    let model = bincode::deserialize_from(&mut inp)?;
    log::debug!("Loaded the model from {path}.");
    Ok(model)
}
