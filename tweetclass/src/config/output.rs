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
use serde::{Deserialize, Serialize};

/// The artifacts written by a run
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename(serialize = "Output"))]
pub struct OutputConfig {
    /// Stores the trained model if set
    #[serde(default)]
    pub model: Option<Utf8PathBuf>,

    /// Exports the confusion matrix as csv if set
    #[serde(default)]
    pub confusion_csv: Option<Utf8PathBuf>,

    /// The folder of the log file
    #[serde(default = "_default_log_dir")]
    pub log_dir: Utf8PathBuf,
}

fn _default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("logs")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            model: None,
            confusion_csv: None,
            log_dir: _default_log_dir(),
        }
    }
}

impl OutputConfig {
    pub fn log_file(&self) -> Utf8PathBuf {
        self.log_dir.join("tweetclass.log")
    }

    pub fn log_dir(&self) -> &Utf8Path {
        &self.log_dir
    }
}
