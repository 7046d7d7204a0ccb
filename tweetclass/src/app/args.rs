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

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;

use crate::config::Configs;
use crate::error::ConfigurationError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Classifies short messages about java into human labelled categories.
pub struct TweetclassArgs {
    /// The mode of tweetclass
    #[command(subcommand)]
    pub mode: RunMode,
}

#[derive(Subcommand, Debug)]
pub enum RunMode {
    /// Loads, normalizes, splits, trains with a cross validated grid search and evaluates.
    Run {
        /// The folder containing the configs.
        #[arg(short, long)]
        config: Option<Utf8PathBuf>,
        /// The csv file with the labelled messages, overrides the config.
        #[arg(short, long)]
        input: Option<Utf8PathBuf>,
        /// Seeds the split and the folds, overrides the config.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Overrides the log level from the config.
        #[arg(long)]
        log_level: Option<log::LevelFilter>,
        /// Log to file
        #[arg(long)]
        log_to_file: bool,
    },
    /// Prints the corpus statistics and the most frequent terms per label.
    Inspect {
        /// The folder containing the configs.
        #[arg(short, long)]
        config: Option<Utf8PathBuf>,
        /// The csv file with the labelled messages, overrides the config.
        #[arg(short, long)]
        input: Option<Utf8PathBuf>,
        /// The number of terms listed per label
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },
    /// Classifies the given texts with a stored model.
    Predict {
        /// The model written by a previous run
        #[arg(short, long)]
        model: Utf8PathBuf,
        /// The texts to classify
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Writes the default config.
    Init {
        /// The target folder
        #[arg(short, long, default_value = ".")]
        dir: Utf8PathBuf,
    },
}

/// What to execute after consuming the args.
#[derive(Debug)]
pub enum Instruction {
    Run(Configs),
    Inspect { configs: Configs, top: usize },
    Predict { configs: Configs, model: Utf8PathBuf, texts: Vec<String> },
    Nothing,
}

fn load_configs(folder: Option<Utf8PathBuf>) -> Result<Configs, ConfigurationError> {
    Ok(match folder {
        None => Configs::discover_or_default()?,
        Some(path) => Configs::load_from(path)?,
    })
}

/// Consumes the args and returns everything necessary to execute tweetclass
pub fn prepare_instruction(args: TweetclassArgs) -> Result<Instruction, ConfigurationError> {
    match args.mode {
        RunMode::Run {
            config,
            input,
            seed,
            log_level,
            log_to_file,
        } => {
            let mut configs = load_configs(config)?;
            if input.is_some() {
                configs.data.input = input;
            }
            if let Some(seed) = seed {
                configs.split.seed = seed;
            }
            if let Some(log_level) = log_level {
                configs.system.log_level = log_level;
            }
            if log_to_file {
                configs.system.log_to_file = true;
            }
            Ok(Instruction::Run(configs))
        }
        RunMode::Inspect { config, input, top } => {
            let mut configs = load_configs(config)?;
            if input.is_some() {
                configs.data.input = input;
            }
            Ok(Instruction::Inspect { configs, top })
        }
        RunMode::Predict { model, texts } => Ok(Instruction::Predict {
            configs: load_configs(None)?,
            model,
            texts,
        }),
        RunMode::Init { dir } => {
            let path = write_default_config(&dir)?;
            println!("Created the default config at {path}.");
            Ok(Instruction::Nothing)
        }
    }
}

/// Writes the default configs as `tweetclass.json` to [dir].
pub fn write_default_config(dir: &Utf8PathBuf) -> Result<Utf8PathBuf, ConfigurationError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("tweetclass.json");
    if path.exists() {
        return Err(ConfigurationError::AlreadyExists(path));
    }
    let file = File::options().create_new(true).write(true).open(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &Configs::default())?;
    Ok(path)
}
