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

mod args;
mod exitcode_conversions;
mod logging;

pub use args::{prepare_instruction, write_default_config, Instruction, RunMode, TweetclassArgs};
pub use logging::{configure_logging, LoggingError};

use crate::config::Configs;
use crate::error::PipelineError;
use crate::model::TrainedModel;
use crate::pipeline::Pipeline;
use crate::report::{InspectionReport, RunReport};
use std::process::ExitCode;

pub fn exec_args(args: TweetclassArgs) -> ExitCode {
    match prepare_instruction(args) {
        Ok(Instruction::Run(configs)) => {
            init_logging(&configs);
            finish(run(configs))
        }
        Ok(Instruction::Inspect { configs, top }) => {
            init_logging(&configs);
            finish(inspect(configs, top))
        }
        Ok(Instruction::Predict {
            configs,
            model,
            texts,
        }) => {
            init_logging(&configs);
            finish(
                TrainedModel::load(&model)
                    .map_err(PipelineError::from)
                    .and_then(|model| {
                        for (text, label) in texts.iter().zip(model.predict(&texts)?) {
                            println!("{label}\t{text}");
                        }
                        Ok(())
                    }),
            )
        }
        Ok(Instruction::Nothing) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to load the config: {err}");
            err.into()
        }
    }
}

fn init_logging(configs: &Configs) {
    if let Err(err) = configure_logging(configs) {
        eprintln!("Failed to configure the logging: {err}");
    }
}

fn finish(result: Result<(), PipelineError>) -> ExitCode {
    match result {
        Ok(()) => {
            log::info!("Exit application.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed with: {err}");
            eprintln!("Error: {err}");
            err.into()
        }
    }
}

fn run(configs: Configs) -> Result<(), PipelineError> {
    let outcome = Pipeline::new(configs).run()?;
    println!("{}", RunReport(&outcome));
    Ok(())
}

fn inspect(configs: Configs, top: usize) -> Result<(), PipelineError> {
    let inspection = Pipeline::new(configs).inspect()?;
    println!(
        "{}",
        InspectionReport {
            inspection: &inspection,
            top
        }
    );
    Ok(())
}
