use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use tracing::{error, info};
use wiregen::{FailurePolicy, Generator};

#[derive(Args)]
pub struct GenerateArgs {
    /// Module name written into every generated file
    #[arg(short, long)]
    module: String,

    /// Directory of schema files (repeatable)
    #[arg(short, long = "in", value_name = "DIR", required = true)]
    input: Vec<PathBuf>,

    /// Output directory (created if missing)
    #[arg(short, long = "out", value_name = "DIR")]
    output: PathBuf,

    /// Write the schemas that compile and report the rest
    #[arg(long)]
    keep_going: bool,

    /// Crate path generated code imports runtime items from
    #[arg(long, value_name = "PATH")]
    runtime_crate: Option<String>,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let mut builder = Generator::builder(&self.module);
        if let Some(runtime_crate) = self.runtime_crate {
            builder = builder.with_runtime_crate(runtime_crate);
        }
        if self.keep_going {
            builder = builder.with_failure_policy(FailurePolicy::KeepGoing);
        }

        let report = builder.build().generate(&self.input, &self.output)?;
        info!(
            written = report.written.len(),
            output = %self.output.display(),
            "generation finished"
        );

        if !report.is_clean() {
            for failure in &report.failures {
                error!("{}", failure.error);
            }
            bail!("{} schema(s) failed to compile", report.failures.len());
        }
        Ok(())
    }
}
