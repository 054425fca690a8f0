use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use wiregen::{
    codegen::{CompileOptions, compile_message},
    json::load_message_str,
};

#[derive(Args)]
pub struct PlanArgs {
    /// Path to the schema file
    input: PathBuf,

    /// Print the generated Rust source instead of the plan listing
    #[arg(long)]
    source: bool,

    /// Module name used in the source header
    #[arg(short, long, default_value = "messages")]
    module: String,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("problem reading '{}'", self.input.display()))?;
        let message = load_message_str(&text)
            .with_context(|| format!("problem loading '{}'", self.input.display()))?;
        let unit = compile_message(&message, &CompileOptions::new(self.module))
            .with_context(|| format!("problem compiling '{}'", self.input.display()))?;

        let out = if self.source {
            unit.source
        } else {
            unit.plan.to_string()
        };

        match self.output {
            Some(path) => fs::write(path, out)?,
            None => print!("{out}"),
        }
        Ok(())
    }
}
