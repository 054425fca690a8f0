//! Schema-directory driver: load, compile in parallel, write in order.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, info, warn};
use wiregen_codegen::{CompileOptions, CompiledUnit, DEFAULT_RUNTIME_CRATE, compile_message};
use wiregen_json::load_message_str;

use crate::error::GeneratorError;

/// What to do when one schema of a run fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure (in input order); write nothing.
    #[default]
    FailFast,
    /// Report failed schemas and write every other unit.
    KeepGoing,
}

/// A schema that was skipped under [`FailurePolicy::KeepGoing`].
#[derive(Debug)]
pub struct UnitFailure {
    pub path: PathBuf,
    pub error: GeneratorError,
}

/// Outcome of [`Generator::generate`].
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Output files, in input order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
}

impl GenerateReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compiles every schema file found in a set of input directories.
pub struct Generator {
    options: CompileOptions,
    policy: FailurePolicy,
    extension: Option<String>,
}

/// Builder for configuring [`Generator`].
pub struct GeneratorBuilder {
    module_name: String,
    runtime_crate: String,
    policy: FailurePolicy,
    extension: Option<String>,
}

impl Generator {
    /// Create a builder; `module_name` is written into every unit header.
    pub fn builder(module_name: impl Into<String>) -> GeneratorBuilder {
        GeneratorBuilder {
            module_name: module_name.into(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            policy: FailurePolicy::default(),
            extension: Some("json".to_string()),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// List the schema files of `input_dirs`: regular files only, filtered by
    /// extension, sorted by name within each directory.
    pub fn collect_inputs<P: AsRef<Path>>(
        &self,
        input_dirs: &[P],
    ) -> Result<Vec<PathBuf>, GeneratorError> {
        let mut inputs = Vec::new();
        for dir in input_dirs {
            let dir = dir.as_ref();
            let entries = fs::read_dir(dir).map_err(|e| GeneratorError::io(dir, e))?;

            let mut files = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| GeneratorError::io(dir, e))?;
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if !self.matches_extension(&path) {
                    debug!(path = %path.display(), "skipping non-schema file");
                    continue;
                }
                files.push(path);
            }
            files.sort();
            inputs.extend(files);
        }
        Ok(inputs)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        match &self.extension {
            Some(wanted) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted)),
            None => true,
        }
    }

    /// Load and compile one schema file.
    pub fn compile_file(&self, path: &Path) -> Result<CompiledUnit, GeneratorError> {
        let text = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        let message = load_message_str(&text).map_err(|source| GeneratorError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let unit = compile_message(&message, &self.options).map_err(|source| {
            GeneratorError::Compile {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(
            path = %path.display(),
            message = %unit.message_name,
            records = unit.plan.records.len(),
            "compiled schema"
        );
        Ok(unit)
    }

    /// Compile `paths` in parallel. Results keep the order of `paths`.
    pub fn compile_files(&self, paths: &[PathBuf]) -> Vec<Result<CompiledUnit, GeneratorError>> {
        paths.par_iter().map(|path| self.compile_file(path)).collect()
    }

    /// Compile every schema of `input_dirs` and write one `.rs` file per
    /// message into `output_dir`, creating it if needed.
    pub fn generate<P: AsRef<Path>>(
        &self,
        input_dirs: &[P],
        output_dir: &Path,
    ) -> Result<GenerateReport, GeneratorError> {
        let inputs = self.collect_inputs(input_dirs)?;
        let results = self.compile_files(&inputs);

        let mut report = GenerateReport::default();
        let mut units = Vec::with_capacity(inputs.len());
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();

        for (path, result) in inputs.into_iter().zip(results) {
            let checked = result.and_then(|unit| match claimed.get(&unit.file_name) {
                Some(first) => Err(GeneratorError::DuplicateOutput {
                    file_name: unit.file_name.clone(),
                    first: first.clone(),
                    second: path.clone(),
                }),
                None => {
                    claimed.insert(unit.file_name.clone(), path.clone());
                    Ok(unit)
                }
            });

            match (checked, self.policy) {
                (Ok(unit), _) => units.push(unit),
                (Err(error), FailurePolicy::FailFast) => return Err(error),
                (Err(error), FailurePolicy::KeepGoing) => {
                    warn!(path = %path.display(), %error, "skipping schema");
                    report.failures.push(UnitFailure { path, error });
                }
            }
        }

        fs::create_dir_all(output_dir).map_err(|e| GeneratorError::io(output_dir, e))?;
        for unit in units {
            let target = output_dir.join(&unit.file_name);
            fs::write(&target, &unit.source).map_err(|e| GeneratorError::io(&target, e))?;
            info!(message = %unit.message_name, path = %target.display(), "wrote unit");
            report.written.push(target);
        }

        Ok(report)
    }
}

impl GeneratorBuilder {
    /// Crate path generated code imports runtime items from
    /// (default: `wiregen_runtime`).
    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Only pick up files with this extension (default: `json`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Treat every regular file as a schema.
    pub fn with_any_extension(mut self) -> Self {
        self.extension = None;
        self
    }

    pub fn build(self) -> Generator {
        Generator {
            options: CompileOptions::new(self.module_name).with_runtime_crate(self.runtime_crate),
            policy: self.policy,
            extension: self.extension,
        }
    }
}
