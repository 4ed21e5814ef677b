//! Language descriptors and the extension registry

pub mod c;
pub mod cpp;
pub mod go;
pub mod java;
pub mod python;
pub mod rust;
pub mod zig;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::template::CommandTemplate;
use crate::{
    constants::file_extensions,
    error::{AppError, AppResult},
};

/// How a source file becomes something runnable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildModel {
    /// Interpreter runs the source directly
    #[serde(rename = "scripted")]
    Scripted,
    /// Compiler emits a single executable at `{exec_path}`
    #[serde(rename = "compiled")]
    Compiled,
    /// Compiler emits artifacts into the `{exec_path}` directory; a fixed
    /// launcher runs them from inside that directory
    #[serde(rename = "fixed_exec")]
    FixedExecutable,
}

impl std::fmt::Display for BuildModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildModel::Scripted => write!(f, "scripted"),
            BuildModel::Compiled => write!(f, "compiled"),
            BuildModel::FixedExecutable => write!(f, "fixed_exec"),
        }
    }
}

/// Build model plus the command templates it needs.
///
/// Compiled variants carry their compile template, so a scripted language
/// can never have one and a compiled language can never lack one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageDescriptor {
    Scripted {
        run: CommandTemplate,
    },
    Compiled {
        compile: CommandTemplate,
        run: CommandTemplate,
    },
    FixedExecutable {
        compile: CommandTemplate,
        run: CommandTemplate,
    },
}

impl LanguageDescriptor {
    pub fn build_model(&self) -> BuildModel {
        match self {
            Self::Scripted { .. } => BuildModel::Scripted,
            Self::Compiled { .. } => BuildModel::Compiled,
            Self::FixedExecutable { .. } => BuildModel::FixedExecutable,
        }
    }

    pub fn compile_template(&self) -> Option<&CommandTemplate> {
        match self {
            Self::Scripted { .. } => None,
            Self::Compiled { compile, .. } | Self::FixedExecutable { compile, .. } => Some(compile),
        }
    }

    pub fn run_template(&self) -> &CommandTemplate {
        match self {
            Self::Scripted { run }
            | Self::Compiled { run, .. }
            | Self::FixedExecutable { run, .. } => run,
        }
    }

    /// Build a descriptor from its config-file form.
    ///
    /// `extension` is only used to make the error message useful.
    pub fn from_config(extension: &str, config: LanguageConfig) -> AppResult<Self> {
        let LanguageConfig {
            language_type,
            compile_command,
            run_command,
        } = config;

        if run_command.is_empty() {
            return Err(AppError::Configuration(format!(
                "language {extension:?}: run_command must not be empty"
            )));
        }
        let run = CommandTemplate::new(run_command);

        let compile = move || {
            if compile_command.is_empty() {
                Err(AppError::Configuration(format!(
                    "language {extension:?}: {language_type} languages need a compile_command"
                )))
            } else {
                Ok(CommandTemplate::new(compile_command))
            }
        };

        match language_type {
            BuildModel::Scripted => Ok(Self::Scripted { run }),
            BuildModel::Compiled => Ok(Self::Compiled {
                compile: compile()?,
                run,
            }),
            BuildModel::FixedExecutable => Ok(Self::FixedExecutable {
                compile: compile()?,
                run,
            }),
        }
    }
}

/// Language entry as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub language_type: BuildModel,
    #[serde(default)]
    pub compile_command: Vec<String>,
    pub run_command: Vec<String>,
}

/// Extension to descriptor mapping; user overrides shadow built-ins
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    builtin: HashMap<String, LanguageDescriptor>,
    overrides: HashMap<String, LanguageDescriptor>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageRegistry {
    /// Registry holding only the built-in languages
    pub fn builtin() -> Self {
        let builtin = [
            (file_extensions::C, c::descriptor()),
            (file_extensions::CC, cpp::descriptor()),
            (file_extensions::CPP, cpp::descriptor()),
            (file_extensions::RUST, rust::descriptor()),
            (file_extensions::GO, go::descriptor()),
            (file_extensions::ZIG, zig::descriptor()),
            (file_extensions::PYTHON, python::descriptor()),
            (file_extensions::JAVA, java::descriptor()),
        ]
        .into_iter()
        .map(|(ext, descriptor)| (ext.to_string(), descriptor))
        .collect();

        Self {
            builtin,
            overrides: HashMap::new(),
        }
    }

    /// Registry with no built-ins at all, for tests with synthetic languages
    pub fn empty() -> Self {
        Self {
            builtin: HashMap::new(),
            overrides: HashMap::new(),
        }
    }

    /// Layer user overrides on top of this registry
    pub fn with_overrides(mut self, overrides: HashMap<String, LanguageDescriptor>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Add or replace a single override
    pub fn insert_override(
        &mut self,
        extension: impl Into<String>,
        descriptor: LanguageDescriptor,
    ) {
        self.overrides.insert(extension.into(), descriptor);
    }

    /// Look up the descriptor for an extension (no leading dot)
    pub fn resolve(&self, extension: &str) -> AppResult<&LanguageDescriptor> {
        self.overrides
            .get(extension)
            .or_else(|| self.builtin.get(extension))
            .ok_or_else(|| AppError::UnsupportedLanguage(extension.to_string()))
    }

    /// Look up the descriptor for a source file by its extension
    pub fn resolve_path(&self, source_path: &Path) -> AppResult<&LanguageDescriptor> {
        let extension = source_path
            .extension()
            .map(|ext| ext.to_string_lossy())
            .unwrap_or_default();
        self.resolve(&extension)
    }
}
