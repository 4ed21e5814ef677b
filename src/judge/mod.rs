//! Judge engine
//!
//! Checks a solution against sample cases on the local machine:
//!
//! 1. **Languages** (`languages`): extension → build model and command
//!    templates, built-ins merged with user overrides.
//! 2. **Templates** (`template`): placeholder substitution into argv.
//! 3. **Workspaces** (`workspace`): content-addressed build directories.
//! 4. **Executor** (`executor`): compile once, run per sample.
//! 5. **Comparison** (`compare`, `verdict`): output matching and verdicts.
//! 6. **Sessions** (`session`): ordered verdict stream with guaranteed
//!    workspace cleanup.

pub mod compare;
pub mod executor;
pub mod languages;
pub mod session;
pub mod template;
pub mod verdict;
pub mod workspace;

pub use compare::outputs_match;
pub use executor::{ExecutionLimits, ExecutionResult, Executor, PreparedProgram};
pub use languages::{BuildModel, LanguageConfig, LanguageDescriptor, LanguageRegistry};
pub use session::{Session, evaluate};
pub use template::CommandTemplate;
pub use verdict::{SampleResult, SessionSummary, Verdict};
pub use workspace::{WorkspaceGuard, WorkspaceId, WorkspaceManager};
