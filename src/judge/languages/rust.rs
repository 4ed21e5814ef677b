//! Rust language descriptor

use super::LanguageDescriptor;
use crate::judge::template::CommandTemplate;

/// Get descriptor for Rust
pub fn descriptor() -> LanguageDescriptor {
    LanguageDescriptor::Compiled {
        compile: CommandTemplate::new(["rustc", "{source_path}", "-o", "{exec_path}"]),
        run: CommandTemplate::new(["{exec_path}"]),
    }
}
