//! Go language descriptor

use super::LanguageDescriptor;
use crate::judge::template::CommandTemplate;

/// Get descriptor for Go
pub fn descriptor() -> LanguageDescriptor {
    LanguageDescriptor::Compiled {
        compile: CommandTemplate::new(["go", "build", "-o", "{exec_path}", "{source_path}"]),
        run: CommandTemplate::new(["{exec_path}"]),
    }
}
