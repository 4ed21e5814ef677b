//! C language descriptor

use super::LanguageDescriptor;
use crate::judge::template::CommandTemplate;

/// Get descriptor for C
pub fn descriptor() -> LanguageDescriptor {
    LanguageDescriptor::Compiled {
        compile: CommandTemplate::new(["gcc", "{source_path}", "-o", "{exec_path}"]),
        run: CommandTemplate::new(["{exec_path}"]),
    }
}
