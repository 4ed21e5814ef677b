//! Zig language descriptor

use super::LanguageDescriptor;
use crate::judge::template::CommandTemplate;

/// Get descriptor for Zig
pub fn descriptor() -> LanguageDescriptor {
    LanguageDescriptor::Compiled {
        compile: CommandTemplate::new([
            "zig",
            "build-exe",
            "{source_path}",
            "-femit-bin={exec_path}",
        ]),
        run: CommandTemplate::new(["{exec_path}"]),
    }
}
