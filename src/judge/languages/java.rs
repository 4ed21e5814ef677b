//! Java language descriptor
//!
//! `javac` writes class files into the workspace directory and the run
//! command starts the fixed `Main` entry point from inside it, so the
//! solution's public class must be named `Main`.

use super::LanguageDescriptor;
use crate::judge::template::CommandTemplate;

/// Get descriptor for Java
pub fn descriptor() -> LanguageDescriptor {
    LanguageDescriptor::FixedExecutable {
        compile: CommandTemplate::new(["javac", "{source_path}", "-d", "{exec_path}"]),
        run: CommandTemplate::new(["java", "Main"]),
    }
}
