//! Python language descriptor

use super::LanguageDescriptor;
use crate::judge::template::CommandTemplate;

/// Get descriptor for Python
pub fn descriptor() -> LanguageDescriptor {
    LanguageDescriptor::Scripted {
        run: CommandTemplate::new(["python3", "{source_path}"]),
    }
}
