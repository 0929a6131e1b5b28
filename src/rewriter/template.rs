//! Helper invocation templates.

use crate::types::{Operation, Partition};

/// Multiboot helper shipped inside the patched zip.
pub const HELPER: &str = "/update-binary-tool";

/// One `run_program` template per operation, with `{}` standing for the
/// partition's canonical mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteTemplates {
    pub mount: &'static str,
    pub unmount: &'static str,
    pub format: &'static str,
}

impl RewriteTemplates {
    /// Standard helper calls. Older patchers emitted these with a `"};`
    /// terminator, which left the `run_program(` call unclosed; these end in
    /// `");`.
    pub const STANDARD: Self = Self {
        mount: r#"run_program("/update-binary-tool", "mount", "{}");"#,
        unmount: r#"run_program("/update-binary-tool", "unmount", "{}");"#,
        format: r#"run_program("/update-binary-tool", "format", "{}");"#,
    };

    pub fn template(&self, operation: Operation) -> &'static str {
        match operation {
            Operation::Mount => self.mount,
            Operation::Unmount => self.unmount,
            Operation::Format => self.format,
        }
    }

    /// Instantiate the template for `operation` on `partition`.
    pub fn render(&self, operation: Operation, partition: Partition) -> String {
        self.template(operation)
            .replacen("{}", partition.mount_point(), 1)
    }
}

impl Default for RewriteTemplates {
    fn default() -> Self {
        Self::STANDARD
    }
}
