//! Format rewriter rules.
//!
//! Priority chain, first match wins:
//!
//! 1. `format(...)`: classified like mounts
//! 2. `delete_recursive(..., "/system")`: always formats `/system`
//! 3. `delete_recursive(..., "/cache")`: always formats `/cache`
//! 4. `run_program(".../format.sh")`: always formats `/data`
//!
//! A `format(...)` line that names no known partition is kept as is.

use super::qualifier::Qualifier;
use super::{Action, Rule};
use crate::types::{Operation, Partition};

pub const NAME: &str = "format";

pub const RULES: &[Rule] = &[
    Rule::new(Qualifier::Call("format"), Action::Classify(Operation::Format)),
    Rule::new(
        Qualifier::CallWithArgument {
            call: "delete_recursive",
            argument: "/system",
        },
        Action::Fixed(Operation::Format, Partition::System),
    ),
    Rule::new(
        Qualifier::CallWithArgument {
            call: "delete_recursive",
            argument: "/cache",
        },
        Action::Fixed(Operation::Format, Partition::Cache),
    ),
    // Legacy convention: format.sh wipes data
    Rule::new(
        Qualifier::Program("format.sh"),
        Action::Fixed(Operation::Format, Partition::Data),
    ),
];
