//! Unmount rewriter rules.

use super::qualifier::Qualifier;
use super::{Action, Rule};
use crate::types::Operation;

pub const NAME: &str = "unmount";

pub const RULES: &[Rule] = &[
    Rule::new(Qualifier::Call("unmount"), Action::Classify(Operation::Unmount)),
    Rule::new(
        Qualifier::BusyboxApplet("umount"),
        Action::Classify(Operation::Unmount),
    ),
];
