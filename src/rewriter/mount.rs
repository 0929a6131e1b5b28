//! Mount rewriter rules.
//!
//! A line is a mount line if it is a plain `mount(...)` call, runs busybox's
//! `mount` applet, or runs any program whose path ends in `/mount`. Mount
//! lines naming system, cache or data are replaced by the helper's mount
//! invocation; the rest are left alone.

use super::qualifier::Qualifier;
use super::{Action, Rule};
use crate::types::Operation;

pub const NAME: &str = "mount";

pub const RULES: &[Rule] = &[
    Rule::new(Qualifier::Call("mount"), Action::Classify(Operation::Mount)),
    Rule::new(
        Qualifier::BusyboxApplet("mount"),
        Action::Classify(Operation::Mount),
    ),
    Rule::new(Qualifier::Program("mount"), Action::Classify(Operation::Mount)),
];
