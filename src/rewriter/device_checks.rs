//! Device check stripping.
//!
//! ROMs guard installation with assertions on the device codename. Those
//! assertions are kept in place but made trivially true, so the script keeps
//! its shape. Applying the pass twice inserts the disjunct twice.

use super::qualifier::Qualifier;
use super::{Action, Rule};

pub const NAME: &str = "device checks";

/// Properties that identify the device model.
pub const DEVICE_PROPERTIES: &[&str] = &["ro.product.device", "ro.build.product"];

pub const RULES: &[Rule] = &[Rule::new(
    Qualifier::CallQueryingProperty {
        call: "assert",
        properties: DEVICE_PROPERTIES,
    },
    Action::Neutralize,
)];
