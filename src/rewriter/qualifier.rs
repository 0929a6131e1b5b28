//! Line qualifiers.
//!
//! A qualifier describes the shape of an updater-script statement a rule
//! applies to. Qualifiers are plain data; each one is compiled to a byte
//! regex once, when the rewriter is built.
//!
//! | Variant                | Matches |
//! |------------------------|---------|
//! | `Call`                 | `mount(...`, `format(...` at the start of a line |
//! | `BusyboxApplet`        | `run_program("/sbin/busybox", "umount", ...` |
//! | `Program`              | `run_program("/tmp/mount", ...` |
//! | `CallWithArgument`     | `delete_recursive(..., "/cache")` |
//! | `CallQueryingProperty` | `assert(getprop("ro.product.device") == ...` |

use regex::bytes::{Regex, RegexBuilder};

use crate::error::Result;

/// Name of the capture group holding the opening `call(` of a line.
pub const HEAD_GROUP: &str = "head";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// Line starts (after whitespace) with `name(`.
    Call(&'static str),
    /// `run_program` whose first argument ends in `busybox` and whose second
    /// argument is exactly the applet name.
    BusyboxApplet(&'static str),
    /// `run_program` whose first argument's last path segment is exactly
    /// `name`. The argument may not contain a comma.
    Program(&'static str),
    /// `call(` anywhere in the line with a quoted argument exactly equal to
    /// `argument` before the first closing parenthesis.
    CallWithArgument {
        call: &'static str,
        argument: &'static str,
    },
    /// Line starts with `call(` and later queries one of `properties`
    /// through `getprop(`.
    CallQueryingProperty {
        call: &'static str,
        properties: &'static [&'static str],
    },
}

impl Qualifier {
    /// Regex source for this qualifier.
    ///
    /// Every pattern that is anchored on a leading call exposes it as the
    /// `head` group, so actions can insert text right after `call(`.
    pub fn pattern(&self) -> String {
        match self {
            Self::Call(name) => format!(r"^(?P<{HEAD_GROUP}>\s*{}\s*\()", regex::escape(name)),
            Self::BusyboxApplet(applet) => format!(
                r#"^\s*run_program\s*\(\s*"[^"]*busybox"\s*,\s*"{}""#,
                regex::escape(applet)
            ),
            Self::Program(name) => {
                format!(r#"^\s*run_program\s*\(\s*"[^",]*/{}""#, regex::escape(name))
            }
            Self::CallWithArgument { call, argument } => format!(
                r#"{}\s*\([^)]*"{}""#,
                regex::escape(call),
                regex::escape(argument)
            ),
            Self::CallQueryingProperty { call, properties } => {
                let alternatives = properties
                    .iter()
                    .map(|p| regex::escape(p))
                    .collect::<Vec<_>>()
                    .join("|");
                format!(
                    r"^(?P<{HEAD_GROUP}>\s*{}\s*\().*getprop\s*\(.*(?:{alternatives})",
                    regex::escape(call)
                )
            }
        }
    }

    /// Compile with Unicode disabled, so `.` and `[^"]` match any byte and
    /// scripts that are not valid UTF-8 are matched the same way.
    pub fn compile(self) -> Result<CompiledQualifier> {
        let regex = RegexBuilder::new(&self.pattern()).unicode(false).build()?;
        Ok(CompiledQualifier { regex })
    }
}

/// Compiled form of a [`Qualifier`].
#[derive(Debug, Clone)]
pub struct CompiledQualifier {
    regex: Regex,
}

impl CompiledQualifier {
    pub fn is_match(&self, line: &[u8]) -> bool {
        self.regex.is_match(line)
    }

    /// Byte offset just past the leading `call(`, if the pattern has one and
    /// the line matches.
    pub fn head_end(&self, line: &[u8]) -> Option<usize> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.name(HEAD_GROUP))
            .map(|m| m.end())
    }
}
