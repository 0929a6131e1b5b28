//! Updater-script rewriter.
//!
//! Translates an updater-script into one that performs every mount, unmount
//! and format of `/system`, `/cache` and `/data` through the multiboot helper,
//! optionally neutralizing device-identity assertions.
//!
//! # Passes
//!
//! | Pass          | Rewrites |
//! |---------------|----------|
//! | mount         | `mount(...)`, busybox `mount`, `run_program(".../mount")` |
//! | unmount       | `unmount(...)`, busybox `umount` |
//! | format        | `format(...)`, `delete_recursive` of `/system` or `/cache`, `.../format.sh` |
//! | device checks | `assert(... getprop("ro.product.device" / "ro.build.product") ...)` |
//!
//! Passes run in this order, each over the previous pass's output. Every
//! pass is a table of [`Rule`]s tried in order; the first rule whose
//! qualifier matches a line decides what happens to it. Lines are replaced
//! one-for-one, so line count and line positions never change.
//!
//! # Design
//!
//! - **Pure logic**: no I/O; bytes in, bytes out
//! - **Total**: every input produces output; unmatched lines pass through
//! - **Compiled once**: rule patterns are compiled when the rewriter is built

pub mod classifier;
pub mod device_checks;
pub mod format;
pub mod mount;
pub mod qualifier;
pub mod template;
pub mod unmount;

use std::fmt;

use tracing::{debug, trace};

use crate::device::Device;
use crate::error::Result;
use crate::script::Script;
use crate::types::{Operation, Partition};

pub use classifier::Classifier;
pub use qualifier::{CompiledQualifier, Qualifier};
pub use template::{HELPER, RewriteTemplates};

/// Disjunct that makes an assertion trivially true.
pub const ALWAYS_TRUE: &[u8] = br#""true" == "true" || "#;

// ============================================================================
// Rules
// ============================================================================

/// What to do with a line once a rule's qualifier matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Classify the line and replace it with the template for that
    /// partition. Unclassified lines are kept as they are.
    Classify(Operation),
    /// Replace the line with the template for a fixed partition.
    Fixed(Operation, Partition),
    /// Insert [`ALWAYS_TRUE`] right after the leading `call(`.
    Neutralize,
}

/// A qualifier paired with its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub qualifier: Qualifier,
    pub action: Action,
}

impl Rule {
    pub const fn new(qualifier: Qualifier, action: Action) -> Self {
        Self { qualifier, action }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    qualifier: CompiledQualifier,
    action: Action,
}

impl CompiledRule {
    fn apply(&self, line: &[u8], ctx: &PassContext<'_>) -> Option<Vec<u8>> {
        match self.action {
            Action::Classify(operation) => ctx
                .classifier
                .classify(line)
                .map(|partition| ctx.templates.render(operation, partition).into_bytes()),
            Action::Fixed(operation, partition) => {
                Some(ctx.templates.render(operation, partition).into_bytes())
            }
            Action::Neutralize => {
                let at = self.qualifier.head_end(line)?;
                let mut out = Vec::with_capacity(line.len() + ALWAYS_TRUE.len());
                out.extend_from_slice(&line[..at]);
                out.extend_from_slice(ALWAYS_TRUE);
                out.extend_from_slice(&line[at..]);
                Some(out)
            }
        }
    }
}

/// Everything a pass needs besides the line itself.
pub struct PassContext<'a> {
    pub classifier: Classifier<'a>,
    pub templates: &'a RewriteTemplates,
}

// ============================================================================
// Passes
// ============================================================================

/// A named, compiled rule table.
#[derive(Debug, Clone)]
pub struct Pass {
    name: &'static str,
    rules: Vec<CompiledRule>,
}

impl Pass {
    /// Compile a rule table.
    ///
    /// # Errors
    ///
    /// Returns `PatcherError::Pattern` if a qualifier does not compile.
    pub fn compile(name: &'static str, rules: &[Rule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| -> Result<CompiledRule> {
                Ok(CompiledRule {
                    qualifier: rule.qualifier.compile()?,
                    action: rule.action,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { name, rules })
    }

    /// Rewrite a single line. `None` means the line is kept.
    pub fn rewrite_line(&self, line: &[u8], ctx: &PassContext<'_>) -> Option<Vec<u8>> {
        let rule = self.rules.iter().find(|rule| rule.qualifier.is_match(line))?;
        rule.apply(line, ctx)
    }

    /// Run the pass over all lines, returning the new lines and how many
    /// were rewritten.
    pub fn run(&self, lines: Vec<Vec<u8>>, ctx: &PassContext<'_>) -> (Vec<Vec<u8>>, usize) {
        let mut rewritten = 0;
        let lines = lines
            .into_iter()
            .map(|line| match self.rewrite_line(&line, ctx) {
                Some(new_line) => {
                    trace!(
                        "{}: {:?} -> {:?}",
                        self.name,
                        String::from_utf8_lossy(&line),
                        String::from_utf8_lossy(&new_line)
                    );
                    rewritten += 1;
                    new_line
                }
                None => line,
            })
            .collect();
        debug!("{} pass rewrote {} line(s)", self.name, rewritten);
        (lines, rewritten)
    }
}

// ============================================================================
// Script Rewriter
// ============================================================================

/// Number of lines each pass rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub mount: usize,
    pub unmount: usize,
    pub format: usize,
    /// `None` when device checks were kept
    pub device_checks: Option<usize>,
}

impl RewriteReport {
    pub fn total(&self) -> usize {
        self.mount + self.unmount + self.format + self.device_checks.unwrap_or(0)
    }
}

impl fmt::Display for RewriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mount: {}, unmount: {}, format: {}, ",
            self.mount, self.unmount, self.format
        )?;
        match self.device_checks {
            Some(n) => write!(f, "device checks: {}", n),
            None => write!(f, "device checks: kept"),
        }
    }
}

/// The four passes plus the templates they render.
///
/// Immutable once built; one instance can serve any number of scripts.
#[derive(Debug, Clone)]
pub struct ScriptRewriter {
    templates: RewriteTemplates,
    mount: Pass,
    unmount: Pass,
    format: Pass,
    device_checks: Pass,
}

impl ScriptRewriter {
    /// Build the rewriter with the standard helper templates.
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: RewriteTemplates::STANDARD,
            mount: Pass::compile(mount::NAME, mount::RULES)?,
            unmount: Pass::compile(unmount::NAME, unmount::RULES)?,
            format: Pass::compile(format::NAME, format::RULES)?,
            device_checks: Pass::compile(device_checks::NAME, device_checks::RULES)?,
        })
    }

    pub fn templates(&self) -> &RewriteTemplates {
        &self.templates
    }

    /// Rewrite raw script contents.
    pub fn rewrite<D: Device + ?Sized>(
        &self,
        contents: &[u8],
        device: &D,
        strip_device_checks: bool,
    ) -> Vec<u8> {
        self.rewrite_with_report(contents, device, strip_device_checks).0
    }

    /// Rewrite raw script contents and report what changed.
    pub fn rewrite_with_report<D: Device + ?Sized>(
        &self,
        contents: &[u8],
        device: &D,
        strip_device_checks: bool,
    ) -> (Vec<u8>, RewriteReport) {
        let (script, report) =
            self.rewrite_script(Script::from_bytes(contents), device, strip_device_checks);
        (script.to_bytes(), report)
    }

    /// Run all passes over an already split script.
    pub fn rewrite_script<D: Device + ?Sized>(
        &self,
        script: Script,
        device: &D,
        strip_device_checks: bool,
    ) -> (Script, RewriteReport) {
        let ctx = PassContext {
            classifier: Classifier::new(device),
            templates: &self.templates,
        };
        let mut report = RewriteReport::default();

        let lines = script.into_lines();
        let (lines, n) = self.mount.run(lines, &ctx);
        report.mount = n;
        let (lines, n) = self.unmount.run(lines, &ctx);
        report.unmount = n;
        let (mut lines, n) = self.format.run(lines, &ctx);
        report.format = n;

        if strip_device_checks {
            let (stripped, n) = self.device_checks.run(lines, &ctx);
            lines = stripped;
            report.device_checks = Some(n);
        }

        (Script::from_lines(lines), report)
    }
}
