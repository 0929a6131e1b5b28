//! Partition classifier.
//!
//! Resolves a script line to the logical partition it refers to. Matching is
//! plain, case-sensitive substring containment, tried in the order
//! system, cache, data. The first partition with a hit wins, so a line that
//! mentions both `system` and `data` is a system line.

use crate::device::Device;
use crate::types::Partition;

/// Literal words that identify each partition, in precedence order.
const KEYWORDS: [(Partition, &[&str]); 3] = [
    (Partition::System, &["system"]),
    (Partition::Cache, &["cache"]),
    (Partition::Data, &["data", "userdata"]),
];

/// Classifier bound to one device's partition paths.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    device_paths: [Option<&'a [u8]>; 3],
}

impl<'a> Classifier<'a> {
    /// Capture the device's raw paths. Empty paths are dropped, since an
    /// empty needle would match every line.
    pub fn new<D: Device + ?Sized>(device: &'a D) -> Self {
        let path = move |partition| {
            device
                .partition(partition)
                .filter(|p| !p.is_empty())
                .map(str::as_bytes)
        };
        Self {
            device_paths: [
                path(Partition::System),
                path(Partition::Cache),
                path(Partition::Data),
            ],
        }
    }

    /// Partition referenced by `line`, if any.
    pub fn classify(&self, line: &[u8]) -> Option<Partition> {
        KEYWORDS
            .iter()
            .zip(self.device_paths)
            .find(|((_, words), device_path)| {
                words.iter().any(|w| contains(line, w.as_bytes()))
                    || device_path.is_some_and(|p| contains(line, p))
            })
            .map(|((partition, _), _)| *partition)
    }
}

/// Empty needles never match.
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}
