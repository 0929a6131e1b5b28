//! Property-Based Tests for mbpatch
//!
//! These tests verify:
//! - Partition enum string round-trips
//! - Line structure is preserved by every rewrite
//! - Lines that qualify for no rule are returned untouched
//! - Fixed-target rules ignore the rest of the line

use proptest::prelude::*;

use mbpatch::{DeviceInfo, Partition, Script, ScriptRewriter};

fn rewriter() -> ScriptRewriter {
    ScriptRewriter::new().expect("builtin rules compile")
}

// =============================================================================
// Partition Enum Property Tests
// =============================================================================

/// Strategy for generating valid Partition variants
fn partition_strategy() -> impl Strategy<Value = Partition> {
    prop_oneof![
        Just(Partition::System),
        Just(Partition::Cache),
        Just(Partition::Data),
    ]
}

proptest! {
    /// Partition: to_string → parse round-trip is identity
    #[test]
    fn partition_roundtrip(partition in partition_strategy()) {
        let s = partition.to_string();
        let parsed: Partition = s.parse().expect("Should parse");
        prop_assert_eq!(partition, parsed);
    }

    /// Partition: mount point is "/" + name
    #[test]
    fn partition_mount_point(partition in partition_strategy()) {
        prop_assert_eq!(partition.mount_point(), format!("/{}", partition));
    }
}

// =============================================================================
// Script Structure Property Tests
// =============================================================================

proptest! {
    /// Script: split → join is lossless for arbitrary bytes
    #[test]
    fn script_split_join_lossless(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(Script::from_bytes(&bytes).to_bytes(), bytes);
    }

    /// Rewriting never adds or removes lines
    #[test]
    fn rewrite_preserves_line_count(
        bytes in prop::collection::vec(any::<u8>(), 0..512),
        strip in any::<bool>(),
    ) {
        let device = DeviceInfo::new("generic");
        let out = rewriter().rewrite(&bytes, &device, strip);
        let count = |b: &[u8]| b.iter().filter(|&&c| c == b'\n').count();
        prop_assert_eq!(count(&out), count(&bytes));
    }

    /// Lines without a call can never qualify, so they come back byte-identical
    #[test]
    fn rewrite_is_identity_without_calls(
        lines in prop::collection::vec("[a-z0-9 /\"_,.;=|]{0,60}", 0..20),
        strip in any::<bool>(),
    ) {
        let script = lines.join("\n");
        let device = DeviceInfo::new("generic")
            .with_partition(Partition::System, "/dev/block/mmcblk0p1");
        let out = rewriter().rewrite(script.as_bytes(), &device, strip);
        prop_assert_eq!(out, script.into_bytes());
    }
}

// =============================================================================
// Rule Property Tests
// =============================================================================

proptest! {
    /// Any mount of something named system becomes the system mount helper call
    #[test]
    fn mount_system_always_classified(device_path in "[a-z0-9/]{0,24}", fs in "[a-z0-9]{1,8}") {
        let line = format!(r#"mount("{fs}", "EMMC", "{device_path}", "/system");"#);
        let device = DeviceInfo::new("generic");
        let out = rewriter().rewrite(line.as_bytes(), &device, false);
        prop_assert_eq!(
            String::from_utf8(out).expect("ascii"),
            r#"run_program("/update-binary-tool", "mount", "/system");"#
        );
    }

    /// format.sh always formats /data, whatever its location or arguments
    #[test]
    fn format_sh_always_formats_data(dir in "[a-zA-Z0-9_/.-]{0,24}", args in "[a-z ,\"]{0,24}") {
        let line = format!(r#"run_program("{dir}/format.sh"{args});"#);
        let device = DeviceInfo::new("generic");
        let out = rewriter().rewrite(line.as_bytes(), &device, false);
        prop_assert_eq!(
            String::from_utf8(out).expect("ascii"),
            r#"run_program("/update-binary-tool", "format", "/data");"#
        );
    }

    /// Device assertions are untouched unless stripping was requested
    #[test]
    fn device_checks_kept_without_strip(codename in "[a-z0-9]{1,12}", use_device in any::<bool>()) {
        let property = if use_device { "ro.product.device" } else { "ro.build.product" };
        let line = format!(r#"assert(getprop("{property}") == "{codename}" || abort("wrong device"));"#);
        let device = DeviceInfo::new("generic");

        let kept = rewriter().rewrite(line.as_bytes(), &device, false);
        prop_assert_eq!(&kept, line.as_bytes());

        let stripped = String::from_utf8(rewriter().rewrite(line.as_bytes(), &device, true))
            .expect("ascii");
        prop_assert!(stripped.starts_with(r#"assert("true" == "true" || getprop("#));
        prop_assert_eq!(stripped.len(), line.len() + r#""true" == "true" || "#.len());
    }
}
