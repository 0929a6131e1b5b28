// Rewriter integration tests
//
// End-to-end checks of the documented rewriting behaviour, run through the
// public ScriptRewriter API exactly as the patcher uses it.

use mbpatch::{DeviceInfo, Partition, RewriteTemplates, ScriptRewriter, Operation};

fn rewriter() -> ScriptRewriter {
    ScriptRewriter::new().expect("builtin rules compile")
}

fn rewrite_line(line: &str, device: &DeviceInfo, strip: bool) -> String {
    String::from_utf8(rewriter().rewrite(line.as_bytes(), device, strip)).expect("ascii output")
}

#[test]
fn test_mount_system_without_device_mapping() {
    let device = DeviceInfo::new("generic");
    assert_eq!(
        rewrite_line(r#"mount("ext4", "/dev/block/mmcblk0p1", "/system");"#, &device, false),
        RewriteTemplates::STANDARD.render(Operation::Mount, Partition::System)
    );
}

#[test]
fn test_busybox_umount_cache() {
    let device = DeviceInfo::new("generic");
    assert_eq!(
        rewrite_line(r#"run_program("/sbin/busybox", "umount", "/cache");"#, &device, false),
        r#"run_program("/update-binary-tool", "unmount", "/cache");"#
    );
}

#[test]
fn test_system_wins_over_data() {
    let device = DeviceInfo::new("generic");
    assert_eq!(
        rewrite_line(r#"mount("ext4", "EMMC", "/dev/block/by-name/data", "/system");"#, &device, false),
        r#"run_program("/update-binary-tool", "mount", "/system");"#
    );
    assert_eq!(
        rewrite_line(r#"format("ext4", "EMMC", "/dev/block/by-name/system", "0", "/data");"#, &device, false),
        r#"run_program("/update-binary-tool", "format", "/system");"#
    );
}

#[test]
fn test_delete_recursive_ignores_device_mapping() {
    // Device maps its cache partition to a path that looks like /system
    let device = DeviceInfo::new("weird")
        .with_partition(Partition::Cache, "/system")
        .with_partition(Partition::System, "/cache");
    assert_eq!(
        rewrite_line(r#"delete_recursive("/system");"#, &device, false),
        r#"run_program("/update-binary-tool", "format", "/system");"#
    );
    assert_eq!(
        rewrite_line(r#"delete_recursive("/cache");"#, &device, false),
        r#"run_program("/update-binary-tool", "format", "/cache");"#
    );
}

#[test]
fn test_device_check_kept_without_strip() {
    let device = DeviceInfo::new("generic");
    let line = r#"assert(getprop("ro.product.device") == "jflte" || getprop("ro.build.product") == "jflte");"#;
    assert_eq!(rewrite_line(line, &device, false), line);
}

#[test]
fn test_device_check_stripped() {
    let device = DeviceInfo::new("generic");
    let line = r#"assert(getprop("ro.product.device") == "jflte" || getprop("ro.build.product") == "jflte");"#;
    assert_eq!(
        rewrite_line(line, &device, true),
        r#"assert("true" == "true" || getprop("ro.product.device") == "jflte" || getprop("ro.build.product") == "jflte");"#
    );
}

#[test]
fn test_passes_run_in_order_over_a_full_script() {
    let script = "\
ui_print(\"Mounting\");
run_program(\"/sbin/mount\", \"-t\", \"ext4\", \"/dev/block/mmcblk0p9\", \"/system\");
run_program(\"/sbin/busybox\", \"mount\", \"/cache\");
mount(\"ext4\", \"EMMC\", \"/dev/block/mmcblk0p1\", \"/efs\");
run_program(\"/sbin/busybox\", \"umount\", \"/data\");
format(\"ext4\", \"EMMC\", \"/dev/block/mmcblk0p12\", \"0\");
assert(getprop(\"ro.build.product\") == \"i9300\");";

    let device = DeviceInfo::new("i9300").with_partition(Partition::Data, "/dev/block/mmcblk0p12");
    let (out, report) = rewriter().rewrite_with_report(script.as_bytes(), &device, true);
    let out = String::from_utf8(out).expect("ascii output");

    let expected = "\
ui_print(\"Mounting\");
run_program(\"/update-binary-tool\", \"mount\", \"/system\");
run_program(\"/update-binary-tool\", \"mount\", \"/cache\");
mount(\"ext4\", \"EMMC\", \"/dev/block/mmcblk0p1\", \"/efs\");
run_program(\"/update-binary-tool\", \"unmount\", \"/data\");
run_program(\"/update-binary-tool\", \"format\", \"/data\");
assert(\"true\" == \"true\" || getprop(\"ro.build.product\") == \"i9300\");";

    assert_eq!(out, expected);
    assert_eq!(report.mount, 2);
    assert_eq!(report.unmount, 1);
    assert_eq!(report.format, 1);
    assert_eq!(report.device_checks, Some(1));
}

#[test]
fn test_crlf_lines_are_replaced_whole() {
    let device = DeviceInfo::new("generic");
    let out = rewrite_line("unmount(\"/system\");\r\nui_print(\"done\");\r", &device, false);
    assert_eq!(
        out,
        "run_program(\"/update-binary-tool\", \"unmount\", \"/system\");\nui_print(\"done\");\r"
    );
}
