/*!
 * Tracing Tests
 * Subscriber installation and span emission around store calls
 */

use serial_test::serial;

use memfs_kernel::monitoring::{init_tracing, span_vfs};
use memfs_kernel::vfs::{MemFs, MemFsConfig, Permissions};

#[test]
#[serial]
fn test_init_tracing_is_idempotent() {
    // Only the first installation in the process wins
    let _ = init_tracing();
    assert!(!init_tracing());
}

#[test]
#[serial]
fn test_operations_run_under_subscriber() {
    init_tracing();
    let fs = MemFs::with_config(MemFsConfig::isolated()).unwrap();

    fs.mkdir_all("/traced/a", Permissions::all()).unwrap();
    let mut f = fs.create("/traced/a/file").unwrap();
    f.write(b"x").unwrap();
    f.close().unwrap();
    assert!(fs.remove("/traced/missing").is_err());

    let span = span_vfs("manual", std::path::Path::new("/traced"));
    span.record_result(true);
}
