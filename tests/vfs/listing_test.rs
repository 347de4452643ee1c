/*!
 * Directory Listing Tests
 * Paginated views on directory handles
 */

use pretty_assertions::assert_eq;

use memfs_kernel::vfs::{ErrorKind, FileHandle, MemFs, MemFsConfig, Permissions};

fn populated(count: usize) -> (MemFs, FileHandle) {
    let fs = MemFs::with_config(MemFsConfig::isolated()).unwrap();
    fs.mkdir("/list", Permissions::all()).unwrap();
    for i in 0..count {
        fs.create(format!("/list/f{:02}", i)).unwrap();
    }
    let dir = fs.open("/list").unwrap();
    (fs, dir)
}

#[test]
fn test_all_then_pages() {
    let (_fs, mut dir) = populated(10);

    assert_eq!(dir.readdir_names(-1).unwrap().len(), 10);
    assert_eq!(dir.readdir_names(5).unwrap().len(), 5);
    assert_eq!(dir.readdir_names(5).unwrap().len(), 5);

    assert_eq!(dir.read_dir(-1).unwrap().len(), 10);
    assert_eq!(dir.read_dir(5).unwrap().len(), 5);
    assert_eq!(dir.read_dir(5).unwrap().len(), 5);

    assert_eq!(dir.readdir(-1).unwrap().len(), 10);
    assert_eq!(dir.readdir(5).unwrap().len(), 5);
    assert_eq!(dir.readdir(5).unwrap().len(), 5);
}

#[test]
fn test_pages_are_contiguous_and_wrap() {
    let (_fs, mut dir) = populated(5);

    assert_eq!(dir.readdir_names(2).unwrap(), vec!["f00", "f01"]);
    assert_eq!(dir.readdir_names(2).unwrap(), vec!["f02", "f03"]);
    // Covers the remainder: returned, then the view rewinds
    assert_eq!(dir.readdir_names(2).unwrap(), vec!["f04"]);
    assert_eq!(dir.readdir_names(2).unwrap(), vec!["f00", "f01"]);
}

#[test]
fn test_views_are_independent() {
    let (_fs, mut dir) = populated(4);

    assert_eq!(dir.readdir_names(3).unwrap(), vec!["f00", "f01", "f02"]);
    let entries = dir.read_dir(1).unwrap();
    assert_eq!(entries[0].name(), "f00");
    let infos = dir.readdir(2).unwrap();
    assert_eq!(infos[0].name(), "f00");
    assert_eq!(dir.readdir_names(-1).unwrap(), vec!["f03"]);
}

#[test]
fn test_zero_count() {
    let (_fs, mut dir) = populated(3);

    dir.readdir_names(1).unwrap();
    assert!(dir.readdir_names(0).unwrap().is_empty());
    assert_eq!(dir.readdir_names(1).unwrap(), vec!["f01"]);
}

#[test]
fn test_snapshot_taken_per_call() {
    let (fs, mut dir) = populated(3);

    assert_eq!(dir.readdir_names(1).unwrap(), vec!["f00"]);
    fs.create("/list/a-first").unwrap();
    fs.remove("/list/f02").unwrap();

    // Fresh snapshot: [a-first, f00, f01], resumed at index 1
    assert_eq!(dir.readdir_names(-1).unwrap(), vec!["f00", "f01"]);
}

#[test]
fn test_empty_directory() {
    let (_fs, mut dir) = populated(0);
    assert!(dir.readdir_names(-1).unwrap().is_empty());
    assert!(dir.read_dir(3).unwrap().is_empty());
    assert!(dir.readdir(0).unwrap().is_empty());
}

#[test]
fn test_entry_metadata() {
    let (fs, mut dir) = populated(1);
    fs.mkdir("/list/sub", Permissions::new(0o750)).unwrap();

    let entries = dir.read_dir(-1).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(!entries[0].is_dir());
    assert!(entries[1].is_dir());

    let info = entries[1].info();
    assert_eq!(info.mode().mode, 0o750);
    assert_eq!(info.mode_bits(), 0o040750);
    assert!(info.sys().is_none());

    let entry = entries[0].to_entry();
    assert_eq!(entry.name, "f00");
}

#[test]
fn test_file_handle_cannot_list() {
    let (fs, _dir) = populated(1);
    let mut file = fs.open("/list/f00").unwrap();

    assert_eq!(file.readdir(-1).unwrap_err().kind(), ErrorKind::InvalidPath);
    assert_eq!(file.read_dir(-1).unwrap_err().kind(), ErrorKind::InvalidPath);
    assert_eq!(
        file.readdir_names(-1).unwrap_err().kind(),
        ErrorKind::InvalidPath
    );
}

#[test]
fn test_closed_directory_handle() {
    let (_fs, mut dir) = populated(2);
    dir.close().unwrap();

    assert_eq!(dir.readdir_names(5).unwrap_err().kind(), ErrorKind::Closed);
    assert_eq!(dir.readdir(5).unwrap_err().kind(), ErrorKind::Closed);
    assert_eq!(dir.read_dir(5).unwrap_err().kind(), ErrorKind::Closed);
}

#[test]
fn test_removed_directory_handle_is_stale() {
    let fs = MemFs::with_config(MemFsConfig::isolated()).unwrap();
    fs.mkdir("/gone", Permissions::all()).unwrap();
    let mut dir = fs.open("/gone").unwrap();

    fs.remove("/gone").unwrap();
    assert_eq!(dir.readdir_names(-1).unwrap_err().kind(), ErrorKind::Stale);
    assert_eq!(dir.stat().unwrap_err().kind(), ErrorKind::Stale);

    // Nothing can be created inside a removed directory
    assert_eq!(fs.create("/gone/child").unwrap_err().kind(), ErrorKind::NotExist);
}
