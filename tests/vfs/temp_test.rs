/*!
 * Temporary Name Tests
 * create_temp / mkdir_temp placement, naming and modes
 */

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use memfs_kernel::vfs::{ErrorKind, MemFs, MemFsConfig, Permissions};

fn isolated() -> MemFs {
    MemFs::with_config(MemFsConfig::isolated()).unwrap()
}

#[test]
fn test_temp_dir_path() {
    let fs = isolated();
    assert_eq!(fs.temp_dir(), PathBuf::from("/tmp"));
    assert!(fs.stat(fs.temp_dir()).unwrap().is_dir());
}

#[test]
fn test_custom_temp_dir_name() {
    let config = MemFsConfig {
        temp_dir_name: "scratch".into(),
        ..MemFsConfig::isolated()
    };
    let fs = MemFs::with_config(config).unwrap();
    assert_eq!(fs.temp_dir(), PathBuf::from("/scratch"));

    let dir = fs.mkdir_temp("", "x").unwrap();
    assert!(dir.starts_with("/scratch"));
}

#[test]
fn test_create_temp_in_default_dir() {
    let fs = isolated();
    let mut f = fs.create_temp("", "blah*blah*blah*").unwrap();

    let info = f.stat().unwrap();
    let name = info.name();
    assert!(name.starts_with("blah"));
    assert!(name.ends_with("blah*blah*"));
    assert_eq!(name.len(), "blahblah*blah*".len() + 8);
    assert!(!info.is_dir());
    assert_eq!(info.mode().mode, 0o600);

    // Opened read-write
    f.write(b"temp").unwrap();
    let mut buf = [0u8; 4];
    f.read_at(&mut buf, 0).unwrap();
    assert_eq!(&buf, b"temp");

    assert!(fs.exists(Path::new("/tmp").join(&name)));
}

#[test]
fn test_create_temp_in_explicit_dir() {
    let fs = isolated();
    let dir = fs.mkdir_temp("", "test*").unwrap();
    assert!(dir.to_string_lossy().contains("test"));

    for _ in 0..10 {
        fs.create_temp(&dir, "testfile").unwrap();
    }
    let names: HashSet<String> = fs
        .read_dir(&dir)
        .unwrap()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    assert_eq!(names.len(), 10);
    assert!(names.iter().all(|n| n.starts_with("testfile") && n.len() == 16));
}

#[test]
fn test_mkdir_temp_mode_and_removal() {
    let fs = isolated();
    let dir = fs.mkdir_temp("", "test*").unwrap();
    let info = fs.stat(&dir).unwrap();
    assert!(info.is_dir());
    assert_eq!(info.mode(), Permissions::new(0o700));

    fs.remove(&dir).unwrap();
    assert!(!fs.exists(&dir));
}

#[test]
fn test_temp_under_missing_dir() {
    let fs = isolated();
    assert_eq!(
        fs.create_temp("/blah", "blah").unwrap_err().kind(),
        ErrorKind::NotExist
    );
    assert_eq!(
        fs.mkdir_temp("/blah", "blah").unwrap_err().kind(),
        ErrorKind::NotExist
    );
}

#[test]
fn test_temp_under_file() {
    let fs = isolated();
    fs.create("/afile").unwrap();
    assert_eq!(
        fs.create_temp("/afile", "x").unwrap_err().kind(),
        ErrorKind::NotExist
    );

    // A file partway down the directory path
    assert_eq!(
        fs.create_temp("/afile/x", "y").unwrap_err().kind(),
        ErrorKind::NotExist
    );
    assert_eq!(
        fs.mkdir_temp("/afile/x", "y").unwrap_err().kind(),
        ErrorKind::NotExist
    );

    // Malformed text is still a path error
    assert_eq!(
        fs.mkdir_temp("/bad\0dir", "y").unwrap_err().kind(),
        ErrorKind::InvalidPath
    );
}

#[test]
fn test_temp_pattern_with_separator() {
    let fs = isolated();
    assert_eq!(
        fs.create_temp("", "a/b*").unwrap_err().kind(),
        ErrorKind::InvalidPath
    );
    assert_eq!(
        fs.mkdir_temp("", "../x").unwrap_err().kind(),
        ErrorKind::InvalidPath
    );
}

#[test]
fn test_temp_relative_dir() {
    let fs = MemFs::with_config(MemFsConfig::isolated().with_working_dir("/work")).unwrap();
    fs.mkdir_all("/work/out", Permissions::all()).unwrap();

    let dir = fs.mkdir_temp("out", "run-").unwrap();
    assert!(dir.starts_with("/work/out"));
    assert!(dir.is_absolute());
}

#[test]
fn test_short_names_still_unique() {
    let config = MemFsConfig {
        temp_name_len: 2,
        ..MemFsConfig::isolated()
    };
    let fs = MemFs::with_config(config).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..50 {
        let f = fs.create_temp("", "").unwrap();
        assert!(seen.insert(f.name()));
    }
    assert_eq!(fs.read_dir("/tmp").unwrap().len(), 50);
}
