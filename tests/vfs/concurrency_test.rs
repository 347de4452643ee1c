/*!
 * Concurrency Tests
 * Parallel mutation of one store from many threads
 */

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use memfs_kernel::vfs::{ErrorKind, MemFs, MemFsConfig, OpenFlags, Permissions};

const THREADS: usize = 8;

fn isolated() -> MemFs {
    MemFs::with_config(MemFsConfig::isolated()).unwrap()
}

#[test]
fn test_parallel_creates_in_one_directory() {
    let fs = isolated();
    fs.mkdir("/shared", Permissions::all()).unwrap();

    thread::scope(|s| {
        for t in 0..THREADS {
            let fs = &fs;
            s.spawn(move || {
                for i in 0..50 {
                    let mut f = fs.create(format!("/shared/t{}-{}", t, i)).unwrap();
                    f.write(&[t as u8; 4]).unwrap();
                }
            });
        }
    });

    let entries = fs.read_dir("/shared").unwrap();
    assert_eq!(entries.len(), THREADS * 50);
    let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn test_exclusive_create_race_has_one_winner() {
    let fs = isolated();
    let barrier = Arc::new(Barrier::new(THREADS));

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let fs = fs.clone();
                let barrier = Arc::clone(&barrier);
                s.spawn(move || {
                    barrier.wait();
                    fs.open_file("/contended", OpenFlags::create_new(), Permissions::all())
                        .map(|_| ())
                        .map_err(|e| e.kind())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.err())
        .all(|kind| kind == ErrorKind::AlreadyExists));
}

#[test]
fn test_parallel_mkdir_all_overlapping_chains() {
    let fs = isolated();

    thread::scope(|s| {
        for t in 0..THREADS {
            let fs = &fs;
            s.spawn(move || {
                fs.mkdir_all(format!("/deep/a/b/c/t{}", t), Permissions::all())
                    .unwrap();
            });
        }
    });

    assert_eq!(fs.read_dir("/deep/a/b/c").unwrap().len(), THREADS);
    assert_eq!(fs.read_dir("/deep").unwrap().len(), 1);
}

#[test]
fn test_parallel_temp_names_are_unique() {
    let config = MemFsConfig {
        temp_name_len: 3,
        ..MemFsConfig::isolated()
    };
    let fs = MemFs::with_config(config).unwrap();

    let names: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let fs = &fs;
                s.spawn(move || {
                    (0..25)
                        .map(|_| fs.create_temp("", "p-").unwrap().name())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), THREADS * 25);
}

#[test]
fn test_writers_on_separate_handles_same_file() {
    let fs = isolated();
    fs.create("/blocks").unwrap();

    thread::scope(|s| {
        for t in 0..THREADS {
            let fs = &fs;
            s.spawn(move || {
                let mut f = fs
                    .open_file("/blocks", OpenFlags::read_write(), Permissions::all())
                    .unwrap();
                let block = [b'a' + t as u8; 16];
                f.write_at(&block, (t * 16) as i64).unwrap();
            });
        }
    });

    let mut f = fs.open("/blocks").unwrap();
    let mut data = vec![0u8; THREADS * 16];
    assert_eq!(f.read(&mut data).unwrap(), THREADS * 16);
    for (t, chunk) in data.chunks(16).enumerate() {
        assert!(chunk.iter().all(|&b| b == b'a' + t as u8));
    }
}

#[test]
fn test_remove_races_with_readers() {
    let fs = isolated();
    for i in 0..20 {
        fs.create(format!("/r{}", i)).unwrap().write(b"payload").unwrap();
    }

    thread::scope(|s| {
        let remover = &fs;
        s.spawn(move || {
            for i in 0..20 {
                remover.remove(format!("/r{}", i)).unwrap();
            }
        });
        for _ in 0..4 {
            let fs = &fs;
            s.spawn(move || {
                for i in 0..20 {
                    let Ok(mut f) = fs.open(format!("/r{}", i)) else {
                        continue;
                    };
                    let mut buf = [0u8; 7];
                    match f.read(&mut buf) {
                        Ok(n) => assert_eq!(&buf[..n], &b"payload"[..n]),
                        Err(e) => assert_eq!(e.kind(), ErrorKind::Stale),
                    }
                }
            });
        }
    });

    // root + tmp
    assert_eq!(fs.node_count(), 2);
}
