//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::storage::filesink::Filesink;
use crate::storage::{tile_path, TileSink};
use std::env;
use std::fs;
use std::path::Path;

#[test]
fn test_filesink() {
    let mut dir = env::temp_dir();
    dir.push("vt_pyramid_filesink_test");
    let basepath = format!("{}", &dir.display());
    let _ = fs::remove_dir_all(&basepath);

    let sink = Filesink::new(&basepath);
    assert_eq!(sink.info(), format!("Tile directory: {}", basepath));
    let fullpath = format!("{}/{}", basepath, tile_path(3, 1, 2));
    assert!(!Path::new(&fullpath).exists());

    sink.write(3, 1, 2, b"0123456789").unwrap();
    assert!(Path::new(&fullpath).exists());
    assert_eq!(fs::read(&fullpath).unwrap(), b"0123456789");

    // same directory, second file
    sink.write(3, 1, 3, b"abc").unwrap();
    assert_eq!(fs::read(format!("{}/3/1/3.mvt", basepath)).unwrap(), b"abc");

    // overwrite
    sink.write(3, 1, 2, b"new").unwrap();
    assert_eq!(fs::read(&fullpath).unwrap(), b"new");
    assert_eq!(sink.drain(), 0);

    let _ = fs::remove_dir_all(&basepath);
}

#[test]
fn test_existing_directory() {
    let mut dir = env::temp_dir();
    dir.push("vt_pyramid_filesink_existing");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("0").join("0")).unwrap();

    let sink = Filesink::new(dir.to_str().unwrap());
    sink.write(0, 0, 0, b"tile").unwrap();
    assert_eq!(fs::read(dir.join("0/0/0.mvt")).unwrap(), b"tile");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_write_error() {
    let mut file = env::temp_dir();
    file.push("vt_pyramid_filesink_blocker");
    fs::write(&file, b"not a directory").unwrap();

    // base path is a file
    let sink = Filesink::new(file.to_str().unwrap());
    assert!(sink.write(1, 0, 0, b"tile").is_err());

    let _ = fs::remove_file(&file);
}

#[test]
fn test_tile_path() {
    assert_eq!(tile_path(0, 0, 0), "0/0/0.mvt");
    assert_eq!(tile_path(15, 17161, 11476), "15/17161/11476.mvt");
}
