//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::storage::{TileSink, TILE_EXTENSION};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Tiles in a local directory tree
pub struct Filesink {
    pub basepath: PathBuf,
    /// Directories known to exist
    created: Mutex<HashSet<PathBuf>>,
}

impl Filesink {
    pub fn new(basepath: &str) -> Filesink {
        Filesink {
            basepath: PathBuf::from(basepath),
            created: Mutex::new(HashSet::new()),
        }
    }

    pub fn tile_file(&self, zoom: u8, xtile: u32, ytile: u32) -> PathBuf {
        self.basepath
            .join(zoom.to_string())
            .join(xtile.to_string())
            .join(format!("{}.{}", ytile, TILE_EXTENSION))
    }

    fn ensure_dir(&self, dir: PathBuf) -> Result<(), io::Error> {
        let mut created = self.created.lock().unwrap_or_else(|e| e.into_inner());
        if !created.contains(&dir) {
            fs::create_dir_all(&dir)?;
            created.insert(dir);
        }
        Ok(())
    }
}

impl TileSink for Filesink {
    fn info(&self) -> String {
        format!("Tile directory: {}", self.basepath.display())
    }
    fn write(&self, zoom: u8, xtile: u32, ytile: u32, data: &[u8]) -> Result<(), io::Error> {
        let fullpath = self.tile_file(zoom, xtile, ytile);
        debug!("Filesink.write {}", fullpath.display());
        if let Some(dir) = fullpath.parent() {
            self.ensure_dir(dir.to_path_buf())?;
        }
        fs::write(&fullpath, data).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", fullpath.display(), e))
        })
    }
}
