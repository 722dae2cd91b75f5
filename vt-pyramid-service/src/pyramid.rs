//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::layer_set::LayerSet;
use pbr::ProgressBar;
use std::fmt;
use std::io::Stdout;
use tile_grid::{Extent, ExtentInt, Grid, GridIterator};
use vt_pyramid_core::core::centroid::centroid_features;
use vt_pyramid_core::core::feature::FeatureCollection;
use vt_pyramid_core::core::stats::Statistics;
use vt_pyramid_core::core::PyramidConfig;
use vt_pyramid_core::index::{FeatureIndex, GeometryIndex};
use vt_pyramid_core::storage::TileSink;

/// Tile counts of one zoom level
#[derive(Clone, PartialEq, Debug)]
pub struct LevelSummary {
    pub zoom: u8,
    /// Tiles within the dataset bounds
    pub candidates: u64,
    pub written: u64,
    pub encode_failures: u64,
    pub write_failures: u64,
}

impl LevelSummary {
    fn new(zoom: u8, candidates: u64) -> LevelSummary {
        LevelSummary {
            zoom,
            candidates,
            written: 0,
            encode_failures: 0,
            write_failures: 0,
        }
    }
}

#[derive(Default, Debug)]
pub struct PyramidSummary {
    pub levels: Vec<LevelSummary>,
    /// Tile sizes per zoom level
    pub stats: Statistics,
    /// Failed asynchronous writes, known after draining the sink
    pub remote_failures: usize,
}

impl PyramidSummary {
    pub fn candidates(&self) -> u64 {
        self.levels.iter().map(|l| l.candidates).sum()
    }
    /// Tiles stored, without asynchronous writes known to have failed
    pub fn written(&self) -> u64 {
        self.levels
            .iter()
            .map(|l| l.written)
            .sum::<u64>()
            .saturating_sub(self.remote_failures as u64)
    }
    pub fn encode_failures(&self) -> u64 {
        self.levels.iter().map(|l| l.encode_failures).sum()
    }
    pub fn write_failures(&self) -> u64 {
        self.levels.iter().map(|l| l.write_failures).sum::<u64>() + self.remote_failures as u64
    }
}

impl fmt::Display for PyramidSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Total tiles generated: {}", self.written())?;
        if self.encode_failures() > 0 {
            write!(f, "\nTiles failed to encode: {}", self.encode_failures())?;
        }
        if self.write_failures() > 0 {
            write!(f, "\nFailed tile writes: {}", self.write_failures())?;
        }
        Ok(())
    }
}

pub fn tilesize_key(zoom: u8) -> String {
    format!("tilesize.z{:02}", zoom)
}

/// Log line of a finished zoom level
pub fn level_report(level: &LevelSummary, stats: &Statistics) -> String {
    if level.written > 0 {
        format!(
            "Finished zoom {}, {} tiles generated ({})",
            level.zoom,
            level.written,
            stats.results(&tilesize_key(level.zoom))
        )
    } else {
        format!("Finished zoom {}, 0 tiles generated", level.zoom)
    }
}

/// Generates the tile pyramid of one or more layers
pub struct PyramidService {
    pub grid: Grid,
    layers: Vec<(String, Box<dyn GeometryIndex>)>,
    gzip: bool,
    progress: bool,
}

impl PyramidService {
    pub fn new() -> PyramidService {
        PyramidService {
            grid: Grid::web_mercator(),
            layers: Vec::new(),
            gzip: false,
            progress: false,
        }
    }

    /// Primary layer and optional centroid layer of `collection`
    pub fn from_config(config: &PyramidConfig, collection: &FeatureCollection) -> PyramidService {
        let mut service = PyramidService::new();
        service.gzip = config.output.gzip;
        service.progress = config.progress;
        let index = FeatureIndex::build(collection, config.index.clone());
        info!("Layer '{}': {} features", config.layer, index.len());
        service.add_layer(&config.layer, Box::new(index));
        if let Some(ref name) = config.centroids_layer {
            let centroids = centroid_features(collection);
            let index = FeatureIndex::build(&centroids, config.index.clone());
            info!("Layer '{}': {} centroids", name, index.len());
            service.add_layer(name, Box::new(index));
        }
        service
    }

    pub fn add_layer(&mut self, name: &str, index: Box<dyn GeometryIndex>) {
        self.layers.push((name.to_string(), index));
    }

    pub fn set_gzip(&mut self, gzip: bool) {
        self.gzip = gzip;
    }

    pub fn set_progress(&mut self, progress: bool) {
        self.progress = progress;
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Layers of tile (zoom, xtile, ytile)
    pub fn layer_set(&self, zoom: u8, xtile: u32, ytile: u32) -> LayerSet {
        let mut layers = LayerSet::new();
        for (name, index) in &self.layers {
            layers.push(name, index.tile(zoom, xtile, ytile));
        }
        layers
    }

    fn progress_bar(&self, msg: &str, limits: &ExtentInt) -> ProgressBar<Stdout> {
        let mut pb = ProgressBar::new(limits.cell_count());
        pb.message(msg);
        pb.show_speed = false;
        pb.show_percent = false;
        pb.show_time_left = false;
        pb
    }

    fn finish_level(&self, level: LevelSummary, summary: &mut PyramidSummary) {
        info!("{}", level_report(&level, &summary.stats));
        summary.levels.push(level);
    }

    /// Generate tiles of all levels `0..=maxzoom` within the geographic bounding box `bbox`
    pub fn generate<S: TileSink>(&self, bbox: &Extent, maxzoom: u8, sink: &S) -> PyramidSummary {
        info!("{}", sink.info());
        let limits = self.grid.tile_limits(bbox, maxzoom);
        let maxzoom = (limits.len() - 1) as u8;
        debug!("tile limits: {:?}", limits);
        let mut summary = PyramidSummary::default();
        let mut level: Option<LevelSummary> = None;
        let mut pb = ProgressBar::new(0);
        let griditer = GridIterator::new(0, maxzoom, limits.clone());
        for (zoom, xtile, ytile) in griditer {
            if level.as_ref().map(|l| l.zoom) != Some(zoom) {
                if let Some(done) = level.take() {
                    if self.progress {
                        pb.finish_println("");
                    }
                    self.finish_level(done, &mut summary);
                }
                let ref limit = limits[zoom as usize];
                info!("Zoom {}, {} candidate tiles", zoom, limit.cell_count());
                level = Some(LevelSummary::new(zoom, limit.cell_count()));
                if self.progress {
                    pb = self.progress_bar(&format!("Level {}: ", zoom), &limit);
                    pb.tick();
                }
            }
            if self.progress {
                pb.inc();
            }
            let current = match level.as_mut() {
                Some(current) => current,
                None => continue,
            };

            let layers = self.layer_set(zoom, xtile, ytile);
            if layers.is_empty() {
                continue;
            }
            let data = match layers.encode(self.gzip) {
                Ok(Some(data)) => data,
                Ok(None) => {
                    error!("Tile {}/{}/{}: no encodable features", zoom, xtile, ytile);
                    current.encode_failures += 1;
                    continue;
                }
                Err(e) => {
                    error!("Error encoding tile {}/{}/{}: {}", zoom, xtile, ytile, e);
                    current.encode_failures += 1;
                    continue;
                }
            };
            debug!(
                "Tile {}/{}/{}: layers {:?}, {} bytes",
                zoom,
                xtile,
                ytile,
                layers.names(),
                data.len()
            );
            match sink.write(zoom, xtile, ytile, &data) {
                Ok(_) => {
                    current.written += 1;
                    summary.stats.add(&tilesize_key(zoom), data.len() as u64);
                }
                Err(e) => {
                    error!("Error writing tile {}/{}/{}: {}", zoom, xtile, ytile, e);
                    current.write_failures += 1;
                }
            }
        }
        if let Some(done) = level.take() {
            if self.progress {
                pb.finish_println("");
            }
            self.finish_level(done, &mut summary);
        }
        summary
    }
}
