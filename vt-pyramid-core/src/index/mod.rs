//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Per tile geometry lookup

mod clip;
mod feature_index;

pub use self::feature_index::FeatureIndex;

use crate::core::feature::Properties;
use crate::core::screen;
use std::sync::Arc;

/// Tiling parameters of a geometry index
#[derive(Clone, PartialEq, Debug)]
pub struct IndexOptions {
    /// Zoom level without simplification
    pub maxzoom: u8,
    /// Douglas-Peucker simplification tolerance in tile coordinate units
    pub tolerance: f64,
    /// Tile coordinate extent
    pub extent: u32,
    /// Buffer around tiles in tile coordinate units
    pub buffer: u32,
}

impl Default for IndexOptions {
    fn default() -> IndexOptions {
        IndexOptions {
            maxzoom: 15,
            tolerance: 1.5,
            extent: 4096,
            buffer: 0,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct TileFeature {
    pub id: Option<u64>,
    pub geometry: screen::Geometry,
    /// Shared with all other tiles of the source feature
    pub properties: Arc<Properties>,
}

/// Features of one tile in tile coordinates
#[derive(Clone, PartialEq, Debug)]
pub struct TileFeatures {
    pub extent: u32,
    pub features: Vec<TileFeature>,
}

/// Geometry visible in a tile
pub trait GeometryIndex {
    /// Features of tile (zoom, x, y), `None` if the tile is empty
    fn tile(&self, zoom: u8, x: u32, y: u32) -> Option<TileFeatures>;
}
