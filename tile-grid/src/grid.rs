//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//!Web Mercator tile grid

use std::f64::consts;

/// Highest zoom level supported by the grid
pub const MAX_ZOOM: u8 = 24;

/// Latitude limit of the Web Mercator projection
pub const MAX_LATITUDE: f64 = 85.0511287798066;

const EARTH_RADIUS: f64 = 6378137.0;

/// Half of the Web Mercator world width in meters
const MERC_MAX: f64 = 20037508.3427892480;

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    /// Extent of a single position
    pub fn from_point(x: f64, y: f64) -> Extent {
        Extent {
            minx: x,
            miny: y,
            maxx: x,
            maxy: y,
        }
    }
    /// Grow extent to include the position
    pub fn expand(&mut self, x: f64, y: f64) {
        self.minx = self.minx.min(x);
        self.miny = self.miny.min(y);
        self.maxx = self.maxx.max(x);
        self.maxy = self.maxy.max(y);
    }
    /// Grow extent to include `other`
    pub fn merge(&mut self, other: &Extent) {
        self.expand(other.minx, other.miny);
        self.expand(other.maxx, other.maxy);
    }
    /// Extent grown by `dx`/`dy` on each side
    pub fn buffered(&self, dx: f64, dy: f64) -> Extent {
        Extent {
            minx: self.minx - dx,
            miny: self.miny - dy,
            maxx: self.maxx + dx,
            maxy: self.maxy + dy,
        }
    }
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
}

/// Min and max grid cell numbers, both inclusive
#[derive(PartialEq, Clone, Debug)]
pub struct ExtentInt {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

impl ExtentInt {
    pub fn contains(&self, xtile: u32, ytile: u32) -> bool {
        xtile >= self.minx && xtile <= self.maxx && ytile >= self.miny && ytile <= self.maxy
    }
    /// Number of cells covered
    pub fn cell_count(&self) -> u64 {
        (self.maxx as u64 - self.minx as u64 + 1) * (self.maxy as u64 - self.miny as u64 + 1)
    }
}

/// Web Mercator tile grid with XYZ addressing (origin top left)
#[derive(Clone, Debug)]
pub struct Grid {
    /// The width and height of an individual tile, in pixels.
    tile_size: u16,
    /// The projected extent covered by the grid, in meters.
    pub extent: Extent,
    /// Meters per pixel for each zoom level, level 0 first.
    resolutions: Vec<f64>,
}

impl Grid {
    /// Web Mercator grid with 256x256 pixel tiles (Google maps compatible)
    pub fn web_mercator() -> Grid {
        Grid::new(256)
    }

    pub fn new(tile_size: u16) -> Grid {
        let extent = Extent {
            minx: -MERC_MAX,
            miny: -MERC_MAX,
            maxx: MERC_MAX,
            maxy: MERC_MAX,
        };
        let resolutions = (0..=MAX_ZOOM)
            .map(|zoom| extent.width() / (tile_size as f64 * (zoom as f64).exp2()))
            .collect();
        Grid {
            tile_size,
            extent,
            resolutions,
        }
    }
    pub fn tile_size(&self) -> u16 {
        self.tile_size
    }
    pub fn nlevels(&self) -> u8 {
        self.resolutions.len() as u8
    }
    pub fn maxzoom(&self) -> u8 {
        self.nlevels() - 1
    }
    /// Pixel width in meters
    pub fn pixel_width(&self, zoom: u8) -> f64 {
        self.resolutions[zoom as usize]
    }
    /// Number of tiles in each direction
    pub fn level_limit(&self, zoom: u8) -> u32 {
        1u32 << zoom
    }
    /// Projected extent of a given tile in XYZ adressing scheme
    pub fn tile_extent_xyz(&self, xtile: u32, ytile: u32, zoom: u8) -> Extent {
        let tile_width = self.resolutions[zoom as usize] * self.tile_size as f64;
        Extent {
            minx: self.extent.minx + tile_width * xtile as f64,
            miny: self.extent.maxy - tile_width * (ytile as f64 + 1.0),
            maxx: self.extent.minx + tile_width * (xtile as f64 + 1.0),
            maxy: self.extent.maxy - tile_width * ytile as f64,
        }
    }
    /// Global pixel position of a (lon, lat) position at zoom level
    pub fn lonlat_to_px(&self, lon: f64, lat: f64, zoom: u8) -> (f64, f64) {
        let size = self.tile_size as f64 * (zoom as f64).exp2();
        let center = size / 2.0;
        let f = lat.to_radians().sin().max(-0.9999).min(0.9999);
        let x = (center + lon * size / 360.0).round();
        let y = (center - 0.5 * ((1.0 + f) / (1.0 - f)).ln() * size / (2.0 * consts::PI)).round();
        (x.min(size), y.min(size))
    }
    /// Tile index range covering a (lon, lat) bounding box at zoom level
    pub fn xyz_bounds(&self, bbox: &Extent, zoom: u8) -> ExtentInt {
        let size = self.tile_size as f64;
        let (llx, lly) = self.lonlat_to_px(bbox.minx, bbox.miny, zoom);
        let (urx, ury) = self.lonlat_to_px(bbox.maxx, bbox.maxy, zoom);
        // y = 0 is the top row, so the upper right corner gives the first row
        let xs = ((llx / size).floor(), ((urx - 1.0) / size).floor());
        let ys = ((ury / size).floor(), ((lly - 1.0) / size).floor());
        let last = (self.level_limit(zoom) - 1) as f64;
        let clamp = |v: f64| v.max(0.0).min(last) as u32;
        ExtentInt {
            minx: clamp(xs.0.min(xs.1)),
            miny: clamp(ys.0.min(ys.1)),
            maxx: clamp(xs.0.max(xs.1)),
            maxy: clamp(ys.0.max(ys.1)),
        }
    }
    /// Tile index limits covering a (lon, lat) bounding box for levels `0..=maxzoom`
    pub fn tile_limits(&self, bbox: &Extent, maxzoom: u8) -> Vec<ExtentInt> {
        (0..=maxzoom.min(self.maxzoom()))
            .map(|zoom| self.xyz_bounds(bbox, zoom))
            .collect()
    }
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.max(-MAX_LATITUDE).min(MAX_LATITUDE);
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Projected extent
pub fn extent_wgs84_to_merc(extent: &Extent) -> Extent {
    let (minx, miny) = lonlat_to_merc(extent.minx, extent.miny);
    let (maxx, maxy) = lonlat_to_merc(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}
