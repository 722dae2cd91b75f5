//! Web Mercator tile grid calculations
//!
//! ## Tile extents
//!
//! ```rust
//! use tile_grid::Grid;
//!
//! let grid = Grid::web_mercator();
//! let extent = grid.tile_extent_xyz(0, 0, 0);
//! assert_eq!(extent.minx, -extent.maxx);
//! ```
//!
//! ## Tile ranges covering a geographic bounding box
//!
//! ```rust
//! use tile_grid::{Extent, Grid, GridIterator};
//!
//! let grid = Grid::web_mercator();
//! let bbox = Extent { minx: 5.9, miny: 45.8, maxx: 10.5, maxy: 47.8 };
//! let limits = grid.tile_limits(&bbox, 4);
//! for (z, x, y) in GridIterator::new(0, 4, limits) {
//!     println!("Tile {}/{}/{}", z, x, y);
//! }
//! ```

mod grid;
mod grid_iterator;

pub use grid::{
    extent_wgs84_to_merc, lonlat_to_merc, Extent, ExtentInt, Grid, MAX_LATITUDE, MAX_ZOOM,
};
pub use grid_iterator::GridIterator;
