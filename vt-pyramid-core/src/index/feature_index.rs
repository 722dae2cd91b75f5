//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::feature::{FeatureCollection, Properties};
use crate::core::geom::{self, GeometryType};
use crate::core::screen;
use crate::index::clip::{clip_line, clip_ring, contains};
use crate::index::{GeometryIndex, IndexOptions, TileFeature, TileFeatures};
use geo::{Coord, LineString as GeoLineString, Simplify};
use rstar::{Envelope, RTree, RTreeObject, AABB};
use std::sync::Arc;
use tile_grid::{lonlat_to_merc, Extent, Grid};

/// Feature in web mercator coordinates
struct IndexedFeature {
    id: Option<u64>,
    geometry: GeometryType,
    properties: Arc<Properties>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree of projected features, clipped and simplified into tiles on request
pub struct FeatureIndex {
    tree: RTree<IndexedFeature>,
    grid: Grid,
    options: IndexOptions,
}

impl FeatureIndex {
    pub fn build(collection: &FeatureCollection, options: IndexOptions) -> FeatureIndex {
        let mut features = Vec::with_capacity(collection.len());
        for feature in &collection.features {
            if let Some(ref geometry) = feature.geometry {
                let properties = Arc::new(feature.properties.clone());
                let projected = geometry.map_points(&|p: &geom::Point| {
                    let (x, y) = lonlat_to_merc(p.x, p.y);
                    geom::Point::new(x, y)
                });
                flatten(projected, feature.id, &properties, &mut features);
            }
        }
        debug!("Indexed {} features", features.len());
        FeatureIndex {
            tree: RTree::bulk_load(features),
            grid: Grid::web_mercator(),
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }
}

fn flatten(
    geometry: GeometryType,
    id: Option<u64>,
    properties: &Arc<Properties>,
    features: &mut Vec<IndexedFeature>,
) {
    if let GeometryType::GeometryCollection(gc) = geometry {
        for member in gc.geometries {
            flatten(member, id, properties, features);
        }
        return;
    }
    if let Some(extent) = geometry.extent() {
        features.push(IndexedFeature {
            id,
            geometry,
            properties: properties.clone(),
            envelope: AABB::from_corners([extent.minx, extent.miny], [extent.maxx, extent.maxy]),
        });
    }
}

impl GeometryIndex for FeatureIndex {
    fn tile(&self, zoom: u8, x: u32, y: u32) -> Option<TileFeatures> {
        let tile_extent = self.grid.tile_extent_xyz(x, y, zoom);
        let buffer = tile_extent.width() * self.options.buffer as f64 / self.options.extent as f64;
        let query_extent = tile_extent.buffered(buffer, buffer);
        let envelope = AABB::from_corners(
            [query_extent.minx, query_extent.miny],
            [query_extent.maxx, query_extent.maxy],
        );
        let transform = TileTransform {
            tile_extent,
            query_extent,
            extent: self.options.extent,
            tolerance: if zoom >= self.options.maxzoom {
                0.0
            } else {
                self.options.tolerance
            },
        };
        let features: Vec<TileFeature> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|feature| {
                let clip = !envelope.contains_envelope(&feature.envelope);
                transform
                    .geometry(&feature.geometry, clip)
                    .map(|geometry| TileFeature {
                        id: feature.id,
                        geometry,
                        properties: feature.properties.clone(),
                    })
            })
            .collect();
        if features.is_empty() {
            None
        } else {
            Some(TileFeatures {
                extent: self.options.extent,
                features,
            })
        }
    }
}

/// Projected to tile coordinates of one tile
struct TileTransform {
    tile_extent: Extent,
    /// Tile extent including buffer
    query_extent: Extent,
    extent: u32,
    /// Douglas-Peucker tolerance in tile units, 0 disables simplification
    tolerance: f64,
}

impl TileTransform {
    fn coord(&self, p: &geom::Point) -> Coord<f64> {
        let scale = self.extent as f64 / self.tile_extent.width();
        Coord {
            x: (p.x - self.tile_extent.minx) * scale,
            y: (self.tile_extent.maxy - p.y) * scale,
        }
    }

    fn point(&self, p: &geom::Point) -> screen::Point {
        let c = self.coord(p);
        screen::Point::new(c.x.round() as i32, c.y.round() as i32)
    }

    /// Simplified and rounded vertices without consecutive duplicates
    fn points(&self, points: &[geom::Point]) -> Vec<screen::Point> {
        let coords: Vec<Coord<f64>> = points.iter().map(|p| self.coord(p)).collect();
        let coords = if self.tolerance > 0.0 && coords.len() > 2 {
            GeoLineString::from(coords).simplify(&self.tolerance).0
        } else {
            coords
        };
        let mut result: Vec<screen::Point> = coords
            .iter()
            .map(|c| screen::Point::new(c.x.round() as i32, c.y.round() as i32))
            .collect();
        result.dedup();
        result
    }

    fn lines(&self, line: &geom::LineString, clip: bool) -> Vec<screen::LineString> {
        let parts = if clip {
            clip_line(&line.points, &self.query_extent)
        } else {
            vec![line.points.clone()]
        };
        parts
            .iter()
            .map(|part| self.points(part))
            .filter(|points| points.len() >= 2)
            .map(|points| screen::LineString { points })
            .collect()
    }

    fn ring(&self, ring: &geom::LineString, outer: bool, clip: bool) -> Option<screen::LineString> {
        let mut vertices = if clip {
            clip_ring(&ring.points, &self.query_extent)
        } else {
            ring.points.clone()
        };
        if let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) {
            if first != last {
                vertices.push(first);
            }
        }
        let points = self.points(&vertices);
        if points.len() < 4 {
            return None;
        }
        let mut ring = screen::LineString { points };
        ring.orient(outer);
        Some(ring)
    }

    fn polygon(&self, polygon: &geom::Polygon, clip: bool) -> Option<screen::Polygon> {
        let mut rings = polygon.rings.iter();
        let outer = self.ring(rings.next()?, true, clip)?;
        let mut result = screen::Polygon { rings: vec![outer] };
        result
            .rings
            .extend(rings.filter_map(|hole| self.ring(hole, false, clip)));
        Some(result)
    }

    fn geometry(&self, geometry: &GeometryType, clip: bool) -> Option<screen::Geometry> {
        match geometry {
            GeometryType::Point(p) => {
                if contains(&self.query_extent, p) {
                    Some(screen::Geometry::Point(self.point(p)))
                } else {
                    None
                }
            }
            GeometryType::MultiPoint(mp) => {
                let points: Vec<screen::Point> = mp
                    .points
                    .iter()
                    .filter(|p| contains(&self.query_extent, p))
                    .map(|p| self.point(p))
                    .collect();
                if points.is_empty() {
                    None
                } else {
                    Some(screen::Geometry::MultiPoint(screen::MultiPoint { points }))
                }
            }
            GeometryType::LineString(l) => {
                let mut lines = self.lines(l, clip);
                match lines.len() {
                    0 => None,
                    1 => lines.pop().map(screen::Geometry::LineString),
                    _ => Some(screen::Geometry::MultiLineString(screen::MultiLineString {
                        lines,
                    })),
                }
            }
            GeometryType::MultiLineString(ml) => {
                let lines: Vec<screen::LineString> =
                    ml.lines.iter().flat_map(|l| self.lines(l, clip)).collect();
                if lines.is_empty() {
                    None
                } else {
                    Some(screen::Geometry::MultiLineString(screen::MultiLineString {
                        lines,
                    }))
                }
            }
            GeometryType::Polygon(p) => self.polygon(p, clip).map(screen::Geometry::Polygon),
            GeometryType::MultiPolygon(mp) => {
                let polygons: Vec<screen::Polygon> = mp
                    .polygons
                    .iter()
                    .filter_map(|p| self.polygon(p, clip))
                    .collect();
                if polygons.is_empty() {
                    None
                } else {
                    Some(screen::Geometry::MultiPolygon(screen::MultiPolygon {
                        polygons,
                    }))
                }
            }
            // flattened when building the index
            GeometryType::GeometryCollection(_) => None,
        }
    }
}
