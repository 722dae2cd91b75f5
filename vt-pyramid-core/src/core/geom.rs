//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geometry types in geographic or projected coordinates

use tile_grid::Extent;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct MultiPoint {
    pub points: Vec<Point>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct LineString {
    pub points: Vec<Point>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct MultiLineString {
    pub lines: Vec<LineString>,
}

/// Outer ring first, holes after
#[derive(Clone, PartialEq, Debug)]
pub struct Polygon {
    pub rings: Vec<LineString>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct GeometryCollection {
    pub geometries: Vec<GeometryType>,
}

/// Generic Geometry Data Type
#[derive(Clone, PartialEq, Debug)]
pub enum GeometryType {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl GeometryType {
    pub fn is_empty(&self) -> bool {
        match self {
            &GeometryType::Point(_) => false,
            &GeometryType::LineString(ref p) => p.points.is_empty(),
            &GeometryType::Polygon(ref p) => p.rings.is_empty(),
            &GeometryType::MultiPoint(ref p) => p.points.is_empty(),
            &GeometryType::MultiLineString(ref p) => p.lines.is_empty(),
            &GeometryType::MultiPolygon(ref p) => p.polygons.is_empty(),
            &GeometryType::GeometryCollection(ref p) => p.geometries.iter().all(|g| g.is_empty()),
        }
    }
    /// GeoJSON type name
    pub fn type_name(&self) -> &'static str {
        match self {
            &GeometryType::Point(_) => "Point",
            &GeometryType::LineString(_) => "LineString",
            &GeometryType::Polygon(_) => "Polygon",
            &GeometryType::MultiPoint(_) => "MultiPoint",
            &GeometryType::MultiLineString(_) => "MultiLineString",
            &GeometryType::MultiPolygon(_) => "MultiPolygon",
            &GeometryType::GeometryCollection(_) => "GeometryCollection",
        }
    }
    /// Visit every position
    pub fn for_each_point<F>(&self, f: &mut F)
    where
        F: FnMut(&Point),
    {
        match self {
            &GeometryType::Point(ref p) => f(p),
            &GeometryType::LineString(ref l) => l.points.iter().for_each(|p| f(p)),
            &GeometryType::Polygon(ref p) => p.for_each_point(f),
            &GeometryType::MultiPoint(ref mp) => mp.points.iter().for_each(|p| f(p)),
            &GeometryType::MultiLineString(ref ml) => ml
                .lines
                .iter()
                .for_each(|l| l.points.iter().for_each(|p| f(p))),
            &GeometryType::MultiPolygon(ref mp) => {
                mp.polygons.iter().for_each(|p| p.for_each_point(f))
            }
            &GeometryType::GeometryCollection(ref gc) => {
                gc.geometries.iter().for_each(|g| g.for_each_point(f))
            }
        }
    }
    /// Same geometry with every position transformed
    pub fn map_points<F>(&self, f: &F) -> GeometryType
    where
        F: Fn(&Point) -> Point,
    {
        let map_line = |l: &LineString| LineString {
            points: l.points.iter().map(f).collect(),
        };
        let map_polygon = |p: &Polygon| Polygon {
            rings: p.rings.iter().map(map_line).collect(),
        };
        match self {
            &GeometryType::Point(ref p) => GeometryType::Point(f(p)),
            &GeometryType::LineString(ref l) => GeometryType::LineString(map_line(l)),
            &GeometryType::Polygon(ref p) => GeometryType::Polygon(map_polygon(p)),
            &GeometryType::MultiPoint(ref mp) => GeometryType::MultiPoint(MultiPoint {
                points: mp.points.iter().map(f).collect(),
            }),
            &GeometryType::MultiLineString(ref ml) => {
                GeometryType::MultiLineString(MultiLineString {
                    lines: ml.lines.iter().map(map_line).collect(),
                })
            }
            &GeometryType::MultiPolygon(ref mp) => GeometryType::MultiPolygon(MultiPolygon {
                polygons: mp.polygons.iter().map(map_polygon).collect(),
            }),
            &GeometryType::GeometryCollection(ref gc) => {
                GeometryType::GeometryCollection(GeometryCollection {
                    geometries: gc.geometries.iter().map(|g| g.map_points(f)).collect(),
                })
            }
        }
    }
    /// Bounding box of all positions, `None` for empty geometries
    pub fn extent(&self) -> Option<Extent> {
        let mut extent: Option<Extent> = None;
        self.for_each_point(&mut |p| match extent {
            Some(ref mut ext) => ext.expand(p.x, p.y),
            None => extent = Some(Extent::from_point(p.x, p.y)),
        });
        extent
    }
}

impl Polygon {
    fn for_each_point<F>(&self, f: &mut F)
    where
        F: FnMut(&Point),
    {
        for ring in &self.rings {
            ring.points.iter().for_each(|p| f(p));
        }
    }
}
