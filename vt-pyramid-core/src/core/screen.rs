//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geometry types in screen coordinates

use std::vec::Vec;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
    pub fn origin() -> Point {
        Point { x: 0, y: 0 }
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

/// Closed rings, outer ring first
#[derive(Clone, PartialEq, Debug)]
pub struct Polygon {
    pub rings: Vec<LineString>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

/// Geometry in tile coordinates, ready for encoding
#[derive(Clone, PartialEq, Debug)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl LineString {
    /// Twice the signed area (shoelace). Positive is clockwise with y pointing down.
    pub fn signed_area2(&self) -> f64 {
        let pts = &self.points;
        if pts.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            sum += pts[j].x as f64 * pts[i].y as f64 - pts[i].x as f64 * pts[j].y as f64;
            j = i;
        }
        sum
    }

    /// Reverse point order if the winding differs from `clockwise`
    pub fn orient(&mut self, clockwise: bool) {
        let area = self.signed_area2();
        if area != 0.0 && (area > 0.0) != clockwise {
            self.points.reverse();
        }
    }
}
