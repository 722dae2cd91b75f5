//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Clipping of projected geometries to a rectangle

use crate::core::geom::Point;
use tile_grid::Extent;

pub fn contains(ext: &Extent, p: &Point) -> bool {
    p.x >= ext.minx && p.x <= ext.maxx && p.y >= ext.miny && p.y <= ext.maxy
}

/// Parameter range `t0..t1` of segment `a`-`b` inside `ext` (Liang-Barsky)
fn clip_segment(a: &Point, b: &Point, ext: &Extent) -> Option<(f64, f64)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0;
    let mut t1 = 1.0;
    for &(p, q) in &[
        (-dx, a.x - ext.minx),
        (dx, ext.maxx - a.x),
        (-dy, a.y - ext.miny),
        (dy, ext.maxy - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }
    Some((t0, t1))
}

fn interpolate(a: &Point, b: &Point, t: f64) -> Point {
    if t <= 0.0 {
        *a
    } else if t >= 1.0 {
        *b
    } else {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

fn finish_part(parts: &mut Vec<Vec<Point>>, part: &mut Vec<Point>) {
    if part.len() >= 2 {
        parts.push(std::mem::take(part));
    } else {
        part.clear();
    }
}

/// Parts of a line inside `ext`. A line leaving and re-entering the rectangle is split.
pub fn clip_line(points: &[Point], ext: &Extent) -> Vec<Vec<Point>> {
    let mut parts = Vec::new();
    let mut part: Vec<Point> = Vec::new();
    for segment in points.windows(2) {
        let (a, b) = (&segment[0], &segment[1]);
        match clip_segment(a, b, ext) {
            Some((t0, t1)) => {
                if t0 > 0.0 || part.is_empty() {
                    finish_part(&mut parts, &mut part);
                    part.push(interpolate(a, b, t0));
                }
                part.push(interpolate(a, b, t1));
                if t1 < 1.0 {
                    finish_part(&mut parts, &mut part);
                }
            }
            None => finish_part(&mut parts, &mut part),
        }
    }
    finish_part(&mut parts, &mut part);
    parts
}

fn clip_against_edge<F, I>(vertices: &[Point], inside: F, intersect: I) -> Vec<Point>
where
    F: Fn(&Point) -> bool,
    I: Fn(&Point, &Point) -> Point,
{
    let mut output = Vec::with_capacity(vertices.len());
    for (i, current) in vertices.iter().enumerate() {
        let next = &vertices[(i + 1) % vertices.len()];
        match (inside(current), inside(next)) {
            (true, true) => output.push(*current),
            (true, false) => {
                output.push(*current);
                output.push(intersect(current, next));
            }
            (false, true) => output.push(intersect(current, next)),
            (false, false) => {}
        }
    }
    output
}

fn intersect_x(a: &Point, b: &Point, x: f64) -> Point {
    let t = (x - a.x) / (b.x - a.x);
    Point::new(x, a.y + (b.y - a.y) * t)
}

fn intersect_y(a: &Point, b: &Point, y: f64) -> Point {
    let t = (y - a.y) / (b.y - a.y);
    Point::new(a.x + (b.x - a.x) * t, y)
}

/// Ring clipped to `ext` (Sutherland-Hodgman). The result is open, empty if nothing is left.
pub fn clip_ring(points: &[Point], ext: &Extent) -> Vec<Point> {
    let mut ring = points.to_vec();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    let ring = clip_against_edge(&ring, |p| p.x >= ext.minx, |a, b| {
        intersect_x(a, b, ext.minx)
    });
    let ring = clip_against_edge(&ring, |p| p.x <= ext.maxx, |a, b| {
        intersect_x(a, b, ext.maxx)
    });
    let ring = clip_against_edge(&ring, |p| p.y >= ext.miny, |a, b| {
        intersect_y(a, b, ext.miny)
    });
    clip_against_edge(&ring, |p| p.y <= ext.maxy, |a, b| {
        intersect_y(a, b, ext.maxy)
    })
}
