//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::{
    GeometryCollection, GeometryType, LineString, MultiPoint, Point, Polygon,
};
use tile_grid::Extent;

fn line(coords: &[(f64, f64)]) -> LineString {
    LineString {
        points: coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
    }
}

#[test]
fn test_geom_creation() {
    let g = GeometryType::Point(Point::new(960000.0, 6002729.0));
    let p = match g {
        GeometryType::Point(p) => p,
        _ => panic!(),
    };
    assert_eq!(p.x, 960000.0);
    assert_eq!(g.type_name(), "Point");
    assert!(!g.is_empty());
}

#[test]
fn test_empty() {
    assert!(GeometryType::LineString(line(&[])).is_empty());
    assert!(GeometryType::MultiPoint(MultiPoint { points: vec![] }).is_empty());
    assert!(GeometryType::GeometryCollection(GeometryCollection {
        geometries: vec![GeometryType::LineString(line(&[]))]
    })
    .is_empty());
    assert_eq!(GeometryType::LineString(line(&[])).extent(), None);
}

#[test]
fn test_extent() {
    let polygon = GeometryType::Polygon(Polygon {
        rings: vec![
            line(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 0.0)]),
            line(&[(1.0, -1.0), (2.0, 1.0), (1.0, -1.0)]),
        ],
    });
    assert_eq!(
        polygon.extent(),
        Some(Extent {
            minx: 0.0,
            miny: -1.0,
            maxx: 4.0,
            maxy: 3.0,
        })
    );

    let gc = GeometryType::GeometryCollection(GeometryCollection {
        geometries: vec![polygon, GeometryType::Point(Point::new(-5.0, 10.0))],
    });
    assert_eq!(
        gc.extent(),
        Some(Extent {
            minx: -5.0,
            miny: -1.0,
            maxx: 4.0,
            maxy: 10.0,
        })
    );
}

#[test]
fn test_map_points() {
    let gc = GeometryType::GeometryCollection(GeometryCollection {
        geometries: vec![
            GeometryType::Point(Point::new(1.0, 2.0)),
            GeometryType::LineString(line(&[(0.0, 0.0), (1.0, 1.0)])),
        ],
    });
    let moved = gc.map_points(&|p: &Point| Point::new(p.x + 10.0, p.y * 2.0));
    let mut points = Vec::new();
    moved.for_each_point(&mut |p: &Point| points.push(*p));
    assert_eq!(
        points,
        vec![
            Point::new(11.0, 4.0),
            Point::new(10.0, 0.0),
            Point::new(11.0, 2.0)
        ]
    );
    assert_eq!(moved.type_name(), "GeometryCollection");
}
