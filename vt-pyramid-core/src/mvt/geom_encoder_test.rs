//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::screen;
use crate::mvt::geom_encoder::EncodableGeom;
use crate::mvt::vector_tile::GeomType;

#[test]
fn test_geom_encoding() {
    let point = screen::Point::new(25, 17);
    assert_eq!(point.encode().0, &[9, 50, 34]);

    let multipoint = screen::MultiPoint {
        points: vec![screen::Point::new(5, 7), screen::Point::new(3, 2)],
    };
    assert_eq!(multipoint.encode().0, &[17, 10, 14, 3, 9]);

    let linestring = screen::LineString {
        points: vec![
            screen::Point::new(2, 2),
            screen::Point::new(2, 10),
            screen::Point::new(10, 10),
        ],
    };
    assert_eq!(linestring.encode().0, &[9, 4, 4, 18, 0, 16, 16, 0]);

    let multilinestring = screen::MultiLineString {
        lines: vec![
            screen::LineString {
                points: vec![
                    screen::Point::new(2, 2),
                    screen::Point::new(2, 10),
                    screen::Point::new(10, 10),
                ],
            },
            screen::LineString {
                points: vec![screen::Point::new(1, 1), screen::Point::new(3, 5)],
            },
        ],
    };
    assert_eq!(
        multilinestring.encode().0,
        &[9, 4, 4, 18, 0, 16, 16, 0, 9, 17, 17, 10, 4, 8]
    );

    let polygon = screen::Polygon {
        rings: vec![screen::LineString {
            points: vec![
                screen::Point::new(3, 6),
                screen::Point::new(8, 12),
                screen::Point::new(20, 34),
                screen::Point::new(3, 6),
            ],
        }],
    };
    assert_eq!(polygon.encode().0, &[9, 6, 12, 18, 10, 12, 24, 44, 15]);

    let multipolygon = screen::MultiPolygon {
        polygons: vec![
            screen::Polygon {
                rings: vec![screen::LineString {
                    points: vec![
                        screen::Point::new(0, 0),
                        screen::Point::new(10, 0),
                        screen::Point::new(10, 10),
                        screen::Point::new(0, 10),
                        screen::Point::new(0, 0),
                    ],
                }],
            },
            screen::Polygon {
                rings: vec![
                    screen::LineString {
                        points: vec![
                            screen::Point::new(11, 11),
                            screen::Point::new(20, 11),
                            screen::Point::new(20, 20),
                            screen::Point::new(11, 20),
                            screen::Point::new(11, 20),
                            screen::Point::new(11, 11),
                        ],
                    },
                    screen::LineString {
                        points: vec![
                            screen::Point::new(13, 13),
                            screen::Point::new(13, 17),
                            screen::Point::new(17, 17),
                            screen::Point::new(17, 13),
                            screen::Point::new(13, 13),
                        ],
                    },
                ],
            },
        ],
    };
    let expected = [
        9, 0, 0, 26, 20, 0, 0, 20, 19, 0, 15, 9, 22, 2, 34, 18, 0, 0, 18, 17, 0, 0, 0, 15, 9, 4,
        13, 26, 0, 8, 8, 0, 0, 7, 15,
    ];
    assert_eq!(multipolygon.encode().0, &expected[0..35]);
}

#[test]
fn test_overflow() {
    use std::i32;
    use std::u32;

    assert_eq!(i32::MIN, -2147483648);
    assert_eq!(i32::MAX, 2147483647);
    assert_eq!(u32::MAX, 4294967295);

    let multipoint = screen::MultiPoint {
        points: vec![
            screen::Point::new(5, 7),
            screen::Point {
                x: i32::MIN,
                y: i32::MIN,
            },
        ],
    };
    assert_eq!(multipoint.encode().0, &[17, 10, 14, u32::MAX, u32::MAX]);

    let multipoint = screen::MultiPoint {
        points: vec![
            screen::Point::new(-5, -10),
            screen::Point {
                x: i32::MAX,
                y: i32::MAX,
            },
        ],
    };
    assert_eq!(
        multipoint.encode().0,
        &[17, 9, 19, u32::MAX - 1, u32::MAX - 1]
    );
}

#[test]
fn test_geometry_dispatch() {
    let line = screen::LineString {
        points: vec![screen::Point::new(2, 2), screen::Point::new(2, 10)],
    };
    let geom = screen::Geometry::LineString(line.clone());
    assert_eq!(geom.encode().0, line.encode().0);
    assert_eq!(geom.mvt_geom_type(), GeomType::Linestring);

    let geom = screen::Geometry::MultiPoint(screen::MultiPoint {
        points: vec![screen::Point::new(5, 7)],
    });
    assert_eq!(geom.encode().into_vec(), vec![9, 10, 14]);
    assert_eq!(geom.mvt_geom_type(), GeomType::Point);

    let geom = screen::Geometry::MultiPolygon(screen::MultiPolygon { polygons: vec![] });
    assert_eq!(geom.mvt_geom_type(), GeomType::Polygon);
    assert!(geom.encode().is_empty());
}

#[test]
fn test_degenerate_parts() {
    // parts without enough points are skipped and don't move the cursor
    let multilinestring = screen::MultiLineString {
        lines: vec![
            screen::LineString {
                points: vec![screen::Point::new(7, 7)],
            },
            screen::LineString {
                points: vec![screen::Point::new(1, 1), screen::Point::new(3, 5)],
            },
        ],
    };
    assert_eq!(multilinestring.encode().0, &[9, 2, 2, 10, 4, 8]);

    let polygon = screen::Polygon {
        rings: vec![
            screen::LineString {
                points: vec![
                    screen::Point::new(3, 6),
                    screen::Point::new(8, 12),
                    screen::Point::new(3, 6),
                ],
            },
            screen::LineString {
                points: vec![
                    screen::Point::new(3, 6),
                    screen::Point::new(8, 12),
                    screen::Point::new(20, 34),
                    screen::Point::new(3, 6),
                ],
            },
        ],
    };
    assert_eq!(polygon.encode().0, &[9, 6, 12, 18, 10, 12, 24, 44, 15]);

    let empty = screen::MultiPoint { points: vec![] };
    assert!(empty.encode().is_empty());
}
