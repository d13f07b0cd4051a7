use super::*;
use nalgebra::vector;

fn pts(raw: &[(i64, i64)]) -> Vec<GridPoint> {
    raw.iter().copied().map(GridPoint::from).collect()
}

#[test]
fn wrap_uses_floor_modulo() {
    assert_eq!(GridPoint::wrap(-1, 8, 8), GridPoint::new(7, 0));
    assert_eq!(GridPoint::wrap(-9, 17, 8), GridPoint::new(7, 1));
    assert_eq!(GridPoint::wrap(3, 4, 8), GridPoint::new(3, 4));
    assert_eq!(GridPoint::wrap(5, -3, 1), GridPoint::new(0, 0));
}

#[test]
fn cross_sign_and_degenerate_cases() {
    let a = GridPoint::new(0, 0);
    let b = GridPoint::new(2, 0);
    assert!(cross(a, b, GridPoint::new(2, 3)) > 0);
    assert!(cross(a, b, GridPoint::new(2, -3)) < 0);
    // straight through and doubling back are both collinear
    assert_eq!(cross(a, b, GridPoint::new(5, 0)), 0);
    assert_eq!(cross(a, b, GridPoint::new(1, 0)), 0);
    // zero-length edge
    assert_eq!(cross(a, a, b), 0);
}

#[test]
fn cross_does_not_overflow_on_widest_grid() {
    let m = i64::from(u32::MAX);
    let a = GridPoint::new(0, 0);
    let b = GridPoint::new(m, 0);
    let c = GridPoint::new(m, m);
    assert_eq!(cross(a, b, c), i128::from(m) * i128::from(m));
    assert_eq!(cross(c, b, a), -i128::from(m) * i128::from(m));
    let path = ClosedPath::close(vec![a, b, c], u32::MAX);
    assert!(matches!(path, Err(PathDefect::OutOfBounds { index: 1, .. })));
    let inside = m - 1;
    let ok = ClosedPath::close(
        vec![a, GridPoint::new(inside, 0), GridPoint::new(inside, inside)],
        u32::MAX,
    )
    .unwrap();
    assert!(!ok.closing_is_collinear());
}

#[test]
fn close_appends_first_vertex() {
    let p = ClosedPath::close(pts(&[(0, 0), (3, 1), (1, 4)]), 8).unwrap();
    assert_eq!(p.num_vertices(), 3);
    assert_eq!(p.points().len(), 4);
    assert_eq!(p.points()[0], p.points()[3]);
    assert_eq!(p.vertices(), &pts(&[(0, 0), (3, 1), (1, 4)])[..]);
    assert_eq!(p.edges().count(), 3);
    assert_eq!(
        p.first_edge(),
        Some((GridPoint::new(0, 0), GridPoint::new(3, 1)))
    );
    assert_eq!(p.edges().last(), Some((GridPoint::new(1, 4), GridPoint::new(0, 0))));
}

#[test]
fn close_rejects_each_defect() {
    assert_eq!(ClosedPath::close(vec![], 8), Err(PathDefect::TooShort));
    assert_eq!(
        ClosedPath::close(pts(&[(0, 0), (8, 1)]), 8),
        Err(PathDefect::OutOfBounds {
            index: 1,
            point: GridPoint::new(8, 1)
        })
    );
    assert_eq!(
        ClosedPath::close(pts(&[(0, 0), (1, 1), (1, 1)]), 8),
        Err(PathDefect::ZeroLengthEdge { index: 1 })
    );
    assert_eq!(
        ClosedPath::close(pts(&[(0, 0), (1, 1), (3, 3), (0, 5)]), 8),
        Err(PathDefect::Collinear { index: 1 })
    );
    assert_eq!(
        ClosedPath::close(pts(&[(0, 0), (2, 1), (4, 0), (2, 3), (2, 1), (6, 6)]), 8),
        Err(PathDefect::Repeated {
            index: 4,
            point: GridPoint::new(2, 1)
        })
    );
}

#[test]
fn closing_edge_is_exempt_from_turn_rule() {
    // (3,0) -> (0,0) -> (1,0) goes straight through the start vertex.
    let p = ClosedPath::close(pts(&[(0, 0), (1, 0), (2, 2), (3, 0)]), 8).unwrap();
    assert!(p.closing_is_collinear());

    let q = ClosedPath::close(pts(&[(0, 0), (3, 1), (1, 4)]), 8).unwrap();
    assert!(!q.closing_is_collinear());
}

#[test]
fn tiny_paths_are_valid_but_degenerate() {
    let single = ClosedPath::close(pts(&[(4, 4)]), 8).unwrap();
    assert_eq!(single.points(), &pts(&[(4, 4), (4, 4)])[..]);
    assert!(single.closing_is_collinear());

    let pair = ClosedPath::close(pts(&[(4, 4), (1, 2)]), 8).unwrap();
    assert_eq!(pair.points().len(), 3);
    assert!(pair.closing_is_collinear());
}

#[test]
fn canvas_mapping_scales_from_origin() {
    let origin = vector![302.0, 972.0];
    let p = GridPoint::new(3, 5);
    let c = p.to_canvas(origin, 100.0);
    assert_eq!(c, vector![602.0, 1472.0]);

    let path = ClosedPath::close(pts(&[(0, 0), (3, 1), (1, 4)]), 8).unwrap();
    let poly = path.to_canvas(origin, 100.0);
    assert_eq!(poly.len(), 4);
    assert_eq!(poly[0], origin);
    assert_eq!(poly[0], poly[3]);
}

#[test]
fn path_serializes_points_in_order() {
    let path = ClosedPath::close(pts(&[(0, 0), (3, 1), (1, 4)]), 8).unwrap();
    let json = serde_json::to_value(&path).unwrap();
    assert_eq!(json["grid_size"], 8);
    assert_eq!(json["points"][1]["x"], 3);
    assert_eq!(json["points"][3], json["points"][0]);
}
