//! Breakline splitting.
//!
//! Inserting a breakline piece into one triangle happens in two pure steps:
//!
//! 1. [`TouchDistances::measure`] and [`classify`] turn the piece into a [`BreaklineCase`]
//!    from the distances of its two ends to the triangle's corners and edges.
//! 2. [`split_segment`] (or [`split_point`] for single-point intersections) produces the
//!    replacement triangles for that case.
//!
//! Neither step touches the network, so every topology case can be tested on its own.
//!
//! Ends are first passed through [`settle_endpoint`], which computes points on an edge
//! from the edge alone. Both triangles sharing an edge then agree on the new vertex.
//! [`edge_vertices`] reports the vertices a split placed on the edges of the replaced
//! triangle, so the network can split the neighbours that do not have them yet.

use crate::config::{TinOptions, Tolerances};
use crate::geometry::coordinate::{Coordinate, Orientation, angle_between, orientation};
use crate::geometry::precision::PrecisionModel;
use crate::geometry::segment::LineSegment;
use crate::geometry::triangle::Triangle;
use std::collections::HashSet;

/// Relative slack allowed between the area of a triangle and its replacements.
pub const AREA_TOLERANCE: f64 = 1e-9;

/// One end of a breakline piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `piece.p0`
    Start,
    /// `piece.p1`
    End,
}

impl Endpoint {
    /// The end named by `self` and the other end, in that order.
    #[must_use]
    pub const fn split(self, piece: &LineSegment) -> (Coordinate, Coordinate) {
        match self {
            Self::Start => (piece.p0, piece.p1),
            Self::End => (piece.p1, piece.p0),
        }
    }
}

/// Distances from one point to the nearest corner and nearest edge of a triangle.
///
/// Edge `i` runs from corner `i` to corner `i + 1`. Ties go to the lower index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Index of the nearest corner
    pub corner: usize,
    /// Distance to that corner
    pub corner_distance: f64,
    /// Index of the nearest edge
    pub edge: usize,
    /// Distance to that edge
    pub edge_distance: f64,
}

impl Touch {
    /// Measures `point` against `triangle`.
    #[must_use]
    pub fn measure(triangle: &Triangle, point: &Coordinate) -> Self {
        let mut touch = Self {
            corner: 0,
            corner_distance: triangle.corner(0).distance(point),
            edge: 0,
            edge_distance: triangle.edge(0).distance_to_point(point),
        };
        for i in 1..3 {
            let corner_distance = triangle.corner(i).distance(point);
            if corner_distance < touch.corner_distance {
                touch.corner = i;
                touch.corner_distance = corner_distance;
            }
            let edge_distance = triangle.edge(i).distance_to_point(point);
            if edge_distance < touch.edge_distance {
                touch.edge = i;
                touch.edge_distance = edge_distance;
            }
        }
        touch
    }
}

/// The six distances that decide how a breakline piece splits a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchDistances {
    /// Measurements for `piece.p0`
    pub start: Touch,
    /// Measurements for `piece.p1`
    pub end: Touch,
}

impl TouchDistances {
    /// Measures both ends of `piece` against `triangle`.
    #[must_use]
    pub fn measure(triangle: &Triangle, piece: &LineSegment) -> Self {
        Self {
            start: Touch::measure(triangle, &piece.p0),
            end: Touch::measure(triangle, &piece.p1),
        }
    }
}

/// How a breakline piece meets a triangle.
///
/// `from` always names the end that touches the corner or edge in the variant name;
/// the other end is the one that lies further inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreaklineCase {
    /// Both ends touch the same corner; nothing to split
    SameCorner,
    /// The ends touch two different corners
    TwoCorners {
        /// Corner touched by the start
        start_corner: usize,
        /// Corner touched by the end
        end_corner: usize,
    },
    /// One end touches a corner, the other lies on or near an edge
    CornerToEdge {
        /// Touched corner
        corner: usize,
        /// End touching the corner
        from: Endpoint,
        /// Edge nearest the other end
        edge: usize,
    },
    /// One end touches a corner, the other is inside
    CornerToInterior {
        /// Touched corner
        corner: usize,
        /// End touching the corner
        from: Endpoint,
    },
    /// Both ends touch the same edge
    SameEdge {
        /// Touched edge
        edge: usize,
    },
    /// The start touches edge `edge`, the end touches edge `edge + 1`
    EdgeToNextEdge {
        /// Edge touched by the start
        edge: usize,
    },
    /// The start touches edge `edge`, the end touches edge `edge + 2`
    EdgeToPreviousEdge {
        /// Edge touched by the start
        edge: usize,
    },
    /// One end touches an edge, the other is inside
    EdgeToInterior {
        /// Touched edge
        edge: usize,
        /// End touching the edge
        from: Endpoint,
    },
    /// Both ends are inside
    Contained {
        /// Corner nearest to the `from` end
        corner: usize,
        /// End nearer to its nearest corner
        from: Endpoint,
    },
}

/// Maps the six distances to a case. Checks run in a fixed order so that ends close
/// to several features resolve the same way every time.
#[must_use]
pub fn classify(distances: &TouchDistances, tolerances: &Tolerances) -> BreaklineCase {
    let start = &distances.start;
    let end = &distances.end;

    if start.corner_distance < tolerances.touch {
        if end.corner_distance < tolerances.touch {
            if start.corner == end.corner {
                BreaklineCase::SameCorner
            } else {
                BreaklineCase::TwoCorners {
                    start_corner: start.corner,
                    end_corner: end.corner,
                }
            }
        } else if end.edge_distance < tolerances.edge_near {
            BreaklineCase::CornerToEdge {
                corner: start.corner,
                from: Endpoint::Start,
                edge: end.edge,
            }
        } else {
            BreaklineCase::CornerToInterior {
                corner: start.corner,
                from: Endpoint::Start,
            }
        }
    } else if end.corner_distance < tolerances.touch {
        if start.edge_distance < tolerances.edge_near {
            BreaklineCase::CornerToEdge {
                corner: end.corner,
                from: Endpoint::End,
                edge: start.edge,
            }
        } else {
            BreaklineCase::CornerToInterior {
                corner: end.corner,
                from: Endpoint::End,
            }
        }
    } else if start.edge_distance < tolerances.touch {
        if end.edge_distance < tolerances.touch {
            match (end.edge + 3 - start.edge) % 3 {
                0 => BreaklineCase::SameEdge { edge: start.edge },
                1 => BreaklineCase::EdgeToNextEdge { edge: start.edge },
                _ => BreaklineCase::EdgeToPreviousEdge { edge: start.edge },
            }
        } else {
            BreaklineCase::EdgeToInterior {
                edge: start.edge,
                from: Endpoint::Start,
            }
        }
    } else if end.edge_distance < tolerances.touch {
        BreaklineCase::EdgeToInterior {
            edge: end.edge,
            from: Endpoint::End,
        }
    } else if start.corner_distance <= end.corner_distance {
        BreaklineCase::Contained {
            corner: start.corner,
            from: Endpoint::Start,
        }
    } else {
        BreaklineCase::Contained {
            corner: end.corner,
            from: Endpoint::End,
        }
    }
}

/// Edge `edge` of `triangle`, walked from its lexicographically smaller end.
fn canonical_edge(triangle: &Triangle, edge: usize) -> LineSegment {
    let segment = triangle.edge(edge);
    if (segment.p0.x, segment.p0.y) <= (segment.p1.x, segment.p1.y) {
        segment
    } else {
        segment.reversed()
    }
}

/// Planar distance below which a point counts as lying on `edge`.
fn on_edge_slack(edge: &LineSegment) -> f64 {
    AREA_TOLERANCE * edge.length().max(1.0)
}

/// Moves `point` onto edge `edge` of `triangle`, keeping its elevation.
///
/// The edge is walked from its lexicographically smaller end so both triangles sharing
/// the edge compute the same position.
#[must_use]
pub fn project_onto_edge(triangle: &Triangle, edge: usize, point: &Coordinate) -> Coordinate {
    let on_edge = canonical_edge(triangle, edge).closest_point(point);
    Coordinate::new(on_edge.x, on_edge.y, point.z)
}

/// Where `breakline` crosses edge `edge`, rounded to the x/y grid and put back on the edge.
///
/// Only the edge and the breakline enter the computation unless they are parallel or
/// the crossing is not near `point`; then `point` is projected instead.
fn edge_crossing(
    triangle: &Triangle,
    edge: usize,
    breakline: &LineSegment,
    point: &Coordinate,
    options: &TinOptions,
) -> Coordinate {
    let canonical = canonical_edge(triangle, edge);
    let rx = canonical.p1.x - canonical.p0.x;
    let ry = canonical.p1.y - canonical.p0.y;
    let sx = breakline.p1.x - breakline.p0.x;
    let sy = breakline.p1.y - breakline.p0.y;
    let cross = rx.mul_add(sy, -(ry * sx));
    let parallel = cross.abs() <= AREA_TOLERANCE * canonical.length() * breakline.length();

    let crossing = if parallel {
        None
    } else {
        canonical
            .line_intersection_factor(breakline)
            .map(|t| canonical.point_along(t.clamp(0.0, 1.0)))
            .filter(|crossing| crossing.distance(point) < options.tolerances.touch)
    }
    .unwrap_or_else(|| canonical.closest_point(point));
    canonical.closest_point(&options.xy_precision.make_precise_xy(&crossing))
}

/// Settles one end of a clipped breakline piece before it is classified.
///
/// An end touching a corner becomes that corner, unchanged. An end touching an edge
/// becomes the crossing of `breakline` with that edge. Any other end is rounded to the
/// x/y precision, and is moved onto an edge if rounding brought it within touching
/// distance. New ends take the breakline elevation rounded to the z precision.
#[must_use]
pub fn settle_endpoint(
    triangle: &Triangle,
    breakline: &LineSegment,
    point: &Coordinate,
    options: &TinOptions,
) -> Coordinate {
    let touch_distance = options.tolerances.touch;
    let touch = Touch::measure(triangle, point);
    if touch.corner_distance < touch_distance {
        return triangle.corner(touch.corner);
    }

    let settled = if touch.edge_distance < touch_distance {
        edge_crossing(triangle, touch.edge, breakline, point, options)
    } else {
        let snapped = options.xy_precision.make_precise_xy(point);
        let again = Touch::measure(triangle, &snapped);
        if again.edge_distance < touch_distance {
            edge_crossing(triangle, again.edge, breakline, &snapped, options)
        } else {
            snapped
        }
    };

    let near = Touch::measure(triangle, &settled);
    if near.corner_distance < touch_distance {
        return triangle.corner(near.corner);
    }
    options
        .z_precision
        .make_precise_z(&settled.with_z(breakline.elevation_at(&settled)))
}

/// A vertex placed on an edge of a replaced triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVertex {
    /// The edge of the replaced triangle
    pub edge: LineSegment,
    /// The new vertex on it
    pub vertex: Coordinate,
}

/// Vertices of `replacements` that lie on an edge of `triangle` without being a corner.
///
/// A neighbour across that edge needs the same vertex, or the mesh gets a crack.
#[must_use]
pub fn edge_vertices(triangle: &Triangle, replacements: &[Triangle]) -> Vec<EdgeVertex> {
    let mut seen: HashSet<(u64, u64)> = triangle.corners().iter().map(Coordinate::xy_key).collect();
    replacements
        .iter()
        .flat_map(|replacement| replacement.corners().iter().copied())
        .filter(|vertex| seen.insert(vertex.xy_key()))
        .filter_map(|vertex| {
            (0..3).map(|i| triangle.edge(i)).find_map(|edge| {
                (edge.distance_to_point(&vertex) <= on_edge_slack(&edge))
                    .then_some(EdgeVertex { edge, vertex })
            })
        })
        .collect()
}

/// Index of the edge of `triangle` that runs along `along` and passes through `vertex`.
///
/// `None` if `vertex` is a corner of `triangle` or lies on none of its edges.
#[must_use]
pub fn edge_through(triangle: &Triangle, along: &LineSegment, vertex: &Coordinate) -> Option<usize> {
    if triangle.corner_at(vertex).is_some() {
        return None;
    }
    let slack = on_edge_slack(along);
    (0..3).find(|&i| {
        let edge = triangle.edge(i);
        along.distance_to_point(&edge.p0) <= slack
            && along.distance_to_point(&edge.p1) <= slack
            && edge.distance_to_point(vertex) <= slack
    })
}

/// The two halves of `triangle` when edge `edge` is split at `vertex`, used as given.
#[must_use]
pub fn split_edge_at(triangle: &Triangle, edge: usize, vertex: &Coordinate) -> Vec<Triangle> {
    let (start, next, opposite) = (
        triangle.corner(edge),
        triangle.corner(edge + 1),
        triangle.corner(edge + 2),
    );
    clockwise_all(&[[*vertex, next, opposite], [*vertex, opposite, start]])
}

/// Whether `replacements` cover the same area as `triangle`.
#[must_use]
pub fn conserves_area(triangle: &Triangle, replacements: &[Triangle]) -> bool {
    let original = triangle.area();
    let total: f64 = replacements.iter().map(Triangle::area).sum();
    (total - original).abs() <= AREA_TOLERANCE * original.max(1.0)
}

fn clockwise_all(corners: &[[Coordinate; 3]]) -> Vec<Triangle> {
    corners
        .iter()
        .filter_map(|[a, b, c]| Triangle::clockwise(*a, *b, *c))
        .collect()
}

/// Replacement triangles for a breakline piece that crosses `triangle` as `case`.
///
/// Corner touches reuse the existing corner; edge touches are projected onto the edge.
/// Collinear layout slots are dropped. An empty result means the triangle stays.
#[must_use]
pub fn split_segment(
    triangle: &Triangle,
    piece: &LineSegment,
    case: BreaklineCase,
) -> Vec<Triangle> {
    let c = |i: usize| triangle.corner(i);
    match case {
        BreaklineCase::SameCorner => Vec::new(),
        BreaklineCase::TwoCorners {
            start_corner,
            end_corner,
        } => {
            let other = Triangle::other_corner(start_corner, end_corner);
            clockwise_all(&[[c(start_corner), c(end_corner), c(other)]])
        }
        BreaklineCase::CornerToEdge { corner, from, edge } => {
            let (_, far) = from.split(piece);
            let point = project_onto_edge(triangle, edge, &far);
            let (at, next, prev) = (c(corner), c(corner + 1), c(corner + 2));
            match (edge + 3 - corner) % 3 {
                0 => clockwise_all(&[[at, point, prev], [point, next, prev]]),
                1 => clockwise_all(&[[prev, point, at], [point, next, at]]),
                _ => clockwise_all(&[[at, point, next], [point, prev, next]]),
            }
        }
        BreaklineCase::CornerToInterior { corner, from } => {
            let (_, inside) = from.split(piece);
            let (at, next, prev) = (c(corner), c(corner + 1), c(corner + 2));
            clockwise_all(&[[at, next, inside], [inside, next, prev], [inside, prev, at]])
        }
        BreaklineCase::SameEdge { edge } => {
            let l0 = project_onto_edge(triangle, edge, &piece.p0);
            let l1 = project_onto_edge(triangle, edge, &piece.p1);
            let (prev, next, opposite) = (c(edge), c(edge + 1), c(edge + 2));
            if prev.distance(&l0) < prev.distance(&l1) {
                clockwise_all(&[
                    [prev, l0, opposite],
                    [l0, l1, opposite],
                    [l1, next, opposite],
                ])
            } else {
                clockwise_all(&[
                    [prev, l1, opposite],
                    [l0, l1, opposite],
                    [l0, next, opposite],
                ])
            }
        }
        BreaklineCase::EdgeToNextEdge { edge } => {
            let l0 = project_onto_edge(triangle, edge, &piece.p0);
            let l1 = project_onto_edge(triangle, edge + 1, &piece.p1);
            let (prev, next, opposite) = (c(edge), c(edge + 1), c(edge + 2));
            clockwise_all(&[[prev, l0, opposite], [l0, l1, opposite], [l0, next, l1]])
        }
        BreaklineCase::EdgeToPreviousEdge { edge } => {
            let l0 = project_onto_edge(triangle, edge, &piece.p0);
            let l1 = project_onto_edge(triangle, edge + 2, &piece.p1);
            let (prev, next, opposite) = (c(edge), c(edge + 1), c(edge + 2));
            clockwise_all(&[[prev, l0, l1], [l0, next, l1], [l1, next, opposite]])
        }
        BreaklineCase::EdgeToInterior { edge, from } => {
            let (touching, inside) = from.split(piece);
            let point = project_onto_edge(triangle, edge, &touching);
            let (prev, next, opposite) = (c(edge), c(edge + 1), c(edge + 2));
            if orientation(&prev, &point, &inside) == Orientation::Collinear {
                clockwise_all(&[
                    [prev, point, opposite],
                    [opposite, point, inside],
                    [opposite, inside, next],
                    [point, inside, next],
                ])
            } else {
                clockwise_all(&[
                    [prev, point, inside],
                    [next, point, inside],
                    [next, inside, opposite],
                    [prev, inside, opposite],
                ])
            }
        }
        BreaklineCase::Contained { corner, from } => {
            let (l0, l1) = from.split(piece);
            split_contained(triangle, corner, l0, l1)
        }
    }
}

/// The five triangles around a chord `l0 -> l1` inside `t0, t1, t2`, where `l1` lies in
/// the triangle `t1, t2, l0`.
fn contained_layout(
    corners: [Coordinate; 3],
    l0: Coordinate,
    l1: Coordinate,
) -> [[Coordinate; 3]; 5] {
    let [t0, t1, t2] = corners;
    [
        [t0, t1, l0],
        [l0, t1, l1],
        [l1, t1, t2],
        [l0, l1, t2],
        [t0, l0, t2],
    ]
}

/// Corner rotation and chord direction for a chord near corner `corner`.
///
/// Picks the layout from the turn at the near end and the angle it makes with the
/// neighbouring corner.
fn preferred_contained(
    triangle: &Triangle,
    corner: usize,
    l0: Coordinate,
    l1: Coordinate,
) -> (usize, bool) {
    let t0 = triangle.corner(corner);
    let t1 = triangle.corner(corner + 1);
    let t2 = triangle.corner(corner + 2);
    let angle_line = angle_between(&t0, &l0, &l1);
    match orientation(&t0, &l0, &l1) {
        Orientation::Collinear => (corner, false),
        Orientation::Clockwise => {
            let angle_corner = angle_between(&t0, &l0, &t2);
            if angle_line > angle_corner {
                (corner, false)
            } else if (angle_line - angle_corner).abs() <= f64::EPSILON {
                (corner + 2, true)
            } else {
                (corner + 1, false)
            }
        }
        Orientation::CounterClockwise => {
            let angle_corner = angle_between(&t0, &l0, &t1);
            if angle_line > angle_corner {
                (corner, false)
            } else if (angle_line - angle_corner).abs() <= f64::EPSILON {
                (corner + 1, true)
            } else {
                (corner + 2, true)
            }
        }
    }
}

fn split_contained(
    triangle: &Triangle,
    corner: usize,
    l0: Coordinate,
    l1: Coordinate,
) -> Vec<Triangle> {
    let layout = |rotation: usize, swapped: bool| {
        let corners = [
            triangle.corner(rotation),
            triangle.corner(rotation + 1),
            triangle.corner(rotation + 2),
        ];
        let slots = if swapped {
            contained_layout(corners, l1, l0)
        } else {
            contained_layout(corners, l0, l1)
        };
        (slots.len(), clockwise_all(&slots))
    };

    let preferred = preferred_contained(triangle, corner, l0, l1);
    let candidates = std::iter::once(preferred).chain(
        [false, true]
            .into_iter()
            .flat_map(|swapped| (0..3).map(move |rotation| (corner + rotation, swapped))),
    );

    let mut fallback = None;
    for (rotation, swapped) in candidates {
        let (slots, triangles) = layout(rotation, swapped);
        if !conserves_area(triangle, &triangles) {
            continue;
        }
        if triangles.len() == slots {
            return triangles;
        }
        fallback.get_or_insert(triangles);
    }
    fallback.unwrap_or_default()
}

/// Replacement triangles for a breakline that meets `triangle` in the single `point`.
///
/// A point on an edge (away from the corners) splits the triangle in two at the
/// projected point. A point at a corner or inside leaves the triangle unchanged.
#[must_use]
pub fn split_point(
    triangle: &Triangle,
    point: &Coordinate,
    tolerances: &Tolerances,
) -> Vec<Triangle> {
    let touch = Touch::measure(triangle, point);
    if touch.corner_distance < tolerances.touch || touch.edge_distance >= tolerances.touch {
        return Vec::new();
    }
    let on_edge = project_onto_edge(triangle, touch.edge, point);
    split_edge_at(triangle, touch.edge, &on_edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Clockwise corners (0,0), (0,10), (10,0) with z = 0, 10, 20.
    fn triangle() -> Triangle {
        Triangle::clockwise(
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(0.0, 10.0, 10.0),
            Coordinate::new(10.0, 0.0, 20.0),
        )
        .expect("corners are not collinear")
    }

    fn piece(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment {
        LineSegment::new(Coordinate::new(x0, y0, 5.0), Coordinate::new(x1, y1, 6.0))
    }

    fn case_of(piece: &LineSegment) -> BreaklineCase {
        classify(
            &TouchDistances::measure(&triangle(), piece),
            &Tolerances::default(),
        )
    }

    fn has_edge(triangles: &[Triangle], a: &Coordinate, b: &Coordinate) -> bool {
        triangles.iter().any(|t| {
            (0..3).any(|i| {
                let edge = t.edge(i);
                (edge.p0.equals_2d(a) && edge.p1.equals_2d(b))
                    || (edge.p0.equals_2d(b) && edge.p1.equals_2d(a))
            })
        })
    }

    fn assert_split(piece: &LineSegment, expected: usize) -> Vec<Triangle> {
        let original = triangle();
        let case = case_of(piece);
        let triangles = split_segment(&original, piece, case);
        assert_eq!(triangles.len(), expected, "{case:?}");
        assert!(triangles.iter().all(Triangle::is_valid));
        assert!(conserves_area(&original, &triangles), "{case:?}");
        triangles
    }

    #[test]
    fn test_touch_measure() {
        let touch = Touch::measure(&triangle(), &Coordinate::new_2d(1.0, 5.0));
        assert_eq!(touch.corner, 0);
        assert_eq!(touch.edge, 0);
        assert_relative_eq!(touch.edge_distance, 1.0);
        assert_relative_eq!(touch.corner_distance, 26.0f64.sqrt());
    }

    #[test]
    fn test_classify_corner_cases() {
        assert_eq!(
            case_of(&piece(0.0, 0.0, 0.0, 10.0)),
            BreaklineCase::TwoCorners {
                start_corner: 0,
                end_corner: 1
            }
        );
        assert_eq!(
            case_of(&piece(0.0, 0.0, 0.001, 0.001)),
            BreaklineCase::SameCorner
        );
        assert_eq!(
            case_of(&piece(0.0, 0.0, 5.0, 5.0)),
            BreaklineCase::CornerToEdge {
                corner: 0,
                from: Endpoint::Start,
                edge: 1
            }
        );
        assert_eq!(
            case_of(&piece(3.0, 3.0, 0.0, 10.0)),
            BreaklineCase::CornerToInterior {
                corner: 1,
                from: Endpoint::End
            }
        );
    }

    #[test]
    fn test_classify_edge_near_threshold() {
        // 0.9 from the hypotenuse counts as near the edge, 1.5 does not.
        let near = 10.0 - 0.9 * 2.0f64.sqrt();
        assert!(matches!(
            case_of(&piece(0.0, 0.0, near / 2.0, near / 2.0)),
            BreaklineCase::CornerToEdge { edge: 1, .. }
        ));
        let far = 10.0 - 1.5 * 2.0f64.sqrt();
        assert!(matches!(
            case_of(&piece(0.0, 0.0, far / 2.0, far / 2.0)),
            BreaklineCase::CornerToInterior { corner: 0, .. }
        ));
    }

    #[test]
    fn test_classify_edge_cases() {
        assert_eq!(
            case_of(&piece(0.0, 2.0, 0.0, 6.0)),
            BreaklineCase::SameEdge { edge: 0 }
        );
        assert_eq!(
            case_of(&piece(0.0, 5.0, 5.0, 5.0)),
            BreaklineCase::EdgeToNextEdge { edge: 0 }
        );
        assert_eq!(
            case_of(&piece(0.0, 5.0, 5.0, 0.0)),
            BreaklineCase::EdgeToPreviousEdge { edge: 0 }
        );
        assert_eq!(
            case_of(&piece(2.0, 2.0, 4.0, 0.0)),
            BreaklineCase::EdgeToInterior {
                edge: 2,
                from: Endpoint::End
            }
        );
        assert_eq!(
            case_of(&piece(2.0, 2.0, 3.0, 4.0)),
            BreaklineCase::Contained {
                corner: 0,
                from: Endpoint::Start
            }
        );
    }

    #[test]
    fn test_split_two_corners_keeps_shape() {
        let triangles = assert_split(&piece(0.0, 0.0, 0.0, 10.0), 1);
        assert_relative_eq!(triangles[0].area(), 50.0);
    }

    #[test]
    fn test_split_corner_to_edge() {
        let triangles = assert_split(&piece(0.0, 0.0, 5.0, 5.0), 2);
        let corner = Coordinate::new_2d(0.0, 0.0);
        assert!(has_edge(&triangles, &corner, &Coordinate::new_2d(5.0, 5.0)));
        // Corners are reused as they are.
        assert!(triangles.iter().any(|t| t.corners().contains(&triangle().corner(0))));
    }

    #[test]
    fn test_split_corner_to_near_edge_projects() {
        let inside = 10.0 - 0.5 * 2.0f64.sqrt();
        let triangles = assert_split(&piece(0.0, 0.0, inside / 2.0, inside / 2.0), 2);
        assert!(has_edge(
            &triangles,
            &Coordinate::new_2d(0.0, 0.0),
            &Coordinate::new_2d(5.0, 5.0)
        ));
    }

    #[test]
    fn test_split_corner_to_interior() {
        let triangles = assert_split(&piece(3.0, 3.0, 0.0, 10.0), 3);
        assert!(has_edge(
            &triangles,
            &Coordinate::new_2d(3.0, 3.0),
            &Coordinate::new_2d(0.0, 10.0)
        ));
    }

    #[test]
    fn test_split_same_edge() {
        let forward = assert_split(&piece(0.0, 2.0, 0.0, 6.0), 3);
        let backward = assert_split(&piece(0.0, 6.0, 0.0, 2.0), 3);
        for triangles in [forward, backward] {
            assert!(has_edge(
                &triangles,
                &Coordinate::new_2d(0.0, 2.0),
                &Coordinate::new_2d(0.0, 6.0)
            ));
        }
    }

    #[test]
    fn test_split_edge_to_edge() {
        let next = assert_split(&piece(0.0, 5.0, 5.0, 5.0), 3);
        assert!(has_edge(
            &next,
            &Coordinate::new_2d(0.0, 5.0),
            &Coordinate::new_2d(5.0, 5.0)
        ));
        let previous = assert_split(&piece(0.0, 5.0, 5.0, 0.0), 3);
        assert!(has_edge(
            &previous,
            &Coordinate::new_2d(0.0, 5.0),
            &Coordinate::new_2d(5.0, 0.0)
        ));
    }

    #[test]
    fn test_split_edge_to_interior() {
        let triangles = assert_split(&piece(2.0, 2.0, 4.0, 0.0), 4);
        assert!(has_edge(
            &triangles,
            &Coordinate::new_2d(2.0, 2.0),
            &Coordinate::new_2d(4.0, 0.0)
        ));
    }

    #[test]
    fn test_split_contained_line() {
        for chord in [
            piece(2.0, 2.0, 3.0, 4.0),
            piece(2.0, 2.0, 4.0, 3.0),
            piece(1.0, 1.0, 3.0, 3.0),
            piece(6.0, 2.0, 2.0, 6.0),
            piece(1.0, 7.0, 1.5, 1.0),
        ] {
            let triangles = assert_split(&chord, 5);
            assert!(has_edge(&triangles, &chord.p0, &chord.p1), "{chord:?}");
        }
    }

    #[test]
    fn test_split_keeps_breakline_elevation() {
        let triangles = assert_split(&piece(2.0, 2.0, 3.0, 4.0), 5);
        let start = triangles
            .iter()
            .flat_map(|t| t.corners().iter())
            .find(|c| c.equals_2d(&Coordinate::new_2d(2.0, 2.0)))
            .expect("breakline start is a vertex");
        assert_relative_eq!(start.z, 5.0);
    }

    #[test]
    fn test_split_point_on_edge() {
        let original = triangle();
        let point = Coordinate::new(0.0, 4.0, 7.0);
        let triangles = split_point(&original, &point, &Tolerances::default());
        assert_eq!(triangles.len(), 2);
        assert!(conserves_area(&original, &triangles));
        assert!(has_edge(&triangles, &point, &Coordinate::new_2d(10.0, 0.0)));
    }

    #[test]
    fn test_split_point_on_closing_edge() {
        let original = triangle();
        let point = Coordinate::new(4.0, 0.005, 7.0);
        let triangles = split_point(&original, &point, &Tolerances::default());
        assert_eq!(triangles.len(), 2);
        assert!(conserves_area(&original, &triangles));
    }

    #[test]
    fn test_split_point_corner_or_inside_is_noop() {
        let original = triangle();
        let tolerances = Tolerances::default();
        assert!(split_point(&original, &Coordinate::new_2d(0.0, 10.0), &tolerances).is_empty());
        assert!(split_point(&original, &Coordinate::new_2d(2.0, 2.0), &tolerances).is_empty());
    }

    #[test]
    fn test_project_onto_edge_is_direction_independent() {
        let a = Coordinate::new(0.0, 0.0, 0.0);
        let b = Coordinate::new(7.0, 3.0, 0.0);
        let c = Coordinate::new(1.0, 9.0, 0.0);
        let d = Coordinate::new(5.0, -6.0, 0.0);
        let left = Triangle::clockwise(a, b, c).expect("valid");
        let right = Triangle::clockwise(b, a, d).expect("valid");
        let point = Coordinate::new(3.3, 1.5, 2.0);
        let shared = |t: &Triangle| {
            (0..3)
                .find(|&i| {
                    let e = t.edge(i);
                    (e.p0.equals_2d(&a) && e.p1.equals_2d(&b))
                        || (e.p0.equals_2d(&b) && e.p1.equals_2d(&a))
                })
                .expect("edge a-b is shared")
        };
        let left_edge = shared(&left);
        let right_edge = shared(&right);
        let from_left = project_onto_edge(&left, left_edge, &point);
        let from_right = project_onto_edge(&right, right_edge, &point);
        assert_eq!(from_left, from_right);
        assert_relative_eq!(from_left.z, 2.0);
    }

    #[test]
    fn test_settle_endpoint_agrees_across_shared_edge() {
        let a = Coordinate::new(0.0, 0.0, 0.0);
        let b = Coordinate::new(7.0, 3.0, 0.0);
        let left = Triangle::clockwise(a, b, Coordinate::new(1.0, 9.0, 0.0)).expect("valid");
        let right = Triangle::clockwise(b, a, Coordinate::new(5.0, -6.0, 0.0)).expect("valid");
        let breakline = LineSegment::new(Coordinate::new(2.0, 5.0, 1.0), Coordinate::new(4.0, -2.0, 8.0));
        let options = TinOptions::default();

        let exit = left.clip(&breakline).expect("breakline leaves the left triangle").p1;
        let entry = right.clip(&breakline).expect("breakline enters the right triangle").p0;
        let from_left = settle_endpoint(&left, &breakline, &exit, &options);
        let from_right = settle_endpoint(&right, &breakline, &entry, &options);

        assert_eq!(from_left, from_right);
        let shared = LineSegment::new(a, b);
        assert!(shared.distance_to_point(&from_left) < 1e-12);
        assert_relative_eq!(from_left.x, 3.055, epsilon = 1e-3);
        assert_relative_eq!(from_left.z, 5.0);
    }

    #[test]
    fn test_settle_endpoint_corner_and_interior() {
        let options = TinOptions::default();
        let breakline = LineSegment::new(Coordinate::new(0.004, 0.0, 3.0), Coordinate::new(2.0004, 3.0, 4.4));

        let corner = settle_endpoint(&triangle(), &breakline, &breakline.p0, &options);
        assert_eq!(corner, triangle().corner(0));

        let inside = settle_endpoint(&triangle(), &breakline, &breakline.p1, &options);
        assert_eq!((inside.x, inside.y), (2.0, 3.0));
        assert_relative_eq!(inside.z, 4.0);
    }

    #[test]
    fn test_edge_vertices_of_splits() {
        let original = triangle();
        let near = 10.0 - 0.5 * 2.0f64.sqrt();
        let projected = assert_split(&piece(0.0, 0.0, near / 2.0, near / 2.0), 2);
        let vertices = edge_vertices(&original, &projected);
        assert_eq!(vertices.len(), 1);
        assert_relative_eq!(vertices[0].vertex.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(vertices[0].vertex.y, 5.0, epsilon = 1e-12);
        assert_eq!(vertices[0].edge, original.edge(1));

        let contained = assert_split(&piece(2.0, 2.0, 3.0, 4.0), 5);
        assert!(edge_vertices(&original, &contained).is_empty());
    }

    #[test]
    fn test_edge_through_and_split_edge_at() {
        let hypotenuse = triangle().edge(1);
        let neighbour = Triangle::clockwise(
            Coordinate::new(0.0, 10.0, 10.0),
            Coordinate::new(10.0, 10.0, 30.0),
            Coordinate::new(10.0, 0.0, 20.0),
        )
        .expect("valid");
        let vertex = Coordinate::new(5.0, 5.0, 15.0);

        let side = edge_through(&neighbour, &hypotenuse, &vertex).expect("vertex is on the shared edge");
        let halves = split_edge_at(&neighbour, side, &vertex);
        assert_eq!(halves.len(), 2);
        assert!(conserves_area(&neighbour, &halves));
        assert!(halves.iter().all(|t| t.corners().contains(&vertex)));

        assert_eq!(edge_through(&neighbour, &hypotenuse, &Coordinate::new_2d(0.0, 10.0)), None);
        assert_eq!(edge_through(&neighbour, &hypotenuse, &Coordinate::new_2d(6.0, 6.0)), None);
    }

    #[test]
    #[should_panic(expected = "distinct corner indices")]
    fn test_two_corners_same_index_panics() {
        let _ = split_segment(
            &triangle(),
            &piece(0.0, 0.0, 0.0, 10.0),
            BreaklineCase::TwoCorners {
                start_corner: 2,
                end_corner: 2,
            },
        );
    }
}
