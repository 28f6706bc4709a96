//! The triangulated irregular network.
//!
//! A [`TriangulatedIrregularNetwork`] starts from a seed (a rectangle split into two
//! triangles, or a single triangle) and grows by two mutations:
//!
//! - [`insert_node`](TriangulatedIrregularNetwork::insert_node) adds a vertex by
//!   Bowyer-Watson cavity re-fanning, driven by a circumcircle index that is kept in
//!   sync with every mutation.
//! - [`insert_edge`](TriangulatedIrregularNetwork::insert_edge) forces a breakline
//!   segment into the mesh by splitting the triangles it crosses.
//!
//! Read queries and breakline insertion go through a second index of triangle
//! envelopes. That index is a snapshot: it is only rebuilt by
//! [`build_index`](TriangulatedIrregularNetwork::build_index), and every mutation
//! bumps a modification counter so a stale snapshot can be detected.

use super::breakline::{self, AREA_TOLERANCE, EdgeVertex, TouchDistances};
use super::statistics::{NodeInsertion, TinStatistics};
use crate::config::{TinOptions, Tolerances};
use crate::errors::{TinError, TinResult};
use crate::geometry::circle::Circle;
use crate::geometry::coordinate::Coordinate;
use crate::geometry::envelope::Envelope;
use crate::geometry::mesh::Mesh;
use crate::geometry::precision::PrecisionModel;
use crate::geometry::segment::LineSegment;
use crate::geometry::triangle::Triangle;
use crate::index::backends::rtree::RTreeIndex;
use crate::index::traits::SpatialIndex;
use float_ord::FloatOrd;
use log::{debug, info, trace, warn};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;

/// Relative slack allowed between the domain area and the summed triangle areas.
pub const VALIDITY_TOLERANCE: f64 = 1e-6;

/// Stable handle of a triangle. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(usize);

impl TriangleId {
    /// Position of the triangle in creation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Initial shape of a network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    /// Axis-aligned rectangle, split along its min/max diagonal
    Rectangle(Envelope),
    /// A single triangle with the given corners
    Triangle(Coordinate, Coordinate, Coordinate),
}

/// Region that accepts nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Domain {
    Rectangle(Envelope),
    Triangle(Triangle),
}

impl Domain {
    fn covers(&self, point: &Coordinate) -> bool {
        match self {
            Self::Rectangle(envelope) => envelope.covers(point),
            Self::Triangle(triangle) => triangle.contains(point),
        }
    }

    fn envelope(&self) -> Envelope {
        match self {
            Self::Rectangle(envelope) => *envelope,
            Self::Triangle(triangle) => triangle.envelope(),
        }
    }

    fn area(&self) -> f64 {
        match self {
            Self::Rectangle(envelope) => envelope.area(),
            Self::Triangle(triangle) => triangle.area(),
        }
    }

    /// Whether both ends of an edge lie on the same side of the domain.
    fn on_boundary(&self, a: &Coordinate, b: &Coordinate) -> bool {
        let envelope = self.envelope();
        let slack = VALIDITY_TOLERANCE * envelope.width().max(envelope.height());
        match self {
            Self::Rectangle(r) => {
                let on = |u: f64, v: f64, side: f64| {
                    (u - side).abs() <= slack && (v - side).abs() <= slack
                };
                on(a.x, b.x, r.min_x)
                    || on(a.x, b.x, r.max_x)
                    || on(a.y, b.y, r.min_y)
                    || on(a.y, b.y, r.max_y)
            }
            Self::Triangle(triangle) => (0..3).map(|i| triangle.edge(i)).any(|side| {
                side.distance_to_point(a) <= slack && side.distance_to_point(b) <= slack
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    triangle: Triangle,
    circle: Circle,
}

/// A triangulated surface over a fixed domain.
///
/// `I` is the spatial index backend used for both the circumcircle index and the
/// triangle snapshot.
#[derive(Debug, Clone)]
pub struct TriangulatedIrregularNetwork<I = RTreeIndex<TriangleId>> {
    arena: Vec<Option<Slot>>,
    live: usize,
    circumcircle_index: I,
    triangle_index: I,
    modification_count: u64,
    index_built_at: u64,
    domain: Domain,
    nodes: Vec<Coordinate>,
    node_keys: HashSet<(u64, u64)>,
    options: TinOptions,
    statistics: TinStatistics,
}

impl TriangulatedIrregularNetwork {
    /// Seeds a network with the rectangle `envelope` and default options.
    ///
    /// # Errors
    ///
    /// Returns [`TinError::InvalidEnvelope`] if the envelope is empty or not finite.
    pub fn new(envelope: Envelope) -> TinResult<Self> {
        Self::with_seed(Seed::Rectangle(envelope), TinOptions::default())
    }

    /// Seeds a network with a single triangle and default options.
    ///
    /// # Errors
    ///
    /// Returns [`TinError::InvalidCoordinate`] for a non-finite corner and
    /// [`TinError::DegenerateTriangle`] for collinear corners.
    pub fn from_triangle(a: Coordinate, b: Coordinate, c: Coordinate) -> TinResult<Self> {
        Self::with_seed(Seed::Triangle(a, b, c), TinOptions::default())
    }
}

impl<I: SpatialIndex<TriangleId> + Default> TriangulatedIrregularNetwork<I> {
    /// Seeds a network on any index backend.
    ///
    /// Rectangle corners are rounded to the x/y precision and get elevation `0.0`;
    /// triangle corners are kept as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerances are invalid or the seed is degenerate.
    pub fn with_seed(seed: Seed, options: TinOptions) -> TinResult<Self> {
        options.tolerances.validate()?;
        let (domain, seeds) = match seed {
            Seed::Rectangle(envelope) => {
                validate_envelope(&envelope)?;
                let xy = options.xy_precision;
                let c1 = xy.make_precise_xy(&Coordinate::new(envelope.min_x, envelope.min_y, 0.0));
                let c2 = xy.make_precise_xy(&Coordinate::new(envelope.max_x, envelope.min_y, 0.0));
                let c3 = xy.make_precise_xy(&Coordinate::new(envelope.max_x, envelope.max_y, 0.0));
                let c4 = xy.make_precise_xy(&Coordinate::new(envelope.min_x, envelope.max_y, 0.0));
                let first = Triangle::try_clockwise(c1, c2, c3)?;
                let second = Triangle::try_clockwise(c1, c3, c4)?;
                let domain = Envelope::new(c1.x, c1.y, c3.x, c3.y);
                (Domain::Rectangle(domain), vec![first, second])
            }
            Seed::Triangle(a, b, c) => {
                if let Some(bad) = [a, b, c].iter().find(|p| !p.is_finite_2d()) {
                    return Err(TinError::InvalidCoordinate { x: bad.x, y: bad.y });
                }
                let triangle = Triangle::try_clockwise(a, b, c)?;
                (Domain::Triangle(triangle), vec![triangle])
            }
        };

        let mut tin = Self {
            arena: Vec::new(),
            live: 0,
            circumcircle_index: I::default(),
            triangle_index: I::default(),
            modification_count: 0,
            index_built_at: 0,
            domain,
            nodes: Vec::new(),
            node_keys: HashSet::new(),
            options,
            statistics: TinStatistics::new(),
        };
        for triangle in seeds {
            tin.add_triangle(triangle);
        }
        tin.modification_count = 1;

        info!(
            "Seeded TIN over {:?} with {} triangles ({} index)",
            tin.domain.envelope(),
            tin.live,
            tin.circumcircle_index.index_name()
        );
        Ok(tin)
    }
}

fn validate_envelope(envelope: &Envelope) -> TinResult<()> {
    let invalid = |reason: &str| TinError::InvalidEnvelope {
        min_x: envelope.min_x,
        min_y: envelope.min_y,
        max_x: envelope.max_x,
        max_y: envelope.max_y,
        reason: reason.to_string(),
    };
    let bounds = [envelope.min_x, envelope.min_y, envelope.max_x, envelope.max_y];
    if bounds.iter().any(|v| !v.is_finite()) {
        return Err(invalid("bounds must be finite"));
    }
    if envelope.width() <= 0.0 || envelope.height() <= 0.0 {
        return Err(invalid("width and height must be positive"));
    }
    Ok(())
}

impl<I: SpatialIndex<TriangleId>> TriangulatedIrregularNetwork<I> {
    // Arena bookkeeping

    fn slot(&self, id: TriangleId) -> Option<&Slot> {
        self.arena.get(id.0).and_then(Option::as_ref)
    }

    fn add_triangle(&mut self, triangle: Triangle) -> TriangleId {
        let circle = triangle.circumcircle_with_tolerance(self.options.tolerances.circle);
        let id = TriangleId(self.arena.len());
        self.circumcircle_index.insert(circle.envelope(), id);
        self.arena.push(Some(Slot { triangle, circle }));
        self.live += 1;
        for corner in triangle.corners() {
            self.register_node(*corner);
        }
        trace!("Added {id}: {triangle:?}");
        id
    }

    fn remove_triangle(&mut self, id: TriangleId) -> Option<Triangle> {
        let slot = self.arena.get_mut(id.0)?.take()?;
        if !self.circumcircle_index.remove(&slot.circle.envelope(), &id) {
            warn!(
                "{id} was missing from the {} circumcircle index",
                self.circumcircle_index.index_name()
            );
        }
        self.live -= 1;
        trace!("Removed {id}");
        Some(slot.triangle)
    }

    fn register_node(&mut self, coordinate: Coordinate) {
        if self.node_keys.insert(coordinate.xy_key()) {
            self.nodes.push(coordinate);
        }
    }

    fn live_triangles(&self) -> impl Iterator<Item = (TriangleId, Triangle)> + '_ {
        self.arena
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (TriangleId(i), s.triangle)))
    }

    // Node insertion

    /// Inserts a node and re-triangulates the cavity of triangles whose circumcircle
    /// contains it.
    ///
    /// The node's x and y are rounded to the x/y precision first; its elevation is
    /// kept as given. Nodes outside the domain or on an existing vertex leave the
    /// network unchanged, as does a cavity that cannot be fanned without overlap.
    pub fn insert_node(&mut self, coordinate: Coordinate) -> NodeInsertion {
        let outcome = self.try_insert_node(coordinate);
        self.statistics.record_node(outcome);
        outcome
    }

    fn try_insert_node(&mut self, coordinate: Coordinate) -> NodeInsertion {
        if !coordinate.is_finite_2d() {
            debug!("Ignoring non-finite node {coordinate}");
            return NodeInsertion::OutsideDomain;
        }
        let point = self.options.xy_precision.make_precise_xy(&coordinate);
        if !self.domain.covers(&point) {
            debug!("Ignoring node {point} outside the domain");
            return NodeInsertion::OutsideDomain;
        }
        if self.node_keys.contains(&point.xy_key()) {
            trace!("Ignoring duplicate node {point}");
            return NodeInsertion::Duplicate;
        }

        let mut cavity: Vec<TriangleId> = self
            .circumcircle_index
            .query(&Envelope::from_point(&point))
            .into_iter()
            .filter(|id| self.slot(*id).is_some_and(|slot| slot.circle.contains(&point)))
            .collect();
        if cavity.is_empty() {
            debug!("No circumcircle contains node {point}");
            return NodeInsertion::OutsideDomain;
        }
        cavity.sort_unstable();

        let mut seen = HashSet::new();
        let mut boundary = Vec::new();
        let mut cavity_area = 0.0;
        for slot in cavity.iter().filter_map(|id| self.slot(*id)) {
            cavity_area += slot.triangle.area();
            for corner in slot.triangle.corners() {
                if seen.insert(corner.xy_key()) {
                    boundary.push(*corner);
                }
            }
        }
        boundary.sort_by_key(|corner| Reverse(FloatOrd(point.angle_to(corner))));

        let mut fan = Vec::with_capacity(boundary.len());
        if let Some(mut previous) = boundary.last().copied() {
            for corner in &boundary {
                if let Some(triangle) = Triangle::clockwise(point, previous, *corner) {
                    fan.push(triangle);
                }
                previous = *corner;
            }
        }

        let fan_area: f64 = fan.iter().map(Triangle::area).sum();
        if (fan_area - cavity_area).abs() > AREA_TOLERANCE * cavity_area.max(1.0) {
            warn!(
                "Rejected node {point}: fan area {fan_area} does not match cavity area {cavity_area}"
            );
            return NodeInsertion::Rejected;
        }

        for id in &cavity {
            self.remove_triangle(*id);
        }
        for triangle in &fan {
            self.add_triangle(*triangle);
        }
        self.modification_count += 1;
        debug!(
            "Inserted node {point}: replaced {} triangles with {}",
            cavity.len(),
            fan.len()
        );
        NodeInsertion::Inserted {
            removed: cavity.len(),
            added: fan.len(),
        }
    }

    /// Inserts nodes in order, returning how many became vertices.
    pub fn insert_nodes<T>(&mut self, coordinates: T) -> usize
    where
        T: IntoIterator<Item = Coordinate>,
    {
        coordinates
            .into_iter()
            .filter(|coordinate| self.insert_node(*coordinate).is_inserted())
            .count()
    }

    // Triangle snapshot

    /// Rebuilds the triangle envelope snapshot from the live triangles.
    pub fn build_index(&mut self) {
        let entries = self
            .live_triangles()
            .map(|(id, triangle)| (triangle.envelope(), id))
            .collect();
        self.triangle_index.bulk_load(entries);
        self.index_built_at = self.modification_count;
        debug!(
            "Built triangle index with {} triangles at modification {}",
            self.triangle_index.len(),
            self.modification_count
        );
    }

    /// Whether the network changed since the last [`build_index`](Self::build_index).
    #[must_use]
    pub const fn is_index_stale(&self) -> bool {
        self.index_built_at != self.modification_count
    }

    fn snapshot_query(&self, envelope: &Envelope) -> Vec<(TriangleId, Triangle)> {
        if self.is_index_stale() {
            warn!(
                "Querying a stale triangle index (built at {}, now {})",
                self.index_built_at, self.modification_count
            );
        }
        let mut ids = self.triangle_index.query(envelope);
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.triangle(id).map(|triangle| (id, triangle)))
            .collect()
    }

    // Breaklines

    /// Forces a breakline segment into the mesh.
    ///
    /// Every snapshot triangle the segment crosses is replaced by triangles that have
    /// the clipped piece as an edge. New vertices are rounded to the x/y precision and
    /// take the breakline elevation rounded to the z precision. Neighbours that share an
    /// edge with a new vertex are split there too, so the mesh stays conforming.
    /// Returns the number of triangles replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TinError::StaleIndex`] if the network changed since the last
    /// [`build_index`](Self::build_index).
    pub fn insert_edge(&mut self, segment: &LineSegment) -> TinResult<usize> {
        if self.is_index_stale() {
            return Err(TinError::StaleIndex {
                built_at: self.index_built_at,
                current: self.modification_count,
            });
        }
        self.statistics.record_edge();

        let tolerances = self.options.tolerances;
        let options = self.options;
        let mut replaced = 0;
        let mut edge_vertices = Vec::new();
        for (id, triangle) in self.snapshot_query(&segment.envelope()) {
            let Some(clipped) = triangle.clip(segment) else {
                continue;
            };
            let settle = |point: &Coordinate| {
                breakline::settle_endpoint(&triangle, segment, point, &options)
            };
            let replacements = if clipped.length() < tolerances.min_intersection_length {
                breakline::split_point(&triangle, &settle(&clipped.p0), &tolerances)
            } else {
                let piece = LineSegment::new(settle(&clipped.p0), settle(&clipped.p1));
                let case = breakline::classify(&TouchDistances::measure(&triangle, &piece), &tolerances);
                trace!("{id} meets {piece:?} as {case:?}");
                breakline::split_segment(&triangle, &piece, case)
            };

            let changed = !replacements.is_empty() && replacements != [triangle];
            let replace = changed && breakline::conserves_area(&triangle, &replacements);
            if changed && !replace {
                warn!("Kept {id}: replacement triangles do not cover the same area");
            }
            self.statistics.record_split(replace);
            if replace {
                edge_vertices.extend(breakline::edge_vertices(&triangle, &replacements));
                self.remove_triangle(id);
                for replacement in replacements {
                    self.add_triangle(replacement);
                }
                self.modification_count += 1;
                replaced += 1;
            }
        }
        replaced += self.close_edge_vertices(&edge_vertices);

        debug!(
            "Inserted breakline {} -> {}: replaced {replaced} triangles",
            segment.p0, segment.p1
        );
        Ok(replaced)
    }

    /// Splits every live triangle that still has one of `edge_vertices` in the middle
    /// of an edge. Returns the number of triangles replaced.
    fn close_edge_vertices(&mut self, edge_vertices: &[EdgeVertex]) -> usize {
        let mut replaced = 0;
        for EdgeVertex { edge, vertex } in edge_vertices {
            let mut candidates = self.circumcircle_index.query(&Envelope::from_point(vertex));
            candidates.sort_unstable();
            for id in candidates {
                let Some(triangle) = self.triangle(id) else {
                    continue;
                };
                let Some(side) = breakline::edge_through(&triangle, edge, vertex) else {
                    continue;
                };
                let halves = breakline::split_edge_at(&triangle, side, vertex);
                let replace = halves.len() == 2 && breakline::conserves_area(&triangle, &halves);
                self.statistics.record_split(replace);
                if !replace {
                    warn!("Left {id} open at {vertex}: halves do not cover the same area");
                    continue;
                }
                trace!("Split {id} at edge vertex {vertex}");
                self.remove_triangle(id);
                for half in halves {
                    self.add_triangle(half);
                }
                self.modification_count += 1;
                replaced += 1;
            }
        }
        replaced
    }

    /// Inserts consecutive segments of a polyline, rebuilding the snapshot whenever
    /// it is stale. Returns the total number of triangles replaced.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`insert_edge`](Self::insert_edge).
    pub fn insert_breakline(&mut self, polyline: &[Coordinate]) -> TinResult<usize> {
        let mut replaced = 0;
        for pair in polyline.windows(2) {
            if self.is_index_stale() {
                self.build_index();
            }
            replaced += self.insert_edge(&LineSegment::new(pair[0], pair[1]))?;
        }
        Ok(replaced)
    }

    // Queries

    /// The live triangle with `id`, if any.
    #[must_use]
    pub fn triangle(&self, id: TriangleId) -> Option<Triangle> {
        self.slot(id).map(|slot| slot.triangle)
    }

    /// All live triangles, in creation order.
    #[must_use]
    pub fn triangles(&self) -> Vec<Triangle> {
        self.live_triangles().map(|(_, triangle)| triangle).collect()
    }

    /// Ids of all live triangles, in creation order.
    #[must_use]
    pub fn triangle_ids(&self) -> Vec<TriangleId> {
        self.live_triangles().map(|(id, _)| id).collect()
    }

    /// Snapshot triangles containing `point`, boundary included.
    #[must_use]
    pub fn triangles_at(&self, point: &Coordinate) -> Vec<Triangle> {
        self.snapshot_query(&Envelope::from_point(point))
            .into_iter()
            .map(|(_, triangle)| triangle)
            .filter(|triangle| triangle.contains(point))
            .collect()
    }

    /// Snapshot triangles whose envelope intersects `envelope`.
    #[must_use]
    pub fn triangles_in(&self, envelope: &Envelope) -> Vec<Triangle> {
        self.snapshot_query(envelope)
            .into_iter()
            .map(|(_, triangle)| triangle)
            .collect()
    }

    /// Snapshot triangles whose envelope intersects the envelope of `segment`.
    #[must_use]
    pub fn triangles_along(&self, segment: &LineSegment) -> Vec<Triangle> {
        self.triangles_in(&segment.envelope())
    }

    /// Interpolated elevation at `point`, or `NaN` if no snapshot triangle contains it.
    #[must_use]
    pub fn elevation(&self, point: &Coordinate) -> f64 {
        self.triangles_at(point)
            .first()
            .map_or(f64::NAN, |triangle| interpolate_elevation(triangle, point))
    }

    /// Copies `line`, replacing each elevation that can be interpolated.
    #[must_use]
    pub fn elevations_along(&self, line: &[Coordinate]) -> Vec<Coordinate> {
        line.iter()
            .map(|coordinate| {
                let z = self.elevation(coordinate);
                if z.is_nan() { *coordinate } else { coordinate.with_z(z) }
            })
            .collect()
    }

    // Accessors

    /// Number of live triangles.
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.live
    }

    /// Every distinct vertex position, in registration order.
    #[must_use]
    pub fn nodes(&self) -> &[Coordinate] {
        &self.nodes
    }

    /// Number of distinct vertex positions.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Envelope of the seed domain.
    #[must_use]
    pub fn bounds(&self) -> Envelope {
        self.domain.envelope()
    }

    /// Counter bumped by every mutation.
    #[must_use]
    pub const fn modification_count(&self) -> u64 {
        self.modification_count
    }

    /// The options this network was seeded with.
    #[must_use]
    pub const fn options(&self) -> &TinOptions {
        &self.options
    }

    /// Topology thresholds in use.
    #[must_use]
    pub const fn tolerances(&self) -> &Tolerances {
        &self.options.tolerances
    }

    /// Insertion counters.
    #[must_use]
    pub const fn statistics(&self) -> &TinStatistics {
        &self.statistics
    }

    /// Name of the index backend.
    #[must_use]
    pub fn index_name(&self) -> &'static str {
        self.circumcircle_index.index_name()
    }

    /// Sum of the live triangle areas.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.live_triangles().map(|(_, triangle)| triangle.area()).sum()
    }

    /// Checks that every triangle is clockwise, the triangles cover the domain area, and
    /// every edge used by a single triangle lies on the domain boundary.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let all_clockwise = self.live_triangles().all(|(_, triangle)| triangle.is_valid());
        let domain_area = self.domain.area();
        let area_matches =
            (self.total_area() - domain_area).abs() <= VALIDITY_TOLERANCE * domain_area.max(1.0);
        if !area_matches {
            debug!(
                "Triangle area {} differs from domain area {domain_area}",
                self.total_area()
            );
        }
        all_clockwise && area_matches && self.open_edges().is_empty()
    }

    /// Edges used by a single triangle that do not lie on the domain boundary.
    ///
    /// A conforming mesh has none; each one marks a crack between triangles.
    #[must_use]
    pub fn open_edges(&self) -> Vec<LineSegment> {
        let mesh = self.to_mesh();
        let open: Vec<LineSegment> = mesh
            .edges
            .iter()
            .filter(|edge| edge.is_boundary)
            .map(|edge| {
                let (a, b) = edge.vertex_indices;
                LineSegment::new(mesh.vertices[a], mesh.vertices[b])
            })
            .filter(|edge| !self.domain.on_boundary(&edge.p0, &edge.p1))
            .collect();
        if !open.is_empty() {
            debug!("Mesh has {} open edges inside the domain", open.len());
        }
        open
    }

    /// Indexed mesh of the live triangles.
    #[must_use]
    pub fn to_mesh(&self) -> Mesh {
        Mesh::from_triangles(&self.triangles())
    }
}

/// Planar interpolation inside `triangle`.
///
/// A point on a corner takes the corner elevation. Otherwise the line from the nearest
/// corner through the point is intersected with the opposite edge, and the elevation
/// is interpolated along the chord from the corner to that intersection.
fn interpolate_elevation(triangle: &Triangle, point: &Coordinate) -> f64 {
    if let Some(corner) = triangle.corner_at(point) {
        return triangle.corner(corner).z;
    }
    let nearest = triangle.nearest_corner(point);
    let corner = triangle.corner(nearest);
    let opposite = triangle.edge(nearest + 1);
    opposite
        .line_intersection_factor(&LineSegment::new(corner, *point))
        .map_or(f64::NAN, |t| {
            let hit = opposite.point_along(t.clamp(0.0, 1.0));
            LineSegment::new(corner, hit).elevation_at(point)
        })
}
