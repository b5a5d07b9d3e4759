use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::geometry::Polyline;
use crate::math::polygon_2d::{rotate_to_canonical_start, signed_area_2d};
use crate::math::Point2;
use crate::topology::{CrossingStore, Strand};

/// Faces of the planar subdivision induced by a diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Faces {
    /// Bounded regions, counter-clockwise, each starting at its
    /// leftmost-bottom corner, sorted by coordinates.
    pub regions: Vec<Vec<Point2>>,
    /// Ring separating the diagram from the region containing infinity,
    /// counter-clockwise. A pinch point (a crossing on the outside) appears twice.
    pub boundary: Vec<Point2>,
}

/// Splits the plane along the diagram and returns its faces.
///
/// Nodes are the polyline vertices and the crossing points; edges are the
/// pieces of segments between consecutive nodes. Faces are traced by always
/// leaving a node along the edge immediately clockwise from the one arrived on,
/// which walks bounded faces counter-clockwise and the outer face clockwise.
///
/// Degenerate contacts (a vertex resting on another segment, collinear
/// overlaps) are not nodes, so faces touching them are best-effort.
pub struct Regions<'a> {
    polyline: &'a Polyline,
    eps: f64,
}

impl<'a> Regions<'a> {
    /// Creates a new region query.
    #[must_use]
    pub fn new(polyline: &'a Polyline, eps: f64) -> Self {
        Self { polyline, eps }
    }

    /// Executes the query against the crossings computed for the polyline.
    #[must_use]
    pub fn execute(&self, store: &CrossingStore) -> Faces {
        let scale = self
            .polyline
            .vertices()
            .iter()
            .fold(1.0_f64, |m, p| m.max(p.x.abs()).max(p.y.abs()));
        let tol = self.eps * scale;
        let area_tol = tol * scale;

        let mut nodes: Vec<Point2> = Vec::new();
        let mut edges: BTreeSet<(usize, usize)> = BTreeSet::new();

        for seg in self.polyline.segments() {
            let mut stops: Vec<(f64, Point2)> = vec![(0.0, seg.start), (1.0, seg.end)];
            for c in store.iter() {
                if let Some(strand) = c.strand_of(seg.index) {
                    let slot = usize::from(strand == Strand::Second);
                    stops.push((c.params[slot], c.point));
                }
            }
            stops.sort_by(|a, b| a.0.total_cmp(&b.0));

            let ids: Vec<usize> = stops
                .iter()
                .map(|&(_, p)| node_for(&mut nodes, p, tol))
                .collect();
            for w in ids.windows(2) {
                if w[0] != w[1] {
                    edges.insert((w[0].min(w[1]), w[0].max(w[1])));
                }
            }
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for &(u, v) in &edges {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        for (v, around) in adjacency.iter_mut().enumerate() {
            let origin = nodes[v];
            around.sort_by(|&a, &b| {
                angle(&origin, &nodes[a]).total_cmp(&angle(&origin, &nodes[b]))
            });
        }

        let mut visited: HashSet<(usize, usize)> = HashSet::new();
        let mut regions = Vec::new();
        let mut outer: Option<(f64, Vec<Point2>)> = None;
        let limit = edges.len() * 2 + 1;

        for &(u, v) in &edges {
            for start in [(u, v), (v, u)] {
                if visited.contains(&start) {
                    continue;
                }
                let ring = trace_face(start, &nodes, &adjacency, &mut visited, limit);
                let area = signed_area_2d(&ring);
                if area > area_tol {
                    regions.push(rotate_to_canonical_start(&ring));
                } else if area < -area_tol && outer.as_ref().map_or(true, |(a, _)| area < *a) {
                    outer = Some((area, ring));
                }
            }
        }

        regions.sort_by(|a, b| compare_rings(a, b));

        let boundary = outer
            .map(|(_, mut ring)| {
                ring.reverse();
                rotate_to_canonical_start(&ring)
            })
            .unwrap_or_default();

        Faces { regions, boundary }
    }
}

fn node_for(nodes: &mut Vec<Point2>, p: Point2, tol: f64) -> usize {
    if let Some(i) = nodes.iter().position(|q| (q - p).norm() <= tol) {
        return i;
    }
    nodes.push(p);
    nodes.len() - 1
}

fn angle(origin: &Point2, p: &Point2) -> f64 {
    (p.y - origin.y).atan2(p.x - origin.x)
}

fn trace_face(
    start: (usize, usize),
    nodes: &[Point2],
    adjacency: &[Vec<usize>],
    visited: &mut HashSet<(usize, usize)>,
    limit: usize,
) -> Vec<Point2> {
    let mut ring = Vec::new();
    let (mut a, mut b) = start;
    loop {
        visited.insert((a, b));
        ring.push(nodes[a]);
        let around = &adjacency[b];
        let Some(pos) = around.iter().position(|&w| w == a) else {
            break;
        };
        let next = around[(pos + around.len() - 1) % around.len()];
        a = b;
        b = next;
        if (a, b) == start || ring.len() > limit {
            break;
        }
    }
    ring
}

fn compare_rings(a: &[Point2], b: &[Point2]) -> Ordering {
    for (p, q) in a.iter().zip(b) {
        let ord = p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
