//! Closed-polygon reduction in the Douglas-Peucker family.
//!
//! A traced boundary has one vertex per boundary pixel; most of them are
//! collinear noise at the tolerance scales callers care about. Reduction
//! keeps a vertex only when its perpendicular distance from the chord of the
//! enclosing span exceeds `epsilon`.
//!
//! The polygon is treated as closed: the first and last vertex are
//! identified, and the split anchors are the start vertex plus the vertex
//! farthest from it, so the result never depends on where the tracer
//! happened to begin the walk relative to chord direction.
//!
//! Determinism: ties pick the earliest candidate, spans are processed from
//! an explicit stack in a fixed order, and re-running on an output with the
//! same epsilon reproduces it.

use bc_core::Point2i;

/// Reduces a closed polygon. `epsilon <= 0` and sub-triangle inputs pass
/// through unchanged; the output never drops below one vertex.
pub fn simplify_closed(points: &[Point2i], epsilon: f32) -> Vec<Point2i> {
    if epsilon <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }

    // Split at the vertex farthest from the start vertex. The first index
    // attaining the maximum wins, which keeps the split stable across
    // repeated runs.
    let mut split = 0_usize;
    let mut best = 0_i64;
    for (i, p) in points.iter().enumerate().skip(1) {
        let d = points[0].dist2(*p);
        if d > best {
            best = d;
            split = i;
        }
    }

    if split == 0 {
        // Every vertex coincides with the start.
        return vec![points[0]];
    }

    // Two open chains covering the cycle: start..split and split..start.
    let head: Vec<Point2i> = points[..=split].to_vec();
    let mut tail: Vec<Point2i> = points[split..].to_vec();
    tail.push(points[0]);

    let eps2 = (epsilon as f64) * (epsilon as f64);
    let head = reduce_open(&head, eps2);
    let tail = reduce_open(&tail, eps2);

    // The chains share their endpoints; drop each chain's last vertex.
    let mut out = head;
    out.pop();
    out.extend_from_slice(&tail[..tail.len() - 1]);
    out
}

/// Open-chain reduction with an explicit span stack; endpoints always
/// survive.
fn reduce_open(points: &[Point2i], eps2: f64) -> Vec<Point2i> {
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut spans = vec![(0_usize, last)];
    while let Some((a, b)) = spans.pop() {
        if b <= a + 1 {
            continue;
        }

        let mut farthest = a;
        let mut max_d2 = 0.0_f64;
        for i in a + 1..b {
            let d2 = chord_dist2(points[i], points[a], points[b]);
            if d2 > max_d2 {
                max_d2 = d2;
                farthest = i;
            }
        }

        if max_d2 > eps2 {
            keep[farthest] = true;
            spans.push((a, farthest));
            spans.push((farthest, b));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

/// Squared distance from `p` to the segment `a..b`.
fn chord_dist2(p: Point2i, a: Point2i, b: Point2i) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (px, py) = (p.x as f64, p.y as f64);

    let dx = bx - ax;
    let dy = by - ay;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return p.dist2(a) as f64;
    }

    let t = ((px - ax) * dx + (py - ay) * dy) / len2;
    let t = t.clamp(0.0, 1.0);
    let cx = ax + t * dx;
    let cy = ay + t * dy;
    (px - cx) * (px - cx) + (py - cy) * (py - cy)
}

#[cfg(test)]
mod tests {
    use bc_core::Point2i;

    use super::simplify_closed;

    fn p(x: i32, y: i32) -> Point2i {
        Point2i::new(x, y)
    }

    /// Boundary pixels of the axis-aligned rectangle with corners
    /// `(x0, y0)` and `(x1, y1)`, walked once around.
    fn rect_boundary(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point2i> {
        let mut out = Vec::new();
        for x in x0..=x1 {
            out.push(p(x, y0));
        }
        for y in y0 + 1..=y1 {
            out.push(p(x1, y));
        }
        for x in (x0..x1).rev() {
            out.push(p(x, y1));
        }
        for y in (y0 + 1..y1).rev() {
            out.push(p(x0, y));
        }
        out
    }

    #[test]
    fn zero_epsilon_passes_through() {
        let poly = rect_boundary(2, 2, 7, 7);
        assert_eq!(simplify_closed(&poly, 0.0), poly);
    }

    #[test]
    fn rectangle_reduces_to_its_corners() {
        let poly = rect_boundary(2, 2, 7, 7);
        let out = simplify_closed(&poly, 3.0);
        assert_eq!(out, vec![p(2, 2), p(7, 2), p(7, 7), p(2, 7)]);
    }

    #[test]
    fn oversized_epsilon_collapses_without_underflow() {
        let poly = rect_boundary(2, 2, 7, 7);
        let out = simplify_closed(&poly, 1000.0);
        assert_eq!(out, vec![p(2, 2), p(7, 7)]);
        assert!(!out.is_empty());
    }

    #[test]
    fn coincident_vertices_collapse_to_one() {
        let poly = vec![p(3, 3); 5];
        assert_eq!(simplify_closed(&poly, 0.5), vec![p(3, 3)]);
    }

    #[test]
    fn tiny_polygons_pass_through() {
        let poly = vec![p(0, 0), p(4, 1)];
        assert_eq!(simplify_closed(&poly, 2.0), poly);
    }

    #[test]
    fn reduction_is_idempotent() {
        let poly = rect_boundary(0, 0, 20, 11);
        for eps in [0.0, 0.5, 1.5, 4.0, 12.0] {
            let once = simplify_closed(&poly, eps);
            let twice = simplify_closed(&once, eps);
            assert_eq!(once, twice, "epsilon {eps}");
        }
    }

    #[test]
    fn vertex_count_is_monotone_in_epsilon() {
        // A noisy closed blob: rectangle boundary with a sawtooth top.
        let mut poly = Vec::new();
        for x in 0..=30 {
            let bump = if x % 3 == 0 { 1 } else { 0 };
            poly.push(p(x, bump));
        }
        for y in 1..=14 {
            poly.push(p(30, y));
        }
        for x in (0..30).rev() {
            poly.push(p(x, 14));
        }
        for y in (1..14).rev() {
            poly.push(p(0, y));
        }

        let mut prev = usize::MAX;
        for eps in [0.1, 0.5, 1.0, 2.0, 5.0, 20.0] {
            let n = simplify_closed(&poly, eps).len();
            assert!(n <= prev, "count grew from {prev} to {n} at epsilon {eps}");
            prev = n;
        }
    }

    #[test]
    fn output_has_no_duplicate_seam_vertex() {
        let poly = rect_boundary(1, 1, 9, 6);
        let out = simplify_closed(&poly, 2.0);
        assert_ne!(out.first(), out.last());
    }
}
