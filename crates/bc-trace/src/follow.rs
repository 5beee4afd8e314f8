use bc_core::{Error, ImageView, Point2i};

use crate::set::{BorderKind, Contour, ContourSet, HierarchyNode};

// Neighbor order for the directional sweeps: index 0 is the right neighbor,
// indices increase counterclockwise (y grows downward).
const DX: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Traces all contours of an 8-bit image. Any non-zero sample is foreground.
pub fn trace_u8(img: &ImageView<'_, u8>) -> Result<ContourSet, Error> {
    let mut grid = padded_grid(img, |&v| v != 0)?;
    Ok(trace_grid(img.width(), img.height(), &mut grid))
}

/// Traces all contours of an f32 image. Any non-zero sample is foreground.
pub fn trace_f32(img: &ImageView<'_, f32>) -> Result<ContourSet, Error> {
    let mut grid = padded_grid(img, |&v| v != 0.0)?;
    Ok(trace_grid(img.width(), img.height(), &mut grid))
}

/// Traces all contours of an f64 image. Any non-zero sample is foreground.
pub fn trace_f64(img: &ImageView<'_, f64>) -> Result<ContourSet, Error> {
    let mut grid = padded_grid(img, |&v| v != 0.0)?;
    Ok(trace_grid(img.width(), img.height(), &mut grid))
}

/// Builds the working label grid: the binarized image surrounded by a
/// 1-pixel zero frame, so border following never needs bounds checks.
fn padded_grid<T>(img: &ImageView<'_, T>, fg: impl Fn(&T) -> bool) -> Result<Vec<i32>, Error> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage { width, height });
    }

    let stride = width + 2;
    let mut grid = vec![0i32; stride * (height + 2)];
    for y in 0..height {
        let base = (y + 1) * stride + 1;
        for (x, px) in img.row(y).iter().enumerate() {
            if fg(px) {
                grid[base + x] = 1;
            }
        }
    }

    Ok(grid)
}

/// Raster scan over the label grid. Each unvisited border start launches one
/// border following pass; the scan also maintains the number of the last
/// border met on the current row (`lnbd`), which determines the new border's
/// parent.
fn trace_grid(width: usize, height: usize, grid: &mut [i32]) -> ContourSet {
    let stride = width + 2;
    let deltas = neighbor_deltas(stride);

    let mut contours: Vec<Contour> = Vec::new();
    let mut kinds: Vec<BorderKind> = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();

    // Border numbering starts at 2; 1 is reserved for the frame.
    let mut nbd = 1_i32;

    for y in 0..height {
        let mut lnbd = 1_i32;
        let row = (y + 1) * stride;

        for x in 0..width {
            let pos = row + x + 1;
            let v = grid[pos];
            if v == 0 {
                continue;
            }

            let is_outer = v == 1 && grid[pos - 1] == 0;
            let is_hole = !is_outer && v >= 1 && grid[pos + 1] == 0;

            if is_outer || is_hole {
                let kind = if is_hole {
                    BorderKind::Hole
                } else {
                    BorderKind::Outer
                };

                if is_hole && v > 1 {
                    lnbd = v;
                }

                nbd += 1;
                let parent = parent_of(lnbd, kind, &kinds, &parents);
                let points = follow_border(
                    grid,
                    pos,
                    nbd,
                    Point2i::new(x as i32, y as i32),
                    kind,
                    &deltas,
                );

                kinds.push(kind);
                parents.push(parent);
                contours.push(Contour { points, kind });
            }

            let relabeled = grid[pos];
            if relabeled != 1 {
                lnbd = relabeled.abs();
            }
        }
    }

    let hierarchy = link_hierarchy(&parents);
    ContourSet {
        contours,
        hierarchy,
    }
}

/// Containment rule: a border whose kind matches the last met border shares
/// that border's parent; otherwise the last met border encloses it. The
/// frame counts as a parentless hole border.
fn parent_of(
    lnbd: i32,
    kind: BorderKind,
    kinds: &[BorderKind],
    parents: &[Option<usize>],
) -> Option<usize> {
    if lnbd < 2 {
        return None;
    }

    let b = (lnbd - 2) as usize;
    if kinds[b] == kind {
        parents[b]
    } else {
        Some(b)
    }
}

/// Follows one border starting at `pos`, labeling visited pixels with `nbd`
/// (negated where the border touches background on its right) and collecting
/// the boundary pixels in walk order.
fn follow_border(
    grid: &mut [i32],
    pos: usize,
    nbd: i32,
    start: Point2i,
    kind: BorderKind,
    deltas: &[isize; 16],
) -> Vec<Point2i> {
    // Clockwise probe for a first neighbor. It starts at the neighbor the
    // scan already proved to be zero (left for outer borders, right for
    // holes), so a match on the starting direction itself is impossible.
    let mut s = match kind {
        BorderKind::Hole => 0_usize,
        BorderKind::Outer => 4,
    };

    let mut found = false;
    for _ in 0..8 {
        s = (s + 7) & 7;
        if grid[offset(pos, deltas[s])] != 0 {
            found = true;
            break;
        }
    }

    if !found {
        // Isolated pixel.
        grid[pos] = -nbd;
        return vec![start];
    }

    let pos1 = offset(pos, deltas[s]);
    let mut pos3 = pos;
    let mut point = start;
    let mut points = Vec::new();

    loop {
        let s_end = s;

        // Counterclockwise sweep for the next border pixel. Terminates
        // because pos3 has at least one non-zero neighbor.
        let pos4 = loop {
            s = (s + 1) & 15;
            let cand = offset(pos3, deltas[s]);
            if grid[cand] != 0 {
                break cand;
            }
        };
        s &= 7;

        // The sweep crossed direction 0 iff 1 <= s <= s_end: the right-hand
        // neighbor was examined and found empty.
        if s.wrapping_sub(1) < s_end {
            grid[pos3] = -nbd;
        } else if grid[pos3] == 1 {
            grid[pos3] = nbd;
        }

        points.push(point);
        point = Point2i::new(point.x + DX[s], point.y + DY[s]);

        // Back at the start in the starting configuration.
        if pos4 == pos && pos3 == pos1 {
            break;
        }

        pos3 = pos4;
        s = (s + 4) & 7;
    }

    points
}

/// Sibling and first-child links from the per-contour parents, chained in
/// discovery order. Root contours form one sibling chain.
fn link_hierarchy(parents: &[Option<usize>]) -> Vec<HierarchyNode> {
    let mut nodes = vec![HierarchyNode::default(); parents.len()];
    let mut last_root: Option<usize> = None;
    let mut last_child: Vec<Option<usize>> = vec![None; parents.len()];

    for (i, &parent) in parents.iter().enumerate() {
        nodes[i].parent = parent;

        let prev = match parent {
            None => last_root.replace(i),
            Some(par) => {
                let p = last_child[par].replace(i);
                if p.is_none() {
                    nodes[par].first_child = Some(i);
                }
                p
            }
        };

        if let Some(p) = prev {
            nodes[p].next = Some(i);
            nodes[i].prev = Some(p);
        }
    }

    nodes
}

/// Flat offsets for the 8 sweep directions, doubled so a sweep index can run
/// past 7 without masking on every step.
fn neighbor_deltas(stride: usize) -> [isize; 16] {
    let mut deltas = [0_isize; 16];
    for i in 0..8 {
        let d = DX[i] as isize + DY[i] as isize * stride as isize;
        deltas[i] = d;
        deltas[i + 8] = d;
    }
    deltas
}

#[inline]
fn offset(pos: usize, delta: isize) -> usize {
    (pos as isize + delta) as usize
}
