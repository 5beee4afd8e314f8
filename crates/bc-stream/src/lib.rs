//! Vertex-stream encoding of a contour set.
//!
//! Downstream consumers want the whole polygon forest as one flat,
//! fixed-width record list: three integers per vertex, no terminator, the
//! record count carried out-of-band. Records are ordered by contour index,
//! then by boundary order within the contour, so a contour's records form
//! one contiguous run.

use bc_trace::ContourSet;

/// One vertex of one contour, tagged with the contour's tracer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRecord {
    pub x: i32,
    pub y: i32,
    pub contour: i32,
}

/// Flattens every contour into vertex records. The record count equals the
/// sum of the contours' vertex counts.
pub fn encode(set: &ContourSet) -> Vec<VertexRecord> {
    let total: usize = set.contours.iter().map(|c| c.points.len()).sum();
    let mut out = Vec::with_capacity(total);

    for (i, contour) in set.contours.iter().enumerate() {
        for p in &contour.points {
            out.push(VertexRecord {
                x: p.x,
                y: p.y,
                contour: i as i32,
            });
        }
    }

    out
}

/// The N-records-by-3-fields buffer form: `x, y, contour` per record.
pub fn flatten(records: &[VertexRecord]) -> Vec<i32> {
    let mut out = Vec::with_capacity(records.len() * 3);
    for r in records {
        out.push(r.x);
        out.push(r.y);
        out.push(r.contour);
    }
    out
}

#[cfg(test)]
mod tests {
    use bc_core::Point2i;
    use bc_trace::{BorderKind, Contour, ContourSet, HierarchyNode};

    use super::{VertexRecord, encode, flatten};

    fn set_of(point_runs: &[&[(i32, i32)]]) -> ContourSet {
        let contours = point_runs
            .iter()
            .map(|run| Contour {
                points: run.iter().map(|&(x, y)| Point2i::new(x, y)).collect(),
                kind: BorderKind::Outer,
            })
            .collect::<Vec<_>>();
        let hierarchy = vec![HierarchyNode::default(); contours.len()];
        ContourSet {
            contours,
            hierarchy,
        }
    }

    #[test]
    fn empty_set_encodes_zero_records() {
        assert!(encode(&ContourSet::default()).is_empty());
    }

    #[test]
    fn record_count_is_the_vertex_sum() {
        let set = set_of(&[&[(0, 0), (3, 0), (3, 3)], &[(5, 5)], &[(1, 1), (2, 2)]]);
        let records = encode(&set);
        assert_eq!(records.len(), 6);
    }

    #[test]
    fn contour_indices_are_contiguous_runs_in_order() {
        let set = set_of(&[&[(0, 0), (3, 0)], &[(5, 5), (6, 5), (6, 6)]]);
        let records = encode(&set);

        let indices: Vec<i32> = records.iter().map(|r| r.contour).collect();
        assert_eq!(indices, vec![0, 0, 1, 1, 1]);

        assert_eq!(
            records[2],
            VertexRecord {
                x: 5,
                y: 5,
                contour: 1
            }
        );
    }

    #[test]
    fn vertices_keep_boundary_order() {
        let set = set_of(&[&[(4, 1), (5, 1), (5, 2), (4, 2)]]);
        let records = encode(&set);
        let xy: Vec<(i32, i32)> = records.iter().map(|r| (r.x, r.y)).collect();
        assert_eq!(xy, vec![(4, 1), (5, 1), (5, 2), (4, 2)]);
    }

    #[test]
    fn flat_form_is_three_ints_per_record() {
        let set = set_of(&[&[(7, 8), (9, 10)]]);
        let records = encode(&set);
        assert_eq!(flatten(&records), vec![7, 8, 0, 9, 10, 0]);
    }
}
