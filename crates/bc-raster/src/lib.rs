//! Rendering of a contour forest into a fresh binary image.
//!
//! Selection is by nesting depth (1-based, roots are depth 1):
//! - `level == 0` draws every contour,
//! - `level > 0` draws exactly the contours at that depth,
//! - `level < 0` draws depths `1..=|level|`.
//!
//! A `level` magnitude beyond the deepest realizable depth is clamped to it,
//! so filtering is total for any input.
//!
//! Strokes are 1-pixel anti-aliased lines at "on" value 255. Coverage merges
//! with `max`, so pixels are only ever raised and the rendered footprint is
//! independent of contour traversal order.

mod stroke;

use bc_core::Image;
use bc_trace::ContourSet;

use crate::stroke::stroke_closed;

/// Clamps the magnitude of a depth selector to the deepest level present,
/// keeping its sign.
pub fn clamp_level(level: i32, max_depth: usize) -> i32 {
    let m = max_depth.min(i32::MAX as usize) as i32;
    level.clamp(-m, m)
}

/// Indices of the contours a depth selector picks, in contour order.
pub fn select_indices(depths: &[usize], level: i32) -> Vec<usize> {
    depths
        .iter()
        .enumerate()
        .filter(|&(_, &d)| selected(d, level))
        .map(|(i, _)| i)
        .collect()
}

fn selected(depth: usize, level: i32) -> bool {
    if level == 0 {
        true
    } else if level > 0 {
        depth == level as usize
    } else {
        depth <= level.unsigned_abs() as usize
    }
}

/// Renders the selected contours into a zeroed `width x height` image.
pub fn render_contours(set: &ContourSet, level: i32, width: usize, height: usize) -> Image<u8> {
    let mut out = Image::new_fill(width, height, 0_u8);
    if set.is_empty() || width == 0 || height == 0 {
        return out;
    }

    let depths = set.depths();
    let max_depth = depths.iter().copied().max().unwrap_or(0);
    let level = clamp_level(level, max_depth);

    let mut view = out.as_view_mut();
    for i in select_indices(&depths, level) {
        stroke_closed(&mut view, &set.contours[i].points);
    }
    drop(view);

    out
}

#[cfg(test)]
mod tests {
    use bc_core::Image;
    use bc_trace::{ContourSet, HierarchyNode, trace_u8};

    use super::{clamp_level, render_contours, select_indices};

    fn ring_with_hole() -> Image<u8> {
        let mut data = vec![0_u8; 12 * 12];
        for y in 1..11 {
            for x in 1..11 {
                data[y * 12 + x] = 255;
            }
        }
        for y in 4..8 {
            for x in 4..8 {
                data[y * 12 + x] = 0;
            }
        }
        Image::from_vec(12, 12, data).expect("valid image")
    }

    #[test]
    fn clamp_keeps_sign_and_zero() {
        assert_eq!(clamp_level(0, 3), 0);
        assert_eq!(clamp_level(2, 3), 2);
        assert_eq!(clamp_level(7, 3), 3);
        assert_eq!(clamp_level(-7, 3), -3);
        assert_eq!(clamp_level(-1, 3), -1);
        assert_eq!(clamp_level(5, 0), 0);
    }

    #[test]
    fn selection_follows_depth_rules() {
        let depths = vec![1, 2, 2, 3, 1];

        assert_eq!(select_indices(&depths, 0), vec![0, 1, 2, 3, 4]);
        assert_eq!(select_indices(&depths, 1), vec![0, 4]);
        assert_eq!(select_indices(&depths, 2), vec![1, 2]);
        assert_eq!(select_indices(&depths, -1), vec![0, 4]);
        assert_eq!(select_indices(&depths, -2), vec![0, 1, 2, 4]);
        assert_eq!(select_indices(&depths, -3), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn level_one_draws_only_the_outer_contour() {
        let img = ring_with_hole();
        let set = trace_u8(&img.as_view()).expect("valid input");
        assert_eq!(set.len(), 2);

        let out = render_contours(&set, 1, 12, 12);
        let view = out.as_view();

        // Outer boundary pixels are lit, hole boundary pixels are not.
        assert_eq!(*view.get(1, 1).expect("in bounds"), 255);
        assert_eq!(*view.get(10, 10).expect("in bounds"), 255);
        for p in &set.contours[1].points {
            assert_eq!(*view.get(p.x as usize, p.y as usize).expect("in bounds"), 0);
        }
    }

    #[test]
    fn default_negative_level_draws_both_levels() {
        let img = ring_with_hole();
        let set = trace_u8(&img.as_view()).expect("valid input");

        let out = render_contours(&set, -2, 12, 12);
        let view = out.as_view();

        for c in &set.contours {
            for p in &c.points {
                assert_eq!(*view.get(p.x as usize, p.y as usize).expect("in bounds"), 255);
            }
        }
    }

    #[test]
    fn out_of_range_level_is_clamped_to_max_depth() {
        let img = ring_with_hole();
        let set = trace_u8(&img.as_view()).expect("valid input");

        // Depth 9 does not exist; clamps to the deepest level (the hole).
        let clamped = render_contours(&set, 9, 12, 12);
        let exact = render_contours(&set, 2, 12, 12);
        assert_eq!(clamped, exact);
    }

    #[test]
    fn full_render_is_the_pixelwise_max_of_single_renders() {
        let img = ring_with_hole();
        let set = trace_u8(&img.as_view()).expect("valid input");

        let full = render_contours(&set, 0, 12, 12);

        let mut union = vec![0_u8; 12 * 12];
        for c in &set.contours {
            let single = ContourSet {
                contours: vec![c.clone()],
                hierarchy: vec![HierarchyNode::default()],
            };
            let one = render_contours(&single, 0, 12, 12);
            for (u, &v) in union.iter_mut().zip(one.data()) {
                *u = (*u).max(v);
            }
        }

        assert_eq!(full.data(), union.as_slice());
    }

    #[test]
    fn rendering_is_deterministic() {
        let img = ring_with_hole();
        let set = trace_u8(&img.as_view()).expect("valid input");

        let a = render_contours(&set, 0, 12, 12);
        let b = render_contours(&set, 0, 12, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_set_renders_a_zeroed_image() {
        let out = render_contours(&ContourSet::default(), 0, 6, 4);
        assert!(out.data().iter().all(|&v| v == 0));
        assert_eq!(out.width(), 6);
        assert_eq!(out.height(), 4);
    }
}
