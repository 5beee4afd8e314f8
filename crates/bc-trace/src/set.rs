use bc_core::Point2i;

/// Whether a border separates foreground from the outside or from an
/// enclosed background region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    Outer,
    Hole,
}

/// Closed boundary polyline, one vertex per boundary pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point2i>,
    pub kind: BorderKind,
}

/// Containment links for one contour, all indices into the owning
/// [`ContourSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HierarchyNode {
    pub next: Option<usize>,
    pub prev: Option<usize>,
    pub first_child: Option<usize>,
    pub parent: Option<usize>,
}

/// Traced contours plus their containment forest, indexed identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSet {
    pub contours: Vec<Contour>,
    pub hierarchy: Vec<HierarchyNode>,
}

impl ContourSet {
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// 1-based nesting depth per contour: roots are depth 1, their children
    /// depth 2, and so on. Relies on the tracer invariant that a border's
    /// parent is discovered before the border itself.
    pub fn depths(&self) -> Vec<usize> {
        let mut out = vec![0usize; self.hierarchy.len()];
        for (i, node) in self.hierarchy.iter().enumerate() {
            out[i] = match node.parent {
                Some(p) => {
                    debug_assert!(p < i, "parent must precede child in discovery order");
                    out[p] + 1
                }
                None => 1,
            };
        }
        out
    }

    /// Deepest nesting level present, 0 for an empty set.
    pub fn max_depth(&self) -> usize {
        self.depths().into_iter().max().unwrap_or(0)
    }
}
