//! Rectangles whose position is defined relationally by their overlap with a
//! set of anchor rectangles, and recomputed after the anchors move.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::error::LayoutError;
use crate::geom::Rect;

/// A rectangle with an opaque identity tag.
///
/// Identity is the tag: hashing and equality look only at it. A tag is
/// required to always denote the same geometry, so comparing two equal tags
/// with differing rectangles is a programming error and fails fast.
#[derive(Debug, Clone)]
pub struct TaggedRect {
    tag: String,
    rect: Rect,
}

impl TaggedRect {
    pub fn new(tag: impl Into<String>, rect: Rect) -> Self {
        let tag = tag.into();
        assert!(!tag.is_empty(), "tagged rect requires a non-empty tag");
        Self { tag, rect }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl PartialEq for TaggedRect {
    fn eq(&self, other: &Self) -> bool {
        if self.tag != other.tag {
            return false;
        }
        assert!(
            self.rect == other.rect,
            "tagged rect \"{}\" seen with two different geometries",
            self.tag
        );
        true
    }
}

impl Eq for TaggedRect {}

impl Hash for TaggedRect {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

/// Distances from the union of anchor overlaps to the target's four sides.
#[derive(Debug, Clone, Copy, Default)]
struct SideDeltas {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

/// A rectangle defined by its overlaps with a set of anchors.
///
/// Construction records each qualifying overlap in the anchor's original
/// coordinates plus the margins from the overlap union to the target's
/// sides; [`AnchoredRect::generate_new_rect`] replays those overlaps against
/// moved anchors to recover where the target must now sit.
#[derive(Debug, Clone)]
pub struct AnchoredRect {
    overlaps: Vec<(TaggedRect, Rect)>,
    deltas: SideDeltas,
}

impl AnchoredRect {
    /// Records the target's overlap with every qualifying anchor.
    ///
    /// Anchors are processed in side order (min-x, min-y, max-x, max-y) so
    /// the stored definition is independent of the input's iteration order.
    /// Zero-width or zero-height intersections (edge or corner contact)
    /// still qualify; only negative extents are rejected.
    pub fn new(target: Rect, anchors: &[TaggedRect]) -> Self {
        let mut sorted: Vec<&TaggedRect> = anchors.iter().collect();
        sorted.sort_by(|a, b| a.rect().side_order(&b.rect()));

        let mut overlaps = Vec::new();
        let mut union: Option<Rect> = None;
        for anchor in sorted {
            let inter = target.intersection(&anchor.rect());
            if inter.width >= 0.0 && inter.height >= 0.0 {
                union = Some(match union {
                    Some(u) => u.union(&inter),
                    None => inter,
                });
                overlaps.push((anchor.clone(), inter));
            }
        }

        let deltas = match union {
            Some(u) => SideDeltas {
                min_x: u.min_x() - target.min_x(),
                min_y: u.min_y() - target.min_y(),
                max_x: target.max_x() - u.max_x(),
                max_y: target.max_y() - u.max_y(),
            },
            None => SideDeltas::default(),
        };

        Self { overlaps, deltas }
    }

    /// False iff no anchor intersected the target at construction.
    pub fn is_defined(&self) -> bool {
        !self.overlaps.is_empty()
    }

    /// Recomputes the target's rectangle from the anchors' new positions.
    ///
    /// Each stored overlap is normalized into its anchor's original frame
    /// (fractional position per axis, zero-size axes mapping to 0.0),
    /// replayed into the anchor's new rectangle, unioned, and widened by the
    /// stored side margins. Every recorded anchor must appear in
    /// `old_to_new`.
    pub fn generate_new_rect(
        &self,
        old_to_new: &HashMap<TaggedRect, Rect>,
    ) -> Result<Rect, LayoutError> {
        assert!(
            self.is_defined(),
            "generate_new_rect on a definition with no anchor overlaps"
        );

        let mut union: Option<Rect> = None;
        for (anchor, inter) in &self.overlaps {
            let new_rect = old_to_new
                .get(anchor)
                .ok_or_else(|| LayoutError::MissingAnchor {
                    tag: anchor.tag().to_string(),
                })?;
            let old = anchor.rect();
            let transformed = if *new_rect == old {
                // An unmoved anchor reproduces its recorded overlap exactly;
                // round-tripping through the fractional frame would
                // reintroduce rounding.
                *inter
            } else {
                let fx0 = normalize(inter.min_x(), old.min_x(), old.width);
                let fx1 = normalize(inter.max_x(), old.min_x(), old.width);
                let fy0 = normalize(inter.min_y(), old.min_y(), old.height);
                let fy1 = normalize(inter.max_y(), old.min_y(), old.height);
                Rect::from_corners(
                    new_rect.min_x() + fx0 * new_rect.width,
                    new_rect.min_y() + fy0 * new_rect.height,
                    new_rect.min_x() + fx1 * new_rect.width,
                    new_rect.min_y() + fy1 * new_rect.height,
                )
            };
            union = Some(match union {
                Some(u) => u.union(&transformed),
                None => transformed,
            });
        }

        let u = union.expect("defined anchored rect has at least one overlap");
        let min_x = u.min_x() - self.deltas.min_x;
        let min_y = u.min_y() - self.deltas.min_y;
        let max_x = u.max_x() + self.deltas.max_x;
        let max_y = u.max_y() + self.deltas.max_y;
        Ok(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Fractional position of `v` within `[lo, lo + size]`; degenerate
/// zero-size axes map to 0.0.
fn normalize(v: f64, lo: f64, size: f64) -> f64 {
    if size == 0.0 { 0.0 } else { (v - lo) / size }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_map(anchors: &[TaggedRect]) -> HashMap<TaggedRect, Rect> {
        anchors.iter().map(|a| (a.clone(), a.rect())).collect()
    }

    #[test]
    fn no_overlapping_anchor_leaves_the_rect_undefined() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        let anchors = [TaggedRect::new("far", Rect::new(50.0, 50.0, 5.0, 5.0))];
        let def = AnchoredRect::new(target, &anchors);
        assert!(!def.is_defined());
    }

    #[test]
    fn edge_contact_still_counts_as_an_overlap() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        let anchors = [TaggedRect::new("touch", Rect::new(10.0, 0.0, 5.0, 5.0))];
        let def = AnchoredRect::new(target, &anchors);
        assert!(def.is_defined());
    }

    #[test]
    fn unchanged_anchors_reproduce_the_original_rect_exactly() {
        let target = Rect::new(3.0, 7.0, 40.0, 20.0);
        let anchors = [
            TaggedRect::new("a", Rect::new(0.0, 0.0, 10.0, 30.0)),
            TaggedRect::new("b", Rect::new(20.0, 10.0, 30.0, 5.0)),
        ];
        let def = AnchoredRect::new(target, &anchors);
        assert!(def.is_defined());
        let out = def.generate_new_rect(&identity_map(&anchors)).unwrap();
        assert_eq!(out.x, target.x);
        assert_eq!(out.y, target.y);
        assert_eq!(out.width, target.width);
        assert_eq!(out.height, target.height);
    }

    #[test]
    fn translated_anchor_translates_the_rect() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        let anchors = [TaggedRect::new("a", Rect::new(2.0, 2.0, 4.0, 4.0))];
        let def = AnchoredRect::new(target, &anchors);
        let mut map = HashMap::new();
        map.insert(anchors[0].clone(), Rect::new(102.0, 52.0, 4.0, 4.0));
        let out = def.generate_new_rect(&map).unwrap();
        assert_eq!(out, Rect::new(100.0, 50.0, 10.0, 10.0));
    }

    #[test]
    fn scaled_anchor_scales_the_recorded_overlap() {
        let target = Rect::new(0.0, 0.0, 8.0, 8.0);
        // Anchor overlaps the target's right half.
        let anchors = [TaggedRect::new("a", Rect::new(4.0, 0.0, 8.0, 8.0))];
        let def = AnchoredRect::new(target, &anchors);
        // Anchor doubles in width without moving.
        let mut map = HashMap::new();
        map.insert(anchors[0].clone(), Rect::new(4.0, 0.0, 16.0, 8.0));
        let out = def.generate_new_rect(&map).unwrap();
        // The overlap was the anchor's left half, so it doubles too; the
        // stored left margin (4.0) is re-applied unscaled.
        assert_eq!(out, Rect::new(0.0, 0.0, 12.0, 8.0));
    }

    #[test]
    fn missing_anchor_is_an_explicit_error() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        let anchors = [TaggedRect::new("a", Rect::new(2.0, 2.0, 4.0, 4.0))];
        let def = AnchoredRect::new(target, &anchors);
        let err = def.generate_new_rect(&HashMap::new()).unwrap_err();
        assert!(matches!(err, LayoutError::MissingAnchor { tag } if tag == "a"));
    }

    #[test]
    fn zero_size_anchor_axis_normalizes_to_zero() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        let anchors = [TaggedRect::new("line", Rect::new(5.0, 2.0, 0.0, 4.0))];
        let def = AnchoredRect::new(target, &anchors);
        let mut map = HashMap::new();
        map.insert(anchors[0].clone(), Rect::new(25.0, 2.0, 0.0, 4.0));
        let out = def.generate_new_rect(&map).unwrap();
        // The overlap is the line itself; margins restore the full target
        // extent around its new position.
        assert_eq!(out.width, 10.0);
        assert_eq!(out.height, 10.0);
        assert_eq!(out.x, 20.0);
    }

    #[test]
    #[should_panic(expected = "two different geometries")]
    fn same_tag_with_different_geometry_fails_fast() {
        let a = TaggedRect::new("a", Rect::new(0.0, 0.0, 1.0, 1.0));
        let b = TaggedRect::new("a", Rect::new(5.0, 5.0, 1.0, 1.0));
        let _ = a == b;
    }
}
