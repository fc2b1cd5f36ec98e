//! Progressive slicing of a rectangle around an overlapping sub-rectangle.

use crate::geom::{IntervalRelation, Rect, Span};

/// The four sides a cut may start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceSide {
    MinX,
    MaxX,
    MinY,
    MaxY,
}

/// A rectangle sliced around one intersecting sub-rectangle.
///
/// Both axes are classified independently and reduced to sorted cut
/// coordinates; the cuts drive which sides may legally start a split, the
/// enumeration of full split orderings, and the single-cut step.
#[derive(Debug, Clone)]
pub struct SlicedRectangle {
    to_slice: Rect,
    inter: Rect,
    x_cuts: Vec<f64>,
    y_cuts: Vec<f64>,
}

impl SlicedRectangle {
    pub fn new(to_slice: Rect, inter: Rect) -> Self {
        let x_cuts = axis_cuts(
            Span::new(to_slice.min_x(), to_slice.max_x()),
            Span::new(inter.min_x(), inter.max_x()),
        );
        let y_cuts = axis_cuts(
            Span::new(to_slice.min_y(), to_slice.max_y()),
            Span::new(inter.min_y(), inter.max_y()),
        );
        Self {
            to_slice,
            inter,
            x_cuts,
            y_cuts,
        }
    }

    pub fn to_slice(&self) -> Rect {
        self.to_slice
    }

    /// Sides that may legally start the split sequence: the side's clamped
    /// intersection boundary must differ from the outer boundary, and the
    /// axis must actually have an interior cut.
    pub fn first_slice_options(&self) -> Vec<SliceSide> {
        let clamped = self.to_slice.intersection(&self.inter);
        let mut options = Vec::new();
        if self.x_cuts.len() >= 3 {
            if clamped.min_x() > self.to_slice.min_x() {
                options.push(SliceSide::MinX);
            }
            if clamped.max_x() < self.to_slice.max_x() {
                options.push(SliceSide::MaxX);
            }
        }
        if self.y_cuts.len() >= 3 {
            if clamped.min_y() > self.to_slice.min_y() {
                options.push(SliceSide::MinY);
            }
            if clamped.max_y() < self.to_slice.max_y() {
                options.push(SliceSide::MaxY);
            }
        }
        options
    }

    /// Every ordering in which the legal sides may be cut. Factorial in the
    /// option count, bounded by the four sides (at most 24 plans).
    pub fn full_slice_plans(&self) -> Vec<Vec<SliceSide>> {
        let options = self.first_slice_options();
        if options.is_empty() {
            return Vec::new();
        }
        let mut plans = Vec::new();
        let mut current = Vec::with_capacity(options.len());
        let mut used = vec![false; options.len()];
        permute(&options, &mut used, &mut current, &mut plans);
        plans
    }

    /// Performs exactly one cut from `side`, returning the side's piece
    /// first and the remainder second; both span the full opposite axis.
    /// `side` must be one of [`SlicedRectangle::first_slice_options`].
    pub fn slice(&self, side: SliceSide) -> (Rect, Rect) {
        assert!(
            self.first_slice_options().contains(&side),
            "side {side:?} is not a legal first cut"
        );
        let r = &self.to_slice;
        match side {
            SliceSide::MinX => {
                let cut = self.x_cuts[1];
                (
                    Rect::from_corners(r.min_x(), r.min_y(), cut, r.max_y()),
                    Rect::from_corners(cut, r.min_y(), r.max_x(), r.max_y()),
                )
            }
            SliceSide::MaxX => {
                let cut = self.x_cuts[self.x_cuts.len() - 2];
                (
                    Rect::from_corners(cut, r.min_y(), r.max_x(), r.max_y()),
                    Rect::from_corners(r.min_x(), r.min_y(), cut, r.max_y()),
                )
            }
            SliceSide::MinY => {
                let cut = self.y_cuts[1];
                (
                    Rect::from_corners(r.min_x(), r.min_y(), r.max_x(), cut),
                    Rect::from_corners(r.min_x(), cut, r.max_x(), r.max_y()),
                )
            }
            SliceSide::MaxY => {
                let cut = self.y_cuts[self.y_cuts.len() - 2];
                (
                    Rect::from_corners(r.min_x(), cut, r.max_x(), r.max_y()),
                    Rect::from_corners(r.min_x(), r.min_y(), r.max_x(), cut),
                )
            }
        }
    }

    /// The full decomposition: the cross product of both axes' pieces.
    /// Exactly covers the sliced rectangle with no positive-area overlap.
    pub fn to_list(&self) -> Vec<Rect> {
        let mut pieces = Vec::new();
        for ys in self.y_cuts.windows(2) {
            for xs in self.x_cuts.windows(2) {
                pieces.push(Rect::from_corners(xs[0], ys[0], xs[1], ys[1]));
            }
        }
        pieces
    }
}

/// Sorted cut coordinates for one axis, per the interval relation between
/// the slice target's extent and the overlap's extent.
fn axis_cuts(slice: Span, inter: Span) -> Vec<f64> {
    match IntervalRelation::classify(slice, inter) {
        IntervalRelation::Equals
        | IntervalRelation::IsDisjoint
        | IntervalRelation::IsProperSuperset => vec![slice.lo, slice.hi],
        IntervalRelation::IsProperSubset => {
            let mut cuts = vec![slice.lo, inter.lo, inter.hi, slice.hi];
            cuts.sort_by(f64::total_cmp);
            cuts.dedup();
            cuts
        }
        IntervalRelation::Intersects => {
            // Partial overlap crosses exactly one boundary; the other
            // overlap boundary is the interior cut.
            if inter.lo < slice.lo {
                vec![slice.lo, inter.hi, slice.hi]
            } else {
                vec![slice.lo, inter.lo, slice.hi]
            }
        }
    }
}

fn permute(
    options: &[SliceSide],
    used: &mut [bool],
    current: &mut Vec<SliceSide>,
    plans: &mut Vec<Vec<SliceSide>>,
) {
    if current.len() == options.len() {
        plans.push(current.clone());
        return;
    }
    for i in 0..options.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(options[i]);
        permute(options, used, current, plans);
        current.pop();
        used[i] = false;
    }
}
