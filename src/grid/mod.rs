//! The unbounded placement canvas: a sparse cell map plus a front-priority
//! list of solid regions placed as a fast path.

mod pattern;

pub use pattern::Pattern;

use std::collections::{HashMap, VecDeque};

use crate::geom::{GridPoint, GridRect, MinMax, fold_min_max};

/// A solid filled region produced by placing a filled-box pattern.
#[derive(Debug, Clone)]
struct BoxRegion {
    tag: String,
    rect: GridRect,
}

/// Unbounded sparse integer grid of occupant tags.
///
/// Explicit sparse cells always take precedence over region entries at the
/// same coordinate; among regions, the front of the list wins, so the most
/// recently placed filled box shadows older ones.
///
/// Cloning is a deep copy; callers clone deliberately to run speculative
/// placement trials and discard the clone on failure.
#[derive(Debug, Clone, Default)]
pub struct PatternGrid {
    cells: HashMap<(i32, i32), String>,
    regions: VecDeque<BoxRegion>,
}

impl PatternGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.regions.is_empty()
    }

    /// Occupies a single cell.
    pub fn fill(&mut self, x: i32, y: i32, tag: impl Into<String>) {
        let tag = tag.into();
        assert!(!tag.is_empty(), "occupant tag must be non-empty");
        self.cells.insert((x, y), tag);
    }

    /// Occupant at `(x, y)`: the sparse map first, then the region list
    /// front to back, first match wins.
    pub fn value(&self, x: i32, y: i32) -> Option<&str> {
        if let Some(tag) = self.cells.get(&(x, y)) {
            return Some(tag);
        }
        self.regions
            .iter()
            .find(|region| region.rect.contains(x, y))
            .map(|region| region.tag.as_str())
    }

    /// Reverse lookup of a tag's location. When a tag occupies several
    /// cells, which of them is returned is unspecified: sparse-map iteration
    /// order decides, then region order.
    pub fn location_of(&self, tag: &str) -> Option<GridPoint> {
        if let Some((&(x, y), _)) = self.cells.iter().find(|(_, t)| t.as_str() == tag) {
            return Some(GridPoint::new(x, y));
        }
        self.regions
            .iter()
            .find(|region| region.tag == tag)
            .map(|region| GridPoint::new(region.rect.x, region.rect.y))
    }

    /// Places a pattern with its upper-left corner at `(x, y)`.
    ///
    /// Filled boxes go to the front of the region list and absorb any sparse
    /// cells they now cover. Other patterns write cell by cell with
    /// last-write-wins semantics; callers that must not overwrite existing
    /// content pre-check [`PatternGrid::empty_intersection`].
    pub fn place(&mut self, pattern: &Pattern, x: i32, y: i32) {
        if pattern.is_filled_box() {
            let rect = GridRect::new(x, y, pattern.width() as i32, pattern.height() as i32);
            self.cells.retain(|&(cx, cy), _| !rect.contains(cx, cy));
            self.regions.push_front(BoxRegion {
                tag: pattern.filled_box_tag().to_string(),
                rect,
            });
            return;
        }
        for py in 0..pattern.height() {
            for px in 0..pattern.width() {
                // Empty source cells are no-ops, so a sparse pattern leaves
                // unrelated grid content untouched.
                if let Some(tag) = pattern.value(px, py) {
                    self.fill(x + px as i32, y + py as i32, tag);
                }
            }
        }
    }

    /// Non-destructive placement: deep-copies the grid, places into the
    /// copy, and returns it for the caller to keep or discard.
    pub fn place_clone(&self, pattern: &Pattern, x: i32, y: i32) -> PatternGrid {
        let mut trial = self.clone();
        trial.place(pattern, x, y);
        trial
    }

    /// True when placing `pattern` at `(x, y)` would coincide with no
    /// occupied cell.
    ///
    /// Filled boxes over a grid with no sparse cells reduce to
    /// rectangle-vs-rectangle tests against the region list; everything else
    /// falls back to a per-cell scan.
    pub fn empty_intersection(&self, pattern: &Pattern, x: i32, y: i32) -> bool {
        if pattern.is_filled_box() && self.cells.is_empty() {
            let rect = GridRect::new(x, y, pattern.width() as i32, pattern.height() as i32);
            return !self.regions.iter().any(|region| region.rect.intersects(&rect));
        }
        for py in 0..pattern.height() {
            for px in 0..pattern.width() {
                if pattern.value(px, py).is_some()
                    && self.value(x + px as i32, y + py as i32).is_some()
                {
                    return false;
                }
            }
        }
        true
    }

    /// Occupied row range over the cells whose column lies in `x_range`
    /// (all cells when `x_range` is `None`).
    ///
    /// Region bounds are folded in unconditionally, ignoring the requested
    /// column window; this matches the historical behavior callers depend
    /// on.
    pub fn min_max_y_for_range(&self, x_range: Option<MinMax>) -> Option<MinMax> {
        let mut range = None;
        for &(cx, cy) in self.cells.keys() {
            if x_range.is_none_or(|r| r.contains(cx)) {
                fold_min_max(&mut range, cy);
            }
        }
        for region in &self.regions {
            fold_min_max(&mut range, region.rect.y);
            fold_min_max(&mut range, region.rect.max_y());
        }
        range
    }

    /// Occupied column range over the cells whose row lies in `y_range`.
    /// Shares [`PatternGrid::min_max_y_for_range`]'s region-window caveat.
    pub fn min_max_x_for_range(&self, y_range: Option<MinMax>) -> Option<MinMax> {
        let mut range = None;
        for &(cx, cy) in self.cells.keys() {
            if y_range.is_none_or(|r| r.contains(cy)) {
                fold_min_max(&mut range, cx);
            }
        }
        for region in &self.regions {
            fold_min_max(&mut range, region.rect.x);
            fold_min_max(&mut range, region.rect.max_x());
        }
        range
    }
}
