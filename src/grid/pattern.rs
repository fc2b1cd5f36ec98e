use std::collections::BTreeSet;

use crate::geom::{MinMax, fold_min_max};

/// Cell storage for a pattern: a dense row-major array of optional occupant
/// tags, or a degenerate uniform box where every cell carries the same tag.
#[derive(Debug, Clone)]
enum Cells {
    Dense(Vec<Option<String>>),
    Uniform(String),
}

/// Fixed-size rectangular occupancy template.
///
/// Dimensions are fixed at construction. Cells are addressed in pattern-local
/// coordinates, `(0, 0)` at the upper-left corner.
#[derive(Debug, Clone)]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Cells,
}

impl Pattern {
    /// Empty dense pattern.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 1 && height >= 1, "pattern must be at least 1x1");
        Self {
            width,
            height,
            cells: Cells::Dense(vec![None; width * height]),
        }
    }

    /// Uniform filled box: every cell occupied by `tag`.
    pub fn uniform(width: usize, height: usize, tag: impl Into<String>) -> Self {
        assert!(width >= 1 && height >= 1, "pattern must be at least 1x1");
        let tag = tag.into();
        assert!(!tag.is_empty(), "occupant tag must be non-empty");
        Self {
            width,
            height,
            cells: Cells::Uniform(tag),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn check_bounds(&self, x: usize, y: usize) {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} pattern",
            self.width,
            self.height
        );
    }

    /// Occupant of the cell at `(x, y)`, or `None` for an empty cell.
    /// Panics when queried outside the pattern's bounds.
    pub fn value(&self, x: usize, y: usize) -> Option<&str> {
        self.check_bounds(x, y);
        match &self.cells {
            Cells::Dense(cells) => cells[y * self.width + x].as_deref(),
            Cells::Uniform(tag) => Some(tag),
        }
    }

    /// Occupies a single cell. Only dense patterns support per-cell writes;
    /// a uniform pattern's shape is fixed by construction.
    pub fn fill(&mut self, x: usize, y: usize, tag: impl Into<String>) {
        self.check_bounds(x, y);
        let tag = tag.into();
        assert!(!tag.is_empty(), "occupant tag must be non-empty");
        match &mut self.cells {
            Cells::Dense(cells) => cells[y * self.width + x] = Some(tag),
            Cells::Uniform(_) => panic!("cannot fill individual cells of a uniform pattern"),
        }
    }

    /// Occupies every cell with `tag`. On a uniform pattern this is legal
    /// only when `tag` matches the existing occupant.
    pub fn fill_all(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        assert!(!tag.is_empty(), "occupant tag must be non-empty");
        match &mut self.cells {
            Cells::Dense(cells) => {
                for cell in cells.iter_mut() {
                    *cell = Some(tag.clone());
                }
            }
            Cells::Uniform(existing) => {
                assert!(
                    *existing == tag,
                    "fill_all(\"{tag}\") conflicts with uniform occupant \"{existing}\""
                );
            }
        }
    }

    /// True when every cell is occupied and all cells carry the same tag.
    /// Such patterns are eligible for the solid-region fast path in the grid.
    pub fn is_filled_box(&self) -> bool {
        match &self.cells {
            Cells::Uniform(_) => true,
            Cells::Dense(cells) => {
                let mut single: Option<&str> = None;
                for cell in cells {
                    match (cell.as_deref(), single) {
                        (None, _) => return false,
                        (Some(tag), None) => single = Some(tag),
                        (Some(tag), Some(seen)) if tag != seen => return false,
                        _ => {}
                    }
                }
                true
            }
        }
    }

    /// Tight range of rows containing at least one occupied cell, or `None`
    /// when the pattern is entirely empty.
    pub fn height_range(&self) -> Option<MinMax> {
        match &self.cells {
            Cells::Uniform(_) => Some(MinMax::new(0, self.height as i32 - 1)),
            Cells::Dense(cells) => {
                let mut range = None;
                for y in 0..self.height {
                    let row_occupied =
                        (0..self.width).any(|x| cells[y * self.width + x].is_some());
                    if row_occupied {
                        fold_min_max(&mut range, y as i32);
                    }
                }
                range
            }
        }
    }

    /// Tight range of columns containing at least one occupied cell.
    pub fn width_range(&self) -> Option<MinMax> {
        match &self.cells {
            Cells::Uniform(_) => Some(MinMax::new(0, self.width as i32 - 1)),
            Cells::Dense(cells) => {
                let mut range = None;
                for x in 0..self.width {
                    let col_occupied =
                        (0..self.height).any(|y| cells[y * self.width + x].is_some());
                    if col_occupied {
                        fold_min_max(&mut range, x as i32);
                    }
                }
                range
            }
        }
    }

    /// Distinct occupant tags, in deterministic order.
    pub fn occupants(&self) -> BTreeSet<&str> {
        match &self.cells {
            Cells::Uniform(tag) => BTreeSet::from([tag.as_str()]),
            Cells::Dense(cells) => cells.iter().filter_map(|c| c.as_deref()).collect(),
        }
    }

    /// The single occupant of a filled box. Panics when the pattern is not
    /// a filled box.
    pub(crate) fn filled_box_tag(&self) -> &str {
        match &self.cells {
            Cells::Uniform(tag) => tag,
            Cells::Dense(cells) => {
                assert!(self.is_filled_box(), "pattern is not a filled box");
                cells[0].as_deref().unwrap()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_pattern_reports_every_cell_occupied() {
        let pat = Pattern::uniform(3, 2, "A");
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(pat.value(x, y), Some("A"));
            }
        }
        assert!(pat.is_filled_box());
        assert_eq!(pat.height_range(), Some(MinMax::new(0, 1)));
        assert_eq!(pat.width_range(), Some(MinMax::new(0, 2)));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn uniform_pattern_rejects_out_of_bounds_query() {
        let pat = Pattern::uniform(2, 2, "A");
        pat.value(2, 0);
    }

    #[test]
    #[should_panic(expected = "at least 1x1")]
    fn zero_width_pattern_fails_fast() {
        Pattern::new(0, 3);
    }

    #[test]
    fn dense_pattern_tracks_occupied_ranges() {
        let mut pat = Pattern::new(4, 4);
        assert_eq!(pat.height_range(), None);
        pat.fill(1, 2, "A");
        pat.fill(2, 2, "B");
        assert_eq!(pat.height_range(), Some(MinMax::at(2)));
        assert_eq!(pat.width_range(), Some(MinMax::new(1, 2)));
    }

    #[test]
    fn filled_box_requires_single_distinct_tag() {
        let mut pat = Pattern::new(2, 1);
        pat.fill(0, 0, "A");
        assert!(!pat.is_filled_box());
        pat.fill(1, 0, "B");
        assert!(!pat.is_filled_box());
        pat.fill(1, 0, "A");
        assert!(pat.is_filled_box());
    }

    #[test]
    fn fill_all_on_dense_overwrites_every_cell() {
        let mut pat = Pattern::new(2, 2);
        pat.fill(0, 0, "A");
        pat.fill_all("B");
        assert!(pat.is_filled_box());
        assert_eq!(pat.occupants().into_iter().collect::<Vec<_>>(), ["B"]);
    }

    #[test]
    #[should_panic(expected = "conflicts with uniform occupant")]
    fn fill_all_with_conflicting_tag_on_uniform_fails_fast() {
        let mut pat = Pattern::uniform(2, 2, "A");
        pat.fill_all("B");
    }

    #[test]
    #[should_panic(expected = "uniform pattern")]
    fn per_cell_fill_on_uniform_fails_fast() {
        let mut pat = Pattern::uniform(2, 2, "A");
        pat.fill(0, 0, "A");
    }

    #[test]
    fn occupants_are_deduplicated_and_sorted() {
        let mut pat = Pattern::new(3, 1);
        pat.fill(0, 0, "B");
        pat.fill(2, 0, "A");
        let tags: Vec<&str> = pat.occupants().into_iter().collect();
        assert_eq!(tags, ["A", "B"]);
    }
}
