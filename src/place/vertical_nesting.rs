use crate::geom::GridPoint;
use crate::grid::{Pattern, PatternGrid};

/// Rows the sweep starts beyond the grid's occupied extent. Fixed project
/// convention, like the recovery sub-grid scale.
const SWEEP_START_OFFSET: i32 = 5;

/// Slides from beyond the grid's content toward it until the first collision
/// and nests against that content, backed off `padding` rows against the
/// travel direction. `padding == 1` nests flush.
///
/// Returns `None` when there is nothing to collide with in the travel path:
/// an empty grid, or a column whose sweep passes the opposite extreme
/// untouched.
pub fn vertical_nesting(
    grid: &mut PatternGrid,
    pattern: &Pattern,
    left_column: i32,
    padding: i32,
    on_top: bool,
) -> Option<GridPoint> {
    assert!(padding >= 1, "nesting padding must be at least 1");
    let y_range = grid.min_max_y_for_range(None)?;
    let height = pattern.height() as i32;

    // Travel downward from above the content when nesting on top, upward
    // from below it otherwise. Once the pattern has passed the opposite
    // extreme no collision can occur and the sweep gives up.
    let (start, step, limit) = if on_top {
        (y_range.min - height - SWEEP_START_OFFSET, 1, y_range.max)
    } else {
        (y_range.max + SWEEP_START_OFFSET, -1, y_range.min - height)
    };

    let mut y = start;
    loop {
        if !grid.empty_intersection(pattern, left_column, y) {
            let row = y - step * padding;
            grid.place(pattern, left_column, row);
            return Some(GridPoint::new(left_column, row));
        }
        let passed = if on_top { y > limit } else { y < limit };
        if passed {
            return None;
        }
        y += step;
    }
}
