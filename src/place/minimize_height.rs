use crate::config::LayoutConfig;
use crate::geom::{GridPoint, MinMax};
use crate::grid::{Pattern, PatternGrid};

/// Slides vertically to the shallowest slot that does not raise the grid's
/// upper bound, falling back to top-nested placement.
///
/// The sweep starts fully above the target column's content and steps
/// downward by `config.step_size`, accepting the first open slot whose
/// placement keeps the whole-grid minimum row where it was. A slot below
/// everything in the column always qualifies, so the sweep terminates.
pub fn minimize_height(
    grid: &mut PatternGrid,
    pattern: &Pattern,
    left_column: i32,
    config: &LayoutConfig,
) -> GridPoint {
    let Some(grid_range) = grid.min_max_y_for_range(None) else {
        grid.place(pattern, left_column, 0);
        return GridPoint::new(left_column, 0);
    };
    let Some(pat_range) = pattern.height_range() else {
        // A pattern with no occupied cells places nothing; the offset is
        // nominal.
        grid.place(pattern, left_column, 0);
        return GridPoint::new(left_column, 0);
    };

    let col_window = MinMax::new(left_column, left_column + pattern.width() as i32 - 1);
    let Some(col_range) = grid.min_max_y_for_range(Some(col_window)) else {
        // Nothing in the target column: nest at the top, aligned with the
        // grid's existing minimum so the bounding box stays put.
        let row = grid_range.min - pat_range.min;
        grid.place(pattern, left_column, row);
        return GridPoint::new(left_column, row);
    };

    let mut y = col_range.min - pat_range.max - 1;
    loop {
        if y + pat_range.min >= grid_range.min && grid.empty_intersection(pattern, left_column, y)
        {
            grid.place(pattern, left_column, y);
            return GridPoint::new(left_column, y);
        }
        y += config.step_size;
    }
}
