use crate::config::LayoutConfig;
use crate::geom::GridPoint;
use crate::grid::{Pattern, PatternGrid};

/// Slides only vertically around `target_row` and places at the nearest open
/// row; equidistant ties go to the row above.
///
/// The upward scan is bounded by `config.scan_limit`. The bound cannot be
/// reached on any grid a caller can actually build (the grid is sparse and
/// finite), so running out is fatal rather than recoverable.
pub fn vertical_fit(
    grid: &mut PatternGrid,
    pattern: &Pattern,
    target_row: i32,
    left_column: i32,
    config: &LayoutConfig,
) -> GridPoint {
    let mut best_up = target_row;
    let mut scanned = 0u32;
    while !grid.empty_intersection(pattern, left_column, best_up) {
        assert!(
            scanned < config.scan_limit,
            "vertical fit scanned {} rows above row {target_row} without an open slot",
            config.scan_limit
        );
        best_up -= 1;
        scanned += 1;
    }

    let row = if best_up == target_row {
        target_row
    } else {
        // The upward hit bounds the downward scan: a below-target slot wins
        // only when strictly closer, so the exclusive bound breaks ties in
        // favor of the row above.
        let max_y = target_row + (target_row - best_up);
        let mut best_down = None;
        let mut y = target_row;
        while y < max_y {
            if grid.empty_intersection(pattern, left_column, y) {
                best_down = Some(y);
                break;
            }
            y += 1;
        }
        best_down.unwrap_or(best_up)
    };

    grid.place(pattern, left_column, row);
    GridPoint::new(left_column, row)
}
