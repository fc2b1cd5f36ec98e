use std::collections::HashMap;

use bionet_layout::anchored::{AnchoredRect, TaggedRect};
use bionet_layout::config::LayoutConfig;
use bionet_layout::geom::{GridPoint, Rect};
use bionet_layout::grid::{Pattern, PatternGrid};
use bionet_layout::place::{
    SpiralMode, SweepDirection, minimize_height, spiral, vertical_fit, vertical_nesting,
};
use bionet_layout::slice::{SliceSide, SlicedRectangle};

#[test]
fn uniform_box_probe_scenario() {
    // A 2x2 uniform box at the origin: a unit probe collides at (0, 0) and
    // clears at (2, 0).
    let mut grid = PatternGrid::new();
    grid.place(&Pattern::uniform(2, 2, "A"), 0, 0);
    let probe = Pattern::uniform(1, 1, "B");
    assert!(!grid.empty_intersection(&probe, 0, 0));
    assert!(grid.empty_intersection(&probe, 2, 0));
}

#[test]
fn interior_slice_scenario_offers_all_four_sides() {
    let sliced = SlicedRectangle::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(60.0, 40.0, 30.0, 20.0),
    );
    assert_eq!(
        sliced.first_slice_options(),
        [SliceSide::MinX, SliceSide::MaxX, SliceSide::MinY, SliceSide::MaxY]
    );
}

#[test]
fn policies_compose_on_a_shared_grid() {
    let config = LayoutConfig::default();
    let mut grid = PatternGrid::new();

    let region = Pattern::uniform(4, 3, "region-1");
    let seed = spiral(
        &mut grid,
        &region,
        GridPoint::new(0, 0),
        SpiralMode::Clockwise,
        SweepDirection::Up,
        &config,
    );
    assert_eq!(seed, GridPoint::new(0, 0));

    // A second region of the same footprint cannot share the seed cell.
    let second = spiral(
        &mut grid,
        &Pattern::uniform(4, 3, "region-2"),
        GridPoint::new(0, 0),
        SpiralMode::Clockwise,
        SweepDirection::Up,
        &config,
    );
    assert_ne!(second, seed);
    assert!(grid.empty_intersection(&Pattern::uniform(1, 1, "probe"), -100, -100));

    // Nest a strip on top of whatever the spiral produced.
    let strip = Pattern::uniform(2, 1, "strip");
    let nested = vertical_nesting(&mut grid, &strip, 0, 1, true).unwrap();
    let top = grid.min_max_y_for_range(None).unwrap().min;
    assert_eq!(nested.y, top);

    // Minimize-height must not raise the top further.
    let before = grid.min_max_y_for_range(None).unwrap().min;
    minimize_height(&mut grid, &Pattern::uniform(2, 2, "block"), 0, &config);
    assert!(grid.min_max_y_for_range(None).unwrap().min >= before);
}

#[test]
fn vertical_fit_honors_the_documented_tie_break() {
    let config = LayoutConfig::default();
    let mut grid = PatternGrid::new();
    grid.fill(0, 5, "X");
    // Rows 4 and 6 are both open at distance one; the row above wins.
    let at = vertical_fit(&mut grid, &Pattern::uniform(1, 1, "A"), 5, 0, &config);
    assert_eq!(at, GridPoint::new(0, 4));
}

#[test]
fn anchored_rect_tracks_a_region_shuffle() {
    // A label rectangle overlapping two regions; both regions then move by
    // different offsets and the label's rectangle is rebuilt around them.
    let label = Rect::new(8.0, 8.0, 24.0, 4.0);
    let anchors = [
        TaggedRect::new("left-region", Rect::new(0.0, 0.0, 16.0, 16.0)),
        TaggedRect::new("right-region", Rect::new(16.0, 0.0, 16.0, 16.0)),
    ];
    let def = AnchoredRect::new(label, &anchors);
    assert!(def.is_defined());

    let mut moved = HashMap::new();
    moved.insert(anchors[0].clone(), Rect::new(0.0, 100.0, 16.0, 16.0));
    moved.insert(anchors[1].clone(), Rect::new(16.0, 100.0, 16.0, 16.0));
    let out = def.generate_new_rect(&moved).unwrap();
    assert_eq!(out, Rect::new(8.0, 108.0, 24.0, 4.0));
}

#[test]
fn speculative_clone_supports_trial_and_discard() {
    let mut grid = PatternGrid::new();
    grid.place(&Pattern::uniform(3, 3, "base"), 0, 0);

    let pattern = Pattern::uniform(2, 2, "trial");
    let trial = grid.place_clone(&pattern, 5, 0);
    assert!(trial.empty_intersection(&Pattern::uniform(1, 1, "p"), 10, 10));
    assert_eq!(trial.value(5, 0), Some("trial"));

    // Discarding the trial leaves the authoritative grid untouched.
    drop(trial);
    assert_eq!(grid.value(5, 0), None);
    grid.place(&pattern, 5, 0);
    assert_eq!(grid.value(5, 0), Some("trial"));
}

#[test]
fn slice_plans_drive_a_full_progressive_split() {
    let target = Rect::new(0.0, 0.0, 100.0, 100.0);
    let sliced = SlicedRectangle::new(target, Rect::new(60.0, 40.0, 30.0, 20.0));
    let plans = sliced.full_slice_plans();
    assert_eq!(plans.len(), 24);

    // Any single cut must partition the target exactly.
    for side in sliced.first_slice_options() {
        let (first, second) = sliced.slice(side);
        let total = first.width * first.height + second.width * second.height;
        assert_eq!(total, target.width * target.height);
        let overlap = first.intersection(&second);
        assert!(overlap.width <= 0.0 || overlap.height <= 0.0);
    }
}
