use crate::config::LayoutConfig;
use crate::geom::GridPoint;
use crate::grid::{Pattern, PatternGrid};

/// Candidate ordering for the two-dimensional search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiralMode {
    /// Square spiral, ring by ring, clockwise starting upward.
    Clockwise,
    /// Rectangular sweep growing only to the right of the seed.
    RightOnly,
}

/// Overall sweep orientation. Only `Up` is implemented; the enum is the
/// reserved extension point for future orientations, so invalid values are
/// unrepresentable rather than checked at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Up,
}

/// Clockwise arm order, starting upward.
const CLOCKWISE: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Infinite iterator over candidate offsets, excluding the seed itself.
#[derive(Debug, Clone)]
pub struct SpiralWalk {
    kind: WalkKind,
}

#[derive(Debug, Clone)]
enum WalkKind {
    Clockwise {
        pos: GridPoint,
        arm: usize,
        arm_len: i32,
        remaining: i32,
        arms_completed: u32,
    },
    RightOnly {
        origin: GridPoint,
        ring: i32,
        row: i32,
    },
}

impl SpiralWalk {
    pub fn new(origin: GridPoint, mode: SpiralMode) -> Self {
        let kind = match mode {
            SpiralMode::Clockwise => WalkKind::Clockwise {
                pos: origin,
                arm: 0,
                arm_len: 1,
                remaining: 1,
                arms_completed: 0,
            },
            SpiralMode::RightOnly => WalkKind::RightOnly {
                origin,
                ring: 1,
                row: origin.y - 1,
            },
        };
        Self { kind }
    }
}

impl Iterator for SpiralWalk {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        match &mut self.kind {
            WalkKind::Clockwise {
                pos,
                arm,
                arm_len,
                remaining,
                arms_completed,
            } => {
                let (dx, dy) = CLOCKWISE[*arm];
                *pos = pos.offset(dx, dy);
                *remaining -= 1;
                if *remaining == 0 {
                    *arm = (*arm + 1) % 4;
                    *arms_completed += 1;
                    // Arm length grows after every second completed arm,
                    // which is what makes the walk ring-shaped.
                    if *arms_completed % 2 == 0 {
                        *arm_len += 1;
                    }
                    *remaining = *arm_len;
                }
                Some(*pos)
            }
            WalkKind::RightOnly { origin, ring, row } => {
                if *row > origin.y + *ring {
                    *ring += 1;
                    *row = origin.y - *ring;
                }
                let point = GridPoint::new(origin.x + *ring, *row);
                *row += 1;
                Some(point)
            }
        }
    }
}

/// Searches outward from `initial` for the first collision-free offset and
/// places there.
///
/// The walk is unbounded unless `config.spiral_cap` is set: the caller
/// guarantees a free slot is reachable (the grid is sparse), and a
/// configured cap turns a violated guarantee into a prompt failure instead
/// of an infinite loop.
pub fn spiral(
    grid: &mut PatternGrid,
    pattern: &Pattern,
    initial: GridPoint,
    mode: SpiralMode,
    direction: SweepDirection,
    config: &LayoutConfig,
) -> GridPoint {
    let SweepDirection::Up = direction;

    if grid.empty_intersection(pattern, initial.x, initial.y) {
        grid.place(pattern, initial.x, initial.y);
        return initial;
    }

    let mut candidates = 0u64;
    for point in SpiralWalk::new(initial, mode) {
        if let Some(cap) = config.spiral_cap {
            candidates += 1;
            assert!(
                candidates <= cap,
                "spiral placement exhausted its {cap}-candidate cap; the grid \
                 offered no free slot near ({}, {})",
                initial.x,
                initial.y
            );
        }
        if grid.empty_intersection(pattern, point.x, point.y) {
            grid.place(pattern, point.x, point.y);
            return point;
        }
    }
    unreachable!("spiral walk is infinite");
}
