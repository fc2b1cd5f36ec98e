//! Orthogonality recovery for bent link paths.
//!
//! A link path is expected to run strictly along the routing axes. After
//! regions move, a three-point stretch (start, corner, end) can end up bent;
//! recovery searches for the smallest set of point moves that restores
//! orthogonality, honoring each point's directional freedom and an external
//! travel oracle. Results are candidate option pairs for the caller to apply
//! or discard; the working path is always restored before returning.

mod dof;
mod revision;

pub use dof::{DirectionDof, DofOption, DofOptionPair, DofSlot, PointDof, PointId};

use std::collections::BTreeSet;

use crate::config::LayoutConfig;
use crate::geom::{GridPoint, snap_to_grid};

use revision::{RevisionStack, Trial};

/// Sub-grid precision multiplier for candidate vector math. Fixed project
/// convention, matching the routing grid's tenth-cell resolution.
const SUBGRID_SCALE: i32 = 10;

/// Routing metadata handed to the travel oracle alongside the path.
#[derive(Debug, Clone)]
pub struct TravelQuery {
    pub link: String,
    pub source: String,
    pub target: String,
    /// Group tags whose occupancy the oracle must ignore.
    pub exemptions: BTreeSet<String>,
}

impl TravelQuery {
    pub fn new(
        link: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            link: link.into(),
            source: source.into(),
            target: target.into(),
            exemptions: BTreeSet::new(),
        }
    }
}

/// External collision and orthogonality oracle. The routing engine that owns
/// the full occupancy state implements this; recovery only proposes paths.
pub trait TravelOracle {
    fn have_dof_will_travel(&self, path: &[GridPoint; 3], query: &TravelQuery) -> bool;
}

/// Supplies the directional freedom of a link's points, by point depth.
pub trait DofSource {
    fn point_dof(&self, link: &str, depth: usize) -> Option<PointDof>;
}

/// One recovery invocation over a start → corner → end stretch.
#[derive(Debug, Clone)]
pub struct RecoveryTask {
    pub points: [GridPoint; 3],
    pub ids: [PointId; 3],
    /// Per-point directional freedom; `None` means the point may not move.
    pub dofs: [Option<PointDof>; 3],
    pub query: TravelQuery,
    /// The start → corner segment must come out axis-aligned.
    pub require_first_ortho: bool,
    /// Both segments around the corner must come out axis-aligned.
    pub require_corner_ortho: bool,
}

impl RecoveryTask {
    /// Builds a task by querying `dofs` for each point's freedom.
    pub fn with_dofs_from(
        points: [GridPoint; 3],
        ids: [PointId; 3],
        query: TravelQuery,
        dofs: &impl DofSource,
        require_first_ortho: bool,
        require_corner_ortho: bool,
    ) -> Self {
        let fetched = [
            dofs.point_dof(&ids[0].link, ids[0].depth),
            dofs.point_dof(&ids[1].link, ids[1].depth),
            dofs.point_dof(&ids[2].link, ids[2].depth),
        ];
        Self {
            points,
            ids,
            dofs: fetched,
            query,
            require_first_ortho,
            require_corner_ortho,
        }
    }
}

enum FirstPoint {
    Unneeded,
    Revised(DofOption),
    Failed,
}

pub struct RecoveryAnalyzer<'a, O: TravelOracle> {
    oracle: &'a O,
    config: &'a LayoutConfig,
}

impl<'a, O: TravelOracle> RecoveryAnalyzer<'a, O> {
    pub fn new(oracle: &'a O, config: &'a LayoutConfig) -> Self {
        Self { oracle, config }
    }

    /// Searches for point moves restoring orthogonality. Returns no pairs
    /// when recovery is impossible within the constraints, one pair for a
    /// deterministic fix, or several when multiple corner candidates
    /// survive the oracle.
    pub fn generate_dof_options(&self, task: &RecoveryTask) -> Vec<DofOptionPair> {
        let mut points = task.points;
        let mut stack = RevisionStack::default();

        let first_option = match self.analyze_first_point(task, &mut points, &mut stack) {
            FirstPoint::Failed => return Vec::new(),
            FirstPoint::Revised(option) => Some(option),
            FirstPoint::Unneeded => None,
        };

        let mut pairs = Vec::new();
        if self.need_corner_analysis(task, &points) {
            let candidates = self.prepare_corner_analysis(task, &points);
            self.do_corner_analysis(task, &mut points, &mut stack, &candidates, &first_option, &mut pairs);
        } else if let Some(first) = first_option {
            pairs.push(DofOptionPair {
                first: Some(first),
                corner: None,
            });
        }

        // Push/pop symmetry: whatever the outcome, the working path leaves
        // exactly as it arrived.
        stack.unwind_to(&mut points, 0);
        debug_assert_eq!(points, task.points);
        pairs
    }

    /// Step 1: when the first segment must be orthogonal and is not, slide
    /// the first point along its run direction, re-test through the oracle,
    /// and abort the whole pass if the tentative move does not travel.
    fn analyze_first_point(
        &self,
        task: &RecoveryTask,
        points: &mut [GridPoint; 3],
        stack: &mut RevisionStack,
    ) -> FirstPoint {
        if !task.require_first_ortho || segment_is_orthogonal(points[0], points[1]) {
            return FirstPoint::Unneeded;
        }
        let Some(dof) = task.dofs[0].as_ref() else {
            return FirstPoint::Failed;
        };
        let Some(candidate) = first_point_candidate(points[0], points[1], dof, self.config.grid_unit)
        else {
            return FirstPoint::Failed;
        };
        if !dof.permits_move(points[0], candidate) {
            return FirstPoint::Failed;
        }

        let mut trial = Trial::begin(stack, points);
        trial.apply(0, candidate);
        if !self.oracle.have_dof_will_travel(trial.points(), &task.query) {
            // Trial drop rolls the tentative point back.
            return FirstPoint::Failed;
        }
        trial.commit();
        FirstPoint::Revised(DofOption {
            point: task.ids[0].clone(),
            position: candidate,
        })
    }

    /// Step 2: corner analysis runs only when corner orthogonality is
    /// specifically required and still absent after the first-point pass.
    fn need_corner_analysis(&self, task: &RecoveryTask, points: &[GridPoint; 3]) -> bool {
        task.require_corner_ortho && !corner_is_orthogonal(points)
    }

    /// Step 3: candidate corner positions. Which neighbors carry a DoF
    /// decides whether the corner aligns against one neighbor or completes
    /// an L against both; candidates are snapped to the routing grid and
    /// deduplicated.
    fn prepare_corner_analysis(
        &self,
        task: &RecoveryTask,
        points: &[GridPoint; 3],
    ) -> Vec<GridPoint> {
        let [start, corner, end] = *points;
        let raw = match (task.dofs[0].is_some(), task.dofs[2].is_some()) {
            (true, true) => vec![
                GridPoint::new(start.x, end.y),
                GridPoint::new(end.x, start.y),
            ],
            (true, false) => vec![
                GridPoint::new(start.x, corner.y),
                GridPoint::new(corner.x, start.y),
            ],
            (false, true) => vec![
                GridPoint::new(end.x, corner.y),
                GridPoint::new(corner.x, end.y),
            ],
            (false, false) => Vec::new(),
        };
        let mut candidates = Vec::new();
        for c in raw {
            let snapped = snap_to_grid(c, self.config.grid_unit);
            if snapped != corner && !candidates.contains(&snapped) {
                candidates.push(snapped);
            }
        }
        candidates
    }

    /// Step 4: trial each candidate, keep the ones the oracle accepts, and
    /// restore the working path between candidates.
    fn do_corner_analysis(
        &self,
        task: &RecoveryTask,
        points: &mut [GridPoint; 3],
        stack: &mut RevisionStack,
        candidates: &[GridPoint],
        first_option: &Option<DofOption>,
        pairs: &mut Vec<DofOptionPair>,
    ) {
        let Some(corner_dof) = task.dofs[1].as_ref() else {
            return;
        };
        for &candidate in candidates {
            if !corner_dof.permits_move(points[1], candidate) {
                continue;
            }
            let mut trial = Trial::begin(stack, points);
            trial.apply(1, candidate);
            if self.oracle.have_dof_will_travel(trial.points(), &task.query) {
                pairs.push(DofOptionPair {
                    first: first_option.clone(),
                    corner: Some(DofOption {
                        point: task.ids[1].clone(),
                        position: candidate,
                    }),
                });
            }
            // Trial drops uncommitted: the next candidate starts from the
            // same working path.
        }
    }
}

/// Downstream-adjusted candidate for the first point: the start → corner
/// vector projected onto the run direction, computed at sub-grid precision
/// and snapped back to the routing grid. `None` when the projection moves
/// nothing.
fn first_point_candidate(
    start: GridPoint,
    corner: GridPoint,
    dof: &PointDof,
    grid_unit: i32,
) -> Option<GridPoint> {
    let run = dof.run.as_ref()?;
    let vx = (corner.x - start.x) * SUBGRID_SCALE;
    let vy = (corner.y - start.y) * SUBGRID_SCALE;
    let t = run.dir.dot(vx, vy);
    let scaled = GridPoint::new(
        start.x * SUBGRID_SCALE + run.dir.x * t,
        start.y * SUBGRID_SCALE + run.dir.y * t,
    );
    let snapped = snap_to_grid(scaled, grid_unit * SUBGRID_SCALE);
    let candidate = GridPoint::new(snapped.x / SUBGRID_SCALE, snapped.y / SUBGRID_SCALE);
    if candidate == start { None } else { Some(candidate) }
}

fn segment_is_orthogonal(a: GridPoint, b: GridPoint) -> bool {
    a.x == b.x || a.y == b.y
}

fn corner_is_orthogonal(points: &[GridPoint; 3]) -> bool {
    segment_is_orthogonal(points[0], points[1]) && segment_is_orthogonal(points[1], points[2])
}
