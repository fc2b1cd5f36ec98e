//! Degree-of-freedom descriptors for link path points.

use crate::geom::{Dir, GridPoint};

/// Identifies a single point on a link path by link and point depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointId {
    pub link: String,
    pub depth: usize,
}

impl PointId {
    pub fn new(link: impl Into<String>, depth: usize) -> Self {
        Self {
            link: link.into(),
            depth,
        }
    }
}

/// The four relational slots a point's freedom is described in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DofSlot {
    Run,
    Backup,
    Norm,
    AntiNorm,
}

/// One directional freedom, optionally occupied by a pinning point that
/// blocks travel in that direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionDof {
    pub dir: Dir,
    pub pin: Option<PointId>,
}

impl DirectionDof {
    pub fn free(dir: Dir) -> Self {
        Self { dir, pin: None }
    }

    pub fn pinned(dir: Dir, by: PointId) -> Self {
        Self { dir, pin: Some(by) }
    }
}

/// Directional freedom of one path point: up to four slots, plus whether
/// the inbound segment is already axis-aligned.
#[derive(Debug, Clone, Default)]
pub struct PointDof {
    pub run: Option<DirectionDof>,
    pub backup: Option<DirectionDof>,
    pub norm: Option<DirectionDof>,
    pub anti_norm: Option<DirectionDof>,
    pub inbound_canonical: bool,
}

impl PointDof {
    pub fn slot(&self, slot: DofSlot) -> Option<&DirectionDof> {
        match slot {
            DofSlot::Run => self.run.as_ref(),
            DofSlot::Backup => self.backup.as_ref(),
            DofSlot::Norm => self.norm.as_ref(),
            DofSlot::AntiNorm => self.anti_norm.as_ref(),
        }
    }

    /// The slot whose vector points in `dir`, if any.
    pub fn slot_in_direction(&self, dir: Dir) -> Option<(DofSlot, &DirectionDof)> {
        [DofSlot::Run, DofSlot::Backup, DofSlot::Norm, DofSlot::AntiNorm]
            .into_iter()
            .filter_map(|s| self.slot(s).map(|d| (s, d)))
            .find(|(_, d)| d.dir == dir)
    }

    /// Authoritative pinning rule: travel in `dir` is pinned when that
    /// direction's slot is occupied, and additionally — while the outbound
    /// direction is not yet canonical — when the backup slot is occupied
    /// and `dir` is the run direction.
    pub fn is_pinned(&self, dir: Dir) -> bool {
        if let Some((_, d)) = self.slot_in_direction(dir) {
            if d.pin.is_some() {
                return true;
            }
        }
        if !self.inbound_canonical
            && self.run.as_ref().is_some_and(|r| r.dir == dir)
            && self.backup.as_ref().is_some_and(|b| b.pin.is_some())
        {
            return true;
        }
        false
    }

    /// True when some slot covers `dir` and travel that way is not pinned.
    pub fn allows(&self, dir: Dir) -> bool {
        self.slot_in_direction(dir).is_some() && !self.is_pinned(dir)
    }

    /// True when the move from `from` to `to`, decomposed into its axis
    /// components, stays within unpinned freedom vectors.
    pub fn permits_move(&self, from: GridPoint, to: GridPoint) -> bool {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx != 0 && !self.allows(Dir::new(dx.signum(), 0)) {
            return false;
        }
        if dy != 0 && !self.allows(Dir::new(0, dy.signum())) {
            return false;
        }
        true
    }
}

/// A candidate move of one path point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofOption {
    pub point: PointId,
    pub position: GridPoint,
}

/// The unit of recovery output: an optional first-point move paired with an
/// optional corner move. Callers apply or discard whole pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofOptionPair {
    pub first: Option<DofOption>,
    pub corner: Option<DofOption>,
}
