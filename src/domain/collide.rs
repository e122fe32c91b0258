/// Kinematic collision resolution against the tile grid.
///
/// ## Algorithm
///
/// Axis-decoupled, tile-resolution: horizontal motion is resolved first
/// by probing the leading edge of the collider, then vertical with the
/// already-resolved x. On a blocked axis the position is clamped to the
/// current cell's boundary and the velocity component is zeroed.
///
/// ## Boundary constants
///
/// `BOUNDARY_NUDGE = 1.01` leaves the leading edge 0.01 inside the wall
/// when clamped in the +x/+y direction, so the wall/ceiling contact
/// probes keep firing on later frames instead of flickering at an exact
/// float boundary. In the -x/-y direction the floor-based cell lookup is
/// already stable at an exact boundary, so the clamp is flush.
/// `PROBE_INSET = 0.2` pulls the paired probe points in from the collider
/// corners so a flush contact on the perpendicular axis is not read as a
/// hit on this one. Both values are load-bearing hysteresis; do not tidy.
///
/// ## Limitation
///
/// Correct only while the per-frame displacement and the collider are
/// both under one tile. Larger steps can tunnel: the leading-edge probe
/// lands beyond the obstacle (or out of bounds, which reads non-solid).
/// The host frame loop is responsible for pinning `dt`.

use glam::Vec2;

use super::grid::TileGrid;
use crate::config::ProbeTuning;

/// Clamp overshoot past a +direction cell boundary. See module docs.
pub const BOUNDARY_NUDGE: f32 = 1.01;

/// Clearance pulled in from collider corners for leading-edge probes.
pub const PROBE_INSET: f32 = 0.2;

/// Axis-aligned box: center position + full extents. Passed by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Aabb { pos, size }
    }
}

/// Which sides of an actor touch solid terrain.
///
/// Recomputed every frame from the actor's *current* position, before
/// any movement is applied: this frame's gravity branch and jump
/// eligibility read contacts from where the actor starts the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactState {
    pub on_ground: bool,
    pub on_ceiling: bool,
    pub on_left_wall: bool,
    pub on_right_wall: bool,
}

impl ContactState {
    /// Touching exactly one wall (the wall-jump precondition).
    pub fn single_wall(&self) -> bool {
        self.on_left_wall != self.on_right_wall
    }

    pub fn any_wall(&self) -> bool {
        self.on_left_wall || self.on_right_wall
    }
}

/// The four small checker boxes hung off an actor's collider.
/// Offsets are relative to the actor's position (collider center).
#[derive(Clone, Copy, Debug)]
pub struct ProbeSet {
    pub ground: Aabb,
    pub ceiling: Aabb,
    pub left_wall: Aabb,
    pub right_wall: Aabb,
}

impl ProbeSet {
    /// Probes derived from a collider size and per-actor tuning: thin
    /// boxes flush with each face, extending `reach` past it, inset along
    /// the face so a flush corner contact on the other axis does not
    /// trigger them. `reach` must clear the 0.01 clamp penetration but
    /// stay well under the spawn drop height, or an actor hovering above
    /// the floor reads as grounded.
    pub fn from_tuning(size: Vec2, tuning: &ProbeTuning) -> Self {
        let half = size * 0.5;
        let reach = tuning.reach.max(0.02);
        let along_x = size.x - tuning.inset;
        let along_y = size.y - tuning.inset;
        ProbeSet {
            ground: Aabb::new(
                Vec2::new(0.0, -(half.y + reach * 0.5)),
                Vec2::new(along_x, reach),
            ),
            ceiling: Aabb::new(
                Vec2::new(0.0, half.y + reach * 0.5),
                Vec2::new(along_x, reach),
            ),
            left_wall: Aabb::new(
                Vec2::new(-(half.x + reach * 0.5), 0.0),
                Vec2::new(reach, along_y),
            ),
            right_wall: Aabb::new(
                Vec2::new(half.x + reach * 0.5, 0.0),
                Vec2::new(reach, along_y),
            ),
        }
    }

    /// Probes with the default tuning for this collider size.
    pub fn for_collider(size: Vec2) -> Self {
        Self::from_tuning(size, &ProbeTuning::default())
    }

    /// Evaluate all four probes at an actor position.
    pub fn contacts(&self, grid: &TileGrid, pos: Vec2) -> ContactState {
        ContactState {
            on_ground: grid.box_solid(pos + self.ground.pos, self.ground.size),
            on_ceiling: grid.box_solid(pos + self.ceiling.pos, self.ceiling.size),
            on_left_wall: grid.box_solid(pos + self.left_wall.pos, self.left_wall.size),
            on_right_wall: grid.box_solid(pos + self.right_wall.pos, self.right_wall.size),
        }
    }
}

/// Constrain a candidate position against the grid, one axis at a time.
///
/// `pos` is mutated to the resolved position; blocked velocity
/// components are zeroed. `next` is the externally-integrated candidate
/// (`pos + vel * dt`). `size` is the collider's full extents.
pub fn resolve_movement(
    grid: &TileGrid,
    pos: &mut Vec2,
    vel: &mut Vec2,
    next: Vec2,
    size: Vec2,
) {
    let half = size * 0.5;

    // ── Horizontal ──
    let dx = next.x - pos.x;
    if dx > 0.0 {
        let edge = next.x + half.x;
        if grid.point_solid(edge, pos.y + half.y - PROBE_INSET)
            || grid.point_solid(edge, pos.y - half.y + PROBE_INSET)
        {
            pos.x = pos.x.floor() + BOUNDARY_NUDGE - half.x;
            vel.x = 0.0;
        } else {
            pos.x = next.x;
        }
    } else if dx < 0.0 {
        let edge = next.x - half.x;
        if grid.point_solid(edge, pos.y + half.y - PROBE_INSET)
            || grid.point_solid(edge, pos.y - half.y + PROBE_INSET)
        {
            pos.x = pos.x.floor() + half.x;
            vel.x = 0.0;
        } else {
            pos.x = next.x;
        }
    }

    // ── Vertical (with resolved x) ──
    let dy = next.y - pos.y;
    if dy > 0.0 {
        let edge = next.y + half.y;
        if grid.point_solid(pos.x + half.x - PROBE_INSET, edge)
            || grid.point_solid(pos.x - half.x + PROBE_INSET, edge)
        {
            pos.y = pos.y.floor() + BOUNDARY_NUDGE - half.y;
            vel.y = 0.0;
        } else {
            pos.y = next.y;
        }
    } else if dy < 0.0 {
        let edge = next.y - half.y;
        if grid.point_solid(pos.x + half.x - PROBE_INSET, edge)
            || grid.point_solid(pos.x - half.x + PROBE_INSET, edge)
        {
            pos.y = pos.y.floor() + half.y;
            vel.y = 0.0;
        } else {
            pos.y = next.y;
        }
    }
}
