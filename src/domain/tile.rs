/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tile {
    #[default]
    Empty,
    Ground,       // Solid terrain
    Ledge,        // Solid, visually distinct platform edge
    Spike,        // Hazard: not solid, hurts on overlap
}

impl Tile {
    /// Does this tile block movement?
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Ground | Tile::Ledge)
    }

    /// Does overlapping this tile hurt an actor?
    pub fn is_hazard(self) -> bool {
        matches!(self, Tile::Spike)
    }

    /// Is this tile passable (an actor can occupy this cell)?
    #[allow(dead_code)]
    pub fn is_passable(self) -> bool {
        !self.is_solid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_and_ledge_are_solid() {
        assert!(Tile::Ground.is_solid());
        assert!(Tile::Ledge.is_solid());
        assert!(!Tile::Empty.is_solid());
        assert!(!Tile::Spike.is_solid());
    }

    #[test]
    fn spike_is_hazard_but_passable() {
        assert!(Tile::Spike.is_hazard());
        assert!(Tile::Spike.is_passable());
        assert!(!Tile::Ground.is_hazard());
    }
}
