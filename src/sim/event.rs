/// Events emitted by one step of the simulation.
///
/// Damage amounts and health live outside this core; an external attack
/// system consumes these and applies whatever numbers it likes.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player's swing connected with an enemy.
    PlayerHitEnemy { enemy: usize },
    /// An enemy's swing connected with the player.
    EnemyHitPlayer { enemy: usize },
    /// The player started combo step `step`.
    PlayerSwing { step: usize },
    /// The player overlapped hazard terrain this frame.
    PlayerTouchedHazard,
}
