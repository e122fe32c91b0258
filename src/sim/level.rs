/// ASCII level parser.
///
/// One character per tile, rows listed top-down (the parser flips them
/// so row 0 is the bottom, matching the +y-up world):
///
///   `#` ground   `=` ledge   `^` spike   `.` or ` ` empty
///   `P` player spawn   `g` grunt spawn   `B` brute spawn
///
/// Spawn markers place the actor's feet on the floor of that cell.

use glam::Vec2;

use crate::domain::grid::TileGrid;
use crate::domain::tile::Tile;
use crate::sim::actor::EnemyKind;

#[derive(Clone, Debug)]
pub struct Level {
    pub grid: TileGrid,
    pub player_spawn: Vec2,
    pub enemy_spawns: Vec<(EnemyKind, Vec2)>,
}

impl Level {
    /// Parse rows of equal visual width. Short rows are padded with
    /// empty tiles; unknown characters are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = TileGrid::new(width, height);
        let mut player_spawn = Vec2::new(1.5, 1.5);
        let mut enemy_spawns = vec![];

        for (row_idx, row) in rows.iter().enumerate() {
            let y = (height - 1 - row_idx) as i32;
            for (x, ch) in row.chars().enumerate() {
                let x = x as i32;
                // Spawned actors stand centered in the cell.
                let spawn = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                match ch {
                    '#' => grid.set(x, y, Tile::Ground),
                    '=' => grid.set(x, y, Tile::Ledge),
                    '^' => grid.set(x, y, Tile::Spike),
                    'P' => player_spawn = spawn,
                    'g' => enemy_spawns.push((EnemyKind::Grunt, spawn)),
                    'B' => enemy_spawns.push((EnemyKind::Brute, spawn)),
                    _ => {}
                }
            }
        }

        log::info!(
            "parsed level {}x{} with {} enemy spawn(s)",
            width,
            height,
            enemy_spawns.len()
        );
        Level { grid, player_spawn, enemy_spawns }
    }
}

/// The built-in demo arena used by `main` and the pipeline tests:
/// a walled room with a ledge gap and one enemy of each preset.
pub fn demo_level() -> Level {
    Level::from_rows(&[
        "############################",
        "#..........................#",
        "#..........................#",
        "#.....P..........g.........#",
        "#...####.....#####....B....#",
        "#............#....#.....==.#",
        "#.....^^.....#....#........#",
        "############################",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_flipped_bottom_up() {
        let level = Level::from_rows(&[
            "...",
            "#..",
        ]);
        // '#' was in the last (bottom) row → grid row 0.
        assert_eq!(level.grid.get(0, 0), Some(Tile::Ground));
        assert_eq!(level.grid.get(0, 1), Some(Tile::Empty));
    }

    #[test]
    fn spawns_are_cell_centered() {
        let level = Level::from_rows(&[
            ".P.",
            "###",
        ]);
        assert_eq!(level.player_spawn, Vec2::new(1.5, 1.5));
    }

    #[test]
    fn enemy_markers_carry_their_kind() {
        let level = Level::from_rows(&[
            "g.B",
            "###",
        ]);
        assert_eq!(level.enemy_spawns.len(), 2);
        assert_eq!(level.enemy_spawns[0].0, EnemyKind::Grunt);
        assert_eq!(level.enemy_spawns[1].0, EnemyKind::Brute);
    }

    #[test]
    fn short_rows_pad_with_empty() {
        let level = Level::from_rows(&[
            "##",
            "#####",
        ]);
        assert_eq!(level.grid.cols(), 5);
        assert_eq!(level.grid.get(4, 1), Some(Tile::Empty));
    }

    #[test]
    fn demo_level_parses() {
        let level = demo_level();
        assert!(level.grid.cols() >= 20);
        assert_eq!(level.enemy_spawns.len(), 2);
        // Bottom border is solid under the player column.
        let px = level.player_spawn.x.floor() as i32;
        assert_eq!(level.grid.get(px, 0), Some(Tile::Ground));
    }
}
