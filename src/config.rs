/// External tuning loader.
///
/// Reads `tuning.toml` from the executable's directory (or CWD) and
/// falls back to built-in defaults if the file is missing, unreadable,
/// or incomplete. Every struct is `#[serde(default)]` so a partial file
/// overrides only what it names.
///
/// Values are designer-facing (times, heights, ranges), not raw
/// accelerations; `MotionModel::derive` turns them into physics
/// constants once per actor construction. Tuning is trusted — garbage
/// in, garbage physics out — except that derived-constant formulas
/// guard their divisions.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tuning parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Per-concern tuning blocks ──

/// Horizontal + vertical motion tuning (see `MotionModel::derive`).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub max_speed: f32,
    /// Seconds to reach max speed from standstill.
    pub max_speed_time: f32,
    /// Seconds to stop from max speed with no input.
    pub stop_time: f32,
    /// Seconds to reverse at full speed.
    pub turn_time: f32,
    pub max_jump_height: f32,
    pub min_jump_height: f32,
    pub time_to_apex: f32,
    /// Time from apex back to launch height; shorter = snappier fall.
    pub time_to_ground: f32,
    /// Gravity multiplier applied while rising after an early release.
    pub release_gravity_multiplier: f32,
    pub max_fall_speed: f32,
    pub wall_slide_gravity: f32,
    pub wall_slide_max_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        MovementTuning {
            max_speed: 6.0,
            max_speed_time: 0.2,
            stop_time: 0.1,
            turn_time: 0.05,
            max_jump_height: 3.0,
            min_jump_height: 0.8,
            time_to_apex: 0.4,
            time_to_ground: 0.3,
            release_gravity_multiplier: 2.5,
            max_fall_speed: 14.0,
            wall_slide_gravity: 8.0,
            wall_slide_max_speed: 2.5,
        }
    }
}

/// Contact-probe geometry, per actor. Defaults suit sub-tile colliders;
/// see `ProbeSet::from_tuning` for the constraints on `reach`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ProbeTuning {
    /// How far each probe box extends past its collider face.
    pub reach: f32,
    /// Inset from the collider corners along each face.
    pub inset: f32,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        ProbeTuning { reach: 0.04, inset: 0.2 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Grace window after leaving the ground (seconds).
    pub coyote_window: f32,
    /// Grace window before landing for an early press (seconds).
    pub buffer_window: f32,
    /// Wall-jump horizontal kick when input is away from (or off) the wall.
    pub wall_kick_away: f32,
    /// Weaker kick when input is held toward the wall.
    pub wall_kick_toward: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        JumpTuning {
            coyote_window: 0.1,
            buffer_window: 0.12,
            wall_kick_away: 7.0,
            wall_kick_toward: 3.5,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AttackTuning {
    /// Max distance at which a swing starts.
    pub start_range: f32,
    /// Distance past which a swing in flight cancels.
    pub break_range: f32,
    /// Distance within which the hit lands at the hit instant.
    pub hit_range: f32,
    pub cooldown: f32,
    /// When within the animation the hit fires (0..1).
    pub hit_time_normalized: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        AttackTuning {
            start_range: 1.6,
            break_range: 2.4,
            hit_range: 1.8,
            cooldown: 0.9,
            hit_time_normalized: 0.45,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AggroTuning {
    pub aggro_range: f32,
    pub leash_range: f32,
    /// Hysteresis margin below the leash for releasing return mode.
    pub leash_margin: f32,
    /// Chase halts this far short of the player.
    pub desired_stop_distance: f32,
    /// Dead zone around a locomotion target.
    pub home_tolerance: f32,
}

impl Default for AggroTuning {
    fn default() -> Self {
        AggroTuning {
            aggro_range: 5.0,
            leash_range: 8.0,
            leash_margin: 0.05,
            desired_stop_distance: 1.2,
            home_tolerance: 0.15,
        }
    }
}

// ── Per-actor bundles ──

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collider full extents [w, h]; must stay under one tile.
    pub collider: [f32; 2],
    pub probes: ProbeTuning,
    pub movement: MovementTuning,
    pub jump: JumpTuning,
    pub attack: AttackTuning,
    /// Swing duration per combo step; length = combo chain length.
    pub combo_durations: Vec<f32>,
    /// Seconds after a Finished swing during which the next buffered
    /// press continues the combo instead of restarting it.
    pub combo_window: f32,
    /// Input lock after taking a hit (seconds).
    pub hurt_lock: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            collider: [0.8, 0.8],
            probes: ProbeTuning::default(),
            movement: MovementTuning::default(),
            jump: JumpTuning::default(),
            // Cooldown shorter than a swing so buffered presses chain
            // into the next combo step instead of stalling on it.
            attack: AttackTuning { cooldown: 0.3, ..AttackTuning::default() },
            combo_durations: vec![0.35, 0.30, 0.50],
            combo_window: 0.25,
            hurt_lock: 0.4,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub collider: [f32; 2],
    pub probes: ProbeTuning,
    pub movement: MovementTuning,
    pub attack: AttackTuning,
    pub aggro: AggroTuning,
    /// Single swing duration (enemies have no combo).
    pub anim_duration: f32,
    pub hurt_lock: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            collider: [0.7, 0.7],
            probes: ProbeTuning::default(),
            // Walkers keep the default vertical tuning: gravity is
            // derived from the jump parameters, so zeroing them would
            // leave spawned enemies floating.
            movement: MovementTuning { max_speed: 3.0, ..MovementTuning::default() },
            attack: AttackTuning {
                start_range: 2.0,
                break_range: 3.0,
                hit_range: 2.2,
                cooldown: 1.5,
                hit_time_normalized: 0.5,
            },
            aggro: AggroTuning::default(),
            anim_duration: 0.6,
            hurt_lock: 0.5,
        }
    }
}

// ── Top-level config ──

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    /// Baseline melee walker.
    pub grunt: EnemyConfig,
    /// Slower, heavier, longer-reach preset.
    #[serde(default = "brute_default")]
    pub brute: EnemyConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player: PlayerConfig::default(),
            grunt: EnemyConfig::default(),
            brute: brute_default(),
        }
    }
}

fn brute_default() -> EnemyConfig {
    EnemyConfig {
        collider: [0.9, 0.9],
        probes: ProbeTuning::default(),
        movement: MovementTuning { max_speed: 2.0, ..MovementTuning::default() },
        attack: AttackTuning {
            start_range: 2.4,
            break_range: 3.4,
            hit_range: 2.6,
            cooldown: 2.2,
            hit_time_normalized: 0.6,
        },
        aggro: AggroTuning {
            aggro_range: 4.0,
            leash_range: 6.0,
            ..AggroTuning::default()
        },
        anim_duration: 0.9,
        hurt_lock: 0.3,
    }
}

impl GameConfig {
    /// Load `tuning.toml`, searching the exe directory then the CWD.
    /// Any failure falls back to defaults with a warning.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("tuning.toml");
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(cfg) => {
                    log::info!("loaded tuning from {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    log::warn!("{e}; using default tuning");
                    return GameConfig::default();
                }
            }
        }
        GameConfig::default()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }
}

/// Candidate directories: exe dir, then CWD.
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }
    dirs
}
