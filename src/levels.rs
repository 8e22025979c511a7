//! Built-in level catalog
//!
//! Levels are static data tables; the simulation instantiates live entities
//! from them at level start. Platform rects are authored top-left (x, y,
//! width, height); positions are entity centers. All levels share a 720
//! world height, the later ones scroll horizontally over multiple screens.

use glam::Vec2;
use serde::{Deserialize, Serialize};

const WORLD_HEIGHT: f32 = 720.0;
const SCREEN_WIDTH: f32 = 1280.0;

/// Static description of one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub id: u32,
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub platforms: Vec<PlatformData>,
    pub moving_platforms: Vec<MovingPlatformData>,
    pub enemies: Vec<EnemySpawn>,
    /// Energy pickup positions
    pub lightnings: Vec<Vec2>,
    /// Health pickup positions
    pub hearts: Vec<Vec2>,
    pub player_start: Vec2,
    /// Exit trigger center; authored so the zone's bottom rests on a platform
    pub exit: Vec2,
}

/// Top-left authored static platform rect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlatformData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Vertically oscillating platform: starts at its authored rect and travels
/// `range` units below it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovingPlatformData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub range: f32,
    pub speed: f32,
    pub start_down: bool,
}

/// Enemy spawn point. Enemies spawn airborne and patrol from wherever they
/// first land.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub patrol_distance: f32,
}

fn plat(x: f32, y: f32, width: f32, height: f32) -> PlatformData {
    PlatformData {
        x,
        y,
        width,
        height,
    }
}

fn enemy(x: f32, y: f32, patrol_distance: f32) -> EnemySpawn {
    EnemySpawn {
        x,
        y,
        patrol_distance,
    }
}

fn at(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// The full built-in catalog, in play order.
pub fn all_levels() -> Vec<LevelData> {
    vec![
        // Level 1 - tutorial
        LevelData {
            id: 1,
            name: "Aloitus".to_string(),
            width: SCREEN_WIDTH,
            height: WORLD_HEIGHT,
            platforms: vec![
                // Ground
                plat(0.0, WORLD_HEIGHT - 32.0, SCREEN_WIDTH, 32.0),
                // Stepping platforms
                plat(200.0, 550.0, 150.0, 20.0),
                plat(450.0, 450.0, 150.0, 20.0),
                plat(700.0, 350.0, 150.0, 20.0),
                plat(950.0, 450.0, 150.0, 20.0),
                // Upper platform with the exit
                plat(1050.0, 250.0, 200.0, 20.0),
            ],
            moving_platforms: Vec::new(),
            enemies: vec![enemy(500.0, 400.0, 60.0), enemy(800.0, 300.0, 50.0)],
            lightnings: vec![
                at(275.0, 500.0),
                at(525.0, 400.0),
                at(775.0, 300.0),
                at(1025.0, 400.0),
            ],
            hearts: Vec::new(),
            player_start: at(100.0, WORLD_HEIGHT - 100.0),
            exit: at(1150.0, 186.0),
        },
        // Level 2 - vertical climb
        LevelData {
            id: 2,
            name: "Nousu".to_string(),
            width: SCREEN_WIDTH,
            height: WORLD_HEIGHT,
            platforms: vec![
                // Ground with gaps
                plat(0.0, WORLD_HEIGHT - 32.0, 300.0, 32.0),
                plat(400.0, WORLD_HEIGHT - 32.0, 200.0, 32.0),
                plat(700.0, WORLD_HEIGHT - 32.0, 580.0, 32.0),
                // Climb section
                plat(100.0, 550.0, 120.0, 20.0),
                plat(280.0, 450.0, 120.0, 20.0),
                plat(100.0, 350.0, 120.0, 20.0),
                plat(280.0, 250.0, 120.0, 20.0),
                // Middle section
                plat(500.0, 400.0, 150.0, 20.0),
                plat(700.0, 300.0, 150.0, 20.0),
                // High platforms
                plat(900.0, 200.0, 150.0, 20.0),
                plat(1100.0, 300.0, 150.0, 20.0),
                // Exit platform
                plat(1100.0, 150.0, 150.0, 20.0),
            ],
            moving_platforms: Vec::new(),
            enemies: vec![
                enemy(150.0, 500.0, 40.0),
                enemy(330.0, 400.0, 40.0),
                enemy(575.0, 350.0, 50.0),
                enemy(775.0, 250.0, 50.0),
                enemy(950.0, 150.0, 40.0),
            ],
            lightnings: vec![
                at(160.0, 500.0),
                at(340.0, 300.0),
                at(160.0, 300.0),
                at(575.0, 350.0),
                at(775.0, 250.0),
                at(975.0, 150.0),
            ],
            hearts: Vec::new(),
            player_start: at(100.0, WORLD_HEIGHT - 100.0),
            exit: at(1175.0, 86.0),
        },
        // Level 3 - zigzag gauntlet
        LevelData {
            id: 3,
            name: "Huippu".to_string(),
            width: SCREEN_WIDTH,
            height: WORLD_HEIGHT,
            platforms: vec![
                // Starting area
                plat(0.0, WORLD_HEIGHT - 32.0, 200.0, 32.0),
                // Floating platform zigzag
                plat(250.0, 600.0, 100.0, 20.0),
                plat(100.0, 500.0, 100.0, 20.0),
                plat(250.0, 400.0, 100.0, 20.0),
                plat(100.0, 300.0, 100.0, 20.0),
                plat(250.0, 200.0, 100.0, 20.0),
                // Middle gauntlet
                plat(400.0, 300.0, 80.0, 20.0),
                plat(530.0, 250.0, 80.0, 20.0),
                plat(660.0, 200.0, 80.0, 20.0),
                // High enemy platforms
                plat(800.0, 350.0, 120.0, 20.0),
                plat(950.0, 250.0, 120.0, 20.0),
                // Final climb
                plat(1100.0, 400.0, 100.0, 20.0),
                plat(1100.0, 250.0, 100.0, 20.0),
                // Exit platform
                plat(1100.0, 100.0, 150.0, 20.0),
            ],
            moving_platforms: Vec::new(),
            enemies: vec![
                enemy(150.0, 250.0, 30.0),
                enemy(300.0, 150.0, 30.0),
                enemy(440.0, 250.0, 25.0),
                enemy(570.0, 200.0, 25.0),
                enemy(700.0, 150.0, 25.0),
                enemy(860.0, 300.0, 40.0),
                enemy(1010.0, 200.0, 40.0),
            ],
            lightnings: vec![
                at(300.0, 550.0),
                at(150.0, 450.0),
                at(300.0, 350.0),
                at(150.0, 250.0),
                at(440.0, 250.0),
                at(570.0, 200.0),
                at(700.0, 150.0),
                at(860.0, 300.0),
                at(1010.0, 200.0),
                at(1150.0, 350.0),
            ],
            hearts: vec![at(575.0, 150.0)],
            player_start: at(100.0, WORLD_HEIGHT - 100.0),
            exit: at(1175.0, 36.0),
        },
        // Level 4 - three screens wide
        LevelData {
            id: 4,
            name: "Matka".to_string(),
            width: 3840.0,
            height: WORLD_HEIGHT,
            platforms: vec![
                // Start zone
                plat(0.0, WORLD_HEIGHT - 32.0, 400.0, 32.0),
                plat(300.0, 550.0, 120.0, 20.0),
                plat(480.0, 480.0, 120.0, 20.0),
                // Early zone
                plat(650.0, WORLD_HEIGHT - 32.0, 200.0, 32.0),
                plat(700.0, 400.0, 100.0, 20.0),
                plat(880.0, 320.0, 100.0, 20.0),
                plat(1050.0, 400.0, 120.0, 20.0),
                plat(1200.0, 500.0, 150.0, 20.0),
                plat(1380.0, 420.0, 100.0, 20.0),
                // Middle zone climb
                plat(1550.0, 600.0, 100.0, 20.0),
                plat(1700.0, 500.0, 100.0, 20.0),
                plat(1550.0, 400.0, 100.0, 20.0),
                plat(1700.0, 300.0, 100.0, 20.0),
                plat(1850.0, 380.0, 120.0, 20.0),
                // Bridge section
                plat(2000.0, WORLD_HEIGHT - 32.0, 300.0, 32.0),
                plat(2100.0, 450.0, 150.0, 20.0),
                plat(2300.0, 350.0, 100.0, 20.0),
                // Late zone
                plat(2500.0, 500.0, 80.0, 20.0),
                plat(2650.0, 420.0, 80.0, 20.0),
                plat(2800.0, 340.0, 80.0, 20.0),
                plat(2950.0, 420.0, 100.0, 20.0),
                plat(3100.0, 520.0, 100.0, 20.0),
                plat(3250.0, 400.0, 100.0, 20.0),
                // End zone
                plat(3400.0, WORLD_HEIGHT - 32.0, 200.0, 32.0),
                plat(3500.0, 500.0, 120.0, 20.0),
                plat(3650.0, 350.0, 150.0, 20.0),
            ],
            moving_platforms: vec![MovingPlatformData {
                x: 3310.0,
                y: 500.0,
                width: 90.0,
                height: 20.0,
                range: 80.0,
                speed: 50.0,
                start_down: true,
            }],
            enemies: vec![
                enemy(750.0, 350.0, 40.0),
                enemy(1250.0, 450.0, 60.0),
                enemy(1600.0, 350.0, 40.0),
                enemy(1750.0, 250.0, 40.0),
                enemy(2150.0, 400.0, 60.0),
                enemy(2700.0, 370.0, 30.0),
                enemy(3000.0, 370.0, 40.0),
                enemy(3300.0, 350.0, 40.0),
            ],
            lightnings: vec![
                at(360.0, 500.0),
                at(540.0, 430.0),
                at(750.0, 350.0),
                at(930.0, 270.0),
                at(1110.0, 350.0),
                at(1275.0, 450.0),
                at(1430.0, 370.0),
                at(1600.0, 550.0),
                at(1750.0, 450.0),
                at(1600.0, 350.0),
                at(2150.0, 400.0),
                at(2350.0, 300.0),
                at(2550.0, 450.0),
                at(2850.0, 290.0),
                at(3150.0, 470.0),
                at(3550.0, 450.0),
                at(3700.0, 300.0),
            ],
            hearts: vec![at(2150.0, 640.0), at(3450.0, 640.0)],
            player_start: at(100.0, WORLD_HEIGHT - 100.0),
            exit: at(3725.0, 286.0),
        },
        // Level 5 - four screens wide
        LevelData {
            id: 5,
            name: "Syvyys".to_string(),
            width: 4800.0,
            height: WORLD_HEIGHT,
            platforms: vec![
                // Start zone
                plat(0.0, WORLD_HEIGHT - 32.0, 350.0, 32.0),
                plat(200.0, 550.0, 100.0, 20.0),
                plat(400.0, 480.0, 100.0, 20.0),
                // Descent zone
                plat(550.0, 580.0, 120.0, 20.0),
                plat(720.0, WORLD_HEIGHT - 32.0, 200.0, 32.0),
                plat(750.0, 450.0, 100.0, 20.0),
                plat(920.0, 380.0, 100.0, 20.0),
                plat(1100.0, 320.0, 120.0, 20.0),
                plat(1280.0, 400.0, 100.0, 20.0),
                // Crystal cave zone
                plat(1450.0, 520.0, 80.0, 20.0),
                plat(1580.0, 440.0, 80.0, 20.0),
                plat(1720.0, 360.0, 100.0, 20.0),
                plat(1880.0, 280.0, 100.0, 20.0),
                plat(2050.0, 360.0, 120.0, 20.0),
                // Underground lake zone
                plat(2200.0, WORLD_HEIGHT - 32.0, 250.0, 32.0),
                plat(2300.0, 480.0, 100.0, 20.0),
                plat(2480.0, 400.0, 100.0, 20.0),
                plat(2650.0, 320.0, 80.0, 20.0),
                plat(2800.0, 400.0, 100.0, 20.0),
                plat(2950.0, 500.0, 120.0, 20.0),
                // Ascent zone
                plat(3100.0, 580.0, 100.0, 20.0),
                plat(3250.0, 500.0, 100.0, 20.0),
                plat(3400.0, 420.0, 100.0, 20.0),
                plat(3550.0, 340.0, 100.0, 20.0),
                plat(3700.0, 260.0, 120.0, 20.0),
                // Final zone
                plat(3900.0, 350.0, 150.0, 20.0),
                plat(4100.0, WORLD_HEIGHT - 32.0, 200.0, 32.0),
                plat(4150.0, 450.0, 100.0, 20.0),
                plat(4320.0, 350.0, 100.0, 20.0),
                plat(4500.0, 250.0, 120.0, 20.0),
                plat(4650.0, 180.0, 150.0, 20.0),
            ],
            moving_platforms: vec![MovingPlatformData {
                x: 3000.0,
                y: 600.0,
                width: 100.0,
                height: 20.0,
                range: 60.0,
                speed: 45.0,
                start_down: false,
            }],
            enemies: vec![
                enemy(800.0, 400.0, 40.0),
                enemy(1150.0, 270.0, 50.0),
                enemy(1630.0, 390.0, 30.0),
                enemy(1930.0, 230.0, 40.0),
                enemy(2350.0, 430.0, 40.0),
                enemy(2700.0, 270.0, 30.0),
                enemy(3000.0, 450.0, 50.0),
                enemy(3450.0, 370.0, 40.0),
                enemy(3750.0, 210.0, 50.0),
                enemy(4370.0, 300.0, 40.0),
                enemy(4550.0, 200.0, 50.0),
            ],
            lightnings: vec![
                at(250.0, 500.0),
                at(450.0, 430.0),
                at(600.0, 530.0),
                at(800.0, 400.0),
                at(970.0, 330.0),
                at(1160.0, 270.0),
                at(1330.0, 350.0),
                at(1500.0, 470.0),
                at(1770.0, 310.0),
                at(1930.0, 230.0),
                at(2100.0, 310.0),
                at(2350.0, 430.0),
                at(2530.0, 350.0),
                at(2700.0, 270.0),
                at(2850.0, 350.0),
                at(3000.0, 450.0),
                at(3150.0, 530.0),
                at(3300.0, 450.0),
                at(3600.0, 290.0),
                at(3750.0, 210.0),
                at(3950.0, 300.0),
                at(4200.0, 400.0),
                at(4370.0, 300.0),
                at(4550.0, 200.0),
                at(4700.0, 130.0),
            ],
            hearts: vec![at(2320.0, 640.0), at(4180.0, 640.0)],
            player_start: at(100.0, WORLD_HEIGHT - 100.0),
            exit: at(4720.0, 116.0),
        },
    ]
}

/// Look up a level by its 1-based number.
pub fn get_level(level_number: u32) -> Option<LevelData> {
    (level_number as usize)
        .checked_sub(1)
        .and_then(|i| all_levels().into_iter().nth(i))
}

pub fn total_levels() -> u32 {
    all_levels().len() as u32
}
