//! Brick levels
//!
//! A level is a rectangular grid of tile codes laid over the top part of the
//! playfield:
//! - `0`: empty
//! - `1`: solid brick (indestructible)
//! - `2..=5`: destructible brick, tinted by code
//!
//! Unknown codes build a destructible white brick.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::body::{Body, Sprite};

/// Parsed tile codes, one inner `Vec` per row
pub type TileGrid = Vec<Vec<u32>>;

/// Built-in level sources, in menu order
pub const BUILTIN_LEVELS: [(&str, &str); 4] = [
    ("Standard", include_str!("../../levels/one.lvl")),
    ("A few small gaps", include_str!("../../levels/two.lvl")),
    ("Space invader", include_str!("../../levels/three.lvl")),
    ("Bounce galore", include_str!("../../levels/four.lvl")),
];

/// Errors raised while parsing a level source
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// A token that is not a non-negative integer
    #[error("invalid tile '{token}' on line {line}")]
    InvalidTile { line: usize, token: String },

    /// A row whose column count differs from the first row
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Parse a whitespace-separated tile grid, one row per line.
/// Blank lines are skipped; an empty source yields an empty grid.
pub fn parse_tiles(source: &str) -> Result<TileGrid, LevelError> {
    let mut grid = TileGrid::new();
    for (index, line) in source.lines().enumerate() {
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| LevelError::InvalidTile {
                    line: index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if row.is_empty() {
            continue;
        }
        if let Some(first) = grid.first() {
            if first.len() != row.len() {
                return Err(LevelError::RaggedRow {
                    row: grid.len(),
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        grid.push(row);
    }
    Ok(grid)
}

/// Tint for a destructible tile code
pub fn tile_color(code: u32) -> Vec3 {
    match code {
        1 => Vec3::new(0.8, 0.8, 0.7),
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// Build brick bodies for a grid spanning `width` x `height` pixels
pub fn build_bricks(tiles: &TileGrid, width: f32, height: f32) -> Vec<Body> {
    let Some(first) = tiles.first() else {
        return Vec::new();
    };
    if first.is_empty() {
        return Vec::new();
    }

    let unit = Vec2::new(width / first.len() as f32, height / tiles.len() as f32);
    let mut bricks = Vec::new();
    for (y, row) in tiles.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            let pos = Vec2::new(unit.x * x as f32, unit.y * y as f32);
            match code {
                0 => {}
                1 => {
                    let mut brick = Body::new(pos, unit, Sprite::BlockSolid).with_color(tile_color(1));
                    brick.solid = true;
                    bricks.push(brick);
                }
                code => {
                    if code > 5 {
                        log::warn!("Unknown tile code {} at ({}, {}), using default tint", code, x, y);
                    }
                    bricks.push(Body::new(pos, unit, Sprite::Block).with_color(tile_color(code)));
                }
            }
        }
    }
    bricks
}

/// A playable level: its source grid plus the live brick list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub tiles: TileGrid,
    pub width: f32,
    pub height: f32,
    pub bricks: Vec<Body>,
}

impl Level {
    /// Build a level from an already-parsed grid
    pub fn from_tiles(name: impl Into<String>, tiles: TileGrid, width: f32, height: f32) -> Self {
        let bricks = build_bricks(&tiles, width, height);
        Self {
            name: name.into(),
            tiles,
            width,
            height,
            bricks,
        }
    }

    /// Parse and build a level from its text source
    pub fn load(
        name: impl Into<String>,
        source: &str,
        width: f32,
        height: f32,
    ) -> Result<Self, LevelError> {
        let name = name.into();
        let tiles = parse_tiles(source)?;
        let level = Self::from_tiles(name, tiles, width, height);
        log::info!(
            "Loaded level '{}': {} bricks ({} destructible)",
            level.name,
            level.bricks.len(),
            level.remaining()
        );
        Ok(level)
    }

    /// The four levels shipped with the game
    pub fn builtin(width: f32, height: f32) -> Result<Vec<Self>, LevelError> {
        BUILTIN_LEVELS
            .iter()
            .map(|(name, source)| Self::load(*name, source, width, height))
            .collect()
    }

    /// Rebuild the brick list from the source grid
    pub fn reload(&mut self) {
        self.bricks = build_bricks(&self.tiles, self.width, self.height);
    }

    /// Destructible bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| !b.solid && !b.destroyed)
            .count()
    }

    /// True once every non-solid brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_layout() {
        let level = Level::load("row", "1 2 0", 300.0, 100.0).unwrap();
        assert_eq!(level.bricks.len(), 2);

        let solid = &level.bricks[0];
        assert!(solid.solid);
        assert_eq!(solid.pos, Vec2::new(0.0, 0.0));
        assert_eq!(solid.size, Vec2::new(100.0, 100.0));
        assert_eq!(solid.sprite, Sprite::BlockSolid);

        let brick = &level.bricks[1];
        assert!(!brick.solid);
        assert_eq!(brick.pos, Vec2::new(100.0, 0.0));
        assert_eq!(brick.size, Vec2::new(100.0, 100.0));
        assert_eq!(brick.color, tile_color(2));
        assert_eq!(brick.sprite, Sprite::Block);
    }

    #[test]
    fn test_empty_source_has_no_bricks() {
        let level = Level::load("empty", "", 800.0, 300.0).unwrap();
        assert!(level.bricks.is_empty());
        assert!(level.is_completed());

        let blank = Level::load("blank", "\n  \n\n", 800.0, 300.0).unwrap();
        assert!(blank.bricks.is_empty());
    }

    #[test]
    fn test_invalid_token_is_error() {
        let err = parse_tiles("1 2\n3 x").unwrap_err();
        assert_eq!(
            err,
            LevelError::InvalidTile {
                line: 2,
                token: "x".to_string()
            }
        );
        assert!(parse_tiles("1 -2").is_err());
    }

    #[test]
    fn test_ragged_rows_are_error() {
        let err = parse_tiles("1 1 1\n1 1").unwrap_err();
        assert_eq!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_unknown_code_is_white_destructible() {
        let level = Level::load("odd", "9", 100.0, 50.0).unwrap();
        assert_eq!(level.bricks.len(), 1);
        assert!(!level.bricks[0].solid);
        assert_eq!(level.bricks[0].color, Vec3::ONE);
    }

    #[test]
    fn test_completion_with_single_destructible() {
        let mut level = Level::load("one", "1 0 2\n1 1 0", 300.0, 100.0).unwrap();
        assert!(!level.is_completed());
        let idx = level.bricks.iter().position(|b| !b.solid).unwrap();
        level.bricks[idx].destroyed = true;
        assert!(level.is_completed());
    }

    #[test]
    fn test_partial_destruction_is_not_complete() {
        let mut level = Level::load("two", "2 3 4", 300.0, 100.0).unwrap();
        level.bricks[0].destroyed = true;
        level.bricks[2].destroyed = true;
        assert!(!level.is_completed());
        assert_eq!(level.remaining(), 1);
    }

    #[test]
    fn test_reload_restores_bricks() {
        let mut level = Level::load("r", "2 2\n1 5", 200.0, 100.0).unwrap();
        for brick in &mut level.bricks {
            if !brick.solid {
                brick.destroyed = true;
            }
        }
        assert!(level.is_completed());
        level.reload();
        assert_eq!(level.bricks.len(), 4);
        assert_eq!(level.remaining(), 3);
    }

    #[test]
    fn test_builtin_levels_parse() {
        let levels = Level::builtin(800.0, 300.0).unwrap();
        assert_eq!(levels.len(), 4);
        for level in &levels {
            assert!(!level.bricks.is_empty(), "{} is empty", level.name);
            assert!(!level.is_completed());
        }
    }
}
