//! Brick layouts
//!
//! A layout is a grid of whitespace-separated integer codes, one row per
//! line: `0` empty, `1` solid, anything above `1` destructible with a
//! code-dependent tint. The grid is stretched over the target area.

use std::path::Path;

use anyhow::{Context, bail};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::WHITE;

const LEVEL_ONE: &str = include_str!("../../levels/one.txt");
const LEVEL_TWO: &str = include_str!("../../levels/two.txt");
const LEVEL_THREE: &str = include_str!("../../levels/three.txt");
const LEVEL_FOUR: &str = include_str!("../../levels/four.txt");

/// Tint of solid bricks
pub const SOLID_TINT: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// A single brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub body: Aabb,
    /// Indestructible, does not count toward completion
    pub solid: bool,
    pub destroyed: bool,
    pub tint: Vec3,
}

impl Brick {
    pub fn new(body: Aabb, solid: bool, tint: Vec3) -> Self {
        Self {
            body,
            solid,
            destroyed: false,
            tint,
        }
    }
}

/// Tint for a destructible brick code
fn tint_for_code(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => WHITE,
    }
}

/// An ordered set of bricks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub bricks: Vec<Brick>,
}

impl Level {
    /// Parse a layout and lay it out over `width` x `height`
    pub fn parse(name: &str, text: &str, width: f32, height: f32) -> anyhow::Result<Self> {
        let mut rows: Vec<Vec<u32>> = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<u32>().with_context(|| {
                        format!("{}:{}: invalid tile code '{}'", name, line_no + 1, token)
                    })
                })
                .collect::<anyhow::Result<Vec<u32>>>()?;
            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    bail!(
                        "{}:{}: row has {} tiles, expected {}",
                        name,
                        line_no + 1,
                        row.len(),
                        first.len()
                    );
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            bail!("{}: layout has no rows", name);
        }

        let columns = rows[0].len();
        let unit = Vec2::new(width / columns as f32, height / rows.len() as f32);
        let mut bricks = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let body = Aabb::new(unit * Vec2::new(x as f32, y as f32), unit);
                let brick = if code == 1 {
                    Brick::new(body, true, SOLID_TINT)
                } else {
                    Brick::new(body, false, tint_for_code(code))
                };
                bricks.push(brick);
            }
        }

        log::debug!(
            "Parsed level '{}': {}x{} grid, {} bricks",
            name,
            columns,
            rows.len(),
            bricks.len()
        );

        Ok(Self {
            name: name.to_string(),
            bricks,
        })
    }

    /// Load a layout file
    pub fn load(path: &Path, width: f32, height: f32) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading level file {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let level = Self::parse(&name, &text, width, height)?;
        log::info!("Loaded level '{}' from {}", level.name, path.display());
        Ok(level)
    }

    /// Every destructible brick is gone
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    /// Bring every brick back
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.destroyed = false;
        }
    }

    /// Destructible bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.solid && !b.destroyed).count()
    }
}

/// The four built-in layouts
pub fn standard_levels(width: f32, height: f32) -> anyhow::Result<Vec<Level>> {
    [
        ("one", LEVEL_ONE),
        ("two", LEVEL_TWO),
        ("three", LEVEL_THREE),
        ("four", LEVEL_FOUR),
    ]
    .into_iter()
    .map(|(name, text)| Level::parse(name, text, width, height))
    .collect()
}

/// Load every `*.txt` layout in a directory, sorted by file name
pub fn load_dir(dir: &Path, width: f32, height: f32) -> anyhow::Result<Vec<Level>> {
    let mut paths = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading level dir {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    if paths.is_empty() {
        bail!("no level files in {}", dir.display());
    }
    paths.iter().map(|p| Level::load(p, width, height)).collect()
}
