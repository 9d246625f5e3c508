//! Shared plumbing for the `dungen` and `soak` binaries.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungen_core::mapgen::{GenerationReport, TypedRoom, WallCategory};
use dungen_core::{Cell, DrawLayer, GeneratedDungeon, GeneratorConfig, TileSink, Visual, paint};
use serde::Serialize;

/// Reads a TOML generator config; missing keys fall back to defaults.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<GeneratorConfig> {
    let config: GeneratorConfig = toml::from_str(text).context("Failed to parse TOML")?;
    config.validate().context("Config failed validation")?;
    Ok(config)
}

/// Character preview of a painted dungeon. Later layers overwrite earlier ones.
#[derive(Debug, Default)]
pub struct AsciiMap {
    glyphs: BTreeMap<Cell, char>,
}

impl TileSink for AsciiMap {
    fn place(&mut self, cell: Cell, layer: DrawLayer, visual: Visual<'_>) {
        let glyph = match (layer, visual) {
            (_, Visual::Floor) => '.',
            (DrawLayer::WallTop, Visual::Wall(_)) => '=',
            (_, Visual::Wall(category)) => wall_glyph(category),
            (_, Visual::Object { archetype, anchor }) => object_glyph(archetype, anchor),
        };
        self.glyphs.insert(cell, glyph);
    }
}

impl AsciiMap {
    pub fn glyph_at(&self, cell: Cell) -> Option<char> {
        self.glyphs.get(&cell).copied()
    }

    /// Rows from the highest y down, so "up" reads upward on screen.
    pub fn render(&self) -> String {
        let (Some(first), Some(last)) = (self.glyphs.keys().next(), self.glyphs.keys().next_back())
        else {
            return String::new();
        };
        let min_x = self.glyphs.keys().map(|cell| cell.x).min().unwrap_or(first.x);
        let max_x = self.glyphs.keys().map(|cell| cell.x).max().unwrap_or(last.x);

        let mut out = String::new();
        for y in (first.y..=last.y).rev() {
            let row: String = (min_x..=max_x)
                .map(|x| self.glyph_at(Cell::new(x, y)).unwrap_or(' '))
                .collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }
}

fn wall_glyph(category: WallCategory) -> char {
    match category {
        WallCategory::WallTop | WallCategory::WallBottom => '-',
        WallCategory::WallLeft | WallCategory::WallRight => '|',
        WallCategory::None => ' ',
        category if category.is_inner_corner() => '+',
        _ => '#',
    }
}

fn object_glyph(archetype: &str, anchor: bool) -> char {
    let initial = archetype.chars().next().unwrap_or('o');
    if anchor { initial.to_ascii_uppercase() } else { initial.to_ascii_lowercase() }
}

pub fn render_ascii(dungeon: &GeneratedDungeon) -> String {
    let mut map = AsciiMap::default();
    paint(dungeon, &mut map);
    map.render()
}

#[derive(Debug, Serialize)]
pub struct DungeonSummary<'a> {
    pub fingerprint: String,
    pub report: GenerationReport,
    pub rooms: &'a [TypedRoom],
    pub object_counts: BTreeMap<&'a str, usize>,
}

impl<'a> DungeonSummary<'a> {
    pub fn new(dungeon: &'a GeneratedDungeon) -> Self {
        let mut object_counts = BTreeMap::new();
        for object in &dungeon.objects {
            *object_counts.entry(object.archetype.as_str()).or_default() += 1;
        }
        Self {
            fingerprint: format!("{:016x}", dungeon.fingerprint()),
            report: dungeon.report,
            rooms: &dungeon.rooms,
            object_counts,
        }
    }
}

pub fn report_json(dungeon: &GeneratedDungeon) -> Result<String> {
    serde_json::to_string_pretty(&DungeonSummary::new(dungeon))
        .context("Failed to serialize generation report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungen_core::DungeonGenerator;
    use dungen_core::config::ConnectionStrategy;

    #[test]
    fn empty_toml_yields_the_default_config() {
        let config = parse_config("").expect("defaults are valid");
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = parse_config(
            "seed = 9\n[rooms]\ncount = 3\n[corridors]\nstrategy = \"random\"\n",
        )
        .expect("valid config");
        assert_eq!(config.seed, 9);
        assert_eq!(config.rooms.count, 3);
        assert_eq!(config.rooms.separation, GeneratorConfig::default().rooms.separation);
        assert_eq!(config.corridors.strategy, ConnectionStrategy::Random);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let error = parse_config("[corridors.width]\nmin = 0\nmax = 2\n").expect_err("zero width");
        assert!(format!("{error:#}").contains("validation"));
    }

    #[test]
    fn ascii_preview_draws_walls_above_floor() {
        let dungeon = DungeonGenerator::new(GeneratorConfig::default().with_seed(4))
            .expect("valid config")
            .generate();
        let mut map = AsciiMap::default();
        paint(&dungeon, &mut map);

        for &cell in &dungeon.floor {
            let glyph = map.glyph_at(cell);
            assert!(glyph.is_some_and(|glyph| glyph != '-' && glyph != '|'), "{cell:?}");
        }
        let preview = map.render();
        assert!(preview.contains('.'));
        assert!(preview.contains('-'));
    }

    #[test]
    fn rendered_rows_run_top_down_without_trailing_spaces() {
        let mut map = AsciiMap::default();
        map.place(Cell::new(0, 0), DrawLayer::Floor, Visual::Floor);
        map.place(Cell::new(2, 0), DrawLayer::Floor, Visual::Floor);
        map.place(Cell::new(0, 1), DrawLayer::WallBase, Visual::Wall(WallCategory::WallTop));
        assert_eq!(map.render(), "-\n. .\n");
        assert_eq!(AsciiMap::default().render(), "");
    }

    #[test]
    fn json_report_carries_the_fingerprint() {
        let dungeon = DungeonGenerator::new(GeneratorConfig::default().with_seed(12))
            .expect("valid config")
            .generate();
        let json = report_json(&dungeon).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["fingerprint"], format!("{:016x}", dungeon.fingerprint()));
        assert_eq!(value["report"]["seed"], 12);
    }
}
