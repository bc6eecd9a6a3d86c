/// Procedural NFT art
///
/// Every token id maps to one fixed set of traits and one fixed drawing.
/// Traits come from [`ArtMetadata::generate`], pixels from [`render`], and
/// [`generate_collection`] writes a whole numbered collection to disk.

use std::f64::consts::PI;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use image::{ImageFormat, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::round2;

/// Edge length of images served over HTTP
pub const IMAGE_SIZE: u32 = 512;

/// Upper bound for one locally generated collection
pub const MAX_COLLECTION_SIZE: u32 = 100;

const BACKGROUNDS: [&str; 5] = ["#1a1a2e", "#16213e", "#0f3460", "#533483", "#7209b7"];
const PRIMARY: [&str; 5] = ["#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57"];
const SECONDARY: [&str; 5] = ["#ff9ff3", "#54a0ff", "#5f27cd", "#00d2d3", "#ff9f43"];
const ACCENT: [&str; 5] = ["#ffd93d", "#6c5ce7", "#a29bfe", "#fd79a8", "#00b894"];

// Layout draws from its own stream so trait choices stay independent of canvas size
const LAYOUT_SALT: u64 = 0x5eed_a47;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Polygon,
    Star,
    Hexagon,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Gradient,
    Stripes,
    Dots,
    Waves,
    Geometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Glow,
    Shadow,
    Blur,
    None,
}

const SHAPES: [Shape; 5] = [Shape::Circle, Shape::Polygon, Shape::Star, Shape::Hexagon, Shape::Diamond];
const PATTERNS: [Pattern; 5] = [Pattern::Gradient, Pattern::Stripes, Pattern::Dots, Pattern::Waves, Pattern::Geometric];
const EFFECTS: [Effect; 4] = [Effect::Glow, Effect::Shadow, Effect::Blur, Effect::None];

/// The traits of one generated artwork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtMetadata {
    pub token_id: u32,
    pub background: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub shape: Shape,
    pub pattern: Pattern,
    pub effect: Effect,
    pub complexity: u32,
    pub size_variation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtAttribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

/// Marketplace-style metadata document for one artwork
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtDocument {
    pub token_id: u32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<ArtAttribute>,
    pub rarity_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestItem {
    pub token_id: u32,
    pub name: String,
    pub rarity_score: u32,
}

/// Contents of `collection.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionManifest {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub total_supply: u32,
    pub items: Vec<ManifestItem>,
}

fn pick<T: Copy>(rng: &mut StdRng, values: &[T]) -> T {
    // The palettes are non-empty constants
    *values.choose(rng).unwrap_or(&values[0])
}

impl ArtMetadata {
    /// Traits for `token_id`; the same id always yields the same traits
    pub fn generate(token_id: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(u64::from(token_id));

        ArtMetadata {
            token_id,
            background: pick(&mut rng, &BACKGROUNDS).to_string(),
            primary: pick(&mut rng, &PRIMARY).to_string(),
            secondary: pick(&mut rng, &SECONDARY).to_string(),
            accent: pick(&mut rng, &ACCENT).to_string(),
            shape: pick(&mut rng, &SHAPES),
            pattern: pick(&mut rng, &PATTERNS),
            effect: pick(&mut rng, &EFFECTS),
            complexity: rng.random_range(3..=8),
            size_variation: round2(rng.random_range(0.5..2.0)),
        }
    }

    pub fn name(&self) -> String {
        format!("Generated Art #{}", self.token_id)
    }

    /// `complexity * 10`, plus 20 when an effect is applied
    pub fn rarity_score(&self) -> u32 {
        let effect_bonus = if self.effect == Effect::None { 0 } else { 20 };
        self.complexity * 10 + effect_bonus
    }

    pub fn attributes(&self) -> Vec<ArtAttribute> {
        let attr = |trait_type: &str, value: serde_json::Value| ArtAttribute {
            trait_type: trait_type.to_string(),
            value,
        };
        vec![
            attr("Background", self.background.clone().into()),
            attr("Primary Color", self.primary.clone().into()),
            attr("Secondary Color", self.secondary.clone().into()),
            attr("Accent Color", self.accent.clone().into()),
            attr("Shape Type", serde_json::to_value(self.shape).unwrap_or_default()),
            attr("Pattern", serde_json::to_value(self.pattern).unwrap_or_default()),
            attr("Effect", serde_json::to_value(self.effect).unwrap_or_default()),
            attr("Complexity", self.complexity.into()),
            attr("Size Variation", self.size_variation.into()),
        ]
    }

    /// The metadata document with `image` pointing at `image_path`
    pub fn to_document(&self, image_path: String) -> ArtDocument {
        ArtDocument {
            token_id: self.token_id,
            name: self.name(),
            description: "Unique procedurally generated digital artwork".to_string(),
            image: image_path,
            attributes: self.attributes(),
            rarity_score: self.rarity_score(),
        }
    }
}

fn parse_hex(color: &str) -> Rgba<u8> {
    let hex = color.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    Rgba([channel(0), channel(2), channel(4), 255])
}

/// Alpha-blends `color` over the pixel at (x, y) with the given opacity
fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, opacity: f64) {
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = opacity.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x, y);
    for i in 0..3 {
        let over = f64::from(color.0[i]);
        let under = f64::from(pixel.0[i]);
        pixel.0[i] = (over * alpha + under * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8;
    }
    pixel.0[3] = 255;
}

#[derive(Debug, Clone, Copy)]
enum Fill {
    Solid(Rgba<u8>),
    Gradient(Rgba<u8>, Rgba<u8>),
}

impl Fill {
    // Diagonal gradient from the top-left to the bottom-right corner of the canvas
    fn color_at(&self, x: u32, y: u32, size: u32) -> Rgba<u8> {
        match *self {
            Fill::Solid(color) => color,
            Fill::Gradient(from, to) => {
                let span = f64::from(2 * size.saturating_sub(1).max(1));
                let t = f64::from(x + y) / span;
                let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
                Rgba([mix(from.0[0], to.0[0]), mix(from.0[1], to.0[1]), mix(from.0[2], to.0[2]), 255])
            }
        }
    }
}

/// A shape placed on the canvas, in pixel units
#[derive(Debug, Clone)]
struct Placed {
    cx: f64,
    cy: f64,
    radius: f64,
    kind: Shape,
    // Only polygons, hexagons and stars use vertices
    vertices: Vec<(f64, f64)>,
}

fn regular_vertices(cx: f64, cy: f64, radius: f64, sides: usize, rotation: f64) -> Vec<(f64, f64)> {
    (0..sides)
        .map(|i| {
            let angle = rotation + 2.0 * PI * i as f64 / sides as f64;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

fn star_vertices(cx: f64, cy: f64, radius: f64) -> Vec<(f64, f64)> {
    (0..10)
        .map(|i| {
            let angle = f64::from(i) * PI / 5.0 - PI / 2.0;
            let r = if i % 2 == 0 { radius } else { radius * 0.5 };
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

// Even-odd rule
fn inside_polygon(vertices: &[(f64, f64)], px: f64, py: f64) -> bool {
    let mut inside = false;
    let mut j = vertices.len().wrapping_sub(1);
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Placed {
    fn new(kind: Shape, cx: f64, cy: f64, radius: f64, rng: &mut StdRng) -> Self {
        let vertices = match kind {
            Shape::Polygon => {
                let sides = rng.random_range(3..=8);
                let rotation = rng.random_range(0.0..PI);
                regular_vertices(cx, cy, radius, sides, rotation)
            }
            Shape::Hexagon => regular_vertices(cx, cy, radius, 6, 0.0),
            Shape::Star => star_vertices(cx, cy, radius),
            Shape::Circle | Shape::Diamond => Vec::new(),
        };
        Placed { cx, cy, radius, kind, vertices }
    }

    fn shifted(&self, dx: f64, dy: f64, scale: f64) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|&(x, y)| (self.cx + (x - self.cx) * scale + dx, self.cy + (y - self.cy) * scale + dy))
            .collect();
        Placed {
            cx: self.cx + dx,
            cy: self.cy + dy,
            radius: self.radius * scale,
            kind: self.kind,
            vertices,
        }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        let dx = px - self.cx;
        let dy = py - self.cy;
        match self.kind {
            Shape::Circle => dx * dx + dy * dy <= self.radius * self.radius,
            Shape::Diamond => dx.abs() + dy.abs() <= self.radius,
            Shape::Polygon | Shape::Hexagon | Shape::Star => inside_polygon(&self.vertices, px, py),
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, fill: Fill, opacity: f64) {
        let size = canvas.width();
        let x0 = (self.cx - self.radius).floor().max(0.0) as u32;
        let y0 = (self.cy - self.radius).floor().max(0.0) as u32;
        let x1 = ((self.cx + self.radius).ceil().max(0.0) as u32).min(canvas.width().saturating_sub(1));
        let y1 = ((self.cy + self.radius).ceil().max(0.0) as u32).min(canvas.height().saturating_sub(1));

        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.contains(f64::from(x) + 0.5, f64::from(y) + 0.5) {
                    blend_pixel(canvas, x, y, fill.color_at(x, y, size), opacity);
                }
            }
        }
    }
}

fn draw_pattern(canvas: &mut RgbaImage, pattern: Pattern, accent: Rgba<u8>, rng: &mut StdRng) {
    let (width, height) = canvas.dimensions();
    let scale = f64::from(width) / f64::from(IMAGE_SIZE);

    match pattern {
        Pattern::Gradient => {
            for y in 0..height {
                let opacity = 0.25 * f64::from(y) / f64::from(height.max(1));
                for x in 0..width {
                    blend_pixel(canvas, x, y, accent, opacity);
                }
            }
        }
        Pattern::Stripes => {
            let step = ((30.0 * scale).round() as u32).max(2);
            for x in (0..width).step_by(step as usize) {
                for y in 0..height {
                    blend_pixel(canvas, x, y, accent, 0.2);
                    blend_pixel(canvas, x + 1, y, accent, 0.2);
                }
            }
        }
        Pattern::Dots => {
            for _ in 0..20 {
                let cx = rng.random_range(0.0..=f64::from(width));
                let cy = rng.random_range(0.0..=f64::from(height));
                let radius = f64::from(rng.random_range(2..=8u32)) * scale;
                Placed::new(Shape::Circle, cx, cy, radius, rng).draw(canvas, Fill::Solid(accent), 0.5);
            }
        }
        Pattern::Waves => {
            let amplitude = 12.0 * scale;
            let period = 96.0 * scale;
            let spacing = ((64.0 * scale).round() as u32).max(4);
            for baseline in (0..height).step_by(spacing as usize) {
                for x in 0..width {
                    let offset = amplitude * (2.0 * PI * f64::from(x) / period).sin();
                    let y = f64::from(baseline) + offset;
                    if y >= 0.0 {
                        blend_pixel(canvas, x, y as u32, accent, 0.3);
                        blend_pixel(canvas, x, y as u32 + 1, accent, 0.3);
                    }
                }
            }
        }
        Pattern::Geometric => {
            let cell = ((64.0 * scale).round() as u32).max(4);
            for y in 0..height {
                for x in 0..width {
                    let (u, v) = (x % cell, y % cell);
                    if u == v || u + v == cell - 1 {
                        blend_pixel(canvas, x, y, accent, 0.15);
                    }
                }
            }
        }
    }
}

/// Draws the artwork described by `metadata` on a `size`×`size` canvas
pub fn render(metadata: &ArtMetadata, size: u32) -> RgbaImage {
    let size = size.max(1);
    let scale = f64::from(size) / f64::from(IMAGE_SIZE);
    let mut rng = StdRng::seed_from_u64(u64::from(metadata.token_id) ^ LAYOUT_SALT);

    let background = parse_hex(&metadata.background);
    let primary = parse_hex(&metadata.primary);
    let secondary = parse_hex(&metadata.secondary);
    let accent = parse_hex(&metadata.accent);
    let fills = [
        Fill::Solid(primary),
        Fill::Solid(secondary),
        Fill::Solid(accent),
        Fill::Gradient(primary, secondary),
        Fill::Gradient(secondary, accent),
    ];

    let mut canvas = RgbaImage::from_pixel(size, size, background);

    let margin = 50.0 * scale;
    for i in 0..metadata.complexity {
        let cx = rng.random_range(margin..=(f64::from(size) - margin).max(margin));
        let cy = rng.random_range(margin..=(f64::from(size) - margin).max(margin));
        let radius = f64::from(rng.random_range(20..=100u32)) * scale * metadata.size_variation;
        let opacity = rng.random_range(0.3..=0.9);
        let fill = pick(&mut rng, &fills);
        let shape = Placed::new(metadata.shape, cx, cy, radius, &mut rng);

        if i == 0 {
            match metadata.effect {
                Effect::Glow => shape.shifted(0.0, 0.0, 1.3).draw(&mut canvas, Fill::Solid(accent), opacity * 0.35),
                Effect::Shadow => {
                    let offset = 4.0 * scale;
                    shape.shifted(offset, offset, 1.0).draw(&mut canvas, Fill::Solid(Rgba([0, 0, 0, 255])), 0.3)
                }
                Effect::Blur | Effect::None => {}
            }
        }

        shape.draw(&mut canvas, fill, opacity);
    }

    if metadata.effect == Effect::Blur {
        canvas = image::imageops::blur(&canvas, (2.0 * scale).max(0.5) as f32);
    }

    draw_pattern(&mut canvas, metadata.pattern, accent, &mut rng);

    canvas
}

/// Encodes an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}

/// Renders and encodes the HTTP-sized image for a token
pub fn token_png(token_id: u32) -> Result<Vec<u8>> {
    encode_png(&render(&ArtMetadata::generate(token_id), IMAGE_SIZE))
}

fn write_token(dir: &Path, token_id: u32) -> Result<ManifestItem> {
    let metadata = ArtMetadata::generate(token_id);
    let image = render(&metadata, IMAGE_SIZE);

    let image_path = dir.join("images").join(format!("{}.png", token_id));
    image
        .save_with_format(&image_path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", image_path.display()))?;

    let document = metadata.to_document(format!("images/{}.png", token_id));
    let metadata_path = dir.join("metadata").join(format!("{}.json", token_id));
    fs::write(&metadata_path, serde_json::to_string_pretty(&document)?)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;

    debug!("Generated art for token {}", token_id);

    Ok(ManifestItem {
        token_id,
        name: document.name,
        rarity_score: document.rarity_score,
    })
}

/// Writes tokens `1..=count` into `dir` in parallel
///
/// Produces `images/{id}.png`, `metadata/{id}.json` and `collection.json`.
/// `count` is clamped to `1..=100`.
pub fn generate_collection(dir: &Path, count: u32) -> Result<CollectionManifest> {
    let count = count.clamp(1, MAX_COLLECTION_SIZE);

    fs::create_dir_all(dir.join("images"))
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::create_dir_all(dir.join("metadata"))
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    info!("Generating {} artworks into {}", count, dir.display());

    let items = (1..=count)
        .into_par_iter()
        .map(|token_id| write_token(dir, token_id))
        .collect::<Result<Vec<_>>>()?;

    let manifest = CollectionManifest {
        name: "Generated Art Collection".to_string(),
        description: "Unique procedurally generated digital artworks".to_string(),
        created_at: Utc::now(),
        total_supply: count,
        items,
    };

    fs::write(dir.join("collection.json"), serde_json::to_string_pretty(&manifest)?)
        .context("Failed to write collection.json")?;

    Ok(manifest)
}
