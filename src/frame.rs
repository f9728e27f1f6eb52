use crate::{
    dedup::{check_equal, FrameCandidate},
    hash::frame_hash,
    Output, Resource, TILE_SIZE,
};
use std::{any::Any, rc::Rc};

/// Gameplay collision-shape classifier, independent of pixel content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collision {
    Box,
    Circle,
}

/// Compression mode for the frame's pixel payload. Stored on the frame;
/// the codec that honors it lives with the tile encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    #[default]
    None,
    Fast,
    Best,
}

/// Sprite-cell layout strategy for the tile encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Optimization {
    #[default]
    Balanced,
    MinSprite,
    MinTile,
    None,
}

/// Per-frame settings shared by every frame of one animation row.
#[derive(Clone, Debug)]
pub struct FrameOptions {
    pub timer: u8,
    pub collision: Option<Collision>,
    pub compression: Compression,
    pub optimization: Optimization,
    pub optimization_iterations: u64,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            timer: 0,
            collision: None,
            compression: Compression::None,
            optimization: Optimization::Balanced,
            optimization_iterations: 500_000,
        }
    }
}

/// One deduplicatable pose of an animation. Canonical instances live in
/// the registry and are shared, by reference, across every animation that
/// resolves to them.
#[derive(Debug)]
pub struct SpriteFrame {
    pub id: String,
    pixels: Vec<u8>,
    width_tiles: usize,
    height_tiles: usize,
    timer: u8,
    collision: Option<Collision>,
    compression: Compression,
    fast_hash: u32,
    num_tile: u32,
    num_sprite: u32,
}

impl SpriteFrame {
    pub fn new(
        id: String,
        pixels: Vec<u8>,
        width_tiles: usize,
        height_tiles: usize,
        options: &FrameOptions,
    ) -> Self {
        let fast_hash = frame_hash(
            &pixels,
            width_tiles,
            height_tiles,
            options.timer,
            options.collision,
        );

        let num_tile = count_used_tiles(&pixels, width_tiles, height_tiles);
        let num_sprite = count_sprites(width_tiles, height_tiles, num_tile);

        Self {
            id,
            pixels,
            width_tiles,
            height_tiles,
            timer: options.timer,
            collision: options.collision,
            compression: options.compression,
            fast_hash,
            num_tile,
            num_sprite,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_tile == 0
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width_tiles(&self) -> usize {
        self.width_tiles
    }

    pub fn height_tiles(&self) -> usize {
        self.height_tiles
    }

    pub fn timer(&self) -> u8 {
        self.timer
    }

    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn fast_hash(&self) -> u32 {
        self.fast_hash
    }

    /// Non-empty tiles, the platform's VRAM cost unit.
    pub fn num_tile(&self) -> u32 {
        self.num_tile
    }

    /// Hardware sprites needed to display the frame.
    pub fn num_sprite(&self) -> u32 {
        self.num_sprite
    }

    pub(crate) fn as_candidate(&self) -> FrameCandidate<'_> {
        FrameCandidate {
            pixels: &self.pixels,
            width_tiles: self.width_tiles,
            height_tiles: self.height_tiles,
            timer: self.timer,
            collision: self.collision,
        }
    }

    fn data_label(&self) -> String {
        format!("{}_data", self.id)
    }
}

impl Resource for SpriteFrame {
    fn id(&self) -> &str {
        &self.id
    }

    fn fingerprint(&self) -> u32 {
        self.fast_hash
    }

    fn structural_eq(&self, other: &dyn Resource) -> bool {
        match other.as_any().downcast_ref::<SpriteFrame>() {
            Some(other) => check_equal(self, other.fast_hash, &other.as_candidate()),
            None => false,
        }
    }

    fn shallow_size(&self) -> u32 {
        2 + 4
    }

    fn total_size(&self) -> u32 {
        self.shallow_size() + self.pixels.len() as u32
    }

    fn emit(&self, out: &mut Output) {
        // Raw payload; staged in the binary stream for the codec stage.
        out.binary.extend_from_slice(&self.pixels);

        out.decl(None, &self.data_label(), 2, false);
        out.dc_b(&self.pixels);
        out.blank();

        out.decl(Some("AnimationFrame"), &self.id, 2, false);
        out.dc_w(((self.num_sprite as u16) << 8) | u16::from(self.timer));
        out.dc_l(&self.data_label());
        out.blank();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

fn count_used_tiles(pixels: &[u8], width_tiles: usize, height_tiles: usize) -> u32 {
    let stride = width_tiles * TILE_SIZE;
    let mut used = 0;

    for ty in 0..height_tiles {
        for tx in 0..width_tiles {
            let in_use = (0..TILE_SIZE).any(|y| {
                let offset = (ty * TILE_SIZE + y) * stride + tx * TILE_SIZE;

                pixels[offset..offset + TILE_SIZE].iter().any(|&p| p != 0)
            });

            if in_use {
                used += 1;
            }
        }
    }

    used
}

// A hardware sprite spans at most 4x4 tiles.
fn count_sprites(width_tiles: usize, height_tiles: usize, used_tiles: u32) -> u32 {
    if used_tiles == 0 {
        0
    } else {
        (((width_tiles + 3) / 4) * ((height_tiles + 3) / 4)) as u32
    }
}
