use crate::{
    extract_frames, find_existing_frame, hash::sequence_hash, CompileError, FrameCandidate,
    FrameOptions, Output, Registry, Resource, SheetGeometry, SpriteFrame,
};
use std::{any::Any, fmt, rc::Rc};

/// The emitted header packs the frame count into one byte.
pub const MAX_FRAMES: usize = 255;

/// One compiled animation row: an ordered list of canonical frame
/// references plus the loop point. Built once per (sheet, row) pair.
#[derive(Debug)]
pub struct SpriteAnimation {
    pub id: String,
    frames: Vec<Rc<SpriteFrame>>,
    frame_set: Vec<Rc<SpriteFrame>>,
    loop_index: u8,
    global: bool,
}

impl SpriteAnimation {
    /// Extracts row `row` of the sheet, resolves every candidate against
    /// the registry (interning new canonical frames as needed), drops
    /// empty frames and assembles the record.
    pub fn build(
        id: &str,
        pixels: &[u8],
        geometry: &SheetGeometry,
        row: usize,
        options: &FrameOptions,
        registry: &mut Registry,
    ) -> Result<Self, CompileError> {
        let mut frames: Vec<Rc<SpriteFrame>> = Vec::new();
        let mut frame_set: Vec<Rc<SpriteFrame>> = Vec::new();

        for (i, frame_pixels) in extract_frames(pixels, geometry, row).into_iter().enumerate() {
            let candidate = FrameCandidate {
                pixels: &frame_pixels,
                width_tiles: geometry.frame_width_tiles,
                height_tiles: geometry.frame_height_tiles,
                timer: options.timer,
                collision: options.collision,
            };

            let frame = match find_existing_frame(registry, &candidate) {
                Some(existing) => {
                    log::info!(
                        "frame #{} of animation '{}' (row {}) is a duplicate of '{}'",
                        i,
                        id,
                        row,
                        existing.id
                    );

                    existing
                }

                None => registry.intern(SpriteFrame::new(
                    format!("{}_frame{}", id, i),
                    frame_pixels,
                    geometry.frame_width_tiles,
                    geometry.frame_height_tiles,
                    options,
                )),
            };

            // Empty frames contribute nothing to this animation, but the
            // canonical instance stays registered for other animations.
            if frame.is_empty() {
                log::debug!("frame #{} of animation '{}' (row {}) is empty", i, id, row);
                continue;
            }

            if !frame_set.iter().any(|f| Rc::ptr_eq(f, &frame)) {
                frame_set.push(Rc::clone(&frame));
            }

            frames.push(frame);
        }

        if frames.len() > MAX_FRAMES {
            return Err(CompileError::SizeLimitExceeded {
                id: id.to_owned(),
                count: frames.len(),
                limit: MAX_FRAMES,
            });
        }

        Ok(Self {
            id: id.to_owned(),
            frames,
            frame_set,
            loop_index: 0,
            global: false,
        })
    }

    pub fn set_loop_index(&mut self, value: u16) -> Result<(), CompileError> {
        if value > 0xFF {
            return Err(CompileError::LoopIndexOutOfRange {
                id: self.id.clone(),
                value,
            });
        }

        self.loop_index = value as u8;
        Ok(())
    }

    pub fn loop_index(&self) -> u8 {
        self.loop_index
    }

    pub fn set_global(&mut self, global: bool) {
        self.global = global;
    }

    pub fn frames(&self) -> &[Rc<SpriteFrame>] {
        &self.frames
    }

    pub fn distinct_frames(&self) -> &[Rc<SpriteFrame>] {
        &self.frame_set
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_num_tile(&self) -> u32 {
        self.frames.iter().map(|f| f.num_tile()).max().unwrap_or(0)
    }

    pub fn max_num_sprite(&self) -> u32 {
        self.frames
            .iter()
            .map(|f| f.num_sprite())
            .max()
            .unwrap_or(0)
    }

    /// Count in the high byte, loop index in the low byte. Runtime ABI;
    /// the packing never changes.
    pub fn header_word(&self) -> u16 {
        ((self.frames.len() as u16) << 8) | u16::from(self.loop_index)
    }

    fn table_label(&self) -> String {
        format!("{}_frames", self.id)
    }
}

impl fmt::Display for SpriteAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: frames={} max_tiles={} max_sprites={}",
            self.id,
            self.frames.len(),
            self.max_num_tile(),
            self.max_num_sprite()
        )
    }
}

impl Resource for SpriteAnimation {
    fn id(&self) -> &str {
        &self.id
    }

    fn fingerprint(&self) -> u32 {
        u32::from(self.loop_index) ^ sequence_hash(self.frames.iter().map(|f| f.fast_hash()))
    }

    fn structural_eq(&self, other: &dyn Resource) -> bool {
        match other.as_any().downcast_ref::<SpriteAnimation>() {
            Some(other) => {
                self.loop_index == other.loop_index
                    && self.frames.len() == other.frames.len()
                    && self
                        .frames
                        .iter()
                        .zip(&other.frames)
                        .all(|(a, b)| Rc::ptr_eq(a, b))
            }

            None => false,
        }
    }

    fn shallow_size(&self) -> u32 {
        (self.frames.len() as u32) * 4 + 1 + 1 + 4
    }

    fn total_size(&self) -> u32 {
        // Distinct frames only: a frame referenced twice by this
        // animation is billed once.
        self.shallow_size() + self.frame_set.iter().map(|f| f.total_size()).sum::<u32>()
    }

    fn emit(&self, out: &mut Output) {
        // Pointers only resolve at link time; nothing can land in the
        // raw stream for this record kind.
        out.reset_binary();

        out.decl(None, &self.table_label(), 2, false);
        for frame in &self.frames {
            out.dc_l(&frame.id);
        }
        out.blank();

        out.decl(Some("Animation"), &self.id, 2, self.global);
        out.dc_w(self.header_word());
        out.dc_l(&self.table_label());
        out.blank();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
