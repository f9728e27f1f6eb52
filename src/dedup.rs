use crate::{hash::frame_hash, Collision, Registry, SpriteFrame};
use std::rc::Rc;

/// An extracted frame that has not been resolved against the registry yet.
#[derive(Clone, Copy, Debug)]
pub struct FrameCandidate<'a> {
    pub pixels: &'a [u8],
    pub width_tiles: usize,
    pub height_tiles: usize,
    pub timer: u8,
    pub collision: Option<Collision>,
}

impl FrameCandidate<'_> {
    pub fn fast_hash(&self) -> u32 {
        frame_hash(
            self.pixels,
            self.width_tiles,
            self.height_tiles,
            self.timer,
            self.collision,
        )
    }
}

/// Scans the already-compiled frames for one structurally equal to the
/// candidate. Read-only; when this returns `None` the caller constructs
/// and interns a new canonical frame.
pub fn find_existing_frame(
    registry: &Registry,
    candidate: &FrameCandidate<'_>,
) -> Option<Rc<SpriteFrame>> {
    let hash = candidate.fast_hash();

    registry
        .resources::<SpriteFrame>()
        .find(|frame| check_equal(frame, hash, candidate))
}

// The hash gates the byte comparison; it already mixes in the timer, so
// the timer arm below only decides after a hash collision. The tag arm
// order is load-bearing: a timer mismatch alone never separates two
// frames whose collision tags agree.
pub(crate) fn check_equal(
    existing: &SpriteFrame,
    candidate_hash: u32,
    candidate: &FrameCandidate<'_>,
) -> bool {
    candidate_hash == existing.fast_hash()
        && candidate.pixels == existing.pixels()
        && (existing.collision() == candidate.collision
            || (candidate.collision.is_some()
                && candidate.collision == existing.collision()
                && existing.timer() == candidate.timer))
}
