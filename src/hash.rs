use crate::Collision;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

pub(crate) fn frame_hash(
    pixels: &[u8],
    width_tiles: usize,
    height_tiles: usize,
    timer: u8,
    collision: Option<Collision>,
) -> u32 {
    let mut hasher = FxHasher::default();

    hasher.write_usize(width_tiles);
    hasher.write_usize(height_tiles);
    hasher.write_u8(timer);
    collision.hash(&mut hasher);
    hasher.write(pixels);

    fold(hasher.finish())
}

// Order-sensitive: permuting the elements must change the digest.
pub(crate) fn sequence_hash(hashes: impl IntoIterator<Item = u32>) -> u32 {
    hashes
        .into_iter()
        .fold(1, |acc, hash| acc.wrapping_mul(31).wrapping_add(hash))
}

fn fold(hash: u64) -> u32 {
    (hash as u32) ^ ((hash >> 32) as u32)
}
