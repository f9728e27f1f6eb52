//! Sprite-animation stage of the resource compiler: slices a packed
//! sprite-sheet into frames, interns duplicates across the whole
//! compilation, and emits the pointer-based animation descriptor.

mod animation;
mod dedup;
mod error;
mod frame;
mod hash;
mod output;
mod registry;
mod resource;
mod sheet;

pub use self::{
    animation::*, dedup::*, error::*, frame::*, output::*, registry::*, resource::*, sheet::*,
};
