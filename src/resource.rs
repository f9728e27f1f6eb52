use crate::Output;
use std::{any::Any, rc::Rc};

/// Capability set shared by every compilable resource kind; the registry
/// stores resources behind this trait and deduplicates through it.
pub trait Resource: 'static {
    fn id(&self) -> &str;

    /// Cheap pre-filter digest; two structurally equal resources always
    /// agree on it.
    fn fingerprint(&self) -> u32;

    fn structural_eq(&self, other: &dyn Resource) -> bool;

    /// Header-only cost of the emitted record, in bytes.
    fn shallow_size(&self) -> u32;

    /// Full cost including owned payloads and distinct sub-resources.
    fn total_size(&self) -> u32;

    fn emit(&self, out: &mut Output);

    fn as_any(&self) -> &dyn Any;

    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}
