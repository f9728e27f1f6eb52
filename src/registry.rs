use crate::Resource;
use std::rc::Rc;

/// Deduplicating store for every resource produced by a compilation run.
/// Passed explicitly to whatever is compiling; lookups are read-only and
/// `intern` is the single mutation point.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Rc<dyn Resource>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `candidate` unless a structurally equal resource of the
    /// same kind already exists, in which case the existing canonical
    /// instance is returned. At most one canonical instance ever exists
    /// per distinct identity.
    pub fn intern<R: Resource>(&mut self, candidate: R) -> Rc<R> {
        let existing = self.resources::<R>().find(|entry| {
            entry.fingerprint() == candidate.fingerprint() && entry.structural_eq(&candidate)
        });

        if let Some(existing) = existing {
            log::debug!("'{}' is a duplicate of '{}'", candidate.id(), existing.id());
            return existing;
        }

        let entry = Rc::new(candidate);
        self.entries.push(entry.clone());
        entry
    }

    /// All registered resources of one kind, in registration order.
    pub fn resources<R: Resource>(&self) -> impl Iterator<Item = Rc<R>> + '_ {
        self.entries
            .iter()
            .filter_map(|entry| entry.clone().as_any_rc().downcast::<R>().ok())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FrameOptions, SpriteFrame};
    use pretty_assertions::assert_eq;

    fn frame(id: &str, pixels: Vec<u8>) -> SpriteFrame {
        SpriteFrame::new(id.to_owned(), pixels, 1, 1, &FrameOptions::default())
    }

    #[test]
    fn intern_has_at_most_one_winner() {
        let mut registry = Registry::new();

        let first = registry.intern(frame("a", vec![7; 64]));
        let second = registry.intern(frame("b", vec![7; 64]));

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(second.id, "a");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_content_registers_separately() {
        let mut registry = Registry::new();

        let first = registry.intern(frame("a", vec![1; 64]));
        let second = registry.intern(frame("b", vec![2; 64]));

        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn kind_filtered_iteration_keeps_registration_order() {
        let mut registry = Registry::new();

        registry.intern(frame("a", vec![1; 64]));
        registry.intern(frame("b", vec![2; 64]));

        let ids: Vec<_> = registry
            .resources::<SpriteFrame>()
            .map(|frame| frame.id.clone())
            .collect();

        assert_eq!(ids, ["a", "b"]);
    }
}
