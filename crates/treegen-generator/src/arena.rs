//! Index arena used while a tree is still being assembled.
//!
//! Nodes refer to their children by index, so attaching under any already
//! placed node is a push. A slot's parent always has a lower index than the
//! slot itself, which lets [`TreeArena::build`] fold the arena bottom-up.

#[derive(Debug)]
struct Slot<T> {
    value: T,
    children: Vec<usize>,
}

#[derive(Debug)]
pub(crate) struct TreeArena<T> {
    slots: Vec<Slot<T>>,
}

impl<T> TreeArena<T> {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Insert a value, as a child of `parent` if one is given.
    ///
    /// `parent` must be an index returned by an earlier call.
    pub(crate) fn push(&mut self, value: T, parent: Option<usize>) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot {
            value,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.slots[parent].children.push(index);
        }
        index
    }

    /// Fold the tree rooted at slot 0 into an owned tree.
    ///
    /// `node` receives a slot's value and its already built children in
    /// attachment order. Returns `None` for an empty arena.
    pub(crate) fn build<O, F>(self, mut node: F) -> Option<O>
    where
        F: FnMut(T, Vec<O>) -> O,
    {
        let mut built: Vec<Option<O>> = Vec::with_capacity(self.slots.len());
        built.resize_with(self.slots.len(), || None);

        for (index, slot) in self.slots.into_iter().enumerate().rev() {
            let children = slot
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[index] = Some(node(slot.value, children));
        }

        built.into_iter().next().flatten()
    }
}
