use std::collections::VecDeque;

/// One displayed position. `None` is a hole left when the sequence was too
/// short to seed, renderers skip it.
pub type Slot = Option<String>;

/// Slides currently on screen, front = oldest, back = newest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideWindow {
    slots: VecDeque<Slot>,
}

impl SlideWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(first: Slot, second: Slot) -> Self {
        Self { slots: VecDeque::from([first, second]) }
    }

    pub fn append(&mut self, slot: Slot) {
        self.slots.push_back(slot);
    }

    // No-op on an empty window
    pub fn evict_oldest(&mut self) -> Option<Slot> {
        self.slots.pop_front()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Slot> {
        self.slots.iter().cloned().collect()
    }
}
