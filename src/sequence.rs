use std::sync::Arc;

/// Ordered item references fetched for one category. Cloning shares the
/// underlying list, the contents never change after the fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSequence {
    items: Arc<[String]>,
}

impl ItemSequence {
    pub fn new(items: Vec<String>) -> Self {
        Self { items: items.into() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&String> {
        self.items.get(index)
    }
}

impl From<Vec<String>> for ItemSequence {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

impl<const N: usize> From<[&str; N]> for ItemSequence {
    fn from(items: [&str; N]) -> Self {
        Self::new(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Next position to pull from a sequence of `len` items, always in `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicIndex {
    position: usize,
    len: usize,
}

impl CyclicIndex {
    /// Index used for the first tick, right after the two seeded slots.
    /// `None` for an empty sequence: no index is ever computed there.
    pub fn after_seed(len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self { position: 2 % len, len })
    }

    pub fn current(self) -> usize {
        self.position
    }

    pub fn advance(&mut self) {
        if self.position + 1 >= self.len {
            self.position = 0;
        } else {
            self.position += 1;
        }
    }
}
