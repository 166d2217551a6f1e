#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SlideshowState {
    Idle,         // No timer armed: nothing selected, stopped, or an empty sequence
    Seeded,       // Window seeded, waiting for the first tick
    EvictPending, // A tick appended a slide, its eviction has not fired yet
    Steady,       // Every eviction fired, waiting for the next tick
}
