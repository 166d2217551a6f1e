use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::constants::*;
use crate::sequence::{CyclicIndex, ItemSequence};
use crate::state::SlideshowState;
use crate::window::{SlideWindow, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub interval: Duration,       // Period of the append timer
    pub eviction_delay: Duration, // One-shot delay between an append and its eviction
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(TICK_INTERVAL_MS),
            eviction_delay: Duration::from_millis(EVICTION_DELAY_MS),
        }
    }
}

/// Everything one session's timers may touch. Each session gets its own,
/// so a task left over from a replaced session can only reach dead state.
#[derive(Debug)]
struct SessionState {
    sequence: ItemSequence,
    window: SlideWindow,
    index: Option<CyclicIndex>,
    phase: SlideshowState,
    pending_evictions: usize,
    evictions: Vec<JoinHandle<()>>,
}

type SharedState = Arc<Mutex<SessionState>>;

#[derive(Debug)]
struct Session {
    state: SharedState,
    ticker: Option<JoinHandle<()>>,
}

impl Session {
    fn cancel(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        let mut state = self.state.lock();
        for eviction in state.evictions.drain(..) {
            eviction.abort();
        }
        state.pending_evictions = 0;
        state.phase = SlideshowState::Idle;
    }
}

// Replacing or dropping a session always releases its timers
impl Drop for Session {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Drives the rotating window for the currently selected category.
///
/// At most one session is alive. [`start`](Self::start) and
/// [`stop`](Self::stop) abort the previous session's periodic and eviction
/// tasks before anything else happens, so on a single threaded runtime none
/// of them runs again.
#[derive(Debug, Default)]
pub struct SlideshowScheduler {
    timing: Timing,
    session: Option<Session>,
}

impl SlideshowScheduler {
    pub fn new(timing: Timing) -> Self {
        Self { timing, session: None }
    }

    /// Replace the running session with one playing `sequence`.
    ///
    /// Must be called from inside a tokio runtime when `sequence` is not empty.
    pub fn start(&mut self, sequence: impl Into<ItemSequence>) {
        // Old timers go first, before any new state exists
        self.stop();

        let sequence = sequence.into();
        let len = sequence.len();

        // --- Empty sequence: idle window, no timer ---
        if sequence.is_empty() {
            info!("empty sequence, slideshow stays idle");
            self.session = Some(Session {
                state: Arc::new(Mutex::new(SessionState {
                    sequence,
                    window: SlideWindow::new(),
                    index: None,
                    phase: SlideshowState::Idle,
                    pending_evictions: 0,
                    evictions: Vec::new(),
                })),
                ticker: None,
            });
            return;
        }

        // --- Seed with items 0 and 1 (a hole when there is a single item) ---
        let window = SlideWindow::seeded(sequence.get(0).cloned(), sequence.get(1).cloned());
        let index = CyclicIndex::after_seed(len);
        debug!(?window, "seeded slideshow window");

        let state = Arc::new(Mutex::new(SessionState {
            sequence,
            window,
            index,
            phase: SlideshowState::Seeded,
            pending_evictions: 0,
            evictions: Vec::new(),
        }));

        let first_tick = Instant::now() + self.timing.interval;
        let ticker = tokio::spawn(run_ticks(Arc::clone(&state), first_tick, self.timing));
        info!(items = len, interval = ?self.timing.interval, "slideshow started");

        self.session = Some(Session { state, ticker: Some(ticker) });
    }

    /// Cancel every timer of the current session and clear the window.
    /// Calling it with nothing running does nothing.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
            debug!("slideshow session cancelled");
        }
    }

    /// Read-only copy of the current window, empty when nothing plays.
    pub fn current_window(&self) -> Vec<Slot> {
        self.session
            .as_ref()
            .map(|session| session.state.lock().window.snapshot())
            .unwrap_or_default()
    }

    pub fn phase(&self) -> SlideshowState {
        self.session
            .as_ref()
            .map(|session| session.state.lock().phase)
            .unwrap_or(SlideshowState::Idle)
    }

    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.ticker.is_some())
    }

    /// Position the next tick will append, if a sequence is playing.
    pub fn cursor(&self) -> Option<usize> {
        self.session
            .as_ref()
            .and_then(|session| session.state.lock().index)
            .map(CyclicIndex::current)
    }
}

async fn run_ticks(state: SharedState, first_tick: Instant, timing: Timing) {
    let mut ticker = time::interval_at(first_tick, timing.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        tick(&state, timing.eviction_delay);
    }
}

fn tick(shared: &SharedState, eviction_delay: Duration) {
    let mut state = shared.lock();
    let Some(mut index) = state.index else {
        return;
    };

    // 1. Append the item under the cursor
    let cursor = index.current();
    debug_assert!(cursor < state.sequence.len(), "cursor {cursor} outside sequence");
    let slot = state.sequence.get(cursor).cloned();
    if slot.is_none() {
        error!(cursor, items = state.sequence.len(), "cursor outside sequence");
    }
    state.window.append(slot);

    // 2. Schedule this tick's eviction, independent of any still pending
    let deadline = Instant::now() + eviction_delay;
    let evict_state = Arc::clone(shared);
    let eviction = tokio::spawn(async move {
        time::sleep_until(deadline).await;
        evict(&evict_state);
    });
    state.evictions.retain(|handle| !handle.is_finished());
    state.evictions.push(eviction);
    state.pending_evictions += 1;
    state.phase = SlideshowState::EvictPending;

    // 3. Advance, wrapping at the end of the sequence
    index.advance();
    state.index = Some(index);

    debug!(window = ?state.window, next = index.current(), "appended slide");
}

fn evict(shared: &SharedState) {
    let mut state = shared.lock();
    state.window.evict_oldest();
    state.pending_evictions = state.pending_evictions.saturating_sub(1);
    if state.pending_evictions == 0 {
        state.phase = SlideshowState::Steady;
    }
    debug!(window = ?state.window, "evicted oldest slide");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> Timing {
        Timing {
            interval: Duration::from_millis(3000),
            eviction_delay: Duration::from_millis(1000),
        }
    }

    fn slots(items: &[&str]) -> Vec<Slot> {
        items.iter().map(|s| Some(s.to_string())).collect()
    }

    // Sleeps on the paused clock, every timer due before the target fires first
    async fn at(start: Instant, millis: u64) {
        time::sleep_until(start + Duration::from_millis(millis)).await;
    }

    #[test]
    fn empty_sequence_stays_idle_without_runtime() {
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(ItemSequence::default());
        assert!(scheduler.current_window().is_empty());
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.phase(), SlideshowState::Idle);
        assert_eq!(scheduler.cursor(), None);
    }

    #[test]
    fn stop_without_session_is_noop() {
        let mut scheduler = SlideshowScheduler::default();
        scheduler.stop();
        scheduler.stop();
        assert!(scheduler.current_window().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_sequence_never_ticks() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(Vec::<String>::new());
        at(start, 30_000).await;
        assert!(scheduler.current_window().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn three_items_rotate_on_schedule() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(["a", "b", "c"]);

        assert_eq!(scheduler.current_window(), slots(&["a", "b"]));
        assert_eq!(scheduler.phase(), SlideshowState::Seeded);

        at(start, 3500).await;
        assert_eq!(scheduler.current_window(), slots(&["a", "b", "c"]));
        assert_eq!(scheduler.phase(), SlideshowState::EvictPending);

        at(start, 4500).await;
        assert_eq!(scheduler.current_window(), slots(&["b", "c"]));
        assert_eq!(scheduler.phase(), SlideshowState::Steady);

        at(start, 6500).await;
        assert_eq!(scheduler.current_window(), slots(&["b", "c", "a"]));

        at(start, 7500).await;
        assert_eq!(scheduler.current_window(), slots(&["c", "a"]));
    }

    #[tokio::test(start_paused = true)]
    async fn single_item_seeds_a_hole_and_repeats() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(["a"]);
        assert_eq!(scheduler.current_window(), vec![Some("a".to_string()), None]);
        assert_eq!(scheduler.cursor(), Some(0));

        at(start, 3500).await;
        assert_eq!(scheduler.current_window(), vec![Some("a".to_string()), None, Some("a".to_string())]);

        at(start, 4500).await;
        assert_eq!(scheduler.current_window(), vec![None, Some("a".to_string())]);

        at(start, 7500).await;
        assert_eq!(scheduler.current_window(), slots(&["a", "a"]));
        assert_eq!(scheduler.cursor(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn cursor_wraps_over_five_items() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(["a", "b", "c", "d", "e"]);

        let mut seen = vec![scheduler.cursor().unwrap()];
        for tick in 1..=6 {
            at(start, tick * 3000 + 500).await;
            seen.push(scheduler.cursor().unwrap());
        }
        assert_eq!(seen, vec![2, 3, 4, 0, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn window_stays_between_two_and_three() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(["a", "b", "c", "d"]);

        for step in 0..120 {
            at(start, step * 250 + 125).await;
            let len = scheduler.current_window().len();
            assert!((2..=3).contains(&len), "window length {len} at step {step}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_previous_session() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(["a", "b", "c"]);

        // The old session's first tick is due at this very instant
        at(start, 3000).await;
        scheduler.start(["x", "y", "z"]);
        assert_eq!(scheduler.current_window(), slots(&["x", "y"]));

        // An eviction from the old session would have fired at 4000
        at(start, 5500).await;
        assert_eq!(scheduler.current_window(), slots(&["x", "y"]));

        at(start, 6500).await;
        assert_eq!(scheduler.current_window(), slots(&["x", "y", "z"]));

        at(start, 7500).await;
        assert_eq!(scheduler.current_window(), slots(&["y", "z"]));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_while_eviction_pending() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(["a", "b", "c"]);

        at(start, 3500).await;
        assert_eq!(scheduler.current_window().len(), 3);
        scheduler.start(["x", "y"]);

        at(start, 4500).await;
        assert_eq!(scheduler.current_window(), slots(&["x", "y"]));
        assert_eq!(scheduler.phase(), SlideshowState::Seeded);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_clears_and_silences_timers() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(timing());
        scheduler.start(["a", "b", "c"]);

        at(start, 3500).await;
        scheduler.stop();
        assert!(scheduler.current_window().is_empty());
        assert!(!scheduler.is_running());

        at(start, 20_000).await;
        assert!(scheduler.current_window().is_empty());
        assert_eq!(scheduler.phase(), SlideshowState::Idle);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn long_eviction_delay_keeps_one_eviction_per_tick() {
        let start = Instant::now();
        let mut scheduler = SlideshowScheduler::new(Timing {
            interval: Duration::from_millis(1000),
            eviction_delay: Duration::from_millis(2500),
        });
        scheduler.start(["a", "b", "c", "d"]);

        // Ticks at 1000 and 2000, neither eviction has fired yet
        at(start, 2200).await;
        assert_eq!(scheduler.current_window(), slots(&["a", "b", "c", "d"]));

        // First eviction at 3500, second at 4500, ticks at 3000 and 4000
        at(start, 3700).await;
        assert_eq!(scheduler.current_window(), slots(&["b", "c", "d", "a"]));
        assert_eq!(scheduler.phase(), SlideshowState::EvictPending);

        at(start, 4700).await;
        assert_eq!(scheduler.current_window(), slots(&["c", "d", "a", "b"]));
    }
}
