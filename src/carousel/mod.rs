//! Bounded carousel index with wrap-around.
//!
//! Keeps a rotating "current position" over a fixed item list so that
//! stepping past the last item wraps to the first (and vice versa). The
//! only externally reported state is the normalized logical index in
//! `[0, item_count)` — any wrap-padding or duplicated edge items used for
//! seamless sliding belong to the renderer, not to this core.
//!
//! Auto-play is a tokio interval task owned by the carousel instance:
//! re-enabling replaces the previous timer (never accumulates), disabling
//! or dropping the carousel cancels it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::model::CarouselError;

/// Interior state shared with the auto-play task.
#[derive(Debug)]
struct State {
    index: usize,
    item_count: usize,
    items_per_page: usize,
    transition: Duration,
    transition_started: Option<Instant>,
}

impl State {
    /// True while a visual transition is still running, suppressing
    /// re-entrant steps.
    fn transitioning(&self) -> bool {
        match self.transition_started {
            Some(started) => started.elapsed() < self.transition,
            None => false,
        }
    }

    /// Advance by `delta` steps with wrap-around, honoring the transition
    /// guard. Returns the (possibly unchanged) logical index.
    fn step(&mut self, delta: isize) -> usize {
        if self.transitioning() {
            debug!(index = self.index, "step suppressed during transition");
            return self.index;
        }
        let count = self.item_count as isize;
        let next = (self.index as isize + delta).rem_euclid(count);
        self.index = next as usize;
        if !self.transition.is_zero() {
            self.transition_started = Some(Instant::now());
        }
        self.index
    }
}

/// Rotating current position over a fixed list of `item_count >= 1` items.
///
/// ```
/// use folio::carousel::Carousel;
///
/// let mut carousel = Carousel::new(5).unwrap();
/// for expected in [1, 2, 3, 4, 0] {
///     assert_eq!(carousel.next(), expected);
/// }
/// ```
#[derive(Debug)]
pub struct Carousel {
    inner: Arc<Mutex<State>>,
    autoplay: Option<JoinHandle<()>>,
}

impl Carousel {
    /// Carousel over `item_count` items, starting at logical index 0.
    ///
    /// Items per page defaults to 1 and the transition guard is disabled
    /// (zero duration) until a renderer opts in via
    /// [`with_transition`](Self::with_transition).
    pub fn new(item_count: usize) -> Result<Self, CarouselError> {
        if item_count == 0 {
            return Err(CarouselError::NoItems);
        }
        Ok(Carousel {
            inner: Arc::new(Mutex::new(State {
                index: 0,
                item_count,
                items_per_page: 1,
                transition: Duration::ZERO,
                transition_started: None,
            })),
            autoplay: None,
        })
    }

    /// Set the paging window size (clamped to at least 1).
    pub fn with_items_per_page(self, items_per_page: usize) -> Self {
        self.state().items_per_page = items_per_page.max(1);
        self
    }

    /// Suppress re-entrant steps for `transition` after each move, until
    /// either the duration elapses or the renderer signals
    /// [`on_transition_settled`](Self::on_transition_settled).
    pub fn with_transition(self, transition: Duration) -> Self {
        self.state().transition = transition;
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current logical index, always in `[0, item_count)`.
    pub fn current(&self) -> usize {
        self.state().index
    }

    /// Number of real items.
    pub fn item_count(&self) -> usize {
        self.state().item_count
    }

    /// Advance by one with wrap-around. Returns the resulting logical
    /// index (unchanged if a transition is still running).
    pub fn next(&mut self) -> usize {
        self.state().step(1)
    }

    /// Step back by one with wrap-around; inverse of [`next`](Self::next).
    pub fn prev(&mut self) -> usize {
        self.state().step(-1)
    }

    /// Jump directly to `index`. Out-of-range indices are rejected.
    pub fn go_to(&mut self, index: usize) -> Result<usize, CarouselError> {
        let mut state = self.state();
        if index >= state.item_count {
            return Err(CarouselError::OutOfRange {
                index,
                item_count: state.item_count,
            });
        }
        if state.transitioning() {
            return Ok(state.index);
        }
        state.index = index;
        if !state.transition.is_zero() {
            state.transition_started = Some(Instant::now());
        }
        Ok(index)
    }

    /// Renderer signal that the sliding animation finished, releasing the
    /// transition guard early.
    pub fn on_transition_settled(&mut self) {
        self.state().transition_started = None;
    }

    /// Number of pages for the configured window size:
    /// `ceil(item_count / items_per_page)`.
    pub fn page_count(&self) -> usize {
        let state = self.state();
        state.item_count.div_ceil(state.items_per_page)
    }

    /// 1-based page containing the current index.
    pub fn current_page(&self) -> usize {
        let state = self.state();
        state.index / state.items_per_page + 1
    }

    /// Jump to page `page`, clamped to `[1, page_count]`. Returns the page
    /// actually selected.
    pub fn set_page(&mut self, page: usize) -> usize {
        let page_count = self.page_count();
        let clamped = page.clamp(1, page_count);
        let mut state = self.state();
        state.index = (clamped - 1) * state.items_per_page;
        clamped
    }

    /// Enable or disable timer-driven auto-advance.
    ///
    /// When enabled, [`next`](Self::next) runs once per `interval`.
    /// Repeated enables replace the previous timer rather than stacking;
    /// disabling (or dropping the carousel) cancels it. Requires a running
    /// tokio runtime when enabling.
    pub fn set_auto_play(&mut self, enabled: bool, interval: Duration) {
        if let Some(task) = self.autoplay.take() {
            task.abort();
        }
        if !enabled {
            return;
        }
        if interval.is_zero() {
            warn!("auto-play interval of zero ignored");
            return;
        }
        let inner = Arc::clone(&self.inner);
        self.autoplay = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .step(1);
            }
        }));
    }

    /// True while an auto-play timer is armed.
    pub fn auto_play_enabled(&self) -> bool {
        self.autoplay.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        if let Some(task) = self.autoplay.take() {
            task.abort();
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "carousel_tests.rs"]
mod tests;
