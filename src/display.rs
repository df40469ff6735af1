//! The display container and the render-cycle bookkeeping around it.
//!
//! Every submission opens a new [`RenderCycle`]. Writes name the cycle they
//! belong to so that, under [`StalePolicy::DropStale`], output from a
//! superseded search never reaches the container.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use serde::Deserialize;

/// Something that holds the rendered results, like a page element
pub trait ResultsContainer: Send + Sync {
    /// Clear the container and set its content
    fn replace(&self, html: &str);

    /// Add content after whatever is already there
    fn append(&self, html: &str);

    /// Current content
    fn html(&self) -> String;
}

/// In-memory container backed by a string
#[derive(Debug, Default)]
pub struct HtmlBuffer {
    content: Mutex<String>,
}

impl HtmlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_content<R>(&self, f: impl FnOnce(&mut String) -> R) -> R {
        let mut guard = self
            .content
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl ResultsContainer for HtmlBuffer {
    fn replace(&self, html: &str) {
        self.with_content(|content| {
            content.clear();
            content.push_str(html);
        });
    }

    fn append(&self, html: &str) {
        self.with_content(|content| content.push_str(html));
    }

    fn html(&self) -> String {
        self.with_content(|content| content.clone())
    }
}

/// How writes from a superseded render cycle are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Every write lands; whichever cycle finishes last owns the container
    #[default]
    LastWriteWins,
    /// Writes from any cycle other than the newest are ignored
    DropStale,
}

/// Token identifying one search-to-display sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderCycle(u64);

impl RenderCycle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The container plus the current render-cycle token
pub struct UiState {
    container: Arc<dyn ResultsContainer>,
    current: AtomicU64,
    policy: StalePolicy,
}

impl UiState {
    pub fn new(container: Arc<dyn ResultsContainer>, policy: StalePolicy) -> Self {
        Self {
            container,
            current: AtomicU64::new(0),
            policy,
        }
    }

    /// UI state over a fresh [`HtmlBuffer`] with last-write-wins semantics
    pub fn in_memory() -> Self {
        Self::new(Arc::new(HtmlBuffer::new()), StalePolicy::default())
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// Start a new render cycle; it becomes the current one
    pub fn begin_cycle(&self) -> RenderCycle {
        RenderCycle(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, cycle: RenderCycle) -> bool {
        self.current.load(Ordering::SeqCst) == cycle.0
    }

    /// Replace the container content on behalf of `cycle`.
    /// Returns whether the write was applied.
    pub fn replace(&self, cycle: RenderCycle, html: &str) -> bool {
        if !self.accepts(cycle) {
            return false;
        }
        self.container.replace(html);
        true
    }

    /// Append to the container on behalf of `cycle`.
    /// Returns whether the write was applied.
    pub fn append(&self, cycle: RenderCycle, html: &str) -> bool {
        if !self.accepts(cycle) {
            return false;
        }
        self.container.append(html);
        true
    }

    pub fn html(&self) -> String {
        self.container.html()
    }

    fn accepts(&self, cycle: RenderCycle) -> bool {
        match self.policy {
            StalePolicy::LastWriteWins => true,
            StalePolicy::DropStale => {
                let current = self.is_current(cycle);
                if !current {
                    debug!("dropping write from stale render cycle {}", cycle.id());
                }
                current
            }
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::in_memory()
    }
}
