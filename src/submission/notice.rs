use std::sync::{Arc, Mutex, PoisonError};
use std::time;
use tokio::time::{sleep_until, Instant};

pub const NOTICE_LIFETIME: time::Duration = time::Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Notice {
        Notice {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Notice {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// A spot on the page holding at most one transient notice.
///
/// Showing a notice replaces the current one. Each notice dismisses itself once its
/// lifetime is over, unless it was replaced in the meantime.
#[derive(Clone)]
pub struct NoticeRegion {
    state: Arc<Mutex<RegionState>>,
    lifetime: time::Duration,
}

#[derive(Default)]
struct RegionState {
    current: Option<Notice>,
    generation: u64,
}

impl NoticeRegion {
    pub fn new(lifetime: time::Duration) -> NoticeRegion {
        NoticeRegion {
            state: Arc::new(Mutex::new(RegionState::default())),
            lifetime,
        }
    }

    /// Must be called from within a tokio runtime, the expiry timer runs as a task.
    pub fn show(&self, notice: Notice) {
        let deadline = Instant::now() + self.lifetime;
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.current = Some(notice);
            state.generation
        };
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            sleep_until(deadline).await;

            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer notice owns the region now
            if state.generation == generation {
                state.current = None;
            }
        });
    }

    pub fn dismiss(&self) {
        self.lock().current = None;
    }

    pub fn current(&self) -> Option<Notice> {
        self.lock().current.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NoticeRegion {
    fn default() -> Self {
        NoticeRegion::new(NOTICE_LIFETIME)
    }
}
