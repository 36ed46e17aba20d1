//! Toast notifications with timed close and delayed removal.
//!
//! [`Toaster`] keeps its own schedule of pending callbacks keyed by toast id.
//! Nothing fires on its own: the host calls [`Toaster::advance`] with the
//! current time, typically from a timeout set for [`Toaster::next_deadline`].

use std::collections::BTreeMap;

/// Default lifetime before a toast closes itself, ms.
pub const DEFAULT_DURATION: f64 = 5000.0;
/// Time between closing and removal, ms; matches the exit transition.
pub const REMOVE_DELAY: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Default,
    Destructive,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Default => "default",
            Severity::Destructive => "destructive",
            Severity::Success => "success",
        }
    }
}

pub type ToastId = u64;

/// Everything needed to raise a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastRequest {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// Milliseconds; zero or less keeps it open until dismissed.
    pub duration: f64,
}

impl ToastRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self { title: title.into(), description: description.into(), severity, duration: DEFAULT_DURATION }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub duration: f64,
    pub open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Dismiss(ToastId),
    Remove(ToastId),
}

impl Pending {
    fn id(&self) -> ToastId {
        match *self {
            Pending::Dismiss(id) | Pending::Remove(id) => id,
        }
    }
}

/// Deadline in ms plus an insertion counter, so equal deadlines keep order.
#[derive(Debug, Clone, Copy)]
struct Due(f64, u64);

impl PartialEq for Due {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Due {}

impl PartialOrd for Due {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Due {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Vec<Toast>,
    next_id: ToastId,
    schedule: BTreeMap<Due, Pending>,
    seq: u64,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current toasts in display order.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    fn schedule_at(&mut self, at: f64, pending: Pending) {
        self.seq += 1;
        self.schedule.insert(Due(at, self.seq), pending);
    }

    /// Append an open toast and, if it has a lifetime, schedule its dismissal.
    pub fn raise(&mut self, now: f64, request: ToastRequest) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("toast {id}: {} ({})", request.title, request.severity.as_str());
        if request.duration > 0.0 {
            self.schedule_at(now + request.duration, Pending::Dismiss(id));
        }
        self.toasts.push(Toast {
            id,
            title: request.title,
            description: request.description,
            severity: request.severity,
            duration: request.duration,
            open: true,
        });
        id
    }

    /// Close a toast now and remove it [`REMOVE_DELAY`] later. Unknown,
    /// removed or already closed ids are ignored.
    pub fn dismiss(&mut self, now: f64, id: ToastId) {
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) else {
            return;
        };
        if !toast.open {
            return;
        }
        toast.open = false;
        self.schedule_at(now + REMOVE_DELAY, Pending::Remove(id));
    }

    /// Fire every callback due at or before `now`, earliest first.
    /// Returns whether anything visible changed.
    pub fn advance(&mut self, now: f64) -> bool {
        let mut changed = false;
        while let Some(entry) = self.schedule.first_entry() {
            let Due(at, _) = *entry.key();
            if at > now {
                break;
            }
            let pending = entry.remove();
            changed |= match pending {
                Pending::Dismiss(id) => {
                    let was_open = self.get(id).is_some_and(|t| t.open);
                    // Removal is timed from when the toast actually closed.
                    self.dismiss(at, id);
                    was_open
                }
                Pending::Remove(id) => {
                    let before = self.toasts.len();
                    self.toasts.retain(|t| t.id != id);
                    before != self.toasts.len()
                }
            };
        }
        changed
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.schedule.keys().next().map(|Due(at, _)| *at)
    }

    /// Pending callbacks for one toast.
    pub fn pending_for(&self, id: ToastId) -> usize {
        self.schedule.values().filter(|p| p.id() == id).count()
    }

    /// Drop every pending callback; toasts stay as they are.
    pub fn cancel_all(&mut self) {
        self.schedule.clear();
    }
}
