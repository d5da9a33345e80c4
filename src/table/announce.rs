// ABOUTME: Progress announcements - the "starting to eat" / "finishing eating" stream.
// ABOUTME: StdoutAnnouncer prints them; MemoryAnnouncer keeps them for inspection.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::time::Instant;

/// What a philosopher is announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    Starting,
    Finishing,
}

/// A single progress line, stamped with the tokio clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    pub philosopher: usize,
    pub kind: AnnouncementKind,
    pub at: Instant,
}

impl Announcement {
    pub fn starting(philosopher: usize) -> Self {
        Self {
            philosopher,
            kind: AnnouncementKind::Starting,
            at: Instant::now(),
        }
    }

    pub fn finishing(philosopher: usize) -> Self {
        Self {
            philosopher,
            kind: AnnouncementKind::Finishing,
            at: Instant::now(),
        }
    }
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AnnouncementKind::Starting => write!(f, "starting to eat {}", self.philosopher),
            AnnouncementKind::Finishing => write!(f, "finishing eating {}", self.philosopher),
        }
    }
}

/// Sink for progress announcements.
pub trait Announcer: Send + Sync {
    fn announce(&self, announcement: Announcement);
}

/// Prints every announcement on its own line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutAnnouncer;

impl Announcer for StdoutAnnouncer {
    fn announce(&self, announcement: Announcement) {
        println!("{}", announcement);
    }
}

/// In-memory announcer.
///
/// Keeps announcements in arrival order. Useful for tests.
#[derive(Debug, Default)]
pub struct MemoryAnnouncer {
    announcements: Mutex<Vec<Announcement>>,
}

impl MemoryAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new announcer wrapped in Arc for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        self.announcements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Announcements rendered the way [`StdoutAnnouncer`] prints them.
    pub fn lines(&self) -> Vec<String> {
        self.announcements()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Announcements made by one philosopher, in order.
    pub fn by_philosopher(&self, philosopher: usize) -> Vec<Announcement> {
        self.announcements()
            .into_iter()
            .filter(|a| a.philosopher == philosopher)
            .collect()
    }
}

impl Announcer for MemoryAnnouncer {
    fn announce(&self, announcement: Announcement) {
        self.announcements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(announcement);
    }
}
