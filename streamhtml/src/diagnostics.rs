//! Opt-in tracking of structural problems found while rendering.
//!
//! A [`Diagnostics`] context keeps a table of *concerns*: elements whose opening tag has
//! not been matched by a closing tag yet, and elements that were rendered with problems
//! (see [`Issue`]). Every [`Builder`](crate::Builder) reports into one context, either the
//! process-wide [`Diagnostics::global`] or one passed to
//! [`Builder::with_diagnostics`](crate::Builder::with_diagnostics).
//!
//! Nothing is recorded while a context is disabled, which is the default.

use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::{tags, Issue, Report};

/// The kind of record held in the concerns table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConcernKind {
    /// An element was opened and has not been closed yet.
    OpenTag,
    /// An element was closed. This removes the matching [`ConcernKind::OpenTag`] record.
    ClosedTag,
    /// An element was rendered with one or more [`Issue`]s.
    Other,
}
impl ConcernKind {
    /// The name used in concern keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernKind::OpenTag => "open_tag",
            ConcernKind::ClosedTag => "closed_tag",
            ConcernKind::Other => "other",
        }
    }

    /// The table key for an element of the given identity.
    pub fn key(&self, id: u64) -> String {
        format!("{}-{id}", self.as_str())
    }
}
impl std::fmt::Display for ConcernKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owned description of an element, kept in the concerns table after the render
/// pass that produced it has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    /// The lowercased tag name.
    pub name: String,
    /// The identity assigned when the element was created.
    pub id: u64,
    /// Where the element was created.
    pub site: Option<&'static Location<'static>>,
}
impl ElementInfo {
    /// The creation site as `file:line:column`, or an empty string if unknown.
    pub fn site_string(&self) -> String {
        self.site.map(|site| site.to_string()).unwrap_or_default()
    }

    /// A one-line human-readable description, e.g. `div tag 3 (src/page.rs:10:5)`.
    pub fn details(&self) -> String {
        match self.site {
            Some(site) => format!("{} tag {} ({site})", self.name, self.id),
            None => format!("{} tag {}", self.name, self.id),
        }
    }
}

/// One record in the concerns table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concern {
    /// Either [`ConcernKind::OpenTag`] or [`ConcernKind::Other`].
    pub kind: ConcernKind,
    /// The element concerned.
    pub element: ElementInfo,
    /// The issues found. Empty for open tags.
    pub issues: Vec<Issue>,
}
impl Concern {
    /// The issue descriptions, with `tag not closed` standing in for open tags.
    pub fn descriptions(&self) -> Vec<String> {
        match self.kind {
            ConcernKind::OpenTag => vec![format!("{} tag not closed", self.element.name)],
            _ => self.issues.iter().map(|issue| issue.to_string()).collect(),
        }
    }

    /// Concerns raised by the same call site for the same tag and issues share this key.
    pub(crate) fn dedup_key(&self) -> String {
        let issues = match self.kind {
            ConcernKind::OpenTag => "open_tag_not_closed".to_string(),
            _ if self.issues.is_empty() => "unknown".to_string(),
            _ => self
                .issues
                .iter()
                .map(|issue| issue.to_string())
                .collect::<Vec<_>>()
                .join(";"),
        };
        format!(
            "{}|{}|{issues}",
            self.element.site_string(),
            self.element.name
        )
    }
}

#[derive(Default)]
struct Inner {
    enabled: AtomicBool,
    next_id: AtomicU64,
    concerns: Mutex<IndexMap<String, Concern>>,
}

/// A shared diagnostics context. Cloning it yields another handle to the same table.
#[derive(Clone, Default)]
pub struct Diagnostics {
    inner: Arc<Inner>,
}
impl Diagnostics {
    /// Create a new, disabled context with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide context used by [`Builder::new`](crate::Builder::new).
    pub fn global() -> &'static Diagnostics {
        static GLOBAL: OnceLock<Diagnostics> = OnceLock::new();
        GLOBAL.get_or_init(Diagnostics::new)
    }

    /// Start recording concerns.
    pub fn enable(&self) {
        self.inner.enabled.store(true, Ordering::Release);
        tracing::debug!("element diagnostics enabled");
    }

    /// Stop recording concerns and clear the table.
    pub fn disable(&self) {
        self.inner.enabled.store(false, Ordering::Release);
        self.inner.concerns.lock().clear();
        tracing::debug!("element diagnostics disabled");
    }

    /// Returns `true` if concerns are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::Acquire)
    }

    /// Clear the table without changing whether recording is enabled.
    pub fn clear_issues(&self) {
        self.inner.concerns.lock().clear();
        tracing::debug!("element concerns cleared");
    }

    /// Allocate a new element identity.
    pub fn next_id(&self) -> u64 {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record a concern about `element`.
    ///
    /// - [`ConcernKind::OpenTag`] inserts an open record.
    /// - [`ConcernKind::ClosedTag`] removes the open record for the same element.
    /// - [`ConcernKind::Other`] appends `issues` to the element's record.
    ///
    /// Does nothing while disabled. Open and closed records are never kept for void
    /// tags, since those can neither leak nor be mis-closed.
    pub fn upsert(
        &self,
        kind: ConcernKind,
        element: &ElementInfo,
        issues: impl IntoIterator<Item = Issue>,
    ) {
        if !self.is_enabled() {
            return;
        }

        match kind {
            ConcernKind::OpenTag | ConcernKind::ClosedTag if tags::is_void(&element.name) => {}
            ConcernKind::OpenTag => {
                self.inner.concerns.lock().insert(
                    kind.key(element.id),
                    Concern {
                        kind,
                        element: element.clone(),
                        issues: Vec::new(),
                    },
                );
            }
            ConcernKind::ClosedTag => {
                let key = ConcernKind::OpenTag.key(element.id);
                if self.inner.concerns.lock().shift_remove(&key).is_none() {
                    tracing::warn!(
                        element = %element.details(),
                        "closed an element that has no open record"
                    );
                }
            }
            ConcernKind::Other => {
                let issues: Vec<Issue> = issues.into_iter().collect();
                if issues.is_empty() {
                    tracing::debug!(element = %element.details(), "no issues given for concern");
                    return;
                }
                self.inner
                    .concerns
                    .lock()
                    .entry(kind.key(element.id))
                    .or_insert_with(|| Concern {
                        kind,
                        element: element.clone(),
                        issues: Vec::new(),
                    })
                    .issues
                    .extend(issues);
            }
        }
    }

    /// The number of records in the table, before deduplication.
    pub fn len(&self) -> usize {
        self.inner.concerns.lock().len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the table in insertion order.
    pub fn concerns(&self) -> Vec<(String, Concern)> {
        self.inner
            .concerns
            .lock()
            .iter()
            .map(|(key, concern)| (key.clone(), concern.clone()))
            .collect()
    }

    /// Build a deduplicated report of the current concerns.
    pub fn report(&self) -> Report {
        if !self.is_enabled() {
            return Report::disabled();
        }
        let concerns = self.inner.concerns.lock();
        Report::from_concerns(concerns.iter())
    }
}
impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.is_enabled())
            .field("concerns", &self.len())
            .finish()
    }
}
