use std::collections::HashSet;
use std::fmt;

use crate::diagnostics::{Concern, ConcernKind};
use crate::{Builder, Diagnostics};

const DISABLED_MESSAGE: &str =
    "Diagnostics are not enabled. Enable them to see element concerns.";
const EMPTY_MESSAGE: &str = "No element concerns found.";

const REPORT_CSS: &str = "body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; vertical-align: top; }
th { background: #f0f0f0; }
td ul { margin: 0; padding-left: 1.2rem; }";

/// The output format of a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// A standalone HTML page with one table row per concern.
    #[default]
    Html,
    /// A markdown table, for terminals and logs.
    Text,
    /// A JSON document.
    #[cfg(feature = "json")]
    Json,
}

/// One deduplicated concern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportEntry {
    /// The concern key, e.g. `open_tag-4`.
    pub key: String,
    /// The kind of concern.
    pub kind: ConcernKind,
    /// The tag name.
    pub tag: String,
    /// The element identity.
    pub id: u64,
    /// Where the element was created, as `file:line:column`.
    pub site: Option<String>,
    /// A one-line description of the element.
    pub details: String,
    /// What is wrong. Open tags get a synthesized `tag not closed` entry.
    pub issues: Vec<String>,
}
impl ReportEntry {
    fn new(key: &str, concern: &Concern) -> Self {
        Self {
            key: key.to_string(),
            kind: concern.kind,
            tag: concern.element.name.clone(),
            id: concern.element.id,
            site: concern.element.site.map(|site| site.to_string()),
            details: concern.element.details(),
            issues: concern.descriptions(),
        }
    }
}

/// A snapshot of a [`Diagnostics`] table with repeated concerns collapsed.
///
/// Concerns raised by the same call site for the same tag with the same issues are
/// shown once, so a bug hit on every request of a busy server is listed a single time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// Whether diagnostics were enabled when the report was made.
    pub enabled: bool,
    /// The deduplicated concerns, in the order they were first recorded.
    pub entries: Vec<ReportEntry>,
}
impl Report {
    pub(crate) fn disabled() -> Self {
        Self {
            enabled: false,
            entries: Vec::new(),
        }
    }

    pub(crate) fn from_concerns<'c>(
        concerns: impl IntoIterator<Item = (&'c String, &'c Concern)>,
    ) -> Self {
        let mut seen = HashSet::new();
        let entries = concerns
            .into_iter()
            .filter(|(_, concern)| seen.insert(concern.dedup_key()))
            .map(|(key, concern)| ReportEntry::new(key, concern))
            .collect();
        Self {
            enabled: true,
            entries,
        }
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the report in the given format.
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Html => self.to_html(),
            ReportFormat::Text => self.to_text(),
            #[cfg(feature = "json")]
            ReportFormat::Json => self.to_json().unwrap_or_else(|err| {
                tracing::warn!(%err, "failed to serialize diagnostics report");
                String::new()
            }),
        }
    }

    /// Render the report as a markdown table. Same as the [`Display`](fmt::Display) output.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Render the report as a standalone HTML page.
    ///
    /// The page is built with an isolated, disabled [`Diagnostics`] context so that
    /// rendering the report never adds concerns of its own.
    pub fn to_html(&self) -> String {
        let b = Builder::with_diagnostics(Diagnostics::new());
        b.doctype();
        b.html([]).r([
            b.head([]).r([
                b.title([]).t("Element Concerns Report"),
                b.style([]).t(REPORT_CSS),
            ]),
            b.body([]).r(b.wrap(|| {
                if !self.enabled {
                    b.p(["style", "font-weight:bold"]).t(DISABLED_MESSAGE);
                    return;
                }
                b.h2([]).t("Element Concerns");
                b.p([]).f(format_args!("Total issues: {}", self.len()));
                if self.is_empty() {
                    b.p([]).t(EMPTY_MESSAGE);
                    return;
                }
                b.table_class("tbl-element-concerns", []).r([
                    b.thead([]).r(b.tr([]).r([
                        b.th([]).t("Key"),
                        b.th([]).t("Details"),
                        b.th([]).t("Issues"),
                    ])),
                    b.tbody([]).r(b.for_each(&self.entries, |b, entry| {
                        b.tr([]).r([
                            b.td([]).r(b.escaped(&entry.key)),
                            b.td([]).r(b.escaped(&entry.details)),
                            b.td([]).r(b.ul([]).r(b.for_each(&entry.issues, |b, issue| {
                                b.li([]).r(b.escaped(issue));
                            }))),
                        ]);
                    })),
                ]);
            })),
        ]);
        b.into_string()
    }

    /// Render the report as pretty-printed JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled {
            return f.write_str(DISABLED_MESSAGE);
        }
        if self.is_empty() {
            return f.write_str(EMPTY_MESSAGE);
        }

        writeln!(f, "## Element Concerns: {} issues\n", self.len())?;
        writeln!(f, "| Key | Details | Issues |")?;
        writeln!(f, "|-----|---------|--------|")?;
        for entry in &self.entries {
            writeln!(
                f,
                "| {} | {} | {} |",
                entry.key,
                entry.details,
                entry.issues.join("; ")
            )?;
        }
        Ok(())
    }
}
