use std::fmt;
use std::time::Duration;

use super::error::SheetAccessError;

/// What happened to a single element during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementOutcome {
    /// The element has no font-family value.
    NoValue,
    /// The rewritten value equals the original ignoring case; nothing written.
    Unchanged,
    /// A new inline font-family was written.
    Rewritten { from: String, to: String },
}

impl ElementOutcome {
    #[must_use]
    pub fn is_rewritten(&self) -> bool {
        matches!(self, ElementOutcome::Rewritten { .. })
    }
}

/// What happened to a single stylesheet during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    Processed {
        /// Number of rules visited.
        rules: usize,
        /// Declarations (`font-family` or `--*`) written back.
        rewritten: usize,
    },
    /// The sheet's rules could not be read; it was skipped.
    Inaccessible(SheetAccessError),
}

/// Aggregated outcome of one traversal (a subtree, a set of sheets, or both).
///
/// Every unit of work that failed is recorded here instead of aborting the
/// traversal.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct TraversalSummary {
    elements_visited: usize,
    elements_rewritten: usize,
    sheets_processed: usize,
    declarations_rewritten: usize,
    skipped_sheets: Vec<SheetAccessError>,
    duration: Duration,
}

impl TraversalSummary {
    pub(crate) fn record_element(&mut self, outcome: &ElementOutcome) {
        self.elements_visited += 1;
        if outcome.is_rewritten() {
            self.elements_rewritten += 1;
        }
    }

    pub(crate) fn record_sheet(&mut self, outcome: SheetOutcome) {
        match outcome {
            SheetOutcome::Processed { rewritten, .. } => {
                self.sheets_processed += 1;
                self.declarations_rewritten += rewritten;
            }
            SheetOutcome::Inaccessible(err) => self.skipped_sheets.push(err),
        }
    }

    pub(crate) fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Fold another summary into this one. Durations add up.
    pub fn merge(&mut self, other: TraversalSummary) {
        self.elements_visited += other.elements_visited;
        self.elements_rewritten += other.elements_rewritten;
        self.sheets_processed += other.sheets_processed;
        self.declarations_rewritten += other.declarations_rewritten;
        self.skipped_sheets.extend(other.skipped_sheets);
        self.duration += other.duration;
    }

    #[must_use]
    pub fn elements_visited(&self) -> usize {
        self.elements_visited
    }

    #[must_use]
    pub fn elements_rewritten(&self) -> usize {
        self.elements_rewritten
    }

    #[must_use]
    pub fn sheets_processed(&self) -> usize {
        self.sheets_processed
    }

    #[must_use]
    pub fn declarations_rewritten(&self) -> usize {
        self.declarations_rewritten
    }

    /// Sheets that could not be read, in traversal order.
    #[must_use]
    pub fn skipped_sheets(&self) -> &[SheetAccessError] {
        &self.skipped_sheets
    }

    /// Wall-clock duration of the traversal.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for TraversalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "elements: {}/{} rewritten",
            self.elements_rewritten, self.elements_visited
        )?;
        write!(
            f,
            ", sheets: {} processed, {} skipped",
            self.sheets_processed,
            self.skipped_sheets.len()
        )?;
        write!(f, ", declarations: {} rewritten", self.declarations_rewritten)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
