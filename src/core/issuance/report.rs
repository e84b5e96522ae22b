//! Issuance results
//!
//! Page writes are not transactional across pages. The report records what
//! each page did so callers can tell a complete run from a partial one.

use crate::domain::{Child, Parent};

/// Outcome of a single page write
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    /// Zero-based page position within the run
    pub index: usize,

    /// Number of children in the page
    pub size: usize,

    /// Store error message when the page was not written
    pub error: Option<String>,
}

impl PageOutcome {
    /// A page that was written
    pub fn written(index: usize, size: usize) -> Self {
        Self {
            index,
            size,
            error: None,
        }
    }

    /// A page that failed
    pub fn failed(index: usize, size: usize, error: String) -> Self {
        Self {
            index,
            size,
            error: Some(error),
        }
    }

    /// Returns true if the page was written
    pub fn is_written(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of one issuance run
#[derive(Debug, Clone)]
pub struct IssuanceReport {
    /// The stored parent, as re-read after its write
    pub parent: Parent,

    /// Every child generated, whether or not its page persisted
    pub children: Vec<Child>,

    /// Per-page outcomes, ordered by page index
    pub pages: Vec<PageOutcome>,
}

impl IssuanceReport {
    /// Create a report with no page outcomes yet
    pub fn new(parent: Parent, children: Vec<Child>) -> Self {
        Self {
            parent,
            children,
            pages: Vec::new(),
        }
    }

    /// Record a page outcome
    pub fn record(&mut self, outcome: PageOutcome) {
        self.pages.push(outcome);
    }

    /// Number of children in pages that were written
    pub fn children_persisted(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.is_written())
            .map(|p| p.size)
            .sum()
    }

    /// Number of pages that failed
    pub fn pages_failed(&self) -> usize {
        self.pages.iter().filter(|p| !p.is_written()).count()
    }

    /// Error messages of failed pages
    pub fn errors(&self) -> Vec<&str> {
        self.pages
            .iter()
            .filter_map(|p| p.error.as_deref())
            .collect()
    }

    /// Returns true when every generated child was written
    pub fn is_complete(&self) -> bool {
        self.children_persisted() == self.children.len()
    }

    /// Log the report
    pub fn log_summary(&self) {
        tracing::info!(
            parent_id = %self.parent.id,
            kind = %self.parent.kind(),
            children = self.children.len(),
            persisted = self.children_persisted(),
            pages = self.pages.len(),
            pages_failed = self.pages_failed(),
            "Issuance completed"
        );

        if !self.is_complete() {
            tracing::warn!(
                parent_id = %self.parent.id,
                missing = self.children.len() - self.children_persisted(),
                "Issuance is partial; some children were not persisted"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::now_millis;
    use crate::domain::{NewParent, ParentKind};

    fn report(total: usize) -> IssuanceReport {
        let now = now_millis();
        let parent = NewParent::default().into_parent(ParentKind::Raffle, 3, total as u32, now);
        let children = (0..total)
            .map(|i| Child::issue(&parent, 100 + i as u64, now))
            .collect();
        IssuanceReport::new(parent, children)
    }

    #[test]
    fn test_complete_report() {
        let mut report = report(5);
        report.record(PageOutcome::written(0, 3));
        report.record(PageOutcome::written(1, 2));

        assert_eq!(report.children_persisted(), 5);
        assert_eq!(report.pages_failed(), 0);
        assert!(report.is_complete());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_partial_report() {
        let mut report = report(5);
        report.record(PageOutcome::written(0, 3));
        report.record(PageOutcome::failed(1, 2, "throttled".to_string()));

        assert_eq!(report.children_persisted(), 3);
        assert_eq!(report.pages_failed(), 1);
        assert!(!report.is_complete());
        assert_eq!(report.errors(), vec!["throttled"]);
    }

    #[test]
    fn test_empty_run_is_complete() {
        let report = report(0);
        assert!(report.is_complete());
        assert_eq!(report.children_persisted(), 0);
    }
}
