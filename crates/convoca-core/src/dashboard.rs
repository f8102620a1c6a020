//! Aggregate figures for the dashboard view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deadline::{evaluate_deadline, Deadline, DeadlineStatus};
use crate::models::{Collection, CollectionId};
use crate::progress::{calculate_progress, Progress};

/// Progress and deadline of one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: CollectionId,
    pub name: String,
    pub end_date: Option<NaiveDate>,
    pub progress: Progress,
    pub deadline: Deadline,
}

/// Number of collections per deadline bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub safe: usize,
    pub warning: usize,
    pub critical: usize,
    pub overdue: usize,
}

impl StatusCounts {
    fn record(&mut self, status: DeadlineStatus) {
        match status {
            DeadlineStatus::Safe => self.safe += 1,
            DeadlineStatus::Warning => self.warning += 1,
            DeadlineStatus::Critical => self.critical += 1,
            DeadlineStatus::Overdue => self.overdue += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub collections: usize,
    pub by_status: StatusCounts,
    pub documents_completed: usize,
    pub documents_total: usize,
    /// Mean of per-collection percentages; `0.0` with no collections
    pub average_progress: f64,
    pub entries: Vec<CollectionSummary>,
}

impl DashboardSummary {
    /// Entries that still need attention, most urgent first.
    #[must_use]
    pub fn attention_needed(&self) -> Vec<&CollectionSummary> {
        let mut pending = self
            .entries
            .iter()
            .filter(|entry| {
                matches!(
                    entry.deadline.status,
                    DeadlineStatus::Critical | DeadlineStatus::Overdue
                ) && !entry.progress.is_complete()
            })
            .collect::<Vec<_>>();
        pending.sort_by_key(|entry| entry.deadline.days_left.unwrap_or(i64::MAX));
        pending
    }
}

#[must_use]
pub fn summarize_collection(collection: &Collection, today: NaiveDate) -> CollectionSummary {
    CollectionSummary {
        id: collection.id.clone(),
        name: collection.name.clone(),
        end_date: collection.end_date,
        progress: calculate_progress(collection),
        deadline: evaluate_deadline(collection.end_date, today),
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(collections: &[Collection], today: NaiveDate) -> DashboardSummary {
    let entries = collections
        .iter()
        .map(|collection| summarize_collection(collection, today))
        .collect::<Vec<_>>();

    let mut by_status = StatusCounts::default();
    let mut documents_completed = 0;
    let mut documents_total = 0;
    let mut percentage_sum = 0.0;
    for entry in &entries {
        by_status.record(entry.deadline.status);
        documents_completed += entry.progress.completed;
        documents_total += entry.progress.total;
        percentage_sum += entry.progress.percentage;
    }

    let average_progress = if entries.is_empty() {
        0.0
    } else {
        percentage_sum / entries.len() as f64
    };

    DashboardSummary {
        collections: entries.len(),
        by_status,
        documents_completed,
        documents_total,
        average_progress,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Document, DocumentStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn collection(id: &str, days_left: Option<u64>, completed: usize, total: usize) -> Collection {
        let mut collection = Collection::new(id.into(), format!("Convocatoria {id}"));
        collection.end_date = days_left.map(|days| today() + Days::new(days));
        collection.documents = (0..total)
            .map(|index| {
                let mut doc = Document::with_id(index.to_string().into(), "doc");
                if index < completed {
                    doc.status = DocumentStatus::Completed;
                }
                doc
            })
            .collect();
        collection
    }

    #[test]
    fn empty_dashboard() {
        let summary = summarize(&[], today());
        assert_eq!(summary.collections, 0);
        assert!(summary.average_progress.abs() < f64::EPSILON);
        assert!(summary.attention_needed().is_empty());
    }

    #[test]
    fn counts_and_averages() {
        let collections = vec![
            collection("a", Some(30), 2, 4),
            collection("b", Some(5), 0, 2),
            collection("c", Some(2), 1, 1),
            collection("d", Some(0), 0, 3),
            collection("e", None, 0, 0),
        ];
        let summary = summarize(&collections, today());

        assert_eq!(
            summary.by_status,
            StatusCounts {
                safe: 2,
                warning: 1,
                critical: 2,
                overdue: 0
            }
        );
        assert_eq!(summary.documents_completed, 3);
        assert_eq!(summary.documents_total, 10);
        assert!((summary.average_progress - 30.0).abs() < 1e-9);

        let attention = summary.attention_needed();
        assert_eq!(attention.len(), 1);
        assert_eq!(attention[0].id.as_str(), "d");
    }
}
