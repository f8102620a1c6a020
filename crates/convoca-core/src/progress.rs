//! Checklist completion progress.

use serde::{Deserialize, Serialize};

use crate::models::{Collection, Document};

/// Completion summary of a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `0.0` for an empty checklist, otherwise `100 * completed / total`
    pub percentage: f64,
}

impl Progress {
    /// Percentage rounded to the nearest whole number for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded(&self) -> u8 {
        self.percentage.round().clamp(0.0, 100.0) as u8
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Progress of a collection's checklist.
#[must_use]
pub fn calculate_progress(collection: &Collection) -> Progress {
    calculate_progress_for(&collection.documents)
}

/// Progress over a bare list of documents.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calculate_progress_for(documents: &[Document]) -> Progress {
    let total = documents.len();
    let completed = documents.iter().filter(|doc| doc.is_completed()).count();
    let percentage = if total == 0 {
        0.0
    } else {
        100.0 * completed as f64 / total as f64
    };

    Progress {
        completed,
        total,
        percentage,
    }
}
