use serde::{Deserialize, Serialize};

use crate::ats::scorer::{AtsCategory, AtsReport, CategoryResult, StatusTier};

/// Change of a single category between two reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: AtsCategory,
    pub previous_score: u32,
    pub current_score: u32,
    pub score_change: i64,
    pub previous_status: StatusTier,
    pub current_status: StatusTier,
    pub new_suggestions: Vec<String>,
    pub resolved_suggestions: Vec<String>,
}

/// What changed between two report snapshots. Unchanged categories are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDelta {
    pub previous_overall: u32,
    pub current_overall: u32,
    pub overall_change: i64,
    pub status_change: Option<(StatusTier, StatusTier)>,
    pub categories: Vec<CategoryDelta>,
}

impl ReportDelta {
    pub fn is_unchanged(&self) -> bool {
        self.overall_change == 0 && self.status_change.is_none() && self.categories.is_empty()
    }
}

pub fn diff_reports(previous: &AtsReport, current: &AtsReport) -> ReportDelta {
    let categories = current
        .categories
        .iter()
        .filter_map(|now| {
            let before = previous.category(now.category)?;
            diff_category(before, now)
        })
        .collect();

    let status_change = (previous.status != current.status).then_some((previous.status, current.status));

    ReportDelta {
        previous_overall: previous.overall_score,
        current_overall: current.overall_score,
        overall_change: i64::from(current.overall_score) - i64::from(previous.overall_score),
        status_change,
        categories,
    }
}

fn diff_category(before: &CategoryResult, now: &CategoryResult) -> Option<CategoryDelta> {
    let new_suggestions: Vec<String> = now
        .suggestions
        .iter()
        .filter(|s| !before.suggestions.contains(s))
        .cloned()
        .collect();
    let resolved_suggestions: Vec<String> = before
        .suggestions
        .iter()
        .filter(|s| !now.suggestions.contains(s))
        .cloned()
        .collect();

    if before.score == now.score
        && before.status == now.status
        && new_suggestions.is_empty()
        && resolved_suggestions.is_empty()
    {
        return None;
    }

    Some(CategoryDelta {
        category: now.category,
        previous_score: before.score,
        current_score: now.score,
        score_change: i64::from(now.score) - i64::from(before.score),
        previous_status: before.status,
        current_status: now.status,
        new_suggestions,
        resolved_suggestions,
    })
}
