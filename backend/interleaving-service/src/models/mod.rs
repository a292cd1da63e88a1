use serde::{Deserialize, Serialize};

/// Candidate identifier, unique within one candidate set
pub type CandidateId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub title: String,
    pub company: String,
    pub score: f64,
}

/// Which ranking produced a presented item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Old, // 現行排序
    New, // 候選排序
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Old => "old",
            Source::New => "new",
        }
    }
}

/// Active filter parameters for a candidate request.
///
/// Both fields are substring filters; `None` (or an empty string) means
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CandidateFilter {
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Drop empty constraints so logically equal filters compare equal
    pub fn normalized(&self) -> Self {
        fn keep(field: &Option<String>) -> Option<String> {
            field.as_ref().filter(|s| !s.is_empty()).cloned()
        }

        Self {
            company: keep(&self.company),
            title: keep(&self.title),
        }
    }

    /// Canonical serialization shared by the candidate and interleaving caches
    pub fn cache_key(&self) -> String {
        // Field order is fixed by the struct declaration.
        serde_json::to_string(&self.normalized()).unwrap_or_default()
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        let filter = self.normalized();

        if let Some(company) = &filter.company {
            if !candidate.company.contains(company.as_str()) {
                return false;
            }
        }

        if let Some(title) = &filter.title {
            if !candidate.title.contains(title.as_str()) {
                return false;
            }
        }

        true
    }
}

/// One page of the interleaved sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    pub items: Vec<Candidate>,
    pub source_tags: Vec<Source>,
    pub total_pages: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub total_items: usize,
}

impl PaginationResult {
    /// 1-based ordinals of the first and last item on this page
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }

        let first = (self.current_page - 1) * self.per_page + 1;
        Some((first, first + self.items.len() - 1))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Old,
    New,
    Tie,
}

/// Aggregate click outcome for the current interleaving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub old_clicks: usize,
    pub new_clicks: usize,
    pub winner: Winner,
    pub total_clicks: usize,
}

impl EvaluationSummary {
    pub fn from_counts(old_clicks: usize, new_clicks: usize) -> Self {
        let winner = match old_clicks.cmp(&new_clicks) {
            std::cmp::Ordering::Greater => Winner::Old,
            std::cmp::Ordering::Less => Winner::New,
            std::cmp::Ordering::Equal => Winner::Tie,
        };

        Self {
            old_clicks,
            new_clicks,
            winner,
            total_clicks: old_clicks + new_clicks,
        }
    }
}
