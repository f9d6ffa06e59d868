//! Growth Signals API response types.
//!
//! All types model the JSON returned by the backend. Collections arrive
//! wrapped in single-field envelopes (`{ "leads": [...] }`); every
//! collection field carries `#[serde(default)]` so a missing field decodes
//! as an empty sequence rather than an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lead priority as assigned by the backend.
///
/// Unknown values decode as [`Priority::Unknown`] instead of failing the
/// whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
            Priority::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One detected intent signal with its confidence in `0.0..=1.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSignal {
    pub signal: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// A prospect surfaced by the backend, scored `0.0..=10.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub geography: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub intent_signals: Vec<IntentSignal>,
    #[serde(default)]
    pub social_content: String,
    #[serde(default = "default_lead_status")]
    pub status: String,
    #[serde(default)]
    pub twitter_handle: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

fn default_lead_status() -> String {
    "New".to_string()
}

/// Engagement counters on a tweet.
///
/// Older backend revisions used `likes`/`retweets`/`replies`; newer ones
/// use the `*_count` spellings. Aliases accept both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementMetrics {
    #[serde(default, alias = "likes")]
    pub like_count: u64,
    #[serde(default, alias = "retweets")]
    pub retweet_count: u64,
    #[serde(default, alias = "replies")]
    pub reply_count: u64,
}

/// Nested intent analysis attached to a tweet, when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentAnalysis {
    #[serde(default)]
    pub intent_signals: Vec<IntentSignal>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub relevance_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tweet_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_handle: String,
    #[serde(default)]
    pub engagement_metrics: EngagementMetrics,
    #[serde(default)]
    pub intent_analysis: Option<IntentAnalysis>,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub relevance_score: f64,
}

/// Deal classification. `M&A` and `Financing` are the known values;
/// anything else decodes as [`DealKind::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealKind {
    #[serde(rename = "M&A")]
    MergersAndAcquisitions,
    Financing,
    #[default]
    #[serde(other)]
    Other,
}

impl std::fmt::Display for DealKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DealKind::MergersAndAcquisitions => write!(f, "M&A"),
            DealKind::Financing => write!(f, "Financing"),
            DealKind::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    #[serde(rename = "type", default)]
    pub kind: DealKind,
    /// Display string such as `"$120M"` or `"Undisclosed"`.
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub relevance_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTick {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change: f64,
    /// Pre-formatted by the backend, sign included (`"+1.23%"`).
    #[serde(default)]
    pub change_percent: String,
}

/// Flat statistics object returned by `GET /stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_leads: u64,
    #[serde(default)]
    pub high_priority_leads: u64,
    #[serde(default)]
    pub new_leads_today: u64,
    #[serde(default)]
    pub avg_lead_score: f64,
    #[serde(default)]
    pub total_signals_detected: u64,
    #[serde(default)]
    pub active_campaigns: u64,
}

/// Result of `POST /analyze-content`.
///
/// The orchestrator currently only logs this; the shape is kept typed so
/// a consumer that does want the signal weights can take them.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisOutcome {
    #[serde(default)]
    pub intent_signals: Vec<IntentSignal>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub relevance_score: f64,
}

/// Query parameters for `GET /leads`.
#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    pub role: Option<String>,
    pub geography: Option<String>,
    pub priority: Option<Priority>,
    pub min_score: Option<f64>,
    /// Free-text targeting context from the smart-targeting input.
    pub context: Option<String>,
}

impl LeadQuery {
    /// Render the set fields as query pairs, omitting unset ones.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(role) = &self.role {
            pairs.push(("role", role.clone()));
        }
        if let Some(geography) = &self.geography {
            pairs.push(("geography", geography.clone()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.to_string()));
        }
        if let Some(min_score) = self.min_score {
            pairs.push(("min_score", min_score.to_string()));
        }
        if let Some(context) = &self.context {
            pairs.push(("context", context.clone()));
        }
        pairs
    }

    /// Copy of this query with the targeting context stripped, used for
    /// the basic-search fallback after an enhanced fetch fails.
    #[must_use]
    pub fn without_context(&self) -> Self {
        Self {
            context: None,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct LeadsResponse {
    #[serde(default)]
    pub leads: Vec<Lead>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TweetsResponse {
    #[serde(default)]
    pub tweets: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsResponse {
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DealsResponse {
    #[serde(default)]
    pub deals: Vec<Deal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarketDataResponse {
    #[serde(default)]
    pub market_data: Vec<MarketTick>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalysisRequest<'a> {
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_context: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_unknown_values_do_not_fail() {
        let p: Priority = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(p, Priority::Unknown);
    }

    #[test]
    fn engagement_metrics_accept_both_spellings() {
        let old: EngagementMetrics =
            serde_json::from_str(r#"{"likes": 3, "retweets": 2, "replies": 1}"#).unwrap();
        assert_eq!(old.like_count, 3);
        assert_eq!(old.retweet_count, 2);
        assert_eq!(old.reply_count, 1);

        let new: EngagementMetrics =
            serde_json::from_str(r#"{"like_count": 7, "retweet_count": 5, "reply_count": 4}"#)
                .unwrap();
        assert_eq!(new.like_count, 7);
        assert_eq!(new.reply_count, 4);
    }

    #[test]
    fn deal_kind_parses_ampersand_rename() {
        let deal: Deal = serde_json::from_str(
            r#"{"type": "M&A", "amount": "$85M", "title": "t", "description": "d", "company": "c", "relevance_score": 8.1}"#,
        )
        .unwrap();
        assert_eq!(deal.kind, DealKind::MergersAndAcquisitions);
        assert_eq!(deal.kind.to_string(), "M&A");
    }

    #[test]
    fn deal_kind_unknown_is_other() {
        let deal: Deal = serde_json::from_str(r#"{"type": "IPO"}"#).unwrap();
        assert_eq!(deal.kind, DealKind::Other);
    }

    #[test]
    fn missing_collection_field_decodes_as_empty() {
        let envelope: LeadsResponse = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(envelope.leads.is_empty());
    }

    #[test]
    fn lead_defaults_tolerate_sparse_records() {
        let lead: Lead = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(lead.name, "Ada");
        assert_eq!(lead.priority, Priority::Medium);
        assert_eq!(lead.status, "New");
        assert!(lead.intent_signals.is_empty());
        assert!(lead.timestamp.is_none());
    }

    #[test]
    fn lead_query_pairs_omit_unset_fields() {
        let query = LeadQuery {
            role: Some("CTO".to_string()),
            min_score: Some(7.5),
            ..LeadQuery::default()
        };
        let pairs = query.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("role", "CTO".to_string()),
                ("min_score", "7.5".to_string())
            ]
        );
    }

    #[test]
    fn without_context_preserves_structured_filters() {
        let query = LeadQuery {
            role: Some("CEO".to_string()),
            priority: Some(Priority::High),
            context: Some("fintech founders".to_string()),
            ..LeadQuery::default()
        };
        let basic = query.without_context();
        assert!(basic.context.is_none());
        assert_eq!(basic.role.as_deref(), Some("CEO"));
        assert_eq!(basic.priority, Some(Priority::High));
    }
}
