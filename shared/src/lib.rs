use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A student profile tracked by the (single, simulated) guardian
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    /// Free-form birth date as sent by the client (usually YYYY-MM-DD)
    pub birth_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request for creating a new child. Omitted fields are filled in by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A fixed curricular category (math, history, science)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Lifecycle status of a learning goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GoalStatus {
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Em Progresso")]
    InProgress,
    #[serde(rename = "Concluído")]
    Completed,
}

impl GoalStatus {
    /// Label used on the wire and in reports
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "Pendente",
            GoalStatus::InProgress => "Em Progresso",
            GoalStatus::Completed => "Concluído",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A tracked objective for a child within a subject
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningGoal {
    pub id: String,
    pub subject_id: String,
    pub description: String,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
}

/// Request for adding a learning goal to a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub subject_id: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<GoalStatus>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A dated record of schoolwork performed by a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggedActivity {
    pub id: String,
    pub activity_date: DateTime<Utc>,
    pub subject_id: String,
    pub description: String,
    pub observations: Option<String>,
    /// Not checked against the child's goals
    pub related_goal_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request for logging an activity for a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub activity_date: Option<DateTime<Utc>>,
    pub subject_id: String,
    pub description: String,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub related_goal_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for POST /api/reports/generate-example
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub child_id: String,
}

/// Request body for POST /api/ai/analyze-simulated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub child_id: String,
}

/// Progress analysis returned by the (simulated) AI endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub areas_for_attention: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Body returned with every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Lenient timestamp parsing for client-supplied dates.
///
/// Browsers send `datetime-local` values without an offset and `date` inputs
/// without a time, so besides RFC 3339 we accept naive date-times and bare
/// dates, both taken as UTC.
pub mod timestamp {
    use super::*;

    const NAIVE_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
        }
    }
}
