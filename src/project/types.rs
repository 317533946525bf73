//! @acp:module "Project Types"
//! @acp:summary "Project record, impact scale, validated drafts and user ids"
//! @acp:domain cli
//! @acp:layer model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::scoring::{round2, score};
use crate::error::{Result, RiceError};

/// Accepted effort range for new projects, in person-months
pub const EFFORT_RANGE: (f64, f64) = (0.1, 100.0);

/// @acp:summary "Discrete impact scale"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Impact {
    Minimal,
    Low,
    #[default]
    Medium,
    High,
    Massive,
}

impl Impact {
    pub const ALL: [Impact; 5] = [
        Impact::Minimal,
        Impact::Low,
        Impact::Medium,
        Impact::High,
        Impact::Massive,
    ];

    /// Numeric multiplier used in the score
    pub fn value(&self) -> f64 {
        match self {
            Impact::Minimal => 0.25,
            Impact::Low => 0.5,
            Impact::Medium => 1.0,
            Impact::High => 2.0,
            Impact::Massive => 3.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Impact::Minimal => "Minimal",
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
            Impact::Massive => "Massive",
        }
    }

    /// Map a numeric cell back onto the scale
    pub fn from_value(value: f64) -> Option<Impact> {
        Impact::ALL
            .into_iter()
            .find(|impact| (impact.value() - value).abs() < 1e-9)
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

impl FromStr for Impact {
    type Err = RiceError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let by_label = Impact::ALL
            .into_iter()
            .find(|impact| impact.label().eq_ignore_ascii_case(trimmed));
        if let Some(impact) = by_label {
            return Ok(impact);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(Impact::from_value)
            .ok_or_else(|| RiceError::UnknownImpact(s.to_string()))
    }
}

impl Serialize for Impact {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let parsed = match &raw {
            serde_json::Value::Number(n) => n.as_f64().and_then(Impact::from_value),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| serde::de::Error::custom(format!("invalid impact: {}", raw)))
    }
}

/// A user on the configured roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Resolve `name` against the roster, case-insensitively
    pub fn from_roster(name: &str, roster: &[String]) -> Result<UserId> {
        roster
            .iter()
            .find(|member| member.eq_ignore_ascii_case(name.trim()))
            .map(|member| UserId(member.clone()))
            .ok_or_else(|| RiceError::UnknownUser {
                name: name.to_string(),
                roster: roster.to_vec(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// @acp:summary "Validated input for a new project"
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    name: String,
    reach: u8,
    impact: Impact,
    confidence: u8,
    effort: f64,
}

impl ProjectDraft {
    /// Validate the add-project inputs
    pub fn new(
        name: impl Into<String>,
        reach: u8,
        impact: Impact,
        confidence: u8,
        effort: f64,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(RiceError::validation("project name", "please enter a project name"));
        }
        if reach > 100 {
            return Err(RiceError::validation("reach", format!("{} is not within 0-100%", reach)));
        }
        if confidence > 100 {
            return Err(RiceError::validation(
                "confidence",
                format!("{} is not within 0-100%", confidence),
            ));
        }
        let (min, max) = EFFORT_RANGE;
        if !(min..=max).contains(&effort) {
            return Err(RiceError::validation(
                "effort",
                format!("{} is not within {}-{} person-months", effort, min, max),
            ));
        }
        Ok(Self {
            name,
            reach,
            impact,
            confidence,
            effort,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// @acp:summary "A scored project as stored in a user table"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Percentage of the audience reached, 0-100
    pub reach: u8,
    pub impact: Impact,
    /// Percentage, consumed as `confidence / 100`
    pub confidence: u8,
    /// Person-months
    pub effort: f64,
    /// Rounded to two decimals when the project was created
    pub score: f64,
}

impl Project {
    /// Score a draft; the rounded score is fixed from here on
    pub fn from_draft(draft: ProjectDraft) -> Self {
        let raw = score(
            f64::from(draft.reach),
            draft.impact.value(),
            f64::from(draft.confidence) / 100.0,
            draft.effort,
        );
        Self {
            name: draft.name,
            reach: draft.reach,
            impact: draft.impact,
            confidence: draft.confidence,
            effort: draft.effort,
            score: round2(raw),
        }
    }

    /// The three projects shown on an empty list
    pub fn examples() -> Vec<Project> {
        vec![
            Project {
                name: "Mobile App Redesign".to_string(),
                reach: 90,
                impact: Impact::Massive,
                confidence: 80,
                effort: 6.0,
                score: 36.0,
            },
            Project {
                name: "Push Notifications".to_string(),
                reach: 70,
                impact: Impact::High,
                confidence: 95,
                effort: 2.0,
                score: 66.5,
            },
            Project {
                name: "Dark Mode".to_string(),
                reach: 40,
                impact: Impact::Medium,
                confidence: 90,
                effort: 1.0,
                score: 36.0,
            },
        ]
    }
}
