//! Structured records produced by the tone and praise flows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub rating: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmpathyLevel {
    High,
    Medium,
    Low,
}

impl EmpathyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EmpathyLevel::High => "high",
            EmpathyLevel::Medium => "medium",
            EmpathyLevel::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmpathyLevel::High => "높음",
            EmpathyLevel::Medium => "보통",
            EmpathyLevel::Low => "낮음",
        }
    }
}

impl FromStr for EmpathyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "높음" => Ok(EmpathyLevel::High),
            "medium" | "보통" => Ok(EmpathyLevel::Medium),
            "low" | "낮음" => Ok(EmpathyLevel::Low),
            other => Err(format!(
                "unknown empathy rating {other:?}, expected high/medium/low (높음/보통/낮음)"
            )),
        }
    }
}

impl fmt::Display for EmpathyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EmpathyLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmpathyLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpathyAssessment {
    pub rating: EmpathyLevel,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneAnalysisResult {
    pub emotional_tone: Assessment,
    pub empathy_possibility: EmpathyAssessment,
    pub tone: Assessment,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PraiseEmpathyResult {
    pub praise: String,
    pub empathy: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empathy_level_accepts_both_vocabularies() {
        assert_eq!("높음".parse::<EmpathyLevel>().unwrap(), EmpathyLevel::High);
        assert_eq!(" Medium ".parse::<EmpathyLevel>().unwrap(), EmpathyLevel::Medium);
        assert_eq!("낮음".parse::<EmpathyLevel>().unwrap(), EmpathyLevel::Low);
        assert!("매우 높음".parse::<EmpathyLevel>().is_err());
    }

    #[test]
    fn test_empathy_level_serializes_as_english() {
        let json = serde_json::to_string(&EmpathyLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        assert_eq!(EmpathyLevel::Medium.to_string(), "보통");
    }
}
