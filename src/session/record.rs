use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed practice attempt. Created once at completion, immutable
/// afterwards. Field renames pin the persisted JSON shape:
/// `{"caseType": ..., "industry": ..., "duration": ..., "timestamp": ...}`.
///
/// Records reference the case type by display name, not catalog id, so
/// history written before a case-type rename stops matching weak-spot
/// counts for the renamed entry. Accepted: the catalog ships inside the
/// binary and renames are deliberate release acts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PracticeSession {
    #[serde(rename = "caseType")]
    pub case_type: String,
    pub industry: Option<String>,
    pub duration: u64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let session = PracticeSession {
            case_type: "Profitability Decline".to_string(),
            industry: Some("Technology & Software".to_string()),
            duration: 75,
            timestamp: "2026-03-01T12:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["caseType"], "Profitability Decline");
        assert_eq!(json["industry"], "Technology & Software");
        assert_eq!(json["duration"], 75);
        assert_eq!(json["timestamp"], "2026-03-01T12:00:00Z");
    }

    #[test]
    fn absent_industry_round_trips_as_null() {
        let session = PracticeSession {
            case_type: "Market Sizing".to_string(),
            industry: None,
            duration: 0,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"industry\":null"));
        let back: PracticeSession = serde_json::from_str(&json).unwrap();
        assert!(back.industry.is_none());
    }
}
