//! Withdrawn-version findings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a version is believed to have been withdrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalReason {
    Security,
    Malware,
    Policy,
    Unknown,
}

impl WithdrawalReason {
    /// Get the lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalReason::Security => "security",
            WithdrawalReason::Malware => "malware",
            WithdrawalReason::Policy => "policy",
            WithdrawalReason::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WithdrawalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claim that a version was published and later withdrawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawnVersionInfo {
    /// The version being described
    pub version: String,
    /// Reason for the withdrawal
    pub reason: WithdrawalReason,
    /// Advisory publish date, when corroborated by one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawn_date: Option<DateTime<Utc>>,
    /// External advisory identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WithdrawnVersionInfo {
    /// Finding backed by a security advisory whose range covers `version`
    pub fn security(
        version: impl Into<String>,
        advisory: impl Into<String>,
        summary: Option<String>,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            version: version.into(),
            reason: WithdrawalReason::Security,
            withdrawn_date: published_at,
            advisory: Some(advisory.into()),
            description: summary,
        }
    }

    /// Uncorroborated finding derived from the version sequence alone
    pub fn unknown(version: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            reason: WithdrawalReason::Unknown,
            withdrawn_date: None,
            advisory: None,
            description: Some(description.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reason_display() {
        assert_eq!(WithdrawalReason::Security.to_string(), "security");
        assert_eq!(WithdrawalReason::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_security_finding() {
        let date = Utc.with_ymd_and_hms(2019, 2, 14, 0, 0, 0).unwrap();
        let info = WithdrawnVersionInfo::security(
            "4.3.3",
            "GHSA-xxxx-yyyy-zzzz",
            Some("Prototype pollution".to_string()),
            Some(date),
        );
        assert_eq!(info.reason, WithdrawalReason::Security);
        assert_eq!(info.advisory.as_deref(), Some("GHSA-xxxx-yyyy-zzzz"));
        assert_eq!(info.withdrawn_date, Some(date));
    }

    #[test]
    fn test_unknown_finding_has_no_advisory() {
        let info = WithdrawnVersionInfo::unknown("1.0.1", "missing");
        assert_eq!(info.reason, WithdrawalReason::Unknown);
        assert!(info.advisory.is_none());
        assert!(info.withdrawn_date.is_none());
        assert_eq!(info.description.as_deref(), Some("missing"));
    }

    #[test]
    fn test_serde_skips_empty_optionals() {
        let info = WithdrawnVersionInfo::unknown("1.0.1", "missing");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["reason"], "unknown");
        assert!(json.get("advisory").is_none());
        assert!(json.get("withdrawnDate").is_none());

        let parsed: WithdrawnVersionInfo = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, info);
    }
}
