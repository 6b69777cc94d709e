// src/domain/user_status.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ユーザーのライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Cancelled,
    Paused,
    Downgraded,
    Inactive,
    Churned,
}

impl UserStatus {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            "paused" => Some(Self::Paused),
            "downgraded" => Some(Self::Downgraded),
            "inactive" => Some(Self::Inactive),
            "churned" => Some(Self::Churned),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Cancelled => "Cancelled",
            Self::Paused => "Paused",
            Self::Downgraded => "Downgraded",
            Self::Inactive => "Inactive",
            Self::Churned => "Churned",
        }
    }

    /// 離脱済みとして数える状態
    pub fn is_churned(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Churned)
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Active,
            Self::Cancelled,
            Self::Paused,
            Self::Downgraded,
            Self::Inactive,
            Self::Churned,
        ]
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserStatus::from_str(s).ok_or_else(|| format!("Invalid user status: {}", s))
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_statuses_roundtrip_through_display() {
        for status in UserStatus::all() {
            assert_eq!(UserStatus::from_str(&status.to_string()), Some(status));
        }
    }

    #[test]
    fn test_churned_statuses() {
        assert!(UserStatus::Cancelled.is_churned());
        assert!(UserStatus::Churned.is_churned());
        assert!(!UserStatus::Paused.is_churned());
        assert!(!UserStatus::Inactive.is_churned());
    }

    #[test]
    fn test_unknown_status() {
        assert_eq!(UserStatus::from_str("Suspended"), None);
    }
}
