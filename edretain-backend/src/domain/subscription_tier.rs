// edretain-backend/src/domain/subscription_tier.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// サブスクリプション階層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionTier {
    Free,
    Standard,
    Premium,
}

impl SubscriptionTier {
    /// 文字列からSubscriptionTierに変換（大文字小文字は区別しない）
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(Self::Free),
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    /// 倉庫に保存される表記
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Standard => "Standard",
            Self::Premium => "Premium",
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Self::Free)
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Free, Self::Standard, Self::Premium]
    }
}

impl FromStr for SubscriptionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionTier::from_str(s).ok_or_else(|| format!("Invalid subscription tier: {}", s))
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
