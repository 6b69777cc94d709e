// src/domain/campaign_intent.rs

//! セグメントラベルからキャンペーン意図への対応表と推奨アクションの選択

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignIntent {
    Reactivation,
    Retention,
    Upsell,
    Onboarding,
}

/// 一致するキーワードがないときのカテゴリ
pub const DEFAULT_INTENT: CampaignIntent = CampaignIntent::Retention;

/// 順序付きキーワード表（小文字、部分一致、先勝ち）
///
/// "inactive" は "active" を含むため、再活性化のキーワードをアップセルより先に置く。
/// "medium risk" は元のキャンペーン定義でアップセル対象なので汎用の "risk" より先に置く。
pub const KEYWORD_TABLE: &[(&str, CampaignIntent)] = &[
    ("churn", CampaignIntent::Reactivation),
    ("inactive", CampaignIntent::Reactivation),
    ("dormant", CampaignIntent::Reactivation),
    ("lapsed", CampaignIntent::Reactivation),
    ("medium risk", CampaignIntent::Upsell),
    ("high risk", CampaignIntent::Retention),
    ("at risk", CampaignIntent::Retention),
    ("at-risk", CampaignIntent::Retention),
    ("risk", CampaignIntent::Retention),
    ("new", CampaignIntent::Onboarding),
    ("onboard", CampaignIntent::Onboarding),
    ("all users", CampaignIntent::Onboarding),
    ("engaged", CampaignIntent::Upsell),
    ("active", CampaignIntent::Upsell),
    ("loyal", CampaignIntent::Upsell),
    ("champion", CampaignIntent::Upsell),
    ("medium", CampaignIntent::Upsell),
];

/// 推奨アクション（チャネル×オファー）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SuggestedAction {
    pub channel: &'static str,
    pub offer: &'static str,
}

impl CampaignIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reactivation => "Reactivation",
            Self::Retention => "Retention",
            Self::Upsell => "Upsell",
            Self::Onboarding => "Onboarding",
        }
    }

    pub fn all() -> [Self; 4] {
        [
            Self::Reactivation,
            Self::Retention,
            Self::Upsell,
            Self::Onboarding,
        ]
    }

    /// キャンペーン種別ごとの対象セグメント
    pub fn target_segments(&self) -> &'static [&'static str] {
        match self {
            Self::Retention => &["High Risk", "At Risk"],
            Self::Reactivation => &["Churned", "Inactive"],
            Self::Upsell => &["Medium Risk", "Active"],
            Self::Onboarding => &["All Users", "New Users"],
        }
    }

    pub fn offers(&self) -> &'static [&'static str] {
        match self {
            Self::Retention => &["Discount", "Free Trial Extension"],
            Self::Reactivation => &["Free Trial Extension", "Discount"],
            Self::Upsell => &["Mentoring Session", "Free Content"],
            Self::Onboarding => &["Free Content", "Mentoring Session"],
        }
    }

    pub fn channels(&self) -> &'static [&'static str] {
        match self {
            Self::Retention => &["Email", "SMS"],
            Self::Reactivation => &["Email", "Push Notification"],
            Self::Upsell => &["Email", "In-App"],
            Self::Onboarding => &["Email", "Push Notification"],
        }
    }

    /// オファー×チャネルの直積（オファー優先の順）
    pub fn action_pairs(&self) -> Vec<SuggestedAction> {
        let channels = self.channels();
        self.offers()
            .iter()
            .flat_map(|&offer| {
                channels
                    .iter()
                    .map(move |&channel| SuggestedAction { channel, offer })
            })
            .collect()
    }

    /// セグメントラベルから意図を決める
    pub fn for_segment(segment: Option<&str>) -> Self {
        let Some(label) = segment else {
            return DEFAULT_INTENT;
        };
        let label = label.to_lowercase();

        KEYWORD_TABLE
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map_or(DEFAULT_INTENT, |(_, intent)| *intent)
    }
}

impl std::fmt::Display for CampaignIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ユーザーとカテゴリから決定的にアクションを選ぶ
///
/// SHA-256("{user_key}:{category}") の先頭8バイトをビッグエンディアンで読み、
/// アクション数で割った余りを添字にする。
pub fn suggest_action(user_key: i32, intent: CampaignIntent) -> Option<SuggestedAction> {
    let pairs = intent.action_pairs();
    if pairs.is_empty() {
        return None;
    }

    let digest = Sha256::digest(format!("{}:{}", user_key, intent.as_str()).as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let index = (u64::from_be_bytes(prefix) % pairs.len() as u64) as usize;

    pairs.get(index).copied()
}

/// 起動時に対応表を検証する
///
/// すべてのカテゴリにキーワードとアクションが1つ以上あること、
/// キーワードが空でなく小文字であることを確認する。
pub fn validate_intent_table() -> Result<(), String> {
    for (keyword, _) in KEYWORD_TABLE {
        if keyword.trim().is_empty() {
            return Err("Intent keyword table contains an empty keyword".to_string());
        }
        if keyword.to_lowercase() != *keyword {
            return Err(format!("Intent keyword '{}' must be lowercase", keyword));
        }
    }

    for intent in CampaignIntent::all() {
        if !KEYWORD_TABLE.iter().any(|(_, mapped)| *mapped == intent) {
            return Err(format!("Intent '{}' has no keyword", intent));
        }
        if intent.action_pairs().is_empty() {
            return Err(format!("Intent '{}' has no channel/offer pair", intent));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_valid() {
        assert!(validate_intent_table().is_ok());
    }

    #[test]
    fn test_inactive_is_reactivation_not_upsell() {
        assert_eq!(
            CampaignIntent::for_segment(Some("Inactive")),
            CampaignIntent::Reactivation
        );
        assert_eq!(
            CampaignIntent::for_segment(Some("Active")),
            CampaignIntent::Upsell
        );
    }

    #[test]
    fn test_dashboard_segments() {
        assert_eq!(
            CampaignIntent::for_segment(Some("Highly Engaged")),
            CampaignIntent::Upsell
        );
        assert_eq!(
            CampaignIntent::for_segment(Some("At-Risk")),
            CampaignIntent::Retention
        );
        assert_eq!(
            CampaignIntent::for_segment(Some("Dormant")),
            CampaignIntent::Reactivation
        );
        assert_eq!(
            CampaignIntent::for_segment(Some("New Users")),
            CampaignIntent::Onboarding
        );
        assert_eq!(
            CampaignIntent::for_segment(Some("Medium Risk")),
            CampaignIntent::Upsell
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            CampaignIntent::for_segment(Some("HIGH RISK")),
            CampaignIntent::Retention
        );
    }

    #[test]
    fn test_unmatched_and_missing_fall_back_to_default() {
        assert_eq!(CampaignIntent::for_segment(Some("545")), DEFAULT_INTENT);
        assert_eq!(CampaignIntent::for_segment(None), DEFAULT_INTENT);
    }

    #[test]
    fn test_action_pairs_are_cartesian_product() {
        let pairs = CampaignIntent::Retention.action_pairs();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&SuggestedAction {
            channel: "SMS",
            offer: "Free Trial Extension"
        }));
    }

    #[test]
    fn test_suggest_action_is_deterministic_and_in_table() {
        for user_key in 1..50 {
            for intent in CampaignIntent::all() {
                let first = suggest_action(user_key, intent).unwrap();
                let second = suggest_action(user_key, intent).unwrap();
                assert_eq!(first, second);
                assert!(intent.action_pairs().contains(&first));
            }
        }
    }

    #[test]
    fn test_suggest_action_spreads_across_pairs() {
        let distinct: std::collections::HashSet<_> = (1..200)
            .filter_map(|user_key| suggest_action(user_key, CampaignIntent::Upsell))
            .collect();
        assert!(distinct.len() > 1);
    }
}
