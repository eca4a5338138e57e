use std::path::Path;

use super::*;
use crate::error::RuleError;

// 対局ルール・進行設定
// JSONファイルから読み込み可能. 省略した項目はデフォルト値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub n_round: usize,            // 対局する局数
    pub retention_limit: usize,    // 場風の席の連続和了で親が流れるまでの回数
    pub turn_timeout_ms: u64,      // ツモ番のアクション選択の制限時間
    pub interrupt_timeout_ms: u64, // 鳴き・ロンの受付時間
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            n_round: 8,
            retention_limit: 3,
            turn_timeout_ms: 10000,
            interrupt_timeout_ms: 5000,
        }
    }
}

impl Rule {
    pub fn from_file(path: &Path) -> Result<Self, RuleError> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&s)?)
    }
}

#[test]
fn test_rule_partial_json() {
    let rule: Rule = serde_json::from_str(r#"{"n_round": 2, "interrupt_timeout_ms": 50}"#).unwrap();
    assert_eq!(rule.n_round, 2);
    assert_eq!(rule.interrupt_timeout_ms, 50);
    assert_eq!(rule.retention_limit, 3);
}
