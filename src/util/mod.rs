// 汎用的な補助処理
pub mod misc;
pub mod variant;
pub mod waiter;
