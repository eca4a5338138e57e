// 和了判定と点数計算を行うモジュール
mod analyze;
mod score;

pub use self::{
    analyze::{
        analyze, count_suits, functional_tiles, is_thirteen_distinct, parse_into_normal_win,
        parse_into_seven_pairs, parse_melds, present_suits, try_form_exact_sets, Decomposition,
        HandAnalysisResult, ParsedHand, SetPair, SetPairType,
    },
    score::{score, score_hand, WinConditions},
};
