// 卓の進行制御
pub mod actor;
pub mod common;
pub mod engine;
pub mod interrupt;
pub mod listener;
pub mod possible_actions;
pub mod round;
pub mod turn;
pub mod wall;
