use std::{fmt, future::Future, pin::Pin};

use super::listener::Listener;
use crate::{model::*, util::variant::*};

#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub args: Vec<Arg>,
}

pub type ActionFuture = Pin<Box<dyn Future<Output = Action>>>;

pub fn ready(act: Action) -> ActionFuture {
    Box::pin(std::future::ready(act))
}

// Actor trait
pub trait Actor: Listener + ActorClone + Send {
    // 局開始時の初期化処理
    fn init(&mut self, _seat: Seat) {}

    // アクションの選択
    // actsの中から任意のアクションを選択して返すFutureを返す.
    // seqは問い合わせごとの通し番号で,応答が古いものでないかの検証に使用する.
    // Discardの場合はactsのDiscardに含まれる牌を1枚だけ指定して返す.
    // traitオブジェクトとして扱うためasync fnではなくFutureを返す.
    fn select(&mut self, stg: &Stage, seq: u64, acts: &[Action]) -> ActionFuture;

    // アクションの選択の失効通知
    // 制限時間切れや優先度の高いアクションによって選択自体が不要になった場合に呼ばれる.
    fn expire(&mut self, _seq: u64) {}

    // Actorの詳細表示用
    fn get_config(&self) -> &Config;

    // プレイヤー名
    fn get_name(&self) -> &str {
        &self.get_config().name
    }
}

impl fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conf = self.get_config();
        let arg_str = conf
            .args
            .iter()
            .map(|arg| format!("{}={}", arg.name, arg.value))
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}({})", conf.name, arg_str)
    }
}

// https://stackoverflow.com/questions/30353462/how-to-clone-a-struct-storing-a-boxed-trait-object
pub trait ActorClone {
    fn clone_box(&self) -> Box<dyn Actor>;
}

impl<T> ActorClone for T
where
    T: 'static + Actor + Clone,
{
    fn clone_box(&self) -> Box<dyn Actor> {
        Box::new(self.clone())
    }
}
