mod endpoint;
mod nop;
mod random;
mod tsumogiri;

use crate::control::actor::*;
use crate::control::listener::Listener;
use crate::model::*;
use crate::util::variant::*;

pub use endpoint::{Endpoint, SeatLink};

trait ActorBuilder {
    fn get_default_config(&self) -> Config;
    fn create(&self, config: Config) -> Box<dyn Actor>;
}

// "Name(arg0,arg1,...)" の形式でActorを生成
// 省略した引数はデフォルト値
pub fn create_actor(exp: &str) -> Result<Box<dyn Actor>, String> {
    let builders: Vec<Box<dyn ActorBuilder>> = vec![
        Box::new(nop::NopBuilder {}),
        Box::new(tsumogiri::TsumogiriBuilder {}),
        Box::new(random::RandomDiscardBuilder {}),
    ];

    let name: &str;
    let args: Vec<&str>;
    let paren_left = exp.find('(');
    let paren_right = exp.rfind(')');
    if let (Some(l), Some(r)) = (paren_left, paren_right) {
        if r < l {
            return Err(format!("invalid paren: {}", exp));
        }
        let inner = &exp[l + 1..r];
        args = if inner.is_empty() {
            vec![]
        } else {
            inner.split(',').collect()
        };
        name = &exp[..l];
    } else {
        args = vec![];
        name = exp;
    }

    for b in &builders {
        let mut conf = b.get_default_config();
        if name != conf.name {
            continue;
        }

        if conf.args.len() < args.len() {
            return Err(format!(
                "expected {} arguments for {}. but {} arguments are provided.",
                conf.args.len(),
                name,
                args.len(),
            ));
        }
        for (i, &a) in args.iter().enumerate() {
            if !a.is_empty() {
                conf.args[i].value =
                    Variant::parse_as(&conf.args[i].value, a).map_err(|e| format!("{}: {}", e, a))?;
            }
        }
        return Ok(b.create(conf));
    }

    Err(format!("unknown actor name: {}", name))
}

#[test]
fn test_create_actor() {
    let a = create_actor("Tsumogiri(true)").unwrap();
    assert_eq!(a.get_name(), "Tsumogiri");
    assert_eq!(format!("{:?}", a), "Tsumogiri(win=true)");

    assert_eq!(format!("{:?}", create_actor("Nop").unwrap()), "Nop()");
    assert!(create_actor("Nop(1)").is_err());
    assert!(create_actor("Tsumogiri(x)").is_err());
    assert!(create_actor("Unknown").is_err());
    assert!(create_actor("RandomDiscard(,5)").is_ok());
    assert!(create_actor("Nop()").is_ok());
}

#[cfg(test)]
fn select_now(a: &mut dyn Actor, stg: &Stage, acts: &[Action]) -> Action {
    use std::future::Future;
    use std::task::{Context, Poll};
    let (_waiter, waker) = crate::util::waiter::waiter_waker();
    let mut cx = Context::from_waker(&waker);
    match a.select(stg, 0, acts).as_mut().poll(&mut cx) {
        Poll::Ready(act) => act,
        Poll::Pending => panic!("not ready"),
    }
}

#[test]
fn test_bot_selection() {
    let mut stg = Stage::default();
    stg.players[1].hand[TM][1] = 1;
    let turn = vec![
        Action::nop(),
        Action::new(ActionType::Discard, vec![Tile(TM, 1), Tile(TP, 2)]),
    ];
    let call = vec![Action::nop(), Action::pon(Tile(TS, 3)), Action::ron()];

    let mut a = create_actor("Tsumogiri").unwrap();
    a.init(1);
    // 鳴き後 (ツモ牌なし)
    assert_eq!(select_now(a.as_mut(), &stg, &turn), Action::discard(Tile(TP, 2)));
    stg.players[1].drawn = Some(Tile(TP, 2));
    assert_eq!(select_now(a.as_mut(), &stg, &turn), Action::nop());
    assert_eq!(select_now(a.as_mut(), &stg, &call), Action::ron());

    let mut a = create_actor("Tsumogiri(false)").unwrap();
    a.init(1);
    assert_eq!(select_now(a.as_mut(), &stg, &call), Action::nop());

    let mut a = create_actor("RandomDiscard(false,3)").unwrap();
    let act = select_now(a.as_mut(), &stg, &turn);
    assert_eq!(act.ty, ActionType::Discard);
    assert_eq!(select_now(a.as_mut(), &stg, &call[..2]), Action::nop());
}
