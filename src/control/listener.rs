use std::fmt;

use crate::model::*;

// 卓のイベントの通知先
// イベントは卓の状態に反映された後に通知される
pub trait Listener: Send {
    fn notify_event(&mut self, _stg: &Stage, _event: &Event) {}
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener")
    }
}
