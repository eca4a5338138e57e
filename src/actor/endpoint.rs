use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

use tracing::warn;

use super::*;
use crate::error::GameError;
use crate::util::misc::Res;

#[derive(Debug, Default)]
struct Inbox {
    pending: Option<u64>,     // 応答待ちの問い合わせ
    response: Option<Action>, // 受信済みの応答
    waker: Option<Waker>,
}

// 座席宛てのメッセージをチャネルに送信し,SeatLink経由で応答を受け取るActor
// 送信するメッセージはServerMessageのJSON文字列
#[derive(Clone)]
pub struct Endpoint {
    config: Config,
    seat: Seat,
    inbox: Arc<Mutex<Inbox>>,
    sender: Sender<String>,
}

// 通信側からEndpointへ応答を渡すためのハンドル
#[derive(Clone)]
pub struct SeatLink {
    inbox: Arc<Mutex<Inbox>>,
}

impl Endpoint {
    pub fn new(sender: Sender<String>) -> (Self, SeatLink) {
        let inbox = Arc::new(Mutex::new(Inbox::default()));
        let ep = Self {
            config: Config {
                name: "Endpoint".to_string(),
                args: vec![],
            },
            seat: NO_SEAT,
            inbox: inbox.clone(),
            sender,
        };
        (ep, SeatLink { inbox })
    }

    fn send(&self, msg: &ServerMessage) {
        let s = match serde_json::to_string(msg) {
            Ok(s) => s,
            Err(e) => {
                warn!("failed to serialize message: {}", e);
                return;
            }
        };
        if self.sender.send(s).is_err() {
            warn!("seat {}: endpoint disconnected", self.seat);
        }
    }
}

impl SeatLink {
    // ClientMessageのJSON文字列を受け付け
    pub fn submit_message(&self, msg: &str) -> Res {
        match serde_json::from_str::<ClientMessage>(msg)? {
            ClientMessage::Action { seq, action } => self.submit(seq, action)?,
        }
        Ok(())
    }

    // 応答待ちの問い合わせと異なるseqは拒否
    pub fn submit(&self, seq: u64, action: Action) -> Result<(), GameError> {
        let mut ib = self
            .inbox
            .lock()
            .map_err(|_| GameError::StaleSequence {
                got: seq,
                expected: None,
            })?;
        if ib.pending != Some(seq) || ib.response.is_some() {
            warn!("stale response seq={} (pending={:?})", seq, ib.pending);
            return Err(GameError::StaleSequence {
                got: seq,
                expected: ib.pending,
            });
        }

        ib.response = Some(action);
        if let Some(w) = ib.waker.take() {
            w.wake();
        }
        Ok(())
    }
}

struct Selection {
    inbox: Arc<Mutex<Inbox>>,
    seq: u64,
}

impl Future for Selection {
    type Output = Action;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Action> {
        let mut ib = match self.inbox.lock() {
            Ok(ib) => ib,
            Err(_) => return Poll::Ready(Action::nop()),
        };
        if ib.pending == Some(self.seq) {
            if let Some(act) = ib.response.take() {
                ib.pending = None;
                return Poll::Ready(act);
            }
        }
        ib.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl Actor for Endpoint {
    fn init(&mut self, seat: Seat) {
        self.seat = seat;
        if let Ok(mut ib) = self.inbox.lock() {
            *ib = Inbox::default();
        }
        self.send(&ServerMessage::Info { seat });
    }

    fn select(&mut self, _stg: &Stage, seq: u64, acts: &[Action]) -> ActionFuture {
        if let Ok(mut ib) = self.inbox.lock() {
            ib.pending = Some(seq);
            ib.response = None;
        }
        self.send(&ServerMessage::Action {
            seq,
            actions: acts.to_vec(),
        });
        Box::pin(Selection {
            inbox: self.inbox.clone(),
            seq,
        })
    }

    fn expire(&mut self, seq: u64) {
        if let Ok(mut ib) = self.inbox.lock() {
            if ib.pending == Some(seq) {
                ib.pending = None;
                ib.response = None;
            }
        }
        self.send(&ServerMessage::Expire { seq });
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for Endpoint {
    fn notify_event(&mut self, _stg: &Stage, event: &Event) {
        self.send(&ServerMessage::Event(Box::new(event.clone())));
    }
}
