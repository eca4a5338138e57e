use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::task::{Wake, Waker};
use std::time::Duration;

// Futureのpoll用のWakerと,wakeされるまで待機するWaiterの組
// Wakerは別スレッドから呼び出される可能性があるのでSenderをMutexで保護する
#[derive(Debug)]
pub struct Waiter {
    recv: Receiver<()>,
}

impl Waiter {
    // wakeされた場合はtrue, タイムアウトした場合はfalse
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.recv.recv_timeout(timeout) {
            Ok(()) => {
                while self.recv.try_recv().is_ok() {} // 溜まった通知を破棄
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

struct ChannelWake {
    sender: Mutex<Sender<()>>,
}

impl Wake for ChannelWake {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        if let Ok(s) = self.sender.lock() {
            let _ = s.send(());
        }
    }
}

pub fn waiter_waker() -> (Waiter, Waker) {
    let (sender, receiver) = channel();
    let waiter = Waiter { recv: receiver };
    let waker = Waker::from(Arc::new(ChannelWake {
        sender: Mutex::new(sender),
    }));
    (waiter, waker)
}

#[test]
fn test_waiter_waker() {
    let (waiter, waker) = waiter_waker();
    assert!(!waiter.wait_timeout(Duration::from_millis(1)));

    let w2 = waker.clone();
    std::thread::spawn(move || w2.wake());
    assert!(waiter.wait_timeout(Duration::from_secs(5)));
}
