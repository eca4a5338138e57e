use serde_json::{json, Value};
use tracing::warn;

use crate::control::listener::Listener;
use crate::model::*;
use crate::util::misc::*;

// [EventWriter]
// 局毎のイベント列を {dir}/{開始時刻}/{局番号}.json に書き出す
#[derive(Debug)]
pub struct EventWriter {
    dir: String,
    start_time: u64,
    round_index: usize,
    record: Vec<Value>,
}

impl EventWriter {
    pub fn new(dir: &str) -> Self {
        Self {
            dir: dir.to_string(),
            start_time: unixtime_now(),
            round_index: 0,
            record: vec![],
        }
    }

    fn file_path(&self) -> String {
        format!("{}/{}/{:02}.json", self.dir, self.start_time, self.round_index)
    }

    fn flush(&mut self) -> Res {
        let data = serde_json::to_string_pretty(&json!(self.record))?;
        write_to_file(&self.file_path(), &data)
    }
}

impl Listener for EventWriter {
    fn notify_event(&mut self, _stg: &Stage, event: &Event) {
        let mut write = false;
        match event {
            Event::New(_) => {
                self.record.clear();
            }
            Event::Win(_) | Event::Draw(_) => {
                write = true;
            }
            _ => {}
        }

        self.record.push(json!(event));
        if write {
            if let Err(e) = self.flush() {
                warn!("failed to write {}: {}", self.file_path(), e);
            }
            self.record.clear();
            self.round_index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_writer() {
        let dir = std::env::temp_dir().join(format!("flower_mahjong_{}", std::process::id()));
        let dir = dir.to_string_lossy().to_string();
        let mut w = EventWriter::new(&dir);
        let stg = Stage::default();

        w.notify_event(&stg, &Event::new(0, WE, 0, Default::default(), 92));
        w.notify_event(&stg, &Event::deal(0, Tile(TM, 1), false));
        assert_eq!(w.record.len(), 2);
        w.notify_event(&stg, &Event::draw(Default::default()));
        assert!(w.record.is_empty());

        let path = format!("{}/{}/00.json", dir, w.start_time);
        let s = std::fs::read_to_string(&path).unwrap();
        let v: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 3);
        assert_eq!(v[0]["type"], "New");
        assert_eq!(v[2]["type"], "Draw");
        std::fs::remove_dir_all(&dir).ok();
    }
}
