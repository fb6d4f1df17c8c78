use std::sync::{mpsc, Arc};

use mentor_core::{Effect, Msg};
use mentor_engine::{BackendSettings, EngineEvent, EngineHandle, EventSink};
use mentor_logging::{mentor_info, mentor_warn};

use super::app::AppEvent;
use super::clipboard::{ClipboardBackend, SessionClipboard};

/// Forwards engine completions into the app loop as core messages.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::ProbeCompleted {
                request_id,
                outcome,
            } => Msg::ProbeCompleted {
                request_id,
                outcome,
            },
            EngineEvent::SubmissionCompleted {
                request_id,
                outcome,
            } => Msg::SubmissionCompleted {
                request_id,
                outcome,
            },
        };
        let _ = self.tx.send(AppEvent::Core(msg));
    }
}

pub struct EffectRunner<C = arboard::Clipboard> {
    engine: EngineHandle,
    clipboard: SessionClipboard<C>,
    tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(settings: &BackendSettings, tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let sink = Arc::new(MsgSink { tx: tx.clone() });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self {
            engine,
            clipboard: SessionClipboard::system(),
            tx,
        })
    }
}

impl<C: ClipboardBackend> EffectRunner<C> {
    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Probe { request_id } => {
                    mentor_info!("Probe request_id={}", request_id);
                    self.engine.probe(request_id);
                }
                Effect::Submit {
                    request_id,
                    query,
                    file,
                } => {
                    mentor_info!(
                        "Submit request_id={} file={:?} query_len={}",
                        request_id,
                        file.path,
                        query.len()
                    );
                    self.engine.submit(request_id, query, file);
                }
                Effect::CopyToClipboard { text } => {
                    let result = self.clipboard.write_text(&text);
                    if let Err(err) = &result {
                        mentor_warn!("Clipboard write failed: {}", err);
                    }
                    let _ = self.tx.send(AppEvent::Core(Msg::ClipboardWritten(result)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    static OPENED: AtomicUsize = AtomicUsize::new(0);

    struct CountingClipboard;

    impl ClipboardBackend for CountingClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), String> {
            Ok(())
        }
    }

    fn open_counting() -> Result<CountingClipboard, String> {
        OPENED.fetch_add(1, Ordering::SeqCst);
        Ok(CountingClipboard)
    }

    #[test]
    fn runner_reuses_its_clipboard_across_copies() {
        let (tx, rx) = mpsc::channel();
        let engine = EngineHandle::new(
            &BackendSettings::default(),
            Arc::new(MsgSink { tx: tx.clone() }),
        )
        .expect("engine");
        let mut runner = EffectRunner {
            engine,
            clipboard: SessionClipboard::with_opener(open_counting),
            tx,
        };

        for text in ["first", "second", "third"] {
            runner.enqueue(vec![Effect::CopyToClipboard {
                text: text.to_string(),
            }]);
            match rx.recv_timeout(Duration::from_secs(5)) {
                Ok(AppEvent::Core(Msg::ClipboardWritten(Ok(())))) => {}
                Ok(_) => panic!("unexpected event after copying {text}"),
                Err(err) => panic!("no clipboard result for {text}: {err}"),
            }
        }

        assert_eq!(OPENED.load(Ordering::SeqCst), 1);
    }
}
