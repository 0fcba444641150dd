use std::time::Duration;

use spdlog::{debug, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Latest-wins debounce state machine. Every `push` replaces the pending
/// value and restarts the quiet window; the value only comes out of `poll`
/// once the window has elapsed without further pushes.
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// When the pending value becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Runs search input through a `Debouncer` on a tokio task and calls
/// `on_settled` with the latest query once typing pauses.
pub struct DebouncedSearch {
    sender: UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl DebouncedSearch {
    pub fn spawn<F>(window: Duration, mut on_settled: F) -> Self
        where
            F: FnMut(String) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let task = tokio::spawn(async move {
            let mut debouncer = Debouncer::new(window);
            loop {
                let Some(deadline) = debouncer.deadline() else {
                    match rx.recv().await {
                        Some(query) => debouncer.push(query, Instant::now()),
                        None => break,
                    }
                    continue;
                };

                tokio::select! {
                    received = rx.recv() => match received {
                        Some(query) => debouncer.push(query, Instant::now()),
                        None => {
                            // Input closed: the trailing call still happens
                            sleep_until(deadline).await;
                            if let Some(query) = debouncer.poll(Instant::now()) {
                                on_settled(query);
                            }
                            break;
                        }
                    },
                    _ = sleep_until(deadline) => {
                        if let Some(query) = debouncer.poll(Instant::now()) {
                            debug!("Search settled on '{}'", query);
                            on_settled(query);
                        }
                    }
                }
            }
        });

        DebouncedSearch {
            sender: tx,
            task,
        }
    }

    pub fn input(&self, query: &str) {
        if let Err(e) = self.sender.send(query.to_string()) {
            warn!("Search input dropped, debounce task is gone: {}", e);
        }
    }

    /// Closes the input and waits for the last pending search to run.
    pub async fn finish(self) {
        drop(self.sender);
        if let Err(e) = self.task.await {
            warn!("Debounce task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::time::sleep;

    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_latest_wins() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push("r", start);
        debouncer.push("re", start + Duration::from_millis(100));
        debouncer.push("rea", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(499)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("rea"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push(1, start);
        assert_eq!(debouncer.deadline(), Some(start + WINDOW));
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + WINDOW * 2), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_search() {
        let settled = Arc::new(Mutex::new(vec![]));
        let sink = settled.clone();
        let search = DebouncedSearch::spawn(WINDOW, move |q| sink.lock().unwrap().push(q));

        search.input("r");
        search.input("re");
        search.input("rea");
        sleep(Duration::from_millis(400)).await;
        assert_eq!(*settled.lock().unwrap(), ["rea"]);

        search.input("reac");
        sleep(Duration::from_millis(100)).await;
        search.input("react");
        sleep(Duration::from_millis(250)).await;
        // 250ms since the last keystroke: still waiting
        assert_eq!(settled.lock().unwrap().len(), 1);
        sleep(Duration::from_millis(100)).await;
        assert_eq!(*settled.lock().unwrap(), ["rea", "react"]);

        search.finish().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_flushes_pending() {
        let settled = Arc::new(Mutex::new(vec![]));
        let sink = settled.clone();
        let search = DebouncedSearch::spawn(WINDOW, move |q| sink.lock().unwrap().push(q));

        search.input("css");
        search.input("css grid");
        search.finish().await;
        assert_eq!(*settled.lock().unwrap(), ["css grid"]);
    }
}
