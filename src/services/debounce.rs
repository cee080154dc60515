//! Timer-based coalescing of rapid emissions.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Fires `on_fire` with the last value emitted once `quiet` has passed
/// without another emission. Superseded values are dropped.
///
/// The background task stops when the token is cancelled or the debouncer
/// is dropped; a value still waiting for its quiet window is discarded.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(quiet: Duration, cancel: CancellationToken, on_fire: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                match pending.take() {
                    None => {
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => break,
                            next = rx.recv() => match next {
                                Some(value) => pending = Some(value),
                                None => break,
                            },
                        }
                    }
                    Some(value) => {
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => break,
                            next = rx.recv() => match next {
                                Some(newer) => pending = Some(newer),
                                None => break,
                            },
                            _ = tokio::time::sleep(quiet) => {
                                tokio::spawn(on_fire(value));
                            }
                        }
                    }
                }
            }
            log::debug!("debounce task stopped");
        });

        Self { tx }
    }

    /// Queues a value. Returns `false` once the background task has stopped.
    pub fn emit(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) -> std::future::Ready<()> + Send + 'static) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let on_fire = move |value: String| {
            sink.lock().unwrap().push(value);
            std::future::ready(())
        };
        (fired, on_fire)
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_value() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(500), CancellationToken::new(), on_fire);

        debouncer.emit("a".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.emit("ab".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.emit("abc".to_string());
        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;

        assert_eq!(*fired.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_emissions_fire_separately() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(500), CancellationToken::new(), on_fire);

        debouncer.emit("a".to_string());
        tokio::time::sleep(Duration::from_millis(700)).await;
        debouncer.emit("b".to_string());
        tokio::time::sleep(Duration::from_millis(700)).await;
        settle().await;

        assert_eq!(*fired.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_discards_pending_value() {
        let (fired, on_fire) = recorder();
        let cancel = CancellationToken::new();
        let debouncer = Debouncer::spawn(Duration::from_millis(500), cancel.clone(), on_fire);

        debouncer.emit("a".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        settle().await;

        assert!(fired.lock().unwrap().is_empty());
        assert!(!debouncer.emit("b".to_string()));
    }
}
