use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::events::EventSender;

/// Periodic tick source. Sends a clone of `event` every `interval` until
/// dropped or until the receiving queue goes away.
#[derive(Debug)]
pub struct Clock {
    should_stop: Arc<AtomicBool>,
}

impl Clock {
    pub fn start<E>(sender: EventSender<E>, event: E, interval: Duration) -> Self
    where
        E: Clone + Send + 'static,
    {
        let should_stop = Arc::new(AtomicBool::new(false));
        let stop = should_stop.clone();

        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(interval);

            // first tick of an interval resolves immediately
            ticks.tick().await;

            loop {
                ticks.tick().await;

                if stop.load(Ordering::Relaxed) || !sender.send(event.clone()) {
                    break;
                }
            }

            log::debug!("clock stopped.");
        });

        log::debug!("started clock with interval {:?}", interval);

        Self { should_stop }
    }

    pub fn stop(&self) { self.should_stop.store(true, Ordering::Relaxed); }

    #[cfg(test)]
    pub fn is_stopped(&self) -> bool { self.should_stop.load(Ordering::Relaxed) }
}

impl Drop for Clock {
    fn drop(&mut self) { self.stop(); }
}
