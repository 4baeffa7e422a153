use flume::{Receiver, Selector, Sender};

/// simple generic event queue
pub struct EventQueue<E> {
    sender: EventSender<E>,
    recv: Receiver<E>,
    immediate_recv: Receiver<E>,
}

impl<E> Default for EventQueue<E>
where
    E: Send + 'static,
{
    /// create new event queue
    fn default() -> Self {
        let (sender, recv) = flume::unbounded();
        let (immediate_sender, immediate_recv) = flume::unbounded();

        let sender = EventSender::new(sender, immediate_sender);

        Self {
            immediate_recv,
            recv,
            sender,
        }
    }
}

impl<E> EventQueue<E>
where
    E: Send + 'static,
{
    pub fn sender(&self) -> &EventSender<E> { &self.sender }

    // blocking receiver. the queue owns a sender, so neither channel can disconnect.
    pub fn recv(&mut self) -> Option<E> {
        if let Ok(event) = self.immediate_recv.try_recv() {
            return Some(event);
        }

        Selector::new()
            .recv(&self.immediate_recv, Result::ok)
            .recv(&self.recv, Result::ok)
            .wait()
    }

    // non-blocking
    #[cfg(test)]
    pub fn try_recv(&mut self) -> Option<E> {
        self.immediate_recv
            .try_recv()
            .or_else(|_| self.recv.try_recv())
            .ok()
    }
}

#[derive(Debug)]
pub struct EventSender<E> {
    tx: Sender<E>,
    tx_immediate: Sender<E>,
}

impl<T> Clone for EventSender<T> {
    fn clone(&self) -> Self {
        EventSender {
            tx: self.tx.clone(),
            tx_immediate: self.tx_immediate.clone(),
        }
    }
}

impl<E> EventSender<E> {
    fn new(inner: Sender<E>, immediate: Sender<E>) -> Self {
        Self {
            tx: inner,
            tx_immediate: immediate,
        }
    }

    /// returns false once the receiving queue is gone.
    pub fn send(&self, value: E) -> bool { self.tx.send(value).is_ok() }

    /// queued ahead of everything sent with `send`.
    pub fn send_immediate(&self, value: E) -> bool { self.tx_immediate.send(value).is_ok() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_events_jump_the_queue() {
        let mut queue = EventQueue::default();
        queue.sender().send(1);
        queue.sender().send(2);
        queue.sender().send_immediate(3);

        assert_eq!(queue.recv(), Some(3));
        assert_eq!(queue.recv(), Some(1));
        assert_eq!(queue.try_recv(), Some(2));
        assert_eq!(queue.try_recv(), None);
    }

    #[test]
    fn cloned_senders_feed_the_same_queue() {
        let mut queue = EventQueue::default();
        let sender = queue.sender().clone();

        std::thread::spawn(move || sender.send("from thread"))
            .join()
            .unwrap();

        assert_eq!(queue.recv(), Some("from thread"));
    }
}
