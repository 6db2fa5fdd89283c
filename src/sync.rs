//! Bounded message queue.
//!
//! A ring buffer guarded by a mutex and two condition variables (not-empty,
//! not-full). Push and pop come in blocking, non-blocking, and timed
//! variants. Closing the queue wakes every waiter; subsequent pushes fail,
//! while pops drain the remaining messages before reporting disconnection.
//! Delivery is FIFO per producer.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// Why a push did not enqueue. The message is handed back in every case.
#[derive(Debug, PartialEq, Eq)]
pub enum PushError<T> {
    /// The queue was closed; the producer should terminate.
    Closed(T),
    /// The non-blocking variant found the queue full.
    Full(T),
    /// The timed variant ran out of time while the queue stayed full.
    Timeout(T),
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Closed(_) => write!(f, "queue closed"),
            PushError::Full(_) => write!(f, "queue full"),
            PushError::Timeout(_) => write!(f, "push timed out"),
        }
    }
}

/// Why a pop returned no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopError {
    /// Queue closed and fully drained.
    Closed,
    /// The timed variant ran out of time while the queue stayed empty.
    Timeout,
    /// The non-blocking variant found the queue empty.
    Empty,
}

struct Inner<T> {
    buf: VecDeque<T>,
    capacity: usize,
    closed: bool,
}

pub struct MessageQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> MessageQueue<T> {
    /// A queue holding at most `capacity` messages.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        MessageQueue {
            inner: Mutex::new(Inner {
                buf: VecDeque::with_capacity(capacity),
                capacity,
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Block until there is room, then enqueue.
    pub fn push(&self, msg: T) -> Result<(), PushError<T>> {
        let mut inner = self.inner.lock();
        while !inner.closed && inner.buf.len() == inner.capacity {
            self.not_full.wait(&mut inner);
        }
        if inner.closed {
            return Err(PushError::Closed(msg));
        }
        inner.buf.push_back(msg);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Enqueue only if there is room right now.
    pub fn try_push(&self, msg: T) -> Result<(), PushError<T>> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(PushError::Closed(msg));
        }
        if inner.buf.len() == inner.capacity {
            return Err(PushError::Full(msg));
        }
        inner.buf.push_back(msg);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Block for at most `timeout` waiting for room.
    pub fn push_timeout(&self, msg: T, timeout: Duration) -> Result<(), PushError<T>> {
        let mut inner = self.inner.lock();
        while !inner.closed && inner.buf.len() == inner.capacity {
            if self.not_full.wait_for(&mut inner, timeout).timed_out() {
                return Err(PushError::Timeout(msg));
            }
        }
        if inner.closed {
            return Err(PushError::Closed(msg));
        }
        inner.buf.push_back(msg);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Block until a message is available. Returns `None` once the queue is
    /// closed and drained.
    pub fn pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        while !inner.closed && inner.buf.is_empty() {
            self.not_empty.wait(&mut inner);
        }
        let msg = inner.buf.pop_front();
        drop(inner);
        if msg.is_some() {
            self.not_full.notify_one();
        }
        msg
    }

    /// Dequeue only if a message is available right now.
    pub fn try_pop(&self) -> Result<T, PopError> {
        let mut inner = self.inner.lock();
        match inner.buf.pop_front() {
            Some(msg) => {
                drop(inner);
                self.not_full.notify_one();
                Ok(msg)
            }
            None if inner.closed => Err(PopError::Closed),
            None => Err(PopError::Empty),
        }
    }

    /// Block for at most `timeout` waiting for a message.
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopError> {
        let mut inner = self.inner.lock();
        while !inner.closed && inner.buf.is_empty() {
            if self.not_empty.wait_for(&mut inner, timeout).timed_out() {
                return Err(PopError::Timeout);
            }
        }
        match inner.buf.pop_front() {
            Some(msg) => {
                drop(inner);
                self.not_full.notify_one();
                Ok(msg)
            }
            None => Err(PopError::Closed),
        }
    }

    /// Close the queue and wake every waiter.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        drop(inner);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fifo_within_one_producer() {
        let queue = MessageQueue::new(8);
        for i in 0..5 {
            queue.push(i).unwrap();
        }
        for i in 0..5 {
            assert_eq!(queue.pop(), Some(i));
        }
    }

    #[test]
    fn try_push_fails_when_full() {
        let queue = MessageQueue::new(2);
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        assert_eq!(queue.try_push(3), Err(PushError::Full(3)));
        assert_eq!(queue.pop(), Some(1));
        queue.try_push(3).unwrap();
    }

    #[test]
    fn push_after_close_fails() {
        let queue = MessageQueue::new(2);
        queue.push(1).unwrap();
        queue.close();
        assert_eq!(queue.push(2), Err(PushError::Closed(2)));
    }

    #[test]
    fn close_drains_then_disconnects() {
        let queue = MessageQueue::new(4);
        queue.push("a").unwrap();
        queue.push("b").unwrap();
        queue.close();
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.try_pop(), Err(PopError::Closed));
    }

    #[test]
    fn pop_timeout_reports_timeout() {
        let queue: MessageQueue<u32> = MessageQueue::new(1);
        assert_eq!(
            queue.pop_timeout(Duration::from_millis(10)),
            Err(PopError::Timeout)
        );
    }

    #[test]
    fn blocking_push_waits_for_room() {
        let queue = Arc::new(MessageQueue::new(1));
        queue.push(0u32).unwrap();

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.push(1).unwrap())
        };

        thread::sleep(Duration::from_millis(20));
        assert_eq!(queue.pop(), Some(0));
        producer.join().unwrap();
        assert_eq!(queue.pop(), Some(1));
    }

    #[test]
    fn close_wakes_blocked_consumer() {
        let queue: Arc<MessageQueue<u32>> = Arc::new(MessageQueue::new(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };
        thread::sleep(Duration::from_millis(20));
        queue.close();
        assert_eq!(consumer.join().unwrap(), None);
    }

    #[test]
    fn cross_thread_order_is_preserved() {
        let queue = Arc::new(MessageQueue::new(4));
        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..100u32 {
                    queue.push(i).unwrap();
                }
            })
        };

        let mut received = Vec::new();
        for _ in 0..100 {
            received.push(queue.pop().unwrap());
        }
        producer.join().unwrap();
        assert_eq!(received, (0..100).collect::<Vec<_>>());
    }
}
