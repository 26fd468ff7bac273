#![allow(clippy::len_without_is_empty)]

/// A fixed-size ringbuffer
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buffer: Vec<T>,
    ix: usize,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// **Panics** if `capacity` is zero
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be nonzero");
        Self {
            buffer: Vec::<T>::with_capacity(capacity),
            ix: 0,
            capacity,
        }
    }

    /// Returns the buffer length
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Maximum number of stored elements
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the next push evicts the oldest element
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Insert an element into the buffer, overwriting the oldest element
    pub fn push(&mut self, item: T) {
        if self.ix >= self.len() {
            self.buffer.push(item);
        } else {
            self.buffer[self.ix] = item;
        }
        self.ix = (self.ix + 1) % self.capacity;
    }

    /// Iterate from the oldest element to the newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let split = if self.is_full() { self.ix } else { 0 };
        self.buffer[split..].iter().chain(&self.buffer[..split])
    }
}

impl RingBuffer<f64> {
    /// Arithmetic mean of the stored values, or `None` if empty
    pub fn mean(&self) -> Option<f64> {
        (!self.buffer.is_empty()).then(|| self.buffer.iter().sum::<f64>() / self.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ringbuffer_functional() {
        let mut buf = RingBuffer::new(4);
        assert_eq!(buf.len(), 0, "initialized empty");

        for i in 0..4 {
            buf.push(i * 2);
        }

        assert_eq!(buf.len(), 4, "length correct");
        assert!(buf.is_full(), "full at capacity");
        assert_eq!(
            buf.iter().copied().collect::<Vec<_>>(),
            [0, 2, 4, 6],
            "contents correct"
        );

        buf.push(1);
        buf.push(3);
        assert_eq!(buf.len(), 4, "length unchanged");
        assert_eq!(
            buf.iter().copied().collect::<Vec<_>>(),
            [4, 6, 1, 3],
            "oldest overwritten, iterates oldest first"
        );
    }

    #[test]
    fn ringbuffer_mean() {
        let mut buf = RingBuffer::new(3);
        assert_eq!(buf.mean(), None, "empty has no mean");
        buf.push(-1.0);
        buf.push(-3.0);
        assert_eq!(buf.mean(), Some(-2.0), "mean of partial window");
        buf.push(-2.0);
        buf.push(-10.0);
        assert_eq!(buf.mean(), Some(-5.0), "oldest evicted");
    }

    #[test]
    #[should_panic]
    fn ringbuffer_zero_capacity() {
        RingBuffer::<f64>::new(0);
    }
}
