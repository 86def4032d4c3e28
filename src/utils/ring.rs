//! Fixed-capacity FIFO ring
//!
//! One generic ring serves every bounded queue in the firmware: the serial
//! receive and transmit buffers, the software timer free list and the log
//! buffer. All `N` slots are usable; `len` tracks occupancy so a full ring is
//! never confused with an empty one.

#[derive(Debug)]
pub struct Ring<T: Copy, const N: usize> {
    data: [Option<T>; N],
    head: usize,
    len: usize,
}

impl<T: Copy, const N: usize> Ring<T, N> {
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Appends `item` at the tail. A full ring hands the item back.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let tail = self.wrap(self.head + self.len);
        self.data[tail] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Removes the oldest item.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.data[self.head].take();
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        item
    }

    /// Returns the oldest item without removing it.
    pub fn peek(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.data[self.head]
        }
    }

    pub fn clear(&mut self) {
        while self.pop().is_some() {}
        self.head = 0;
    }

    /// Oldest-first iteration over the queued items.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).filter_map(move |i| self.data[self.wrap(self.head + i)])
    }

    #[inline]
    fn wrap(&self, i: usize) -> usize {
        // Callers never pass an index of 2N or more.
        if i >= N {
            i - N
        } else {
            i
        }
    }
}

impl<T: Copy, const N: usize> Default for Ring<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_across_wrap() {
        let mut ring: Ring<u8, 4> = Ring::new();
        for b in 0..3 {
            ring.push(b).unwrap();
        }
        assert_eq!(ring.pop(), Some(0));
        assert_eq!(ring.pop(), Some(1));
        ring.push(3).unwrap();
        ring.push(4).unwrap();
        ring.push(5).unwrap();
        assert!(ring.is_full());
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), Some(4));
        assert_eq!(ring.pop(), Some(5));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn full_ring_rejects_and_returns_item() {
        let mut ring: Ring<u8, 2> = Ring::new();
        ring.push(1).unwrap();
        ring.push(2).unwrap();
        assert_eq!(ring.push(3), Err(3));
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.peek(), Some(1));
    }

    #[test]
    fn every_slot_is_usable() {
        let mut ring: Ring<u16, 8> = Ring::new();
        assert!(ring.is_empty());
        for i in 0..8 {
            assert!(ring.push(i).is_ok());
        }
        assert!(ring.is_full());
        assert_eq!(ring.capacity(), 8);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.peek(), None);
    }
}
