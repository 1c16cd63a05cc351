use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

/// A FIFO addressed by *logical* index: the position an entry holds in the
/// infinite stream of everything ever pushed, not its position in memory.
///
/// The scan machinery remembers logical indices of entries whose sizes are
/// still pending and resolves them long after older entries have been retired
/// from the front, so indices must stay stable as the front advances. Storage
/// grows as needed; retiring the front never invalidates an index.
pub struct RingBuffer<T> {
    data: VecDeque<T>,
    /// Logical index of `data[0]`.
    offset: usize,
}

impl<T> RingBuffer<T> {
    pub fn new() -> Self {
        RingBuffer {
            data: VecDeque::new(),
            offset: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends at the back, returning the new entry's logical index.
    pub fn push(&mut self, value: T) -> usize {
        let index = self.offset + self.data.len();
        self.data.push_back(value);
        index
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn index_of_first(&self) -> usize {
        self.offset
    }

    pub fn first(&self) -> &T {
        &self.data[0]
    }

    pub fn first_mut(&mut self) -> &mut T {
        &mut self.data[0]
    }

    pub fn pop_first(&mut self) -> T {
        self.offset += 1;
        self.data.pop_front().unwrap()
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index.checked_sub(self.offset).unwrap()]
    }
}

impl<T> IndexMut<usize> for RingBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index.checked_sub(self.offset).unwrap()]
    }
}
