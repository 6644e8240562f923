//! Array-backed binary min-heap keyed by weight.
//!
//! The heap keeps the children of index `i` at `2i + 1` and `2i + 2`. Sift-down
//! picks the left child as the first candidate and replaces it with the right
//! child only when the right one is strictly lighter. Tree construction relies
//! on this tie-break: equal weights must merge in the same order on the
//! compressing and the decompressing side.

/// Something with a weight the heap can order by.
pub trait Weighted {
    /// The ordering key; lighter items leave the heap first.
    fn weight(&self) -> u64;
}

impl Weighted for u64 {
    fn weight(&self) -> u64 {
        *self
    }
}

impl Weighted for u32 {
    fn weight(&self) -> u64 {
        u64::from(*self)
    }
}

/// Binary min-heap.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
    2 * i + 2
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

impl<T: Weighted> MinHeap<T> {
    /// Build a heap from `items`, repairing order bottom-up from the last
    /// parent down to the root.
    pub fn build(items: Vec<T>) -> Self {
        let mut heap = Self { items };
        for i in (0..heap.items.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    /// Number of items in the heap.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocated slots.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// The lightest item, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Remove and return the lightest item, or `None` on underflow.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Insert an item, doubling the storage when it is full.
    pub fn insert(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            self.items.reserve_exact(self.items.capacity().max(1));
        }
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    fn sift_down(&mut self, mut idx: usize) {
        let count = self.items.len();
        debug_assert!(idx < count);

        loop {
            let l = left(idx);
            let r = right(idx);

            let mut smallest =
                if l < count && self.items[l].weight() < self.items[idx].weight() {
                    l
                } else {
                    idx
                };
            if r < count && self.items[r].weight() < self.items[smallest].weight() {
                smallest = r;
            }

            if smallest == idx {
                break;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if self.items[idx].weight() >= self.items[p].weight() {
                break;
            }
            self.items.swap(idx, p);
            idx = p;
        }
    }

    /// Check the heap property over the whole array.
    pub fn is_valid(&self) -> bool {
        (1..self.items.len()).all(|i| self.items[parent(i)].weight() <= self.items[i].weight())
    }
}
