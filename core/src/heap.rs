use crate::error::CollectionError;

const DEFAULT_CAPACITY: usize = 10;

/// Binary min-heap over a growable array.
///
/// There is no decrease-key. Callers that need to lower an element's priority
/// insert it again and discard the stale copy when it surfaces (a priority
/// queue with lazy deletion). Staleness must be judged against the caller's
/// live value, never against the copy held in the heap.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Add an element. O(log n).
    pub fn insert(&mut self, value: T) {
        self.ensure_capacity();
        self.items.push(value);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the smallest element. O(log n).
    pub fn extract_min(&mut self) -> Result<T, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyQueue);
        }
        let min = self.items.swap_remove(0);
        self.sift_down(0);
        Ok(min)
    }

    /// The smallest element without removing it. O(1).
    pub fn peek_min(&self) -> Result<&T, CollectionError> {
        self.items.first().ok_or(CollectionError::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Double the backing store when full. It never shrinks.
    fn ensure_capacity(&mut self) {
        let len = self.items.len();
        if len == self.items.capacity() {
            self.items.reserve_exact(len.max(DEFAULT_CAPACITY));
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index] < self.items[parent] {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            // Equal children resolve to the left one.
            let smallest = if right < len && self.items[right] < self.items[left] {
                right
            } else {
                left
            };

            if self.items[index] > self.items[smallest] {
                self.items.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interleaved_insert_extract() {
        let mut heap = MinHeap::new();
        heap.insert(5);
        heap.insert(3);
        heap.insert(8);
        assert_eq!(heap.extract_min(), Ok(3));
        heap.insert(1);
        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(heap.extract_min(), Ok(5));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.peek_min(), Ok(&8));
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert_eq!(heap.extract_min(), Err(CollectionError::EmptyQueue));
        assert_eq!(heap.peek_min(), Err(CollectionError::EmptyQueue));
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut heap = MinHeap::new();
        heap.insert(4);
        heap.insert(2);
        assert_eq!(heap.peek_min(), Ok(&2));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut heap = MinHeap::new();
        for v in [2, 2, 1, 2] {
            heap.insert(v);
        }
        let drained: Vec<i32> = std::iter::from_fn(|| heap.extract_min().ok()).collect();
        assert_eq!(drained, vec![1, 2, 2, 2]);
    }

    /// Orders by `key` only, so two entries can compare equal yet differ.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct K(u32, char);

    impl Ord for K {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }

    impl PartialOrd for K {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    #[test]
    fn test_equal_children_prefer_left() {
        let mut heap = MinHeap::new();
        for k in [K(0, 'r'), K(5, 'L'), K(5, 'R'), K(9, 'z')] {
            heap.insert(k);
        }
        // Root removed; last entry sinks below two equal children.
        assert_eq!(heap.extract_min().map(|k| k.1), Ok('r'));
        assert_eq!(heap.extract_min().map(|k| k.1), Ok('L'));
        assert_eq!(heap.extract_min().map(|k| k.1), Ok('R'));
        assert_eq!(heap.extract_min().map(|k| k.1), Ok('z'));
    }

    #[test]
    fn test_capacity_grows_and_never_shrinks() {
        let mut heap = MinHeap::new();
        let initial = heap.capacity();
        assert!(initial >= DEFAULT_CAPACITY);
        for v in 0..=initial {
            heap.insert(v);
        }
        let grown = heap.capacity();
        assert!(grown >= 2 * initial);
        while heap.extract_min().is_ok() {}
        assert_eq!(heap.capacity(), grown);
    }

    proptest! {
        #[test]
        fn test_extraction_is_sorted(values in proptest::collection::vec(any::<i32>(), 0..200)) {
            let mut heap = MinHeap::new();
            for v in &values {
                heap.insert(*v);
            }
            let drained: Vec<i32> = std::iter::from_fn(|| heap.extract_min().ok()).collect();
            let mut expected = values.clone();
            expected.sort();
            prop_assert_eq!(drained, expected);
        }
    }
}
