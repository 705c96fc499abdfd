use std::fmt;

use crate::error::CollectionError;

/// A linked node living in the list's slot arena.
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked sequence with O(1) insertion at both ends.
///
/// Nodes live in a slot arena and link to each other by slot index, so the
/// list needs no `unsafe` and no reference counting. Slots freed by removal
/// are recycled by later insertions.
///
/// Used as the adjacency list of every vertex and as the result sequence
/// returned by the graph queries.
pub struct List<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append to the back. O(1).
    pub fn push_back(&mut self, value: T) {
        let idx = self.alloc(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// Prepend to the front. O(1).
    pub fn push_front(&mut self, value: T) {
        let idx = self.alloc(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => self.node_mut(head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
    }

    /// Remove and return the first element. O(1).
    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        match self.head {
            Some(head) => Ok(self.unlink(head)),
            None => Err(CollectionError::EmptyContainer),
        }
    }

    /// Element at `index`, walking from whichever end is closer.
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        let slot = self.slot_at(index)?;
        Ok(&self.node(slot).value)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        let slot = self.slot_at(index)?;
        Ok(&mut self.node_mut(slot).value)
    }

    /// Remove the element at `index`. O(1) at either end, O(n) in the middle.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        let slot = self.slot_at(index)?;
        Ok(self.unlink(slot))
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|idx| &self.node(idx).value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;
        Some(&mut self.node_mut(head).value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|idx| &self.node(idx).value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Detach the node in `idx` from its neighbours and release the slot.
    fn unlink(&mut self, idx: usize) -> T {
        let Some(node) = self.slots[idx].take() else {
            unreachable!("list slot {idx} is not linked");
        };
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.free.push(idx);
        self.len -= 1;
        node.value
    }

    /// Resolve a logical position to its arena slot.
    fn slot_at(&self, index: usize) -> Result<usize, CollectionError> {
        if index >= self.len {
            return Err(CollectionError::IndexOutOfRange {
                index,
                size: self.len,
            });
        }

        let mut cursor;
        if index < self.len / 2 {
            cursor = self.head;
            for _ in 0..index {
                cursor = cursor.and_then(|idx| self.node(idx).next);
            }
        } else {
            cursor = self.tail;
            for _ in index + 1..self.len {
                cursor = cursor.and_then(|idx| self.node(idx).prev);
            }
        }

        cursor.ok_or(CollectionError::IndexOutOfRange {
            index,
            size: self.len,
        })
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match &self.slots[idx] {
            Some(node) => node,
            None => unreachable!("dangling list link to slot {idx}"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Some(node) => node,
            None => unreachable!("dangling list link to slot {idx}"),
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

/// Front-to-back borrowing iterator.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let idx = self.next?;
        let node = self.list.node(idx);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning iterator, drains from the front.
pub struct IntoIter<T>(List<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}
