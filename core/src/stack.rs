use crate::error::CollectionError;
use crate::list::List;

/// LIFO stack over [`List`]; the top of the stack is the list front.
pub struct Stack<T> {
    list: List<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    pub fn push(&mut self, value: T) {
        self.list.push_front(value);
    }

    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.list.pop_front()
    }

    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.list.front().ok_or(CollectionError::EmptyContainer)
    }

    pub fn peek_mut(&mut self) -> Result<&mut T, CollectionError> {
        self.list.front_mut().ok_or(CollectionError::EmptyContainer)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
