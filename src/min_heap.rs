use crate::error::{HuffmanError, Result};

/// Anything the heap can order. Lower weight means higher priority.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    seq: u64,
}

impl<T: Weighted> Slot<T> {
    // (weight, seq): equal weights come out in insertion order
    fn key(&self) -> (u64, u64) {
        (self.item.weight(), self.seq)
    }
}

/// Binary min-heap keyed on [`Weighted::weight`].
///
/// Ties are broken FIFO: every element gets a sequence number when it enters
/// the heap, and among equal weights the smaller sequence number is extracted
/// first. [`MinHeap::build`] numbers elements in the order they are supplied.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<Slot<T>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap {
            elements: vec![],
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.elements.len() == 1
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Weighted> MinHeap<T> {
    /// Bottom-up heapify in O(n).
    pub fn build(source: Vec<T>) -> Self {
        let elements: Vec<Slot<T>> = source
            .into_iter()
            .zip(0u64..)
            .map(|(item, seq)| Slot { item, seq })
            .collect();
        let next_seq = elements.len() as u64;
        let mut heap = MinHeap { elements, next_seq };

        let n = heap.len();
        for i in (0..n / 2).rev() {
            heap.min_heapify(i);
        }
        heap
    }

    #[cfg(test)]
    fn valid_min_heap(&self) -> bool {
        (1..self.len())
            .all(|i| self.elements[Self::parent(i)].key() <= self.elements[i].key())
    }

    fn min_heapify(&mut self, mut i: usize) {
        let n = self.len();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l].key() < self.elements[smallest].key() {
                smallest = l;
            }
            if r < n && self.elements[r].key() < self.elements[smallest].key() {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    pub fn insert(&mut self, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.elements.push(Slot { item: value, seq });

        let mut i = self.len() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[p].key() <= self.elements[i].key() {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    pub fn extract_min(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(HuffmanError::HeapUnderflow);
        }
        let last = self.len() - 1;
        self.elements.swap(0, last);
        let result = self.elements.pop().ok_or(HuffmanError::HeapUnderflow)?;
        self.min_heapify(0);
        Ok(result.item)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u64, &'static str);

    impl Weighted for Item {
        fn weight(&self) -> u64 {
            self.0
        }
    }

    fn drain(mut heap: MinHeap<Item>) -> Vec<Item> {
        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.extract_min().unwrap());
        }
        out
    }

    #[test]
    fn test_build_then_extract_sorted() {
        let heap = MinHeap::build(vec![
            Item(5, "a"),
            Item(1, "b"),
            Item(9, "c"),
            Item(3, "d"),
            Item(7, "e"),
            Item(2, "f"),
        ]);
        assert!(heap.valid_min_heap());
        let weights: Vec<u64> = drain(heap).iter().map(|i| i.0).collect();
        assert_eq!(weights, vec![1, 2, 3, 5, 7, 9]);
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut heap = MinHeap::build(vec![Item(4, "first"), Item(4, "second")]);
        heap.insert(Item(4, "third"));
        heap.insert(Item(1, "low"));

        assert!(heap.valid_min_heap());

        let names: Vec<&str> = drain(heap).iter().map(|i| i.1).collect();
        assert_eq!(names, vec!["low", "first", "second", "third"]);
    }

    #[test]
    fn test_underflow() {
        let mut heap: MinHeap<Item> = MinHeap::new();
        assert!(matches!(heap.extract_min(), Err(HuffmanError::HeapUnderflow)));
    }

    #[test]
    fn test_singleton() {
        let mut heap = MinHeap::new();
        assert!(!heap.is_singleton());
        heap.insert(Item(3, "x"));
        assert!(heap.is_singleton());
        heap.insert(Item(2, "y"));
        assert!(!heap.is_singleton());
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.extract_min().unwrap(), Item(2, "y"));
    }
}
