use ordered_float::{FloatIsNan, NotNan};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(PartialEq)]
struct HeapEntry<T> where T: PartialEq {
    pub key: NotNan<f64>,
    pub seq: u64,
    pub value: T
}

impl<T> Eq for HeapEntry<T> where T: PartialEq {}

impl<T> PartialOrd for HeapEntry<T> where T: PartialEq {
    fn partial_cmp(&self, other: &HeapEntry<T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so that BinaryHeap pops the smallest key, then the oldest insertion.
impl<T> Ord for HeapEntry<T> where T: PartialEq {
    fn cmp(&self, other: &HeapEntry<T>) -> Ordering {
        other.key.cmp(&self.key).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> HeapEntry<T> where T: PartialEq {
    pub fn to_tuple(&self) -> (f64, &T) {
        (self.key.into_inner(), &self.value)
    }

    pub fn from_tuple(key: f64, seq: u64, value: T) -> Result<Self, FloatIsNan> {
        Ok(HeapEntry {
            key: NotNan::new(key)?,
            seq,
            value
        })
    }
}

/// Min-heap keyed by `f64`. Entries with equal keys come out in the order they
/// were pushed.
#[derive(Default)]
pub struct FloatBinaryHeap<T> where T: PartialEq {
    heap: BinaryHeap<HeapEntry<T>>,
    next_seq: u64,
}

impl<T> FloatBinaryHeap<T> where T: PartialEq {
    pub fn new () -> FloatBinaryHeap<T> {
        FloatBinaryHeap {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push (&mut self, key: f64, value: T) -> Result<(), FloatIsNan> {
        let entry = HeapEntry::from_tuple(key, self.next_seq, value)?;
        self.next_seq += 1;
        self.heap.push(entry);
        Ok(())
    }

    pub fn peek(&self) -> Option<(f64, &T)> {
        self.heap.peek().map(|r| r.to_tuple())
    }

    pub fn pop (&mut self) -> Option<(f64, T)> {
        self.heap.pop().map(|r| (r.key.into_inner(), r.value))
    }

    pub fn len (&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_key_first() {
        let mut heap = FloatBinaryHeap::new();
        heap.push(3.0, 'c').unwrap();
        heap.push(1.0, 'a').unwrap();
        heap.push(2.0, 'b').unwrap();

        assert_eq!(heap.peek(), Some((1.0, &'a')));
        assert_eq!(heap.pop(), Some((1.0, 'a')));
        assert_eq!(heap.pop(), Some((2.0, 'b')));
        assert_eq!(heap.pop(), Some((3.0, 'c')));
        assert!(heap.pop().is_none());
    }

    #[test]
    fn equal_keys_pop_in_insertion_order() {
        let mut heap = FloatBinaryHeap::new();
        for i in 0..50 {
            heap.push(0.5, i).unwrap();
        }
        heap.push(0.25, 99).unwrap();

        assert_eq!(heap.pop(), Some((0.25, 99)));
        let order: Vec<i32> = (0..50).map(|_| heap.pop().unwrap().1).collect();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
        assert!(heap.is_empty());
    }

    #[test]
    fn nan_key_is_rejected() {
        let mut heap = FloatBinaryHeap::new();
        assert!(heap.push(std::f64::NAN, 1).is_err());
        assert_eq!(heap.len(), 0);
    }
}
