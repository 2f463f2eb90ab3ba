use std::sync::Arc;
use std::ops::Index;

/**
 * A read-only element view over shared, externally supplied buffer storage:
 * an element offset, an element stride and an element count. The geometry
 * stores never copy attached data, and cloning a view is an O(1) alias of
 * the same storage; that alias is how the committed time-sample-0 fast paths
 * are kept.
 *
 * Indexing does not test the element count on the hot path; debug builds
 * assert it. Attachment-time verification is responsible for rejecting
 * under-sized buffers.
 */
#[derive(Clone, Debug)]
pub struct BufferView<T> {
    data: Arc<std::vec::Vec<T>>,
    offset: usize,
    stride: usize,
    count: usize,
}

impl<T> BufferView<T> {
    /// Views count elements starting at offset, stride elements apart.
    pub fn with_layout(data: Arc<std::vec::Vec<T>>, offset: usize, stride: usize, count: usize)
        -> BufferView<T>
    {
        debug_assert!(stride > 0);
        debug_assert!(count == 0 || offset + (count - 1) * stride < data.len());
        BufferView {data: data, offset: offset, stride: stride, count: count}
    }

    /// Views an entire shared buffer as densely packed elements.
    pub fn new(data: Arc<std::vec::Vec<T>>) -> BufferView<T> {
        let count = data.len();
        Self::with_layout(data, 0, 1, count)
    }

    /// Takes ownership of a plain vector and views all of it.
    pub fn from_vec(data: std::vec::Vec<T>) -> BufferView<T> {
        Self::new(Arc::new(data))
    }

    /// A view with nothing attached.
    pub fn empty() -> BufferView<T> {
        BufferView {data: Arc::new(vec![]), offset: 0, stride: 1, count: 0}
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<T> Index<usize> for BufferView<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        debug_assert!(index < self.count);
        &self.data[self.offset + index * self.stride]
    }
}
