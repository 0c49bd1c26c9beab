//! Triangle enumeration over an index buffer.
//!
//! A [`TriangleIndices`] owns the index buffer of its mesh and walks it one
//! triangle at a time. The two topologies differ only in stride and winding:
//!
//! ```text
//! List : [a b c][d e f] ...          -> (a,b,c) (d,e,f)
//! Strip: a b c d e ...               -> (a,b,c) (b,d,c) (c,d,e) ...
//!                                        even    odd     even
//! ```
//!
//! Odd strip triangles swap their last two indices so every triangle keeps the
//! winding of the first one.

/// How an index buffer is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Every three indices form an independent triangle.
    TriangleList,
    /// Every index after the second forms a triangle with the two before it.
    #[default]
    TriangleStrip,
}

/// Stateful triangle iterator bound to a mesh's index buffer.
///
/// Deliberately not `Clone`: exactly one cursor exists per mesh and it is
/// rebuilt whenever the mesh's indices change.
#[derive(Debug)]
pub enum TriangleIndices {
    List { indices: Vec<u32>, current: usize },
    Strip { indices: Vec<u32>, current: usize },
}

impl TriangleIndices {
    pub fn new(indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        match topology {
            PrimitiveTopology::TriangleList => Self::List {
                indices,
                current: 0,
            },
            PrimitiveTopology::TriangleStrip => Self::Strip {
                indices,
                current: 0,
            },
        }
    }

    pub fn topology(&self) -> PrimitiveTopology {
        match self {
            Self::List { .. } => PrimitiveTopology::TriangleList,
            Self::Strip { .. } => PrimitiveTopology::TriangleStrip,
        }
    }

    pub fn indices(&self) -> &[u32] {
        match self {
            Self::List { indices, .. } | Self::Strip { indices, .. } => indices,
        }
    }

    /// Returns true while at least one more triangle can be produced.
    pub fn has_next(&self) -> bool {
        match self {
            Self::List { indices, current } => current + 3 <= indices.len(),
            Self::Strip { indices, current } => current + 2 < indices.len(),
        }
    }

    /// Returns the triangle at the cursor and advances it.
    pub fn next_triangle(&mut self) -> Option<[u32; 3]> {
        if !self.has_next() {
            return None;
        }
        match self {
            Self::List { indices, current } => {
                let i = *current;
                *current += 3;
                Some([indices[i], indices[i + 1], indices[i + 2]])
            }
            Self::Strip { indices, current } => {
                let i = *current;
                *current += 1;
                if i % 2 == 0 {
                    Some([indices[i], indices[i + 1], indices[i + 2]])
                } else {
                    Some([indices[i], indices[i + 2], indices[i + 1]])
                }
            }
        }
    }

    /// Moves the cursor back to the first triangle.
    pub fn reset(&mut self) {
        match self {
            Self::List { current, .. } | Self::Strip { current, .. } => *current = 0,
        }
    }

    /// Number of triangles a full pass yields, degenerate ones included.
    pub fn triangle_count(&self) -> usize {
        let len = self.indices().len();
        match self {
            Self::List { .. } => len / 3,
            Self::Strip { .. } => len.saturating_sub(2),
        }
    }
}

impl Iterator for TriangleIndices {
    type Item = [u32; 3];

    fn next(&mut self) -> Option<Self::Item> {
        self.next_triangle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_yields_consecutive_triples() {
        let mut it = TriangleIndices::new(vec![3, 0, 4, 1, 5, 2], PrimitiveTopology::TriangleList);
        assert_eq!(it.next_triangle(), Some([3, 0, 4]));
        assert_eq!(it.next_triangle(), Some([1, 5, 2]));
        assert!(!it.has_next());
        assert_eq!(it.next_triangle(), None);
    }

    #[test]
    fn list_ignores_trailing_partial_triangle() {
        let it = TriangleIndices::new(vec![0, 1, 2, 3, 4], PrimitiveTopology::TriangleList);
        assert_eq!(it.collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn strip_swaps_last_two_on_odd_steps() {
        let it = TriangleIndices::new(vec![3, 0, 4, 1, 5, 2], PrimitiveTopology::TriangleStrip);
        assert_eq!(it.triangle_count(), 4);
        assert_eq!(
            it.collect::<Vec<_>>(),
            vec![[3, 0, 4], [0, 1, 4], [4, 1, 5], [1, 2, 5]]
        );
    }

    #[test]
    fn strip_shorter_than_a_triangle_is_empty() {
        let mut it = TriangleIndices::new(vec![0, 1], PrimitiveTopology::TriangleStrip);
        assert!(!it.has_next());
        assert_eq!(it.next_triangle(), None);

        let mut empty = TriangleIndices::new(Vec::new(), PrimitiveTopology::TriangleStrip);
        assert!(!empty.has_next());
        assert_eq!(empty.next_triangle(), None);
    }

    #[test]
    fn reset_restarts_iteration() {
        let mut it = TriangleIndices::new(vec![0, 1, 2, 3], PrimitiveTopology::TriangleStrip);
        assert_eq!(it.by_ref().count(), 2);
        assert!(!it.has_next());
        it.reset();
        assert_eq!(it.next_triangle(), Some([0, 1, 2]));
    }
}
