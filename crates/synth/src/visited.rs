//! Path-sensitive cycle guard

use shape_fixtures_common::ShapeId;

/// Shapes on the active expansion path
///
/// Only ancestors block re-entry; siblings may reuse a shape once its
/// expansion has been popped.
#[derive(Debug, Default)]
pub struct VisitedShapes {
    path: Vec<ShapeId>,
}

impl VisitedShapes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `id` unless it is already on the path
    ///
    /// Returns false when the shape is already being expanded.
    pub fn push(&mut self, id: &ShapeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.path.push(id.clone());
        true
    }

    pub fn pop(&mut self) -> Option<ShapeId> {
        self.path.pop()
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.path.iter().any(|entry| entry == id)
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_rejects_ancestor() {
        let node = ShapeId::new("example#Node");
        let leaf = ShapeId::new("example#Leaf");
        let mut visited = VisitedShapes::new();

        assert!(visited.push(&node));
        assert!(visited.push(&leaf));
        assert!(!visited.push(&node));
        assert_eq!(visited.depth(), 2);
    }

    #[test]
    fn test_pop_allows_sibling_reuse() {
        let leaf = ShapeId::new("example#Leaf");
        let mut visited = VisitedShapes::new();

        assert!(visited.push(&leaf));
        assert_eq!(visited.pop(), Some(leaf.clone()));
        assert!(!visited.contains(&leaf));
        assert!(visited.push(&leaf));
    }
}
