/// Typed sparse set storing components of type `T`.
///
/// Uses a sparse array (entity index → dense index) and a dense array
/// (contiguous component data + entity mapping) for O(1) insert/remove/get
/// and cache-friendly iteration.
#[derive(Debug)]
pub struct SparseSet<T> {
    /// `entity_index -> dense_index`. `None` means the entity has no component.
    sparse: Vec<Option<u32>>,
    dense: Vec<T>,
    /// Entity index for each dense element.
    entities: Vec<u32>,
}

impl<T> SparseSet<T> {
    /// Creates a new empty sparse set.
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Inserts a component, returning the previous value if one was replaced.
    pub fn insert(&mut self, entity_index: u32, value: T) -> Option<T> {
        let idx = entity_index as usize;
        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, None);
        }

        match self.sparse[idx] {
            Some(dense_idx) => Some(std::mem::replace(&mut self.dense[dense_idx as usize], value)),
            None => {
                self.sparse[idx] = Some(self.dense.len() as u32);
                self.dense.push(value);
                self.entities.push(entity_index);
                None
            }
        }
    }

    /// Removes a component, or returns `None` if the entity had none.
    pub fn remove(&mut self, entity_index: u32) -> Option<T> {
        let dense_idx = self.sparse.get_mut(entity_index as usize)?.take()? as usize;
        let last = self.dense.len() - 1;

        if dense_idx != last {
            // Swap-remove: the last element moves into the hole.
            let moved = self.entities[last];
            self.sparse[moved as usize] = Some(dense_idx as u32);
        }
        self.entities.swap_remove(dense_idx);
        Some(self.dense.swap_remove(dense_idx))
    }

    pub fn get(&self, entity_index: u32) -> Option<&T> {
        let dense_idx = (*self.sparse.get(entity_index as usize)?)? as usize;
        Some(&self.dense[dense_idx])
    }

    pub fn get_mut(&mut self, entity_index: u32) -> Option<&mut T> {
        let dense_idx = (*self.sparse.get(entity_index as usize)?)? as usize;
        Some(&mut self.dense[dense_idx])
    }

    pub fn contains(&self, entity_index: u32) -> bool {
        matches!(self.sparse.get(entity_index as usize), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Iterate `(entity_index, component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Entity indices in dense order.
    pub fn entities(&self) -> &[u32] {
        &self.entities
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut set = SparseSet::new();
        assert_eq!(set.insert(5, "five"), None);
        assert_eq!(set.get(5), Some(&"five"));
        assert_eq!(set.get(4), None);
        assert_eq!(set.get(100), None);
    }

    #[test]
    fn insert_replace_returns_previous() {
        let mut set = SparseSet::new();
        set.insert(1, 10);
        assert_eq!(set.insert(1, 20), Some(10));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(1), Some(&20));
    }

    #[test]
    fn remove_keeps_others_reachable() {
        let mut set = SparseSet::new();
        set.insert(0, 'a');
        set.insert(1, 'b');
        set.insert(2, 'c');

        assert_eq!(set.remove(0), Some('a'));
        assert_eq!(set.remove(0), None);
        assert_eq!(set.get(1), Some(&'b'));
        assert_eq!(set.get(2), Some(&'c'));
        assert!(!set.contains(0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn iteration_pairs_entities() {
        let mut set = SparseSet::new();
        set.insert(3, 30);
        set.insert(7, 70);
        if let Some(v) = set.get_mut(3) {
            *v += 1;
        }
        let pairs: Vec<(u32, i32)> = set.iter().map(|(e, v)| (e, *v)).collect();
        assert_eq!(pairs, vec![(3, 31), (7, 70)]);
        assert_eq!(set.entities(), &[3, 7]);
    }
}
