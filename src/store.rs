// 🗂️ Record Store - ordered personas behind a trait
// Controllers only see `PersonaStore`, so tests can hand them any double

use crate::persona::Persona;

// ============================================================================
// DUPLICATE CHECK
// ============================================================================

/// Index of a record field-equal to `candidate`, skipping `exclude`.
///
/// Edits pass the row being edited as `exclude` so an unchanged edit does not
/// collide with itself.
pub fn find_duplicate(
    records: &[Persona],
    candidate: &Persona,
    exclude: Option<usize>,
) -> Option<usize> {
    records
        .iter()
        .enumerate()
        .find(|(i, record)| Some(*i) != exclude && *record == candidate)
        .map(|(i, _)| i)
}

// ============================================================================
// STORE TRAIT
// ============================================================================

pub trait PersonaStore {
    /// Append at the end; iteration order is insertion order.
    fn add(&mut self, persona: Persona);

    fn remove_at(&mut self, index: usize) -> Option<Persona>;

    fn get(&self, index: usize) -> Option<&Persona>;

    /// In-place access for edits.
    fn get_mut(&mut self, index: usize) -> Option<&mut Persona>;

    fn as_slice(&self) -> &[Persona];

    /// Remove the first record equal to `persona`.
    fn remove(&mut self, persona: &Persona) -> bool {
        match self.as_slice().iter().position(|p| p == persona) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    fn iter(&self) -> std::slice::Iter<'_, Persona> {
        self.as_slice().iter()
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn contains_duplicate(&self, candidate: &Persona, exclude: Option<usize>) -> bool {
        find_duplicate(self.as_slice(), candidate, exclude).is_some()
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    records: Vec<Persona>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> Vec<Persona> {
        self.records
    }
}

impl From<Vec<Persona>> for MemoryStore {
    fn from(records: Vec<Persona>) -> Self {
        MemoryStore { records }
    }
}

impl PersonaStore for MemoryStore {
    fn add(&mut self, persona: Persona) {
        self.records.push(persona);
    }

    fn remove_at(&mut self, index: usize) -> Option<Persona> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    fn get(&self, index: usize) -> Option<&Persona> {
        self.records.get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Persona> {
        self.records.get_mut(index)
    }

    fn as_slice(&self) -> &[Persona] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> MemoryStore {
        MemoryStore::from(vec![
            Persona::new("Ana", "Ruiz", 30),
            Persona::new("Luis", "Gómez", 42),
        ])
    }

    #[test]
    fn test_find_duplicate() {
        let store = sample_store();
        let ana = Persona::new("Ana", "Ruiz", 30);

        assert_eq!(find_duplicate(store.as_slice(), &ana, None), Some(0));
        assert!(store.contains_duplicate(&ana, None));
        assert!(!store.contains_duplicate(&Persona::new("Ana", "Ruiz", 31), None));
    }

    #[test]
    fn test_excluded_row_is_not_a_duplicate_of_itself() {
        let store = sample_store();
        let ana = Persona::new("Ana", "Ruiz", 30);

        assert!(!store.contains_duplicate(&ana, Some(0)));
        // Still a duplicate when editing a different row
        assert!(store.contains_duplicate(&ana, Some(1)));
    }

    #[test]
    fn test_insertion_order() {
        let mut store = MemoryStore::new();
        store.add(Persona::new("B", "B", 2));
        store.add(Persona::new("A", "A", 1));

        let names: Vec<&str> = store.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_by_index_and_by_value() {
        let mut store = sample_store();

        assert_eq!(store.remove_at(5), None);
        assert!(store.remove(&Persona::new("Luis", "Gómez", 42)));
        assert!(!store.remove(&Persona::new("Luis", "Gómez", 42)));
        assert_eq!(store.remove_at(0), Some(Persona::new("Ana", "Ruiz", 30)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_in_place_update() {
        let mut store = sample_store();

        if let Some(record) = store.get_mut(1) {
            record.age = 43;
        }

        assert_eq!(store.get(1), Some(&Persona::new("Luis", "Gómez", 43)));
        assert_eq!(store.into_inner().len(), 2);
    }
}
