//! Name-indexed catalogs.
//!
//! Entries are looked up by exact name. The index is built once, when the
//! catalog is constructed, and construction fails on the first repeated name
//! so a lookup can never be ambiguous.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};

/// An entry that can live in a [`Catalog`].
pub trait Named {
    /// Catalog label used in error messages.
    const CATALOG: &'static str;

    /// The entry's unique name.
    fn name(&self) -> &str;
}

/// An ordered collection of uniquely named entries.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    by_name: HashMap<String, usize>,
}

impl<T: Named> Catalog<T> {
    /// Build a catalog, rejecting duplicate names.
    pub fn new(entries: Vec<T>) -> CoreResult<Self> {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if by_name.insert(entry.name().to_string(), index).is_some() {
                return Err(CoreError::DuplicateName {
                    catalog: T::CATALOG,
                    name: entry.name().to_string(),
                });
            }
        }
        Ok(Self { entries, by_name })
    }

    /// Find an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Returns true if an entry with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterate over entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Entries in catalog order.
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassDef;

    #[test]
    fn lookup_by_exact_name() {
        let catalog = Catalog::new(vec![ClassDef::new("Fighter"), ClassDef::new("Mage")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Mage").unwrap().name, "Mage");
        assert!(catalog.get("mage").is_none());
        assert!(catalog.contains("Fighter"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = Catalog::new(vec![ClassDef::new("Fighter"), ClassDef::new("Fighter")]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DuplicateName { catalog: "class", ref name } if name == "Fighter"
        ));
    }

    #[test]
    fn preserves_order() {
        let catalog = Catalog::new(vec![
            ClassDef::new("Cleric"),
            ClassDef::new("Druid"),
            ClassDef::new("Rogue"),
        ])
        .unwrap();
        let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cleric", "Druid", "Rogue"]);
    }
}
