//! In-memory corpus

use crate::StoreError;
use hive_domain::traits::{CorpusReader, HexWriter};
use hive_domain::Hex;
use std::collections::BTreeMap;

/// Corpus held in an ordered map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    hexes: BTreeMap<String, Hex>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `hexes`, validating each one
    pub fn with_hexes<I>(hexes: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Hex>,
    {
        let mut store = Self::new();
        store.bulk_save_hexes(hexes.into_iter().collect())?;
        Ok(store)
    }

    /// Number of stored hexes
    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }
}

impl CorpusReader for MemoryStore {
    type Error = StoreError;

    fn all_hexes(&self) -> Result<Vec<Hex>, Self::Error> {
        Ok(self.hexes.values().cloned().collect())
    }

    fn get_hex(&self, id: &str) -> Result<Option<Hex>, Self::Error> {
        Ok(self.hexes.get(id).cloned())
    }

    fn hex_exists(&self, id: &str) -> Result<bool, Self::Error> {
        Ok(self.hexes.contains_key(id))
    }
}

impl HexWriter for MemoryStore {
    type Error = StoreError;

    fn save_hex(&mut self, hex: Hex) -> Result<(), Self::Error> {
        hex.validate()?;
        self.hexes.insert(hex.id.clone(), hex);
        Ok(())
    }

    fn bulk_save_hexes(&mut self, hexes: Vec<Hex>) -> Result<(), Self::Error> {
        // Nothing is written unless every hex is valid
        for hex in &hexes {
            hex.validate()?;
        }
        for hex in hexes {
            self.hexes.insert(hex.id.clone(), hex);
        }
        Ok(())
    }

    fn delete_hex(&mut self, id: &str) -> Result<bool, Self::Error> {
        Ok(self.hexes.remove(id).is_some())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.hexes.clear();
        Ok(())
    }
}
