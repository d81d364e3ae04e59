use ahash::AHashMap;

use crate::engine::types::DimValue;

/// Ingest-time dictionary for one dimension.
///
/// Ids are assigned in first-seen order and never change. Values are interned so every
/// fact key referencing the same value shares one allocation.
#[derive(Debug, Default, Clone)]
pub struct DimensionDictionary {
    ids: AHashMap<DimValue, u32>,
    values: Vec<DimValue>,
    min_value: Option<DimValue>,
    max_value: Option<DimValue>,
}

impl DimensionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id and interned handle for `value`, assigning a new id when unseen.
    pub fn add(&mut self, value: &str) -> (u32, DimValue) {
        if let Some((interned, id)) = self.ids.get_key_value(value) {
            return (*id, interned.clone());
        }

        let id = self.values.len() as u32;
        let interned: DimValue = DimValue::from(value);
        self.ids.insert(interned.clone(), id);
        self.values.push(interned.clone());

        if self.min_value.as_ref().is_none_or(|min| interned < *min) {
            self.min_value = Some(interned.clone());
        }
        if self.max_value.as_ref().is_none_or(|max| interned > *max) {
            self.max_value = Some(interned.clone());
        }
        (id, interned)
    }

    pub fn id_of(&self, value: &str) -> Option<u32> {
        self.ids.get(value).copied()
    }

    pub fn value_of(&self, id: u32) -> Option<&DimValue> {
        self.values.get(id as usize)
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min_value(&self) -> Option<&str> {
        self.min_value.as_deref()
    }

    pub fn max_value(&self) -> Option<&str> {
        self.max_value.as_deref()
    }
}
