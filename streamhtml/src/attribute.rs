use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

/// A key-value pair for an HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'bump> {
    /// The key of the attribute.
    pub key: BumpString<'bump>,
    /// The value of the attribute. Written between double quotes without escaping.
    pub value: BumpString<'bump>,
}
impl<'bump> Attribute<'bump> {
    /// Create a new attribute with a key and value.
    pub fn new(bump: &'bump Bump, key: &str, value: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: BumpString::from_str_in(value, bump),
        }
    }
}

/// The attributes of one element, with unique keys.
///
/// Keys keep the position where they were first seen; assigning an existing key again
/// replaces its value in place. Two maps built from the same pairs therefore always
/// render identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMap<'bump> {
    attributes: BumpVec<'bump, Attribute<'bump>>,
}
impl<'bump> AttributeMap<'bump> {
    /// Create an empty map.
    pub fn new_in(bump: &'bump Bump) -> Self {
        Self {
            attributes: BumpVec::new_in(bump),
        }
    }

    /// Build a map from a flat list interpreted pairwise as `key, value, key, value, ...`.
    ///
    /// If the list has an odd length, the trailing unpaired item is dropped and returned
    /// alongside the map so the caller can report it.
    pub fn from_pairs<'s>(
        bump: &'bump Bump,
        pairs: impl IntoIterator<Item = &'s str>,
    ) -> (Self, Option<&'s str>) {
        let mut map = Self::new_in(bump);
        let dropped = map.extend_pairs(pairs);
        (map, dropped)
    }

    /// Add pairs from a flat `key, value, ...` list, returning the unpaired trailing item if any.
    pub fn extend_pairs<'s>(&mut self, pairs: impl IntoIterator<Item = &'s str>) -> Option<&'s str> {
        let mut pairs = pairs.into_iter();
        while let Some(key) = pairs.next() {
            match pairs.next() {
                Some(value) => self.insert(key, value),
                None => return Some(key),
            }
        }
        None
    }

    /// Set `key` to `value`, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: &str, value: &str) {
        let bump = self.attributes.bump();
        match self.attributes.iter_mut().find(|a| a.key.as_str() == key) {
            Some(existing) => existing.value = BumpString::from_str_in(value, bump),
            None => self.attributes.push(Attribute::new(bump, key, value)),
        }
    }

    /// Get the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key.as_str() == key)
            .map(|a| a.value.as_str())
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over the attributes in render order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute<'bump>> {
        self.attributes.iter()
    }

    /// Append ` key="value"` for every attribute.
    pub(crate) fn write_to(&self, out: &mut String) {
        for Attribute { key, value } in self.attributes.iter() {
            out.push(' ');
            out.push_str(key.as_str());
            out.push_str("=\"");
            out.push_str(value.as_str());
            out.push('"');
        }
    }
}
