use super::GeoValue;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// String-keyed property map of a feature.
///
/// Every key is stored in its string form. Two maps are equal when they hold the
/// same key/value pairs, regardless of the order in which they were inserted.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct GeoProperties {
	properties: BTreeMap<String, GeoValue>,
}

impl GeoProperties {
	pub fn new() -> GeoProperties {
		GeoProperties {
			properties: BTreeMap::new(),
		}
	}

	/// Inserts a value, coercing `key` to a string. Returns the previous value, if any.
	pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<GeoValue>
	where
		K: ToString,
		GeoValue: From<V>,
	{
		self.properties.insert(key.to_string(), GeoValue::from(value))
	}

	pub fn remove<K: ToString + ?Sized>(&mut self, key: &K) -> Option<GeoValue> {
		self.properties.remove(&key.to_string())
	}

	/// Looks up a value, coercing `key` to a string first.
	pub fn get<K: ToString + ?Sized>(&self, key: &K) -> Option<&GeoValue> {
		self.properties.get(&key.to_string())
	}

	pub fn contains_key<K: ToString + ?Sized>(&self, key: &K) -> bool {
		self.properties.contains_key(&key.to_string())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.properties.keys().map(String::as_str)
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, GeoValue> {
		self.properties.iter()
	}

	pub fn len(&self) -> usize {
		self.properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, GeoValue);
	type IntoIter = btree_map::IntoIter<String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.into_iter()
	}
}

impl<'a> IntoIterator for &'a GeoProperties {
	type Item = (&'a String, &'a GeoValue);
	type IntoIter = btree_map::Iter<'a, String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.iter()
	}
}

impl<K, V> FromIterator<(K, V)> for GeoProperties
where
	K: ToString,
	GeoValue: From<V>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		GeoProperties {
			properties: iter
				.into_iter()
				.map(|(k, v)| (k.to_string(), GeoValue::from(v)))
				.collect(),
		}
	}
}

impl<K, V> From<Vec<(K, V)>> for GeoProperties
where
	K: ToString,
	GeoValue: From<V>,
{
	fn from(value: Vec<(K, V)>) -> Self {
		value.into_iter().collect()
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for GeoProperties
where
	K: ToString,
	GeoValue: From<V>,
{
	fn from(value: [(K, V); N]) -> Self {
		value.into_iter().collect()
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.properties.iter()).finish()
	}
}
