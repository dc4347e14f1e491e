use super::{EntityGeometry, Feature};
use crate::factory::downcast_entity;
use log::debug;
use std::{
	any::Any,
	fmt::Debug,
	hash::{Hash, Hasher},
	slice,
};

/// An immutable, ordered sequence of features.
#[derive(Clone)]
pub struct FeatureCollection<G = geo::Geometry<f64>> {
	features: Vec<Feature<G>>,
}

impl<G: EntityGeometry> FeatureCollection<G> {
	pub fn new<I>(features: I) -> Self
	where
		I: IntoIterator<Item = Feature<G>>,
	{
		Self {
			features: features.into_iter().collect(),
		}
	}

	/// Builds a collection from arbitrary candidates, keeping only the features.
	///
	/// A candidate is kept when it is a `Feature<G>`, or a `Box<dyn Any>` holding
	/// one. Anything else is dropped without error.
	pub fn from_candidates<I>(candidates: I) -> Self
	where
		I: IntoIterator,
		I::Item: Any,
	{
		let mut dropped = 0usize;
		let features = candidates
			.into_iter()
			.filter_map(|candidate| {
				let feature = downcast_entity::<Feature<G>, _>(candidate);
				if feature.is_none() {
					dropped += 1;
				}
				feature
			})
			.collect::<Vec<_>>();
		if dropped > 0 {
			debug!("dropped {dropped} non-feature entries, kept {}", features.len());
		}
		Self { features }
	}

	pub fn empty() -> Self {
		Self { features: Vec::new() }
	}

	/// Iterates the features in collection order. Every call starts a new pass.
	pub fn iter(&self) -> slice::Iter<'_, Feature<G>> {
		self.features.iter()
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	/// The feature at `index`, or `None` if out of bounds.
	pub fn get(&self, index: usize) -> Option<&Feature<G>> {
		self.features.get(index)
	}

	pub fn first(&self) -> Option<&Feature<G>> {
		self.features.first()
	}

	pub fn last(&self) -> Option<&Feature<G>> {
		self.features.last()
	}

	pub fn into_features(self) -> Vec<Feature<G>> {
		self.features
	}

	/// Same length and pairwise [`Feature::strict_eq`] in the same order.
	pub fn strict_eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.strict_eq(b))
	}

	/// Same length and pairwise [`Feature::loose_eq`] in the same order.
	pub fn loose_eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.loose_eq(b))
	}

	pub fn strict_eq_dyn(&self, other: &dyn Any) -> bool {
		other.downcast_ref::<Self>().is_some_and(|other| self.strict_eq(other))
	}

	pub fn loose_eq_dyn(&self, other: &dyn Any) -> bool {
		other.downcast_ref::<Self>().is_some_and(|other| self.loose_eq(other))
	}
}

impl<G: EntityGeometry> Default for FeatureCollection<G> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<G: EntityGeometry> PartialEq for FeatureCollection<G> {
	fn eq(&self, other: &Self) -> bool {
		self.strict_eq(other)
	}
}

impl<G: EntityGeometry> Eq for FeatureCollection<G> {}

impl<G: EntityGeometry> Hash for FeatureCollection<G> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.features.hash(state);
	}
}

impl<G: EntityGeometry> FromIterator<Feature<G>> for FeatureCollection<G> {
	fn from_iter<T: IntoIterator<Item = Feature<G>>>(iter: T) -> Self {
		Self {
			features: iter.into_iter().collect(),
		}
	}
}

impl<'a, G: EntityGeometry> IntoIterator for &'a FeatureCollection<G> {
	type Item = &'a Feature<G>;
	type IntoIter = slice::Iter<'a, Feature<G>>;
	fn into_iter(self) -> Self::IntoIter {
		self.features.iter()
	}
}

impl<G: EntityGeometry> IntoIterator for FeatureCollection<G> {
	type Item = Feature<G>;
	type IntoIter = std::vec::IntoIter<Feature<G>>;
	fn into_iter(self) -> Self::IntoIter {
		self.features.into_iter()
	}
}

impl<G: EntityGeometry> Debug for FeatureCollection<G> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("FeatureCollection").field(&self.features).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GeoValue;
	use geo::{Geometry, MultiPoint, Point, point};
	use pretty_assertions::assert_eq;
	use std::collections::hash_map::DefaultHasher;

	fn feature(id: &str, x: f64) -> Feature {
		Feature::new(
			Some(Geometry::from(point!(x: x, y: 0.0))),
			Some(GeoValue::from(id)),
			[("name", id)],
		)
	}

	fn hash_of(collection: &FeatureCollection) -> u64 {
		let mut hasher = DefaultHasher::new();
		collection.hash(&mut hasher);
		hasher.finish()
	}

	#[test]
	fn drops_non_features_and_keeps_order() {
		let f1 = feature("f1", 1.0);
		let f2 = feature("f2", 2.0);
		let candidates: Vec<Box<dyn Any>> = vec![
			Box::new(f1.clone()),
			Box::new("not-a-feature"),
			Box::new(42u64),
			Box::new(f2.clone()),
		];
		let collection = FeatureCollection::<Geometry>::from_candidates(candidates);
		assert_eq!(collection.len(), 2);
		assert_eq!(collection.get(0), Some(&f1));
		assert_eq!(collection.get(1), Some(&f2));
	}

	#[test]
	fn nested_sequences_are_dropped() {
		let candidates: Vec<Box<dyn Any>> = vec![Box::new(feature("f1", 1.0)), Box::new(vec![feature("f2", 2.0)])];
		let collection = FeatureCollection::<Geometry>::from_candidates(candidates);
		assert_eq!(collection.len(), 1);
	}

	#[test]
	fn typed_candidates_are_all_kept() {
		let collection = FeatureCollection::<Geometry>::from_candidates(vec![feature("a", 1.0), feature("b", 2.0)]);
		assert_eq!(collection.len(), 2);
	}

	#[test]
	fn candidates_without_features_give_an_empty_collection() {
		let collection = FeatureCollection::<Geometry>::from_candidates(vec!["a", "b"]);
		assert!(collection.is_empty());
	}

	#[test]
	fn plain_features_are_all_kept() {
		let collection = FeatureCollection::new(vec![feature("a", 1.0), feature("b", 2.0), feature("c", 3.0)]);
		let ids = collection
			.iter()
			.map(|f| f.id().cloned())
			.collect::<Vec<_>>();
		assert_eq!(
			ids,
			vec![Some(GeoValue::from("a")), Some(GeoValue::from("b")), Some(GeoValue::from("c"))]
		);
	}

	#[test]
	fn empty_collection() {
		let collection: FeatureCollection = FeatureCollection::new(Vec::new());
		assert_eq!(collection.len(), 0);
		assert!(collection.is_empty());
		assert_eq!(collection.iter().count(), 0);
		assert_eq!(collection, FeatureCollection::default());
	}

	#[test]
	fn out_of_bounds_access_is_none() {
		let collection = FeatureCollection::new(vec![feature("a", 1.0)]);
		assert_eq!(collection.get(1), None);
		assert_eq!(collection.first(), collection.last());
	}

	#[test]
	fn iteration_is_restartable() {
		let collection = FeatureCollection::new(vec![feature("a", 1.0), feature("b", 2.0)]);
		let first_pass = collection.iter().collect::<Vec<_>>();
		let mut second_pass = Vec::new();
		for feature in &collection {
			second_pass.push(feature);
		}
		assert_eq!(first_pass, second_pass);
		assert_eq!(first_pass.len(), 2);
	}

	#[test]
	fn equality_is_order_sensitive() {
		let f1 = feature("f1", 1.0);
		let f2 = feature("f2", 2.0);
		let forward = FeatureCollection::new(vec![f1.clone(), f2.clone()]);
		let backward = FeatureCollection::new(vec![f2.clone(), f1.clone()]);
		assert!(!forward.strict_eq(&backward));
		assert!(!forward.loose_eq(&backward));
		assert!(forward.strict_eq(&FeatureCollection::new(vec![f1.clone(), f2])));
		assert!(!forward.strict_eq(&FeatureCollection::new(vec![f1])));
	}

	#[test]
	fn equal_collections_hash_equally() {
		let a = FeatureCollection::new(vec![feature("a", 1.0), feature("b", 2.0)]);
		let b = a.clone().into_features().into_iter().collect::<FeatureCollection>();
		assert_eq!(a, b);
		assert_eq!(hash_of(&a), hash_of(&b));
	}

	#[test]
	fn loose_equality_follows_features() {
		let single = FeatureCollection::new(vec![Feature::from_geometry(Geometry::from(Point::new(1.0, 2.0)))]);
		let multi = FeatureCollection::new(vec![Feature::from_geometry(Geometry::from(MultiPoint::from(vec![
			Point::new(1.0, 2.0),
		])))]);
		assert!(single.loose_eq(&multi));
		assert!(!single.strict_eq(&multi));
	}

	#[test]
	fn dynamic_equality_rejects_other_types() {
		let collection = FeatureCollection::new(vec![feature("a", 1.0)]);
		assert!(collection.strict_eq_dyn(&collection.clone()));
		assert!(collection.loose_eq_dyn(&collection.clone()));
		assert!(!collection.strict_eq_dyn(&feature("a", 1.0)));
		assert!(!collection.loose_eq_dyn(&"a"));
	}
}
