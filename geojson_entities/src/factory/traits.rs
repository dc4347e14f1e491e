use crate::{GeoProperties, GeoValue};
use std::any::Any;

/// Everything a GeoJSON codec may do with entities.
///
/// Decoders build features and collections through [`EntityFactory::feature`] and
/// [`EntityFactory::feature_collection`], encoders read them back through the
/// accessors. Neither side touches the entity types directly, so supplying a
/// different factory swaps the whole entity representation.
pub trait EntityFactory {
	type Geometry;
	type Feature: Any;
	type FeatureCollection: Any;

	/// The process-wide instance of this factory.
	fn instance() -> &'static Self
	where
		Self: Sized;

	/// Creates a feature. Missing properties mean an empty map.
	fn feature(
		&self,
		geometry: Option<Self::Geometry>,
		id: Option<GeoValue>,
		properties: Option<GeoProperties>,
	) -> Self::Feature;

	/// Creates a collection from arbitrary candidates. Candidates that are not
	/// features of this factory are dropped.
	fn feature_collection<I>(&self, candidates: I) -> Self::FeatureCollection
	where
		I: IntoIterator,
		I::Item: Any;

	/// Whether `object` is a feature created by this factory. A `Box<dyn Any>`
	/// is looked into once, as [`EntityFactory::feature_collection`] does.
	fn is_feature(&self, object: &dyn Any) -> bool {
		unbox_any(object).is::<Self::Feature>()
	}

	/// Whether `object` is a feature collection created by this factory. A
	/// `Box<dyn Any>` is looked into once.
	fn is_feature_collection(&self, object: &dyn Any) -> bool {
		unbox_any(object).is::<Self::FeatureCollection>()
	}

	/// Applies `f` to every feature of `collection`, in collection order.
	fn map_feature_collection<T, F>(&self, collection: &Self::FeatureCollection, f: F) -> Vec<T>
	where
		F: FnMut(&Self::Feature) -> T;

	fn get_feature_geometry<'a>(&self, feature: &'a Self::Feature) -> Option<&'a Self::Geometry>;

	fn get_feature_id<'a>(&self, feature: &'a Self::Feature) -> Option<&'a GeoValue>;

	/// Returns a copy of the feature's properties. Editing it leaves the feature untouched.
	fn get_feature_properties(&self, feature: &Self::Feature) -> GeoProperties;
}

/// The value behind `object` if it is a `Box<dyn Any>`, otherwise `object` itself.
pub fn unbox_any(object: &dyn Any) -> &dyn Any {
	match object.downcast_ref::<Box<dyn Any>>() {
		Some(inner) => &**inner,
		None => object,
	}
}

/// Recovers a `T` from a candidate entity: either a `T` itself or a
/// `Box<dyn Any>` holding one. Factories use it to filter candidates in
/// [`EntityFactory::feature_collection`].
pub fn downcast_entity<T: Any, A: Any>(candidate: A) -> Option<T> {
	let boxed: Box<dyn Any> = Box::new(candidate);
	let boxed = match boxed.downcast::<Box<dyn Any>>() {
		Ok(inner) => *inner,
		Err(boxed) => boxed,
	};
	boxed.downcast::<T>().ok().map(|entity| *entity)
}
