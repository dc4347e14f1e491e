use super::EntityFactory;
use crate::{Feature, FeatureCollection, GeoProperties, GeoValue};
use geo::Geometry;
use log::debug;
use std::{any::Any, sync::LazyLock};

static INSTANCE: LazyLock<DefaultEntityFactory> = LazyLock::new(|| {
	debug!("initializing default entity factory");
	DefaultEntityFactory
});

/// Factory for [`Feature`] and [`FeatureCollection`] over `geo` geometries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultEntityFactory;

impl EntityFactory for DefaultEntityFactory {
	type Geometry = Geometry<f64>;
	type Feature = Feature<Geometry<f64>>;
	type FeatureCollection = FeatureCollection<Geometry<f64>>;

	/// Created on first use, safely even when first used from several threads.
	fn instance() -> &'static DefaultEntityFactory {
		&INSTANCE
	}

	fn feature(
		&self,
		geometry: Option<Self::Geometry>,
		id: Option<GeoValue>,
		properties: Option<GeoProperties>,
	) -> Self::Feature {
		Feature::new(geometry, id, properties.unwrap_or_default())
	}

	fn feature_collection<I>(&self, candidates: I) -> Self::FeatureCollection
	where
		I: IntoIterator,
		I::Item: Any,
	{
		FeatureCollection::from_candidates(candidates)
	}

	fn map_feature_collection<T, F>(&self, collection: &Self::FeatureCollection, f: F) -> Vec<T>
	where
		F: FnMut(&Self::Feature) -> T,
	{
		collection.iter().map(f).collect()
	}

	fn get_feature_geometry<'a>(&self, feature: &'a Self::Feature) -> Option<&'a Self::Geometry> {
		feature.geometry()
	}

	fn get_feature_id<'a>(&self, feature: &'a Self::Feature) -> Option<&'a GeoValue> {
		feature.id()
	}

	fn get_feature_properties(&self, feature: &Self::Feature) -> GeoProperties {
		feature.properties()
	}
}
