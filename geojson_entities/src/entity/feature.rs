use super::{EntityGeometry, GeoProperties, GeoValue};
use log::trace;
use std::{
	any::Any,
	fmt::Debug,
	hash::{Hash, Hasher},
};

/// An immutable GeoJSON feature: an optional geometry, an optional id and a
/// property map.
///
/// Once built, nothing about a feature can change. Property reads hand out
/// either a borrowed value or a full copy of the map, never a mutable view.
#[derive(Clone)]
pub struct Feature<G = geo::Geometry<f64>> {
	geometry: Option<G>,
	id: Option<GeoValue>,
	properties: GeoProperties,
}

impl<G: EntityGeometry> Feature<G> {
	/// Creates a feature. Every property key is coerced to its string form,
	/// values are stored as they are.
	pub fn new<I, K, V>(geometry: Option<G>, id: Option<GeoValue>, properties: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: ToString,
		GeoValue: From<V>,
	{
		let properties: GeoProperties = properties.into_iter().collect();
		trace!("new feature: id={id:?}, {} properties", properties.len());
		Self {
			geometry,
			id,
			properties,
		}
	}

	/// Creates a feature without id and properties.
	pub fn from_geometry(geometry: G) -> Self {
		Self::new(Some(geometry), None, GeoProperties::new())
	}

	pub fn geometry(&self) -> Option<&G> {
		self.geometry.as_ref()
	}

	pub fn id(&self) -> Option<&GeoValue> {
		self.id.as_ref()
	}

	/// Returns a copy of the property map.
	pub fn properties(&self) -> GeoProperties {
		self.properties.clone()
	}

	/// Value of the property `key`, after coercing `key` to a string.
	pub fn property<K: ToString + ?Sized>(&self, key: &K) -> Option<&GeoValue> {
		self.properties.get(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.properties.keys()
	}

	/// Equal geometry (by [`EntityGeometry::strict_eq`]), id and properties.
	pub fn strict_eq(&self, other: &Self) -> bool {
		self.eq_with(other, G::strict_eq)
	}

	/// Equal geometry (by [`EntityGeometry::loose_eq`]), id and properties.
	pub fn loose_eq(&self, other: &Self) -> bool {
		self.eq_with(other, G::loose_eq)
	}

	/// Like [`Feature::strict_eq`], but `false` for anything that is not a `Feature<G>`.
	pub fn strict_eq_dyn(&self, other: &dyn Any) -> bool {
		other.downcast_ref::<Self>().is_some_and(|other| self.strict_eq(other))
	}

	/// Like [`Feature::loose_eq`], but `false` for anything that is not a `Feature<G>`.
	pub fn loose_eq_dyn(&self, other: &dyn Any) -> bool {
		other.downcast_ref::<Self>().is_some_and(|other| self.loose_eq(other))
	}

	fn eq_with(&self, other: &Self, geometry_eq: impl Fn(&G, &G) -> bool) -> bool {
		let geometry_matches = match (&self.geometry, &other.geometry) {
			(Some(a), Some(b)) => geometry_eq(a, b),
			(None, None) => true,
			_ => false,
		};
		geometry_matches && self.id == other.id && self.properties == other.properties
	}
}

impl<G: EntityGeometry> PartialEq for Feature<G> {
	fn eq(&self, other: &Self) -> bool {
		self.strict_eq(other)
	}
}

impl<G: EntityGeometry> Eq for Feature<G> {}

impl<G: EntityGeometry> Hash for Feature<G> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		match &self.geometry {
			Some(geometry) => {
				state.write_u8(1);
				geometry.strict_hash(state);
			}
			None => state.write_u8(0),
		}
		self.id.hash(state);
		self.properties.hash(state);
	}
}

impl<G: EntityGeometry> Debug for Feature<G> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Feature")
			.field("id", &self.id)
			.field("geometry", &self.geometry)
			.field("properties", &self.properties)
			.finish()
	}
}
