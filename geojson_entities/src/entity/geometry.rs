use crate::utils::{canonical_bits, hash_f64};
use approx::relative_eq;
use geo::{CoordsIter, Geometry, HasDimensions};
use std::{
	fmt::Debug,
	hash::{Hash, Hasher},
};

/// Relative tolerance used by [`EntityGeometry::loose_eq`] for `geo` geometries.
pub const LOOSE_MAX_RELATIVE: f64 = 1e-9;

/// Comparison capabilities a geometry must provide to be wrapped by a feature.
///
/// Features never look inside their geometry. They only delegate to these
/// two equality notions, which may disagree for the same pair of geometries.
pub trait EntityGeometry: Clone + Debug + 'static {
	/// Canonical equality: same representation, same coordinates.
	fn strict_eq(&self, other: &Self) -> bool;

	/// Value equality: may accept differences in precision or framing that
	/// `strict_eq` rejects.
	fn loose_eq(&self, other: &Self) -> bool;

	/// Feeds the geometry into `state`. Geometries that are `strict_eq` must
	/// produce the same hash.
	fn strict_hash<H: Hasher>(&self, state: &mut H);
}

impl EntityGeometry for Geometry<f64> {
	/// Same variant, same nesting, and bitwise equal coordinates once zeros
	/// and NaNs are folded. Unlike `PartialEq`, a geometry with a NaN
	/// coordinate equals itself.
	fn strict_eq(&self, other: &Self) -> bool {
		if core::mem::discriminant(self) != core::mem::discriminant(other)
			|| self.coords_count() != other.coords_count()
			|| shape(self) != shape(other)
		{
			return false;
		}
		self.coords_iter().zip(other.coords_iter()).all(|(a, b)| {
			canonical_bits(a.x) == canonical_bits(b.x) && canonical_bits(a.y) == canonical_bits(b.y)
		})
	}

	/// Same dimension and the same coordinate sequence within
	/// [`LOOSE_MAX_RELATIVE`], whatever the variant. A `Point` therefore
	/// equals a `MultiPoint` holding only that point.
	fn loose_eq(&self, other: &Self) -> bool {
		if self.dimensions() != other.dimensions() || self.coords_count() != other.coords_count() {
			return false;
		}
		self.coords_iter().zip(other.coords_iter()).all(|(a, b)| {
			relative_eq!(a.x, b.x, max_relative = LOOSE_MAX_RELATIVE)
				&& relative_eq!(a.y, b.y, max_relative = LOOSE_MAX_RELATIVE)
		})
	}

	fn strict_hash<H: Hasher>(&self, state: &mut H) {
		core::mem::discriminant(self).hash(state);
		shape(self).hash(state);
		for coord in self.coords_iter() {
			hash_f64(coord.x, state);
			hash_f64(coord.y, state);
		}
	}
}

/// Component lengths of a geometry, so that flattened coordinate sequences
/// of differently nested geometries do not compare equal.
fn shape(geometry: &Geometry<f64>) -> Vec<usize> {
	let mut shape = Vec::new();
	push_shape(geometry, &mut shape);
	shape
}

fn push_shape(geometry: &Geometry<f64>, shape: &mut Vec<usize>) {
	let push_polygon = |polygon: &geo::Polygon<f64>, shape: &mut Vec<usize>| {
		shape.push(polygon.interiors().len());
		shape.push(polygon.exterior().0.len());
		shape.extend(polygon.interiors().iter().map(|ring| ring.0.len()));
	};
	match geometry {
		Geometry::Point(_) | Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {}
		Geometry::LineString(line) => shape.push(line.0.len()),
		Geometry::Polygon(polygon) => push_polygon(polygon, shape),
		Geometry::MultiPoint(points) => shape.push(points.0.len()),
		Geometry::MultiLineString(lines) => {
			shape.push(lines.0.len());
			shape.extend(lines.0.iter().map(|line| line.0.len()));
		}
		Geometry::MultiPolygon(polygons) => {
			shape.push(polygons.0.len());
			for polygon in &polygons.0 {
				push_polygon(polygon, shape);
			}
		}
		Geometry::GeometryCollection(collection) => {
			shape.push(collection.0.len());
			for child in &collection.0 {
				shape.push(variant_index(child));
				push_shape(child, shape);
			}
		}
	}
}

fn variant_index(geometry: &Geometry<f64>) -> usize {
	match geometry {
		Geometry::Point(_) => 0,
		Geometry::Line(_) => 1,
		Geometry::LineString(_) => 2,
		Geometry::Polygon(_) => 3,
		Geometry::MultiPoint(_) => 4,
		Geometry::MultiLineString(_) => 5,
		Geometry::MultiPolygon(_) => 6,
		Geometry::GeometryCollection(_) => 7,
		Geometry::Rect(_) => 8,
		Geometry::Triangle(_) => 9,
	}
}
