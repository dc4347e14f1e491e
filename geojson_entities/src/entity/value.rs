use crate::utils::{canonical_bits, hash_f64};
use anyhow::{Result, bail};
use std::{
	cmp::Ordering,
	collections::BTreeMap,
	fmt::{Debug, Display},
	hash::Hash,
};

/// A property value or feature id, shaped like the values a GeoJSON decoder produces.
#[derive(Clone)]
pub enum GeoValue {
	Null,
	Bool(bool),
	Int(i64),
	UInt(u64),
	Double(f64),
	String(String),
	Array(Vec<GeoValue>),
	Object(BTreeMap<String, GeoValue>),
}

impl GeoValue {
	pub fn is_null(&self) -> bool {
		matches!(self, GeoValue::Null)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			GeoValue::String(v) => Some(v),
			_ => None,
		}
	}

	fn type_name(&self) -> &'static str {
		match self {
			GeoValue::Null => "null",
			GeoValue::Bool(_) => "bool",
			GeoValue::Int(_) => "int",
			GeoValue::UInt(_) => "uint",
			GeoValue::Double(_) => "double",
			GeoValue::String(_) => "string",
			GeoValue::Array(_) => "array",
			GeoValue::Object(_) => "object",
		}
	}

	fn variant_order(&self) -> u8 {
		match self {
			GeoValue::Null => 0,
			GeoValue::Bool(_) => 1,
			GeoValue::Int(_) => 2,
			GeoValue::UInt(_) => 3,
			GeoValue::Double(_) => 4,
			GeoValue::String(_) => 5,
			GeoValue::Array(_) => 6,
			GeoValue::Object(_) => 7,
		}
	}
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Null => f.debug_tuple("Null").finish(),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::Array(v) => f.debug_tuple("Array").field(v).finish(),
			Self::Object(v) => f.debug_tuple("Object").field(v).finish(),
		}
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::Null => write!(f, "null"),
			GeoValue::Bool(v) => write!(f, "{v}"),
			GeoValue::Int(v) => write!(f, "{v}"),
			GeoValue::UInt(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::String(v) => write!(f, "{v}"),
			GeoValue::Array(v) => {
				write!(f, "[")?;
				for (i, item) in v.iter().enumerate() {
					if i > 0 {
						write!(f, ",")?;
					}
					write!(f, "{item}")?;
				}
				write!(f, "]")
			}
			GeoValue::Object(v) => {
				write!(f, "{{")?;
				for (i, (key, item)) in v.iter().enumerate() {
					if i > 0 {
						write!(f, ",")?;
					}
					write!(f, "{key}:{item}")?;
				}
				write!(f, "}}")
			}
		}
	}
}

impl PartialEq for GeoValue {
	fn eq(&self, other: &Self) -> bool {
		use GeoValue::*;
		match (self, other) {
			(Null, Null) => true,
			(Bool(a), Bool(b)) => a == b,
			(Int(a), Int(b)) => a == b,
			(UInt(a), UInt(b)) => a == b,
			(Int(a), UInt(b)) | (UInt(b), Int(a)) => u64::try_from(*a).is_ok_and(|a| a == *b),
			(Double(a), Double(b)) => canonical_bits(*a) == canonical_bits(*b),
			(String(a), String(b)) => a == b,
			(Array(a), Array(b)) => a == b,
			(Object(a), Object(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for GeoValue {}

impl Hash for GeoValue {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		// non-negative Int hashes like the UInt it equals
		if let GeoValue::Int(v) = self {
			if let Ok(v) = u64::try_from(*v) {
				GeoValue::UInt(v).hash(state);
				return;
			}
		}
		core::mem::discriminant(self).hash(state);
		match self {
			GeoValue::Null => (),
			GeoValue::Bool(v) => v.hash(state),
			GeoValue::Int(v) => v.hash(state),
			GeoValue::UInt(v) => v.hash(state),
			GeoValue::Double(v) => hash_f64(*v, state),
			GeoValue::String(v) => v.hash(state),
			GeoValue::Array(v) => v.hash(state),
			GeoValue::Object(v) => v.hash(state),
		}
	}
}

impl PartialOrd for GeoValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for GeoValue {
	fn cmp(&self, other: &Self) -> Ordering {
		use GeoValue::*;
		match (self, other) {
			(Bool(a), Bool(b)) => a.cmp(b),
			(Int(a), Int(b)) => a.cmp(b),
			(UInt(a), UInt(b)) => a.cmp(b),
			(Int(a), UInt(b)) => i128::from(*a).cmp(&i128::from(*b)),
			(UInt(a), Int(b)) => i128::from(*a).cmp(&i128::from(*b)),
			(Double(a), Double(b)) => f64::from_bits(canonical_bits(*a)).total_cmp(&f64::from_bits(canonical_bits(*b))),
			(String(a), String(b)) => a.cmp(b),
			(Array(a), Array(b)) => a.cmp(b),
			(Object(a), Object(b)) => a.cmp(b),
			_ => self.variant_order().cmp(&other.variant_order()),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<&String> for GeoValue {
	fn from(value: &String) -> Self {
		GeoValue::String(value.clone())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl From<u8> for GeoValue {
	fn from(value: u8) -> Self {
		GeoValue::UInt(u64::from(value))
	}
}

impl From<u32> for GeoValue {
	fn from(value: u32) -> Self {
		GeoValue::UInt(u64::from(value))
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		if value < 0 {
			GeoValue::Int(i64::from(value))
		} else {
			GeoValue::UInt(value as u64)
		}
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		match u64::try_from(value) {
			Ok(value) => GeoValue::UInt(value),
			Err(_) => GeoValue::Int(value),
		}
	}
}

impl From<f32> for GeoValue {
	fn from(value: f32) -> Self {
		GeoValue::Double(f64::from(value))
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl<T> From<Vec<T>> for GeoValue
where
	GeoValue: From<T>,
{
	fn from(value: Vec<T>) -> Self {
		GeoValue::Array(value.into_iter().map(GeoValue::from).collect())
	}
}

impl<T> From<Option<T>> for GeoValue
where
	GeoValue: From<T>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(GeoValue::Null, GeoValue::from)
	}
}

impl From<BTreeMap<String, GeoValue>> for GeoValue {
	fn from(value: BTreeMap<String, GeoValue>) -> Self {
		GeoValue::Object(value)
	}
}

impl TryFrom<&GeoValue> for String {
	type Error = anyhow::Error;
	fn try_from(value: &GeoValue) -> Result<Self> {
		match value {
			GeoValue::String(v) => Ok(v.clone()),
			v => bail!("expected a string, but got {}", v.type_name()),
		}
	}
}

impl TryFrom<&GeoValue> for bool {
	type Error = anyhow::Error;
	fn try_from(value: &GeoValue) -> Result<Self> {
		match value {
			GeoValue::Bool(v) => Ok(*v),
			v => bail!("expected a bool, but got {}", v.type_name()),
		}
	}
}

impl TryFrom<&GeoValue> for i64 {
	type Error = anyhow::Error;
	fn try_from(value: &GeoValue) -> Result<Self> {
		match value {
			GeoValue::Int(v) => Ok(*v),
			GeoValue::UInt(v) => match i64::try_from(*v) {
				Ok(v) => Ok(v),
				Err(_) => bail!("uint {v} does not fit into an i64"),
			},
			v => bail!("expected an integer, but got {}", v.type_name()),
		}
	}
}

impl TryFrom<&GeoValue> for u64 {
	type Error = anyhow::Error;
	fn try_from(value: &GeoValue) -> Result<Self> {
		match value {
			GeoValue::UInt(v) => Ok(*v),
			GeoValue::Int(v) => match u64::try_from(*v) {
				Ok(v) => Ok(v),
				Err(_) => bail!("int {v} is negative"),
			},
			v => bail!("expected an unsigned integer, but got {}", v.type_name()),
		}
	}
}

impl TryFrom<&GeoValue> for f64 {
	type Error = anyhow::Error;
	fn try_from(value: &GeoValue) -> Result<Self> {
		match value {
			GeoValue::Double(v) => Ok(*v),
			GeoValue::Int(v) => Ok(*v as f64),
			GeoValue::UInt(v) => Ok(*v as f64),
			v => bail!("expected a number, but got {}", v.type_name()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::hash_map::DefaultHasher;
	use std::hash::Hasher;

	fn hash_of(value: &GeoValue) -> u64 {
		let mut hasher = DefaultHasher::new();
		value.hash(&mut hasher);
		hasher.finish()
	}

	#[rstest]
	#[case(GeoValue::from(1.0), GeoValue::from(1.0))]
	#[case(GeoValue::from(0.0), GeoValue::from(-0.0))]
	#[case(GeoValue::from(f64::NAN), GeoValue::from(f64::NAN))]
	#[case(GeoValue::from(vec!["a", "b"]), GeoValue::from(vec!["a", "b"]))]
	#[case(GeoValue::from(None::<bool>), GeoValue::Null)]
	#[case(GeoValue::from(5i64), GeoValue::from(5i32))]
	#[case(GeoValue::Int(5), GeoValue::UInt(5))]
	#[case(GeoValue::from(vec![GeoValue::Int(0)]), GeoValue::from(vec![0u64]))]
	fn equal_values_hash_equally(#[case] a: GeoValue, #[case] b: GeoValue) {
		assert_eq!(a, b);
		assert_eq!(hash_of(&a), hash_of(&b));
	}

	#[rstest]
	#[case(GeoValue::Int(-1), GeoValue::UInt(u64::MAX))]
	#[case(GeoValue::from(1.0), GeoValue::from(1u64))]
	#[case(GeoValue::from("1"), GeoValue::from(1u64))]
	#[case(GeoValue::from(vec![1u64, 2]), GeoValue::from(vec![2u64, 1]))]
	fn different_values_are_not_equal(#[case] a: GeoValue, #[case] b: GeoValue) {
		assert_ne!(a, b);
	}

	#[test]
	fn signed_conversions_normalise_non_negative_values() {
		assert!(matches!(GeoValue::from(-3), GeoValue::Int(-3)));
		assert!(matches!(GeoValue::from(3), GeoValue::UInt(3)));
		assert!(matches!(GeoValue::from(-3i64), GeoValue::Int(-3)));
		assert!(matches!(GeoValue::from(3i64), GeoValue::UInt(3)));
	}

	#[test]
	fn signed_and_unsigned_integers_order_by_value() {
		assert_eq!(GeoValue::Int(5).cmp(&GeoValue::UInt(5)), Ordering::Equal);
		assert!(GeoValue::Int(-1) < GeoValue::UInt(0));
		assert!(GeoValue::UInt(u64::MAX) > GeoValue::Int(i64::MAX));
	}

	#[test]
	fn ordering_within_and_across_variants() {
		assert!(GeoValue::from("a") < GeoValue::from("b"));
		assert!(GeoValue::from(1.0) < GeoValue::from(2.0));
		assert!(GeoValue::from(-1i64) < GeoValue::from(1i64));
		assert!(GeoValue::from(false) < GeoValue::from(true));

		assert!(GeoValue::Null < GeoValue::from(false));
		assert!(GeoValue::from(true) < GeoValue::from(0i64));
		assert!(GeoValue::from(9.0) < GeoValue::from("a"));
		assert_eq!(GeoValue::from(0.0).cmp(&GeoValue::from(-0.0)), Ordering::Equal);
	}

	#[test]
	fn display() {
		let mut map = BTreeMap::new();
		map.insert("k".to_string(), GeoValue::from(vec![1u64, 2]));
		assert_eq!(GeoValue::from(map).to_string(), "{k:[1,2]}");
		assert_eq!(GeoValue::Null.to_string(), "null");
		assert_eq!(GeoValue::from("park").to_string(), "park");
		assert_eq!(GeoValue::from(2.5).to_string(), "2.5");
	}

	#[test]
	fn debug() {
		assert_eq!(format!("{:?}", GeoValue::from("x")), "String(\"x\")");
		assert_eq!(format!("{:?}", GeoValue::from(vec![true])), "Array([Bool(true)])");
		let mut map = BTreeMap::new();
		map.insert("k".to_string(), GeoValue::Null);
		assert_eq!(format!("{:?}", GeoValue::from(map)), "Object({\"k\": Null})");
	}

	#[test]
	fn try_from_extracts_matching_variants() -> Result<()> {
		assert_eq!(String::try_from(&GeoValue::from("park"))?, "park");
		assert!(bool::try_from(&GeoValue::from(true))?);
		assert_eq!(i64::try_from(&GeoValue::from(7u64))?, 7);
		assert_eq!(u64::try_from(&GeoValue::from(7i64))?, 7);
		assert_eq!(f64::try_from(&GeoValue::from(3u64))?, 3.0);
		Ok(())
	}

	#[test]
	fn try_from_reports_mismatches() {
		let err = String::try_from(&GeoValue::from(1u64)).unwrap_err();
		assert_eq!(err.to_string(), "expected a string, but got uint");
		assert!(u64::try_from(&GeoValue::from(-1i64)).is_err());
		assert!(i64::try_from(&GeoValue::from(u64::MAX)).is_err());
		assert!(f64::try_from(&GeoValue::Null).is_err());
	}

	#[test]
	fn as_str_and_is_null() {
		assert_eq!(GeoValue::from("a").as_str(), Some("a"));
		assert_eq!(GeoValue::from(1u64).as_str(), None);
		assert!(GeoValue::Null.is_null());
		assert!(!GeoValue::from(false).is_null());
	}
}
