use std::hash::{Hash, Hasher};

/// Bit pattern of `value` with all zeros and all NaNs folded onto one
/// representative each, so that it can back both `Eq` and `Hash`.
pub(crate) fn canonical_bits(value: f64) -> u64 {
	if value == 0.0 {
		0
	} else if value.is_nan() {
		f64::NAN.to_bits()
	} else {
		value.to_bits()
	}
}

pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
	canonical_bits(value).hash(state);
}
