use serde::{Deserialize, Serialize};

/// How struct-to-map conversion treats absent nested reference fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NilRefPolicy {
	/// Leave the key out of the produced mapping.
	#[default]
	Omit,
	/// Emit the key with an absent value.
	Null,
}

/// Behavior switches for mapping and scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
	/// Decode object/array text bound for container destinations.
	pub decode_structured_text: bool,
	/// Treatment of absent nested reference fields in struct-to-map conversion.
	pub nil_ref_fields: NilRefPolicy,
	/// Reuse per-struct match plans from the process-wide cache.
	pub cache_plans: bool,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			decode_structured_text: true,
			nil_ref_fields: NilRefPolicy::Omit,
			cache_plans: true,
		}
	}
}

impl ScanOptions {
	/// Preset that keeps text opaque and emits every field.
	pub fn literal() -> Self {
		Self {
			decode_structured_text: false,
			nil_ref_fields: NilRefPolicy::Null,
			cache_plans: true,
		}
	}
}
