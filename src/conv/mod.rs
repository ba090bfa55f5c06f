mod coerce;
mod dest;
mod error;
mod key;
mod kind;
mod mapper;
mod options;
mod path;
mod plan;
mod record;
mod scan;
mod shape;
mod source;
mod text;
mod value;
mod walk;

/// Scalar coercion entry points and targets.
pub use coerce::{
	ScalarKind, coerce, to_bool, to_bytes, to_complex, to_complex32, to_f32, to_f64, to_i8, to_i16, to_i32, to_i64, to_isize, to_string, to_u8, to_u16,
	to_u32, to_u64, to_usize,
};
/// Destination trait implemented by every scan target.
pub use dest::Destination;
/// Error and result aliases.
pub use error::{ConvertError, Result};
/// Comparable map keys.
pub use key::{Key, MapKey};
/// Runtime value classification.
pub use kind::{Kind, classify};
/// Struct field matching.
pub use mapper::{MatchPlan, scan_record};
/// Conversion options.
pub use options::{NilRefPolicy, ScanOptions};
/// Positional error context.
pub use path::{FieldPath, PathStep};
/// Shape-keyed match plan cache.
pub use plan::PlanCache;
/// Struct layout trait implemented by `record!`.
pub use record::Record;
/// Orchestrating entry points.
pub use scan::{Converter, ScanContext, scan, to_map};
/// Destination shape descriptors.
pub use shape::{FieldDescriptor, Shape, StructDescriptor};
/// Source presentation trait.
pub use source::ToValue;
/// Structured-text detection and decoding.
pub use text::{TextForm, decode, detect};
/// Generic value model.
pub use value::{FieldValue, NativeValue, StructValue, Value};
/// Ordered mapping output.
pub use walk::Mapping;
