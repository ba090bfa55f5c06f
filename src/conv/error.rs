use thiserror::Error;

use crate::conv::{FieldPath, Kind, PathStep};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors produced while materializing mappings or scanning into destinations.
#[derive(Debug, Error)]
pub enum ConvertError {
	/// Destination shape cannot receive a scan.
	#[error("invalid destination: expected map, struct or slice, got {shape}")]
	InvalidDestination {
		/// Rendered destination shape.
		shape: String,
	},
	/// Source and destination kinds cannot be bridged.
	#[error("incompatible shape: cannot convert {from} into {to}")]
	IncompatibleShape {
		/// Classified source kind.
		from: Kind,
		/// Rendered destination shape.
		to: String,
	},
	/// Structured text looked like an object or array but failed to decode.
	#[error("json decode failed: {0}")]
	JsonDecode(#[from] serde_json::Error),
	/// A container could not be rendered as JSON text.
	#[error("json encode failed: {source}")]
	JsonEncode {
		/// Serializer diagnostic.
		source: serde_json::Error,
	},
	/// Scalar coercion is impossible for the source kind.
	#[error("conversion failed: cannot coerce {from} to {to}")]
	Conversion {
		/// Classified source kind.
		from: Kind,
		/// Requested scalar target.
		to: &'static str,
	},
	/// Failure nested inside a map entry, struct field or slice element.
	#[error("at {path}: {source}")]
	At {
		/// Location of the failing element, outermost first.
		path: FieldPath,
		/// Underlying failure.
		source: Box<ConvertError>,
	},
}

impl ConvertError {
	/// Attach an outer path step, merging with existing positional context.
	pub fn at(self, step: PathStep) -> Self {
		match self {
			ConvertError::At { mut path, source } => {
				path.push_front(step);
				ConvertError::At { path, source }
			}
			other => ConvertError::At {
				path: FieldPath::single(step),
				source: Box::new(other),
			},
		}
	}

	/// Innermost failure without positional context.
	pub fn root(&self) -> &ConvertError {
		match self {
			ConvertError::At { source, .. } => source.root(),
			other => other,
		}
	}

	/// Positional context, if the failure happened below the root.
	pub fn path(&self) -> Option<&FieldPath> {
		match self {
			ConvertError::At { path, .. } => Some(path),
			_ => None,
		}
	}
}
