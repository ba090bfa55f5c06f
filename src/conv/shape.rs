use std::any::TypeId;
use std::fmt;

use crate::conv::ScalarKind;

/// Structural type of a destination, independent of any value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
	/// Generic slot that stores any source value.
	Any,
	/// Scalar slot.
	Scalar(ScalarKind),
	/// Growable sequence.
	Slice(Box<Shape>),
	/// Keyed container.
	Map {
		/// Key shape.
		key: Box<Shape>,
		/// Value shape.
		value: Box<Shape>,
	},
	/// Struct with a static field layout.
	Struct(&'static StructDescriptor),
	/// Nullable or boxed slot allocated on demand.
	Ref(Box<Shape>),
}

impl Shape {
	/// Map shape from key and value shapes.
	pub fn map(key: Shape, value: Shape) -> Self {
		Shape::Map {
			key: Box::new(key),
			value: Box::new(value),
		}
	}

	/// Strip reference layers.
	pub fn target(&self) -> &Shape {
		match self {
			Shape::Ref(inner) => inner.target(),
			other => other,
		}
	}

	/// Struct descriptor behind any reference layers.
	pub fn descriptor(&self) -> Option<&'static StructDescriptor> {
		match self.target() {
			Shape::Struct(descriptor) => Some(descriptor),
			_ => None,
		}
	}

	/// Whether a top-level scan may write into this shape.
	pub fn is_scan_target(&self) -> bool {
		matches!(self.target(), Shape::Map { .. } | Shape::Struct(_) | Shape::Slice(_))
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Shape::Any => f.write_str("any"),
			Shape::Scalar(kind) => write!(f, "{kind}"),
			Shape::Slice(item) => write!(f, "[]{item}"),
			Shape::Map { key, value } => write!(f, "map<{key}, {value}>"),
			Shape::Struct(descriptor) => write!(f, "struct {}", descriptor.name),
			Shape::Ref(inner) => write!(f, "*{inner}"),
		}
	}
}

/// Static field layout of a struct destination.
#[derive(Debug)]
pub struct StructDescriptor {
	/// Type name as declared.
	pub name: &'static str,
	/// Identity used to key cached match plans.
	pub type_id: TypeId,
	/// Fields in declaration order.
	pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
	/// Describe struct `T`.
	pub fn new<T: 'static>(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
		Self {
			name,
			type_id: TypeId::of::<T>(),
			fields,
		}
	}
}

impl PartialEq for StructDescriptor {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id
	}
}

/// Static description of one struct field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	/// Field name as declared.
	pub name: &'static str,
	/// Explicit alternative key, matched before names.
	pub alias: Option<&'static str>,
	/// Embedded struct fields are searched when no top-level field matches.
	pub embedded: bool,
	/// Unexported fields never take part in conversion.
	pub exported: bool,
	shape: fn() -> Shape,
}

impl FieldDescriptor {
	/// Exported, non-embedded field without alias.
	pub fn new(name: &'static str, shape: fn() -> Shape) -> Self {
		Self {
			name,
			alias: None,
			embedded: false,
			exported: true,
			shape,
		}
	}

	/// Declare an alias key.
	pub fn alias(mut self, alias: &'static str) -> Self {
		self.alias = Some(alias);
		self
	}

	/// Mark as embedded.
	pub fn embedded(mut self) -> Self {
		self.embedded = true;
		self
	}

	/// Hide from conversions.
	pub fn unexported(mut self) -> Self {
		self.exported = false;
		self
	}

	/// Field shape, evaluated lazily so self-referential structs stay finite.
	pub fn shape(&self) -> Shape {
		(self.shape)()
	}
}
