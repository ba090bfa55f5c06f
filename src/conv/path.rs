use std::fmt;

/// One step of positional context inside a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Map key or struct field name.
	Key(String),
	/// Zero-based slice element index.
	Index(usize),
}

/// Location of a nested failure, outermost step first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Path consisting of a single step.
	pub fn single(step: PathStep) -> Self {
		Self { steps: vec![step] }
	}

	/// Prepend an outer step while an error unwinds.
	pub fn push_front(&mut self, step: PathStep) {
		self.steps.insert(0, step);
	}

	/// Whether no step has been recorded.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}
}

impl fmt::Display for PathStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PathStep::Key(name) => write!(f, ".{name}"),
			PathStep::Index(idx) => write!(f, "[{idx}]"),
		}
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.steps.is_empty() {
			return f.write_str("<root>");
		}
		for step in &self.steps {
			write!(f, "{step}")?;
		}
		Ok(())
	}
}
