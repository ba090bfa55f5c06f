use std::collections::{HashMap, HashSet};

use crate::conv::{
	ConvertError, Destination, FieldDescriptor, PathStep, Result, ScanContext, Shape, StructDescriptor, Value, coerce, walk,
};

/// Precomputed key-to-field resolution for one struct shape.
///
/// Level 0 holds the struct's own exported fields; each further level holds
/// the fields reachable through embedded structs one layer deeper. Within a
/// level an alias wins over the exact name, which wins over a case-insensitive
/// match, which wins over a match that ignores separators. Deeper levels are
/// only consulted when a shallower one has no match.
#[derive(Debug, Default)]
pub struct MatchPlan {
	levels: Vec<LevelIndex>,
}

#[derive(Debug, Default)]
struct LevelIndex {
	alias: HashMap<String, Vec<usize>>,
	exact: HashMap<&'static str, Vec<usize>>,
	folded: HashMap<String, Vec<usize>>,
	normalized: HashMap<String, Vec<usize>>,
}

impl LevelIndex {
	fn insert(&mut self, field: &FieldDescriptor, path: &[usize]) {
		if let Some(alias) = field.alias {
			self.alias.entry(alias.to_lowercase()).or_insert_with(|| path.to_vec());
		}
		self.exact.entry(field.name).or_insert_with(|| path.to_vec());
		self.folded.entry(field.name.to_lowercase()).or_insert_with(|| path.to_vec());
		self.normalized.entry(normalize(field.name)).or_insert_with(|| path.to_vec());
	}

	fn resolve(&self, key: &str, folded: &str, normalized: &str) -> Option<&[usize]> {
		self.alias
			.get(folded)
			.or_else(|| self.exact.get(key))
			.or_else(|| self.folded.get(folded))
			.or_else(|| self.normalized.get(normalized))
			.map(Vec::as_slice)
	}
}

impl MatchPlan {
	/// Index every exported field of `descriptor`, breadth-first through embedded structs.
	pub fn build(descriptor: &'static StructDescriptor) -> Self {
		let mut levels = Vec::new();
		let mut seen = HashSet::from([descriptor.type_id]);
		let mut frontier: Vec<(Vec<usize>, &'static StructDescriptor)> = vec![(Vec::new(), descriptor)];

		while !frontier.is_empty() {
			let mut level = LevelIndex::default();
			let mut next = Vec::new();
			for (prefix, item) in &frontier {
				for (idx, field) in item.fields.iter().enumerate() {
					if !field.exported {
						continue;
					}
					let mut path = prefix.clone();
					path.push(idx);
					level.insert(field, &path);

					if field.embedded {
						if let Some(inner) = field.shape().descriptor() {
							if seen.insert(inner.type_id) {
								next.push((path, inner));
							}
						}
					}
				}
			}
			levels.push(level);
			frontier = next;
		}

		Self { levels }
	}

	/// Field index path for a source key, or `None` when nothing matches.
	pub fn resolve(&self, key: &str) -> Option<&[usize]> {
		let folded = key.to_lowercase();
		let normalized = normalize(key);
		self.levels.iter().find_map(|level| level.resolve(key, &folded, &normalized))
	}

	/// Number of embedding levels indexed, including the top level.
	pub fn depth(&self) -> usize {
		self.levels.len()
	}
}

/// Lowercase and drop separators such as `_`, `-`, `.` and spaces.
fn normalize(name: &str) -> String {
	name.chars().filter(|ch| ch.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

fn slot_at<'a>(dest: &'a mut dyn Destination, path: &[usize]) -> Option<&'a mut dyn Destination> {
	let Some((&first, rest)) = path.split_first() else {
		return Some(dest);
	};
	let field = dest.fields_mut()?.into_iter().nth(first)?;
	slot_at(field, rest)
}

/// Scan `src` into a struct destination described by `descriptor`.
///
/// Unmatched source keys are ignored and absent values leave their field
/// untouched. Reference-typed fields on the way to a match are allocated.
pub fn scan_record(dest: &mut dyn Destination, descriptor: &'static StructDescriptor, src: &Value, cx: &ScanContext<'_>) -> Result<()> {
	let shape = Shape::Struct(descriptor);
	let prepared = walk::prepare(src, cx)?;
	let items = walk::entries(&prepared, cx, &shape)?;
	let plan = cx.plan(descriptor);

	for (key, value) in items {
		let name = coerce::to_string(&key)?;
		let Some(path) = plan.resolve(&name) else {
			tracing::trace!(struct_name = descriptor.name, key = %name, "ignoring unmatched key");
			continue;
		};
		if walk::is_absent(&value) {
			continue;
		}

		let slot = slot_at(&mut *dest, path).ok_or_else(|| ConvertError::InvalidDestination { shape: shape.to_string() })?;
		slot.scan_from(&value, cx).map_err(|err| err.at(PathStep::Key(name)))?;
	}
	Ok(())
}
