//! Runtime value conversion between maps, structs, slices and structured text.

/// Type classification, scalar coercion, container walking and struct mapping.
pub mod conv;
