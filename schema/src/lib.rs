//! Schema IR consumed by the Brine Flat generators.
//!
//! The schema parser produces a [`Schema`]: enums, structs and tables with
//! their resolved types, namespaces and pre-computed binary layout. The IR is
//! read-only for the generators and can be (de)serialized with serde.
//!
//! ```
//! use brine_flat_schema::*;
//!
//! let mut schema = Schema::new();
//! let vec2 = schema.add_struct(
//!     StructDef::fixed("Vec2", Namespace::new(["Game"]))
//!         .with_field(Field::new("x", Type::Scalar(Scalar::Byte)))
//!         .with_field(Field::new("y", Type::Scalar(Scalar::Int))),
//! );
//! layout::apply_derived_layout(&mut schema, vec2).unwrap();
//!
//! let def = schema.struct_def(vec2).unwrap();
//! assert_eq!((def.fields[0].offset, def.fields[0].padding), (0, 3));
//! assert_eq!((def.bytesize, def.minalign), (8, 4));
//! assert_eq!(layout::verify_layout(&schema), Ok(()));
//! ```

pub mod layout;
pub mod types;

pub use layout::{LayoutError, LAYOUT_VERSION};
pub use types::*;
