//! brine-flat-compiler
//!
//! This crate implements:
//!  1) Language profiles for the generated Java and C# code (plus a Go row
//!     used only for make rules),
//!  2) Type mapping, including unsigned widening for languages without
//!     unsigned integers,
//!  3) Enum, struct and table class generation (`generate_general`),
//!  4) Make rules for generated classes and binary buffers,
//!  5) Error types (`FlatError`).

pub mod error;
pub mod utils;
pub mod naming;
pub mod lang;
pub mod type_map;
pub mod options;
pub mod generator;
pub mod gen_enum;
pub mod gen_struct;
pub mod gen_builder;
pub mod writer;
pub mod make_rule;
pub mod binary;

pub use binary::{binary_file_name, binary_make_rule, generate_binary};
pub use error::FlatError;
pub use generator::{generate_general, generate_general_with_options, DefId, Generator};
pub use lang::Language;
pub use make_rule::generate_make_rule;
pub use naming::to_camel_case;
pub use options::GeneratorOptions;
