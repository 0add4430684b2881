//! The binary layout contract shared with the runtime buffer builder.
//!
//! Offsets, paddings and sizes are computed by the schema parser and only
//! reproduced by the generators. This module re-derives them independently so
//! a schema can be checked before code is generated from it.

use thiserror::Error;

use crate::types::{Schema, StructDef, StructId, Type, OFFSET_SIZE};

/// Version of the layout rules implemented here.
pub const LAYOUT_VERSION: u32 = 1;

/// Size of the vtable header (vtable size + object size).
const VTABLE_HEADER_SLOTS: usize = 2;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Unknown struct id {0}")]
    UnknownStruct(usize),

    #[error("Field \"{field}\" of struct \"{definition}\" cannot be stored inline")]
    NotInline { definition: String, field: String },

    #[error("Field \"{field}\" of \"{definition}\" is at offset {found}, expected {expected}")]
    FieldOffset {
        definition: String,
        field:      String,
        expected:   usize,
        found:      usize,
    },

    #[error("Field \"{field}\" of \"{definition}\" has {found} padding bytes, expected {expected}")]
    FieldPadding {
        definition: String,
        field:      String,
        expected:   usize,
        found:      usize,
    },

    #[error("Struct \"{definition}\" has bytesize {found}, expected {expected}")]
    ByteSize {
        definition: String,
        expected:   usize,
        found:      usize,
    },

    #[error("Struct \"{definition}\" has minalign {found}, expected {expected}")]
    MinAlign {
        definition: String,
        expected:   usize,
        found:      usize,
    },
}

/// Vtable offset of the field in slot `id`.
pub fn field_index_to_offset(id: usize) -> u16 {
    ((id + VTABLE_HEADER_SLOTS) * 2) as u16
}

/// Bytes needed to bring `buf_size` up to a multiple of `scalar_size`.
pub fn padding_bytes(buf_size: usize, scalar_size: usize) -> usize {
    (!buf_size).wrapping_add(1) & (scalar_size - 1)
}

fn lookup(schema: &Schema, id: StructId) -> Result<&StructDef, LayoutError> {
    schema.struct_def(id).ok_or(LayoutError::UnknownStruct(id.0))
}

/// Bytes the type occupies when stored inline in a struct, table or vector.
pub fn inline_size(schema: &Schema, ty: &Type) -> Result<usize, LayoutError> {
    match ty {
        Type::Scalar(s) => Ok(s.size()),
        Type::Struct(id) => {
            let def = lookup(schema, *id)?;
            Ok(if def.fixed { def.bytesize } else { OFFSET_SIZE })
        }
        _ => Ok(OFFSET_SIZE),
    }
}

/// Alignment of the type when stored inline.
pub fn inline_alignment(schema: &Schema, ty: &Type) -> Result<usize, LayoutError> {
    match ty {
        Type::Scalar(s) => Ok(s.size()),
        Type::Struct(id) => {
            let def = lookup(schema, *id)?;
            if !def.fixed {
                return Ok(OFFSET_SIZE);
            }
            check_minalign(def)?;
            Ok(def.minalign)
        }
        _ => Ok(OFFSET_SIZE),
    }
}

/// Alignments of zero cannot be padded to.
fn check_minalign(def: &StructDef) -> Result<(), LayoutError> {
    if def.minalign == 0 {
        return Err(LayoutError::MinAlign {
            definition: def.name.clone(),
            expected:   1,
            found:      0,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedLayout {
    pub offsets:  Vec<usize>,
    pub paddings: Vec<usize>,
    pub bytesize: usize,
    pub minalign: usize,
}

/// Lays out a fixed struct from field order and sizes alone.
pub fn derive_struct_layout(schema: &Schema, id: StructId) -> Result<DerivedLayout, LayoutError> {
    let def = lookup(schema, id)?;
    let mut layout = DerivedLayout {
        offsets:  Vec::with_capacity(def.fields.len()),
        paddings: vec![0; def.fields.len()],
        bytesize: 0,
        minalign: 1,
    };

    for (i, field) in def.fields.iter().enumerate() {
        let inline = match field.ty() {
            Type::Scalar(_) => true,
            Type::Struct(nested) => lookup(schema, *nested)?.fixed,
            _ => false,
        };
        if !inline {
            return Err(LayoutError::NotInline {
                definition: def.name.clone(),
                field:      field.name.clone(),
            });
        }

        let size = inline_size(schema, field.ty())?;
        let align = inline_alignment(schema, field.ty())?;
        layout.minalign = layout.minalign.max(align);

        let pad = padding_bytes(layout.bytesize, align);
        layout.bytesize += pad;
        if i > 0 {
            layout.paddings[i - 1] = pad;
        }
        layout.offsets.push(layout.bytesize);
        layout.bytesize += size;
    }

    let pad = padding_bytes(layout.bytesize, layout.minalign);
    layout.bytesize += pad;
    if let Some(last) = layout.paddings.last_mut() {
        *last = pad;
    }
    Ok(layout)
}

/// Writes the derived layout of a fixed struct back into its definition.
pub fn apply_derived_layout(schema: &mut Schema, id: StructId) -> Result<(), LayoutError> {
    let layout = derive_struct_layout(schema, id)?;
    let def = schema
        .struct_def_mut(id)
        .ok_or(LayoutError::UnknownStruct(id.0))?;
    for (i, field) in def.fields.iter_mut().enumerate() {
        field.offset = layout.offsets[i] as u16;
        field.padding = layout.paddings[i];
    }
    def.bytesize = layout.bytesize;
    def.minalign = layout.minalign;
    Ok(())
}

/// Checks every definition against the layout rules.
pub fn verify_layout(schema: &Schema) -> Result<(), LayoutError> {
    if schema.layout_version != LAYOUT_VERSION {
        return Err(LayoutError::VersionMismatch {
            expected: LAYOUT_VERSION,
            found:    schema.layout_version,
        });
    }

    for id in schema.struct_ids() {
        let def = lookup(schema, id)?;
        if def.fixed {
            check_minalign(def)?;
        }
    }

    for id in schema.struct_ids() {
        let def = lookup(schema, id)?;
        if def.fixed {
            verify_fixed(schema, id, def)?;
        } else {
            for (slot, field) in def.fields.iter().enumerate() {
                let expected = field_index_to_offset(slot) as usize;
                if field.offset as usize != expected {
                    return Err(LayoutError::FieldOffset {
                        definition: def.name.clone(),
                        field:      field.name.clone(),
                        expected,
                        found:      field.offset as usize,
                    });
                }
            }
        }
    }
    Ok(())
}

fn verify_fixed(schema: &Schema, id: StructId, def: &StructDef) -> Result<(), LayoutError> {
    let layout = derive_struct_layout(schema, id)?;
    for (i, field) in def.fields.iter().enumerate() {
        if field.offset as usize != layout.offsets[i] {
            return Err(LayoutError::FieldOffset {
                definition: def.name.clone(),
                field:      field.name.clone(),
                expected:   layout.offsets[i],
                found:      field.offset as usize,
            });
        }
        if field.padding != layout.paddings[i] {
            return Err(LayoutError::FieldPadding {
                definition: def.name.clone(),
                field:      field.name.clone(),
                expected:   layout.paddings[i],
                found:      field.padding,
            });
        }
    }
    if def.bytesize != layout.bytesize {
        return Err(LayoutError::ByteSize {
            definition: def.name.clone(),
            expected:   layout.bytesize,
            found:      def.bytesize,
        });
    }
    if def.minalign != layout.minalign {
        return Err(LayoutError::MinAlign {
            definition: def.name.clone(),
            expected:   layout.minalign,
            found:      def.minalign,
        });
    }
    Ok(())
}
