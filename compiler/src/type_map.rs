//! Maps schema types onto the types of a target language.
//!
//! A value is read with the wire type's getter, masked with
//! [`TypeMapper::destination_mask`], cast with
//! [`TypeMapper::destination_cast`] and handed out as
//! [`TypeMapper::destination_type`].

use brine_flat_schema::{EnumDef, EnumId, Namespace, Scalar, Schema, StructDef, StructId, Type, Value};

use crate::error::FlatError;
use crate::lang::LanguageProfile;
use crate::naming::to_upper_camel;

/// Spelling used for union members and other untyped table references.
const TABLE_TYPE: &str = "Table";

pub struct TypeMapper<'a> {
    pub profile: &'a LanguageProfile,
    pub schema:  &'a Schema,
}

impl<'a> TypeMapper<'a> {
    pub fn new(profile: &'a LanguageProfile, schema: &'a Schema) -> Self {
        TypeMapper { profile, schema }
    }

    pub fn struct_def(&self, id: StructId) -> Result<&'a StructDef, FlatError> {
        self.schema
            .struct_def(id)
            .ok_or_else(|| FlatError::UnknownDefinition(format!("struct #{}", id.0)))
    }

    pub fn enum_def(&self, id: EnumId) -> Result<&'a EnumDef, FlatError> {
        self.schema
            .enum_def(id)
            .ok_or_else(|| FlatError::UnknownDefinition(format!("enum #{}", id.0)))
    }

    /// True for references to fixed (inline) structs.
    pub fn is_struct(&self, ty: &Type) -> Result<bool, FlatError> {
        match ty {
            Type::Struct(id) => Ok(self.struct_def(*id)?.fixed),
            _ => Ok(false),
        }
    }

    /// Scalar spelling, or the offset type for everything stored by reference.
    pub fn type_basic(&self, ty: &Type) -> &'static str {
        match ty {
            Type::Scalar(s) => self.profile.scalar(*s),
            _ => self.profile.offset_type,
        }
    }

    /// Type an accessor hands out before any widening. Vectors are
    /// represented by their element type.
    pub fn wire_type(&self, ty: &Type, current: &Namespace) -> Result<String, FlatError> {
        match ty {
            Type::Scalar(s) => Ok(self.profile.scalar(*s).to_string()),
            Type::String => Ok(self.profile.string_type.to_string()),
            Type::Vector(element) => self.wire_type(element, current),
            Type::Struct(id) => self.struct_name(*id, current),
            Type::Union(_) => Ok(TABLE_TYPE.to_string()),
        }
    }

    /// Name of a struct, qualified when it lives in another namespace.
    pub fn struct_name(&self, id: StructId, current: &Namespace) -> Result<String, FlatError> {
        let def = self.struct_def(id)?;
        if def.namespace.is_empty() || &def.namespace == current {
            Ok(def.name.clone())
        } else {
            let separator = self.profile.namespace_separator;
            Ok(format!("{}{}{}", def.namespace.join(separator), separator, def.name))
        }
    }

    /// Widened type for languages lacking unsigned integers.
    pub fn destination_type(&self, ty: &Type, in_vector: bool) -> Type {
        if self.profile.has_unsigned_integers {
            return ty.clone();
        }
        match ty {
            Type::Scalar(Scalar::UByte) | Type::Scalar(Scalar::UShort) => Type::Scalar(Scalar::Int),
            Type::Scalar(Scalar::UInt) => Type::Scalar(Scalar::Long),
            Type::Vector(element) if in_vector => self.destination_type(element, in_vector),
            _ => ty.clone(),
        }
    }

    /// Mask that strips sign extension from a widened unsigned read.
    pub fn destination_mask(&self, ty: &Type, in_vector: bool) -> String {
        if self.profile.has_unsigned_integers {
            return String::new();
        }
        match ty {
            Type::Scalar(Scalar::UByte) => " & 0xFF".to_string(),
            Type::Scalar(Scalar::UShort) => " & 0xFFFF".to_string(),
            Type::Scalar(Scalar::UInt) => {
                format!(" & 0xFFFFFFFF{}", self.profile.wide_literal_suffix)
            }
            Type::Vector(element) if in_vector => self.destination_mask(element, in_vector),
            _ => String::new(),
        }
    }

    /// Cast needed when a widened 32-bit read lands in a 64-bit destination.
    pub fn destination_cast(&self, ty: &Type) -> String {
        if self.profile.has_unsigned_integers {
            return String::new();
        }
        let widened_uint = match ty {
            Type::Scalar(Scalar::UInt) => true,
            Type::Vector(element) => **element == Type::Scalar(Scalar::UInt),
            _ => false,
        };
        if widened_uint {
            format!("({})", self.profile.scalar(Scalar::Long))
        } else {
            String::new()
        }
    }

    /// Cast narrowing a widened argument back to its wire type before it is
    /// written. Vectors are passed as offsets and never narrowed.
    pub fn source_cast(&self, ty: &Type) -> String {
        if self.profile.has_unsigned_integers {
            return String::new();
        }
        match ty {
            Type::Scalar(s @ (Scalar::UByte | Scalar::UShort | Scalar::UInt)) => {
                format!("({})", self.profile.scalar(*s))
            }
            _ => String::new(),
        }
    }

    /// Runtime function that reads a value of `ty`.
    pub fn getter(&self, ty: &Type) -> String {
        match ty {
            Type::String => "__string".to_string(),
            Type::Struct(_) => "__struct".to_string(),
            Type::Union(_) => "__union".to_string(),
            Type::Vector(element) => self.getter(element),
            Type::Scalar(s) => {
                let getter = format!("bb.{}", self.profile.runtime_name("Get"));
                let spelling = self.profile.scalar(*s);
                if *s == Scalar::Bool {
                    format!("0!={}", getter)
                } else if spelling == self.profile.scalar(Scalar::UByte) {
                    // The plain getter reads the raw byte type.
                    getter
                } else {
                    getter + &to_upper_camel(spelling)
                }
            }
        }
    }

    /// Suffix of the builder's `put`/`add` call for `ty`.
    pub fn put_method(&self, ty: &Type) -> Result<String, FlatError> {
        Ok(match ty {
            Type::Scalar(s) => to_upper_camel(self.profile.scalar(*s)),
            _ if self.is_struct(ty)? => "Struct".to_string(),
            _ => "Offset".to_string(),
        })
    }
}

/// Literal for a field's default; booleans render as `true`/`false`.
pub fn default_value(value: &Value) -> String {
    match value.ty {
        Type::Scalar(Scalar::Bool) => {
            let literal = if value.constant == "0" { "false" } else { "true" };
            literal.to_string()
        }
        _ => value.constant.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{profile, Language};

    #[test]
    fn java_widens_unsigned_types() {
        let schema = Schema::new();
        let java = TypeMapper::new(profile(Language::Java).unwrap(), &schema);
        let uint = Type::Scalar(Scalar::UInt);

        assert_eq!(java.destination_type(&uint, false), Type::Scalar(Scalar::Long));
        assert_eq!(java.destination_mask(&uint, false), " & 0xFFFFFFFFL");
        assert_eq!(java.destination_cast(&uint), "(long)");
        assert_eq!(
            java.destination_type(&Type::Scalar(Scalar::UByte), false),
            Type::Scalar(Scalar::Int)
        );
        assert_eq!(java.destination_mask(&Type::Scalar(Scalar::Long), false), "");
    }

    #[test]
    fn vectors_widen_only_inside_vector_context() {
        let schema = Schema::new();
        let java = TypeMapper::new(profile(Language::Java).unwrap(), &schema);
        let bytes = Type::vector_of(Type::Scalar(Scalar::UByte));

        assert_eq!(java.destination_type(&bytes, true), Type::Scalar(Scalar::Int));
        assert_eq!(java.destination_type(&bytes, false), bytes);
        assert_eq!(java.destination_mask(&bytes, true), " & 0xFF");
        assert_eq!(java.destination_mask(&bytes, false), "");
    }

    #[test]
    fn csharp_keeps_wire_types() {
        let schema = Schema::new();
        let csharp = TypeMapper::new(profile(Language::CSharp).unwrap(), &schema);
        let uint = Type::Scalar(Scalar::UInt);

        assert_eq!(csharp.destination_type(&uint, false), uint);
        assert_eq!(csharp.destination_mask(&uint, false), "");
        assert_eq!(csharp.destination_cast(&uint), "");
        assert_eq!(csharp.source_cast(&uint), "");
    }

    #[test]
    fn widened_arguments_are_narrowed_on_write() {
        let schema = Schema::new();
        let java = TypeMapper::new(profile(Language::Java).unwrap(), &schema);

        assert_eq!(java.source_cast(&Type::Scalar(Scalar::UInt)), "(int)");
        assert_eq!(java.source_cast(&Type::Scalar(Scalar::UShort)), "(short)");
        assert_eq!(java.source_cast(&Type::vector_of(Type::Scalar(Scalar::UByte))), "");
        assert_eq!(java.source_cast(&Type::vector_of(Type::Scalar(Scalar::UInt))), "");
        assert_eq!(java.source_cast(&Type::Scalar(Scalar::Int)), "");
    }

    #[test]
    fn getters_follow_the_runtime_spelling() {
        let schema = Schema::new();
        let java = TypeMapper::new(profile(Language::Java).unwrap(), &schema);
        let csharp = TypeMapper::new(profile(Language::CSharp).unwrap(), &schema);

        assert_eq!(java.getter(&Type::Scalar(Scalar::Bool)), "0!=bb.get");
        assert_eq!(java.getter(&Type::Scalar(Scalar::UByte)), "bb.get");
        assert_eq!(java.getter(&Type::Scalar(Scalar::Short)), "bb.getShort");
        assert_eq!(csharp.getter(&Type::Scalar(Scalar::Byte)), "bb.GetSbyte");
        assert_eq!(csharp.getter(&Type::Scalar(Scalar::UByte)), "bb.Get");
        assert_eq!(csharp.getter(&Type::vector_of(Type::String)), "__string");
    }

    #[test]
    fn bool_defaults_render_as_literals() {
        let mut value = Value::new(Type::Scalar(Scalar::Bool));
        assert_eq!(default_value(&value), "false");
        value.constant = "1".to_string();
        assert_eq!(default_value(&value), "true");
        assert_eq!(default_value(&Value::new(Type::Scalar(Scalar::Int))), "0");
    }

    #[test]
    fn references_across_namespaces_are_qualified() {
        let mut schema = Schema::new();
        let id = schema.add_struct(brine_flat_schema::StructDef::table(
            "TableInFirstNS",
            Namespace::new(["NamespaceA"]),
        ));
        let java = TypeMapper::new(profile(Language::Java).unwrap(), &schema);

        assert_eq!(
            java.struct_name(id, &Namespace::new(["NamespaceC"])).unwrap(),
            "NamespaceA.TableInFirstNS"
        );
        assert_eq!(
            java.struct_name(id, &Namespace::new(["NamespaceA"])).unwrap(),
            "TableInFirstNS"
        );
    }
}
