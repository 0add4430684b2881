use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::layout::{field_index_to_offset, LAYOUT_VERSION};

/// Index of a struct or table in [`Schema::structs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructId(pub usize);

/// Index of an enum or union in [`Schema::enums`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumId(pub usize);

/// Scalar kinds of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    /// Discriminant of a union field.
    UType,
    Bool,
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
}

impl Scalar {
    pub const ALL: [Scalar; 12] = [
        Scalar::UType,
        Scalar::Bool,
        Scalar::Byte,
        Scalar::UByte,
        Scalar::Short,
        Scalar::UShort,
        Scalar::Int,
        Scalar::UInt,
        Scalar::Long,
        Scalar::ULong,
        Scalar::Float,
        Scalar::Double,
    ];

    /// Byte size on the wire.
    pub fn size(self) -> usize {
        match self {
            Scalar::UType | Scalar::Bool | Scalar::Byte | Scalar::UByte => 1,
            Scalar::Short | Scalar::UShort => 2,
            Scalar::Int | Scalar::UInt | Scalar::Float => 4,
            Scalar::Long | Scalar::ULong | Scalar::Double => 8,
        }
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Scalar::UType | Scalar::UByte | Scalar::UShort | Scalar::UInt | Scalar::ULong
        )
    }
}

/// Size of an offset (`uoffset_t`) on the wire.
pub const OFFSET_SIZE: usize = 4;

/// Size of the largest scalar on the wire.
pub const LARGEST_SCALAR_SIZE: usize = 8;

/// A resolved schema type.
///
/// Vectors are flat: the element of a `Vector` is never itself a `Vector`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Scalar(Scalar),
    String,
    Vector(Box<Type>),
    /// A fixed struct or a table, depending on the referenced definition.
    Struct(StructId),
    Union(EnumId),
}

impl Type {
    pub fn vector_of(element: Type) -> Type {
        Type::Vector(Box::new(element))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Scalar(_))
    }

    pub fn scalar(&self) -> Option<Scalar> {
        match self {
            Type::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Element type of a vector, `None` for everything else.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Vector(element) => Some(element),
            _ => None,
        }
    }

    /// Size of the slot the type occupies inside a table: scalars inline,
    /// everything else as an offset.
    pub fn size(&self) -> usize {
        match self {
            Type::Scalar(s) => s.size(),
            _ => OFFSET_SIZE,
        }
    }
}

/// A typed constant, used for field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default = "default_constant")]
    pub constant: String,
}

fn default_constant() -> String {
    "0".to_string()
}

impl Value {
    pub fn new(ty: Type) -> Self {
        Value {
            ty,
            constant: default_constant(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace {
    pub components: Vec<String>,
}

impl Namespace {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Namespace {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn join(&self, separator: &str) -> String {
        self.components.join(separator)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
    /// Vtable offset for table fields, byte offset for struct fields.
    #[serde(default)]
    pub offset: u16,
    /// Bytes of padding that follow the field inside a fixed struct.
    #[serde(default)]
    pub padding: usize,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub doc_comment: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field {
            name: name.into(),
            value: Value::new(ty),
            offset: 0,
            padding: 0,
            deprecated: false,
            required: false,
            doc_comment: Vec::new(),
        }
    }

    pub fn ty(&self) -> &Type {
        &self.value.ty
    }

    pub fn offset(mut self, offset: u16) -> Self {
        self.offset = offset;
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn default_value(mut self, constant: impl Into<String>) -> Self {
        self.value.constant = constant.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc_comment.push(line.into());
        self
    }
}

/// A fixed struct (`fixed == true`) or a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub namespace: Namespace,
    #[serde(default)]
    pub doc_comment: Vec<String>,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub sortbysize: bool,
    #[serde(default)]
    pub bytesize: usize,
    #[serde(default = "default_minalign")]
    pub minalign: usize,
    /// Set by the parser for definitions emitted by an earlier compilation.
    #[serde(default)]
    pub generated: bool,
    /// Schema file the definition was declared in.
    #[serde(default)]
    pub file: String,
}

fn default_minalign() -> usize {
    1
}

impl StructDef {
    fn new(name: impl Into<String>, namespace: Namespace, fixed: bool) -> Self {
        StructDef {
            name: name.into(),
            namespace,
            doc_comment: Vec::new(),
            fields: Vec::new(),
            fixed,
            sortbysize: !fixed,
            bytesize: 0,
            minalign: default_minalign(),
            generated: false,
            file: String::new(),
        }
    }

    pub fn table(name: impl Into<String>, namespace: Namespace) -> Self {
        Self::new(name, namespace, false)
    }

    pub fn fixed(name: impl Into<String>, namespace: Namespace) -> Self {
        Self::new(name, namespace, true)
    }

    /// Appends a field. Table fields get the vtable offset of their slot;
    /// struct fields keep whatever offset they carry.
    pub fn push_field(&mut self, field: Field) -> &mut Self {
        let field = if self.fixed {
            field
        } else {
            let offset = field_index_to_offset(self.fields.len());
            field.offset(offset)
        };
        self.fields.push(field);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.push_field(field);
        self
    }

    pub fn sortbysize(mut self, value: bool) -> Self {
        self.sortbysize = value;
        self
    }

    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc_comment.push(line.into());
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumVal {
    pub name: String,
    pub value: i64,
    #[serde(default)]
    pub doc_comment: Vec<String>,
}

/// An enum, or the discriminant enum of a union (`is_union == true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub namespace: Namespace,
    #[serde(default)]
    pub doc_comment: Vec<String>,
    pub underlying_type: Scalar,
    /// Values in non-decreasing order; never empty.
    pub vals: Vec<EnumVal>,
    #[serde(default)]
    pub is_union: bool,
    #[serde(default)]
    pub generated: bool,
    #[serde(default)]
    pub file: String,
}

impl EnumDef {
    pub fn new(name: impl Into<String>, namespace: Namespace, underlying_type: Scalar) -> Self {
        EnumDef {
            name: name.into(),
            namespace,
            doc_comment: Vec::new(),
            underlying_type,
            vals: Vec::new(),
            is_union: false,
            generated: false,
            file: String::new(),
        }
    }

    pub fn union(name: impl Into<String>, namespace: Namespace) -> Self {
        let mut def = Self::new(name, namespace, Scalar::UType);
        def.is_union = true;
        def
    }

    pub fn with_val(mut self, name: impl Into<String>, value: i64) -> Self {
        self.vals.push(EnumVal {
            name: name.into(),
            value,
            doc_comment: Vec::new(),
        });
        self
    }

    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc_comment.push(line.into());
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }
}

/// Everything the schema parser hands over to the generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default = "default_layout_version")]
    pub layout_version: u32,
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
    #[serde(default)]
    pub root_struct: Option<StructId>,
    #[serde(default)]
    pub file_identifier: Option<String>,
    #[serde(default)]
    pub file_extension: Option<String>,
    /// Direct includes of every parsed schema file.
    #[serde(default)]
    pub files_included: BTreeMap<String, Vec<String>>,
    /// Root buffer serialized from a data file, if one was parsed.
    #[serde(default)]
    pub binary: Vec<u8>,
}

fn default_layout_version() -> u32 {
    LAYOUT_VERSION
}

impl Default for Schema {
    fn default() -> Self {
        Schema {
            layout_version: LAYOUT_VERSION,
            enums: Vec::new(),
            structs: Vec::new(),
            root_struct: None,
            file_identifier: None,
            file_extension: None,
            files_included: BTreeMap::new(),
            binary: Vec::new(),
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_struct(&mut self, def: StructDef) -> StructId {
        self.structs.push(def);
        StructId(self.structs.len() - 1)
    }

    pub fn add_enum(&mut self, def: EnumDef) -> EnumId {
        self.enums.push(def);
        EnumId(self.enums.len() - 1)
    }

    pub fn struct_def(&self, id: StructId) -> Option<&StructDef> {
        self.structs.get(id.0)
    }

    pub fn struct_def_mut(&mut self, id: StructId) -> Option<&mut StructDef> {
        self.structs.get_mut(id.0)
    }

    pub fn enum_def(&self, id: EnumId) -> Option<&EnumDef> {
        self.enums.get(id.0)
    }

    pub fn struct_ids(&self) -> impl Iterator<Item = StructId> {
        (0..self.structs.len()).map(StructId)
    }

    pub fn enum_ids(&self) -> impl Iterator<Item = EnumId> {
        (0..self.enums.len()).map(EnumId)
    }

    pub fn root_struct_def(&self) -> Option<&StructDef> {
        self.root_struct.and_then(|id| self.struct_def(id))
    }

    pub fn include(&mut self, file: impl Into<String>, included: impl Into<String>) {
        self.files_included
            .entry(file.into())
            .or_default()
            .push(included.into());
    }

    /// Transitive closure of the includes of `file_name`, `file_name` itself
    /// included.
    pub fn included_files_recursive(&self, file_name: &str) -> BTreeSet<String> {
        let mut included = BTreeSet::new();
        if file_name.is_empty() {
            return included;
        }
        let mut to_process = VecDeque::from([file_name.to_string()]);
        while let Some(current) = to_process.pop_front() {
            if !included.insert(current.clone()) {
                continue;
            }
            if let Some(next) = self.files_included.get(&current) {
                for file in next {
                    if !included.contains(file) {
                        to_process.push_back(file.clone());
                    }
                }
            }
        }
        included
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_take_a_four_byte_slot() {
        assert_eq!(Type::String.size(), 4);
        assert_eq!(Type::vector_of(Type::Scalar(Scalar::Double)).size(), 4);
        assert_eq!(Type::Scalar(Scalar::Double).size(), 8);
        assert_eq!(Type::Scalar(Scalar::UType).size(), 1);
    }

    #[test]
    fn table_fields_get_their_slot_offsets() {
        let table = StructDef::table("Monster", Namespace::default())
            .with_field(Field::new("hp", Type::Scalar(Scalar::Short)))
            .with_field(Field::new("name", Type::String));
        assert_eq!(table.fields[0].offset, 4);
        assert_eq!(table.fields[1].offset, 6);
    }

    #[test]
    fn included_files_cover_the_whole_graph() {
        let mut schema = Schema::new();
        schema.include("monster.fbs", "include_test1.fbs");
        schema.include("include_test1.fbs", "include_test2.fbs");
        schema.include("include_test2.fbs", "include_test1.fbs");

        let files: Vec<_> = schema
            .included_files_recursive("monster.fbs")
            .into_iter()
            .collect();
        assert_eq!(
            files,
            ["include_test1.fbs", "include_test2.fbs", "monster.fbs"]
        );
        assert!(schema.included_files_recursive("").is_empty());
        assert_eq!(schema.included_files_recursive("lonely.fbs").len(), 1);
    }
}
