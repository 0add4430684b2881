use brine_flat_schema::layout::{inline_alignment, inline_size};
use brine_flat_schema::{Field, StructDef, StructId, Type, LARGEST_SCALAR_SIZE};

use crate::error::FlatError;
use crate::generator::Generator;
use crate::naming::{to_camel_case, to_upper_camel};
use crate::type_map::default_value;
use crate::utils::quote;

impl Generator<'_> {
    /// `create<Struct>`: writes a fixed struct in one call, nested structs
    /// flattened into the argument list.
    pub(crate) fn gen_struct_create(&self, def: &StructDef) -> Result<String, FlatError> {
        let lang = self.profile;
        let mut code = format!(
            "  public static int {}{}(FlatBufferBuilder builder",
            lang.runtime_name("Create"),
            def.name
        );
        code += &self.gen_struct_args(def, "")?;
        code += ") {\n";
        code += &self.gen_struct_body(def, "")?;
        code += &format!("    return builder.{}();\n  }}\n", lang.runtime_name("Offset"));
        Ok(code)
    }

    fn nested_struct(&self, ty: &Type) -> Result<Option<&StructDef>, FlatError> {
        match ty {
            Type::Struct(id) if self.types.is_struct(ty)? => Ok(Some(self.types.struct_def(*id)?)),
            _ => Ok(None),
        }
    }

    /// Argument list of `create<Struct>`. Fields of nested structs are
    /// prefixed with the path of enclosing field names (`test3_a`) rather
    /// than the nested type's name, so two fields of the same struct type
    /// get distinct arguments.
    fn gen_struct_args(&self, def: &StructDef, prefix: &str) -> Result<String, FlatError> {
        let mut code = String::new();
        for field in &def.fields {
            if let Some(nested) = self.nested_struct(field.ty())? {
                code += &self.gen_struct_args(nested, &format!("{}{}_", prefix, field.name))?;
            } else {
                code += &format!(
                    ", {} {}{}",
                    self.types.type_basic(&self.types.destination_type(field.ty(), false)),
                    prefix,
                    self.profile.method_name(&field.name)
                );
            }
        }
        Ok(code)
    }

    /// Writes fields back to front, since the builder grows downwards.
    fn gen_struct_body(&self, def: &StructDef, prefix: &str) -> Result<String, FlatError> {
        let lang = self.profile;
        let mut code = format!(
            "    builder.{}({}, {});\n",
            lang.runtime_name("Prep"),
            def.minalign,
            def.bytesize
        );
        for field in def.fields.iter().rev() {
            if field.padding > 0 {
                code += &format!("    builder.{}({});\n", lang.runtime_name("Pad"), field.padding);
            }
            if let Some(nested) = self.nested_struct(field.ty())? {
                code += &self.gen_struct_body(nested, &format!("{}{}_", prefix, field.name))?;
            } else {
                code += &format!(
                    "    builder.{}{}({}{}{});\n",
                    lang.runtime_name("Put"),
                    self.types.put_method(field.ty())?,
                    self.types.source_cast(field.ty()),
                    prefix,
                    lang.method_name(&field.name)
                );
            }
        }
        Ok(code)
    }

    /// Start/add/end methods of a table, its vector helpers, and the
    /// one-shot constructor when every field can be passed as a value.
    pub(crate) fn gen_table_builders(&self, id: StructId, def: &StructDef) -> Result<String, FlatError> {
        let lang = self.profile;
        let mut code = self.gen_table_create(def)?;

        code += &format!(
            "  public static void {}{}(FlatBufferBuilder builder) {{ builder.{}({}); }}\n",
            lang.runtime_name("Start"),
            def.name,
            lang.runtime_name("StartObject"),
            def.fields.len()
        );

        // Slot indices count deprecated fields too.
        for (slot, field) in def.fields.iter().enumerate() {
            if field.deprecated {
                continue;
            }
            code += &self.gen_table_add(slot, field)?;
            if let Type::Vector(element) = field.ty() {
                code += &self.gen_vector_helpers(field, element)?;
            }
        }

        code += &format!(
            "  public static int {}{}(FlatBufferBuilder builder) {{\n    int o = builder.{}();\n",
            lang.runtime_name("End"),
            def.name,
            lang.runtime_name("EndObject")
        );
        for field in def.fields.iter().filter(|f| !f.deprecated && f.required) {
            code += &format!(
                "    builder.{}(o, {});  // {}\n",
                lang.runtime_name("Required"),
                field.offset,
                field.name
            );
        }
        code += "    return o;\n  }\n";

        if self.schema.root_struct == Some(id) {
            let identifier = match self.schema.file_identifier.as_deref() {
                Some(identifier) if !identifier.is_empty() => format!(", {}", quote(identifier)),
                _ => String::new(),
            };
            code += &format!(
                "  public static void {}{}Buffer(FlatBufferBuilder builder, int offset) {{ builder.{}(offset{}); }}\n",
                lang.runtime_name("Finish"),
                def.name,
                lang.runtime_name("Finish"),
                identifier
            );
        }
        Ok(code)
    }

    /// Name of the builder argument carrying `field`; references are passed
    /// as offsets.
    fn arg_name(field: &Field) -> String {
        let name = to_camel_case(&field.name, false);
        if field.ty().is_scalar() {
            name
        } else {
            name + "Offset"
        }
    }

    fn gen_table_create(&self, def: &StructDef) -> Result<String, FlatError> {
        let lang = self.profile;
        let live: Vec<&Field> = def.fields.iter().filter(|f| !f.deprecated).collect();

        // Inline structs have to be written in place between start and end,
        // so they cannot be passed as arguments.
        let mut has_inline_struct = false;
        for field in &live {
            has_inline_struct |= self.types.is_struct(field.ty())?;
        }
        if has_inline_struct || live.is_empty() {
            return Ok(String::new());
        }

        let mut code = format!(
            "  public static int {}{}(FlatBufferBuilder builder",
            lang.runtime_name("Create"),
            def.name
        );
        for field in &live {
            code += &format!(
                ",\n      {} {}",
                self.types.type_basic(&self.types.destination_type(field.ty(), false)),
                Self::arg_name(field)
            );
            if lang.supports_default_arguments {
                code += &format!(" = {}", default_value(&field.value));
            }
        }
        code += &format!(
            ") {{\n    builder.{}({});\n",
            lang.runtime_name("StartObject"),
            def.fields.len()
        );

        // Largest fields first keeps the object compact.
        let mut size = if def.sortbysize { LARGEST_SCALAR_SIZE } else { 1 };
        while size > 0 {
            for field in live.iter().rev() {
                if !def.sortbysize || size == field.ty().size() {
                    code += &format!(
                        "    {}.{}{}(builder, {});\n",
                        def.name,
                        lang.runtime_name("Add"),
                        to_upper_camel(&field.name),
                        Self::arg_name(field)
                    );
                }
            }
            size /= 2;
        }

        code += &format!(
            "    return {}.{}{}(builder);\n  }}\n\n",
            def.name,
            lang.runtime_name("End"),
            def.name
        );
        Ok(code)
    }

    fn gen_table_add(&self, slot: usize, field: &Field) -> Result<String, FlatError> {
        let lang = self.profile;
        let types = &self.types;
        let arg = Self::arg_name(field);
        Ok(format!(
            "  public static void {}{}(FlatBufferBuilder builder, {} {}) {{ builder.{}{}({}, {}{}, {}); }}\n",
            lang.runtime_name("Add"),
            to_upper_camel(&field.name),
            types.type_basic(&types.destination_type(field.ty(), false)),
            arg,
            lang.runtime_name("Add"),
            types.put_method(field.ty())?,
            slot,
            types.source_cast(field.ty()),
            arg,
            default_value(&field.value)
        ))
    }

    fn gen_vector_helpers(&self, field: &Field, element: &Type) -> Result<String, FlatError> {
        let lang = self.profile;
        let types = &self.types;
        let size = inline_size(self.schema, element)?;
        let align = inline_alignment(self.schema, element)?;
        let mut code = String::new();

        // Inline structs are written element by element between start and end.
        if !types.is_struct(element)? {
            let length = lang.runtime_name("Length");
            code += &format!(
                "  public static int {}{}Vector(FlatBufferBuilder builder, {}[] data) {{ builder.{}({}, data.{}, {}); \
                 for (int i = data.{} - 1; i >= 0; i--) builder.{}{}(data[i]); return builder.{}(); }}\n",
                lang.runtime_name("Create"),
                to_upper_camel(&field.name),
                types.type_basic(element),
                lang.runtime_name("StartVector"),
                size,
                length,
                align,
                length,
                lang.runtime_name("Add"),
                types.put_method(element)?,
                lang.runtime_name("EndVector")
            );
        }

        code += &format!(
            "  public static void {}{}Vector(FlatBufferBuilder builder, int numElems) {{ builder.{}({}, numElems, {}); }}\n",
            lang.runtime_name("Start"),
            to_upper_camel(&field.name),
            lang.runtime_name("StartVector"),
            size,
            align
        );
        Ok(code)
    }
}
