use brine_flat_schema::layout::inline_size;
use brine_flat_schema::{Field, StructDef, StructId, Type};

use crate::error::FlatError;
use crate::generator::{gen_comment, DefId, Generator};
use crate::type_map::default_value;
use crate::utils::quote;

impl Generator<'_> {
    /// Emits the accessor class of a struct or table, including its builder
    /// methods.
    ///
    /// Returns an empty string when the definition was already generated.
    pub fn gen_struct(&mut self, id: StructId) -> Result<String, FlatError> {
        if !self.mark_generated(DefId::Struct(id)) {
            return Ok(String::new());
        }
        let def = self.types.struct_def(id)?;
        for field in def.fields.iter().filter(|f| !f.deprecated) {
            self.check_field(def, field)?;
        }
        let lang = self.profile;

        // Accessors read in place from the backing buffer:
        //   public type name() { return bb.getType(bb_pos + offset); }
        // or, for tables,
        //   public type name() { int o = __offset(offset); return o != 0 ? ... : default; }
        let mut code = gen_comment(&def.doc_comment, "");
        code += &format!(
            "public class {}{}{} {{\n",
            def.name,
            lang.inheritance_marker,
            if def.fixed { "Struct" } else { "Table" }
        );

        if !def.fixed {
            code += &self.gen_root_accessors(id, def);
        }

        code += &format!(
            "  public {} __init(int _i, ByteBuffer _bb) {{ bb_pos = _i; bb = _bb; return this; }}\n\n",
            def.name
        );

        for field in def.fields.iter().filter(|f| !f.deprecated) {
            code += &gen_comment(&field.doc_comment, "  ");
            code += &self.gen_accessor(def, field)?;
        }
        code += "\n";

        if def.fixed {
            code += &self.gen_struct_create(def)?;
        } else {
            code += &self.gen_table_builders(id, def)?;
        }

        code += "};\n\n";
        Ok(code)
    }

    /// Rejects field shapes the buffer layout cannot express.
    fn check_field(&self, def: &StructDef, field: &Field) -> Result<(), FlatError> {
        let unsupported = |reason: &str| FlatError::Unsupported {
            definition: def.name.clone(),
            field:      field.name.clone(),
            reason:     reason.to_string(),
        };
        if let Type::Vector(element) = field.ty() {
            match **element {
                Type::Vector(_) => return Err(unsupported("vectors of vectors are not supported")),
                Type::Union(_) => return Err(unsupported("vectors of unions are not supported")),
                _ => {}
            }
        }
        if def.fixed && !field.ty().is_scalar() && !self.types.is_struct(field.ty())? {
            return Err(unsupported("structs may only contain scalars and structs"));
        }
        Ok(())
    }

    /// `getRootAs<Table>` overloads, plus the identifier check for the root
    /// table when the schema declares a file identifier.
    fn gen_root_accessors(&self, id: StructId, def: &StructDef) -> String {
        let lang = self.profile;
        let method_name = format!("{}RootAs{}", lang.runtime_name("Get"), def.name);
        let signature = format!("  public static {} {}", def.name, method_name);

        let mut code = format!(
            "{}(ByteBuffer _bb) {{ return {}(_bb, new {}()); }}\n",
            signature, method_name, def.name
        );
        code += &format!(
            "{}(ByteBuffer _bb, {} obj) {{ {}return (obj.__init(_bb.{}(_bb.position()) + _bb.position(), _bb)); }}\n",
            signature,
            def.name,
            lang.set_bb_byteorder,
            lang.runtime_name("GetInt")
        );

        if self.schema.root_struct == Some(id) {
            if let Some(identifier) = self.schema.file_identifier.as_deref().filter(|i| !i.is_empty()) {
                code += &format!(
                    "  public static {} {}BufferHasIdentifier(ByteBuffer _bb) {{ return __has_identifier(_bb, {}); }}\n",
                    lang.bool_type,
                    def.name,
                    quote(identifier)
                );
            }
        }
        code
    }

    fn gen_accessor(&self, def: &StructDef, field: &Field) -> Result<String, FlatError> {
        let lang = self.profile;
        let types = &self.types;
        let ty = field.ty();
        let ns = &def.namespace;

        let type_name = types.wire_type(ty, ns)?;
        let type_name_dest = types.wire_type(&types.destination_type(ty, true), ns)?;
        let dest_mask = types.destination_mask(ty, true);
        let dest_cast = types.destination_cast(ty);
        let method = lang.method_name(&field.name);
        let method_start = format!("  public {} {}", type_name_dest, method);

        let mut code = String::new();

        // Overloads that allocate the accessor object instead of reusing one.
        match ty {
            Type::Struct(_) => {
                code += &format!(
                    "{}() {{ return {}(new {}()); }}\n",
                    method_start, method, type_name
                );
            }
            Type::Vector(element) if matches!(**element, Type::Struct(_)) => {
                code += &format!(
                    "{}(int j) {{ return {}(new {}(), j); }}\n",
                    method_start, method, type_name
                );
            }
            _ => {}
        }

        let mut getter = dest_cast + &types.getter(ty);
        code += &method_start;
        code += "(";

        // Most accessors first look up the field in the vtable.
        let offset_prefix = format!(") {{ int o = __offset({}); return o != 0 ? ", field.offset);
        let default_cast = if lang.casts_default_values {
            format!("({})", type_name_dest)
        } else {
            String::new()
        };

        match ty {
            Type::Scalar(_) => {
                if def.fixed {
                    code += &format!(") {{ return {}(bb_pos + {}){}", getter, field.offset, dest_mask);
                } else {
                    code += &format!(
                        "{}{}(o + bb_pos){} : {}{}",
                        offset_prefix,
                        getter,
                        dest_mask,
                        default_cast,
                        default_value(&field.value)
                    );
                }
            }
            Type::Struct(_) => {
                code += &format!("{} obj", type_name);
                if def.fixed {
                    code += &format!(") {{ return obj.__init(bb_pos + {}, bb)", field.offset);
                } else {
                    let position = if types.is_struct(ty)? {
                        "o + bb_pos"
                    } else {
                        "__indirect(o + bb_pos)"
                    };
                    code += &format!("{}obj.__init({}, bb) : null", offset_prefix, position);
                }
            }
            Type::String => {
                code += &format!("{}{}(o + bb_pos) : null", offset_prefix, getter);
            }
            Type::Vector(element) => {
                let element_is_object = matches!(**element, Type::Struct(_));
                if element_is_object {
                    code += &format!("{} obj, ", type_name);
                    getter = "obj.__init".to_string();
                }
                code += &format!("int j{}{}(", offset_prefix, getter);

                let index = format!(
                    "__vector(o) + j * {}",
                    inline_size(self.schema, element)?
                );
                if element_is_object {
                    if types.is_struct(element)? {
                        code += &index;
                    } else {
                        code += &format!("__indirect({})", index);
                    }
                    code += ", bb";
                } else {
                    code += &index;
                }

                code += &format!("){} : ", dest_mask);
                if element.is_scalar() {
                    code += &format!("{}0", default_cast);
                } else {
                    code += "null";
                }
            }
            Type::Union(_) => {
                code += &format!("{} obj{}{}(obj, o) : null", type_name, offset_prefix, getter);
            }
        }
        code += "; }\n";

        if let Type::Vector(element) = ty {
            code += &format!(
                "  public int {}Length({}__vector_len(o) : 0; }}\n",
                method, offset_prefix
            );

            if lang.byte_buffer_views && element.is_scalar() {
                code += &self.gen_byte_buffer_view(&method, field, inline_size(self.schema, element)?);
            }
        }
        if lang.byte_buffer_views && *ty == Type::String {
            code += &self.gen_byte_buffer_view(&method, field, 1);
        }

        Ok(code)
    }

    /// Zero-copy view over the bytes of a string or scalar vector.
    fn gen_byte_buffer_view(&self, method: &str, field: &Field, element_size: usize) -> String {
        format!(
            "  public ByteBuffer {}AsByteBuffer() {{ return __vector_as_bytebuffer({}, {}); }}\n",
            method, field.offset, element_size
        )
    }
}
