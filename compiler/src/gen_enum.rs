use brine_flat_schema::{EnumDef, EnumId};
use tracing::debug;

use crate::error::FlatError;
use crate::generator::{gen_comment, DefId, Generator};
use crate::utils::quote;

impl Generator<'_> {
    /// Emits a class of named integer constants for an enum.
    ///
    /// Returns an empty string when the enum was already generated.
    pub fn gen_enum(&mut self, id: EnumId) -> Result<String, FlatError> {
        if !self.mark_generated(DefId::Enum(id)) {
            return Ok(String::new());
        }
        let def = self.types.enum_def(id)?;
        let lang = self.profile;

        // Plain integer constants rather than native enums, so values map
        // directly onto what is stored in the buffer.
        let mut code = gen_comment(&def.doc_comment, "");
        code += &format!("public class {}{}", def.name, lang.open_curly);
        for val in &def.vals {
            code += &gen_comment(&val.doc_comment, "  ");
            code += &format!(
                "  public static{}{} {} = {};\n",
                lang.const_decl,
                lang.scalar(def.underlying_type),
                val.name,
                val.value
            );
        }

        code += &self.gen_enum_names(def);

        code += "};\n\n";
        Ok(code)
    }

    /// Name lookup table, skipped when the values are too sparse to be
    /// worth materializing.
    fn gen_enum_names(&self, def: &EnumDef) -> String {
        let (Some(first), Some(last)) = (def.vals.first(), def.vals.last()) else {
            return String::new();
        };
        let lang = self.profile;

        // 64-bit values may span more than i64 can hold.
        let range = i128::from(last.value) - i128::from(first.value) - 1;
        let density = range / def.vals.len() as i128;
        if density >= i128::from(self.options.max_sparseness) {
            debug!(name = %def.name, density = %density, "enum too sparse for a name table");
            return String::new();
        }

        let mut code = format!(
            "\n  private static{}{}[] names = {{ ",
            lang.const_decl, lang.string_type
        );
        let mut next = i128::from(first.value);
        for val in &def.vals {
            let value = i128::from(val.value);
            // Repeated values keep the first name.
            if value < next {
                continue;
            }
            while next < value {
                code += "\"\", ";
                next += 1;
            }
            code += &quote(&val.name);
            code += ", ";
            next += 1;
        }
        code += "};\n\n";

        code += &format!(
            "  public static {} {}(int e) {{ return names[e",
            lang.string_type,
            lang.method_name("name")
        );
        if first.value != 0 {
            code += &format!(" - {}", first.name);
        }
        code += "]; }\n";
        code
    }
}
