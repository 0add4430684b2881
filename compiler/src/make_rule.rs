use std::path::Path;

use brine_flat_schema::Schema;

use crate::error::FlatError;
use crate::lang::{profile, Language};
use crate::writer::class_file_name;

/// Make rule listing every class file generated for `language` as targets of
/// `file_name` and everything it includes.
///
/// Targets use the same path rule as the writer, so they name exactly the
/// files a generation run produces.
pub fn generate_make_rule(
    schema: &Schema,
    path: &Path,
    file_name: &str,
    language: Language,
) -> Result<String, FlatError> {
    let lang = profile(language)?;

    let enums = schema.enums.iter().map(|def| (&def.namespace, &def.name));
    let structs = schema.structs.iter().map(|def| (&def.namespace, &def.name));
    let targets: Vec<String> = enums
        .chain(structs)
        .map(|(namespace, name)| {
            class_file_name(lang, namespace, name, path)
                .display()
                .to_string()
        })
        .collect();

    let mut make_rule = targets.join(" ");
    make_rule += ":";
    for included in schema.included_files_recursive(file_name) {
        make_rule += " ";
        make_rule += &included;
    }
    Ok(make_rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_flat_schema::{EnumDef, Namespace, Scalar, StructDef};

    #[test]
    fn targets_precede_prerequisites() {
        let mut schema = Schema::new();
        schema.add_enum(EnumDef::new("Color", Namespace::new(["Game"]), Scalar::Byte));
        schema.add_struct(StructDef::table("Monster", Namespace::new(["Game"])));
        schema.include("monster.fbs", "include_test1.fbs");

        let rule = generate_make_rule(&schema, Path::new("gen"), "monster.fbs", Language::Java).unwrap();
        let expected = format!(
            "{} {}: include_test1.fbs monster.fbs",
            Path::new("gen").join("Game").join("Color.java").display(),
            Path::new("gen").join("Game").join("Monster.java").display()
        );
        assert_eq!(rule, expected);
    }

    #[test]
    fn go_rules_are_available_without_sources() {
        let mut schema = Schema::new();
        schema.add_struct(StructDef::table("Monster", Namespace::default()));

        let rule = generate_make_rule(&schema, Path::new("gen"), "", Language::Go).unwrap();
        assert_eq!(rule, format!("{}:", Path::new("gen").join("Monster.go").display()));
    }
}
