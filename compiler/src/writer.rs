//! Writes generated classes into a package directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use brine_flat_schema::Namespace;
use tracing::debug;

use crate::error::FlatError;
use crate::lang::LanguageProfile;
use crate::options::GeneratorOptions;

/// Directory holding the classes of `namespace`: one level per component.
pub fn namespace_dir(base: &Path, namespace: &Namespace) -> PathBuf {
    namespace
        .components
        .iter()
        .fold(base.to_path_buf(), |dir, component| dir.join(component))
}

/// Path of the file holding class `name`.
pub fn class_file_name(
    profile: &LanguageProfile,
    namespace: &Namespace,
    name: &str,
    base: &Path,
) -> PathBuf {
    namespace_dir(base, namespace).join(format!("{}{}", name, profile.file_extension))
}

/// Wraps a class body in the header, package declaration and imports.
pub fn class_file_contents(
    profile: &LanguageProfile,
    options: &GeneratorOptions,
    namespace: &Namespace,
    class_code: &str,
    needs_includes: bool,
) -> String {
    let mut code = format!("{}\n\n", options.header);
    let packaged = !namespace.is_empty();
    if packaged {
        code += &format!(
            "{}{}{}\n\n",
            profile.namespace_ident,
            namespace.join(profile.namespace_separator),
            profile.namespace_begin
        );
    }
    if needs_includes {
        code += profile.includes;
    }
    code += class_code;
    if packaged {
        code += profile.namespace_end;
    }
    code
}

/// Saves one class, creating its package directories first.
///
/// Nothing is written for an empty body; returns the path otherwise.
pub fn save_class(
    profile: &LanguageProfile,
    options: &GeneratorOptions,
    namespace: &Namespace,
    name: &str,
    class_code: &str,
    base: &Path,
    needs_includes: bool,
) -> Result<Option<PathBuf>, FlatError> {
    if class_code.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(namespace_dir(base, namespace))?;

    let path = class_file_name(profile, namespace, name, base);
    let contents = class_file_contents(profile, options, namespace, class_code, needs_includes);
    fs::write(&path, contents)?;
    debug!(path = %path.display(), "wrote class");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{profile, Language};

    #[test]
    fn package_components_become_directories() {
        let java = profile(Language::Java).unwrap();
        let ns = Namespace::new(["MyGame", "Example"]);
        assert_eq!(
            class_file_name(java, &ns, "Monster", Path::new("out")),
            Path::new("out").join("MyGame").join("Example").join("Monster.java")
        );
        assert_eq!(
            class_file_name(java, &Namespace::default(), "Monster", Path::new("out")),
            Path::new("out").join("Monster.java")
        );
    }

    #[test]
    fn csharp_wraps_the_class_in_a_namespace_block() {
        let csharp = profile(Language::CSharp).unwrap();
        let contents = class_file_contents(
            csharp,
            &GeneratorOptions::default(),
            &Namespace::new(["MyGame"]),
            "public class A\n{\n};\n\n",
            true,
        );
        assert_eq!(
            contents,
            "// automatically generated, do not modify\n\n\
             namespace MyGame\n{\n\n\
             using FlatBuffers;\n\n\
             public class A\n{\n};\n\n\
             \n}\n"
        );
    }

    #[test]
    fn root_namespace_has_no_package_declaration() {
        let java = profile(Language::Java).unwrap();
        let contents = class_file_contents(
            java,
            &GeneratorOptions::new().header("// test"),
            &Namespace::default(),
            "public class A {\n};\n\n",
            false,
        );
        assert_eq!(contents, "// test\n\npublic class A {\n};\n\n");
    }
}
