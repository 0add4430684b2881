#![cfg(test)]

mod common;

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use brine_flat_compiler::{
    generate_general, generate_general_with_options, generate_make_rule, Generator,
    GeneratorOptions, Language,
};

fn read_tree(paths: &[PathBuf]) -> Vec<(PathBuf, String)> {
    paths
        .iter()
        .map(|path| (path.clone(), fs::read_to_string(path).unwrap()))
        .collect()
}

#[test]
fn test_one_file_per_definition() {
    let fixture = common::monster();
    let dir = tempfile::tempdir().unwrap();

    let written = Generator::new(&fixture.schema, Language::Java, GeneratorOptions::default())
        .unwrap()
        .run(dir.path())
        .unwrap();

    let package = dir.path().join("MyGame").join("Example");
    let expected: Vec<PathBuf> = ["Color", "Any", "Test", "Vec3", "Monster", "Stat"]
        .iter()
        .map(|name| package.join(format!("{}.java", name)))
        .collect();
    assert_eq!(written, expected);
    for path in &expected {
        assert!(path.is_file(), "{} was not written", path.display());
    }
}

#[test]
fn test_java_file_layout() {
    let fixture = common::monster();
    let dir = tempfile::tempdir().unwrap();
    generate_general(&fixture.schema, dir.path(), Language::Java).unwrap();

    let package = dir.path().join("MyGame").join("Example");
    let monster = fs::read_to_string(package.join("Monster.java")).unwrap();
    assert!(monster.starts_with(
        "// automatically generated, do not modify\n\n\
         package MyGame.Example;\n\n\
         import java.nio.*;\nimport java.lang.*;\nimport java.util.*;\nimport com.google.flatbuffers.*;\n\n\
         /// an example documentation comment: monster object\n\
         public class Monster extends Table {\n"
    ));
    assert!(monster.ends_with("};\n\n"));

    // Enums need no runtime imports.
    let color = fs::read_to_string(package.join("Color.java")).unwrap();
    assert!(color.starts_with(
        "// automatically generated, do not modify\n\npackage MyGame.Example;\n\npublic class Color {\n"
    ));
}

#[test]
fn test_csharp_namespace_block() {
    let fixture = common::monster();
    let dir = tempfile::tempdir().unwrap();
    generate_general(&fixture.schema, dir.path(), Language::CSharp).unwrap();

    let vec3 = fs::read_to_string(dir.path().join("MyGame").join("Example").join("Vec3.cs")).unwrap();
    assert!(vec3.starts_with(
        "// automatically generated, do not modify\n\n\
         namespace MyGame.Example\n{\n\n\
         using FlatBuffers;\n\n\
         public class Vec3 : Struct {\n"
    ));
    assert!(vec3.ends_with("};\n\n\n}\n"));
}

#[test]
fn test_custom_header() {
    let fixture = common::monster();
    let dir = tempfile::tempdir().unwrap();
    let options = GeneratorOptions::new().header("// generated by the build");
    generate_general_with_options(&fixture.schema, dir.path(), Language::Java, options).unwrap();

    let stat = fs::read_to_string(dir.path().join("MyGame").join("Example").join("Stat.java")).unwrap();
    assert!(stat.starts_with("// generated by the build\n\n"));
}

#[test]
fn test_generation_is_idempotent() {
    let fixture = common::monster();
    let dir = tempfile::tempdir().unwrap();

    let first = Generator::new(&fixture.schema, Language::Java, GeneratorOptions::default())
        .unwrap()
        .run(dir.path())
        .unwrap();
    let before = read_tree(&first);

    let second = Generator::new(&fixture.schema, Language::Java, GeneratorOptions::default())
        .unwrap()
        .run(dir.path())
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(before, read_tree(&second));
}

#[test]
fn test_previously_generated_definitions_write_no_file() {
    let mut fixture = common::monster();
    fixture.schema.structs[fixture.stat.0].generated = true;
    let dir = tempfile::tempdir().unwrap();
    generate_general(&fixture.schema, dir.path(), Language::Java).unwrap();

    let package = dir.path().join("MyGame").join("Example");
    assert!(package.join("Monster.java").is_file());
    assert!(!package.join("Stat.java").exists());
}

#[test]
fn test_make_rule_names_the_written_files() {
    let fixture = common::monster();
    let dir = tempfile::tempdir().unwrap();

    for language in [Language::Java, Language::CSharp] {
        let written = Generator::new(&fixture.schema, language, GeneratorOptions::default())
            .unwrap()
            .run(dir.path())
            .unwrap();
        let rule = generate_make_rule(&fixture.schema, dir.path(), "monster.fbs", language).unwrap();

        let (targets, prerequisites) = rule.split_once(':').unwrap();
        let targets: BTreeSet<String> = targets.split(' ').map(str::to_string).collect();
        let written: BTreeSet<String> = written.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(targets, written);
        assert_eq!(prerequisites, " include_test1.fbs include_test2.fbs monster.fbs");
    }
}

#[test]
fn test_root_namespace_files() {
    let (schema, _) = common::single_enum(&[("A", 0), ("B", 1)]);
    let dir = tempfile::tempdir().unwrap();
    generate_general(&schema, dir.path(), Language::CSharp).unwrap();

    let kind = fs::read_to_string(dir.path().join("Kind.cs")).unwrap();
    assert!(kind.starts_with("// automatically generated, do not modify\n\npublic class Kind\n{\n"));
    assert!(kind.ends_with("};\n\n"));
}
