#![allow(dead_code)]

use brine_flat_schema::layout::apply_derived_layout;
use brine_flat_schema::*;

pub fn game() -> Namespace {
    Namespace::new(["MyGame", "Example"])
}

pub struct Monster {
    pub schema:  Schema,
    pub color:   EnumId,
    pub any:     EnumId,
    pub test:    StructId,
    pub vec3:    StructId,
    pub monster: StructId,
    pub stat:    StructId,
}

/// The sample game schema: a root table with every kind of field, two
/// structs (one nested in the other), an enum and a union.
pub fn monster() -> Monster {
    let mut schema = Schema::new();

    let color = schema.add_enum(
        EnumDef::new("Color", game(), Scalar::UByte)
            .with_val("Red", 1)
            .with_val("Green", 2)
            .with_val("Blue", 8)
            .file("monster.fbs"),
    );
    let any = schema.add_enum(
        EnumDef::union("Any", game())
            .with_val("NONE", 0)
            .with_val("Monster", 1)
            .file("monster.fbs"),
    );

    let test = schema.add_struct(
        StructDef::fixed("Test", game())
            .with_field(Field::new("a", Type::Scalar(Scalar::Short)))
            .with_field(Field::new("b", Type::Scalar(Scalar::Byte)))
            .file("monster.fbs"),
    );
    apply_derived_layout(&mut schema, test).unwrap();

    let vec3 = schema.add_struct(
        StructDef::fixed("Vec3", game())
            .with_field(Field::new("x", Type::Scalar(Scalar::Float)))
            .with_field(Field::new("y", Type::Scalar(Scalar::Float)))
            .with_field(Field::new("z", Type::Scalar(Scalar::Float)))
            .with_field(Field::new("test1", Type::Scalar(Scalar::Double)))
            .with_field(Field::new("test2", Type::Scalar(Scalar::Byte)))
            .with_field(Field::new("test3", Type::Struct(test)))
            .file("monster.fbs"),
    );
    apply_derived_layout(&mut schema, vec3).unwrap();

    let monster = StructId(schema.structs.len());
    schema.add_struct(
        StructDef::table("Monster", game())
            .doc(" an example documentation comment: monster object")
            .with_field(Field::new("pos", Type::Struct(vec3)))
            .with_field(Field::new("mana", Type::Scalar(Scalar::Short)).default_value("150"))
            .with_field(Field::new("hp", Type::Scalar(Scalar::Short)).default_value("100"))
            .with_field(Field::new("name", Type::String).required())
            .with_field(Field::new("friendly", Type::Scalar(Scalar::Bool)).deprecated())
            .with_field(Field::new("inventory", Type::vector_of(Type::Scalar(Scalar::UByte))))
            .with_field(Field::new("color", Type::Scalar(Scalar::UByte)).default_value("8"))
            .with_field(Field::new("test_type", Type::Scalar(Scalar::UType)))
            .with_field(Field::new("test", Type::Union(any)))
            .with_field(Field::new("test4", Type::vector_of(Type::Struct(test))))
            .with_field(Field::new("testarrayofstring", Type::vector_of(Type::String)))
            .with_field(Field::new("testarrayoftables", Type::vector_of(Type::Struct(monster))))
            .with_field(Field::new("enemy", Type::Struct(monster)))
            .with_field(Field::new("testhashu32", Type::Scalar(Scalar::UInt)))
            .with_field(Field::new("testbool", Type::Scalar(Scalar::Bool)))
            .file("monster.fbs"),
    );

    let stat = schema.add_struct(
        StructDef::table("Stat", game())
            .with_field(Field::new("id", Type::String))
            .with_field(Field::new("val", Type::Scalar(Scalar::Long)))
            .with_field(Field::new("count", Type::Scalar(Scalar::UShort)))
            .file("monster.fbs"),
    );

    schema.root_struct = Some(monster);
    schema.file_identifier = Some("MONS".to_string());
    schema.include("monster.fbs", "include_test1.fbs");
    schema.include("include_test1.fbs", "include_test2.fbs");

    Monster { schema, color, any, test, vec3, monster, stat }
}

/// A schema holding a single enum.
pub fn single_enum(vals: &[(&str, i64)]) -> (Schema, EnumId) {
    let mut def = EnumDef::new("Kind", Namespace::default(), Scalar::Int);
    for (name, value) in vals {
        def = def.with_val(*name, *value);
    }
    let mut schema = Schema::new();
    let id = schema.add_enum(def);
    (schema, id)
}
