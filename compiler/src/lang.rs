//! Per-language syntax and capabilities.
//!
//! Every spelling the emitters need, and every behavior that differs between
//! target languages, lives in one [`LanguageProfile`] row. The emitters never
//! branch on [`Language`] itself.

use std::collections::HashMap;
use std::fmt;

use brine_flat_schema::Scalar;
use lazy_static::lazy_static;

use crate::error::FlatError;
use crate::naming::{lower_first, to_camel_case};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Java,
    CSharp,
    Go,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Java, Language::CSharp, Language::Go];

    pub fn name(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Go => "go",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spelling of every scalar kind in one language.
#[derive(Debug, Clone)]
pub struct ScalarNames {
    pub utype:  &'static str,
    pub bool:   &'static str,
    pub byte:   &'static str,
    pub ubyte:  &'static str,
    pub short:  &'static str,
    pub ushort: &'static str,
    pub int:    &'static str,
    pub uint:   &'static str,
    pub long:   &'static str,
    pub ulong:  &'static str,
    pub float:  &'static str,
    pub double: &'static str,
}

impl ScalarNames {
    pub fn get(&self, scalar: Scalar) -> &'static str {
        match scalar {
            Scalar::UType => self.utype,
            Scalar::Bool => self.bool,
            Scalar::Byte => self.byte,
            Scalar::UByte => self.ubyte,
            Scalar::Short => self.short,
            Scalar::UShort => self.ushort,
            Scalar::Int => self.int,
            Scalar::UInt => self.uint,
            Scalar::Long => self.long,
            Scalar::ULong => self.ulong,
            Scalar::Float => self.float,
            Scalar::Double => self.double,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub language:             Language,
    /// Whether method names (and runtime calls) start uppercase.
    pub first_camel_upper:    bool,
    pub file_extension:       &'static str,
    pub scalar_types:         ScalarNames,
    /// Type used to pass offsets to strings, vectors and tables.
    pub offset_type:          &'static str,
    pub string_type:          &'static str,
    pub bool_type:            &'static str,
    pub open_curly:           &'static str,
    pub const_decl:           &'static str,
    pub inheritance_marker:   &'static str,
    pub namespace_ident:      &'static str,
    pub namespace_begin:      &'static str,
    pub namespace_end:        &'static str,
    pub namespace_separator:  &'static str,
    /// Statement placed at the start of root accessors.
    pub set_bb_byteorder:     &'static str,
    pub includes:             &'static str,

    /// When false, unsigned wire values are widened to the next signed type.
    pub has_unsigned_integers:      bool,
    /// Suffix marking a 64-bit integer literal.
    pub wide_literal_suffix:        &'static str,
    /// Defaults returned by accessors need a cast to the destination type.
    pub casts_default_values:       bool,
    /// Parameters of the one-shot table constructor may carry defaults.
    pub supports_default_arguments: bool,
    /// Strings and scalar vectors get a zero-copy byte buffer view.
    pub byte_buffer_views:          bool,
    /// False for rows that only serve make rules.
    pub emits_sources:              bool,
}

impl LanguageProfile {
    /// Spells a runtime library call, e.g. `GetInt` as `getInt` in Java.
    pub fn runtime_name(&self, pascal: &str) -> String {
        if self.first_camel_upper {
            pascal.to_string()
        } else {
            lower_first(pascal)
        }
    }

    /// Name of a generated accessor for `field_name`.
    pub fn method_name(&self, field_name: &str) -> String {
        to_camel_case(field_name, self.first_camel_upper)
    }

    pub fn scalar(&self, scalar: Scalar) -> &'static str {
        self.scalar_types.get(scalar)
    }
}

pub static LANGUAGE_PROFILES: [LanguageProfile; 3] = [
    LanguageProfile {
        language:           Language::Java,
        first_camel_upper:  false,
        file_extension:     ".java",
        scalar_types:       ScalarNames {
            utype:  "byte",
            bool:   "boolean",
            byte:   "byte",
            ubyte:  "byte",
            short:  "short",
            ushort: "short",
            int:    "int",
            uint:   "int",
            long:   "long",
            ulong:  "long",
            float:  "float",
            double: "double",
        },
        offset_type:        "int",
        string_type:        "String",
        bool_type:          "boolean",
        open_curly:         " {\n",
        const_decl:         " final ",
        inheritance_marker: " extends ",
        namespace_ident:    "package ",
        namespace_begin:    ";",
        namespace_end:      "",
        namespace_separator: ".",
        set_bb_byteorder:   "_bb.order(ByteOrder.LITTLE_ENDIAN); ",
        includes:           "import java.nio.*;\nimport java.lang.*;\nimport java.util.*;\n\
                             import com.google.flatbuffers.*;\n\n",

        has_unsigned_integers:      false,
        wide_literal_suffix:        "L",
        casts_default_values:       false,
        supports_default_arguments: false,
        byte_buffer_views:          true,
        emits_sources:              true,
    },
    LanguageProfile {
        language:           Language::CSharp,
        first_camel_upper:  true,
        file_extension:     ".cs",
        scalar_types:       ScalarNames {
            utype:  "byte",
            bool:   "bool",
            byte:   "sbyte",
            ubyte:  "byte",
            short:  "short",
            ushort: "ushort",
            int:    "int",
            uint:   "uint",
            long:   "long",
            ulong:  "ulong",
            float:  "float",
            double: "double",
        },
        offset_type:        "int",
        string_type:        "string",
        bool_type:          "bool",
        open_curly:         "\n{\n",
        const_decl:         " readonly ",
        inheritance_marker: " : ",
        namespace_ident:    "namespace ",
        namespace_begin:    "\n{",
        namespace_end:      "\n}\n",
        namespace_separator: ".",
        set_bb_byteorder:   "",
        includes:           "using FlatBuffers;\n\n",

        has_unsigned_integers:      true,
        wide_literal_suffix:        "L",
        casts_default_values:       true,
        supports_default_arguments: true,
        byte_buffer_views:          false,
        emits_sources:              true,
    },
    LanguageProfile {
        language:           Language::Go,
        first_camel_upper:  true,
        file_extension:     ".go",
        scalar_types:       ScalarNames {
            utype:  "byte",
            bool:   "bool",
            byte:   "int8",
            ubyte:  "byte",
            short:  "int16",
            ushort: "uint16",
            int:    "int32",
            uint:   "uint32",
            long:   "int64",
            ulong:  "uint64",
            float:  "float32",
            double: "float64",
        },
        offset_type:        "int",
        string_type:        "string",
        bool_type:          "bool",
        open_curly:         "\n{\n",
        const_decl:         "const ",
        inheritance_marker: "",
        namespace_ident:    "package ",
        namespace_begin:    "",
        namespace_end:      "",
        namespace_separator: ".",
        set_bb_byteorder:   "",
        includes:           "import (\n\tflatbuffers \"github.com/google/flatbuffers/go\"\n)",

        has_unsigned_integers:      true,
        wide_literal_suffix:        "",
        casts_default_values:       false,
        supports_default_arguments: false,
        byte_buffer_views:          false,
        emits_sources:              false,
    },
];

lazy_static! {
    static ref PROFILE_INDEX: Result<HashMap<Language, &'static LanguageProfile>, String> =
        index_profiles(&LANGUAGE_PROFILES);
}

/// Indexes `rows` by language, requiring exactly one row per language.
pub fn index_profiles(
    rows: &[LanguageProfile],
) -> Result<HashMap<Language, &LanguageProfile>, String> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        if index.insert(row.language, row).is_some() {
            return Err(format!("more than one row for {}", row.language));
        }
    }
    for language in Language::ALL {
        if !index.contains_key(&language) {
            return Err(format!("no row for {}", language));
        }
    }
    Ok(index)
}

/// Looks up the profile of `language` in the validated table.
pub fn profile(language: Language) -> Result<&'static LanguageProfile, FlatError> {
    match &*PROFILE_INDEX {
        Ok(index) => index
            .get(&language)
            .copied()
            .ok_or_else(|| FlatError::ProfileTable(format!("no row for {}", language))),
        Err(msg) => Err(FlatError::ProfileTable(msg.clone())),
    }
}
