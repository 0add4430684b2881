use std::collections::HashSet;
use std::path::{Path, PathBuf};

use brine_flat_schema::{EnumId, Schema, StructId};
use tracing::{debug, info};

use crate::error::FlatError;
use crate::lang::{profile, Language, LanguageProfile};
use crate::options::GeneratorOptions;
use crate::type_map::TypeMapper;
use crate::writer::save_class;

/// Identity of a definition within one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefId {
    Enum(EnumId),
    Struct(StructId),
}

/// One generation run over a schema for one target language.
///
/// The run owns the set of definitions already emitted, so a definition
/// reached through several include paths is generated once and the schema
/// itself stays untouched.
pub struct Generator<'a> {
    pub(crate) schema:  &'a Schema,
    pub(crate) profile: &'static LanguageProfile,
    pub(crate) options: GeneratorOptions,
    pub(crate) types:   TypeMapper<'a>,
    generated: HashSet<DefId>,
}

impl<'a> Generator<'a> {
    pub fn new(
        schema: &'a Schema,
        language: Language,
        options: GeneratorOptions,
    ) -> Result<Self, FlatError> {
        let profile = profile(language)?;
        if !profile.emits_sources {
            return Err(FlatError::UnsupportedLanguage(language.to_string()));
        }

        // Definitions emitted by an earlier compilation are never regenerated.
        let generated = schema
            .enum_ids()
            .filter(|id| schema.enums[id.0].generated)
            .map(DefId::Enum)
            .chain(
                schema
                    .struct_ids()
                    .filter(|id| schema.structs[id.0].generated)
                    .map(DefId::Struct),
            )
            .collect();

        Ok(Generator {
            schema,
            profile,
            options,
            types: TypeMapper::new(profile, schema),
            generated,
        })
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        self.profile
    }

    pub fn is_generated(&self, id: DefId) -> bool {
        self.generated.contains(&id)
    }

    /// Marks `id` as emitted; false when it already was.
    pub(crate) fn mark_generated(&mut self, id: DefId) -> bool {
        let fresh = self.generated.insert(id);
        if !fresh {
            debug!(?id, "skipping already generated definition");
        }
        fresh
    }

    /// Emits every enum, then every struct and table, one file each.
    pub fn run(&mut self, path: &Path) -> Result<Vec<PathBuf>, FlatError> {
        let mut written = Vec::new();

        for id in self.schema.enum_ids() {
            let code = self.gen_enum(id)?;
            let def = self.types.enum_def(id)?;
            let saved = save_class(
                self.profile,
                &self.options,
                &def.namespace,
                &def.name,
                &code,
                path,
                false,
            )?;
            written.extend(saved);
        }

        for id in self.schema.struct_ids() {
            let code = self.gen_struct(id)?;
            let def = self.types.struct_def(id)?;
            let saved = save_class(
                self.profile,
                &self.options,
                &def.namespace,
                &def.name,
                &code,
                path,
                true,
            )?;
            written.extend(saved);
        }

        info!(
            language = %self.profile.language,
            files = written.len(),
            output = %path.display(),
            "code generation complete"
        );
        Ok(written)
    }
}

/// Generates one source file per enum, struct and table of `schema` under
/// `path`.
pub fn generate_general(schema: &Schema, path: &Path, language: Language) -> Result<(), FlatError> {
    generate_general_with_options(schema, path, language, GeneratorOptions::default())
}

pub fn generate_general_with_options(
    schema: &Schema,
    path: &Path,
    language: Language,
    options: GeneratorOptions,
) -> Result<(), FlatError> {
    Generator::new(schema, language, options)?.run(path)?;
    Ok(())
}

/// Renders documentation lines as `///` comments.
pub(crate) fn gen_comment(lines: &[String], prefix: &str) -> String {
    lines
        .iter()
        .map(|line| format!("{}///{}\n", prefix, line))
        .collect()
}
