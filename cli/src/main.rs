use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use brine_flat::{
    binary_make_rule, generate_binary, generate_general_with_options, generate_make_rule,
    load_schema, GeneratorOptions,
};
use brine_flat_compiler::error::FlatError;
use brine_flat_compiler::options::DEFAULT_MAX_SPARSENESS;
use brine_flat_schema::layout::verify_layout;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bflat")]
#[command(about = "Generate Java or C# accessors, make rules and binaries from Brine Flat schemas", long_about = None)]
struct Cli {
    /// Log every written file and skipped definition
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one source file per enum, struct and table
    Generate {
        /// Parsed schema, as JSON
        #[arg(short, long)]
        schema: PathBuf,

        #[arg(short, long, value_enum)]
        language: Language,

        /// Root directory of the generated packages
        #[arg(short, long)]
        output: PathBuf,

        /// Enums whose values are sparser than this get no name table
        #[arg(long, default_value_t = DEFAULT_MAX_SPARSENESS)]
        max_sparseness: i64,

        /// Check the supplied struct and table layout before generating
        #[arg(long)]
        verify_layout: bool,
    },

    /// Print the make rule for the files `generate` would write
    MakeRule {
        #[arg(short, long)]
        schema: PathBuf,

        #[arg(short, long, value_enum)]
        language: Language,

        #[arg(short, long)]
        output: PathBuf,

        /// Schema source file the rule depends on
        #[arg(short, long)]
        file: String,
    },

    /// Write the binary buffer carried by the schema
    Binary {
        #[arg(short, long)]
        schema: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Data file the buffer was parsed from
        #[arg(short, long)]
        file: String,

        /// Print the make rule instead of writing the buffer
        #[arg(long)]
        make_rule: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Language {
    Java,
    #[value(name = "csharp")]
    CSharp,
    /// Make rules only
    Go,
}

impl From<Language> for brine_flat::Language {
    fn from(lang: Language) -> Self {
        match lang {
            Language::Java => brine_flat::Language::Java,
            Language::CSharp => brine_flat::Language::CSharp,
            Language::Go => brine_flat::Language::Go,
        }
    }
}

fn main() -> Result<(), FlatError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Generate {
            schema,
            language,
            output,
            max_sparseness,
            verify_layout: verify,
        } => {
            let schema = load_schema(&schema)?;
            if verify {
                verify_layout(&schema)?;
            }
            let options = GeneratorOptions::new().max_sparseness(max_sparseness);
            generate_general_with_options(&schema, &output, language.into(), options)?;
            Ok(())
        }

        Commands::MakeRule {
            schema,
            language,
            output,
            file,
        } => {
            let schema = load_schema(&schema)?;
            println!("{}", generate_make_rule(&schema, &output, &file, language.into())?);
            Ok(())
        }

        Commands::Binary {
            schema,
            output,
            file,
            make_rule,
        } => {
            let schema = load_schema(&schema)?;
            if make_rule {
                println!("{}", binary_make_rule(&schema, &output, &file));
                return Ok(());
            }
            let base = Path::new(&file)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or(file);
            if let Some(path) = generate_binary(&schema, &output, &base)? {
                info!(path = %path.display(), "wrote binary");
            } else {
                info!("schema carries no binary buffer");
            }
            Ok(())
        }
    }
}
