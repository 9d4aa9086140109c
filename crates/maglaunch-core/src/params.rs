//! # Parameter Declarations
//!
//! The typed input surface of the nf-core/magmap pipeline.
//!
//! Every pipeline input is declared once, statically, as a [`ParamDecl`]:
//! name, value type, required flag, default, UI section, description.
//! Declarations are immutable after construction and are read in
//! declaration order to render the input form and to derive CLI flags.
//!
//! The single invariant is that names are unique; [`ParamRegistry::new`]
//! enforces it.

use crate::error::ParamError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// PARAMETER TYPES
// =============================================================================

/// The value type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Path to an input file.
    File,
    /// Path to an input directory.
    Directory,
    /// Path to the directory where results are written.
    OutputDirectory,
    /// Free-form text.
    Text,
    /// Boolean toggle.
    Bool,
    /// Integer.
    Int,
    /// Floating-point number.
    Float,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::File => "file path",
            Self::Directory => "directory path",
            Self::OutputDirectory => "output directory path",
            Self::Text => "text",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "float",
        };
        write!(f, "{name}")
    }
}

/// A caller-supplied (or default) parameter value.
///
/// Values arrive as JSON, so the enum is untagged: numbers without a
/// fractional part parse as [`ParamValue::Int`], everything stringy as
/// [`ParamValue::Text`]. Paths are carried as text; the distinction
/// between file, directory, and text lives in the declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean toggle.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text or path.
    Text(String),
}

impl ParamValue {
    /// Check whether this value is acceptable for the declared type.
    ///
    /// Text satisfies every path-like type, and an integer satisfies a
    /// float declaration (`21` is a fine value for a float parameter).
    #[must_use]
    pub fn matches(&self, ty: ParamType) -> bool {
        match self {
            Self::Bool(_) => ty == ParamType::Bool,
            Self::Int(_) => matches!(ty, ParamType::Int | ParamType::Float),
            Self::Float(_) => ty == ParamType::Float,
            Self::Text(_) => matches!(
                ty,
                ParamType::File | ParamType::Directory | ParamType::OutputDirectory | ParamType::Text
            ),
        }
    }

    /// Render the value as it appears on the command line.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

// =============================================================================
// PARAMETER DECLARATION
// =============================================================================

/// A single declared pipeline input.
///
/// Declarations are created at startup and never mutated. The host
/// platform reads them to render an input form and to type-check
/// caller-supplied values; the launcher reads them to derive flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDecl {
    /// Unique parameter name, as it appears after `--` on the command line.
    pub name: &'static str,
    /// Declared value type.
    pub ty: ParamType,
    /// Whether the caller must supply a value.
    pub required: bool,
    /// Declared default, if any.
    pub default: Option<ParamValue>,
    /// UI section this parameter opens, if any. A `None` continues the
    /// previous section.
    pub section_title: Option<&'static str>,
    /// Human-readable description.
    pub description: &'static str,
}

impl ParamDecl {
    const fn new(name: &'static str, ty: ParamType) -> Self {
        Self {
            name,
            ty,
            required: false,
            default: None,
            section_title: None,
            description: "",
        }
    }

    /// Declare an input file parameter.
    #[must_use]
    pub const fn file(name: &'static str) -> Self {
        Self::new(name, ParamType::File)
    }

    /// Declare an output directory parameter.
    #[must_use]
    pub const fn output_directory(name: &'static str) -> Self {
        Self::new(name, ParamType::OutputDirectory)
    }

    /// Declare a text parameter.
    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ParamType::Text)
    }

    /// Declare a boolean toggle.
    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, ParamType::Bool)
    }

    /// Declare an integer parameter.
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ParamType::Int)
    }

    /// Declare a float parameter.
    #[must_use]
    pub const fn float(name: &'static str) -> Self {
        Self::new(name, ParamType::Float)
    }

    /// Mark the parameter as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a declared default.
    #[must_use]
    pub fn with_default(mut self, value: ParamValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Open a new UI section at this parameter.
    #[must_use]
    pub const fn in_section(mut self, title: &'static str) -> Self {
        self.section_title = Some(title);
        self
    }

    /// Attach the human-readable description.
    #[must_use]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

// =============================================================================
// PARAMETER REGISTRY
// =============================================================================

/// The ordered, name-unique collection of parameter declarations.
#[derive(Debug, Clone)]
pub struct ParamRegistry {
    decls: Vec<ParamDecl>,
}

impl ParamRegistry {
    /// Build a registry, enforcing name uniqueness.
    pub fn new(decls: Vec<ParamDecl>) -> Result<Self, ParamError> {
        let mut seen = BTreeSet::new();
        for decl in &decls {
            if !seen.insert(decl.name) {
                return Err(ParamError::DuplicateParam(decl.name.to_string()));
            }
        }
        Ok(Self { decls })
    }

    /// Look up a declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamDecl> {
        self.decls.iter().find(|d| d.name == name)
    }

    /// Iterate declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamDecl> {
        self.decls.iter()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Validate caller-supplied values against the declarations and
    /// return the `(declaration, value)` pairs that must appear on the
    /// command line, in declaration order.
    ///
    /// Values equal to the declared default are dropped: the pipeline's
    /// own configuration already carries its defaults, and re-emitting
    /// them would only obscure what the caller actually chose.
    ///
    /// # Errors
    ///
    /// [`ParamError::UnknownParam`] for values with no declaration,
    /// [`ParamError::TypeMismatch`] for values of the wrong type, and
    /// [`ParamError::MissingRequired`] for absent required parameters.
    pub fn resolve(
        &self,
        supplied: &BTreeMap<String, ParamValue>,
    ) -> Result<Vec<(&ParamDecl, ParamValue)>, ParamError> {
        for name in supplied.keys() {
            if self.get(name).is_none() {
                return Err(ParamError::UnknownParam(name.clone()));
            }
        }

        let mut resolved = Vec::new();
        for decl in &self.decls {
            match supplied.get(decl.name) {
                Some(value) => {
                    if !value.matches(decl.ty) {
                        return Err(ParamError::TypeMismatch {
                            name: decl.name.to_string(),
                            expected: decl.ty,
                        });
                    }
                    if decl.default.as_ref() == Some(value) {
                        continue;
                    }
                    resolved.push((decl, value.clone()));
                }
                None => {
                    if decl.required {
                        return Err(ParamError::MissingRequired(decl.name.to_string()));
                    }
                }
            }
        }
        Ok(resolved)
    }
}

// =============================================================================
// THE MAGMAP PARAMETER TABLE
// =============================================================================

/// The full nf-core/magmap parameter table.
///
/// Declaration order is rendering order. Section titles open form
/// sections; untitled declarations continue the preceding section.
pub fn magmap_registry() -> Result<ParamRegistry, ParamError> {
    ParamRegistry::new(vec![
        ParamDecl::file("input")
            .required()
            .in_section("Input/output options")
            .describe("Path to comma-separated file containing information about the samples in the experiment."),
        ParamDecl::text("genomeinfo")
            .describe("Path to comma-separated file containing information about the genomes."),
        ParamDecl::text("gtdbtk_metadata")
            .describe("Path to comma-separated file containing the output from gtdbtk."),
        ParamDecl::text("ncbi_genome_infos")
            .with_default(ParamValue::from("./assets/ncbi_genome_infos.csv"))
            .describe("Path to txt file with information about genomes in nbci."),
        ParamDecl::text("indexes")
            .describe("Path to .sbt file."),
        ParamDecl::text("gtdb_metadata")
            .describe("Path to comma-separated file containing information from gtdb."),
        ParamDecl::text("checkm_metadata")
            .describe("Path to comma-separated file containing the output from CheckM."),
        ParamDecl::text("email")
            .describe("Email address for completion summary."),
        ParamDecl::text("multiqc_title")
            .describe("MultiQC report title. Printed as page header, used for filename if not otherwise specified."),
        ParamDecl::output_directory("outdir")
            .required()
            .describe("The output directory where the results will be saved. You have to use absolute paths to storage on Cloud infrastructure."),
        ParamDecl::boolean("skip_qc")
            .in_section("Quality control options")
            .describe("Skip all QC steps except for MultiQC."),
        ParamDecl::boolean("skip_fastqc")
            .describe("Skip FastQC."),
        ParamDecl::text("clip_r1")
            .in_section("Trimming options")
            .describe("Instructs Trim Galore to remove bp from the 5' end of read 1 (or single-end reads)."),
        ParamDecl::text("clip_r2")
            .describe("Instructs Trim Galore to remove bp from the 5' end of read 2 (or single-end reads)."),
        ParamDecl::text("three_prime_clip_r1")
            .describe("Instructs Trim Galore to remove bp from the 3' end of read 1 AFTER adapter/quality trimming has been performed."),
        ParamDecl::text("three_prime_clip_r2")
            .describe("Instructs Trim Galore to remove bp from the 3' end of read 2 AFTER adapter/quality trimming has been performed."),
        ParamDecl::text("trim_nextseq")
            .describe("Instructs Trim Galore to apply the --nextseq=X option, to trim based on quality after removing poly-G tails."),
        ParamDecl::boolean("save_trimmed")
            .describe("Save the trimmed FastQ files in the results directory."),
        ParamDecl::boolean("skip_trimming")
            .describe("Skip the adapter trimming step."),
        ParamDecl::text("sequence_filter")
            .in_section("BBtools options")
            .describe("Instructs BBduk to use a fasta file to filter away sequences before running further analysis."),
        ParamDecl::float("bbmap_minid")
            .with_default(ParamValue::from(0.9))
            .describe("Minimal identity for BBmap"),
        ParamDecl::boolean("save_bam")
            .describe("Save bam output file"),
        ParamDecl::boolean("sourmash")
            .in_section("Sourmash")
            .describe("Activate Sourmash"),
        ParamDecl::integer("ksize")
            .with_default(ParamValue::from(21))
            .describe("K-mer size used by Sourmash"),
        ParamDecl::text("multiqc_methods_description")
            .in_section("Generic options")
            .describe("Custom MultiQC yaml file containing HTML including a methods description."),
    ])
}

// =============================================================================
// TESTS
// =============================================================================
