//! # Command Derivation
//!
//! Turns resolved parameters into the Nextflow command line.
//!
//! The base invocation is fixed; the only variable part is one
//! `--<name> <value>` pair per resolved parameter (boolean toggles emit
//! the bare flag when true and nothing when false).

use crate::params::{ParamDecl, ParamValue};
use std::path::Path;

/// Fixed path of the pipeline runner inside the task image.
pub const RUNNER_PATH: &str = "/root/nextflow";

/// Entry script of the staged pipeline, relative to the shared dir.
pub const PIPELINE_SCRIPT: &str = "main.nf";

/// Execution profile passed to the runner.
pub const RUN_PROFILE: &str = "docker";

/// Platform-specific runner configuration file.
pub const RUN_CONFIG: &str = "latch.config";

/// Derive the CLI tokens for one resolved parameter.
///
/// A true boolean emits the bare flag, a false boolean emits nothing,
/// and every other value emits exactly one `--<name> <value>` pair.
#[must_use]
pub fn get_flag(decl: &ParamDecl, value: &ParamValue) -> Vec<String> {
    match value {
        ParamValue::Bool(true) => vec![format!("--{}", decl.name)],
        ParamValue::Bool(false) => Vec::new(),
        other => vec![format!("--{}", decl.name), other.render()],
    }
}

/// Assemble the full runner argv.
///
/// Fixed base arguments first, then one flag group per resolved
/// parameter, in declaration order.
#[must_use]
pub fn build_command(
    runner: &Path,
    shared_dir: &Path,
    resolved: &[(&ParamDecl, ParamValue)],
) -> Vec<String> {
    let mut cmd = vec![
        runner.display().to_string(),
        "run".to_string(),
        shared_dir.join(PIPELINE_SCRIPT).display().to_string(),
        "-work-dir".to_string(),
        shared_dir.display().to_string(),
        "-profile".to_string(),
        RUN_PROFILE.to_string(),
        "-c".to_string(),
        RUN_CONFIG.to_string(),
    ];
    for (decl, value) in resolved {
        cmd.extend(get_flag(decl, value));
    }
    cmd
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParamValue, magmap_registry};
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn base_supplied() -> BTreeMap<String, ParamValue> {
        let mut supplied = BTreeMap::new();
        supplied.insert("input".to_string(), ParamValue::from("samples.csv"));
        supplied.insert("outdir".to_string(), ParamValue::from("/data/out"));
        supplied
    }

    fn command_for(supplied: &BTreeMap<String, ParamValue>) -> Vec<String> {
        let reg = magmap_registry().expect("static table must be valid");
        let resolved = reg.resolve(supplied).expect("valid parameters");
        build_command(
            &PathBuf::from(RUNNER_PATH),
            &PathBuf::from("/nf-workdir"),
            &resolved,
        )
    }

    #[test]
    fn base_arguments_are_fixed() {
        let cmd = command_for(&base_supplied());
        assert_eq!(
            &cmd[..9],
            &[
                "/root/nextflow",
                "run",
                "/nf-workdir/main.nf",
                "-work-dir",
                "/nf-workdir",
                "-profile",
                "docker",
                "-c",
                "latch.config",
            ]
        );
    }

    #[test]
    fn supplied_value_emits_exactly_one_flag() {
        let mut supplied = base_supplied();
        supplied.insert("bbmap_minid".to_string(), ParamValue::from(0.95));
        let cmd = command_for(&supplied);

        let hits: Vec<_> = cmd
            .iter()
            .enumerate()
            .filter(|(_, tok)| *tok == "--bbmap_minid")
            .collect();
        assert_eq!(hits.len(), 1);
        let (idx, _) = hits[0];
        assert_eq!(cmd[idx + 1], "0.95");
    }

    #[test]
    fn unset_parameter_emits_no_flag() {
        let cmd = command_for(&base_supplied());
        assert!(!cmd.iter().any(|tok| tok == "--ksize"));
        assert!(!cmd.iter().any(|tok| tok == "--bbmap_minid"));
        assert!(!cmd.iter().any(|tok| tok == "--sourmash"));
    }

    #[test]
    fn default_valued_parameter_emits_no_flag() {
        let mut supplied = base_supplied();
        supplied.insert("ksize".to_string(), ParamValue::from(21));
        supplied.insert(
            "ncbi_genome_infos".to_string(),
            ParamValue::from("./assets/ncbi_genome_infos.csv"),
        );
        let cmd = command_for(&supplied);
        assert!(!cmd.iter().any(|tok| tok == "--ksize"));
        assert!(!cmd.iter().any(|tok| tok == "--ncbi_genome_infos"));
    }

    #[test]
    fn true_boolean_emits_bare_flag() {
        let mut supplied = base_supplied();
        supplied.insert("sourmash".to_string(), ParamValue::from(true));
        let cmd = command_for(&supplied);
        let idx = cmd
            .iter()
            .position(|tok| tok == "--sourmash")
            .expect("flag present");
        // Bare flag: the next token is not a value for it
        assert_ne!(cmd.get(idx + 1).map(String::as_str), Some("true"));
    }

    #[test]
    fn false_boolean_emits_nothing() {
        let mut supplied = base_supplied();
        supplied.insert("skip_qc".to_string(), ParamValue::from(false));
        let cmd = command_for(&supplied);
        assert!(!cmd.iter().any(|tok| tok == "--skip_qc"));
    }

    #[test]
    fn integer_flag_renders_value() {
        let mut supplied = base_supplied();
        supplied.insert("ksize".to_string(), ParamValue::from(31));
        let cmd = command_for(&supplied);
        let idx = cmd
            .iter()
            .position(|tok| tok == "--ksize")
            .expect("flag present");
        assert_eq!(cmd[idx + 1], "31");
    }

    proptest! {
        /// Any non-default text value for a text parameter yields exactly
        /// one flag pair carrying that value verbatim.
        #[test]
        fn text_value_roundtrips_into_one_flag(value in "[a-zA-Z0-9./_-]{1,40}") {
            prop_assume!(value != "./assets/ncbi_genome_infos.csv");
            let mut supplied = base_supplied();
            supplied.insert("ncbi_genome_infos".to_string(), ParamValue::Text(value.clone()));
            let cmd = command_for(&supplied);
            let hits: Vec<_> = cmd
                .iter()
                .enumerate()
                .filter(|(_, tok)| *tok == "--ncbi_genome_infos")
                .collect();
            prop_assert_eq!(hits.len(), 1);
            prop_assert_eq!(&cmd[hits[0].0 + 1], &value);
        }
    }
}
