//! End-to-end workflow generation behaviour.

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use flag_matrix::combine::combination_count;
use flag_matrix::config::GeneratorConfig;
use flag_matrix::error::MatrixError;
use rstest::rstest;
use tempfile::TempDir;

const START: &str = "// flags:begin";
const END: &str = "// flags:end";

fn utf8_root(dir: &TempDir) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non-UTF-8 temp dir: {}", path.display()))
}

fn header_with_flags(idents: &[String]) -> String {
    let mut text = String::from("#pragma once\n");
    text.push_str(START);
    text.push('\n');
    for ident in idents {
        text.push_str("#define ");
        text.push_str(ident);
        text.push('\n');
    }
    text.push_str(END);
    text.push('\n');
    text
}

fn scratch_config(root: &Utf8Path, header: &str) -> Result<GeneratorConfig> {
    let input_path = root.join("header.h");
    std::fs::write(&input_path, header)?;
    Ok(GeneratorConfig {
        input_path,
        output_path: root.join("out").join("workflow.yml").into_string(),
        start_marker: START.to_owned(),
        end_marker: END.to_owned(),
        ..GeneratorConfig::default()
    })
}

fn numbered_flags(n: usize) -> Vec<String> {
    (0..n).map(|index| format!("FLAG_{index}")).collect()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions give clearer intent than error mapping"
)]
fn document_contains_one_job_per_combination_plus_baseline(#[case] n: usize) -> Result<()> {
    let dir = TempDir::new()?;
    let root = utf8_root(&dir)?;
    let config = scratch_config(&root, &header_with_flags(&numbered_flags(n)))?;

    flag_matrix::generate(&config)?;

    let document = std::fs::read_to_string(&config.output_path)?;
    let jobs = u64::try_from(document.matches("runs-on:").count())?;
    assert_eq!(jobs, combination_count(n) + 1);
    assert!(document.contains("  release-test:\n"));
    if n <= 1 {
        assert_eq!(jobs, 1, "degenerate flag sets emit only the baseline job");
    }
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions give clearer intent than error mapping"
)]
fn repeated_runs_are_byte_identical() -> Result<()> {
    let dir = TempDir::new()?;
    let root = utf8_root(&dir)?;
    let config = scratch_config(&root, &header_with_flags(&numbered_flags(4)))?;

    flag_matrix::generate(&config)?;
    let first = std::fs::read(&config.output_path)?;
    flag_matrix::generate(&config)?;
    let second = std::fs::read(&config.output_path)?;

    assert_eq!(first, second);
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions give clearer intent than error mapping"
)]
fn combination_jobs_define_raw_identifiers() -> Result<()> {
    let dir = TempDir::new()?;
    let root = utf8_root(&dir)?;
    let idents = vec!["STACK_USE_POISON".to_owned(), "STACK_USE_CANARY".to_owned()];
    let config = scratch_config(&root, &header_with_flags(&idents))?;

    flag_matrix::generate(&config)?;

    let document = std::fs::read_to_string(&config.output_path)?;
    assert!(document.contains("  STACKUSEPOISON:\n"));
    assert!(document.contains("  STACKUSECANARY:\n"));
    assert!(document.contains(" -D STACK_USE_POISON\"\n"));
    assert!(document.contains(" -D STACK_USE_CANARY\"\n"));
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions give clearer intent than error mapping"
)]
fn missing_end_marker_leaves_existing_output_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let root = utf8_root(&dir)?;
    let header = format!("{START}\n#define FOO_1\n");
    let config = scratch_config(&root, &header)?;

    let out_dir = root.join("out");
    std::fs::create_dir_all(&out_dir)?;
    let out_file = out_dir.join("workflow.yml");
    std::fs::write(&out_file, "sentinel")?;

    match flag_matrix::generate(&config) {
        Err(MatrixError::MissingMarker { marker }) => assert_eq!(marker, END),
        other => panic!("expected MissingMarker, got {other:?}"),
    }

    assert_eq!(std::fs::read_to_string(&out_file)?, "sentinel");
    let leftovers: Vec<String> = std::fs::read_dir(&out_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name != "workflow.yml")
        .collect();
    assert!(leftovers.is_empty(), "unexpected files left behind: {leftovers:?}");
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions give clearer intent than error mapping"
)]
fn display_collision_aborts_before_any_output() -> Result<()> {
    let dir = TempDir::new()?;
    let root = utf8_root(&dir)?;
    let idents = vec!["FOO_BAR".to_owned(), "FO_OBAR".to_owned()];
    let config = scratch_config(&root, &header_with_flags(&idents))?;

    match flag_matrix::generate(&config) {
        Err(MatrixError::NameCollision { display, .. }) => assert_eq!(display, "FOOBAR"),
        other => panic!("expected NameCollision, got {other:?}"),
    }

    assert!(!Utf8Path::new(&config.output_path).exists());
    Ok(())
}
