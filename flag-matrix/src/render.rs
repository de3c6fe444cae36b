//! Workflow document rendering.
//!
//! Renders the GitHub Actions document as plain text against any writer, so
//! emission can be tested without touching the filesystem. Jobs are streamed
//! one combination at a time; the document is never held in memory.

use std::io::{self, Write};

use crate::flags::{Flag, FlagSet};

/// Name of the job built without any flag defines.
pub const BASELINE_JOB_NAME: &str = "release-test";

/// Build profile used by the baseline job.
const BASELINE_PROFILE: &str = "Release";

/// Build profile used by every combination job; carries the sanitizers.
const COMBINATION_PROFILE: &str = "Sanitizer";

/// Fixed document header: workflow name, triggers, and environment.
const PREAMBLE: &str = "\
name: CMake
on:
  push:
    branches: [ master ]
  pull_request:
    branches: [ master ]

env:
  BUILD_TYPE: Release

jobs:
";

/// Joins the display names of a combination into its job name.
#[must_use]
pub fn job_name(combination: &[&Flag]) -> String {
    combination
        .iter()
        .map(|flag| flag.display.as_str())
        .collect::<Vec<_>>()
        .join("-")
}

/// Streams the full workflow document for `flags` into `out`.
///
/// The baseline job is emitted first, followed by one job per combination in
/// enumeration order.
///
/// # Errors
///
/// Propagates any write failure from the sink.
pub fn write_document<W: Write + ?Sized>(
    out: &mut W,
    flags: &FlagSet,
    define_prefix: &str,
) -> io::Result<()> {
    out.write_all(PREAMBLE.as_bytes())?;
    write_baseline_job(out)?;
    for combination in flags.combinations() {
        writeln!(out)?;
        write_combination_job(out, &combination, define_prefix)?;
    }
    Ok(())
}

fn write_baseline_job<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "  {BASELINE_JOB_NAME}:")?;
    write_job_header(out)?;
    writeln!(out, "    - name: Configure CMake")?;
    writeln!(
        out,
        "      run: cmake -B ${{{{github.workspace}}}}/build -DCMAKE_BUILD_TYPE={BASELINE_PROFILE}"
    )?;
    write_build_and_test(out, BASELINE_PROFILE)
}

fn write_combination_job<W: Write + ?Sized>(
    out: &mut W,
    combination: &[&Flag],
    define_prefix: &str,
) -> io::Result<()> {
    writeln!(out, "  {}:", job_name(combination))?;
    write_job_header(out)?;
    writeln!(out, "    - name: Configure CMake")?;
    write!(
        out,
        "      run: cmake -B ${{{{github.workspace}}}}/build -DCMAKE_BUILD_TYPE={COMBINATION_PROFILE} -D CMAKE_CXX_FLAGS=\"${{CMAKE_CXX_FLAGS}}"
    )?;
    for flag in combination {
        write!(out, " {define_prefix} {}", flag.ident)?;
    }
    writeln!(out, "\"")?;
    write_build_and_test(out, COMBINATION_PROFILE)
}

fn write_job_header<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "    runs-on: ubuntu-latest")?;
    writeln!(out, "    timeout-minutes: 10")?;
    writeln!(out)?;
    writeln!(out, "    steps:")?;
    writeln!(out, "    - uses: actions/checkout@v2")?;
    writeln!(out)
}

fn write_build_and_test<W: Write + ?Sized>(out: &mut W, profile: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "    - name: Build")?;
    writeln!(
        out,
        "      run: cmake --build ${{{{github.workspace}}}}/build --config {profile}"
    )?;
    writeln!(out)?;
    writeln!(out, "    - name: Test")?;
    writeln!(out, "      working-directory: ${{{{github.workspace}}}}/build/")?;
    writeln!(out, "      run: ./stack-test")?;
    Ok(())
}
