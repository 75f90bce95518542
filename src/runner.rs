use crate::checksum::Checksum;
use crate::error::*;
use crate::parser;
use crate::patcher::{self, Outcome};
use crate::hexfmt;
use serde::Serialize;
use snafu::{ensure, ResultExt};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Summary of a completed run.
#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct Report {
    pub input: PathBuf,
    pub patch: PathBuf,
    pub output: PathBuf,
    pub input_checksum: Checksum,
    pub header_line: usize,
    pub applied: Vec<AppliedTriple>,
    pub output_checksum: Checksum,
}

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct AppliedTriple {
    pub offset: u64,
    #[serde(serialize_with = "hexfmt::serialize")]
    pub found: Vec<u8>,
    #[serde(serialize_with = "hexfmt::serialize")]
    pub written: Vec<u8>,
}

/// Patches a copy of `input` into `output` using the block of `patch` that
/// matches the input checksum.
///
/// `output` is created as a copy of `input` when absent; an existing file is
/// patched as is. The first mismatching triple aborts the run and leaves the
/// partially patched output on disk.
pub fn run(input: &Path, patch: &Path, output: &Path) -> Result<Report> {
    check_paths(input, patch, output)?;

    let rom = fs::read(input).context(ReadInput { path: input })?;
    let input_checksum = Checksum::compute(&rom);
    info!("Input ROM: {} (CRC32: {})", input.display(), input_checksum);
    drop(rom);

    let reader = BufReader::new(File::open(patch).context(ReadPatch { path: patch })?);
    let block = match parser::find_block(reader, input_checksum, patch)? {
        Some(block) => block,
        None => {
            return ChecksumNotMatched {
                checksum: input_checksum,
            }
            .fail()
        }
    };
    info!(
        "Patch for {} found on line {}",
        input_checksum, block.header_line
    );

    if !output.exists() {
        debug!("copying {} to {}", input.display(), output.display());
        fs::copy(input, output).context(CopyOutput {
            from: input,
            to: output,
        })?;
    }

    let mut rom = OpenOptions::new()
        .read(true)
        .write(true)
        .open(output)
        .context(WriteOutput { path: output })?;

    let mut applied = Vec::with_capacity(block.triples.len());
    for triple in &block.triples {
        match patcher::apply_triple(&mut rom, triple).context(WriteOutput { path: output })? {
            Outcome::Applied {
                offset,
                found,
                written,
            } => applied.push(AppliedTriple {
                offset,
                found,
                written,
            }),
            Outcome::Mismatch {
                offset,
                expected,
                found,
            } => {
                return ByteMismatch {
                    offset,
                    expected,
                    found,
                }
                .fail()
            }
        }
    }
    rom.sync_all().context(WriteOutput { path: output })?;
    drop(rom);

    let patched = fs::read(output).context(WriteOutput { path: output })?;
    let output_checksum = Checksum::compute(&patched);
    info!("Output ROM: {} (CRC32: {})", output.display(), output_checksum);

    Ok(Report {
        input: input.to_path_buf(),
        patch: patch.to_path_buf(),
        output: output.to_path_buf(),
        input_checksum,
        header_line: block.header_line,
        applied,
        output_checksum,
    })
}

/// Fails unless `input` and `patch` exist and `output` is a different file
/// from `input`. Nothing is touched.
pub fn check_paths(input: &Path, patch: &Path, output: &Path) -> Result<()> {
    ensure!(input.exists(), InputNotFound { path: input });
    ensure!(patch.exists(), PatchFileNotFound { path: patch });
    if output.exists() {
        let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        ensure!(!same, OutputIsInput { path: output });
    }
    Ok(())
}

/// Deletes a leftover output image so the run starts from a fresh copy.
pub fn remove_stale_output(output: &Path) -> Result<()> {
    if output.exists() {
        debug!("removing existing {}", output.display());
        fs::remove_file(output).context(RemoveOutput { path: output })?;
    }
    Ok(())
}

/// Writes `report` as pretty-printed JSON.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let file = File::create(path).context(WriteReport { path })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context(SerializeReport { path })?;
    writer.flush().context(WriteReport { path })?;
    Ok(())
}
