use crate::checksum::Checksum;
use crate::hexfmt;
use snafu::Snafu;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum Error {
    #[snafu(display("Input image {} does not exist", path.display()))]
    InputNotFound { path: PathBuf },

    #[snafu(display("Patch file {} does not exist", path.display()))]
    PatchFileNotFound { path: PathBuf },

    #[snafu(display("Unable to read input image {}: {}", path.display(), source))]
    ReadInput { path: PathBuf, source: io::Error },

    #[snafu(display("Unable to read patch file {}: {}", path.display(), source))]
    ReadPatch { path: PathBuf, source: io::Error },

    #[snafu(display("Unable to copy {} to {}: {}", from.display(), to.display(), source))]
    CopyOutput {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[snafu(display("Unable to patch output image {}: {}", path.display(), source))]
    WriteOutput { path: PathBuf, source: io::Error },

    #[snafu(display("Unable to remove stale output {}: {}", path.display(), source))]
    RemoveOutput { path: PathBuf, source: io::Error },

    #[snafu(display("Output {} is the input image", path.display()))]
    OutputIsInput { path: PathBuf },

    #[snafu(display("Unable to write report {}: {}", path.display(), source))]
    WriteReport { path: PathBuf, source: io::Error },

    #[snafu(display("Unable to serialize report {}: {}", path.display(), source))]
    SerializeReport {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("No matching patch found for {}", checksum))]
    ChecksumNotMatched { checksum: Checksum },

    #[snafu(display(
        "{} not found at 0x{:X} (found {}), patching failed",
        hexfmt::encode(expected),
        offset,
        hexfmt::encode(found)
    ))]
    ByteMismatch {
        offset: u64,
        expected: Vec<u8>,
        found: Vec<u8>,
    },

    #[snafu(display("Line {}: expected OFFSET:FIND→REPLACE, got {:?}", line, text))]
    MalformedTripleLine { line: usize, text: String },

    #[snafu(display("Line {}: bad offset {:?}: {}", line, text, source))]
    InvalidOffset {
        line: usize,
        text: String,
        source: ParseIntError,
    },

    #[snafu(display("Line {}: bad {} bytes {:?}: {}", line, field, text, source))]
    InvalidHex {
        line: usize,
        field: &'static str,
        text: String,
        source: hex::FromHexError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Process status for this failure. Patch selection and verification
    /// failures are kept apart from plain file errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ChecksumNotMatched { .. } => 2,
            Error::ByteMismatch { .. } => 3,
            Error::MalformedTripleLine { .. }
            | Error::InvalidOffset { .. }
            | Error::InvalidHex { .. } => 4,
            _ => 1,
        }
    }
}
