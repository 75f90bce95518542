//! Locates the block for one image revision in a patch description.
//!
//! Patch descriptions are free text in the style of the DS Scene / OpenPatcher
//! lists:
//!
//! ```text
//! 5584 - Pokemon White Version [B552501C]
//! 00004600: B0 68 8A 00 → 3C 00 9F E5
//! 00004EA4: 1E FF 2F E1 → D5 FD FF EA
//!
//! 5585 - Pokemon Black Version [...]
//! ```
//!
//! Any line containing the checksum text opens the block. The match is plain
//! substring containment, so the first line that happens to contain the text
//! wins, even if it is not meant as a header.

use crate::checksum::Checksum;
use crate::error::*;
use crate::hexfmt;
use crate::patch::{PatchBlock, PatchTriple};
use snafu::{ensure, ResultExt};
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, trace};

/// Separates the find pattern from its replacement.
pub const ARROW: char = '→';

/// Scans `reader` for the block whose header contains `checksum`.
///
/// Returns `Ok(None)` when no line contains the checksum. Triple lines after the
/// header are collected until a blank line that follows at least one triple, or
/// end of stream. A malformed triple inside the block is an error.
pub fn find_block<R: BufRead>(
    mut reader: R,
    checksum: Checksum,
    path: &Path,
) -> Result<Option<PatchBlock>> {
    let needle = checksum.to_string();
    let mut block: Option<PatchBlock> = None;
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).context(ReadPatch { path })? == 0 {
            break;
        }
        number += 1;
        // Scene lists are not always UTF-8; titles may be Latin-1.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if block.is_none() && line.contains(needle.as_str()) {
            debug!(line = number, "header matched {}", needle);
            block = Some(PatchBlock {
                checksum,
                header_line: number,
                triples: Vec::new(),
            });
        }

        let current = match block.as_mut() {
            Some(current) => current,
            None => continue,
        };

        if line.contains(ARROW) {
            let triple = parse_triple(line, number)?;
            trace!(line = number, offset = triple.offset, "triple");
            current.triples.push(triple);
        } else if line.trim().is_empty() && !current.triples.is_empty() {
            debug!(line = number, "end of block");
            break;
        }
    }

    Ok(block)
}

/// Parses `OFFSET:FIND→REPLACE`, ignoring all whitespace.
pub fn parse_triple(line: &str, number: usize) -> Result<PatchTriple> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let fields: Vec<&str> = compact.split(|c: char| c == ':' || c == ARROW).collect();

    let (offset, search, data) = match fields.as_slice() {
        [offset, search, data] => (*offset, *search, *data),
        _ => {
            return MalformedTripleLine {
                line: number,
                text: line,
            }
            .fail()
        }
    };

    let offset = hexfmt::parse_offset(offset).context(InvalidOffset {
        line: number,
        text: offset,
    })?;
    let search = hexfmt::decode(search).context(InvalidHex {
        line: number,
        field: "find",
        text: search,
    })?;
    ensure!(
        !search.is_empty(),
        MalformedTripleLine {
            line: number,
            text: line,
        }
    );
    let data = hexfmt::decode(data).context(InvalidHex {
        line: number,
        field: "replace",
        text: data,
    })?;

    Ok(PatchTriple::new(offset, search, data))
}
