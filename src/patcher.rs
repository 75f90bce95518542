use crate::hexfmt;
use crate::patch::PatchTriple;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::{info, warn};

/// Result of applying one triple.
#[derive(Clone, PartialEq, Debug)]
pub enum Outcome {
    /// Expected bytes were present and have been overwritten. `written` is
    /// read back from the store after the write.
    Applied {
        offset: u64,
        found: Vec<u8>,
        written: Vec<u8>,
    },
    /// The store holds something else at `offset`. Nothing was written.
    Mismatch {
        offset: u64,
        expected: Vec<u8>,
        found: Vec<u8>,
    },
}

/// Reads up to `len` bytes at `offset`. Shorter near end of store.
pub fn read_at<S: Read + Seek>(store: &mut S, offset: u64, len: usize) -> io::Result<Vec<u8>> {
    store.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::with_capacity(len);
    store.by_ref().take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Verifies `triple.search` at `triple.offset` and overwrites it with
/// `triple.data`.
///
/// Replacement bytes overwrite in place: a shorter replacement leaves the tail
/// of the old bytes, a longer one overwrites what follows.
pub fn apply_triple<S: Read + Write + Seek>(
    store: &mut S,
    triple: &PatchTriple,
) -> io::Result<Outcome> {
    let offset = triple.offset;
    let found = read_at(store, offset, triple.search.len())?;

    if found != triple.search {
        return Ok(Outcome::Mismatch {
            offset,
            expected: triple.search.clone(),
            found,
        });
    }

    info!("Found @ 0x{:X}:\t{}", offset, hexfmt::encode(&found));
    if triple.changes_length() {
        warn!(
            "triple at 0x{:X} replaces {} bytes with {}",
            offset,
            triple.search.len(),
            triple.data.len()
        );
    }

    store.seek(SeekFrom::Start(offset))?;
    store.write_all(&triple.data)?;
    store.flush()?;

    let written = read_at(store, offset, triple.data.len())?;
    info!("Replaced with:\t\t{}", hexfmt::encode(&written));

    Ok(Outcome::Applied {
        offset,
        found,
        written,
    })
}
