use crate::checksum::Checksum;
use crate::hexfmt;
use serde::Serialize;

/// Edits for one image revision, in file order.
#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct PatchBlock {
    pub checksum: Checksum,
    /// 1-based line of the header that matched.
    pub header_line: usize,
    pub triples: Vec<PatchTriple>,
}

/// One `OFFSET:FIND→REPLACE` instruction.
#[derive(Clone, Serialize, PartialEq, Debug, Default)]
pub struct PatchTriple {
    pub offset: u64,
    #[serde(serialize_with = "hexfmt::serialize")]
    pub search: Vec<u8>,
    #[serde(serialize_with = "hexfmt::serialize")]
    pub data: Vec<u8>,
}

impl PatchTriple {
    pub fn new(offset: u64, search: Vec<u8>, data: Vec<u8>) -> Self {
        PatchTriple {
            offset,
            search,
            data,
        }
    }

    /// Replacement length differs from the bytes it replaces.
    pub fn changes_length(&self) -> bool {
        self.search.len() != self.data.len()
    }
}
