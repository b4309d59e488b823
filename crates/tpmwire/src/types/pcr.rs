//! PCR selections and digest lists.

use crate::algs::HashAlg;
use crate::buffer::Tpm2bDigest;
use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// Maximum PCR select mask size in bytes (24 PCRs, one bit each).
pub const PCR_SELECT_MAX: usize = 3;
/// Maximum number of selections in a [`PcrSelectionList`].
pub const MAX_PCR_SELECTIONS: usize = 5;
/// Maximum number of digests in a [`DigestList`].
pub const MAX_DIGESTS: usize = 8;

/// A PCR bitmap with a 2-byte size prefix.
///
/// Bit `i % 8` of mask byte `i / 8` selects PCR `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PcrSelect {
    size: u16,
    mask: [u8; PCR_SELECT_MAX],
}

impl PcrSelect {
    /// An all-clear mask covering `size` bytes of PCRs.
    pub fn all_clear(size: usize) -> Result<Self> {
        if size > PCR_SELECT_MAX {
            return Err(CodecError::SizeExceeded {
                size,
                capacity: PCR_SELECT_MAX,
            });
        }
        Ok(Self {
            size: size as u16,
            mask: [0u8; PCR_SELECT_MAX],
        })
    }

    /// Create a mask from raw bytes.
    pub fn from_mask(mask: &[u8]) -> Result<Self> {
        if mask.len() > PCR_SELECT_MAX {
            return Err(CodecError::SizeExceeded {
                size: mask.len(),
                capacity: PCR_SELECT_MAX,
            });
        }
        let mut bytes = [0u8; PCR_SELECT_MAX];
        bytes[..mask.len()].copy_from_slice(mask);
        Ok(Self {
            size: mask.len() as u16,
            mask: bytes,
        })
    }

    /// Select PCR `index`, growing the declared mask size to cover it.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let byte = index / 8;
        if byte >= PCR_SELECT_MAX {
            return Err(CodecError::SizeExceeded {
                size: byte + 1,
                capacity: PCR_SELECT_MAX,
            });
        }
        self.mask[byte] |= 1 << (index % 8);
        if (byte + 1) as u16 > self.size {
            self.size = (byte + 1) as u16;
        }
        Ok(())
    }

    /// Whether PCR `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        let byte = index / 8;
        byte < self.size as usize && self.mask[byte] & (1 << (index % 8)) != 0
    }

    /// The mask bytes covered by the declared size.
    pub fn as_slice(&self) -> &[u8] {
        &self.mask[..self.size as usize]
    }
}

impl Marshal for PcrSelect {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u16(self.size)?;
        w.put_bytes(self.as_slice())?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        2 + self.size as usize
    }
}

impl Unmarshal for PcrSelect {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let size = r.read_u16()?;
        if size as usize > PCR_SELECT_MAX {
            return Err(CodecError::SizeExceeded {
                size: size as usize,
                capacity: PCR_SELECT_MAX,
            });
        }
        let data = r.read_bytes(size as usize)?;
        let mut mask = [0u8; PCR_SELECT_MAX];
        mask[..data.len()].copy_from_slice(data);
        Ok(Self { size, mask })
    }
}

/// A PCR selection for one hash bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcrSelection {
    /// The bank's hash algorithm.
    pub hash: HashAlg,
    /// Which PCRs of the bank are selected.
    pub select: PcrSelect,
}

impl Marshal for PcrSelection {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.hash.marshal(w)?;
        self.select.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.hash.wire_size() + self.select.wire_size()
    }
}

impl Unmarshal for PcrSelection {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let hash = HashAlg::unmarshal(r)?;
        let select = PcrSelect::unmarshal(r)?;
        Ok(Self { hash, select })
    }
}

/// A count-prefixed list of PCR selections, one per bank.
#[derive(Debug, Clone, Copy)]
pub struct PcrSelectionList {
    count: u32,
    selections: [PcrSelection; MAX_PCR_SELECTIONS],
}

impl PcrSelectionList {
    /// Create a list from a slice of selections.
    pub fn new(selections: &[PcrSelection]) -> Result<Self> {
        if selections.len() > MAX_PCR_SELECTIONS {
            return Err(CodecError::SizeExceeded {
                size: selections.len(),
                capacity: MAX_PCR_SELECTIONS,
            });
        }
        // Unused slots are never marshaled or compared; any filler works.
        let filler = PcrSelection {
            hash: HashAlg::Sha256,
            select: PcrSelect::default(),
        };
        let mut base = [filler; MAX_PCR_SELECTIONS];
        base[..selections.len()].copy_from_slice(selections);
        Ok(Self {
            count: selections.len() as u32,
            selections: base,
        })
    }

    /// The populated selections.
    pub fn as_slice(&self) -> &[PcrSelection] {
        &self.selections[..self.count as usize]
    }

    /// Number of populated selections.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl PartialEq for PcrSelectionList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PcrSelectionList {}

impl Marshal for PcrSelectionList {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u32(self.count)?;
        for selection in self.as_slice() {
            selection.marshal(w)?;
        }
        Ok(())
    }

    fn wire_size(&self) -> usize {
        4 + self
            .as_slice()
            .iter()
            .map(Marshal::wire_size)
            .sum::<usize>()
    }
}

impl Unmarshal for PcrSelectionList {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let count = r.read_u32()?;
        // Bound the count before decoding any element.
        if count as usize > MAX_PCR_SELECTIONS {
            return Err(CodecError::SizeExceeded {
                size: count as usize,
                capacity: MAX_PCR_SELECTIONS,
            });
        }
        let filler = PcrSelection {
            hash: HashAlg::Sha256,
            select: PcrSelect::default(),
        };
        let mut selections = [filler; MAX_PCR_SELECTIONS];
        for slot in selections.iter_mut().take(count as usize) {
            *slot = PcrSelection::unmarshal(r)?;
        }
        Ok(Self { count, selections })
    }
}

/// A count-prefixed list of digests.
#[derive(Debug, Clone, Copy)]
pub struct DigestList {
    count: u32,
    digests: [Tpm2bDigest; MAX_DIGESTS],
}

impl DigestList {
    /// Create a list from a slice of digests.
    pub fn new(digests: &[Tpm2bDigest]) -> Result<Self> {
        if digests.len() > MAX_DIGESTS {
            return Err(CodecError::SizeExceeded {
                size: digests.len(),
                capacity: MAX_DIGESTS,
            });
        }
        let mut base = [Tpm2bDigest::new(); MAX_DIGESTS];
        base[..digests.len()].copy_from_slice(digests);
        Ok(Self {
            count: digests.len() as u32,
            digests: base,
        })
    }

    /// The populated digests.
    pub fn as_slice(&self) -> &[Tpm2bDigest] {
        &self.digests[..self.count as usize]
    }

    /// Number of populated digests.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl PartialEq for DigestList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for DigestList {}

impl Marshal for DigestList {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u32(self.count)?;
        for digest in self.as_slice() {
            digest.marshal(w)?;
        }
        Ok(())
    }

    fn wire_size(&self) -> usize {
        4 + self
            .as_slice()
            .iter()
            .map(Marshal::wire_size)
            .sum::<usize>()
    }
}

impl Unmarshal for DigestList {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let count = r.read_u32()?;
        if count as usize > MAX_DIGESTS {
            return Err(CodecError::SizeExceeded {
                size: count as usize,
                capacity: MAX_DIGESTS,
            });
        }
        let mut digests = [Tpm2bDigest::new(); MAX_DIGESTS];
        for slot in digests.iter_mut().take(count as usize) {
            *slot = Tpm2bDigest::unmarshal(r)?;
        }
        Ok(Self { count, digests })
    }
}
