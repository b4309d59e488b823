//! Non-volatile index definitions.

use crate::algs::HashAlg;
use crate::attributes::NvAttributes;
use crate::buffer::Tpm2bDigest;
use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// A validated NV index handle (`TPMI_RH_NV_INDEX`).
///
/// NV index handles live in the `0x01xx_xxxx` handle range; anything
/// else is some other handle type and is rejected at decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NvIndex(u32);

impl NvIndex {
    const HANDLE_TYPE: u32 = 0x0100_0000;
    const HANDLE_MASK: u32 = 0xff00_0000;

    /// Validate a raw handle as an NV index.
    pub fn new(handle: u32) -> Result<Self> {
        if handle & Self::HANDLE_MASK != Self::HANDLE_TYPE {
            return Err(CodecError::ValueOutOfRange {
                field: "NV index handle",
                value: handle,
            });
        }
        Ok(Self(handle))
    }

    /// The raw handle value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Marshal for NvIndex {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u32(self.0)
    }

    fn wire_size(&self) -> usize {
        4
    }
}

impl Unmarshal for NvIndex {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Self::new(r.read_u32()?)
    }
}

/// The public definition of an NV index (`TPMS_NV_PUBLIC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NvPublic {
    /// The index handle.
    pub nv_index: NvIndex,
    /// Hash used to compute the index name.
    pub name_alg: HashAlg,
    /// NV attribute word.
    pub attributes: NvAttributes,
    /// Policy digest gating access; may be empty.
    pub auth_policy: Tpm2bDigest,
    /// Size of the index data area in bytes.
    pub data_size: u16,
}

impl Marshal for NvPublic {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.nv_index.marshal(w)?;
        self.name_alg.marshal(w)?;
        self.attributes.marshal(w)?;
        self.auth_policy.marshal(w)?;
        w.put_u16(self.data_size)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.nv_index.wire_size()
            + self.name_alg.wire_size()
            + self.attributes.wire_size()
            + self.auth_policy.wire_size()
            + 2
    }
}

impl Unmarshal for NvPublic {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let nv_index = NvIndex::unmarshal(r)?;
        let name_alg = HashAlg::unmarshal(r)?;
        let attributes = NvAttributes::unmarshal(r)?;
        let auth_policy = Tpm2bDigest::unmarshal(r)?;
        let data_size = r.read_u16()?;
        Ok(Self {
            nv_index,
            name_alg,
            attributes,
            auth_policy,
            data_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CodecError, NvIndex, NvPublic, Result};
    use crate::algs::HashAlg;
    use crate::attributes::NvAttributes;
    use crate::buffer::Tpm2bDigest;
    use crate::wire::{Marshal, Unmarshal};

    #[test]
    fn handles_outside_the_nv_range_are_rejected() {
        // 0x81xx_xxxx is a persistent-object handle, not an NV index.
        let err = NvIndex::new(0x8100_0001);
        assert_eq!(
            err.map(|_| ()),
            Err(CodecError::ValueOutOfRange {
                field: "NV index handle",
                value: 0x8100_0001,
            })
        );
    }

    #[test]
    fn nv_public_round_trips() -> Result<()> {
        let public = NvPublic {
            nv_index: NvIndex::new(0x0150_0020)?,
            name_alg: HashAlg::Sha256,
            attributes: NvAttributes::OWNERWRITE | NvAttributes::OWNERREAD,
            auth_policy: Tpm2bDigest::new(),
            data_size: 64,
        };
        let bytes = public.to_vec()?;
        assert_eq!(bytes.len(), public.wire_size());
        assert_eq!(NvPublic::from_wire(&bytes)?, public);
        Ok(())
    }
}
