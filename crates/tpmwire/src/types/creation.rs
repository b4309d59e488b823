//! Creation data attested by the TPM when an object is made.

use crate::algs::AlgId;
use crate::buffer::{Tpm2bData, Tpm2bDigest, Tpm2bName};
use crate::errors::Result;
use crate::types::pcr::PcrSelectionList;
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// The environment an object was created in (`TPMS_CREATION_DATA`).
///
/// `parent_name_alg` is a raw [`AlgId`] rather than a validated hash:
/// a hierarchy-handle parent has no name algorithm and reports the
/// null algorithm here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationData {
    /// PCR banks and registers captured at creation.
    pub pcr_select: PcrSelectionList,
    /// Digest of the selected PCR values.
    pub pcr_digest: Tpm2bDigest,
    /// Locality attribute at creation.
    pub locality: u8,
    /// Name algorithm of the parent, or null for a hierarchy parent.
    pub parent_name_alg: AlgId,
    /// Name of the parent.
    pub parent_name: Tpm2bName,
    /// Qualified name of the parent.
    pub parent_qualified_name: Tpm2bName,
    /// Caller-supplied label data.
    pub outside_info: Tpm2bData,
}

impl Marshal for CreationData {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.pcr_select.marshal(w)?;
        self.pcr_digest.marshal(w)?;
        w.put_u8(self.locality)?;
        self.parent_name_alg.marshal(w)?;
        self.parent_name.marshal(w)?;
        self.parent_qualified_name.marshal(w)?;
        self.outside_info.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.pcr_select.wire_size()
            + self.pcr_digest.wire_size()
            + 1
            + self.parent_name_alg.wire_size()
            + self.parent_name.wire_size()
            + self.parent_qualified_name.wire_size()
            + self.outside_info.wire_size()
    }
}

impl Unmarshal for CreationData {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let pcr_select = PcrSelectionList::unmarshal(r)?;
        let pcr_digest = Tpm2bDigest::unmarshal(r)?;
        let locality = r.read_u8()?;
        let parent_name_alg = AlgId::unmarshal(r)?;
        let parent_name = Tpm2bName::unmarshal(r)?;
        let parent_qualified_name = Tpm2bName::unmarshal(r)?;
        let outside_info = Tpm2bData::unmarshal(r)?;
        Ok(Self {
            pcr_select,
            pcr_digest,
            locality,
            parent_name_alg,
            parent_name,
            parent_qualified_name,
            outside_info,
        })
    }
}
