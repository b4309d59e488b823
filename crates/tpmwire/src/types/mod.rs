//! Composite wire structures built on the primitives and sized buffers.

pub mod clock;
pub mod creation;
pub mod keys;
pub mod nv;
pub mod pcr;
pub mod sensitive;
pub mod signature;

pub use clock::ClockInfo;
pub use creation::CreationData;
pub use keys::{
    EccParams, EccPoint, EccScheme, KdfScheme, KeyedHashParams, KeyedHashScheme, Public,
    RsaParams, RsaScheme, SymCipherParams, SymDefObject, TpmtPublic,
};
pub use nv::{NvIndex, NvPublic};
pub use pcr::{DigestList, PcrSelect, PcrSelection, PcrSelectionList};
pub use sensitive::{SensitiveComposite, SensitiveCreate, TpmtSensitive};
pub use signature::{Signature, SignatureEcc, SignatureRsa};
