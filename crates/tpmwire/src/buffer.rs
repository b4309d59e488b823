//! Capacity-bounded sized buffers (`TPM2B` fields).
//!
//! Every variable-length buffer on the wire has a compile-time protocol
//! maximum; validating against that maximum before touching memory is
//! what keeps both legitimate and adversarial size fields from driving a
//! write past the end of the field. The capacity is part of the type, so
//! the bound cannot be passed wrongly at a call site.
//!
//! Wire form: a 2-byte size followed by exactly that many payload bytes.

use std::fmt;

use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// Maximum digest size carried in digest-sized buffers (SHA-512).
pub const MAX_DIGEST_SIZE: usize = 64;
/// Maximum symmetric key size in bytes (AES-256).
pub const MAX_SYM_KEY_SIZE: usize = 32;
/// Maximum seal/keyed-hash sensitive data size.
pub const MAX_SENSITIVE_DATA_SIZE: usize = 256;
/// Maximum RSA public modulus size in bytes (RSA-4096).
pub const MAX_RSA_KEY_BYTES: usize = 512;
/// Maximum RSA private prime size in bytes.
pub const MAX_RSA_PRIVATE_BYTES: usize = 256;
/// Maximum ECC coordinate/scalar size in bytes.
pub const MAX_ECC_KEY_BYTES: usize = 128;
/// Maximum object name size: a 2-byte hash algorithm plus its digest.
pub const MAX_NAME_SIZE: usize = 2 + MAX_DIGEST_SIZE;
/// Suggested minimum for the general-purpose data buffer.
pub const MAX_BUFFER_SIZE: usize = 1024;
/// Maximum NV read/write chunk size.
pub const MAX_NV_BUFFER_SIZE: usize = 2048;

/// A variable-length byte field with static capacity `N`.
///
/// Invariant: `size <= N` always. Every mutating operation validates the
/// post-condition size against the capacity before writing any byte and
/// performs no partial write on failure.
#[derive(Clone, Copy)]
pub struct Tpm2b<const N: usize> {
    size: u16,
    buffer: [u8; N],
}

/// Digest-sized buffer (`TPM2B_DIGEST`).
pub type Tpm2bDigest = Tpm2b<MAX_DIGEST_SIZE>;
/// Authorization value (`TPM2B_AUTH`).
pub type Tpm2bAuth = Tpm2b<MAX_DIGEST_SIZE>;
/// Session nonce (`TPM2B_NONCE`).
pub type Tpm2bNonce = Tpm2b<MAX_DIGEST_SIZE>;
/// Qualifying / outside-info data (`TPM2B_DATA`).
pub type Tpm2bData = Tpm2b<MAX_DIGEST_SIZE>;
/// Object name (`TPM2B_NAME`).
pub type Tpm2bName = Tpm2b<MAX_NAME_SIZE>;
/// Symmetric key (`TPM2B_SYM_KEY`).
pub type Tpm2bSymKey = Tpm2b<MAX_SYM_KEY_SIZE>;
/// Sealed or keyed-hash sensitive data (`TPM2B_SENSITIVE_DATA`).
pub type Tpm2bSensitiveData = Tpm2b<MAX_SENSITIVE_DATA_SIZE>;
/// RSA public modulus (`TPM2B_PUBLIC_KEY_RSA`).
pub type Tpm2bPublicKeyRsa = Tpm2b<MAX_RSA_KEY_BYTES>;
/// RSA private prime (`TPM2B_PRIVATE_KEY_RSA`).
pub type Tpm2bPrivateKeyRsa = Tpm2b<MAX_RSA_PRIVATE_BYTES>;
/// ECC coordinate or scalar (`TPM2B_ECC_PARAMETER`).
pub type Tpm2bEccParameter = Tpm2b<MAX_ECC_KEY_BYTES>;
/// General-purpose data buffer (`TPM2B_MAX_BUFFER`).
pub type Tpm2bMaxBuffer = Tpm2b<MAX_BUFFER_SIZE>;
/// NV read/write chunk (`TPM2B_MAX_NV_BUFFER`).
pub type Tpm2bMaxNvBuffer = Tpm2b<MAX_NV_BUFFER_SIZE>;
/// Opaque wrapped private area (`TPM2B_PRIVATE`).
pub type Tpm2bPrivate = Tpm2b<MAX_BUFFER_SIZE>;

impl<const N: usize> Tpm2b<N> {
    /// An empty buffer (`size == 0`).
    pub fn new() -> Self {
        Self {
            size: 0,
            buffer: [0u8; N],
        }
    }

    /// Create a buffer holding a copy of `data`.
    ///
    /// Fails with [`CodecError::SizeExceeded`] if `data` is larger than
    /// the capacity.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        if data.len() > N {
            return Err(CodecError::SizeExceeded {
                size: data.len(),
                capacity: N,
            });
        }
        let mut buffer = [0u8; N];
        buffer[..data.len()].copy_from_slice(data);
        Ok(Self {
            size: data.len() as u16,
            buffer,
        })
    }

    /// Replace the contents of `self` with a copy of `source`.
    ///
    /// The source may have any capacity; only its current size must fit.
    /// On failure `self` is left exactly as it was.
    pub fn copy_from<const M: usize>(&mut self, source: &Tpm2b<M>) -> Result<()> {
        if source.len() > N {
            return Err(CodecError::SizeExceeded {
                size: source.len(),
                capacity: N,
            });
        }
        self.buffer = [0u8; N];
        self.buffer[..source.len()].copy_from_slice(source.as_slice());
        self.size = source.size;
        Ok(())
    }

    /// Append the contents of `source` after the existing content.
    ///
    /// On failure `self` is left exactly as it was.
    pub fn append<const M: usize>(&mut self, source: &Tpm2b<M>) -> Result<()> {
        let total = self.len() + source.len();
        if total > N {
            return Err(CodecError::SizeExceeded {
                size: total,
                capacity: N,
            });
        }
        let start = self.len();
        self.buffer[start..total].copy_from_slice(source.as_slice());
        self.size = total as u16;
        Ok(())
    }

    /// Create a buffer from an optional string, excluding any terminator.
    ///
    /// An absent source yields an empty buffer. A string longer than the
    /// capacity fails with [`CodecError::InsufficientBuffer`].
    pub fn from_string(source: Option<&str>) -> Result<Self> {
        match source {
            None => Ok(Self::new()),
            Some(s) => {
                if s.len() > N {
                    return Err(CodecError::InsufficientBuffer {
                        len: s.len(),
                        capacity: N,
                    });
                }
                Self::from_slice(s.as_bytes())
            }
        }
    }

    /// Current content.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len()]
    }

    /// Current size in bytes.
    pub fn len(&self) -> usize {
        self.size as usize
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Static capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Tpm2b<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Buffers of different capacities compare by content: equal sizes and
/// equal bytes. This is not a constant-time comparison.
impl<const N: usize, const M: usize> PartialEq<Tpm2b<M>> for Tpm2b<N> {
    fn eq(&self, other: &Tpm2b<M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for Tpm2b<N> {}

impl<const N: usize> fmt::Debug for Tpm2b<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tpm2b")
            .field("capacity", &N)
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<const N: usize> Marshal for Tpm2b<N> {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u16(self.size)?;
        w.put_bytes(self.as_slice())?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        2 + self.len()
    }
}

impl<const N: usize> Unmarshal for Tpm2b<N> {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let size = r.read_u16()?;
        // The declared size is attacker-controlled; bound it before any
        // payload byte is read.
        if size as usize > N {
            return Err(CodecError::SizeExceeded {
                size: size as usize,
                capacity: N,
            });
        }
        let data = r.read_bytes(size as usize)?;
        let mut buffer = [0u8; N];
        buffer[..data.len()].copy_from_slice(data);
        Ok(Self { size, buffer })
    }
}

#[cfg(test)]
mod tests {
    use super::{CodecError, Result, Tpm2b, Unmarshal};
    use crate::wire::Marshal;

    #[test]
    fn from_slice_enforces_capacity() {
        let ok = Tpm2b::<8>::from_slice(&[1; 8]);
        assert!(ok.is_ok());

        let err = Tpm2b::<8>::from_slice(&[1; 9]);
        assert_eq!(
            err.map(|_| ()),
            Err(CodecError::SizeExceeded {
                size: 9,
                capacity: 8,
            })
        );
    }

    #[test]
    fn append_is_atomic() -> Result<()> {
        let mut target = Tpm2b::<8>::from_slice(&[1, 2, 3, 4, 5])?;
        let big = Tpm2b::<8>::from_slice(&[9, 9, 9, 9])?;

        let err = target.append(&big);
        assert_eq!(
            err,
            Err(CodecError::SizeExceeded {
                size: 9,
                capacity: 8,
            })
        );
        // Failed append leaves the target untouched.
        assert_eq!(target.as_slice(), &[1, 2, 3, 4, 5]);

        let small = Tpm2b::<8>::from_slice(&[6, 7, 8])?;
        target.append(&small)?;
        assert_eq!(target.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        Ok(())
    }

    #[test]
    fn copy_from_checks_source_size_not_capacity() -> Result<()> {
        // A large-capacity source with small content fits a small target.
        let source = Tpm2b::<64>::from_slice(&[1, 2, 3])?;
        let mut target = Tpm2b::<4>::new();
        target.copy_from(&source)?;
        assert_eq!(target.as_slice(), &[1, 2, 3]);

        let oversize = Tpm2b::<64>::from_slice(&[0; 5])?;
        let err = target.copy_from(&oversize);
        assert_eq!(
            err,
            Err(CodecError::SizeExceeded {
                size: 5,
                capacity: 4,
            })
        );
        assert_eq!(target.as_slice(), &[1, 2, 3]);
        Ok(())
    }

    #[test]
    fn string_copy_overflow_reports_insufficient_buffer() -> Result<()> {
        let long = "a".repeat(40);
        let err = Tpm2b::<32>::from_string(Some(&long));
        assert_eq!(
            err.map(|_| ()),
            Err(CodecError::InsufficientBuffer {
                len: 40,
                capacity: 32,
            })
        );

        let absent = Tpm2b::<32>::from_string(None)?;
        assert!(absent.is_empty());

        let short = Tpm2b::<32>::from_string(Some("owner auth"))?;
        assert_eq!(short.as_slice(), b"owner auth");
        Ok(())
    }

    #[test]
    fn compare_is_size_then_content() -> Result<()> {
        let a = Tpm2b::<16>::from_slice(&[1, 2, 3])?;
        let b = Tpm2b::<64>::from_slice(&[1, 2, 3])?;
        let c = Tpm2b::<64>::from_slice(&[1, 2])?;
        assert_eq!(a, b);
        assert_ne!(a, c);
        Ok(())
    }

    #[test]
    fn zero_size_round_trips_to_two_bytes() -> Result<()> {
        let empty = Tpm2b::<32>::new();
        let bytes = empty.to_vec()?;
        assert_eq!(bytes, [0, 0]);
        assert!(Tpm2b::<32>::from_wire(&bytes)?.is_empty());
        Ok(())
    }

    #[test]
    fn oversize_wire_declaration_fails_before_payload() {
        // Declared size 33 against capacity 32; payload bytes present.
        let mut bytes = vec![0x00, 0x21];
        bytes.extend_from_slice(&[0u8; 33]);
        let err = Tpm2b::<32>::from_wire(&bytes);
        assert_eq!(
            err.map(|_| ()),
            Err(CodecError::SizeExceeded {
                size: 33,
                capacity: 32,
            })
        );
    }
}
