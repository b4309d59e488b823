//! Cursor-based primitive codec and the marshal/unmarshal protocol.
//!
//! Every structure decoder is built by sequencing the primitives here in
//! the exact field order the TPM wire format dictates. All integers are
//! big-endian (network order); structures are concatenations of fields
//! with no alignment padding.
//!
//! Decoding threads a [`Reader`] through every call: each successful read
//! of `n` bytes advances the position and shrinks the remaining count by
//! exactly `n`, and a read that would overrun fails without moving the
//! cursor. Encoding mirrors this with a [`Writer`] over a caller-supplied
//! buffer that reports capacity violations instead of growing.

use crate::errors::{CodecError, Result};

/// Decode cursor over a borrowed byte buffer.
///
/// The pair (position, remaining) is the unit of composability: parent
/// decoders hand the same cursor to child decoders and observe their
/// consumption through it.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a cursor over `buf`, positioned at its start.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consume exactly `n` bytes, all-or-nothing.
    ///
    /// On failure the cursor is unchanged.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(CodecError::InsufficientData {
                needed: n,
                remaining,
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Decode one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let b = self.read_bytes(1)?;
        Ok(b[0])
    }

    /// Decode a big-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Decode a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Decode a big-endian u64.
    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.read_bytes(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }
}

/// Encode cursor over a caller-supplied output buffer.
///
/// Writes are all-or-nothing: a write that does not fit fails with
/// [`CodecError::InsufficientBuffer`] and leaves the buffer and position
/// untouched. The writer never allocates.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    /// Create a writer over `buf`, positioned at its start.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Capacity not yet written.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Append raw bytes, failing if the destination cannot hold them.
    pub fn put_bytes(&mut self, data: &[u8]) -> Result<()> {
        let remaining = self.remaining();
        if data.len() > remaining {
            return Err(CodecError::InsufficientBuffer {
                len: data.len(),
                capacity: remaining,
            });
        }
        self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
        Ok(())
    }

    /// Encode one byte.
    pub fn put_u8(&mut self, v: u8) -> Result<()> {
        self.put_bytes(&[v])
    }

    /// Encode a big-endian u16.
    pub fn put_u16(&mut self, v: u16) -> Result<()> {
        self.put_bytes(&v.to_be_bytes())
    }

    /// Encode a big-endian u32.
    pub fn put_u32(&mut self, v: u32) -> Result<()> {
        self.put_bytes(&v.to_be_bytes())
    }

    /// Encode a big-endian u64.
    pub fn put_u64(&mut self, v: u64) -> Result<()> {
        self.put_bytes(&v.to_be_bytes())
    }
}

/// Encode a structure onto the wire.
///
/// `marshal` writes the structure's fields in wire order and advances the
/// writer by exactly [`wire_size`](Marshal::wire_size) bytes. It fails
/// only on destination capacity violations.
pub trait Marshal {
    /// Write the wire encoding of `self` into `w`.
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()>;

    /// Exact number of bytes `marshal` will write.
    fn wire_size(&self) -> usize;

    /// Encode into a freshly allocated, exactly sized vector.
    fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.wire_size()];
        let buf_len = buf.len();
        let mut w = Writer::new(&mut buf);
        self.marshal(&mut w)?;
        // wire_size and marshal disagreeing is a codec bug; surface it the
        // same way an envelope mismatch is surfaced.
        if w.position() != buf_len {
            return Err(CodecError::LengthMismatch {
                declared: buf_len as u32,
                consumed: w.position() as u32,
            });
        }
        Ok(buf)
    }
}

/// Decode a structure from the wire.
///
/// Decoders consume fields in wire order, short-circuiting on the first
/// failing child, and construct the value only once every field has
/// decoded: a failed decode never yields a partially written structure.
pub trait Unmarshal: Sized {
    /// Decode one value, advancing `r` past exactly the bytes it covers.
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self>;

    /// Decode one value from a standalone byte slice.
    fn from_wire(bytes: &[u8]) -> Result<Self> {
        let mut r = Reader::new(bytes);
        Self::unmarshal(&mut r)
    }
}

/// Length-prefixed envelope around a nested structure.
///
/// Wire form: a 4-byte declared length followed by exactly that many
/// bytes, fully consumed by decoding one inner structure. A zero length
/// is rejected, and a declared length that disagrees with the inner
/// decoder's actual consumption fails with
/// [`CodecError::LengthMismatch`]. A lenient decoder here would hide a
/// malformed peer or a wrong selector upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enveloped<T>(pub T);

impl<T: Unmarshal> Unmarshal for Enveloped<T> {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        unmarshal_enveloped_with(r, T::unmarshal).map(Self)
    }
}

impl<T: Marshal> Marshal for Enveloped<T> {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        let declared = self.0.wire_size() as u32;
        if declared == 0 {
            return Err(CodecError::ZeroLength);
        }
        w.put_u32(declared)?;
        let before = w.position();
        self.0.marshal(w)?;
        let consumed = (w.position() - before) as u32;
        if consumed != declared {
            return Err(CodecError::LengthMismatch { declared, consumed });
        }
        Ok(())
    }

    fn wire_size(&self) -> usize {
        4 + self.0.wire_size()
    }
}

/// Decode a 4-byte-wrapped substructure with an explicit inner decoder.
///
/// Used directly where the inner type needs extra context (a selector)
/// and so cannot implement [`Unmarshal`] itself.
pub fn unmarshal_enveloped_with<'a, T>(
    r: &mut Reader<'a>,
    inner: impl FnOnce(&mut Reader<'a>) -> Result<T>,
) -> Result<T> {
    let declared = r.read_u32()?;
    if declared == 0 {
        return Err(CodecError::ZeroLength);
    }
    let before = r.remaining();
    let value = inner(r)?;
    let consumed = (before - r.remaining()) as u32;
    if consumed != declared {
        return Err(CodecError::LengthMismatch { declared, consumed });
    }
    Ok(value)
}
