//! Clock and time state.

use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// Clock state reported in attestation data (`TPMS_CLOCK_INFO`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockInfo {
    /// Milliseconds of accumulated TPM-on time.
    pub clock: u64,
    /// Number of TPM resets since manufacture.
    pub reset_count: u32,
    /// Number of TPM restarts or resumes since the last reset.
    pub restart_count: u32,
    /// Whether `clock` is guaranteed not to have gone backwards.
    pub safe: bool,
}

impl Marshal for ClockInfo {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u64(self.clock)?;
        w.put_u32(self.reset_count)?;
        w.put_u32(self.restart_count)?;
        w.put_u8(u8::from(self.safe))?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        17
    }
}

impl Unmarshal for ClockInfo {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let clock = r.read_u64()?;
        let reset_count = r.read_u32()?;
        let restart_count = r.read_u32()?;
        // The safe flag is a yes/no octet; anything else is malformed.
        let safe = match r.read_u8()? {
            0 => false,
            1 => true,
            other => {
                return Err(CodecError::ValueOutOfRange {
                    field: "clock safe flag",
                    value: u32::from(other),
                });
            }
        };
        Ok(Self {
            clock,
            reset_count,
            restart_count,
            safe,
        })
    }
}
