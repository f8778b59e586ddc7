//! The error type returned by fallible blitting and filling operations.
//!
//! Degenerate geometry is never an error: a rectangle that clips away to
//! nothing is a successful no-op. Errors are reserved for resource
//! exhaustion and for requests the surfaces involved cannot serve.

use crate::depth::ColorDepth;

#[non_exhaustive]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A temporary bitmap or per-call work area couldn't be allocated.
    ///
    /// Blits return this before writing any destination pixel. A flood
    /// fill may already have filled part of its region.
    OutOfMemory { bytes: usize },

    /// The source and destination of a masked blit overlap in the same
    /// pixel storage.
    ///
    /// Masked blits read and write pixel-by-pixel without any ordering
    /// discipline, so overlapping regions are rejected rather than
    /// producing torn output.
    Aliased,

    /// A masked blit was requested between bitmaps of different color
    /// depths. Masked blits never convert pixel formats.
    DepthMismatch {
        source: ColorDepth,
        destination: ColorDepth,
    },

    /// The requested operation isn't available for the memory layout or
    /// geometry of one of the bitmaps involved.
    Unsupported,
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfMemory { bytes } => {
                f.debug_struct("OutOfMemory").field("bytes", bytes).finish()
            }
            Error::Aliased => f.debug_tuple("Aliased").finish(),
            Error::DepthMismatch {
                source,
                destination,
            } => f
                .debug_struct("DepthMismatch")
                .field("source", source)
                .field("destination", destination)
                .finish(),
            Error::Unsupported => f.debug_tuple("Unsupported").finish(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfMemory { bytes } => {
                write!(f, "failed to allocate {} bytes of work memory", bytes)
            }
            Error::Aliased => f.write_str("source and destination overlap"),
            Error::DepthMismatch {
                source,
                destination,
            } => write!(
                f,
                "cannot mask-blit from {}-bit to {}-bit",
                source.bits(),
                destination.bits()
            ),
            Error::Unsupported => f.write_str("unsupported for this bitmap layout"),
        }
    }
}

/// Reserves room for exactly `additional` more elements, reporting
/// exhaustion as [`Error::OutOfMemory`] instead of aborting.
pub(crate) fn try_reserve<T>(
    v: &mut alloc::vec::Vec<T>,
    additional: usize,
) -> Result<(), Error> {
    v.try_reserve_exact(additional).map_err(|_| {
        let bytes = additional.saturating_mul(core::mem::size_of::<T>());
        log::warn!("allocation of {} bytes failed", bytes);
        Error::OutOfMemory { bytes: bytes }
    })
}
