// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-width binary codec.
//!
//! Every value encodes to exactly [`FixedCodec::SIZE`] little-endian bytes.
//! Decoding is the exact inverse for every representable value. The codec is
//! what the sequence marshaler uses to lay out primitive and small struct
//! elements inside a foreign block.
//!
//! A buffer shorter than `SIZE` is a caller bug: both directions panic.

use crate::status::QosPolicyCount;
use crate::time::Duration;

/// A value with a fixed, bit-exact byte representation.
pub trait FixedCodec: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Write `SIZE` bytes at the start of `out`.
    fn encode_into(&self, out: &mut [u8]);

    /// Read a value from the first `SIZE` bytes of `bytes`.
    fn decode(bytes: &[u8]) -> Self;

    fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::SIZE];
        self.encode_into(&mut out);
        out
    }
}

/// Implement [`FixedCodec`] for primitives via `to_le_bytes`/`from_le_bytes`.
macro_rules! impl_codec_le {
    ($($type:ty => $size:expr),* $(,)?) => {
        $(
            impl FixedCodec for $type {
                const SIZE: usize = $size;

                #[inline]
                fn encode_into(&self, out: &mut [u8]) {
                    out[..$size].copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; $size];
                    raw.copy_from_slice(&bytes[..$size]);
                    <$type>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_codec_le!(
    u8 => 1,
    i16 => 2,
    u16 => 2,
    i32 => 4,
    u32 => 4,
    i64 => 8,
    u64 => 8,
);

impl FixedCodec for bool {
    const SIZE: usize = 1;

    #[inline]
    fn encode_into(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Seconds then nanoseconds, 8 bytes.
impl FixedCodec for Duration {
    const SIZE: usize = 8;

    fn encode_into(&self, out: &mut [u8]) {
        self.seconds.encode_into(&mut out[0..4]);
        self.nanoseconds.encode_into(&mut out[4..8]);
    }

    fn decode(bytes: &[u8]) -> Self {
        Duration {
            seconds: i32::decode(&bytes[0..4]),
            nanoseconds: u32::decode(&bytes[4..8]),
        }
    }
}

/// Policy id then count, 8 bytes.
impl FixedCodec for QosPolicyCount {
    const SIZE: usize = 8;

    fn encode_into(&self, out: &mut [u8]) {
        self.policy_id.encode_into(&mut out[0..4]);
        self.count.encode_into(&mut out[4..8]);
    }

    fn decode(bytes: &[u8]) -> Self {
        QosPolicyCount {
            policy_id: i32::decode(&bytes[0..4]),
            count: i32::decode(&bytes[4..8]),
        }
    }
}
