//! Zigzag and LEB128-style varint arithmetic.

use anyhow::Result;
use std::io::{Read, Write};
use tagwire_types::error::CodecError;
use tagwire_types::wire::{WireReader, WireWriter};

/// Seven payload bits per byte cover a u64 in ten bytes.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;

pub fn int_to_zigzag(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

pub fn long_to_zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of both [`int_to_zigzag`] and [`long_to_zigzag`].
pub fn zigzag_to_int(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

pub fn varint_len(mut v: u64) -> usize {
    let mut len = 1;
    while v > u64::from(PAYLOAD) {
        v >>= 7;
        len += 1;
    }
    len
}

pub fn write_varint<W: Write>(w: &mut WireWriter<W>, mut v: u64) -> Result<()> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    loop {
        let byte = (v as u8) & PAYLOAD;
        v >>= 7;
        if v == 0 {
            buf[len] = byte;
            len += 1;
            break;
        }
        buf[len] = byte | CONTINUATION;
        len += 1;
    }
    w.write_all(&buf[..len])
}

/// Reads at most [`MAX_VARINT_LEN`] bytes. A longer run, or a last byte whose
/// bits overflow a u64, is [`CodecError::MalformedVarint`].
pub fn read_varint<R: Read>(r: &mut WireReader<R>) -> Result<u64> {
    let offset = r.offset();
    let mut v = 0u64;
    for i in 0..MAX_VARINT_LEN {
        let byte = r.read_u8()?;
        let bits = u64::from(byte & PAYLOAD);
        if i == MAX_VARINT_LEN - 1 && (byte & CONTINUATION != 0 || bits > 1) {
            break;
        }
        v |= bits << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok(v);
        }
    }
    Err(CodecError::MalformedVarint { offset }.into())
}
