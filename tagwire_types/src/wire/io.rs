use crate::error::CodecError;
use anyhow::Result;
use derive_more::Deref;
use std::io::{ErrorKind, Read, Write};

/// Length-prefixed reads grow their buffer at most this far ahead of the bytes
/// actually received, so a forged length cannot force a large allocation.
const READ_CHUNK_LEN: usize = 8 * 1024;

#[derive(Deref, Clone, Copy, PartialEq, Eq, Debug)]
pub struct WriteLen(usize);

pub struct WireWriter<W> {
    w: W,
    w_len: usize,
}

impl<W: Write> WireWriter<W> {
    pub fn new(w: W) -> Self {
        Self { w, w_len: 0 }
    }

    pub fn write_u8(&mut self, byte: u8) -> Result<()> {
        self.write_all(&[byte])
    }

    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.w.write_all(buf)?;
        self.w_len += buf.len();
        Ok(())
    }

    pub fn w_len(&self) -> WriteLen {
        WriteLen(self.w_len)
    }

    pub fn finish(mut self) -> Result<WriteLen> {
        self.w.flush()?;
        Ok(WriteLen(self.w_len))
    }
}

pub struct WireReader<R> {
    r: R,
    r_len: usize,
}

impl<R: Read> WireReader<R> {
    pub fn new(r: R) -> Self {
        Self { r, r_len: 0 }
    }

    /// Bytes consumed so far. Doubles as the offset of the next read.
    pub fn offset(&self) -> usize {
        self.r_len
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_array<const LEN: usize>(&mut self) -> Result<[u8; LEN]> {
        let mut buf = [0u8; LEN];
        let offset = self.r_len;
        let got = self.read_fully(&mut buf)?;
        if got < LEN {
            return Err(CodecError::StreamUnderrun {
                offset,
                expected: LEN,
                available: got,
            }
            .into());
        }
        Ok(buf)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let offset = self.r_len;
        let mut buf = Vec::with_capacity(len.min(READ_CHUNK_LEN));
        while buf.len() < len {
            let filled = buf.len();
            let chunk_len = (len - filled).min(READ_CHUNK_LEN);
            buf.resize(filled + chunk_len, 0);
            let got = self.read_fully(&mut buf[filled..])?;
            if got < chunk_len {
                return Err(CodecError::StreamUnderrun {
                    offset,
                    expected: len,
                    available: filled + got,
                }
                .into());
            }
        }
        Ok(buf)
    }

    /// Reads until `buf` is full or the stream ends. Returns the count read.
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut got = 0;
        while got < buf.len() {
            match self.r.read(&mut buf[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.r_len += got;
        Ok(got)
    }
}
