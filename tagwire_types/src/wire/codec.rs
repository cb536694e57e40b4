use crate::error::CodecError;
use crate::schema::Type;
use crate::value::{StructValue, Value};
use crate::wire::WriteLen;
use anyhow::{Context, Result};
use std::env;
use std::io::{Cursor, Read, Write};
use std::str::FromStr;

pub const ENV_VAR_MAX_DEPTH: &str = "TAGWIRE_MAX_DEPTH";
pub const ENV_VAR_MAX_CONTAINER_LEN: &str = "TAGWIRE_MAX_CONTAINER_LEN";
pub const ENV_VAR_MAX_BYTES_LEN: &str = "TAGWIRE_MAX_BYTES_LEN";

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_CONTAINER_LEN: usize = 1 << 24;
pub const DEFAULT_MAX_BYTES_LEN: usize = 16 * 1024 * 1024;

/// Bounds applied to every encode and decode call of a codec.
///
/// A codec holds its config read-only, so one codec may serve many threads at once.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CodecConfig {
    /// Structs and containers nested deeper than this are rejected.
    pub max_depth: usize,
    /// Largest list, set or map element count accepted from a stream.
    pub max_container_len: usize,
    /// Largest byte string or text body accepted from a stream.
    pub max_bytes_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_container_len: DEFAULT_MAX_CONTAINER_LEN,
            max_bytes_len: DEFAULT_MAX_BYTES_LEN,
        }
    }
}

impl CodecConfig {
    /// Defaults, overridden by whichever `TAGWIRE_*` env vars are set.
    pub fn from_env() -> Result<Self> {
        let dflt = Self::default();
        Ok(Self {
            max_depth: env_or(ENV_VAR_MAX_DEPTH, dflt.max_depth)?,
            max_container_len: env_or(ENV_VAR_MAX_CONTAINER_LEN, dflt.max_container_len)?,
            max_bytes_len: env_or(ENV_VAR_MAX_BYTES_LEN, dflt.max_bytes_len)?,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
    pub fn with_max_container_len(mut self, max_container_len: usize) -> Self {
        self.max_container_len = max_container_len;
        self
    }
    pub fn with_max_bytes_len(mut self, max_bytes_len: usize) -> Self {
        self.max_bytes_len = max_bytes_len;
        self
    }

    /// Called on entering a struct or container at nesting level `depth` (1-based).
    pub fn check_depth(&self, depth: usize) -> Result<(), CodecError> {
        if depth > self.max_depth {
            return Err(CodecError::DepthLimitExceeded {
                max: self.max_depth,
            });
        }
        Ok(())
    }

    pub fn check_container_len(&self, len: u64, offset: usize) -> Result<usize, CodecError> {
        check_len(len, self.max_container_len, offset)
    }

    pub fn check_bytes_len(&self, len: u64, offset: usize) -> Result<usize, CodecError> {
        check_len(len, self.max_bytes_len, offset)
    }
}

fn check_len(len: u64, max: usize, offset: usize) -> Result<usize, CodecError> {
    let exceeded = CodecError::LengthLimitExceeded {
        len,
        max: max as u64,
        offset,
    };
    match usize::try_from(len) {
        Ok(len) if len <= max => Ok(len),
        _ => Err(exceeded),
    }
}

fn env_or<T>(var: &str, dflt: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(var) {
        Err(env::VarError::NotPresent) => Ok(dflt),
        Err(e) => Err(e).with_context(|| format!("Reading {var}")),
        Ok(s) => s
            .trim()
            .parse::<T>()
            .with_context(|| format!("Parsing {var}={s:?}")),
    }
}

/// A wire format. Both directions walk the schema given as `ty`;
/// the stream carries no schema information of its own.
pub trait Codec {
    fn config(&self) -> &CodecConfig;

    fn encode<W: Write>(&self, ty: &Type, value: &Value, w: &mut W) -> Result<WriteLen>;

    /// Same as [`Codec::encode`] under the schema `value` is bound to.
    fn encode_struct<W: Write>(&self, value: &StructValue, w: &mut W) -> Result<WriteLen>;

    fn decode<R: Read>(&self, ty: &Type, r: &mut R) -> Result<Value>;

    fn encode_to_bytes(&self, ty: &Type, value: &Value) -> Result<Vec<u8>> {
        let mut buf = vec![];
        self.encode(ty, value, &mut buf)?;
        Ok(buf)
    }

    /// Bytes after the decoded value are left unread, i.e. ignored.
    fn decode_from_bytes(&self, ty: &Type, buf: &[u8]) -> Result<Value> {
        let mut r = Cursor::new(buf);
        self.decode(ty, &mut r)
    }
}
