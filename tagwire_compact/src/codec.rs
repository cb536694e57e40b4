use crate::deser::CompactReader;
use crate::ser::CompactWriter;
use anyhow::Result;
use std::io::{Read, Write};
use tagwire_types::schema::Type;
use tagwire_types::value::{StructValue, Value};
use tagwire_types::wire::{Codec, CodecConfig, WireReader, WireWriter, WriteLen};
use tracing::{debug, instrument};

/// Holds nothing mutable; one instance may serve concurrent calls, each on its own stream.
#[derive(Clone, Default, Debug)]
pub struct CompactCodec {
    config: CodecConfig,
}

impl CompactCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }
}

impl Codec for CompactCodec {
    fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[instrument(level = "trace", skip_all, fields(ty = %ty))]
    fn encode<W: Write>(&self, ty: &Type, value: &Value, w: &mut W) -> Result<WriteLen> {
        let mut cw = CompactWriter::new(WireWriter::new(w), &self.config);
        cw.ser_value(ty, value)?;
        cw.finish()
    }

    #[instrument(level = "trace", skip_all, fields(ty = %value.schema().name()))]
    fn encode_struct<W: Write>(&self, value: &StructValue, w: &mut W) -> Result<WriteLen> {
        let mut cw = CompactWriter::new(WireWriter::new(w), &self.config);
        cw.ser_bound_struct(value)?;
        cw.finish()
    }

    #[instrument(level = "trace", skip_all, fields(ty = %ty))]
    fn decode<R: Read>(&self, ty: &Type, r: &mut R) -> Result<Value> {
        let mut cr = CompactReader::new(WireReader::new(r), &self.config);
        cr.deser_value(ty).map_err(|e| {
            debug!(offset = cr.offset(), "compact decode failed: {e:#}");
            e
        })
    }
}
