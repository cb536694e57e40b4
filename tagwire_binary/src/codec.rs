use crate::deser::BinaryReader;
use crate::ser::BinaryWriter;
use anyhow::Result;
use std::io::{Read, Write};
use tagwire_types::schema::Type;
use tagwire_types::value::{StructValue, Value};
use tagwire_types::wire::{Codec, CodecConfig, WireReader, WireWriter, WriteLen};
use tracing::{debug, instrument};

#[derive(Clone, Default, Debug)]
pub struct BinaryCodec {
    config: CodecConfig,
}

impl BinaryCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }
}

impl Codec for BinaryCodec {
    fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[instrument(level = "trace", skip_all, fields(ty = %ty))]
    fn encode<W: Write>(&self, ty: &Type, value: &Value, w: &mut W) -> Result<WriteLen> {
        let mut bw = BinaryWriter::new(WireWriter::new(w), &self.config);
        bw.ser_value(ty, value)?;
        bw.finish()
    }

    #[instrument(level = "trace", skip_all, fields(ty = %value.schema().name()))]
    fn encode_struct<W: Write>(&self, value: &StructValue, w: &mut W) -> Result<WriteLen> {
        let mut bw = BinaryWriter::new(WireWriter::new(w), &self.config);
        bw.ser_bound_struct(value)?;
        bw.finish()
    }

    #[instrument(level = "trace", skip_all, fields(ty = %ty))]
    fn decode<R: Read>(&self, ty: &Type, r: &mut R) -> Result<Value> {
        let mut br = BinaryReader::new(WireReader::new(r), &self.config);
        br.deser_value(ty).map_err(|e| {
            debug!(offset = br.offset(), "binary decode failed: {e:#}");
            e
        })
    }
}
