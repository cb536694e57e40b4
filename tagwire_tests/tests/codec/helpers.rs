use anyhow::Result;
use std::io::Cursor;
use tagwire_types::schema::Type;
use tagwire_types::value::Value;
use tagwire_types::wire::Codec;

/// Encodes, decodes, and checks that decoding consumed exactly what encoding wrote.
pub fn assert_round_trip<C: Codec>(codec: &C, ty: &Type, value: &Value) -> Result<()> {
    let buf = codec.encode_to_bytes(ty, value)?;

    let mut r = Cursor::new(&buf);
    let decoded = codec.decode(ty, &mut r)?;

    assert_eq!(&decoded, value, "{ty}");
    assert_eq!(r.position() as usize, buf.len(), "{ty}");
    Ok(())
}
