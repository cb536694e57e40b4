use crate::error::CodecError;

const BOM_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_LE: [u8; 2] = [0xFF, 0xFE];

/// UTF-16 text is written big-endian, behind a byte order mark.
pub fn encode_utf16(s: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + s.len() * 2);
    buf.extend_from_slice(&BOM_BE);
    for unit in s.encode_utf16() {
        buf.extend_from_slice(&unit.to_be_bytes());
    }
    buf
}

/// Honours a leading byte order mark of either endianness; big-endian without one.
/// `offset` is where the text body started, for error reporting.
pub fn decode_utf16(buf: &[u8], offset: usize) -> Result<String, CodecError> {
    let invalid = CodecError::InvalidText {
        encoding: "UTF-16",
        offset,
    };
    if buf.len() % 2 != 0 {
        return Err(invalid);
    }

    let (body, from_bytes): (&[u8], fn([u8; 2]) -> u16) =
        if let Some(rest) = buf.strip_prefix(&BOM_BE[..]) {
            (rest, u16::from_be_bytes)
        } else if let Some(rest) = buf.strip_prefix(&BOM_LE[..]) {
            (rest, u16::from_le_bytes)
        } else {
            (buf, u16::from_be_bytes)
        };
    let units = body
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| invalid)
}

pub fn decode_utf8(buf: Vec<u8>, offset: usize) -> Result<String, CodecError> {
    String::from_utf8(buf).map_err(|_| CodecError::InvalidText {
        encoding: "UTF-8",
        offset,
    })
}

