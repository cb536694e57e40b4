#[cfg(test)]
mod test {
    use crate::error::CodecError;
    use crate::schema::Type;
    use crate::wire::*;
    use anyhow::Result;
    use std::io::Cursor;

    #[test]
    fn underrun_reports_offset_and_counts() -> Result<()> {
        let buf = [1u8, 2, 3];
        let mut r = WireReader::new(Cursor::new(&buf[..]));
        assert_eq!(r.read_u8()?, 1);
        let err = r.read_array::<4>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<CodecError>(),
            Some(&CodecError::StreamUnderrun {
                offset: 1,
                expected: 4,
                available: 2,
            })
        );
        Ok(())
    }

    #[test]
    fn read_bytes_past_chunk() -> Result<()> {
        let buf = (0..20_000u32).map(|i| i as u8).collect::<Vec<_>>();
        let mut r = WireReader::new(Cursor::new(&buf));
        assert_eq!(r.read_bytes(20_000)?, buf);
        assert_eq!(r.offset(), 20_000);

        let mut r = WireReader::new(Cursor::new(&buf));
        let err = r.read_bytes(1 << 30).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CodecError>(),
            Some(CodecError::StreamUnderrun {
                available: 20_000,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn writer_counts() -> Result<()> {
        let mut buf = vec![];
        let mut w = WireWriter::new(&mut buf);
        w.write_u8(7)?;
        w.write_all(&[1, 2, 3])?;
        assert_eq!(*w.finish()?, 4);
        assert_eq!(buf, vec![7, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn wire_types() {
        assert_eq!(WireType::try_from(&Type::Utf16String), Ok(WireType::String));
        assert_eq!(WireType::try_from(&Type::Binary), Ok(WireType::String));
        assert_eq!(WireType::try_from(&Type::list(Type::I8)), Ok(WireType::List));
        assert_eq!(WireType::List.to_wire(), 15);
        assert!(matches!(
            WireType::try_from(&Type::service("Calc")),
            Err(CodecError::UnencodableType { .. })
        ));
        assert_eq!(
            WireType::from_wire(7, 3),
            Err(CodecError::UnsupportedWireType {
                wire_type: 7,
                offset: 3
            })
        );
        assert!(WireType::from_wire(STOP, 0).is_err());
    }

    #[test]
    fn utf16_text() {
        let encoded = encode_utf16("h\u{1F600}");
        assert_eq!(&encoded[..4], &[0xFE, 0xFF, 0x00, b'h']);
        assert_eq!(decode_utf16(&encoded, 0).as_deref(), Ok("h\u{1F600}"));

        let little_endian = [0xFF, 0xFE, b'h', 0, b'i', 0];
        assert_eq!(decode_utf16(&little_endian, 0).as_deref(), Ok("hi"));
        let no_bom = [0, b'h', 0, b'i'];
        assert_eq!(decode_utf16(&no_bom, 0).as_deref(), Ok("hi"));

        assert!(decode_utf16(&[0, b'h', 0], 5).is_err());
        let lone_surrogate = [0xD8, 0x00];
        assert!(decode_utf16(&lone_surrogate, 0).is_err());
    }

    #[test]
    fn config_limits() {
        let config = CodecConfig::default()
            .with_max_depth(2)
            .with_max_bytes_len(4);
        assert!(config.check_depth(2).is_ok());
        assert_eq!(
            config.check_depth(3),
            Err(CodecError::DepthLimitExceeded { max: 2 })
        );
        assert_eq!(config.check_bytes_len(4, 0), Ok(4));
        assert!(config.check_bytes_len(5, 0).is_err());
        assert!(config
            .check_container_len(DEFAULT_MAX_CONTAINER_LEN as u64 + 1, 0)
            .is_err());
    }

    /* The only test that touches `TAGWIRE_*` env vars. */
    #[test]
    fn config_from_env() -> Result<()> {
        std::env::remove_var(ENV_VAR_MAX_CONTAINER_LEN);
        std::env::remove_var(ENV_VAR_MAX_BYTES_LEN);

        std::env::set_var(ENV_VAR_MAX_DEPTH, " 7 ");
        let config = CodecConfig::from_env();
        std::env::set_var(ENV_VAR_MAX_DEPTH, "abc");
        let bad = CodecConfig::from_env();
        std::env::remove_var(ENV_VAR_MAX_DEPTH);

        assert_eq!(config?, CodecConfig::default().with_max_depth(7));
        let err = bad.unwrap_err();
        assert!(format!("{err:#}").contains(ENV_VAR_MAX_DEPTH), "{err:#}");

        assert_eq!(CodecConfig::from_env()?, CodecConfig::default());
        Ok(())
    }
}
