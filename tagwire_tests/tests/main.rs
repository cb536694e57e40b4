use anyhow::Result;
use tagwire_binary::BinaryCodec;
use tagwire_compact::CompactCodec;
use tagwire_types::wire::CodecConfig;

mod codec;
use codec::concurrent::test_shared_codec;
use codec::foo::{gen_foo, test_foo};
use codec::scalars::test_scalars;
use codec::structs::{test_exception, test_recursive, test_schema_mismatch, test_unknown_tag};

#[test]
fn integration_test_binary() -> Result<()> {
    let codec = BinaryCodec::default();

    test_scalars(&codec)?;
    test_foo(&codec)?;
    test_recursive(&codec)?;
    test_exception(&codec)?;
    test_schema_mismatch(&codec)?;
    test_unknown_tag(&codec, &[8, 0, 99, 0, 0, 0, 1, 0])?;

    test_shared_codec(&codec)?;

    Ok(())
}

#[test]
fn integration_test_compact() -> Result<()> {
    let codec = CompactCodec::default();

    test_scalars(&codec)?;
    test_foo(&codec)?;
    test_recursive(&codec)?;
    test_exception(&codec)?;
    test_schema_mismatch(&codec)?;
    test_unknown_tag(&codec, &[0x08, 0, 99, 0x02, 0])?;

    test_shared_codec(&codec)?;

    Ok(())
}

#[test]
fn compact_is_smaller() -> Result<()> {
    let foo = gen_foo()?;
    let binary = foo.serialize(&BinaryCodec::new(CodecConfig::default()))?;
    let compact = foo.serialize(&CompactCodec::new(CodecConfig::default()))?;
    assert!(compact.len() < binary.len());
    Ok(())
}
