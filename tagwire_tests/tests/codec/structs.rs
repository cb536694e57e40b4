use super::helpers::assert_round_trip;
use anyhow::Result;
use std::sync::Arc;
use tagwire_types::error::CodecError;
use tagwire_types::schema::{StructType, Type};
use tagwire_types::value::{Exception, StructValue, Value};
use tagwire_types::wire::Codec;

fn gen_leaf(tree: &Arc<StructType>, label: &str) -> Result<Value> {
    let leaf = StructValue::new(tree, [("label", Value::from(label))])?;
    Ok(Value::from(leaf))
}

pub fn test_recursive<C: Codec>(codec: &C) -> Result<()> {
    let tree = StructType::builder("Tree").build_recursive(|this, b| {
        b.field("label", Type::String, 1)?
            .field("children", Type::list(this), 2)
    })?;

    let mid = StructValue::new(
        &tree,
        [
            ("label", Value::from("mid")),
            ("children", Value::List(vec![gen_leaf(&tree, "a")?, gen_leaf(&tree, "b")?])),
        ],
    )?;
    let root = StructValue::new(
        &tree,
        [
            ("label", Value::from("root")),
            ("children", Value::List(vec![Value::from(mid), gen_leaf(&tree, "c")?])),
        ],
    )?;

    assert_round_trip(codec, &Type::from(&tree), &Value::from(root.clone()))?;

    let buf = root.serialize(codec)?;
    assert_eq!(StructValue::deserialize(codec, &tree, &buf)?, root);
    Ok(())
}

pub fn test_exception<C: Codec>(codec: &C) -> Result<()> {
    let bro_error = StructType::exception_builder("BroError")
        .field("bros", Type::I32, 1)?
        .build();
    let sv = StructValue::new(&bro_error, [("bros", Value::I32(5))])?;
    let buf = sv.serialize(codec)?;

    let decoded = Exception::try_from(StructValue::deserialize(codec, &bro_error, &buf)?)?;
    assert_eq!(decoded.get("bros"), Some(&Value::I32(5)));
    Ok(())
}

/// A struct value only encodes under the schema it was built from,
/// even if another schema looks the same.
pub fn test_schema_mismatch<C: Codec>(codec: &C) -> Result<()> {
    let gen_schema = || StructType::builder("Twin").field("n", Type::I32, 1).map(|b| b.build());
    let (a, b) = (gen_schema()?, gen_schema()?);

    let sv = StructValue::with_defaults(&a)?;
    let err = codec.encode_to_bytes(&Type::from(&b), &Value::from(sv)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CodecError>(),
        Some(CodecError::SchemaMismatch { .. })
    ));

    let err = codec.encode_to_bytes(&Type::I32, &Value::I64(1)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CodecError>(),
        Some(CodecError::TypeMismatch(_))
    ));

    let err = codec.encode_to_bytes(&Type::service("Pinger"), &Value::I32(1)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CodecError>(),
        Some(CodecError::UnencodableType { .. })
    ));
    Ok(())
}

/// `buf` carries an i32 field with tag 99, which the schema lacks.
pub fn test_unknown_tag<C: Codec>(codec: &C, buf: &[u8]) -> Result<()> {
    let schema = StructType::builder("Small").field("n", Type::I32, 1)?.build();

    let err = StructValue::deserialize(codec, &schema, buf).unwrap_err();
    assert_eq!(
        err.downcast_ref::<CodecError>(),
        Some(&CodecError::UnknownFieldTag {
            struct_name: String::from("Small"),
            tag: 99,
            offset: 0,
        })
    );
    Ok(())
}
