use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::sync::Arc;
use tagwire_types::schema::{StructType, Type};
use tagwire_types::value::{StructValue, Value};
use tagwire_types::wire::Codec;

fn gen_foo_schema() -> Result<Arc<StructType>> {
    let schema = StructType::builder("Foo")
        .field("bool_true", Type::Bool, 1)?
        .field("msg", Type::String, 2)?
        .field("bool_false", Type::Bool, 3)?
        .field("int_large", Type::I32, 4)?
        .field("int_neg", Type::I32, 5)?
        .field("int_small", Type::I32, 6)?
        .field("long_large", Type::I64, 7)?
        .field("long_neg", Type::I64, 8)?
        .field("num", Type::Double, 9)?
        .field("numbers", Type::list(Type::Double), 10)?
        .field("friends", Type::set(Type::String), 11)?
        .field("age_to_person", Type::map(Type::Double, Type::String), 12)?
        .build();
    Ok(schema)
}

pub fn gen_foo() -> Result<StructValue> {
    let friends: BTreeSet<Value> = [Value::from("Alice"), Value::from("Bob")].into();
    let age_to_person: BTreeMap<Value, Value> = [
        (Value::Double(15.0), Value::from("Alice")),
        (Value::Double(16.0), Value::from("Bob")),
    ]
    .into();

    let foo = StructValue::new(
        &gen_foo_schema()?,
        [
            ("num", Value::Double(25.1)),
            ("msg", Value::from("Hi, how are you")),
            ("bool_true", Value::Bool(true)),
            ("bool_false", Value::Bool(false)),
            ("int_large", Value::I32(i32::MAX)),
            ("int_small", Value::I32(5)),
            ("int_neg", Value::I32(-23)),
            ("long_large", Value::I64(1 << 62)),
            ("long_neg", Value::I64(-44)),
            ("numbers", Value::List(vec![Value::Double(13.5), Value::Double(25.3)])),
            ("friends", Value::Set(friends)),
            ("age_to_person", Value::Map(age_to_person)),
        ],
    )?;
    Ok(foo)
}

pub fn test_foo<C: Codec>(codec: &C) -> Result<()> {
    let foo = gen_foo()?;
    let buf = foo.serialize(codec)?;

    let mut r = Cursor::new(&buf);
    let decoded = StructValue::deserialize_from(codec, foo.schema(), &mut r)?;
    assert_eq!(r.position() as usize, buf.len());

    for (field, value) in foo.iter() {
        assert_eq!(decoded.get(field.name()), Some(value), "{}", field.name());
    }
    assert_eq!(decoded, foo);

    let mut written = vec![];
    let w_len = foo.serialize_to(codec, &mut written)?;
    assert_eq!(*w_len, buf.len());
    assert_eq!(written, buf);

    Ok(())
}
