use super::helpers::assert_round_trip;
use anyhow::Result;
use itertools::Itertools;
use rand::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tagwire_types::schema::Type;
use tagwire_types::value::Value;
use tagwire_types::wire::Codec;

pub fn test_scalars<C: Codec>(codec: &C) -> Result<()> {
    fixed_cases(codec)?;
    random_cases(codec)?;
    containers(codec)?;
    Ok(())
}

fn fixed_cases<C: Codec>(codec: &C) -> Result<()> {
    for b in [true, false] {
        assert_round_trip(codec, &Type::Bool, &Value::Bool(b))?;
    }
    for i in [i8::MIN, -1, 0, 1, i8::MAX] {
        assert_round_trip(codec, &Type::I8, &Value::I8(i))?;
    }
    for i in [-1, 0, 1, 1 << 14, -(1 << 14), i16::MIN, i16::MAX] {
        assert_round_trip(codec, &Type::I16, &Value::I16(i))?;
    }
    for i in [-1, 0, 1, 1 << 30, -(1 << 30), i32::MIN, i32::MAX] {
        assert_round_trip(codec, &Type::I32, &Value::I32(i))?;
    }
    for i in [-1, 0, 1, 1 << 62, -(1 << 62), i64::MIN, i64::MAX] {
        assert_round_trip(codec, &Type::I64, &Value::I64(i))?;
    }
    for d in [0.0, -0.0, 25.1, -13.5, f64::MAX, f64::INFINITY] {
        assert_round_trip(codec, &Type::Double, &Value::Double(d))?;
    }

    let byte_strings: [&[u8]; 4] = [b"", &[0x00], &[0xF4], b"hi how are you"];
    for bytes in byte_strings {
        assert_round_trip(codec, &Type::Binary, &Value::Binary(bytes.to_vec()))?;
    }
    for s in ["", "hi how are you", "hi \u{2603} how are you", "\u{1F980}"] {
        assert_round_trip(codec, &Type::String, &Value::from(s))?;
        assert_round_trip(codec, &Type::Utf16String, &Value::from(s))?;
    }
    Ok(())
}

fn random_cases<C: Codec>(codec: &C) -> Result<()> {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        assert_round_trip(codec, &Type::I16, &Value::I16(rng.gen()))?;
        assert_round_trip(codec, &Type::I32, &Value::I32(rng.gen()))?;
        assert_round_trip(codec, &Type::I64, &Value::I64(rng.gen()))?;
        assert_round_trip(codec, &Type::Double, &Value::Double(rng.gen()))?;

        let len = rng.gen_range(0..64);
        let bytes = (0..len).map(|_| rng.gen::<u8>()).collect_vec();
        assert_round_trip(codec, &Type::Binary, &Value::Binary(bytes))?;
    }
    Ok(())
}

fn containers<C: Codec>(codec: &C) -> Result<()> {
    let ty = Type::list(Type::list(Type::I32));
    let value = Value::List(
        (0..20)
            .map(|n| Value::List((0..n).map(Value::I32).collect_vec()))
            .collect_vec(),
    );
    assert_round_trip(codec, &ty, &value)?;

    let ty = Type::set(Type::String);
    let value = Value::Set(["x", "y", "z"].into_iter().map(Value::from).collect::<BTreeSet<_>>());
    assert_round_trip(codec, &ty, &value)?;

    let ty = Type::map(Type::String, Type::list(Type::Bool));
    let mut entries = BTreeMap::new();
    entries.insert(Value::from("none"), Value::List(vec![]));
    entries.insert(
        Value::from("some"),
        Value::List(vec![Value::Bool(true), Value::Bool(false)]),
    );
    assert_round_trip(codec, &ty, &Value::Map(entries))?;
    assert_round_trip(codec, &ty, &Value::Map(BTreeMap::new()))?;
    Ok(())
}
