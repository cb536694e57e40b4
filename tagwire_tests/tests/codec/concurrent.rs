use super::foo::gen_foo;
use anyhow::Result;
use std::thread;
use tagwire_types::value::StructValue;
use tagwire_types::wire::Codec;

const THREADS: usize = 8;
const ROUNDS: usize = 50;

/// One codec instance, shared read-only across threads, each with its own buffers.
pub fn test_shared_codec<C: Codec + Sync>(codec: &C) -> Result<()> {
    let foo = gen_foo()?;
    let expected = foo.serialize(codec)?;

    thread::scope(|s| {
        let handles = (0..THREADS)
            .map(|_| {
                s.spawn(|| -> Result<()> {
                    for _ in 0..ROUNDS {
                        let buf = foo.serialize(codec)?;
                        assert_eq!(buf, expected);
                        let decoded = StructValue::deserialize(codec, foo.schema(), &buf)?;
                        assert_eq!(decoded, foo);
                    }
                    Ok(())
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .try_for_each(|h| h.join().unwrap_or_else(|_| panic!("codec thread panicked")))
    })
}
