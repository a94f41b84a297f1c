//! Fuzz testing for the join key builder and map.
//!
//! This fuzz target writes arbitrary typed key sequences into a JoinKeyMap
//! to ensure that key building never panics, that equal write sequences
//! find each other, and that clear leaves the map reusable.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tidedb::map::JoinKeyMap;
use tidedb::types::ColumnType;

#[derive(Debug, Arbitrary, Clone)]
enum KeyPart {
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Timestamp(i64),
    Str(Option<String>),
    Symbol(i32),
    Bin(Option<Vec<u8>>),
}

#[derive(Debug, Arbitrary)]
struct Input {
    keys: Vec<Vec<KeyPart>>,
    clear_at: Option<u8>,
}

fn write_parts(map: &mut JoinKeyMap, parts: &[KeyPart]) -> tidedb::map::KeyBuilder<'_> {
    let mut key = map.with_key();
    for part in parts {
        match part {
            KeyPart::Bool(v) => key.put_bool(*v),
            KeyPart::Int(v) => key.put_int(*v),
            KeyPart::Long(v) => key.put_long(*v),
            KeyPart::Double(v) => key.put_double(*v),
            KeyPart::Timestamp(v) => key.put_timestamp(*v),
            KeyPart::Str(v) => key.put_str(v.as_deref()),
            KeyPart::Symbol(v) => key.put_symbol(*v),
            KeyPart::Bin(v) => key.put_bin(v.as_deref()),
        }
    }
    key
}

fuzz_target!(|input: Input| {
    let mut map = JoinKeyMap::new(&[ColumnType::Str], 1);

    for (i, parts) in input.keys.iter().enumerate() {
        write_parts(&mut map, parts).create_value().put_long(0, i as i64);

        // The same write sequence must find the entry it just created.
        let slot = write_parts(&mut map, parts)
            .find_value()
            .expect("key just inserted");
        assert_eq!(slot.get_long(0), i as i64);

        if input.clear_at == Some(i as u8) {
            map.clear();
            assert!(map.is_empty());
            assert!(write_parts(&mut map, parts).find_value().is_none());
        }
    }
});
