use crate::encoder::{write_sleb128, write_uleb128};

fn uleb(value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    write_uleb128(&mut out, value).unwrap();
    out
}

fn sleb(value: i32) -> Vec<u8> {
    let mut out = Vec::new();
    write_sleb128(&mut out, value).unwrap();
    out
}

/// Reference SLEB128 decoder for round-trip checks.
fn decode_sleb128(bytes: &[u8]) -> (i32, usize) {
    let mut result: i64 = 0;
    let mut shift = 0;
    let mut consumed = 0;
    loop {
        let byte = bytes[consumed];
        consumed += 1;
        result |= i64::from(byte & 0x7F) << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            if shift < 64 && byte & 0x40 != 0 {
                result |= -1i64 << shift;
            }
            return (result as i32, consumed);
        }
    }
}

#[test]
fn test_uleb128_encoding() {
    assert_eq!(uleb(0), [0x00]);
    assert_eq!(uleb(1), [0x01]);
    assert_eq!(uleb(127), [0x7F]);
    assert_eq!(uleb(128), [0x80, 0x01]);
    assert_eq!(uleb(300), [0xAC, 0x02]);
    assert_eq!(uleb(1024), [0x80, 0x08]);
    assert_eq!(uleb(u32::MAX), [0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
}

#[test]
fn test_sleb128_encoding() {
    assert_eq!(sleb(0), [0x00]);
    assert_eq!(sleb(1), [0x01]);
    assert_eq!(sleb(63), [0x3F]);
    assert_eq!(sleb(64), [0xC0, 0x00]);
    assert_eq!(sleb(127), [0xFF, 0x00]);
    assert_eq!(sleb(-1), [0x7F]);
    assert_eq!(sleb(-64), [0x40]);
    assert_eq!(sleb(-65), [0xBF, 0x7F]);
    assert_eq!(sleb(-128), [0x80, 0x7F]);
    assert_eq!(sleb(i32::MAX), [0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
    assert_eq!(sleb(i32::MIN), [0x80, 0x80, 0x80, 0x80, 0x78]);
}

#[test]
fn test_sleb128_round_trip() {
    let values = [
        0,
        1,
        -1,
        2,
        -2,
        63,
        64,
        -63,
        -64,
        -65,
        127,
        128,
        -128,
        255,
        -255,
        1 << 20,
        -(1 << 20),
        i32::MAX,
        i32::MIN,
        i32::MAX - 1,
        i32::MIN + 1,
    ];
    for value in values {
        let encoded = sleb(value);
        let (decoded, consumed) = decode_sleb128(&encoded);
        assert_eq!(decoded, value, "round trip of {}", value);
        assert_eq!(consumed, encoded.len(), "trailing bytes for {}", value);
    }
}
