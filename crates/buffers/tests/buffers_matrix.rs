//! Writer/Reader roundtrip matrix for the buffers crate.

use vdf_buffers::{BufferError, Reader, Writer};

// ---------------------------------------------------------------------------
// Writer/Reader roundtrip matrix
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_u8() {
    let mut w = Writer::new();
    w.u8(0x00);
    w.u8(0x7F);
    w.u8(0xFF);
    let data = w.flush();
    let mut r = Reader::new(&data);
    assert_eq!(r.u8(), Ok(0x00));
    assert_eq!(r.u8(), Ok(0x7F));
    assert_eq!(r.u8(), Ok(0xFF));
}

#[test]
fn roundtrip_i32_le() {
    let mut w = Writer::new();
    for v in [i32::MIN, -500, -1, 0, 1, i32::MAX] {
        w.i32_le(v);
    }
    let data = w.flush();
    assert_eq!(&data[4..8], &(-500i32).to_le_bytes());
    let mut r = Reader::new(&data);
    for v in [i32::MIN, -500, -1, 0, 1, i32::MAX] {
        assert_eq!(r.i32_le(), Ok(v));
    }
    assert!(r.is_empty());
}

#[test]
fn roundtrip_u64_le() {
    let mut w = Writer::new();
    for v in [0, 1234, u64::MAX] {
        w.u64_le(v);
    }
    let data = w.flush();
    let mut r = Reader::new(&data);
    for v in [0, 1234, u64::MAX] {
        assert_eq!(r.u64_le(), Ok(v));
    }
}

#[test]
fn roundtrip_f32_le() {
    let mut w = Writer::new();
    for v in [0.0f32, -1.5, 1.0e-3, f32::MAX] {
        w.f32_le(v);
    }
    let data = w.flush();
    let mut r = Reader::new(&data);
    for v in [0.0f32, -1.5, 1.0e-3, f32::MAX] {
        assert_eq!(r.f32_le(), Ok(v));
    }
}

#[test]
fn roundtrip_cstr() {
    let mut w = Writer::new();
    w.cstr(b"key");
    w.cstr(b"");
    w.cstr("ключ".as_bytes());
    let data = w.flush();
    let mut r = Reader::new(&data);
    assert_eq!(r.cstr(), Ok(&b"key"[..]));
    assert_eq!(r.cstr(), Ok(&b""[..]));
    assert_eq!(r.cstr(), Ok("ключ".as_bytes()));
    assert!(r.is_empty());
}

#[test]
fn roundtrip_wide_cstr() {
    let mut w = Writer::new();
    w.wide_cstr("абв");
    w.wide_cstr("");
    w.u8(0x08);
    let data = w.flush();
    let mut r = Reader::new(&data);

    let units: Vec<u16> = r
        .wide_cstr()
        .unwrap()
        .chunks_exact(2)
        .map(|u| u16::from_le_bytes([u[0], u[1]]))
        .collect();
    assert_eq!(String::from_utf16(&units).unwrap(), "абв");
    assert_eq!(r.wide_cstr(), Ok(&b""[..]));
    assert_eq!(r.u8(), Ok(0x08));
}

#[test]
fn mixed_record() {
    let mut w = Writer::new();
    w.u8(0x02);
    w.cstr(b"n");
    w.i32_le(7);
    w.u8(0x08);
    assert_eq!(w.len(), 8);

    let data = w.flush();
    assert_eq!(data, b"\x02n\x00\x07\x00\x00\x00\x08");
    let mut r = Reader::new(&data);
    assert_eq!(r.peek(), Some(0x02));
    assert_eq!(r.u8(), Ok(0x02));
    assert_eq!(r.cstr(), Ok(&b"n"[..]));
    assert_eq!(r.i32_le(), Ok(7));
    assert_eq!(r.size(), 1);
}

// ---------------------------------------------------------------------------
// Short input
// ---------------------------------------------------------------------------

#[test]
fn short_reads_fail_without_moving() {
    let data = [0x01, 0x02, 0x03];
    let mut r = Reader::new(&data);
    assert_eq!(r.u64_le(), Err(BufferError::EndOfBuffer));
    assert_eq!(r.f32_le(), Err(BufferError::EndOfBuffer));
    assert_eq!(r.i32_le(), Err(BufferError::EndOfBuffer));
    assert_eq!(r.x, 0);
    assert_eq!(r.size(), 3);
    assert_eq!(r.u8(), Ok(0x01));
    assert_eq!(r.peek(), Some(0x02));
}

#[test]
fn writer_reset_discards_pending_bytes() {
    let mut w = Writer::new();
    w.buf(&[1, 2, 3]);
    w.reset();
    assert!(w.is_empty());
    w.u8(9);
    assert_eq!(w.flush(), vec![9]);
}
