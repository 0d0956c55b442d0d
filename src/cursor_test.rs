use pretty_assertions::assert_eq;

use crate::col::ColumnDefinition;
use crate::constant::{ColumnFlags, ColumnType};
use crate::cursor::{NullStatus, RowCursor, decode_packed};
use crate::error::Error;

fn signed_col() -> ColumnDefinition {
    ColumnDefinition::new("n", ColumnType::MYSQL_TYPE_LONGLONG)
}

fn unsigned_col() -> ColumnDefinition {
    signed_col().with_flags(ColumnFlags::UNSIGNED_FLAG)
}

fn cursor_on(bytes: &[u8]) -> RowCursor {
    let mut cursor = RowCursor::new(0);
    cursor.reset_row(vec![Some(bytes.to_vec())]);
    cursor.set_position(0).unwrap();
    cursor
}

#[test]
fn big_endian_accumulation() {
    let cases: [(&[u8], i64); 5] = [
        (&[0x7F], 0x7F),
        (&[0x01, 0x02], 0x0102),
        (&[0x01, 0x02, 0x03], 0x01_0203),
        (&[0x01, 0x02, 0x03, 0x04], 0x0102_0304),
        (
            &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08],
            0x0102_0304_0506_0708,
        ),
    ];
    for (bytes, expected) in cases {
        let cursor = cursor_on(bytes);
        assert_eq!(cursor.decode_integer(&signed_col()).unwrap(), expected);
        assert_eq!(cursor.decode_integer(&unsigned_col()).unwrap(), expected);
    }
}

#[test]
fn sign_extension_follows_width() {
    assert_eq!(decode_packed(&[0xFF], true), -1);
    assert_eq!(decode_packed(&[0xFF], false), 255);
    assert_eq!(decode_packed(&[0xFF, 0xFE], true), -2);
    assert_eq!(decode_packed(&[0xFF, 0xFE], false), 0xFFFE);
    assert_eq!(decode_packed(&[0x80, 0x00, 0x00], true), -8_388_608);
    assert_eq!(decode_packed(&[0x80, 0x00, 0x00, 0x00], false), 2_147_483_648);
    assert_eq!(decode_packed(&[0xFF; 8], true), -1);
    assert_eq!(decode_packed(&[], true), 0);
}

#[test]
fn width_wrappers_agree() {
    let cursor = cursor_on(&[0xFF, 0x85]);
    let col = signed_col();
    let expected = cursor.decode_integer(&col).unwrap();
    assert_eq!(expected, -123);
    assert_eq!(cursor.decode_tiny_int(&col).unwrap(), expected);
    assert_eq!(cursor.decode_small_int(&col).unwrap(), expected);
    assert_eq!(cursor.decode_medium_int(&col).unwrap(), expected);
    assert_eq!(cursor.decode_int(&col).unwrap(), expected);
    assert_eq!(cursor.decode_big_int(&col).unwrap(), expected);
}

#[test]
fn decode_bit_is_unsigned() {
    assert_eq!(cursor_on(&[0x05]).decode_bit().unwrap(), 5);
    assert_eq!(cursor_on(&[0x01, 0x00]).decode_bit().unwrap(), 256);
    assert_eq!(cursor_on(&[0xFF]).decode_bit().unwrap(), 255);
}

#[test]
fn effective_length_with_ceiling() {
    let mut cursor = RowCursor::new(3);
    cursor.reset_row(vec![Some(b"0123456789".to_vec()), Some(b"ab".to_vec())]);

    cursor.set_position(0).unwrap();
    assert_eq!(cursor.length(), 10);
    assert_eq!(cursor.effective_length(), 3);
    assert_eq!(cursor.field_bytes().unwrap(), b"012");
    assert_eq!(cursor.raw_field().unwrap(), b"0123456789");

    cursor.set_position(1).unwrap();
    assert_eq!(cursor.effective_length(), 2);
}

#[test]
fn effective_length_without_ceiling() {
    let cursor = cursor_on(b"0123456789");
    assert_eq!(cursor.effective_length(), 10);
}

#[test]
fn truncation_applies_to_packed_integers() {
    let mut cursor = RowCursor::new(1);
    cursor.reset_row(vec![Some(vec![0x01, 0x00])]);
    cursor.set_position(0).unwrap();
    assert_eq!(cursor.decode_bit().unwrap(), 1);
}

#[test]
fn null_status() {
    let mut cursor = RowCursor::new(0);
    cursor.reset_row(vec![None, Some(b"0000-00-00".to_vec())]);

    assert!(cursor.set_position(0).unwrap());
    assert_eq!(cursor.status(), NullStatus::Null);
    assert!(cursor.was_null());
    assert!(cursor.last_value_was_null());
    assert_eq!(cursor.decode_integer(&signed_col()).unwrap(), 0);

    assert!(!cursor.set_position(1).unwrap());
    assert!(!cursor.was_null());
    cursor.mark_zero_date();
    assert_eq!(cursor.status(), NullStatus::ZeroDate);
    assert!(cursor.was_null());
    assert!(!cursor.last_value_was_null());
}

#[test]
fn reset_row_clears_status() {
    let mut cursor = RowCursor::new(0);
    cursor.reset_row(vec![None]);
    cursor.set_position(0).unwrap();
    assert!(cursor.was_null());

    let previous = cursor.reset_row(vec![Some(vec![1])]);
    assert_eq!(previous, Some(vec![None]));
    assert_eq!(cursor.status(), NullStatus::NotNull);
    assert_eq!(cursor.num_fields(), 1);
}

#[test]
fn misuse_is_reported() {
    let mut cursor = RowCursor::new(0);
    assert!(matches!(cursor.set_position(0), Err(Error::BadUsageError(_))));
    assert!(matches!(cursor.field_bytes(), Err(Error::BadUsageError(_))));

    cursor.reset_row(vec![Some(vec![1])]);
    assert!(matches!(cursor.set_position(1), Err(Error::BadUsageError(_))));
    // the failed move leaves the cursor where it was
    assert_eq!(cursor.index(), 0);
}
