//! Integration tests for binary protocol rows
//!
//! Rows are encoded the way the server sends them (header, NULL bitmap,
//! values), split with `BinaryRowPayload` and read through `BinaryRowDecoder`.

use pretty_assertions::assert_eq;
use zero_mysql_row::Opts;
use zero_mysql_row::col::ColumnDefinition;
use zero_mysql_row::constant::{ColumnFlags, ColumnType};
use zero_mysql_row::cursor::NullStatus;
use zero_mysql_row::decode::{BinaryRowDecoder, RowDecoder};
use zero_mysql_row::protocol::BinaryRowPayload;
use zero_mysql_row::protocol::primitive::write_bytes_lenenc;
use zero_mysql_row::temporal::{Date, Time, Timestamp};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("id", ColumnType::MYSQL_TYPE_LONGLONG)
            .with_flags(ColumnFlags::UNSIGNED_FLAG),
        ColumnDefinition::new("delta", ColumnType::MYSQL_TYPE_SHORT),
        ColumnDefinition::new("ratio", ColumnType::MYSQL_TYPE_DOUBLE),
        ColumnDefinition::new("name", ColumnType::MYSQL_TYPE_VAR_STRING),
        ColumnDefinition::new("seen", ColumnType::MYSQL_TYPE_TIMESTAMP).with_decimals(6),
        ColumnDefinition::new("shift", ColumnType::MYSQL_TYPE_TIME),
        ColumnDefinition::new("flags", ColumnType::MYSQL_TYPE_BIT).with_length(10),
    ]
}

/// Row with `name` NULL and `seen` a zero date
fn encode_row() -> Vec<u8> {
    // 2-byte bitmap, column 3 -> bit 5
    let mut out = vec![0x00, 0b0010_0000, 0x00];
    out.extend_from_slice(&9_000_000_000u64.to_le_bytes());
    out.extend_from_slice(&(-300i16).to_le_bytes());
    out.extend_from_slice(&0.25f64.to_le_bytes());
    out.push(0);
    out.push(8);
    out.push(0);
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&[8, 15, 0]);
    write_bytes_lenenc(&mut out, &[0x02, 0x01]);
    out
}

fn encode_datetime_row() -> Vec<u8> {
    let mut out = vec![0x00, 0x00, 0x00];
    out.extend_from_slice(&1u64.to_le_bytes());
    out.extend_from_slice(&1i16.to_le_bytes());
    out.extend_from_slice(&1.0f64.to_le_bytes());
    write_bytes_lenenc(&mut out, b"bob");
    out.push(11);
    out.extend_from_slice(&2024u16.to_le_bytes());
    out.extend_from_slice(&[2, 29, 23, 59, 58]);
    out.extend_from_slice(&250_000u32.to_le_bytes());
    out.push(12);
    out.push(0);
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&[1, 2, 3]);
    out.extend_from_slice(&4u32.to_le_bytes());
    write_bytes_lenenc(&mut out, &[0x00, 0x01]);
    out
}

#[test]
fn decode_row_with_null_and_zero_date() {
    init_tracing();
    let cols = columns();
    let raw = encode_row();
    let row = BinaryRowPayload::parse(&raw, cols.len()).unwrap();
    let mut decoder = BinaryRowDecoder::new(Opts::default());
    decoder.reset_row(row.fields(&cols).unwrap());

    assert_eq!(
        decoder.get_internal_u64(0, &cols[0]).unwrap(),
        Some(9_000_000_000)
    );
    assert!(decoder.get_internal_i32(0, &cols[0]).is_err());
    assert_eq!(decoder.get_internal_i16(1, &cols[1]).unwrap(), Some(-300));
    assert_eq!(decoder.get_internal_f64(2, &cols[2]).unwrap(), Some(0.25));

    assert_eq!(decoder.get_internal_string(3, &cols[3]).unwrap(), None);
    assert_eq!(decoder.status(), NullStatus::Null);

    assert_eq!(decoder.get_internal_timestamp(4, &cols[4]).unwrap(), None);
    assert_eq!(decoder.status(), NullStatus::ZeroDate);
    assert!(decoder.was_null());
    assert!(!decoder.last_value_was_null());

    assert_eq!(
        decoder.get_internal_time(5, &cols[5]).unwrap(),
        Some(Time::new(false, 8, 15, 0, 0))
    );
    assert_eq!(decoder.get_internal_bit(6).unwrap(), Some(0x0201));
}

#[test]
fn decode_row_with_fractional_temporals() {
    let cols = columns();
    let raw = encode_datetime_row();
    let row = BinaryRowPayload::parse(&raw, cols.len()).unwrap();
    let mut decoder = BinaryRowDecoder::new(Opts::default());
    decoder.reset_row(row.fields(&cols).unwrap());

    assert_eq!(
        decoder.get_internal_string(3, &cols[3]).unwrap().as_deref(),
        Some("bob")
    );
    assert_eq!(
        decoder.get_internal_timestamp(4, &cols[4]).unwrap(),
        Some(Timestamp::new(Date::new(2024, 2, 29), 23, 59, 58, 250_000_000))
    );
    assert_eq!(
        decoder.get_internal_string(4, &cols[4]).unwrap().as_deref(),
        Some("2024-02-29 23:59:58.250000")
    );
    assert_eq!(
        decoder.get_internal_time(5, &cols[5]).unwrap(),
        Some(Time::new(false, 49, 2, 3, 4_000))
    );
    assert_eq!(decoder.get_internal_bool(6, &cols[6]).unwrap(), Some(true));
}

#[test]
fn reused_decoder_across_rows() {
    let cols = columns();
    let mut decoder = BinaryRowDecoder::new(Opts::default());

    let first = encode_row();
    let row = BinaryRowPayload::parse(&first, cols.len()).unwrap();
    assert!(decoder.reset_row(row.fields(&cols).unwrap()).is_none());
    assert_eq!(decoder.get_internal_string(3, &cols[3]).unwrap(), None);

    let second = encode_datetime_row();
    let row = BinaryRowPayload::parse(&second, cols.len()).unwrap();
    let previous = decoder.reset_row(row.fields(&cols).unwrap()).unwrap();
    assert_eq!(previous[3], None);
    assert!(!decoder.was_null());
    assert_eq!(decoder.get_internal_i64(1, &cols[1]).unwrap(), Some(1));
}
