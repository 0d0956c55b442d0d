//! Binary protocol wire layouts for temporal values, and the NULL bitmap.

use crate::error::{Error, Result};
use crate::temporal::{Date, Time, Timestamp};
use zerocopy::byteorder::little_endian::{U16 as U16LE, U32 as U32LE};
use zerocopy::{FromBytes, Immutable, KnownLayout};

// ============================================================================
// Temporal Types
// ============================================================================

/// DATE/DATETIME/TIMESTAMP - 4 bytes (ymd)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable)]
pub struct Timestamp4 {
    pub year: U16LE,
    pub month: u8,
    pub day: u8,
}

/// DATE/DATETIME/TIMESTAMP - 7 bytes (ymd + hms)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable)]
pub struct Timestamp7 {
    pub year: U16LE,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// DATE/DATETIME/TIMESTAMP - 11 bytes (ymd + hms + microseconds)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable)]
pub struct Timestamp11 {
    pub year: U16LE,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: U32LE,
}

/// TIME - 8 bytes: is_negative (1), days (4 LE), hour, minute, second
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable)]
pub struct Time8 {
    pub is_negative: u8,
    pub days: U32LE,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// TIME - 12 bytes: [`Time8`] followed by microseconds (4 LE)
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable)]
pub struct Time12 {
    pub is_negative: u8,
    pub days: U32LE,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: U32LE,
}

impl From<&Timestamp4> for Timestamp {
    fn from(v: &Timestamp4) -> Self {
        Timestamp::from_date(Date::new(v.year.get() as i32, v.month, v.day))
    }
}

impl From<&Timestamp7> for Timestamp {
    fn from(v: &Timestamp7) -> Self {
        let date = Date::new(v.year.get() as i32, v.month, v.day);
        Timestamp::new(date, v.hour, v.minute, v.second, 0)
    }
}

// A microsecond count past 999_999 is a malformed packet
fn wire_nanos(micros: u32) -> Result<u32> {
    if micros > 999_999 {
        return Err(Error::InvalidPacket);
    }
    Ok(micros * 1000)
}

fn wire_hours(days: u32, hour: u8) -> Result<u32> {
    days.checked_mul(24)
        .and_then(|h| h.checked_add(hour as u32))
        .ok_or(Error::InvalidPacket)
}

impl TryFrom<&Timestamp11> for Timestamp {
    type Error = Error;

    fn try_from(v: &Timestamp11) -> Result<Self> {
        let date = Date::new(v.year.get() as i32, v.month, v.day);
        let nanos = wire_nanos(v.microsecond.get())?;
        Ok(Timestamp::new(date, v.hour, v.minute, v.second, nanos))
    }
}

impl TryFrom<&Time8> for Time {
    type Error = Error;

    fn try_from(v: &Time8) -> Result<Self> {
        let hours = wire_hours(v.days.get(), v.hour)?;
        Ok(Time::new(v.is_negative != 0, hours, v.minute, v.second, 0))
    }
}

impl TryFrom<&Time12> for Time {
    type Error = Error;

    fn try_from(v: &Time12) -> Result<Self> {
        let hours = wire_hours(v.days.get(), v.hour)?;
        let nanos = wire_nanos(v.microsecond.get())?;
        Ok(Time::new(v.is_negative != 0, hours, v.minute, v.second, nanos))
    }
}

/// A binary DATE/DATETIME/TIMESTAMP field, without its length prefix
#[derive(Debug, Clone, Copy)]
pub enum BinaryDatetime<'a> {
    /// 0 bytes (0000-00-00 00:00:00)
    Zero,
    Date(&'a Timestamp4),
    DateTime(&'a Timestamp7),
    DateTimeMicros(&'a Timestamp11),
}

impl<'a> BinaryDatetime<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        match data.len() {
            0 => Ok(Self::Zero),
            4 => Ok(Self::Date(
                Timestamp4::ref_from_bytes(data).map_err(Error::from_debug)?,
            )),
            7 => Ok(Self::DateTime(
                Timestamp7::ref_from_bytes(data).map_err(Error::from_debug)?,
            )),
            11 => Ok(Self::DateTimeMicros(
                Timestamp11::ref_from_bytes(data).map_err(Error::from_debug)?,
            )),
            _ => Err(Error::InvalidPacket),
        }
    }

    /// `None` for a zero date
    pub fn to_timestamp(self) -> Result<Option<Timestamp>> {
        let ts = match self {
            Self::Zero => return Ok(None),
            Self::Date(v) => Timestamp::from(v),
            Self::DateTime(v) => Timestamp::from(v),
            Self::DateTimeMicros(v) => Timestamp::try_from(v)?,
        };
        Ok((!ts.is_zero()).then_some(ts))
    }
}

/// A binary TIME field, without its length prefix
#[derive(Debug, Clone, Copy)]
pub enum BinaryTime<'a> {
    /// 0 bytes (00:00:00)
    Zero,
    Time(&'a Time8),
    TimeMicros(&'a Time12),
}

impl<'a> BinaryTime<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        match data.len() {
            0 => Ok(Self::Zero),
            8 => Ok(Self::Time(
                Time8::ref_from_bytes(data).map_err(Error::from_debug)?,
            )),
            12 => Ok(Self::TimeMicros(
                Time12::ref_from_bytes(data).map_err(Error::from_debug)?,
            )),
            _ => Err(Error::InvalidPacket),
        }
    }

    pub fn to_time(self) -> Result<Time> {
        match self {
            Self::Zero => Ok(Time::default()),
            Self::Time(v) => Time::try_from(v),
            Self::TimeMicros(v) => Time::try_from(v),
        }
    }
}

// ============================================================================
// NULL Bitmap
// ============================================================================

/// NULL bitmap of a binary protocol result row
///
/// Each bit marks a NULL column (1 = NULL). Result rows start at bit 2.
#[derive(Debug, Clone, Copy)]
pub struct NullBitmap<'a> {
    bitmap: &'a [u8],
    offset: usize,
}

impl<'a> NullBitmap<'a> {
    /// Create a NULL bitmap for result sets (offset = 2)
    pub fn for_result_set(bitmap: &'a [u8]) -> Self {
        Self { bitmap, offset: 2 }
    }

    /// Number of bitmap bytes for a row of `num_columns`
    pub fn len_for_result_set(num_columns: usize) -> usize {
        (num_columns + 7 + 2) >> 3
    }

    /// Check if the column at the given index is NULL
    pub fn is_null(&self, idx: usize) -> bool {
        let bit_pos = idx + self.offset;
        let byte_pos = bit_pos >> 3;
        let bit_offset = bit_pos & 7;

        self.bitmap
            .get(byte_pos)
            .is_some_and(|byte| byte & (1 << bit_offset) != 0)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bitmap
    }
}

#[cfg(test)]
mod tests {
    use std::mem::align_of;

    use super::*;

    #[test]
    fn datetime_lengths() {
        assert!(matches!(BinaryDatetime::parse(&[]).unwrap(), BinaryDatetime::Zero));

        let mut data = Vec::new();
        data.extend_from_slice(&2024u16.to_le_bytes());
        data.extend_from_slice(&[12, 25]);
        let v = BinaryDatetime::parse(&data).unwrap();
        assert_eq!(v.to_timestamp().unwrap().unwrap().to_string(), "2024-12-25 00:00:00");

        data.extend_from_slice(&[15, 30, 45]);
        let v = BinaryDatetime::parse(&data).unwrap();
        assert_eq!(v.to_timestamp().unwrap().unwrap().to_string(), "2024-12-25 15:30:45");

        data.extend_from_slice(&123_456u32.to_le_bytes());
        let v = BinaryDatetime::parse(&data).unwrap();
        assert_eq!(
            v.to_timestamp().unwrap().unwrap().to_string(),
            "2024-12-25 15:30:45.123456"
        );

        assert!(matches!(
            BinaryDatetime::parse(&[1, 2, 3]),
            Err(Error::InvalidPacket)
        ));
        assert!(matches!(BinaryTime::parse(&[0; 9]), Err(Error::InvalidPacket)));
    }

    #[test]
    fn out_of_range_wire_fields() {
        let mut time = vec![0u8];
        time.extend_from_slice(&u32::MAX.to_le_bytes());
        time.extend_from_slice(&[1, 2, 3]);
        let v = BinaryTime::parse(&time).unwrap();
        assert!(matches!(v.to_time(), Err(Error::InvalidPacket)));

        let mut time = vec![0u8];
        time.extend_from_slice(&1u32.to_le_bytes());
        time.extend_from_slice(&[1, 2, 3]);
        time.extend_from_slice(&1_000_000u32.to_le_bytes());
        let v = BinaryTime::parse(&time).unwrap();
        assert!(matches!(v.to_time(), Err(Error::InvalidPacket)));

        let mut datetime = 2024u16.to_le_bytes().to_vec();
        datetime.extend_from_slice(&[12, 25, 15, 30, 45]);
        datetime.extend_from_slice(&u32::MAX.to_le_bytes());
        let v = BinaryDatetime::parse(&datetime).unwrap();
        assert!(matches!(v.to_timestamp(), Err(Error::InvalidPacket)));
    }

    #[test]
    fn all_zero_datetime_is_zero_date() {
        let v = BinaryDatetime::parse(&[0, 0, 0, 0]).unwrap();
        assert!(v.to_timestamp().unwrap().is_none());
    }

    #[test]
    fn time_lengths() {
        // negative, 1 day 12:30:45
        let mut data = vec![1u8];
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&[12, 30, 45]);
        let t = BinaryTime::parse(&data).unwrap().to_time().unwrap();
        assert_eq!(t.to_string(), "-36:30:45");

        data.extend_from_slice(&500_000u32.to_le_bytes());
        let t = BinaryTime::parse(&data).unwrap().to_time().unwrap();
        assert_eq!(t.nanos, 500_000_000);

        assert!(BinaryTime::parse(&[]).unwrap().to_time().unwrap().is_zero());
    }

    #[test]
    fn test_null_bitmap_result_set() {
        // Bit 2 is column 0, bit 12 is column 10
        let bitmap = [0b00000100, 0b00010000];
        let null_bitmap = NullBitmap::for_result_set(&bitmap);

        assert!(null_bitmap.is_null(0));
        assert!(!null_bitmap.is_null(1));
        assert!(!null_bitmap.is_null(2));
        assert!(null_bitmap.is_null(10));
        assert!(!null_bitmap.is_null(100));
    }

    #[test]
    fn bitmap_length() {
        assert_eq!(NullBitmap::len_for_result_set(1), 1);
        assert_eq!(NullBitmap::len_for_result_set(6), 1);
        assert_eq!(NullBitmap::len_for_result_set(7), 2);
    }

    #[test]
    fn zerocopy_types_have_alignment_of_1() {
        assert_eq!(align_of::<Timestamp4>(), 1);
        assert_eq!(align_of::<Timestamp7>(), 1);
        assert_eq!(align_of::<Timestamp11>(), 1);
        assert_eq!(align_of::<Time8>(), 1);
        assert_eq!(align_of::<Time12>(), 1);
    }
}
