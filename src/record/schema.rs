//! Fixed-layout record schemas
//!
//! A schema is declared by a `struct`-style descriptor string: an optional
//! byte-order prefix (`<` little, `>` or `!` big, `=` or `@` native;
//! little-endian when omitted) followed by field codes with optional
//! decimal repeat counts. Supported codes:
//!
//! | code | type | width |
//! |------|------|-------|
//! | `b` / `B` | i8 / u8  | 1 |
//! | `h` / `H` | i16 / u16 | 2 |
//! | `i` / `I`, `l` / `L` | i32 / u32 | 4 |
//! | `q` / `Q` | i64 / u64 | 8 |
//! | `?` | bool | 1 |
//!
//! `"<H?"` declares a little-endian u16 followed by a bool, 3 bytes total.
//! Records are flat: no padding, no variable-length or nested fields.

use crate::error::{Result, TrieError};

const MAX_FIELDS: usize = 1 << 16;

/// Byte order for every field of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }
}

/// A scalar field shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Signed 8-bit integer (`b`)
    I8,
    /// Unsigned 8-bit integer (`B`)
    U8,
    /// Signed 16-bit integer (`h`)
    I16,
    /// Unsigned 16-bit integer (`H`)
    U16,
    /// Signed 32-bit integer (`i`, `l`)
    I32,
    /// Unsigned 32-bit integer (`I`, `L`)
    U32,
    /// Signed 64-bit integer (`q`)
    I64,
    /// Unsigned 64-bit integer (`Q`)
    U64,
    /// Boolean, one byte, nonzero decodes as true (`?`)
    Bool,
}

impl FieldType {
    /// Field width in bytes
    pub fn width(self) -> usize {
        match self {
            FieldType::I8 | FieldType::U8 | FieldType::Bool => 1,
            FieldType::I16 | FieldType::U16 => 2,
            FieldType::I32 | FieldType::U32 => 4,
            FieldType::I64 | FieldType::U64 => 8,
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(FieldType::I8),
            'B' => Some(FieldType::U8),
            'h' => Some(FieldType::I16),
            'H' => Some(FieldType::U16),
            'i' | 'l' => Some(FieldType::I32),
            'I' | 'L' => Some(FieldType::U32),
            'q' => Some(FieldType::I64),
            'Q' => Some(FieldType::U64),
            '?' => Some(FieldType::Bool),
            _ => None,
        }
    }
}

/// A scalar record value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// Signed 8-bit integer
    I8(i8),
    /// Unsigned 8-bit integer
    U8(u8),
    /// Signed 16-bit integer
    I16(i16),
    /// Unsigned 16-bit integer
    U16(u16),
    /// Signed 32-bit integer
    I32(i32),
    /// Unsigned 32-bit integer
    U32(u32),
    /// Signed 64-bit integer
    I64(i64),
    /// Unsigned 64-bit integer
    U64(u64),
    /// Boolean
    Bool(bool),
}

impl Value {
    /// The field shape this value fills
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::I8(_) => FieldType::I8,
            Value::U8(_) => FieldType::U8,
            Value::I16(_) => FieldType::I16,
            Value::U16(_) => FieldType::U16,
            Value::I32(_) => FieldType::I32,
            Value::U32(_) => FieldType::U32,
            Value::I64(_) => FieldType::I64,
            Value::U64(_) => FieldType::U64,
            Value::Bool(_) => FieldType::Bool,
        }
    }
}

/// A parsed, fixed-width record layout
#[derive(Debug, Clone)]
pub struct Schema {
    descriptor: String,
    byte_order: ByteOrder,
    fields: Vec<FieldType>,
    width: usize,
}

impl Schema {
    /// Parse a descriptor string
    pub fn parse(descriptor: &str) -> Result<Self> {
        let mut chars = descriptor.chars().peekable();

        let byte_order = match chars.peek() {
            Some('<') => {
                chars.next();
                ByteOrder::Little
            }
            Some('>') | Some('!') => {
                chars.next();
                ByteOrder::Big
            }
            Some('=') | Some('@') => {
                chars.next();
                ByteOrder::native()
            }
            _ => ByteOrder::Little,
        };

        let mut fields = Vec::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_whitespace() {
                chars.next();
                continue;
            }

            let mut repeat = 1usize;
            if c.is_ascii_digit() {
                repeat = 0;
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    chars.next();
                    repeat = repeat
                        .checked_mul(10)
                        .and_then(|r| r.checked_add(d as usize - '0' as usize))
                        .ok_or_else(|| {
                            TrieError::schema(format!(
                                "repeat count overflows in {:?}",
                                descriptor
                            ))
                        })?;
                }
            }

            let code = chars.next().ok_or_else(|| {
                TrieError::schema(format!("trailing repeat count in {:?}", descriptor))
            })?;
            let field = FieldType::from_code(code).ok_or_else(|| {
                TrieError::schema(format!(
                    "unknown field code {:?} in {:?}",
                    code, descriptor
                ))
            })?;
            if fields.len() + repeat > MAX_FIELDS {
                return Err(TrieError::schema(format!(
                    "schema {:?} declares too many fields",
                    descriptor
                )));
            }
            for _ in 0..repeat {
                fields.push(field);
            }
        }

        if fields.is_empty() {
            return Err(TrieError::schema(format!(
                "schema {:?} declares no fields",
                descriptor
            )));
        }

        let width = fields.iter().map(|f| f.width()).sum();
        Ok(Self {
            descriptor: descriptor.to_string(),
            byte_order,
            fields,
            width,
        })
    }

    /// The descriptor string this schema was parsed from
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Fixed record width in bytes
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of fields per record
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Encode one record; the value list must match the schema's fields
    /// in count and type
    pub fn encode(&self, values: &[Value]) -> Result<Vec<u8>> {
        if values.len() != self.fields.len() {
            return Err(TrieError::schema(format!(
                "record has {} values, schema {:?} wants {}",
                values.len(),
                self.descriptor,
                self.fields.len()
            )));
        }

        let mut payload = Vec::with_capacity(self.width);
        for (field, value) in self.fields.iter().zip(values) {
            if value.field_type() != *field {
                return Err(TrieError::schema(format!(
                    "value {:?} does not fit field {:?}",
                    value, field
                )));
            }
            self.encode_value(*value, &mut payload);
        }
        Ok(payload)
    }

    fn encode_value(&self, value: Value, out: &mut Vec<u8>) {
        macro_rules! put {
            ($v:expr) => {
                match self.byte_order {
                    ByteOrder::Little => out.extend_from_slice(&$v.to_le_bytes()),
                    ByteOrder::Big => out.extend_from_slice(&$v.to_be_bytes()),
                }
            };
        }
        match value {
            Value::I8(v) => out.push(v as u8),
            Value::U8(v) => out.push(v),
            Value::I16(v) => put!(v),
            Value::U16(v) => put!(v),
            Value::I32(v) => put!(v),
            Value::U32(v) => put!(v),
            Value::I64(v) => put!(v),
            Value::U64(v) => put!(v),
            Value::Bool(v) => out.push(v as u8),
        }
    }

    /// Decode one record; fails with a schema error when the payload
    /// length disagrees with the fixed record width
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<Value>> {
        if payload.len() != self.width {
            return Err(TrieError::schema(format!(
                "payload of {} bytes does not match record width {}",
                payload.len(),
                self.width
            )));
        }

        let mut values = Vec::with_capacity(self.fields.len());
        let mut at = 0usize;
        for field in &self.fields {
            let bytes = &payload[at..at + field.width()];
            at += field.width();
            values.push(self.decode_value(*field, bytes));
        }
        Ok(values)
    }

    fn decode_value(&self, field: FieldType, bytes: &[u8]) -> Value {
        macro_rules! take {
            ($ty:ty) => {{
                let arr = bytes.try_into().expect("field width checked by caller");
                match self.byte_order {
                    ByteOrder::Little => <$ty>::from_le_bytes(arr),
                    ByteOrder::Big => <$ty>::from_be_bytes(arr),
                }
            }};
        }
        match field {
            FieldType::I8 => Value::I8(bytes[0] as i8),
            FieldType::U8 => Value::U8(bytes[0]),
            FieldType::I16 => Value::I16(take!(i16)),
            FieldType::U16 => Value::U16(take!(u16)),
            FieldType::I32 => Value::I32(take!(i32)),
            FieldType::U32 => Value::U32(take!(u32)),
            FieldType::I64 => Value::I64(take!(i64)),
            FieldType::U64 => Value::U64(take!(u64)),
            FieldType::Bool => Value::Bool(bytes[0] != 0),
        }
    }
}

/// Schemas are equal when they describe the same layout, regardless of
/// how the descriptor spelled it (`"<HH"` equals `"<2H"`)
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.byte_order == other.byte_order && self.fields == other.fields
    }
}

impl Eq for Schema {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let schema = Schema::parse("<H?").unwrap();
        assert_eq!(schema.width(), 3);
        assert_eq!(schema.num_fields(), 2);
        assert_eq!(schema.descriptor(), "<H?");
    }

    #[test]
    fn test_parse_repeat_counts() {
        let schema = Schema::parse(">3Hq").unwrap();
        assert_eq!(schema.num_fields(), 4);
        assert_eq!(schema.width(), 3 * 2 + 8);
        assert_eq!(Schema::parse(">HHHq").unwrap(), schema);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Schema::parse("").is_err());
        assert!(Schema::parse("<").is_err());
        assert!(Schema::parse("<Hz").is_err());
        assert!(Schema::parse("<3").is_err());
        assert_eq!(Schema::parse("x").unwrap_err().category(), "schema");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let schema = Schema::parse("<HqB?").unwrap();
        let record = vec![
            Value::U16(0xBEEF),
            Value::I64(-123456789),
            Value::U8(7),
            Value::Bool(true),
        ];
        let payload = schema.encode(&record).unwrap();
        assert_eq!(payload.len(), schema.width());
        assert_eq!(schema.decode(&payload).unwrap(), record);
    }

    #[test]
    fn test_big_endian_layout() {
        let schema = Schema::parse(">H").unwrap();
        let payload = schema.encode(&[Value::U16(0x0102)]).unwrap();
        assert_eq!(payload, vec![0x01, 0x02]);

        let little = Schema::parse("<H").unwrap();
        assert_eq!(little.encode(&[Value::U16(0x0102)]).unwrap(), vec![0x02, 0x01]);
    }

    #[test]
    fn test_encode_mismatches() {
        let schema = Schema::parse("<H?").unwrap();
        // Wrong count
        assert!(schema.encode(&[Value::U16(1)]).is_err());
        // Wrong type
        let err = schema
            .encode(&[Value::U32(1), Value::Bool(false)])
            .unwrap_err();
        assert_eq!(err.category(), "schema");
    }

    #[test]
    fn test_decode_length_mismatch() {
        let schema = Schema::parse("<H?").unwrap();
        let err = schema.decode(&[0, 1]).unwrap_err();
        assert_eq!(err.category(), "schema");
        assert!(schema.decode(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_bool_decodes_any_nonzero() {
        let schema = Schema::parse("<?").unwrap();
        assert_eq!(schema.decode(&[0]).unwrap(), vec![Value::Bool(false)]);
        assert_eq!(schema.decode(&[9]).unwrap(), vec![Value::Bool(true)]);
    }

    #[test]
    fn test_signed_values() {
        let schema = Schema::parse("<bh").unwrap();
        let record = vec![Value::I8(-5), Value::I16(-300)];
        let payload = schema.encode(&record).unwrap();
        assert_eq!(schema.decode(&payload).unwrap(), record);
    }
}
