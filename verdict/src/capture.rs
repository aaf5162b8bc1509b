//! Typed capture of `Serialize` values.
//!
//! A [`Captured`] keeps what a JSON value would lose: the numeric kind of
//! every scalar, `Option` wrapping, and the names of structs, newtypes and
//! enum variants. Equality on captured values is therefore type sensitive:
//! `1u8` differs from `1i64`, and `Some(1)` differs from `1`.
//!
//! Fixed arrays, slices, vectors, sets and anonymous tuples all serialize as
//! plain sequences and compare by their elements.

use std::fmt::{self, Display, Write as _};

use serde::ser::{self, Serialize};

/// A value captured through [`Capture`].
#[derive(Debug, Clone, PartialEq)]
pub enum Captured {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Unit,
    None,
    Some(Box<Captured>),
    Seq(Vec<Captured>),
    Map(Vec<(Captured, Captured)>),
    UnitStruct(&'static str),
    NewtypeStruct(&'static str, Box<Captured>),
    TupleStruct(&'static str, Vec<Captured>),
    Struct(&'static str, Vec<(&'static str, Captured)>),
    UnitVariant(&'static str, &'static str),
    NewtypeVariant(&'static str, &'static str, Box<Captured>),
    TupleVariant(&'static str, &'static str, Vec<Captured>),
    StructVariant(&'static str, &'static str, Vec<(&'static str, Captured)>),
}

impl Captured {
    /// Capture `value`, failing only when its `Serialize` impl reports an error.
    pub fn of<T>(value: &T) -> Result<Self, CaptureError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(Capture)
    }
}

fn write_list<'a, I>(f: &mut fmt::Formatter<'_>, open: &str, items: I, close: &str) -> fmt::Result
where
    I: IntoIterator<Item = &'a Captured>,
{
    f.write_str(open)?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[(&'static str, Captured)]) -> fmt::Result {
    f.write_char('{')?;
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{key}:{value}")?;
    }
    f.write_char('}')
}

/// Compact representation: `"hello"`, `[1,2,3]`, `Some(1)`, `Point{x:1,y:2}`.
impl Display for Captured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::I128(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::U128(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v:?}"),
            Self::F64(v) => write!(f, "{v:?}"),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::Str(v) => match serde_json::to_string(v) {
                Ok(quoted) => f.write_str(&quoted),
                Err(_) => write!(f, "{v:?}"),
            },
            Self::Unit => f.write_str("()"),
            Self::None => f.write_str("None"),
            Self::Some(v) => write!(f, "Some({v})"),
            Self::Seq(items) => write_list(f, "[", items, "]"),
            Self::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_char('}')
            }
            Self::UnitStruct(name) => f.write_str(name),
            Self::NewtypeStruct(name, v) => write!(f, "{name}({v})"),
            Self::TupleStruct(name, items) => {
                f.write_str(name)?;
                write_list(f, "(", items, ")")
            }
            Self::Struct(name, fields) => {
                f.write_str(name)?;
                write_fields(f, fields)
            }
            Self::UnitVariant(name, variant) => write!(f, "{name}::{variant}"),
            Self::NewtypeVariant(name, variant, v) => write!(f, "{name}::{variant}({v})"),
            Self::TupleVariant(name, variant, items) => {
                write!(f, "{name}::{variant}")?;
                write_list(f, "(", items, ")")
            }
            Self::StructVariant(name, variant, fields) => {
                write!(f, "{name}::{variant}")?;
                write_fields(f, fields)
            }
        }
    }
}

/// Error reported by a value's own `Serialize` impl.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CaptureError(String);

impl ser::Error for CaptureError {
    fn custom<T: Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// Serializer producing a [`Captured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Capture;

type CaptureResult = Result<Captured, CaptureError>;

impl ser::Serializer for Capture {
    type Ok = Captured;
    type Error = CaptureError;
    type SerializeSeq = SeqCapture;
    type SerializeTuple = SeqCapture;
    type SerializeTupleStruct = TupleStructCapture;
    type SerializeTupleVariant = TupleVariantCapture;
    type SerializeMap = MapCapture;
    type SerializeStruct = StructCapture;
    type SerializeStructVariant = StructVariantCapture;

    fn serialize_bool(self, v: bool) -> CaptureResult {
        Ok(Captured::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> CaptureResult {
        Ok(Captured::I8(v))
    }

    fn serialize_i16(self, v: i16) -> CaptureResult {
        Ok(Captured::I16(v))
    }

    fn serialize_i32(self, v: i32) -> CaptureResult {
        Ok(Captured::I32(v))
    }

    fn serialize_i64(self, v: i64) -> CaptureResult {
        Ok(Captured::I64(v))
    }

    fn serialize_i128(self, v: i128) -> CaptureResult {
        Ok(Captured::I128(v))
    }

    fn serialize_u8(self, v: u8) -> CaptureResult {
        Ok(Captured::U8(v))
    }

    fn serialize_u16(self, v: u16) -> CaptureResult {
        Ok(Captured::U16(v))
    }

    fn serialize_u32(self, v: u32) -> CaptureResult {
        Ok(Captured::U32(v))
    }

    fn serialize_u64(self, v: u64) -> CaptureResult {
        Ok(Captured::U64(v))
    }

    fn serialize_u128(self, v: u128) -> CaptureResult {
        Ok(Captured::U128(v))
    }

    fn serialize_f32(self, v: f32) -> CaptureResult {
        Ok(Captured::F32(v))
    }

    fn serialize_f64(self, v: f64) -> CaptureResult {
        Ok(Captured::F64(v))
    }

    fn serialize_char(self, v: char) -> CaptureResult {
        Ok(Captured::Char(v))
    }

    fn serialize_str(self, v: &str) -> CaptureResult {
        Ok(Captured::Str(v.to_string()))
    }

    // Byte buffers compare equal to the same bytes held in a `Vec<u8>`.
    fn serialize_bytes(self, v: &[u8]) -> CaptureResult {
        Ok(Captured::Seq(v.iter().copied().map(Captured::U8).collect()))
    }

    fn serialize_none(self) -> CaptureResult {
        Ok(Captured::None)
    }

    fn serialize_some<T>(self, value: &T) -> CaptureResult
    where
        T: ?Sized + Serialize,
    {
        Ok(Captured::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> CaptureResult {
        Ok(Captured::Unit)
    }

    fn serialize_unit_struct(self, name: &'static str) -> CaptureResult {
        Ok(Captured::UnitStruct(name))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> CaptureResult {
        Ok(Captured::UnitVariant(name, variant))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> CaptureResult
    where
        T: ?Sized + Serialize,
    {
        Ok(Captured::NewtypeStruct(name, Box::new(value.serialize(self)?)))
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> CaptureResult
    where
        T: ?Sized + Serialize,
    {
        Ok(Captured::NewtypeVariant(
            name,
            variant,
            Box::new(value.serialize(self)?),
        ))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCapture, CaptureError> {
        Ok(SeqCapture {
            items: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCapture, CaptureError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<TupleStructCapture, CaptureError> {
        Ok(TupleStructCapture {
            name,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantCapture, CaptureError> {
        Ok(TupleVariantCapture {
            name,
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapCapture, CaptureError> {
        Ok(MapCapture {
            entries: Vec::with_capacity(len.unwrap_or_default()),
            key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<StructCapture, CaptureError> {
        Ok(StructCapture {
            name,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructVariantCapture, CaptureError> {
        Ok(StructVariantCapture {
            name,
            variant,
            fields: Vec::with_capacity(len),
        })
    }
}

pub struct SeqCapture {
    items: Vec<Captured>,
}

impl ser::SerializeSeq for SeqCapture {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(Capture)?);
        Ok(())
    }

    fn end(self) -> CaptureResult {
        Ok(Captured::Seq(self.items))
    }
}

impl ser::SerializeTuple for SeqCapture {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> CaptureResult {
        ser::SerializeSeq::end(self)
    }
}

pub struct TupleStructCapture {
    name: &'static str,
    items: Vec<Captured>,
}

impl ser::SerializeTupleStruct for TupleStructCapture {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(Capture)?);
        Ok(())
    }

    fn end(self) -> CaptureResult {
        Ok(Captured::TupleStruct(self.name, self.items))
    }
}

pub struct TupleVariantCapture {
    name: &'static str,
    variant: &'static str,
    items: Vec<Captured>,
}

impl ser::SerializeTupleVariant for TupleVariantCapture {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(Capture)?);
        Ok(())
    }

    fn end(self) -> CaptureResult {
        Ok(Captured::TupleVariant(self.name, self.variant, self.items))
    }
}

pub struct MapCapture {
    entries: Vec<(Captured, Captured)>,
    key: Option<Captured>,
}

impl ser::SerializeMap for MapCapture {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key.serialize(Capture)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| <CaptureError as ser::Error>::custom("map value without a key"))?;
        self.entries.push((key, value.serialize(Capture)?));
        Ok(())
    }

    fn end(self) -> CaptureResult {
        Ok(Captured::Map(self.entries))
    }
}

pub struct StructCapture {
    name: &'static str,
    fields: Vec<(&'static str, Captured)>,
}

impl ser::SerializeStruct for StructCapture {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push((key, value.serialize(Capture)?));
        Ok(())
    }

    fn end(self) -> CaptureResult {
        Ok(Captured::Struct(self.name, self.fields))
    }
}

pub struct StructVariantCapture {
    name: &'static str,
    variant: &'static str,
    fields: Vec<(&'static str, Captured)>,
}

impl ser::SerializeStructVariant for StructVariantCapture {
    type Ok = Captured;
    type Error = CaptureError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), CaptureError>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push((key, value.serialize(Capture)?));
        Ok(())
    }

    fn end(self) -> CaptureResult {
        Ok(Captured::StructVariant(self.name, self.variant, self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    enum Event {
        Start,
        Moved { to: Point },
        Code(u16),
    }

    fn repr<T: Serialize + ?Sized>(value: &T) -> String {
        Captured::of(value).unwrap().to_string()
    }

    #[test]
    fn test_numeric_kinds_are_kept() {
        assert_eq!(Captured::of(&1u8).unwrap(), Captured::U8(1));
        assert_ne!(Captured::of(&1u8).unwrap(), Captured::of(&1i64).unwrap());
        assert_ne!(Captured::of(&1.0f32).unwrap(), Captured::of(&1.0f64).unwrap());
    }

    #[test]
    fn test_option_wrapping_is_kept() {
        assert_ne!(Captured::of(&Some(1)).unwrap(), Captured::of(&1).unwrap());
        assert_eq!(
            Captured::of(&Some(1)).unwrap(),
            Captured::Some(Box::new(Captured::I32(1)))
        );
        assert_eq!(Captured::of(&None::<f64>).unwrap(), Captured::None);
    }

    #[test]
    fn test_nan_is_not_none() {
        let nan = Captured::of(&f64::NAN).unwrap();
        assert_ne!(nan, Captured::None);
        assert_eq!(nan.to_string(), "NaN");
    }

    #[test]
    fn test_bytes_and_byte_vectors_agree() {
        struct Raw<'a>(&'a [u8]);
        impl Serialize for Raw<'_> {
            fn serialize<S: ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_bytes(self.0)
            }
        }
        assert_eq!(
            Captured::of(&Raw(b"hi")).unwrap(),
            Captured::of(&b"hi".to_vec()).unwrap()
        );
    }

    #[test]
    fn test_repr() {
        assert_eq!(repr("hello"), "\"hello\"");
        assert_eq!(repr(&[1, 2, 3]), "[1,2,3]");
        assert_eq!(repr(&(1, "two")), "[1,\"two\"]");
        assert_eq!(repr(&Some(1.5)), "Some(1.5)");
        assert_eq!(repr(&None::<u8>), "None");
        assert_eq!(repr(&'x'), "'x'");
        assert_eq!(repr(&()), "()");
        assert_eq!(repr(&Point { x: 1, y: 2 }), "Point{x:1,y:2}");
        assert_eq!(repr(&Meters(2.0)), "Meters(2.0)");
        assert_eq!(repr(&Event::Start), "Event::Start");
        assert_eq!(repr(&Event::Code(404)), "Event::Code(404)");
        assert_eq!(
            repr(&Event::Moved { to: Point { x: 0, y: 1 } }),
            "Event::Moved{to:Point{x:0,y:1}}"
        );
        assert_eq!(repr(&BTreeMap::from([(1, "a")])), "{1:\"a\"}");
    }

    #[test]
    fn test_serialize_errors_surface() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: ser::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(ser::Error::custom("cannot serialize Broken"))
            }
        }
        let err = Captured::of(&[Broken]).unwrap_err();
        assert_eq!(err.to_string(), "cannot serialize Broken");
    }
}
