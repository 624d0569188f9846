//! Flattens a record into named field slots.
//!
//! Primitive fields are turned straight into the text that gets written, so
//! no field ever passes through an intermediate number type. Anything else
//! is kept as a JSON value, only so the record can be rebuilt later.

// Imports
use std::fmt::Display;

// third-party imports
use serde::de;
use serde::ser::{self, Impossible, Serialize, SerializeMap, SerializeStruct};
use serde_json::Value;
use thiserror::Error;
// internal imports
use crate::constants::{FALSE_TEXT, TRUE_TEXT};
use crate::preftypes::FieldKind;

/// Why a record, or one of its fields, could not be mapped.
#[derive(Debug, Error)]
pub(super) enum ProjectionError {
    #[error("The type '{0}' is not supported")]
    Unsupported(&'static str),
    #[error("Expected {0} value")]
    Expected(FieldKind),
    #[error("{0}")]
    Custom(String),
}
impl ser::Error for ProjectionError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}
impl de::Error for ProjectionError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Slot {
    /// A primitive, in its written form.
    Text(String),
    /// Never written; `found` names what the field holds instead.
    Other { found: &'static str, value: Value },
}

/// Fields in declaration order.
pub(super) type Snapshot = Vec<(String, Slot)>;

/// Fails for anything that does not serialize as a struct or a map.
pub(super) fn snapshot<T: Serialize + ?Sized>(record: &T) -> Result<Snapshot, ProjectionError> {
    record.serialize(RecordSnapshot)
}

fn slot_of<T: Serialize + ?Sized>(value: &T) -> Slot {
    match value.serialize(PrimitiveText) {
        Ok(text) => Slot::Text(text),
        Err(err) => Slot::Other {
            found: match err {
                ProjectionError::Unsupported(found) => found,
                _ => "value",
            },
            value: serde_json::to_value(value).unwrap_or(Value::Null),
        },
    }
}

/// Methods that can only fail, naming what was found.
macro_rules! unsupported {
    ($($method:ident($($arg:ty),*) => $found:literal;)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Self::Ok, Self::Error> {
                Err(ProjectionError::Unsupported($found))
            }
        )*
    };
}

/// Accepts structs and maps, and newtypes around them.
struct RecordSnapshot;

impl ser::Serializer for RecordSnapshot {
    type Ok = Snapshot;
    type Error = ProjectionError;
    type SerializeSeq = Impossible<Snapshot, ProjectionError>;
    type SerializeTuple = Impossible<Snapshot, ProjectionError>;
    type SerializeTupleStruct = Impossible<Snapshot, ProjectionError>;
    type SerializeTupleVariant = Impossible<Snapshot, ProjectionError>;
    type SerializeMap = SnapshotFields;
    type SerializeStruct = SnapshotFields;
    type SerializeStructVariant = Impossible<Snapshot, ProjectionError>;

    unsupported! {
        serialize_bool(bool) => "bool";
        serialize_i8(i8) => "int";
        serialize_i16(i16) => "int";
        serialize_i32(i32) => "int";
        serialize_i64(i64) => "int";
        serialize_u8(u8) => "int";
        serialize_u16(u16) => "int";
        serialize_u32(u32) => "int";
        serialize_u64(u64) => "int";
        serialize_f32(f32) => "float";
        serialize_f64(f64) => "float";
        serialize_char(char) => "char";
        serialize_str(&str) => "text";
        serialize_bytes(&[u8]) => "bytes";
        serialize_none() => "null";
        serialize_unit() => "unit";
        serialize_unit_struct(&'static str) => "unit";
        serialize_unit_variant(&'static str, u32, &'static str) => "enum";
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<Snapshot, ProjectionError> {
        Err(ProjectionError::Unsupported("option"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Snapshot, ProjectionError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Snapshot, ProjectionError> {
        Err(ProjectionError::Unsupported("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ProjectionError> {
        Err(ProjectionError::Unsupported("array"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ProjectionError> {
        Err(ProjectionError::Unsupported("array"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ProjectionError> {
        Err(ProjectionError::Unsupported("array"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ProjectionError> {
        Err(ProjectionError::Unsupported("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SnapshotFields, ProjectionError> {
        Ok(SnapshotFields::default())
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SnapshotFields, ProjectionError> {
        Ok(SnapshotFields {
            fields: Vec::with_capacity(len),
            key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ProjectionError> {
        Err(ProjectionError::Unsupported("enum"))
    }
}

#[derive(Default)]
struct SnapshotFields {
    fields: Snapshot,
    // Map entries arrive as a key call followed by a value call.
    key: Option<String>,
}

impl SerializeStruct for SnapshotFields {
    type Ok = Snapshot;
    type Error = ProjectionError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ProjectionError> {
        self.fields.push((key.to_string(), slot_of(value)));
        Ok(())
    }

    fn end(self) -> Result<Snapshot, ProjectionError> {
        Ok(self.fields)
    }
}

impl SerializeMap for SnapshotFields {
    type Ok = Snapshot;
    type Error = ProjectionError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ProjectionError> {
        self.key = Some(key.serialize(PrimitiveText)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ProjectionError> {
        let key = self
            .key
            .take()
            .ok_or_else(|| ProjectionError::Custom("map value without a key".to_string()))?;
        self.fields.push((key, slot_of(value)));
        Ok(())
    }

    fn end(self) -> Result<Snapshot, ProjectionError> {
        Ok(self.fields)
    }
}

/// Renders a single primitive the way it is written to a document.
///
/// Floats use the shortest text that parses back to the same value, in
/// their own width: `0.1_f32` is `0.1`, `4.0` keeps its point, and
/// non-finite values come out as `NaN`, `inf` and `-inf`.
struct PrimitiveText;

impl ser::Serializer for PrimitiveText {
    type Ok = String;
    type Error = ProjectionError;
    type SerializeSeq = Impossible<String, ProjectionError>;
    type SerializeTuple = Impossible<String, ProjectionError>;
    type SerializeTupleStruct = Impossible<String, ProjectionError>;
    type SerializeTupleVariant = Impossible<String, ProjectionError>;
    type SerializeMap = Impossible<String, ProjectionError>;
    type SerializeStruct = Impossible<String, ProjectionError>;
    type SerializeStructVariant = Impossible<String, ProjectionError>;

    fn serialize_bool(self, v: bool) -> Result<String, ProjectionError> {
        Ok(if v { TRUE_TEXT } else { FALSE_TEXT }.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String, ProjectionError> {
        Ok(format!("{:?}", v))
    }

    fn serialize_f64(self, v: f64) -> Result<String, ProjectionError> {
        Ok(format!("{:?}", v))
    }

    fn serialize_char(self, v: char) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, ProjectionError> {
        Ok(v.to_string())
    }

    unsupported! {
        serialize_bytes(&[u8]) => "bytes";
        serialize_none() => "null";
        serialize_unit() => "unit";
        serialize_unit_struct(&'static str) => "unit";
    }

    // Fieldless enum variants are written by name.
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<String, ProjectionError> {
        Ok(variant.to_string())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String, ProjectionError> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, ProjectionError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, ProjectionError> {
        Err(ProjectionError::Unsupported("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ProjectionError> {
        Err(ProjectionError::Unsupported("array"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ProjectionError> {
        Err(ProjectionError::Unsupported("array"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ProjectionError> {
        Err(ProjectionError::Unsupported("array"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ProjectionError> {
        Err(ProjectionError::Unsupported("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, ProjectionError> {
        Err(ProjectionError::Unsupported("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, ProjectionError> {
        Err(ProjectionError::Unsupported("map"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ProjectionError> {
        Err(ProjectionError::Unsupported("enum"))
    }
}
