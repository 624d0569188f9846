//! Rebuilds a record from its field slots.
//!
//! Text slots are parsed according to what the field asks for, so each
//! integer width checks its own range and a float field gets a float parse.

// Imports
use std::slice;
use std::str::FromStr;

// third-party imports
use serde::de::{
    self, value::StrDeserializer, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess,
    Visitor,
};
use serde::forward_to_deserialize_any;
// internal imports
use super::fields::{ProjectionError, Slot};
use super::parse_bool;
use crate::preftypes::FieldKind;

pub(super) fn rebuild<T: DeserializeOwned>(fields: &[(String, Slot)]) -> Result<T, ProjectionError> {
    T::deserialize(RecordRebuild { fields })
}

struct RecordRebuild<'a> {
    fields: &'a [(String, Slot)],
}

impl<'de, 'a> de::Deserializer<'de> for RecordRebuild<'a> {
    type Error = ProjectionError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ProjectionError> {
        visitor.visit_map(FieldAccess {
            fields: self.fields.iter(),
            value: None,
        })
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ProjectionError> {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct FieldAccess<'a> {
    fields: slice::Iter<'a, (String, Slot)>,
    value: Option<&'a Slot>,
}

impl<'de, 'a> MapAccess<'de> for FieldAccess<'a> {
    type Error = ProjectionError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, ProjectionError> {
        let Some((key, slot)) = self.fields.next() else {
            return Ok(None);
        };
        self.value = Some(slot);
        let key: StrDeserializer<'_, ProjectionError> = key.as_str().into_deserializer();
        seed.deserialize(key).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, ProjectionError> {
        match self.value.take() {
            Some(Slot::Text(text)) => seed.deserialize(TextValue(text)),
            Some(Slot::Other { value, .. }) => seed
                .deserialize(value.clone())
                .map_err(|err| ProjectionError::Custom(err.to_string())),
            None => Err(ProjectionError::Custom(
                "field value requested before its name".to_string(),
            )),
        }
    }
}

/// The text of one pair, parsed on demand.
struct TextValue<'a>(&'a str);

impl<'a> TextValue<'a> {
    fn parse<N: FromStr>(&self, kind: FieldKind) -> Result<N, ProjectionError> {
        self.0.parse().map_err(|_| ProjectionError::Expected(kind))
    }
}

macro_rules! parse_number {
    ($($method:ident => $visit:ident as $kind:expr;)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ProjectionError> {
                visitor.$visit(self.parse($kind)?)
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for TextValue<'a> {
    type Error = ProjectionError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ProjectionError> {
        visitor.visit_str(self.0)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ProjectionError> {
        match parse_bool(self.0) {
            Some(value) => visitor.visit_bool(value),
            None => Err(ProjectionError::Expected(FieldKind::Bool)),
        }
    }

    // Base-10 only; a value outside the field's range is not an int for it.
    parse_number! {
        deserialize_i8 => visit_i8 as FieldKind::Int;
        deserialize_i16 => visit_i16 as FieldKind::Int;
        deserialize_i32 => visit_i32 as FieldKind::Int;
        deserialize_i64 => visit_i64 as FieldKind::Int;
        deserialize_i128 => visit_i128 as FieldKind::Int;
        deserialize_u8 => visit_u8 as FieldKind::Int;
        deserialize_u16 => visit_u16 as FieldKind::Int;
        deserialize_u32 => visit_u32 as FieldKind::Int;
        deserialize_u64 => visit_u64 as FieldKind::Int;
        deserialize_u128 => visit_u128 as FieldKind::Int;
        deserialize_f32 => visit_f32 as FieldKind::Float;
        deserialize_f64 => visit_f64 as FieldKind::Float;
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ProjectionError> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ProjectionError> {
        visitor.visit_newtype_struct(self)
    }

    // Fieldless variants, by name.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ProjectionError> {
        let variant: StrDeserializer<'_, ProjectionError> = self.0.into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
