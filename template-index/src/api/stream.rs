//! Forward-only decoding of root-wrapped JSON responses.
//!
//! The hosting API wraps every payload in an object with a single
//! property, e.g. `{"repositories": [...]}`. Decoding walks the byte stream
//! once: the property name is checked before any of the payload is read,
//! then the payload is deserialized element by element straight into the
//! target type. No intermediate `serde_json::Value` is built.

use super::ApiError;
use serde::de::value::MapAccessDeserializer;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess,
    Visitor,
};
use std::cell::Cell;
use std::fmt;
use std::io::{BufReader, Read};
use std::marker::PhantomData;

/// Decodes exactly one object wrapped under `root`.
///
/// If the payload is an array, its first object element is returned and
/// the rest of the array is skipped.
///
/// An empty `root` accepts any property name.
///
/// # Errors
///
/// Returns [`ApiError::RootMismatch`] when the wrapping property differs from
/// `root`, [`ApiError::MissingObject`] when no object is reached, and
/// [`ApiError::Parse`] for malformed or truncated JSON.
pub fn decode_one<T, R>(reader: R, root: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    R: Read,
{
    decode(reader, root, OneObject::<T>(PhantomData))?.ok_or_else(|| ApiError::MissingObject {
        root: root.to_string(),
    })
}

/// Decodes every object element of the array wrapped under `root`, in
/// stream order.
///
/// Non-object array elements are skipped. A bare object payload yields a
/// single element and `null` yields none.
///
/// # Errors
///
/// Same as [`decode_one`], except that an empty payload is not an error.
pub fn decode_many<T, R>(reader: R, root: &str) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    R: Read,
{
    decode(reader, root, ManyObjects::<T>(PhantomData))
}

/// Validation failures detected mid-scan.
///
/// Serde only lets a visitor fail with a stringly error, so the precise
/// cause is parked here and turned into a typed [`ApiError`] afterwards.
enum Fault {
    MissingRoot,
    RootMismatch(String),
}

fn decode<P, V, R>(reader: R, root: &str, payload: P) -> Result<V, ApiError>
where
    P: for<'de> DeserializeSeed<'de, Value = V>,
    R: Read,
{
    let fault = Cell::new(None);
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(reader));

    let seed = RootSeed {
        root,
        fault: &fault,
        payload,
    };

    seed.deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value))
        .map_err(|err| match fault.take() {
            Some(Fault::MissingRoot) => ApiError::MissingRoot,
            Some(Fault::RootMismatch(found)) => ApiError::RootMismatch {
                expected: root.to_string(),
                found,
            },
            None => ApiError::Parse(err),
        })
}

/// Reads the wrapping object: checks the first property name, hands its
/// value to `payload`, and skips anything after it.
struct RootSeed<'a, P> {
    root: &'a str,
    fault: &'a Cell<Option<Fault>>,
    payload: P,
}

impl<'de, P> DeserializeSeed<'de> for RootSeed<'_, P>
where
    P: DeserializeSeed<'de>,
{
    type Value = P::Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, P> Visitor<'de> for RootSeed<'_, P>
where
    P: DeserializeSeed<'de>,
{
    type Value = P::Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "an object wrapping '{}'", self.root)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some(found) = map.next_key::<String>()? else {
            self.fault.set(Some(Fault::MissingRoot));
            return Err(de::Error::custom("missing root element"));
        };

        if !self.root.is_empty() && found != self.root {
            let message = format!(
                "expected root element '{}', found '{}'",
                self.root, found
            );
            self.fault.set(Some(Fault::RootMismatch(found)));
            return Err(de::Error::custom(message));
        }

        let value = map.next_value_seed(self.payload)?;
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(value)
    }
}

/// Payload reader for single results.
struct OneObject<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned> DeserializeSeed<'de> for OneObject<T> {
    type Value = Option<T>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, T: DeserializeOwned> Visitor<'de> for OneObject<T> {
    type Value = Option<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object or an array of objects")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map)).map(Some)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(element) = seq.next_element_seed(ObjectOrSkip::<T>(PhantomData))? {
            if let Some(value) = element {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

/// Payload reader for list results.
struct ManyObjects<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned> DeserializeSeed<'de> for ManyObjects<T> {
    type Value = Vec<T>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, T: DeserializeOwned> Visitor<'de> for ManyObjects<T> {
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of objects")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element_seed(ObjectOrSkip::<T>(PhantomData))? {
            values.extend(element);
        }
        Ok(values)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map)).map(|value| vec![value])
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}

/// Array element reader: objects become `Some(T)`, anything else is skipped.
struct ObjectOrSkip<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned> DeserializeSeed<'de> for ObjectOrSkip<T> {
    type Value = Option<T>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, T: DeserializeOwned> Visitor<'de> for ObjectOrSkip<T> {
    type Value = Option<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        T::deserialize(MapAccessDeserializer::new(map)).map(Some)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
        }
    }

    #[test]
    fn decodes_every_array_object_in_order() {
        let body = br#"
            {
              "repositories": [
                {"name": "a", "tags": {"nested": [1, 2, {"deep": true}]}},
                {"name": "b"},
                {"extra": "ignored", "name": "c"}
              ]
            }"#;

        let items: Vec<Item> = decode_many(&body[..], "repositories").unwrap();

        assert_eq!(items, vec![item("a"), item("b"), item("c")]);
    }

    #[test]
    fn skips_non_object_array_elements() {
        let body = br#"{"users": [1, {"name": "a"}, "x", null, [ {"name": "inner"} ], {"name": "b"}]}"#;

        let items: Vec<Item> = decode_many(&body[..], "users").unwrap();

        assert_eq!(items, vec![item("a"), item("b")]);
    }

    #[test]
    fn ignores_properties_after_the_root() {
        let body = br#"{"users": [{"name": "a"}], "meta": {"page": 1, "more": [1, 2]}}"#;

        let items: Vec<Item> = decode_many(&body[..], "users").unwrap();

        assert_eq!(items, vec![item("a")]);
    }

    #[test]
    fn rejects_mismatched_root_element() {
        let body = br#"{"respositories": [{"name": "a"}]}"#;

        let result: Result<Vec<Item>, _> = decode_many(&body[..], "repositories");

        match result {
            Err(ApiError::RootMismatch { expected, found }) => {
                assert_eq!(expected, "repositories");
                assert_eq!(found, "respositories");
            }
            other => panic!("expected root mismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_root_accepts_any_property() {
        let body = br#"{"whatever": {"name": "a"}}"#;

        let value: Item = decode_one(&body[..], "").unwrap();

        assert_eq!(value, item("a"));
    }

    #[test]
    fn decodes_single_object() {
        let body = br#"{"team": {"name": "owners", "id": 7}}"#;

        let value: Item = decode_one(&body[..], "team").unwrap();

        assert_eq!(value, item("owners"));
    }

    #[test]
    fn single_result_takes_first_object_of_array() {
        let body = br#"{"pulls": [42, {"name": "first"}, {"name": "second"}]}"#;

        let value: Item = decode_one(&body[..], "pulls").unwrap();

        assert_eq!(value, item("first"));
    }

    #[test]
    fn single_result_from_empty_array_is_missing_object() {
        let body = br#"{"team": []}"#;

        let result: Result<Item, _> = decode_one(&body[..], "team");

        assert!(matches!(result, Err(ApiError::MissingObject { root }) if root == "team"));
    }

    #[test]
    fn empty_object_has_no_root() {
        let result: Result<Vec<Item>, _> = decode_many(&b"{}"[..], "users");

        assert!(matches!(result, Err(ApiError::MissingRoot)));
    }

    #[test]
    fn truncated_json_is_parse_error() {
        let body = br#"{"users": [{"name": "a"}, {"na"#;

        let result: Result<Vec<Item>, _> = decode_many(&body[..], "users");

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn wrong_element_shape_is_parse_error() {
        let body = br#"{"users": [{"name": 5}]}"#;

        let result: Result<Vec<Item>, _> = decode_many(&body[..], "users");

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn bare_object_payload_is_a_one_element_list() {
        let body = br#"{"users": {"name": "solo"}}"#;

        let items: Vec<Item> = decode_many(&body[..], "users").unwrap();

        assert_eq!(items, vec![item("solo")]);
    }
}
