//! Purpose: Decode JSON:API documents into flat, fully optional resource structs.
//! Exports: `Resource`, `Relationships`, `Document`, `decode`, `decode_list`, `decode_document`,
//!          `decode_list_document`, `decode_value`.
//! Role: The only place response bodies are interpreted; services never touch raw JSON.
//! Invariants: Decoding is all-or-nothing; a malformed body yields `ErrorKind::Decode`.
//! Invariants: `attributes` entries overlay the top-level fields; a null entry counts as absent.
//! Invariants: Relationship fields are filled from `relationships.<name>.data` only.
//! Invariants: A present `type` must match the resource discriminator.
use super::error::{Error, ErrorKind};
use super::links::PageLinks;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

type ApiResult<T> = Result<T, Error>;

/// A platform entity that can be decoded from a JSON:API resource object.
///
/// Attribute fields are plain serde fields; relationship-derived fields should be
/// `#[serde(skip_deserializing)]` and filled in [`Resource::relate`].
pub trait Resource: DeserializeOwned {
    /// Resource discriminator as it appears in the `type` member.
    const TYPE: &'static str;

    fn accepts_type(kind: &str) -> bool {
        kind == Self::TYPE
    }

    fn relate(&mut self, _relationships: &mut Relationships) -> ApiResult<()> {
        Ok(())
    }
}

/// The `relationships` member of one resource object, consumed by name.
#[derive(Debug, Default)]
pub struct Relationships {
    members: Map<String, Value>,
}

impl Relationships {
    pub fn new(members: Map<String, Value>) -> Self {
        Self { members }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// To-many relationship. `data: []` yields `Some(vec![])`; a missing member or null data yields `None`.
    pub fn many<T: Resource>(&mut self, name: &str) -> ApiResult<Option<Vec<T>>> {
        let Some(data) = self.take_data(name)? else {
            return Ok(None);
        };
        match data {
            Value::Array(items) => items
                .into_iter()
                .map(|item| decode_resource_value(item).map_err(|err| in_relationship(err, name)))
                .collect::<ApiResult<Vec<T>>>()
                .map(Some),
            Value::Object(object) => decode_resource(object)
                .map(|item| Some(vec![item]))
                .map_err(|err| in_relationship(err, name)),
            other => Err(Error::new(ErrorKind::Decode).with_message(format!(
                "relationship {name:?} data must be a list, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// To-one relationship. A missing member or null data yields `None`.
    pub fn one<T: Resource>(&mut self, name: &str) -> ApiResult<Option<T>> {
        let Some(data) = self.take_data(name)? else {
            return Ok(None);
        };
        match data {
            Value::Object(object) => decode_resource(object)
                .map(Some)
                .map_err(|err| in_relationship(err, name)),
            other => Err(Error::new(ErrorKind::Decode).with_message(format!(
                "relationship {name:?} data must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// To-one relationship whose target may be one of several resource types; other types yield `None`.
    pub fn one_if_type<T: Resource>(&mut self, name: &str) -> ApiResult<Option<T>> {
        let accepted = match self.members.get(name).and_then(|member| member.get("data")) {
            Some(Value::Object(data)) => match data.get("type") {
                Some(Value::String(kind)) => T::accepts_type(kind),
                _ => true,
            },
            _ => true,
        };
        if !accepted {
            self.members.remove(name);
            return Ok(None);
        }
        self.one(name)
    }

    fn take_data(&mut self, name: &str) -> ApiResult<Option<Value>> {
        match self.members.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(mut member)) => match member.remove("data") {
                None | Some(Value::Null) => Ok(None),
                Some(data) => Ok(Some(data)),
            },
            Some(other) => Err(Error::new(ErrorKind::Decode).with_message(format!(
                "relationship {name:?} must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

/// A decoded top-level document: primary data plus the listing links, when present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document<T> {
    pub data: T,
    pub links: PageLinks,
}

pub fn decode<T: Resource>(bytes: &[u8]) -> ApiResult<T> {
    decode_document(bytes).map(|document| document.data)
}

pub fn decode_list<T: Resource>(bytes: &[u8]) -> ApiResult<Vec<T>> {
    decode_list_document(bytes).map(|document| document.data)
}

pub fn decode_document<T: Resource>(bytes: &[u8]) -> ApiResult<Document<T>> {
    let value = parse(bytes)?;
    let (data, links) = split_document(value)?;
    Ok(Document {
        data: decode_resource_value(data)?,
        links,
    })
}

pub fn decode_list_document<T: Resource>(bytes: &[u8]) -> ApiResult<Document<Vec<T>>> {
    let value = parse(bytes)?;
    let (data, links) = split_document(value)?;
    let items = match data {
        Value::Array(items) => items,
        other => {
            return Err(Error::new(ErrorKind::Decode).with_message(format!(
                "expected a list of {} resources, found {}",
                T::TYPE,
                json_kind(&other)
            )));
        }
    };
    let data = items
        .into_iter()
        .map(decode_resource_value)
        .collect::<ApiResult<Vec<T>>>()?;
    Ok(Document { data, links })
}

/// Decode an already parsed document or resource object.
pub fn decode_value<T: Resource>(value: Value) -> ApiResult<T> {
    let (data, _links) = split_document(value)?;
    decode_resource_value(data)
}

fn parse(bytes: &[u8]) -> ApiResult<Value> {
    serde_json::from_slice(bytes).map_err(|err| Error::decode("invalid response json", err))
}

// A document wraps its primary data in `data`; a bare resource object or array is its own data.
fn split_document(value: Value) -> ApiResult<(Value, PageLinks)> {
    let mut object = match value {
        Value::Object(object) if object.contains_key("data") => object,
        other => return Ok((other, PageLinks::default())),
    };
    let data = object.remove("data").unwrap_or(Value::Null);
    if data.is_null() {
        return Err(Error::new(ErrorKind::Decode).with_message("document data is null"));
    }
    let links = match object.remove("links") {
        None | Some(Value::Null) => PageLinks::default(),
        Some(links) => serde_json::from_value(links)
            .map_err(|err| Error::decode("invalid document links", err))?,
    };
    Ok((data, links))
}

fn decode_resource_value<T: Resource>(value: Value) -> ApiResult<T> {
    match value {
        Value::Object(object) => decode_resource(object),
        other => Err(Error::new(ErrorKind::Decode).with_message(format!(
            "expected a {} resource object, found {}",
            T::TYPE,
            json_kind(&other)
        ))),
    }
}

fn decode_resource<T: Resource>(mut object: Map<String, Value>) -> ApiResult<T> {
    let attributes = object.remove("attributes");
    let relationships = object.remove("relationships");

    match attributes {
        None | Some(Value::Null) => {}
        Some(Value::Object(attributes)) => {
            for (name, value) in attributes {
                if !value.is_null() {
                    object.insert(name, value);
                }
            }
        }
        Some(other) => {
            return Err(Error::new(ErrorKind::Decode).with_message(format!(
                "{} attributes must be an object, found {}",
                T::TYPE,
                json_kind(&other)
            )));
        }
    }

    if let Some(Value::String(kind)) = object.get("type") {
        if !T::accepts_type(kind) {
            return Err(Error::new(ErrorKind::Decode).with_message(format!(
                "expected resource type {:?}, found {kind:?}",
                T::TYPE
            )));
        }
    }

    let mut relationships = match relationships {
        None | Some(Value::Null) => Relationships::default(),
        Some(Value::Object(members)) => Relationships::new(members),
        Some(other) => {
            return Err(Error::new(ErrorKind::Decode).with_message(format!(
                "{} relationships must be an object, found {}",
                T::TYPE,
                json_kind(&other)
            )));
        }
    };

    let mut resource: T = serde_json::from_value(Value::Object(object))
        .map_err(|err| Error::decode(format!("invalid {} resource", T::TYPE), err))?;
    resource.relate(&mut relationships)?;
    Ok(resource)
}

fn in_relationship(err: Error, name: &str) -> Error {
    let message = match err.message() {
        Some(message) => format!("relationship {name:?}: {message}"),
        None => format!("relationship {name:?}"),
    };
    err.with_message(message)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
