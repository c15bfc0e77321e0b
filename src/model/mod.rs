use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackId(String);

impl PackId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolution {
    Tiers(Vec<String>),
    Raw(String),
}

impl Resolution {
    pub fn contains(&self, tier: &str) -> bool {
        match self {
            Resolution::Tiers(tiers) => tiers.iter().any(|t| t == tier),
            Resolution::Raw(_) => false,
        }
    }

    pub fn tiers(&self) -> &[String] {
        match self {
            Resolution::Tiers(tiers) => tiers,
            Resolution::Raw(_) => &[],
        }
    }

    pub fn display(&self) -> String {
        match self {
            Resolution::Tiers(tiers) => tiers.join(", "),
            Resolution::Raw(raw) => raw.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PackType {
    One(String),
    Many(Vec<String>),
}

impl PackType {
    pub fn key(&self) -> String {
        match self {
            PackType::One(value) => value.to_lowercase(),
            PackType::Many(values) => values.join(",").to_lowercase(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Pack {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<PackId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub creators: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_resolution")]
    pub resolution: Option<Resolution>,
    #[serde(default, rename = "type", deserialize_with = "lenient_type")]
    pub pack_type: Option<PackType>,
    #[serde(default, deserialize_with = "strict_true")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub screenshot: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub download: Option<String>,
}

impl Pack {
    // A pack takes part in filtering only with a non-empty name and a
    // creators list.
    pub fn is_listable(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty()) && self.creators.is_some()
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn id_or_empty(&self) -> &str {
        self.id.as_ref().map(PackId::as_str).unwrap_or_default()
    }

    pub fn version_or_empty(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }

    pub fn type_key(&self) -> String {
        self.pack_type.as_ref().map(PackType::key).unwrap_or_default()
    }

    pub fn resolution_display(&self) -> String {
        self.resolution
            .as_ref()
            .map(Resolution::display)
            .unwrap_or_default()
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<PackId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(PackId(s)),
        Value::Number(n) => Some(PackId(n.to_string())),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn strings_of(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => Some(strings_of(values)),
        _ => None,
    })
}

fn lenient_resolution<'de, D>(deserializer: D) -> Result<Option<Resolution>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => Some(Resolution::Tiers(strings_of(values))),
        Value::String(s) => Some(Resolution::Raw(s)),
        _ => None,
    })
}

fn lenient_type<'de, D>(deserializer: D) -> Result<Option<PackType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(PackType::One(s)),
        Value::Array(values) => Some(PackType::Many(strings_of(values))),
        _ => None,
    })
}

fn strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
