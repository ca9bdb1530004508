//! Calendar dates as `YYYY-MM-DD`.

pub mod option;

use serde::{Deserialize, Deserializer, Serializer};
use time::{Date, macros::format_description};

pub fn serialize<S>(value: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&format(*value).map_err(serde::ser::Error::custom)?)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse(&raw).map_err(serde::de::Error::custom)
}

pub fn format(value: Date) -> Result<String, time::error::Format> {
	value.format(format_description!("[year]-[month]-[day]"))
}

pub fn parse(raw: &str) -> Result<Date, time::error::Parse> {
	Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
}
