//! Test-only entities and interval text parsing.

use crate::{
    model::{
        entity::EntityModel,
        field::{EntityFieldKind, EntityFieldModel},
    },
    traits::Entity,
    types::{Date, Timestamp},
    value::Value,
};

/// Build a runtime field model for test entities.
#[must_use]
pub const fn field(name: &'static str, kind: EntityFieldKind, nullable: bool) -> EntityFieldModel {
    EntityFieldModel {
        name,
        kind,
        nullable,
    }
}

///
/// IntInterval
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IntInterval {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

static INT_INTERVAL_FIELDS: [EntityFieldModel; 2] = [
    field("from", EntityFieldKind::Int, true),
    field("to", EntityFieldKind::Int, true),
];

static INT_INTERVAL_MODEL: EntityModel = EntityModel {
    path: "test_support::IntInterval",
    entity_name: "IntInterval",
    fields: &INT_INTERVAL_FIELDS,
};

impl Entity for IntInterval {
    const MODEL: &'static EntityModel = &INT_INTERVAL_MODEL;

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "from" => Some(self.from.into()),
            "to" => Some(self.to.into()),
            _ => None,
        }
    }
}

///
/// DateInterval
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DateInterval {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

static DATE_INTERVAL_FIELDS: [EntityFieldModel; 2] = [
    field("from", EntityFieldKind::Date, true),
    field("to", EntityFieldKind::Date, true),
];

static DATE_INTERVAL_MODEL: EntityModel = EntityModel {
    path: "test_support::DateInterval",
    entity_name: "DateInterval",
    fields: &DATE_INTERVAL_FIELDS,
};

impl Entity for DateInterval {
    const MODEL: &'static EntityModel = &DATE_INTERVAL_MODEL;

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "from" => Some(self.from.into()),
            "to" => Some(self.to.into()),
            _ => None,
        }
    }
}

///
/// TimestampInterval
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TimestampInterval {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

static TIMESTAMP_INTERVAL_FIELDS: [EntityFieldModel; 2] = [
    field("from", EntityFieldKind::Timestamp, true),
    field("to", EntityFieldKind::Timestamp, true),
];

static TIMESTAMP_INTERVAL_MODEL: EntityModel = EntityModel {
    path: "test_support::TimestampInterval",
    entity_name: "TimestampInterval",
    fields: &TIMESTAMP_INTERVAL_FIELDS,
};

impl Entity for TimestampInterval {
    const MODEL: &'static EntityModel = &TIMESTAMP_INTERVAL_MODEL;

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "from" => Some(self.from.into()),
            "to" => Some(self.to.into()),
            _ => None,
        }
    }
}

///
/// Post
/// blog post with a required creation and publish instant
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub created: Timestamp,
    pub publish: Timestamp,
}

static POST_FIELDS: [EntityFieldModel; 4] = [
    field("id", EntityFieldKind::Uint, false),
    field("title", EntityFieldKind::Text, false),
    field("created", EntityFieldKind::Timestamp, false),
    field("publish", EntityFieldKind::Timestamp, false),
];

pub static POST_MODEL: EntityModel = EntityModel {
    path: "test_support::Post",
    entity_name: "Post",
    fields: &POST_FIELDS,
};

impl Entity for Post {
    const MODEL: &'static EntityModel = &POST_MODEL;

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "title" => Some(self.title.as_str().into()),
            "created" => Some(self.created.into()),
            "publish" => Some(self.publish.into()),
            _ => None,
        }
    }
}

///
/// Parse `"[a -> b]"` interval text.
///
/// Either side may be blank for an absent bound, and the closing bracket is
/// optional (`"[a -> "`). Several intervals may be separated by commas.
///
pub fn parse_intervals<T>(
    text: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Vec<(Option<T>, Option<T>)> {
    text.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let inner = part.trim_matches(|c: char| c == ' ' || c == '[' || c == ']');
            let (from, to) = inner.split_once("->").unwrap_or((inner, ""));

            (parse_side(from, &parse), parse_side(to, &parse))
        })
        .collect()
}

fn parse_side<T>(side: &str, parse: &impl Fn(&str) -> Option<T>) -> Option<T> {
    let side = side.trim();
    if side.is_empty() {
        None
    } else {
        Some(parse(side).unwrap_or_else(|| panic!("unparseable interval bound '{side}'")))
    }
}

#[must_use]
pub fn int_intervals(text: &str) -> Vec<IntInterval> {
    parse_intervals(text, |s| s.parse().ok())
        .into_iter()
        .map(|(from, to)| IntInterval { from, to })
        .collect()
}

#[must_use]
pub fn date_intervals(text: &str) -> Vec<DateInterval> {
    parse_intervals(text, Date::parse)
        .into_iter()
        .map(|(from, to)| DateInterval { from, to })
        .collect()
}

#[must_use]
pub fn timestamp_intervals(text: &str) -> Vec<TimestampInterval> {
    parse_intervals(text, |s| Timestamp::parse_flexible(s).ok())
        .into_iter()
        .map(|(from, to)| TimestampInterval { from, to })
        .collect()
}

/// Date literal for tests.
#[must_use]
pub fn date(s: &str) -> Date {
    Date::parse(s).unwrap_or_else(|| panic!("bad test date '{s}'"))
}

/// Timestamp literal for tests (`"2018-07-15 00:00:00 +00:00"` or RFC 3339).
#[must_use]
pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse_flexible(s).unwrap_or_else(|e| panic!("bad test timestamp '{s}': {e}"))
}
