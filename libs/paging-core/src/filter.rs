//! Filter construction shared by both pagination strategies.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::cursor::{self, CursorPolicy};
use crate::{Error, Result, SortKey};

/// Longest accepted `from..=to` span, in whole days.
pub const MAX_RANGE_DAYS: i64 = 365;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Exclusive sort-key boundary taken from a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// `sort_key > k`
    After(SortKey),
    /// `sort_key < k`
    Before(SortKey),
}

impl Boundary {
    pub fn admits(&self, key: SortKey) -> bool {
        match *self {
            Boundary::After(k) => key > k,
            Boundary::Before(k) => key < k,
        }
    }
}

/// Inclusive calendar-day range on a collection's timestamp field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if to < from {
                return Err(Error::validation("`to` must not precede `from`"));
            }
            if (to - from).num_days() > MAX_RANGE_DAYS {
                return Err(Error::validation("the date range should be within a year"));
            }
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    /// Inclusive lower bound: start of `from` (UTC).
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.from.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// Exclusive upper bound: start of the day after `to` (UTC).
    pub fn end_exclusive(&self) -> Option<DateTime<Utc>> {
        self.to
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start().map_or(true, |s| at >= s)
            && self.end_exclusive().map_or(true, |e| at < e)
    }
}

/// Immutable store-level predicate plus ordering directive.
///
/// Every field is optional; the only ordering a filter can express is by the
/// collection's sort key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    owner_id: Option<Uuid>,
    album_id: Option<i64>,
    date_range: Option<DateRange>,
    boundary: Option<Boundary>,
    order: SortDir,
}

impl Filter {
    pub fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    /// Membership predicate: at least one album link with this album id.
    pub fn album_id(&self) -> Option<i64> {
        self.album_id
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    pub fn boundary(&self) -> Option<Boundary> {
        self.boundary
    }

    pub fn order(&self) -> SortDir {
        self.order
    }

    /// Same predicate without the cursor boundary, ordered ascending.
    pub fn unbounded(&self) -> Self {
        Self {
            boundary: None,
            order: SortDir::Asc,
            ..self.clone()
        }
    }
}

/// Raw caller parameters, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub owner_id: Option<Uuid>,
    pub album_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub next_cursor: Option<String>,
    pub previous_cursor: Option<String>,
}

impl FilterParams {
    pub fn for_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    /// Drop both cursor tokens; offset pagination has no use for them.
    pub fn without_cursors(&self) -> Self {
        Self {
            next_cursor: None,
            previous_cursor: None,
            ..self.clone()
        }
    }
}

/// Where a cursor call starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    FirstPage,
    Forward(SortKey),
    Backward(SortKey),
}

/// Turns [`FilterParams`] into a [`Filter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterBuilder {
    policy: CursorPolicy,
}

impl FilterBuilder {
    pub fn new(policy: CursorPolicy) -> Self {
        Self { policy }
    }

    pub fn build(&self, params: &FilterParams) -> Result<(Filter, Direction)> {
        let date_range = match (params.from, params.to) {
            (None, None) => None,
            (from, to) => Some(DateRange::new(from, to)?),
        };

        let direction = self.direction(params)?;
        let (boundary, order) = match direction {
            Direction::FirstPage => (None, SortDir::Asc),
            Direction::Forward(k) => (Some(Boundary::After(k)), SortDir::Asc),
            // Descending so that the window fetched is the one adjacent to the anchor.
            Direction::Backward(k) => (Some(Boundary::Before(k)), SortDir::Desc),
        };

        let filter = Filter {
            owner_id: params.owner_id,
            album_id: params.album_id,
            date_range,
            boundary,
            order,
        };
        Ok((filter, direction))
    }

    fn direction(&self, params: &FilterParams) -> Result<Direction> {
        let next = params.next_cursor.as_deref().filter(|t| !t.trim().is_empty());
        let previous = params
            .previous_cursor
            .as_deref()
            .filter(|t| !t.trim().is_empty());

        match (next, previous) {
            (Some(_), Some(_)) => Err(Error::invalid_request(
                "nextCursor and previousCursor are mutually exclusive",
            )),
            (Some(token), None) => Ok(self
                .decode(token, "nextCursor")?
                .map_or(Direction::FirstPage, Direction::Forward)),
            (None, Some(token)) => Ok(self
                .decode(token, "previousCursor")?
                .map_or(Direction::FirstPage, Direction::Backward)),
            (None, None) => Ok(Direction::FirstPage),
        }
    }

    fn decode(&self, token: &str, name: &str) -> Result<Option<SortKey>> {
        match cursor::try_decode(token) {
            Ok(k) => Ok(Some(k)),
            Err(e) => match self.policy {
                CursorPolicy::Strict => Err(Error::invalid_request(format!("{name}: {e}"))),
                CursorPolicy::Lenient => {
                    warn!(cursor = name, error = %e, "ignoring undecodable cursor");
                    Ok(None)
                }
            },
        }
    }
}
