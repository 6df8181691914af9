/**
 * Video Listing Query Builder
 *
 * Builds a typed filter/sort/pagination specification from untrusted query
 * parameters. Predicates are a closed set of values rather than free-form
 * key/value pairs, so nothing from the request string ever reaches the SQL
 * text unbound.
 *
 * Coercion rules (all deliberate, all tested):
 * - `page` / `limit`: non-numeric or non-positive input degrades to the
 *   defaults (1 / 10) instead of being rejected.
 * - `userId`: an unparsable value is silently ignored; the listing behaves
 *   as if the parameter were omitted.
 * - `sortBy`: unknown field names fall back to `createdAt`; with no
 *   `sortBy` the listing is newest-first.
 * - `sortType`: ascending only for the exact value "asc", descending for
 *   anything else.
 */

use serde::Deserialize;
use uuid::Uuid;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Raw listing parameters, straight off the query string.
///
/// Every field is an optional string so that junk input never fails
/// extraction; coercion happens in [`VideoListing::from_params`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub query: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortType")]
    pub sort_type: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// One predicate of the listing filter. All predicates are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoPredicate {
    /// Restrict to published records.
    Published,
    /// Case-insensitive substring match against title OR description.
    TextMatch(String),
    /// Restrict to a single owner.
    OwnedBy(Uuid),
}

/// Fields the listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Title,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    /// Records skipped before the window starts.
    pub fn skip(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

/// Fully-typed listing specification.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoListing {
    pub predicates: Vec<VideoPredicate>,
    pub sort: SortSpec,
    pub page: Page,
}

impl VideoListing {
    /// Build a listing spec from raw query parameters.
    pub fn from_params(raw: &RawListParams) -> Self {
        let mut predicates = vec![VideoPredicate::Published];

        if let Some(term) = raw.query.as_deref() {
            let term = term.trim();
            if !term.is_empty() {
                predicates.push(VideoPredicate::TextMatch(term.to_string()));
            }
        }

        // An owner filter that fails identifier parsing is dropped, not
        // rejected: the listing must behave exactly as if userId were
        // omitted.
        if let Some(raw_owner) = raw.user_id.as_deref() {
            if let Ok(owner) = Uuid::parse_str(raw_owner.trim()) {
                predicates.push(VideoPredicate::OwnedBy(owner));
            }
        }

        Self {
            predicates,
            sort: parse_sort(raw.sort_by.as_deref(), raw.sort_type.as_deref()),
            page: Page {
                number: coerce_positive(raw.page.as_deref(), DEFAULT_PAGE),
                size: coerce_positive(raw.limit.as_deref(), DEFAULT_LIMIT),
            },
        }
    }
}

fn coerce_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

fn parse_sort(sort_by: Option<&str>, sort_type: Option<&str>) -> SortSpec {
    let field = match sort_by.map(str::trim) {
        Some("title") => SortField::Title,
        Some("duration") => SortField::Duration,
        // "createdAt", unknown names and absence all sort by creation time.
        _ => SortField::CreatedAt,
    };

    let direction = if sort_type.map(str::trim) == Some("asc") {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    SortSpec { field, direction }
}

/// Pagination metadata returned alongside the listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl PageInfo {
    pub fn new(total: u64, page: &Page) -> Self {
        let total_pages = total.div_ceil(u64::from(page.size)) as u32;
        Self {
            total,
            page: page.number,
            limit: page.size,
            total_pages,
        }
    }
}
