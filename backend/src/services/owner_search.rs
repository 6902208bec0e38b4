//! Find-owners-by-last-name flow.
//!
//! A search resolves to one of three outcomes:
//!
//! - no owner matched: [`SearchResult::Empty`]
//! - exactly one owner matched: [`SearchResult::Single`], record untouched
//! - several owners matched: [`SearchResult::Many`], each telephone annotated
//!   with the dialing prefix of the owner's city
//!
//! Annotation works on the copies returned by the repository for this call
//! only and is never written back.

use log::{debug, warn};

use crate::api::Owner;
use crate::db::repository::{OwnerRepository, RepositoryResult};
use crate::db::services as db_services;

/// Leading digits of an internet-telephony number. Such numbers carry no
/// regional prefix.
pub const INTERNET_PREFIX: &str = "070";

/// Regional dialing prefixes keyed by exact city name.
pub static CITY_PREFIXES: &[(&str, &str)] = &[
    ("Seoul", "02"),
    ("Busan", "051"),
    ("Daegu", "053"),
    ("Incheon", "032"),
    ("Gwangju", "062"),
    ("Daejeon", "042"),
    ("Ulsan", "052"),
    ("Sejong", "044"),
    ("Gyeonggi", "031"),
    ("Gangwon", "033"),
    ("Chungcheongbuk", "043"),
    ("Chungcheongnam", "041"),
    ("Jeonbuk", "063"),
    ("Jeonnam", "061"),
    ("Gyeongbuk", "054"),
    ("Gyeongnam", "055"),
    ("Jeju", "064"),
];

/// Dialing prefix for `city`, case-sensitive exact match.
pub fn city_prefix(city: &str) -> Option<&'static str> {
    CITY_PREFIXES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, prefix)| *prefix)
}

/// Outcome of a last-name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Empty,
    Single(Owner),
    Many(Vec<Owner>),
}

impl SearchResult {
    pub fn len(&self) -> usize {
        match self {
            SearchResult::Empty => 0,
            SearchResult::Single(_) => 1,
            SearchResult::Many(owners) => owners.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchResult::Empty)
    }
}

/// What [`annotate_telephone`] did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Telephone now starts with this prefix and a dash.
    Prefixed(&'static str),
    /// Number starts with [`INTERNET_PREFIX`]; left alone.
    Internet,
    /// City has no entry in [`CITY_PREFIXES`]; left alone.
    UnknownCity,
    /// Fewer than three characters; left alone.
    TooShort,
}

/// First three characters of `telephone`, or `None` if it is shorter.
fn leading_three(telephone: &str) -> Option<&str> {
    let end = telephone
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(telephone.len()))
        .nth(3)?;
    Some(&telephone[..end])
}

/// Whether the number is an internet-telephony number.
pub fn is_internet_telephone(telephone: &str) -> bool {
    leading_three(telephone) == Some(INTERNET_PREFIX)
}

/// Prefix `owner.telephone` with the dialing code of `owner.city`.
///
/// Not idempotent: the internet check only looks at the first three
/// characters, so a second pass over `"02-1234567"` prepends again.
pub fn annotate_telephone(owner: &mut Owner) -> Annotation {
    let Some(leading) = leading_three(&owner.telephone) else {
        warn!(
            "Skipping telephone prefix for owner {:?}: '{}' is shorter than 3 characters",
            owner.id, owner.telephone
        );
        return Annotation::TooShort;
    };

    if leading == INTERNET_PREFIX {
        return Annotation::Internet;
    }

    match city_prefix(&owner.city) {
        Some(prefix) => {
            owner.telephone = format!("{}-{}", prefix, owner.telephone);
            Annotation::Prefixed(prefix)
        }
        None => Annotation::UnknownCity,
    }
}

/// Classify a freshly fetched result set, annotating multi-match results.
pub fn classify(mut owners: Vec<Owner>) -> SearchResult {
    match owners.len() {
        0 => SearchResult::Empty,
        1 => match owners.pop() {
            Some(owner) => SearchResult::Single(owner),
            None => SearchResult::Empty,
        },
        _ => {
            for owner in owners.iter_mut() {
                annotate_telephone(owner);
            }
            SearchResult::Many(owners)
        }
    }
}

/// Run the find-owners flow.
///
/// An absent last name is searched as `""`, which matches every owner.
pub async fn search<R: OwnerRepository + ?Sized>(
    repo: &R,
    last_name: Option<&str>,
) -> RepositoryResult<SearchResult> {
    let last_name = last_name.unwrap_or("");
    let owners = db_services::find_owners_by_last_name(repo, last_name).await?;
    let result = classify(owners);
    debug!("owner search '{}' -> {} result(s)", last_name, result.len());
    Ok(result)
}
