use chrono::NaiveDate;
use serde::Serialize;

use crate::types::Page;

/// A page of the post collection, dated from its route.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post<'a> {
    #[serde(flatten)]
    pub page: &'a Page,
    /// `None` when the route does not carry a valid `/year/month/day/`.
    pub created_at: Option<NaiveDate>,
}

/// Pages of `collection`, in their original order, each dated from its route.
///
/// Nothing is cached: every call walks `pages` again.
pub fn posts<'a>(pages: &'a [Page], collection: &'a str) -> impl Iterator<Item = Post<'a>> + 'a {
    pages
        .iter()
        .filter(move |page| page.is_in(collection))
        .map(|page| Post {
            page,
            created_at: created_at(&page.path),
        })
}

/// Read the creation date from the 2nd, 3rd and 4th segments of a route
/// such as `/2021/05/03/my-post/`.
pub fn created_at(path: &str) -> Option<NaiveDate> {
    let mut segments = path.split('/').skip(1);
    let year = segments.next()?.parse::<i32>().ok()?;
    let month = segments.next()?.parse::<u32>().ok()?;
    let day = segments.next()?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
