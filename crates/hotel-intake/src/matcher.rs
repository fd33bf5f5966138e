//! Returning-guest detection.

use hotel_core::{
  guest::GuestRecord,
  store::{GuestQuery, GuestStore},
};

/// Build the lookup for a candidate guest.
///
/// A record matches on an exact channel number, or when its full name
/// contains `family_name` case-insensitively. A blank family name only
/// searches by channel number. Only visit heads are considered, so a guest
/// seen several times is always scored from their latest visit.
///
/// Channel matches outrank name matches only among heads. If a record with
/// this channel was continued by a name match on another channel, the chain
/// now ends in that later record, which is returned as a name match.
pub fn duplicate_query(channel_number: &str, family_name: &str) -> GuestQuery {
  let family = family_name.trim();
  GuestQuery {
    channel_number: Some(channel_number.to_owned()),
    name_contains:  (!family.is_empty()).then(|| family.to_owned()),
    heads_only:     true,
    limit:          Some(1),
  }
}

/// Find the best existing record for a candidate guest, if any.
///
/// The store ranks exact channel matches first, then newest first; the top
/// hit wins. Errors are not retried.
pub async fn find_duplicate<S: GuestStore>(
  store: &S,
  channel_number: &str,
  family_name: &str,
) -> Result<Option<GuestRecord>, S::Error> {
  let query = duplicate_query(channel_number, family_name);
  let found = store.find_guests(&query).await?;
  Ok(found.into_iter().next())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_family_name_searches_channel_only() {
    let q = duplicate_query("+243900111222", "   ");
    assert_eq!(q.channel_number.as_deref(), Some("+243900111222"));
    assert!(q.name_contains.is_none());
    assert!(q.heads_only);
  }

  #[test]
  fn family_name_is_trimmed() {
    let q = duplicate_query("1", " Kalume ");
    assert_eq!(q.name_contains.as_deref(), Some("Kalume"));
  }
}
