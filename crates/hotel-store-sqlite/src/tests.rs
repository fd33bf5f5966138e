//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use hotel_core::{
  guest::{Attribution, DocumentKind, GuestStatus, NewGuest},
  matricule::Matricule,
  notification::{NewNotification, NotificationKind},
  store::{Conflict, GuestQuery, GuestStore, StoreError},
};
use rand_core::OsRng;
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_guest(full_name: &str, channel: &str) -> NewGuest {
  NewGuest {
    matricule:            Matricule::generate(Utc::now(), &mut OsRng),
    family_name:          full_name.split(' ').next().unwrap_or_default().into(),
    middle_name:          String::new(),
    given_name:           String::new(),
    full_name:            full_name.into(),
    birth_date:           None,
    address:              None,
    country_of_origin:    Some("RD Congo".into()),
    phone_number:         None,
    channel_number:       channel.into(),
    channel_country_code: "+243".into(),
    email:                None,
    comment:              None,
    document_kind:        None,
    document_image_ref:   None,
    document_fields:      None,
    stay_count:           1,
    night_count:          1,
    loyalty_score:        10,
    tags:                 Vec::new(),
    status:               GuestStatus::Active,
    attribution:          Attribution::FrontDesk,
    is_duplicate:         false,
    is_vip:               false,
    previous_visit:       None,
  }
}

fn by_channel_or_name(channel: &str, name: Option<&str>) -> GuestQuery {
  GuestQuery {
    channel_number: Some(channel.into()),
    name_contains:  name.map(str::to_owned),
    heads_only:     true,
    limit:          None,
  }
}

// ─── Guests ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_guest_round_trips_every_field() {
  let s = store().await;

  let mut input = new_guest("Kalume Mbuyi Jean", "+243900111222");
  input.birth_date = NaiveDate::from_ymd_opt(1988, 4, 30);
  input.email = Some("jean@example.cd".into());
  input.document_kind = Some(DocumentKind::IdentityCard);
  input.document_image_ref = Some("scans/1.jpg".into());
  input.document_fields = Some(BTreeMap::from([("detected".into(), "true".into())]));

  let inserted = s.insert_guest(input).await.unwrap();
  let fetched = s.get_guest(inserted.id).await.unwrap().unwrap();

  // RFC 3339 keeps full precision, so the records compare equal.
  assert_eq!(fetched, inserted);
  assert_eq!(fetched.attribution, Attribution::FrontDesk);
  assert_eq!(fetched.birth_date, NaiveDate::from_ymd_opt(1988, 4, 30));
}

#[tokio::test]
async fn get_guest_missing_returns_none() {
  let s = store().await;
  assert!(s.get_guest(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_matricule_is_a_conflict() {
  let s = store().await;
  let first = s.insert_guest(new_guest("Kalume", "+243900111222")).await.unwrap();

  let mut clash = new_guest("Other", "+243811000000");
  clash.matricule = first.matricule.clone();
  let err = s.insert_guest(clash).await.unwrap_err();

  assert_eq!(err.conflict(), Some(Conflict::Matricule));
  assert_eq!(s.count_guests().await.unwrap(), 1);
}

#[tokio::test]
async fn a_visit_is_continued_at_most_once() {
  let s = store().await;
  let first = s.insert_guest(new_guest("Kalume", "+243900111222")).await.unwrap();

  let mut second = new_guest("Kalume", "+243900111222");
  second.previous_visit = Some(first.id);
  s.insert_guest(second.clone()).await.unwrap();

  second.matricule = Matricule::generate(Utc::now(), &mut OsRng);
  let err = s.insert_guest(second).await.unwrap_err();
  assert_eq!(err.conflict(), Some(Conflict::PreviousVisit));
}

#[tokio::test]
async fn find_by_channel_or_folded_name() {
  let s = store().await;
  let a = s.insert_guest(new_guest("Jean KALUME", "+243811000000")).await.unwrap();
  let b = s.insert_guest(new_guest("Élodie Ngoy", "+243822000000")).await.unwrap();
  s.insert_guest(new_guest("Unrelated", "+243833000000")).await.unwrap();

  let hits = s
    .find_guests(&by_channel_or_name("+243000000000", Some("kalume")))
    .await
    .unwrap();
  assert_eq!(hits.iter().map(|g| g.id).collect::<Vec<_>>(), vec![a.id]);

  // Non-ASCII case folding.
  let hits = s
    .find_guests(&by_channel_or_name("+243000000000", Some("ÉLODIE")))
    .await
    .unwrap();
  assert_eq!(hits.iter().map(|g| g.id).collect::<Vec<_>>(), vec![b.id]);

  let hits = s
    .find_guests(&by_channel_or_name("+243822000000", None))
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].id, b.id);
}

#[tokio::test]
async fn name_wildcards_are_literal() {
  let s = store().await;
  s.insert_guest(new_guest("Kalume", "+243811000000")).await.unwrap();

  let hits = s
    .find_guests(&by_channel_or_name("+243000000000", Some("%")))
    .await
    .unwrap();
  assert!(hits.is_empty());
}

#[tokio::test]
async fn channel_matches_rank_first_then_newest() {
  let s = store().await;
  let by_channel = s.insert_guest(new_guest("Someone", "+243900111222")).await.unwrap();
  let old_name = s.insert_guest(new_guest("Kalume", "+243811000000")).await.unwrap();
  let new_name = s.insert_guest(new_guest("Kalume", "+243822000000")).await.unwrap();

  let hits = s
    .find_guests(&by_channel_or_name("+243900111222", Some("Kalume")))
    .await
    .unwrap();
  let ids: Vec<_> = hits.iter().map(|g| g.id).collect();
  assert_eq!(ids, vec![by_channel.id, new_name.id, old_name.id]);
}

#[tokio::test]
async fn heads_only_skips_continued_visits() {
  let s = store().await;
  let first = s.insert_guest(new_guest("Kalume", "+243900111222")).await.unwrap();
  let mut next = new_guest("Kalume", "+243900111222");
  next.previous_visit = Some(first.id);
  next.stay_count = 2;
  let second = s.insert_guest(next).await.unwrap();

  let mut query = by_channel_or_name("+243900111222", None);
  let heads = s.find_guests(&query).await.unwrap();
  assert_eq!(heads.len(), 1);
  assert_eq!(heads[0].id, second.id);

  query.heads_only = false;
  assert_eq!(s.find_guests(&query).await.unwrap().len(), 2);
}

#[tokio::test]
async fn continued_channel_match_yields_to_the_chain_head() {
  let s = store().await;
  let first = s.insert_guest(new_guest("Kalume Jean", "+243900111222")).await.unwrap();
  let mut other = new_guest("Kalume Paul", "+243811000000");
  other.previous_visit = Some(first.id);
  let head = s.insert_guest(other).await.unwrap();

  let hits = s
    .find_guests(&by_channel_or_name("+243900111222", Some("Kalume")))
    .await
    .unwrap();
  assert_eq!(hits.iter().map(|g| g.id).collect::<Vec<_>>(), vec![head.id]);
}

#[tokio::test]
async fn empty_query_matches_everything_up_to_limit() {
  let s = store().await;
  for i in 0..3 {
    s.insert_guest(new_guest("Guest", &format!("+24381100000{i}")))
      .await
      .unwrap();
  }

  let query = GuestQuery { limit: Some(2), ..Default::default() };
  assert_eq!(s.find_guests(&query).await.unwrap().len(), 2);
}

#[tokio::test]
async fn list_guests_pages_newest_first() {
  let s = store().await;
  let a = s.insert_guest(new_guest("A", "+243811000001")).await.unwrap();
  let b = s.insert_guest(new_guest("B", "+243811000002")).await.unwrap();
  let c = s.insert_guest(new_guest("C", "+243811000003")).await.unwrap();

  let page = s.list_guests(2, 0).await.unwrap();
  assert_eq!(page.iter().map(|g| g.id).collect::<Vec<_>>(), vec![c.id, b.id]);
  let page = s.list_guests(2, 2).await.unwrap();
  assert_eq!(page.iter().map(|g| g.id).collect::<Vec<_>>(), vec![a.id]);
  assert_eq!(s.count_guests().await.unwrap(), 3);
}

// ─── Notifications ───────────────────────────────────────────────────────────

fn note(guest_id: Option<Uuid>, kind: NotificationKind) -> NewNotification {
  NewNotification {
    title: "New guest registered".into(),
    body: "Kalume was registered successfully".into(),
    guest_id,
    kind,
  }
}

#[tokio::test]
async fn notifications_start_unread() {
  let s = store().await;
  let guest = s.insert_guest(new_guest("Kalume", "+243900111222")).await.unwrap();

  let created = s
    .insert_notification(note(Some(guest.id), NotificationKind::NewGuest))
    .await
    .unwrap();
  assert!(!created.read);

  let listed = s.list_notifications(false, 10).await.unwrap();
  assert_eq!(listed, vec![created]);
  assert_eq!(s.count_unread_notifications().await.unwrap(), 1);
}

#[tokio::test]
async fn mark_read_filters_unread_listing() {
  let s = store().await;
  let first = s
    .insert_notification(note(None, NotificationKind::NewGuest))
    .await
    .unwrap();
  let second = s
    .insert_notification(note(None, NotificationKind::DocumentCaptured))
    .await
    .unwrap();

  assert!(s.mark_notification_read(first.id).await.unwrap());
  assert!(!s.mark_notification_read(Uuid::new_v4()).await.unwrap());

  let unread = s.list_notifications(true, 10).await.unwrap();
  assert_eq!(unread.len(), 1);
  assert_eq!(unread[0].id, second.id);
  assert_eq!(unread[0].kind, NotificationKind::DocumentCaptured);
  assert_eq!(s.count_unread_notifications().await.unwrap(), 1);

  let all = s.list_notifications(false, 10).await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].id, second.id);
  assert!(all[1].read);
}

#[tokio::test]
async fn notification_for_unknown_guest_is_rejected() {
  let s = store().await;
  let err = s
    .insert_notification(note(Some(Uuid::new_v4()), NotificationKind::NewGuest))
    .await
    .unwrap_err();
  assert_eq!(err.conflict(), None);
}
