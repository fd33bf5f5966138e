//! [`IntakeEngine`] — turns an intake request into a persisted guest record.

use std::{future::Future, sync::Arc, time::Duration};

use chrono::Utc;
use hotel_core::{
  channel::ChannelValidator,
  guest::{DocumentKind, GuestRecord, GuestStatus, NewGuest},
  matricule::Matricule,
  store::{Conflict, GuestStore, StoreError as _},
};
use rand_core::OsRng;
use tokio::time::Instant;

use crate::{
  error::{IntakeError, ValidationError},
  loyalty::{self, Loyalty},
  matcher,
  notify::{self, EmitReport},
  request::{GuestIntakeRequest, non_blank},
};

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct IntakeConfig {
  /// Upper bound for a whole intake, checked at every store call. Expiry
  /// before the guest insert completes fails the intake; expiry afterwards
  /// only cuts the notifications short.
  pub timeout:             Option<Duration>,
  /// How many guest inserts to try when the store reports a uniqueness
  /// conflict (matricule collision or a concurrent return visit).
  pub max_insert_attempts: u32,
}

impl Default for IntakeConfig {
  fn default() -> Self { Self { timeout: None, max_insert_attempts: 5 } }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// A committed intake: the guest record plus the notifications written for
/// it.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
  pub guest:         GuestRecord,
  pub notifications: EmitReport,
}

/// Registers guests against an injected store.
pub struct IntakeEngine<S, V> {
  store:     Arc<S>,
  validator: V,
  config:    IntakeConfig,
}

impl<S, V> IntakeEngine<S, V>
where
  S: GuestStore,
  V: ChannelValidator,
{
  pub fn new(store: Arc<S>, validator: V, config: IntakeConfig) -> Self {
    Self { store, validator, config }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn config(&self) -> &IntakeConfig { &self.config }

  /// Register a guest and return the persisted record.
  ///
  /// Exactly one record is created per successful call. Submitting the same
  /// request twice creates two records; recognising a returning guest only
  /// changes how the new record is scored.
  pub async fn submit_intake(
    &self,
    request: GuestIntakeRequest,
  ) -> Result<GuestRecord, IntakeError> {
    self.submit(request, self.config.timeout).await.map(|o| o.guest)
  }

  /// Like [`Self::submit_intake`] with an explicit deadline, overriding the
  /// configured one.
  pub async fn submit_intake_within(
    &self,
    request: GuestIntakeRequest,
    timeout: Duration,
  ) -> Result<GuestRecord, IntakeError> {
    self.submit(request, Some(timeout)).await.map(|o| o.guest)
  }

  /// Full intake, also reporting which notifications were written.
  pub async fn submit(
    &self,
    request: GuestIntakeRequest,
    timeout: Option<Duration>,
  ) -> Result<IntakeOutcome, IntakeError> {
    let deadline = timeout.map(|t| Instant::now() + t);

    if !self
      .validator
      .is_valid(&request.channel_number, &request.channel_country_code)
    {
      return Err(
        ValidationError::InvalidChannel {
          number:       request.channel_number.clone(),
          country_code: request.channel_country_code.clone(),
        }
        .into(),
      );
    }
    let nights = request.stay_nights()?;
    let full_name = request.full_name();

    let mut matched = self.lookup(&request, deadline).await?;
    let mut attempt = 1;

    let guest = loop {
      let loyalty = loyalty::score(matched.as_ref(), nights);
      let matricule = Matricule::generate(Utc::now(), &mut OsRng);
      let new_guest = assemble(&request, &full_name, matricule, loyalty);

      let err = match bounded(deadline, self.store.insert_guest(new_guest)).await? {
        Ok(guest) => break guest,
        Err(e) => e,
      };

      let conflict = err.conflict();
      if conflict.is_none() || attempt >= self.config.max_insert_attempts {
        return Err(IntakeError::Persistence(Box::new(err)));
      }
      attempt += 1;

      if conflict == Some(Conflict::PreviousVisit) {
        tracing::debug!(attempt, "previous visit already continued; re-matching");
        matched = self.lookup(&request, deadline).await?;
      } else {
        tracing::debug!(attempt, "matricule collision; regenerating");
      }
    };

    tracing::info!(
      guest_id = %guest.id,
      matricule = %guest.matricule,
      duplicate = guest.is_duplicate,
      stay_count = guest.stay_count,
      loyalty_score = guest.loyalty_score,
      "guest registered"
    );

    let notifications = notify::emit(&*self.store, &guest, deadline).await;
    Ok(IntakeOutcome { guest, notifications })
  }

  async fn lookup(
    &self,
    request: &GuestIntakeRequest,
    deadline: Option<Instant>,
  ) -> Result<Option<GuestRecord>, IntakeError> {
    bounded(
      deadline,
      matcher::find_duplicate(
        &*self.store,
        &request.channel_number,
        &request.family_name,
      ),
    )
    .await?
    .map_err(|e| IntakeError::Query(Box::new(e)))
  }
}

fn assemble(
  request: &GuestIntakeRequest,
  full_name: &str,
  matricule: Matricule,
  loyalty: Loyalty,
) -> NewGuest {
  let document = request.document.as_ref();

  NewGuest {
    matricule,
    family_name: request.family_name.trim().to_owned(),
    middle_name: request.middle_name.trim().to_owned(),
    given_name: request.given_name.trim().to_owned(),
    full_name: full_name.to_owned(),
    birth_date: request.birth_date,
    address: non_blank(request.address.as_deref()),
    country_of_origin: non_blank(request.country_of_origin.as_deref()),
    phone_number: non_blank(request.phone_number.as_deref()),
    channel_number: request.channel_number.clone(),
    channel_country_code: request.channel_country_code.clone(),
    email: non_blank(request.email.as_deref()),
    comment: non_blank(request.comment.as_deref()),
    document_kind: document.map(|_| DocumentKind::IdentityCard),
    document_image_ref: document.map(|d| d.image_ref.clone()),
    document_fields: document
      .filter(|d| !d.extracted_fields.is_empty())
      .map(|d| d.extracted_fields.clone()),
    stay_count: loyalty.stay_count,
    night_count: loyalty.night_count,
    loyalty_score: loyalty.loyalty_score,
    tags: Vec::new(),
    status: GuestStatus::Active,
    attribution: request.submitted_by,
    is_duplicate: loyalty.is_duplicate,
    is_vip: false,
    previous_visit: loyalty.previous_visit,
  }
}

/// Await a store call, giving up with [`IntakeError::Timeout`] once
/// `deadline` passes. The call itself may still complete in the store.
pub(crate) async fn bounded<F: Future>(
  deadline: Option<Instant>,
  fut: F,
) -> Result<F::Output, IntakeError> {
  match deadline {
    None => Ok(fut.await),
    Some(deadline) => tokio::time::timeout_at(deadline, fut)
      .await
      .map_err(|_| IntakeError::Timeout),
  }
}
