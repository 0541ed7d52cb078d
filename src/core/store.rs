//! Persisted payment store - Handles all payment record operations.
//!
//! An ordered, in-memory list of payments keyed by identifier. Identifiers are
//! unique within the store at all times; insertion order is preserved and is
//! the order every read returns. The store never deletes or expires a record
//! on its own.

use crate::{
    entities::{Payment, PaymentFields, PaymentId},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Ordered collection of persisted payments.
#[derive(Debug, Clone, Default)]
pub struct PaymentStore {
    payments: Vec<Payment>,
}

impl PaymentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from previously persisted records.
    ///
    /// Records whose identifier was already seen are dropped (first occurrence
    /// wins) so the uniqueness invariant holds from the start.
    #[must_use]
    pub fn from_records(records: Vec<Payment>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut payments = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.id.clone()) {
                payments.push(record);
            } else {
                warn!(id = %record.id, "dropping persisted payment with duplicate id");
            }
        }

        Self { payments }
    }

    /// Generates an identifier that no record in the current snapshot uses.
    #[must_use]
    pub fn fresh_id(&self) -> PaymentId {
        loop {
            let candidate = PaymentId::generate();
            if !self.contains(&candidate) {
                return candidate;
            }
            warn!(id = %candidate, "generated payment id collided, retrying");
        }
    }

    /// Appends a new payment under a fresh identifier and returns it.
    pub fn add(&mut self, fields: PaymentFields) -> Payment {
        let payment = Payment::from_fields(self.fresh_id(), fields);
        debug!(id = %payment.id, date = %payment.date, "payment added");
        self.payments.push(payment.clone());
        payment
    }

    /// Replaces every field except `id` of an existing payment.
    ///
    /// # Errors
    /// Returns `Error::PaymentNotFound` when no payment has this identifier.
    pub fn update(&mut self, id: &PaymentId, fields: PaymentFields) -> Result<Payment> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::PaymentNotFound { id: id.to_string() })?;

        payment.apply(fields);
        debug!(%id, status = ?payment.status, "payment updated");
        Ok(payment.clone())
    }

    /// Updates the payment with this identifier, or inserts a new payment that
    /// keeps the identifier verbatim when none exists.
    pub fn upsert_by_id(&mut self, id: PaymentId, fields: PaymentFields) -> Payment {
        if let Some(existing) = self.payments.iter_mut().find(|p| p.id == id) {
            existing.apply(fields);
            debug!(%id, "payment upserted in place");
            return existing.clone();
        }

        let payment = Payment::from_fields(id, fields);
        debug!(id = %payment.id, "payment upserted as new record");
        self.payments.push(payment.clone());
        payment
    }

    /// Deletes the payment with this identifier. Returns whether anything was
    /// removed; an unknown id leaves the store untouched.
    pub fn remove(&mut self, id: &PaymentId) -> bool {
        let before = self.payments.len();
        self.payments.retain(|p| &p.id != id);
        let removed = self.payments.len() != before;
        debug!(%id, removed, "payment remove requested");
        removed
    }

    /// Full snapshot in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Payment] {
        &self.payments
    }

    #[must_use]
    pub fn get(&self, id: &PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &PaymentId) -> bool {
        self.get(id).is_some()
    }

    /// Payments dated on `date`, in insertion order.
    pub fn for_date(&self, date: NaiveDate) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(move |p| p.date == date)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}
