//! Payment calendar - Merges stored payments with derived obligations.
//!
//! [`PaymentCalendar`] is the object the UI layer holds. It owns the rule
//! table, the payment store and the persistence hook, and it is the only path
//! through which records are created, edited or deleted. Every successful
//! mutation hands the full payment list to the hook.
//!
//! Per-day views list stored payments first, in insertion order, followed by
//! the synthetic obligations for that day in rule order.

use crate::{
    core::{
        month::{CalendarDay, is_same_month, month_grid_dates},
        obligations::derive_obligations,
        persistence::PaymentSink,
        report::{PaymentSummary, summarize},
        schedule::RuleTable,
        store::PaymentStore,
    },
    entities::{
        CalendarEntry, ObligationId, Payment, PaymentFields, PaymentId, SyntheticObligation,
    },
    errors::Result,
};
use chrono::NaiveDate;
use tracing::{debug, error, info, instrument};

/// What saving an [`EditableRecord`] will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Blank form; saving creates a payment under a new identifier.
    New,
    /// A stored payment edited in place.
    Existing(PaymentId),
    /// A synthetic obligation turned into a draft. The identifier was reserved
    /// at promotion time and is not in the store until the draft is saved.
    Promoted {
        id: PaymentId,
        source: ObligationId,
    },
}

/// A record opened for editing, with its prefilled form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableRecord {
    pub target: EditTarget,
    pub fields: PaymentFields,
}

impl EditableRecord {
    /// Identifier the record will be stored under, when already known.
    #[must_use]
    pub const fn id(&self) -> Option<&PaymentId> {
        match &self.target {
            EditTarget::New => None,
            EditTarget::Existing(id) | EditTarget::Promoted { id, .. } => Some(id),
        }
    }
}

/// Result of selecting a day on the calendar.
#[derive(Debug, Clone, PartialEq)]
pub enum DaySelection {
    /// The day has entries to choose from.
    Entries(Vec<CalendarEntry>),
    /// Nothing on that day; go straight to a blank form for it.
    NewRecord(EditableRecord),
}

/// The calendar's single owner of scheduling data and user records.
#[derive(Debug)]
pub struct PaymentCalendar<S: PaymentSink> {
    rules: RuleTable,
    store: PaymentStore,
    sink: S,
}

impl<S: PaymentSink> PaymentCalendar<S> {
    /// Opens the calendar, seeding the store from whatever the sink has saved.
    #[instrument(skip_all)]
    pub fn open(rules: RuleTable, sink: S) -> Self {
        let store = PaymentStore::from_records(sink.load());
        info!("Payment calendar opened with {} stored payments", store.len());
        Self { rules, store, sink }
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    #[must_use]
    pub const fn store(&self) -> &PaymentStore {
        &self.store
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Every stored payment, in insertion order.
    #[must_use]
    pub fn payments(&self) -> &[Payment] {
        self.store.all()
    }

    /// System obligations due on `date`.
    #[must_use]
    pub fn obligations_for_date(&self, date: NaiveDate) -> Vec<SyntheticObligation> {
        derive_obligations(&self.rules, date)
    }

    /// Stored payments for `date` followed by its system obligations.
    #[must_use]
    pub fn merged_records_for_date(&self, date: NaiveDate) -> Vec<CalendarEntry> {
        self.store
            .for_date(date)
            .cloned()
            .map(CalendarEntry::Persisted)
            .chain(
                self.obligations_for_date(date)
                    .into_iter()
                    .map(CalendarEntry::Synthetic),
            )
            .collect()
    }

    /// Picks between listing a day's entries and opening a blank form.
    #[must_use]
    pub fn open_day(&self, date: NaiveDate) -> DaySelection {
        let entries = self.merged_records_for_date(date);
        if entries.is_empty() {
            DaySelection::NewRecord(self.new_record(date))
        } else {
            DaySelection::Entries(entries)
        }
    }

    /// A blank form dated `date`.
    #[must_use]
    pub fn new_record(&self, date: NaiveDate) -> EditableRecord {
        EditableRecord {
            target: EditTarget::New,
            fields: PaymentFields::blank(date),
        }
    }

    /// Opens an entry for editing.
    ///
    /// A stored payment comes back under its own identifier, however many
    /// times it is opened. A synthetic obligation becomes a draft with every
    /// field copied and a freshly reserved identifier that no stored payment
    /// uses; each promotion reserves a different one, and nothing touches the
    /// store until the draft is saved.
    #[must_use]
    pub fn promote_for_edit(&self, entry: &CalendarEntry) -> EditableRecord {
        match entry {
            CalendarEntry::Persisted(payment) => EditableRecord {
                target: EditTarget::Existing(payment.id.clone()),
                fields: payment.fields(),
            },
            CalendarEntry::Synthetic(obligation) => {
                let id = self.store.fresh_id();
                debug!(source = %obligation.id, %id, "promoting obligation to draft");
                EditableRecord {
                    target: EditTarget::Promoted {
                        id,
                        source: obligation.id.clone(),
                    },
                    fields: obligation.to_fields(),
                }
            }
        }
    }

    /// Whether the store currently holds a payment with this identifier.
    #[must_use]
    pub fn is_persisted(&self, id: &PaymentId) -> bool {
        self.store.contains(id)
    }

    /// Only records that actually exist in the store can be deleted; blank
    /// forms and unsaved promoted drafts cannot.
    #[must_use]
    pub fn can_delete(&self, record: &EditableRecord) -> bool {
        record.id().is_some_and(|id| self.is_persisted(id))
    }

    /// Validates and stores a new payment.
    ///
    /// # Errors
    /// Returns a validation error without touching the store.
    pub fn add(&mut self, fields: PaymentFields) -> Result<Payment> {
        fields.validate()?;
        let payment = self.store.add(fields);
        self.persist();
        Ok(payment)
    }

    /// Validates and replaces the fields of a stored payment.
    ///
    /// # Errors
    /// Returns a validation error, or `PaymentNotFound` when the identifier
    /// is not stored.
    pub fn update(&mut self, id: &PaymentId, fields: PaymentFields) -> Result<Payment> {
        fields.validate()?;
        let payment = self.store.update(id, fields)?;
        self.persist();
        Ok(payment)
    }

    /// Saves the submitted form for `record`.
    ///
    /// - `New` creates a payment under a fresh identifier.
    /// - `Existing` updates in place and fails if the payment is gone.
    /// - `Promoted` inserts under the reserved identifier the first time and
    ///   updates that same payment on later saves.
    ///
    /// # Errors
    /// Returns a validation error or `PaymentNotFound`; the store is left
    /// unchanged in both cases.
    #[instrument(skip(self, fields))]
    pub fn save(&mut self, record: &EditableRecord, fields: PaymentFields) -> Result<Payment> {
        fields.validate()?;

        let payment = match &record.target {
            EditTarget::New => self.store.add(fields),
            EditTarget::Existing(id) => self.store.update(id, fields)?,
            EditTarget::Promoted { id, .. } => self.store.upsert_by_id(id.clone(), fields),
        };

        info!(id = %payment.id, date = %payment.date, "payment saved");
        self.persist();
        Ok(payment)
    }

    /// Deletes a stored payment. Confirming with the user is the caller's job.
    /// Returns whether anything was deleted; only then is the list persisted.
    pub fn delete(&mut self, id: &PaymentId) -> bool {
        let removed = self.store.remove(id);
        if removed {
            info!(%id, "payment deleted");
            self.persist();
        }
        removed
    }

    /// Totals over the stored payments.
    #[must_use]
    pub fn summary(&self) -> PaymentSummary {
        summarize(self.store.all())
    }

    /// The page for the month containing `anchor`, with merged entries per day.
    #[must_use]
    pub fn month_view(&self, anchor: NaiveDate, today: NaiveDate) -> Vec<CalendarDay> {
        month_grid_dates(anchor)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                is_current_month: is_same_month(date, anchor),
                is_today: date == today,
                entries: self.merged_records_for_date(date),
            })
            .collect()
    }

    // A failed save leaves the in-memory store authoritative; the next
    // mutation rewrites the whole list.
    fn persist(&mut self) {
        if let Err(e) = self.sink.save(self.store.all()) {
            error!("Failed to persist {} payments: {e}", self.store.len());
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::persistence::{JsonFileStorage, MemoryStorage, decode_payments},
        entities::{ObligationCategory, PaymentStatus, SYSTEM_ID_PREFIX},
        errors::Error,
        test_utils::{date, setup_calendar, test_fields},
    };
    use std::collections::HashSet;

    fn synthetic_entry(
        calendar: &PaymentCalendar<MemoryStorage>,
        day: NaiveDate,
    ) -> CalendarEntry {
        CalendarEntry::Synthetic(calendar.obligations_for_date(day).remove(0))
    }

    #[test]
    fn test_add_record_scenario() -> Result<()> {
        let mut calendar = setup_calendar();
        let added = calendar.add(test_fields(date(2026, 1, 15), "X", 1000.0))?;

        assert_eq!(calendar.payments().len(), 1);
        assert_eq!(calendar.payments()[0].id, added.id);
        assert!(!added.id.as_str().is_empty());
        assert!(!added.id.as_str().starts_with("sys-"));
        assert_eq!(calendar.sink().saves(), 1);
        Ok(())
    }

    #[test]
    fn test_validation_failure_changes_nothing() {
        let mut calendar = setup_calendar();
        let mut fields = test_fields(date(2026, 1, 15), "X", 10.0);
        fields.recipient = String::new();

        assert!(matches!(
            calendar.add(fields.clone()),
            Err(Error::MissingField { .. })
        ));
        assert!(matches!(
            calendar.save(&calendar.new_record(date(2026, 1, 15)), fields),
            Err(Error::MissingField { .. })
        ));
        assert!(calendar.payments().is_empty());
        assert_eq!(calendar.sink().saves(), 0);
    }

    #[test]
    fn test_merged_list_is_persisted_then_synthetic() -> Result<()> {
        let mut calendar = setup_calendar();
        let day = date(2026, 3, 11);
        let first = calendar.add(test_fields(day, "First", 1.0))?;
        calendar.add(test_fields(date(2026, 3, 12), "Elsewhere", 1.0))?;
        let second = calendar.add(test_fields(day, "Second", 2.0))?;

        let merged = calendar.merged_records_for_date(day);
        let obligations = calendar.obligations_for_date(day);

        assert_eq!(merged.len(), 2 + obligations.len());
        assert_eq!(merged[0], CalendarEntry::Persisted(first));
        assert_eq!(merged[1], CalendarEntry::Persisted(second));
        for (entry, obligation) in merged[2..].iter().zip(&obligations) {
            assert_eq!(entry, &CalendarEntry::Synthetic(obligation.clone()));
        }
        Ok(())
    }

    #[test]
    fn test_merge_is_idempotent() -> Result<()> {
        let mut calendar = setup_calendar();
        calendar.add(test_fields(date(2026, 1, 26), "Supplier", 5.0))?;

        assert_eq!(
            calendar.merged_records_for_date(date(2026, 1, 26)),
            calendar.merged_records_for_date(date(2026, 1, 26))
        );
        Ok(())
    }

    #[test]
    fn test_promote_synthetic_then_save_creates_new_record() -> Result<()> {
        let mut calendar = setup_calendar();
        let entry = synthetic_entry(&calendar, date(2026, 1, 26));
        assert_eq!(entry.id(), "sys-billing-2026-01-26");

        let draft = calendar.promote_for_edit(&entry);
        let draft_id = draft.id().cloned().unwrap();
        assert!(!calendar.is_persisted(&draft_id));
        assert!(!calendar.can_delete(&draft));
        assert!(calendar.payments().is_empty());

        let saved = calendar.save(&draft, draft.fields.clone())?;

        assert_eq!(calendar.payments().len(), 1);
        assert_eq!(saved.id, draft_id);
        assert_ne!(saved.id.as_str(), "sys-billing-2026-01-26");
        assert_eq!(saved.date, date(2026, 1, 26));
        assert_eq!(saved.recipient, entry.recipient());
        assert_eq!(saved.description, entry.description());
        assert_eq!(saved.amount, 0.0);
        assert!(calendar.can_delete(&draft));
        Ok(())
    }

    #[test]
    fn test_saving_promoted_draft_twice_keeps_one_record() -> Result<()> {
        let mut calendar = setup_calendar();
        let draft = calendar.promote_for_edit(&synthetic_entry(&calendar, date(2026, 1, 28)));

        calendar.save(&draft, draft.fields.clone())?;
        let mut edited = draft.fields.clone();
        edited.amount = 4500.0;
        edited.status = PaymentStatus::Completed;
        let saved = calendar.save(&draft, edited)?;

        assert_eq!(calendar.payments().len(), 1);
        assert_eq!(saved.amount, 4500.0);
        assert!(saved.is_completed());
        Ok(())
    }

    #[test]
    fn test_promoting_same_obligation_twice_gives_distinct_fresh_ids() -> Result<()> {
        let mut calendar = setup_calendar();
        calendar.add(test_fields(date(2026, 1, 26), "Existing", 1.0))?;
        let entry = synthetic_entry(&calendar, date(2026, 1, 26));

        let first = calendar.promote_for_edit(&entry);
        let second = calendar.promote_for_edit(&entry);
        let (first_id, second_id) = (first.id().unwrap(), second.id().unwrap());

        assert_ne!(first_id, second_id);
        assert!(!calendar.is_persisted(first_id));
        assert!(!calendar.is_persisted(second_id));
        assert_ne!(first_id.as_str(), entry.id());
        assert_eq!(
            first.target,
            EditTarget::Promoted {
                id: first_id.clone(),
                source: ObligationId::new(&ObligationCategory::Billing, date(2026, 1, 26)),
            }
        );
        Ok(())
    }

    #[test]
    fn test_promoting_persisted_record_is_identity() -> Result<()> {
        let mut calendar = setup_calendar();
        let payment = calendar.add(test_fields(date(2026, 1, 15), "X", 1000.0))?;
        let entry = CalendarEntry::Persisted(payment.clone());

        let first = calendar.promote_for_edit(&entry);
        let second = calendar.promote_for_edit(&entry);

        assert_eq!(first.target, EditTarget::Existing(payment.id.clone()));
        assert_eq!(first, second);
        assert_eq!(first.fields, payment.fields());
        assert!(calendar.can_delete(&first));
        Ok(())
    }

    #[test]
    fn test_edit_existing_updates_in_place() -> Result<()> {
        let mut calendar = setup_calendar();
        let payment = calendar.add(test_fields(date(2026, 1, 15), "X", 1000.0))?;
        let record = calendar.promote_for_edit(&CalendarEntry::Persisted(payment.clone()));

        let mut fields = record.fields.clone();
        fields.status = PaymentStatus::Completed;
        let saved = calendar.save(&record, fields)?;

        assert_eq!(saved.id, payment.id);
        assert_eq!(calendar.payments().len(), 1);
        assert!(calendar.payments()[0].is_completed());
        Ok(())
    }

    #[test]
    fn test_saving_edit_of_deleted_record_fails() -> Result<()> {
        let mut calendar = setup_calendar();
        let payment = calendar.add(test_fields(date(2026, 1, 15), "X", 1000.0))?;
        let record = calendar.promote_for_edit(&CalendarEntry::Persisted(payment.clone()));
        assert!(calendar.delete(&payment.id));

        let result = calendar.save(&record, record.fields.clone());

        assert!(matches!(result, Err(Error::PaymentNotFound { .. })));
        assert!(calendar.payments().is_empty());
        Ok(())
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut calendar = setup_calendar();
        let result = calendar.update(
            &PaymentId::new("ghost"),
            test_fields(date(2026, 1, 15), "X", 1.0),
        );
        assert!(matches!(result, Err(Error::PaymentNotFound { .. })));
        assert_eq!(calendar.sink().saves(), 0);
    }

    #[test]
    fn test_delete_unknown_id_does_not_persist() -> Result<()> {
        let mut calendar = setup_calendar();
        calendar.add(test_fields(date(2026, 1, 15), "X", 1.0))?;
        let saves = calendar.sink().saves();

        assert!(!calendar.delete(&PaymentId::new("missing")));
        assert_eq!(calendar.payments().len(), 1);
        assert_eq!(calendar.sink().saves(), saves);
        Ok(())
    }

    #[test]
    fn test_every_mutation_persists_full_list() -> Result<()> {
        let mut calendar = setup_calendar();
        let a = calendar.add(test_fields(date(2026, 1, 15), "A", 1.0))?;
        let b = calendar.add(test_fields(date(2026, 1, 16), "B", 2.0))?;
        calendar.update(&a.id, test_fields(date(2026, 1, 17), "A2", 3.0))?;
        calendar.delete(&b.id);

        assert_eq!(calendar.sink().saves(), 4);
        let saved = decode_payments(calendar.sink().blob().unwrap());
        assert_eq!(saved, calendar.payments());
        Ok(())
    }

    #[test]
    fn test_new_record_is_never_deletable() {
        let calendar = setup_calendar();
        let record = calendar.new_record(date(2026, 1, 15));
        assert_eq!(record.id(), None);
        assert!(!calendar.can_delete(&record));
    }

    #[test]
    fn test_synthetic_ids_never_match_store_ids() -> Result<()> {
        let mut calendar = setup_calendar();
        let mut store_ids = HashSet::new();
        for day in date(2026, 1, 1).iter_days().take(365) {
            for entry in calendar.merged_records_for_date(day) {
                if entry.is_synthetic() {
                    let draft = calendar.promote_for_edit(&entry);
                    let saved = calendar.save(&draft, draft.fields.clone())?;
                    store_ids.insert(saved.id.to_string());
                }
            }
        }
        store_ids.extend(calendar.payments().iter().map(|p| p.id.to_string()));

        for day in date(2026, 1, 1).iter_days().take(365) {
            for obligation in calendar.obligations_for_date(day) {
                assert!(!store_ids.contains(obligation.id.as_str()));
                assert!(obligation.id.as_str().starts_with(SYSTEM_ID_PREFIX));
            }
        }
        Ok(())
    }

    #[test]
    fn test_open_day_with_entries() {
        let calendar = setup_calendar();
        let selection = calendar.open_day(date(2026, 1, 28));
        assert!(matches!(selection, DaySelection::Entries(ref entries) if entries.len() == 1));
    }

    #[test]
    fn test_open_empty_day_starts_new_record() {
        let calendar = setup_calendar();
        let selection = calendar.open_day(date(2026, 1, 15));
        assert_eq!(
            selection,
            DaySelection::NewRecord(calendar.new_record(date(2026, 1, 15)))
        );
    }

    #[test]
    fn test_summary_ignores_synthetic_obligations() -> Result<()> {
        let mut calendar = setup_calendar();
        calendar.add(test_fields(date(2026, 1, 26), "Supplier", 300.0))?;

        let summary = calendar.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total_amount, 300.0);
        assert_eq!(summary.pending_amount, 300.0);
        Ok(())
    }

    #[test]
    fn test_month_view_carries_entries_and_flags() -> Result<()> {
        let mut calendar = setup_calendar();
        calendar.add(test_fields(date(2026, 1, 15), "Landlord", 1000.0))?;

        let days = calendar.month_view(date(2026, 1, 1), date(2026, 1, 15));
        let find = |d: NaiveDate| days.iter().find(|c| c.date == d).unwrap();

        assert_eq!(days.len(), 35);
        assert!(!find(date(2025, 12, 29)).is_current_month);
        assert!(find(date(2026, 1, 15)).is_today);
        assert_eq!(find(date(2026, 1, 15)).entries.len(), 1);
        assert_eq!(find(date(2026, 1, 26)).entries.len(), 1);
        assert!(find(date(2026, 1, 26)).entries[0].is_synthetic());
        assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);
        Ok(())
    }

    #[test]
    fn test_open_with_malformed_storage_starts_empty() {
        let calendar = PaymentCalendar::open(
            RuleTable::builtin(),
            MemoryStorage::with_blob("{definitely not a list"),
        );
        assert!(calendar.payments().is_empty());
    }

    #[test]
    fn test_reopen_from_file_reproduces_records() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("payments.json");

        let mut calendar = PaymentCalendar::open(RuleTable::builtin(), JsonFileStorage::new(&path));
        calendar.add(test_fields(date(2026, 1, 15), "X", 1000.0))?;
        let draft = calendar.promote_for_edit(&CalendarEntry::Synthetic(
            calendar.obligations_for_date(date(2026, 1, 5)).remove(0),
        ));
        calendar.save(&draft, draft.fields.clone())?;
        let before = calendar.payments().to_vec();

        let reopened = PaymentCalendar::open(RuleTable::builtin(), JsonFileStorage::new(&path));

        assert_eq!(reopened.payments(), before.as_slice());
        Ok(())
    }
}
