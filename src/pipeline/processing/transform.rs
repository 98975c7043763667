use serde::Serialize;
use tracing::debug;

use super::mapper::{display_name, present, EntryMapper};
use crate::types::{ContactEntry, RawCustomer};

/// Counters for one transform pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    pub customers_seen: usize,
    pub customers_skipped: usize,
    pub contacts_emitted: usize,
    pub contacts_skipped: usize,
}

/// Entries ready for the sink, in source order
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    pub entries: Vec<ContactEntry>,
    pub stats: TransformStats,
}

/// Converts every customer, and the contacts of every kept customer, into
/// contact book entries.
///
/// A customer is kept only with a non-empty display name and a phone number;
/// a contact is kept only with a phone number.
pub fn to_contact_book(customers: &[RawCustomer], mapper: &EntryMapper) -> ContactBook {
    let mut book = ContactBook::default();

    for customer in customers {
        book.stats.customers_seen += 1;

        let name = display_name(customer);
        if name.is_empty() || present(customer.phone.as_deref()).is_none() {
            debug!(id = ?customer.id, "Skipping customer without display name or phone");
            book.stats.customers_skipped += 1;
            continue;
        }
        book.entries.push(mapper.map_customer(customer, &name));

        for contact in customer.contacts.iter().flatten() {
            let entry = mapper.map_contact(contact, &name);
            if entry.phone_1_number.is_empty() {
                debug!(customer = %name, "Skipping contact without phone");
                book.stats.contacts_skipped += 1;
                continue;
            }
            book.stats.contacts_emitted += 1;
            book.entries.push(entry);
        }
    }

    book
}
