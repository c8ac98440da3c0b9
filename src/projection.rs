use tracing::debug;

use crate::models::InvoiceRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Oldest => "Oldest First",
        }
    }
}

/// Search and sort criteria for the invoice list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFilter {
    /// Case-insensitive substring of the client name
    pub client_name: String,
    /// Substring of the invoice number, matched as typed
    pub invoice_number: String,
    pub sort: SortOrder,
}

impl ViewFilter {
    pub fn matches(&self, record: &InvoiceRecord) -> bool {
        record
            .client_name()
            .to_lowercase()
            .contains(&self.client_name.to_lowercase())
            && record.invoice_number().contains(&self.invoice_number)
    }
}

/// Filter and sort `records` for display without touching the store.
///
/// Sorting is stable, so records created at the same instant keep their
/// insertion order in both directions.
pub fn project<'a>(records: &'a [InvoiceRecord], filter: &ViewFilter) -> Vec<&'a InvoiceRecord> {
    let mut view: Vec<&InvoiceRecord> = records.iter().filter(|r| filter.matches(r)).collect();

    match filter.sort {
        SortOrder::Newest => view.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortOrder::Oldest => view.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
    }

    debug!(total = records.len(), shown = view.len(), sort = ?filter.sort, "projected invoices");
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceId;
    use crate::store::RecordStore;
    use crate::store::test_support::{draft, ManualClock};

    fn numbers(view: &[&InvoiceRecord]) -> Vec<String> {
        view.iter().map(|r| r.invoice_number().to_string()).collect()
    }

    fn filter(client: &str, number: &str, sort: SortOrder) -> ViewFilter {
        ViewFilter {
            client_name: client.to_string(),
            invoice_number: number.to_string(),
            sort,
        }
    }

    #[test]
    fn test_single_record_example() {
        let clock = ManualClock::new();
        let mut store = RecordStore::with_clock(clock.clone());
        store.add(&draft("INV1", "Client A", 3.0, 10.0)).unwrap();

        assert!(project(store.list(), &filter("b", "", SortOrder::Newest)).is_empty());

        clock.advance(5);
        let newest = store.add(&draft("INV2", "Client A", 1.0, 1.0)).unwrap();
        let view = project(store.list(), &ViewFilter::default());
        assert_eq!(view[0].id(), newest);
    }

    #[test]
    fn test_client_filter_is_case_insensitive_substring() {
        let mut store = RecordStore::with_clock(ManualClock::new());
        store.add(&draft("INV1", "Client A", 1.0, 1.0)).unwrap();
        store.add(&draft("INV2", "Client B", 1.0, 1.0)).unwrap();

        let view = project(store.list(), &filter("client a", "", SortOrder::Oldest));
        assert_eq!(numbers(&view), vec!["INV1"]);

        let view = project(store.list(), &filter("LIENT", "", SortOrder::Oldest));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_invoice_number_filter_is_case_sensitive() {
        let mut store = RecordStore::with_clock(ManualClock::new());
        store.add(&draft("INV100", "Client A", 1.0, 1.0)).unwrap();
        store.add(&draft("INV200", "Client A", 1.0, 1.0)).unwrap();

        let view = project(store.list(), &filter("", "10", SortOrder::Oldest));
        assert_eq!(numbers(&view), vec!["INV100"]);
        assert!(project(store.list(), &filter("", "inv", SortOrder::Oldest)).is_empty());
    }

    #[test]
    fn test_both_filters_must_match() {
        let mut store = RecordStore::with_clock(ManualClock::new());
        store.add(&draft("1", "Client A", 1.0, 1.0)).unwrap();
        store.add(&draft("2", "Client B", 1.0, 1.0)).unwrap();
        store.add(&draft("12", "Client B", 1.0, 1.0)).unwrap();

        let view = project(store.list(), &filter("b", "1", SortOrder::Oldest));
        assert_eq!(numbers(&view), vec!["12"]);
    }

    #[test]
    fn test_sort_directions() {
        let clock = ManualClock::new();
        let mut store = RecordStore::with_clock(clock.clone());
        for number in ["first", "second", "third"] {
            store.add(&draft(number, "Client A", 1.0, 1.0)).unwrap();
            clock.advance(1);
        }

        let newest = project(store.list(), &filter("", "", SortOrder::Newest));
        assert_eq!(numbers(&newest), vec!["third", "second", "first"]);
        let oldest = project(store.list(), &filter("", "", SortOrder::Oldest));
        assert_eq!(numbers(&oldest), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let clock = ManualClock::new();
        let mut store = RecordStore::with_clock(clock.clone());
        store.add(&draft("early", "Client A", 1.0, 1.0)).unwrap();
        clock.advance(10);
        store.add(&draft("tie-1", "Client A", 1.0, 1.0)).unwrap();
        store.add(&draft("tie-2", "Client A", 1.0, 1.0)).unwrap();

        let newest = project(store.list(), &filter("", "", SortOrder::Newest));
        assert_eq!(numbers(&newest), vec!["tie-1", "tie-2", "early"]);
        let oldest = project(store.list(), &filter("", "", SortOrder::Oldest));
        assert_eq!(numbers(&oldest), vec!["early", "tie-1", "tie-2"]);
    }

    #[test]
    fn test_projection_does_not_mutate_store() {
        let clock = ManualClock::new();
        let mut store = RecordStore::with_clock(clock.clone());
        store.add(&draft("a", "Client A", 1.0, 1.0)).unwrap();
        clock.advance(1);
        store.add(&draft("b", "Client A", 1.0, 1.0)).unwrap();

        let _ = project(store.list(), &filter("", "", SortOrder::Newest));
        let ids: Vec<InvoiceId> = store.list().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![InvoiceId(1), InvoiceId(2)]);
    }

    #[test]
    fn test_sort_order_toggle_and_labels() {
        assert_eq!(SortOrder::default(), SortOrder::Newest);
        assert_eq!(SortOrder::Newest.toggle(), SortOrder::Oldest);
        assert_eq!(SortOrder::Oldest.toggle().label(), "Newest First");
    }
}
