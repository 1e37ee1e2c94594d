use std::cmp::Ordering;

use super::types::Invoice;

/// Outcome of [`InvoiceCollection::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    Added,
    /// An invoice with the same identity was already present; the rejected
    /// invoice is handed back.
    Duplicate(Invoice),
}

/// Ordered set of invoices accumulated during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceCollection {
    invoices: Vec<Invoice>,
}

impl InvoiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append without a duplicate check.
    ///
    /// Callers must check [`contains`](Self::contains) first. The identity
    /// check here is a `debug_assert!` only, so release builds will accept a
    /// duplicate. [`insert`](Self::insert) is the only path that keeps the
    /// collection free of duplicates in every build.
    pub fn add(&mut self, invoice: Invoice) {
        debug_assert!(
            !self.contains(&invoice),
            "duplicate invoice {} / {}",
            invoice.supplier_business_id(),
            invoice.invoice_number()
        );
        self.invoices.push(invoice);
    }

    /// Append unless an invoice with the same identity is already present.
    pub fn insert(&mut self, invoice: Invoice) -> Insertion {
        if self.contains(&invoice) {
            return Insertion::Duplicate(invoice);
        }
        self.invoices.push(invoice);
        Insertion::Added
    }

    /// True if some member has the same supplier business ID and invoice number.
    pub fn contains(&self, invoice: &Invoice) -> bool {
        self.invoices.iter().any(|i| i.is_duplicate_of(invoice))
    }

    /// Stable in-place sort; equal elements keep their insertion order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Invoice, &Invoice) -> Ordering,
    {
        self.invoices.sort_by(compare);
    }

    /// Latest due date first; invoices due on the same day keep their order.
    pub fn sort_by_due_date_descending(&mut self) {
        self.sort_by(|a, b| b.due_date().cmp(&a.due_date()));
    }

    pub fn as_slice(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Invoice> {
        self.invoices.iter()
    }

    pub fn into_vec(self) -> Vec<Invoice> {
        self.invoices
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

impl<'a> IntoIterator for &'a InvoiceCollection {
    type Item = &'a Invoice;
    type IntoIter = std::slice::Iter<'a, Invoice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InvoiceBuilder;

    fn invoice(supplier: &str, number: &str, due: &str) -> Invoice {
        InvoiceBuilder::new()
            .supplier(supplier, "Supplier Oy")
            .invoice_number(number)
            .bank_account("FI2112345600000785")
            .bank_reference("13")
            .amount("10,00", None)
            .due_date(due)
            .build()
            .unwrap()
    }

    #[test]
    fn insert_rejects_same_identity() {
        let mut c = InvoiceCollection::new();
        assert_eq!(c.insert(invoice("1234567-8", "1", "20240101")), Insertion::Added);
        let dup = invoice("1234567-8", "1", "20250101");
        assert!(c.contains(&dup));
        assert!(matches!(c.insert(dup), Insertion::Duplicate(_)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn same_number_other_supplier_is_not_duplicate() {
        let mut c = InvoiceCollection::new();
        c.add(invoice("1234567-8", "1", "20240101"));
        assert!(!c.contains(&invoice("7654321-0", "1", "20240101")));
    }

    #[test]
    fn descending_sort_is_stable() {
        let mut c = InvoiceCollection::new();
        c.add(invoice("A", "1", "20240201"));
        c.add(invoice("A", "2", "20240101"));
        c.add(invoice("A", "3", "20240201"));
        c.sort_by_due_date_descending();
        let order: Vec<u64> = c.iter().map(Invoice::invoice_number).collect();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "duplicate invoice")]
    fn add_asserts_identity_in_debug_builds() {
        let mut c = InvoiceCollection::new();
        c.add(invoice("1234567-8", "1", "20240101"));
        c.add(invoice("1234567-8", "1", "20240301"));
    }
}
