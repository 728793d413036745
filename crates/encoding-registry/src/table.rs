//! Encoding Tables
//!
//! One table per categorical attribute. Entries are listed in form display
//! order; codes follow the training data's original encoding. Every table is
//! checked at compile time for distinct labels, distinct codes and codes
//! inside the documented range.

use serde::Serialize;

/// A single label and the code it encodes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelCode {
    pub label: &'static str,
    pub code: i64,
}

/// Label-to-code table for one categorical attribute
#[derive(Debug, Clone, Copy)]
pub struct EncodingTable {
    entries: &'static [LabelCode],
    min_code: i64,
    max_code: i64,
}

impl EncodingTable {
    const fn new(entries: &'static [LabelCode], min_code: i64, max_code: i64) -> Self {
        Self {
            entries,
            min_code,
            max_code,
        }
    }

    /// Look up the code for a label
    pub fn code_for(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.code)
    }

    /// Labels in display order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|entry| entry.label)
    }

    /// All entries in display order
    pub fn entries(&self) -> &'static [LabelCode] {
        self.entries
    }

    /// Documented inclusive code range
    pub fn code_range(&self) -> (i64, i64) {
        (self.min_code, self.max_code)
    }

    /// First label in display order (the form default)
    pub fn default_label(&self) -> &'static str {
        self.entries[0].label
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no labels
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels and codes pairwise distinct, codes within range, no empty label
    pub const fn is_well_formed(&self) -> bool {
        if self.entries.is_empty() || self.min_code > self.max_code {
            return false;
        }

        let mut i = 0;
        while i < self.entries.len() {
            let entry = &self.entries[i];
            if entry.label.is_empty() || entry.code < self.min_code || entry.code > self.max_code {
                return false;
            }

            let mut j = i + 1;
            while j < self.entries.len() {
                let other = &self.entries[j];
                if other.code == entry.code || str_eq(other.label, entry.label) {
                    return false;
                }
                j += 1;
            }
            i += 1;
        }
        true
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn entry(label: &'static str, code: i64) -> LabelCode {
    LabelCode { label, code }
}

pub(crate) const ACCOUNT_BALANCE: EncodingTable = EncodingTable::new(
    &[
        entry("No checking account", 1),
        entry("Negative balance (< 0 DM)", 2),
        entry("Balance 0 - 200 DM", 3),
        entry("Balance > 200 DM", 4),
    ],
    1,
    4,
);

pub(crate) const PAYMENT_STATUS: EncodingTable = EncodingTable::new(
    &[
        entry("All credits paid back duly", 4),
        entry("Existing credits paid back duly at this bank", 3),
        entry("Existing credits paid back duly elsewhere", 2),
        entry("Critical account / credits at other banks", 1),
        entry("Delay in paying off in the past", 0),
    ],
    0,
    4,
);

// Code 7 never occurs in the training data.
pub(crate) const PURPOSE: EncodingTable = EncodingTable::new(
    &[
        entry("New car", 0),
        entry("Used car", 1),
        entry("Furniture/equipment", 2),
        entry("Radio/television", 3),
        entry("Domestic appliances", 4),
        entry("Repairs", 5),
        entry("Education", 6),
        entry("Retraining", 8),
        entry("Business", 9),
        entry("Other", 10),
    ],
    0,
    10,
);

pub(crate) const SAVINGS: EncodingTable = EncodingTable::new(
    &[
        entry("No savings", 1),
        entry("< 100 DM", 2),
        entry("100 - 500 DM", 3),
        entry("500 - 1000 DM", 4),
        entry("> 1000 DM", 5),
    ],
    1,
    5,
);

pub(crate) const EMPLOYMENT: EncodingTable = EncodingTable::new(
    &[
        entry("Unemployed", 1),
        entry("< 1 year", 2),
        entry("1 - 4 years", 3),
        entry("4 - 7 years", 4),
        entry("> 7 years", 5),
    ],
    1,
    5,
);

pub(crate) const SEX_MARITAL_STATUS: EncodingTable = EncodingTable::new(
    &[
        entry("Male : single", 3),
        entry("Male : married/widowed", 4),
        entry("Male : divorced/separated", 1),
        entry("Female : divorced/separated/married", 2),
    ],
    1,
    4,
);

pub(crate) const GUARANTORS: EncodingTable = EncodingTable::new(
    &[
        entry("None", 1),
        entry("Co-applicant", 2),
        entry("Guarantor", 3),
    ],
    1,
    3,
);

pub(crate) const MOST_VALUABLE_ASSET: EncodingTable = EncodingTable::new(
    &[
        entry("Real estate", 4),
        entry("Life insurance / building society savings", 3),
        entry("Car or other", 2),
        entry("Unknown / no property", 1),
    ],
    1,
    4,
);

pub(crate) const CONCURRENT_CREDITS: EncodingTable = EncodingTable::new(
    &[
        entry("None", 3),
        entry("At other banks", 2),
        entry("At stores", 1),
    ],
    1,
    3,
);

pub(crate) const APARTMENT: EncodingTable = EncodingTable::new(
    &[
        entry("Rented", 1),
        entry("Owned", 2),
        entry("Free (living with family)", 3),
    ],
    1,
    3,
);

pub(crate) const OCCUPATION: EncodingTable = EncodingTable::new(
    &[
        entry("Management / self-employed / highly qualified", 4),
        entry("Skilled employee / official", 3),
        entry("Unskilled - resident", 2),
        entry("Unskilled - non-resident", 1),
    ],
    1,
    4,
);

pub(crate) const TELEPHONE: EncodingTable = EncodingTable::new(
    &[
        entry("None", 1),
        entry("Yes, registered under the customer's name", 2),
    ],
    1,
    2,
);

pub(crate) const FOREIGN_WORKER: EncodingTable =
    EncodingTable::new(&[entry("Yes", 1), entry("No", 2)], 1, 2);

const _: () = assert!(ACCOUNT_BALANCE.is_well_formed(), "Account_Balance table");
const _: () = assert!(PAYMENT_STATUS.is_well_formed(), "Payment_Status_of_Previous_Credit table");
const _: () = assert!(PURPOSE.is_well_formed(), "Purpose table");
const _: () = assert!(SAVINGS.is_well_formed(), "Value_Savings_Stocks table");
const _: () = assert!(EMPLOYMENT.is_well_formed(), "Length_of_current_employment table");
const _: () = assert!(SEX_MARITAL_STATUS.is_well_formed(), "Sex_Marital_Status table");
const _: () = assert!(GUARANTORS.is_well_formed(), "Guarantors table");
const _: () = assert!(MOST_VALUABLE_ASSET.is_well_formed(), "Most_valuable_available_asset table");
const _: () = assert!(CONCURRENT_CREDITS.is_well_formed(), "Concurrent_Credits table");
const _: () = assert!(APARTMENT.is_well_formed(), "Type_of_apartment table");
const _: () = assert!(OCCUPATION.is_well_formed(), "Occupation table");
const _: () = assert!(TELEPHONE.is_well_formed(), "Telephone table");
const _: () = assert!(FOREIGN_WORKER.is_well_formed(), "Foreign_Worker table");
