// src/process/columns.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

/// Categorical code column (1 = male, 2 = female).
pub const GROUP_CODE_COLUMN: &str = "X2";

/// Column added by relabeling; holds the human-readable group name.
pub const GROUP_LABEL_COLUMN: &str = "Sex";

/// Monthly bill statements X12..X17 followed by payments X18..X23.
pub const NUMERIC_COLUMNS: [&str; 12] = [
    "X12", "X13", "X14", "X15", "X16", "X17", "X18", "X19", "X20", "X21", "X22", "X23",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measure {
    BillStatement,
    AmountPaid,
}

impl Measure {
    pub fn label(&self) -> &'static str {
        match self {
            Measure::BillStatement => "Bill Statement",
            Measure::AmountPaid => "Amount Paid",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a numeric column sits in the long-format series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnInfo {
    pub date: NaiveDate,
    pub measure: Measure,
}

// (column, month of 2005, measure); X12/X18 are September, X17/X23 April.
const COLUMN_LAYOUT: [(&str, u32, Measure); 12] = [
    ("X12", 9, Measure::BillStatement),
    ("X13", 8, Measure::BillStatement),
    ("X14", 7, Measure::BillStatement),
    ("X15", 6, Measure::BillStatement),
    ("X16", 5, Measure::BillStatement),
    ("X17", 4, Measure::BillStatement),
    ("X18", 9, Measure::AmountPaid),
    ("X19", 8, Measure::AmountPaid),
    ("X20", 7, Measure::AmountPaid),
    ("X21", 6, Measure::AmountPaid),
    ("X22", 5, Measure::AmountPaid),
    ("X23", 4, Measure::AmountPaid),
];

const LAYOUT_YEAR: i32 = 2005;

static COLUMN_METADATA: Lazy<BTreeMap<&'static str, ColumnInfo>> = Lazy::new(|| {
    COLUMN_LAYOUT
        .iter()
        .map(|&(name, month, measure)| {
            let date = NaiveDate::from_ymd_opt(LAYOUT_YEAR, month, 1)
                .expect("layout months are valid calendar months");
            (name, ColumnInfo { date, measure })
        })
        .collect()
});

/// Look up the (date, measure) pair for a numeric column.
pub fn column_info(name: &str) -> Option<ColumnInfo> {
    COLUMN_METADATA.get(name).copied()
}
