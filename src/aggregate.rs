//! Two-level aggregation: (period, specification) → totals.
//!
//! A `BTreeMap` keyed on the pair gives the required ordering for free:
//! ascending period (lexicographic `YYYY-MM` is chronological) then ascending
//! specification. Rows without a period cannot be bucketed and are dropped.

use crate::schema::ReportSchema;
use crate::types::{NormalizedRow, SummaryRow, SummaryTable};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

pub fn aggregate(rows: &[NormalizedRow], schema: &ReportSchema) -> SummaryTable {
    let mut groups: BTreeMap<(String, String), SummaryRow> = BTreeMap::new();

    for row in rows {
        let Some(period) = row.period.clone() else {
            continue;
        };
        match groups.entry((period, row.specification.clone())) {
            Entry::Vacant(slot) => {
                let (period, specification) = slot.key().clone();
                slot.insert(SummaryRow {
                    period,
                    specification,
                    unit: row.unit.clone(),
                    quantity: row.quantity,
                    amount: row.amount,
                });
            }
            Entry::Occupied(mut slot) => {
                let group = slot.get_mut();
                group.quantity += row.quantity;
                group.amount += row.amount;
                // first non-absent unit wins, never recomputed afterwards
                if group.unit.is_none() {
                    group.unit = row.unit.clone();
                }
            }
        }
    }

    SummaryTable {
        has_unit: schema.unit.is_some(),
        has_quantity: schema.quantity.is_some(),
        has_amount: schema.amount.is_some(),
        rows: groups.into_values().collect(),
    }
}
