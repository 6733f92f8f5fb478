use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Cost and revenue of a set of tasks. `total = cost + revenue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total: Decimal,
    pub cost: Decimal,
    pub revenue: Decimal,
}

impl Totals {
    /// `None` when the total is not representable.
    pub(crate) fn from_parts(cost: Decimal, revenue: Decimal) -> Option<Self> {
        Some(Totals {
            total: cost.checked_add(revenue)?,
            cost,
            revenue,
        })
    }
}

/// Cash-flow totals of a project's transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub revenue: Decimal,
}

/// Earliest and latest known dates of a project. Both are `None` only when
/// nothing dated exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}

impl DateRange {
    pub(crate) fn include(&mut self, value: NaiveDateTime) {
        self.first = Some(self.first.map_or(value, |first| first.min(value)));
        self.last = Some(self.last.map_or(value, |last| last.max(value)));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub dates: DateRange,
    /// Planned figures from the budget's tasks.
    pub budget: Totals,
    pub tx: TxTotals,
    /// Realized figures from live tasks that have dones.
    pub proj: Totals,
}
