use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;

use crate::core::services::CreditNoteService;
use crate::domain::{
    balance::{Balance, DailyTotals},
    common::{Direction, PaymentMethod},
    movement::Movement,
    period::{DateWindow, Period},
};

/// Optional equality filters narrowing the category view of a balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceFilter {
    pub category: Option<String>,
    pub method: Option<PaymentMethod>,
}

impl BalanceFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            method: None,
        }
    }

    pub fn method(method: PaymentMethod) -> Self {
        Self {
            category: None,
            method: Some(method),
        }
    }

    pub fn matches(&self, movement: &Movement) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| movement.category == category)
            && self.method.map_or(true, |method| movement.method == method)
    }
}

pub struct BalanceService;

impl BalanceService {
    /// Aggregates `movements` inside `window`. Income is measured by effective
    /// amount, credited against the whole log. Per-method cash totals honour
    /// the window only, never the filter.
    pub fn compute_balance(
        movements: &[Movement],
        window: &DateWindow,
        filter: &BalanceFilter,
    ) -> Balance {
        let credits = CreditNoteService::credits_by_payment(movements);
        let mut income_total = Decimal::ZERO;
        let mut expense_total = Decimal::ZERO;
        let mut income_by_category = BTreeMap::new();
        let mut expense_by_category = BTreeMap::new();
        let mut totals_by_method = BTreeMap::new();

        for movement in movements.iter().filter(|m| window.contains(m.date)) {
            let amount = CreditNoteService::effective_amount_indexed(movement, &credits);
            *totals_by_method
                .entry(movement.method)
                .or_insert(Decimal::ZERO) += amount * movement.direction.sign();

            if !filter.matches(movement) {
                continue;
            }
            let (total, breakdown) = match movement.direction {
                Direction::Income => (&mut income_total, &mut income_by_category),
                Direction::Expense => (&mut expense_total, &mut expense_by_category),
            };
            *total += amount;
            *breakdown
                .entry(movement.category.clone())
                .or_insert(Decimal::ZERO) += amount;
        }

        Balance {
            income_total,
            expense_total,
            net_total: income_total - expense_total,
            period: None,
            period_start: window.start,
            period_end: window.end,
            income_by_category,
            expense_by_category,
            totals_by_method,
        }
    }

    /// Resolves `period` against `now` and aggregates over it.
    pub fn compute_for_period(
        movements: &[Movement],
        period: Period,
        now: DateTime<FixedOffset>,
        filter: &BalanceFilter,
    ) -> Balance {
        let window = period.window(now);
        let mut balance = Self::compute_balance(movements, &window, filter);
        balance.period = Some(period);
        balance
    }

    /// Per-day income, expense and net over a bounded window, days taken in `offset`.
    /// Unbounded windows yield no points.
    pub fn daily_series(
        movements: &[Movement],
        window: &DateWindow,
        offset: FixedOffset,
    ) -> Vec<DailyTotals> {
        let credits = CreditNoteService::credits_by_payment(movements);
        let mut per_day: HashMap<NaiveDate, (Decimal, Decimal)> = HashMap::new();
        for movement in movements.iter().filter(|m| window.contains(m.date)) {
            let amount = CreditNoteService::effective_amount_indexed(movement, &credits);
            let day = movement.date.with_timezone(&offset).date_naive();
            let entry = per_day.entry(day).or_insert((Decimal::ZERO, Decimal::ZERO));
            match movement.direction {
                Direction::Income => entry.0 += amount,
                Direction::Expense => entry.1 += amount,
            }
        }

        window
            .days(offset)
            .into_iter()
            .map(|date| {
                let (income, expense) = per_day
                    .get(&date)
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                DailyTotals {
                    date,
                    income,
                    expense,
                    balance: income - expense,
                }
            })
            .collect()
    }
}
