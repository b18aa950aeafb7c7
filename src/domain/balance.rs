use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::PaymentMethod;
use crate::domain::period::Period;

/// Computed, never persisted, aggregate of movements over a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    #[serde(rename = "ingresos")]
    pub income_total: Decimal,
    #[serde(rename = "egresos")]
    pub expense_total: Decimal,
    #[serde(rename = "total")]
    pub net_total: Decimal,
    #[serde(rename = "periodo", default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(rename = "fechaInicio")]
    pub period_start: Option<DateTime<Utc>>,
    #[serde(rename = "fechaFin")]
    pub period_end: Option<DateTime<Utc>>,
    #[serde(rename = "detalleIngresos")]
    pub income_by_category: BTreeMap<String, Decimal>,
    #[serde(rename = "detalleEgresos")]
    pub expense_by_category: BTreeMap<String, Decimal>,
    /// Signed cash position per method, unaffected by category/method filters.
    #[serde(rename = "totalesPorMetodo")]
    pub totals_by_method: BTreeMap<PaymentMethod, Decimal>,
}

impl Balance {
    /// Net result as a percentage of income; zero without income.
    pub fn profit_margin(&self) -> Decimal {
        percent_of(self.net_total, self.income_total)
    }

    /// Each income category as a percentage of total income.
    pub fn income_percentages(&self) -> BTreeMap<String, Decimal> {
        self.income_by_category
            .iter()
            .map(|(category, amount)| (category.clone(), percent_of(*amount, self.income_total)))
            .collect()
    }

    /// Each expense category as a percentage of total expenses.
    pub fn expense_percentages(&self) -> BTreeMap<String, Decimal> {
        self.expense_by_category
            .iter()
            .map(|(category, amount)| (category.clone(), percent_of(*amount, self.expense_total)))
            .collect()
    }

    pub fn method_total(&self, method: PaymentMethod) -> Decimal {
        self.totals_by_method
            .get(&method)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// One point of the per-day chart series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTotals {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "ingresos")]
    pub income: Decimal,
    #[serde(rename = "egresos")]
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Zero when `whole` is zero; saturates at the decimal range instead of overflowing.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            if part.is_sign_negative() != whole.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(income: i64, expense: i64) -> Balance {
        Balance {
            income_total: Decimal::from(income),
            expense_total: Decimal::from(expense),
            net_total: Decimal::from(income - expense),
            period: None,
            period_start: None,
            period_end: None,
            income_by_category: BTreeMap::new(),
            expense_by_category: BTreeMap::new(),
            totals_by_method: BTreeMap::new(),
        }
    }

    #[test]
    fn margin_is_zero_without_income() {
        let empty = balance(0, 150);
        assert_eq!(empty.profit_margin(), Decimal::ZERO);
        assert!(empty.income_percentages().is_empty());
    }

    #[test]
    fn margin_uses_net_over_income() {
        let mut b = balance(1000, 250);
        b.income_by_category
            .insert("Renta de Generadores".into(), Decimal::from(1000));
        assert_eq!(b.profit_margin(), Decimal::from(75));
        assert_eq!(
            b.income_percentages()["Renta de Generadores"],
            Decimal::ONE_HUNDRED
        );
    }

    #[test]
    fn expense_categories_are_shares_of_expenses() {
        let mut b = balance(1000, 250);
        b.expense_by_category
            .insert("Combustible".into(), Decimal::from(250));
        assert_eq!(b.expense_percentages()["Combustible"], Decimal::ONE_HUNDRED);

        let mut none = balance(1000, 0);
        none.expense_by_category
            .insert("Combustible".into(), Decimal::ZERO);
        assert_eq!(none.expense_percentages()["Combustible"], Decimal::ZERO);
    }

    #[test]
    fn tiny_income_against_huge_expense_saturates() {
        let income = Decimal::new(1, 4);
        let expense = Decimal::from_i128_with_scale(100_000_000_000_000_000_000_000, 0);
        let b = Balance {
            income_total: income,
            expense_total: expense,
            net_total: income - expense,
            income_by_category: BTreeMap::from([("Renta de Generadores".into(), income)]),
            expense_by_category: BTreeMap::from([("Combustible".into(), expense)]),
            ..balance(0, 0)
        };
        assert_eq!(b.profit_margin(), Decimal::MIN);
        assert_eq!(b.expense_percentages()["Combustible"], Decimal::ONE_HUNDRED);
        assert_eq!(b.income_percentages()["Renta de Generadores"], Decimal::ONE_HUNDRED);
        assert_eq!(percent_of(expense, income), Decimal::MAX);
    }
}
