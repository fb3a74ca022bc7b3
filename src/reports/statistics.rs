//! Spending statistics
//!
//! Totals per category over an inclusive date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Category, Expense, Money};

/// Aggregated spending over a date range
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// First day covered; the earliest expense when the range was open
    pub range_start: NaiveDate,
    /// Last day covered (inclusive)
    pub range_end: NaiveDate,
    /// Only categories with at least one expense appear
    pub totals_by_category: BTreeMap<Category, Money>,
    pub grand_total: Money,
    pub expense_count: usize,
}

impl Statistics {
    /// Aggregate `expenses` whose date lies in `[start, end]`
    ///
    /// An open start covers all time, an open end stops at `today`.
    pub fn compute<'a, I>(
        expenses: I,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> PennywiseResult<Self>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let range_end = end.unwrap_or(today);
        let lower = start.unwrap_or(NaiveDate::MIN);
        if range_end < lower {
            return Err(PennywiseError::InvalidRange {
                start: lower,
                end: range_end,
            });
        }

        let mut totals_by_category: BTreeMap<Category, Money> = BTreeMap::new();
        let mut grand_total = Money::zero();
        let mut expense_count = 0;
        let mut earliest: Option<NaiveDate> = None;

        for expense in expenses {
            let date = expense.timestamp.date();
            if date < lower || date > range_end {
                continue;
            }
            *totals_by_category.entry(expense.category).or_insert_with(Money::zero) += expense.price;
            grand_total += expense.price;
            expense_count += 1;
            earliest = Some(earliest.map_or(date, |d| d.min(date)));
        }

        Ok(Self {
            range_start: start.or(earliest).unwrap_or(range_end),
            range_end,
            totals_by_category,
            grand_total,
            expense_count,
        })
    }

    /// Total for one category; zero when it has no expenses
    pub fn total_for(&self, category: Category) -> Money {
        self.totals_by_category
            .get(&category)
            .copied()
            .unwrap_or_else(Money::zero)
    }

    /// Share of the grand total spent on `category`, in percent
    pub fn share_of(&self, category: Category) -> f64 {
        self.total_for(category).percent_of(self.grand_total)
    }

    /// Categories ordered by amount spent, largest first
    pub fn top_categories(&self) -> Vec<(Category, Money)> {
        let mut ranked: Vec<_> = self
            .totals_by_category
            .iter()
            .map(|(c, m)| (*c, *m))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut output = format!(
            "Statistics: {} to {}\n",
            self.range_start.format("%Y-%m-%d"),
            self.range_end.format("%Y-%m-%d")
        );
        output.push_str(&"=".repeat(44));
        output.push('\n');

        if self.expense_count == 0 {
            output.push_str("No expenses in this range.\n");
            return output;
        }

        for (category, total) in self.top_categories() {
            output.push_str(&format!(
                "{:<16} {:>12} {:>7.1}%\n",
                category,
                total,
                self.share_of(category)
            ));
        }
        output.push_str(&"-".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>12} ({} expenses)\n",
            "Total", self.grand_total, self.expense_count
        ));
        output
    }
}
