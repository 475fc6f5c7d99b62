//! Advance-tax installment schedule.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, round_to_rupee};
use crate::{Installment, InstallmentDue};

/// Splits `total_tax` across the statutory due dates.
///
/// Each cumulative figure is rounded from the running total on its own rather
/// than from the sum of earlier payments. The final installment takes whatever
/// remains, so the last cumulative always equals `total_tax` exactly.
pub fn build_installments(
    schedule: &[InstallmentDue],
    total_tax: Decimal,
) -> Vec<Installment> {
    let last_index = schedule.len().saturating_sub(1);
    let mut previous_cumulative = Decimal::ZERO;

    schedule
        .iter()
        .enumerate()
        .map(|(index, due)| {
            let cumulative_amount = if index == last_index {
                total_tax
            } else {
                round_to_rupee(percent_of(total_tax, due.cumulative_percentage))
            };
            let amount = cumulative_amount - previous_cumulative;
            previous_cumulative = cumulative_amount;

            Installment {
                due_date_label: due.due_date_label.clone(),
                cumulative_percentage: due.cumulative_percentage,
                amount,
                cumulative_amount,
            }
        })
        .collect()
}
