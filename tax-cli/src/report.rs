//! Text rendering of a liability breakdown and the slab table.

use std::fmt::Write;

use rust_decimal::Decimal;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};
use tax_core::{RegimeConfig, TaxBracket, TaxCalculation};

use crate::utils::{format_inr, format_rate};

/// Row for the installment table output
#[derive(Debug, Clone, Tabled)]
struct InstallmentRow {
    #[tabled(rename = "Due Date")]
    due_date: String,

    #[tabled(rename = "%")]
    percentage: String,

    #[tabled(rename = "Amount")]
    amount: String,

    #[tabled(rename = "Cumulative")]
    cumulative: String,
}

/// Row for the slab table output
#[derive(Debug, Clone, Tabled)]
struct SlabRow {
    #[tabled(rename = "Total Income")]
    range: String,

    #[tabled(rename = "Rate")]
    rate: String,
}

fn line(
    out: &mut String,
    label: &str,
    value: String,
) {
    let _ = writeln!(out, "{label:<28}{value:>16}");
}

/// Summary lines, one figure per line. Zero-valued adjustments are omitted.
pub fn render_summary(calc: &TaxCalculation) -> String {
    let mut out = String::new();

    line(&mut out, "Gross Total Income", format_inr(calc.gross_total_income));
    if !calc.standard_deduction.is_zero() {
        line(
            &mut out,
            "Standard Deduction",
            format!("- {}", format_inr(calc.standard_deduction)),
        );
    }
    line(&mut out, "Total Income", format_inr(calc.total_income));
    if !calc.marginal_relief.is_zero() {
        line(
            &mut out,
            "Marginal Relief",
            format!("- {}", format_inr(calc.marginal_relief)),
        );
    }
    line(&mut out, "Tax Before Rebate", format_inr(calc.tax_before_rebate));
    if !calc.rebate_u87a.is_zero() {
        line(
            &mut out,
            "Rebate u/s 87A",
            format!("- {}", format_inr(calc.rebate_u87a)),
        );
    }
    if !calc.surcharge.is_zero() {
        line(&mut out, "Surcharge", format!("+ {}", format_inr(calc.surcharge)));
    }
    line(
        &mut out,
        "Health & Education Cess",
        format!("+ {}", format_inr(calc.cess)),
    );
    line(&mut out, "Total Tax Liability", format_inr(calc.total_tax));

    out
}

/// The advance-tax schedule as a table.
pub fn render_installments(calc: &TaxCalculation) -> String {
    let rows: Vec<InstallmentRow> = calc
        .installments
        .iter()
        .map(|i| InstallmentRow {
            due_date: i.due_date_label.clone(),
            percentage: format!("{}%", i.cumulative_percentage),
            amount: format_inr(i.amount),
            cumulative: format_inr(i.cumulative_amount),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// Notices shown beneath the schedule.
pub fn render_notices(calc: &TaxCalculation) -> Vec<&'static str> {
    let mut notices = Vec::new();
    if !calc.has_liability() {
        notices.push("No advance tax liability.");
    }
    if calc.rebate_zeroed_tax() {
        notices.push("Rebate u/s 87A applied: total income is within the rebate limit.");
    }
    notices
}

/// Full report: header, summary, installment table and notices.
pub fn render_report(
    title: &str,
    config: &RegimeConfig,
    calc: &TaxCalculation,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{title} (FY {} / AY {}, new regime)",
        config.financial_year, config.assessment_year
    );
    let _ = writeln!(out);
    out.push_str(&render_summary(calc));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_installments(calc));
    for notice in render_notices(calc) {
        let _ = writeln!(out, "{notice}");
    }
    out
}

fn slab_range(bracket: &TaxBracket) -> String {
    if bracket.min_income.is_zero() {
        return match bracket.max_income {
            Some(max) => format!("Up to {}", format_inr(max)),
            None => "Any amount".to_string(),
        };
    }

    match bracket.max_income {
        Some(max) => format!(
            "{} - {}",
            format_inr(bracket.min_income + Decimal::ONE),
            format_inr(max)
        ),
        None => format!("Above {}", format_inr(bracket.min_income)),
    }
}

/// The bracket table with its rebate footnote.
pub fn render_slabs(config: &RegimeConfig) -> String {
    let rows: Vec<SlabRow> = config
        .brackets
        .iter()
        .map(|b| SlabRow {
            range: slab_range(b),
            rate: format_rate(b.tax_rate),
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Tax slab rates (new regime FY {})",
        config.financial_year
    );
    let _ = writeln!(
        out,
        "{}",
        Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
    );
    let _ = writeln!(
        out,
        "* Rebate u/s 87A: if total income is at most {}, tax is NIL (rebate up to {})",
        format_inr(config.rebate_income_limit),
        format_inr(config.rebate_max)
    );
    out
}
