//! CSV projection of a reconciled period summary.
//!
//! The projector is a pure function of the summary shape produced by the
//! arrears engine; it computes nothing itself. One row per item, columns
//! `department_number, charge_amount, paid_amount, status`, every field
//! double-quoted (embedded quotes doubled by the csv writer).

use crate::{error::AppError, models::billing_period::PeriodSummary};
use csv::{QuoteStyle, WriterBuilder};

/// File name for a period's CSV export, month zero-padded.
pub fn csv_filename(year: i32, month: i32) -> String {
    format!("gastos_comunes_{year}_{month:02}.csv")
}

/// Render a period summary as CSV bytes.
pub fn period_summary_csv(summary: &PeriodSummary) -> Result<Vec<u8>, AppError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(["department_number", "charge_amount", "paid_amount", "status"])
        .map_err(|e| AppError::InvalidRequest(format!("CSV write failed: {e}")))?;

    for item in &summary.items {
        writer
            .write_record([
                item.department_number.as_str(),
                &item.charge_amount.to_string(),
                &item.paid_amount.to_string(),
                item.status.as_str(),
            ])
            .map_err(|e| AppError::InvalidRequest(format!("CSV write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InvalidRequest(format!("CSV write failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::billing_period::{ChargeStatus, PeriodSummaryItem};
    use uuid::Uuid;

    fn summary_with_items(items: Vec<PeriodSummaryItem>) -> PeriodSummary {
        PeriodSummary {
            id: Uuid::new_v4(),
            building_id: Uuid::new_v4(),
            year: 2025,
            month: 3,
            status: "open".to_string(),
            amount: 60000,
            items,
        }
    }

    fn item(number: &str, charge: i64, paid: i64, status: ChargeStatus) -> PeriodSummaryItem {
        PeriodSummaryItem {
            department_id: Uuid::new_v4(),
            department_number: number.to_string(),
            charge_amount: charge,
            paid_amount: paid,
            status,
        }
    }

    #[test]
    fn filename_zero_pads_month() {
        assert_eq!(csv_filename(2025, 3), "gastos_comunes_2025_03.csv");
        assert_eq!(csv_filename(2024, 12), "gastos_comunes_2024_12.csv");
    }

    #[test]
    fn every_field_is_quoted() {
        let summary = summary_with_items(vec![
            item("101", 60000, 60000, ChargeStatus::Paid),
            item("102", 60000, 30000, ChargeStatus::Partial),
        ]);

        let bytes = period_summary_csv(&summary).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "\"department_number\",\"charge_amount\",\"paid_amount\",\"status\""
        );
        assert_eq!(lines.next().unwrap(), "\"101\",\"60000\",\"60000\",\"paid\"");
        assert_eq!(lines.next().unwrap(), "\"102\",\"60000\",\"30000\",\"partial\"");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let summary = summary_with_items(vec![item(
            "A-\"norte\"",
            45000,
            0,
            ChargeStatus::Unpaid,
        )]);

        let bytes = period_summary_csv(&summary).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\"A-\"\"norte\"\"\""));
    }

    #[test]
    fn empty_summary_yields_header_only() {
        let summary = summary_with_items(vec![]);

        let bytes = period_summary_csv(&summary).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text.lines().count(), 1);
    }
}
