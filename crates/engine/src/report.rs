//! Settlement exports.
//!
//! The text report is deterministic: fixed field order, amounts rounded
//! half-up to two decimals, members listed in event order. The generation
//! timestamp is only printed when the caller supplies one.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::Writer;
use serde::Serialize;

use crate::{
    Currency, EngineError, Event, ResultEngine, SettlementPlan, Totals,
    settlement::settlement_plan,
};

/// Everything a settlement export needs, computed once from an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub event: String,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub totals: Totals,
    pub settlement: SettlementPlan,
}

impl Report {
    pub fn new(event: &Event) -> Self {
        let snapshot = event.snapshot();
        Self {
            event: event.name.clone(),
            currency: event.currency,
            generated_at: None,
            totals: Totals::compute(snapshot),
            settlement: settlement_plan(snapshot),
        }
    }

    #[must_use]
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Plain-text report, see the `Display` implementation.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Settlement plan as CSV with a `member,direction,amount` header.
    pub fn to_csv(&self) -> ResultEngine<Vec<u8>> {
        #[derive(Serialize)]
        struct ExportRow<'a> {
            member: &'a str,
            direction: &'static str,
            amount: String,
        }

        let rows = self
            .settlement
            .to_contribute
            .iter()
            .map(|line| (line, "contribute"))
            .chain(
                self.settlement
                    .to_reimburse
                    .iter()
                    .map(|line| (line, "reimburse")),
            );

        let mut writer = Writer::from_writer(vec![]);
        for (line, direction) in rows {
            writer.serialize(ExportRow {
                member: &line.member,
                direction,
                amount: line.amount.to_string(),
            })?;
        }

        writer
            .into_inner()
            .map_err(|err| EngineError::Csv(err.into_error().into()))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = |amount: crate::Money| amount.format(self.currency);

        writeln!(f, "SETTLEMENT REPORT")?;
        writeln!(f, "Event: {}", self.event)?;
        if let Some(at) = self.generated_at {
            writeln!(f, "Generated: {}", at.to_rfc3339_opts(SecondsFormat::Secs, true))?;
        }
        writeln!(f)?;

        writeln!(f, "SUMMARY")?;
        writeln!(f, "Total Expenses: {}", money(self.totals.total_expenses))?;
        writeln!(
            f,
            "Reimbursable Expenses: {}",
            money(self.totals.reimbursable_expenses)
        )?;
        writeln!(f, "Treasury Donations: {}", money(self.totals.total_donations))?;
        writeln!(f, "Direct Donations: {}", money(self.totals.direct_contributions))?;
        writeln!(
            f,
            "Share per Contributing Member: {}",
            money(self.totals.share_per_person)
        )?;

        if self.settlement.is_settled() {
            writeln!(f)?;
            return writeln!(f, "Everyone is settled up!");
        }

        if !self.settlement.to_contribute.is_empty() {
            writeln!(f)?;
            writeln!(f, "CONTRIBUTE TO TREASURY:")?;
            for line in &self.settlement.to_contribute {
                writeln!(f, "{}: {}", line.member, money(line.amount))?;
            }
        }

        if !self.settlement.to_reimburse.is_empty() {
            writeln!(f)?;
            writeln!(f, "REIMBURSE FROM TREASURY:")?;
            for line in &self.settlement.to_reimburse {
                writeln!(f, "{}: {}", line.member, money(line.amount))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{MemberType, Money, NewExpense};

    fn dinner_event() -> Event {
        let mut event = Event::new("Camping").unwrap();
        event.add_member("Alice", MemberType::Contributing).unwrap();
        event.add_member("Bob", MemberType::Contributing).unwrap();
        event
            .add_expense(NewExpense::new("Dinner", Money::from_cents(10_000), "Alice"))
            .unwrap();
        event
            .add_expense(NewExpense::new("Taxi", Money::from_cents(5000), "Bob"))
            .unwrap();
        event
    }

    #[test]
    fn text_report_has_fixed_layout() {
        let at = Utc.with_ymd_and_hms(2025, 7, 24, 18, 30, 0).unwrap();
        let text = Report::new(&dinner_event()).generated_at(at).to_text();

        let expected = "\
SETTLEMENT REPORT
Event: Camping
Generated: 2025-07-24T18:30:00Z

SUMMARY
Total Expenses: $150.00
Reimbursable Expenses: $150.00
Treasury Donations: $0.00
Direct Donations: $0.00
Share per Contributing Member: $75.00

CONTRIBUTE TO TREASURY:
Bob: $25.00

REIMBURSE FROM TREASURY:
Alice: $25.00
";
        assert_eq!(text, expected);
    }

    #[test]
    fn settled_event_says_so() {
        let mut event = Event::new("Quiet").unwrap();
        event.add_member("Alice", MemberType::Contributing).unwrap();
        let text = Report::new(&event).to_text();
        assert!(text.ends_with("\nEveryone is settled up!\n"));
        assert!(!text.contains("Generated:"));
        assert!(!text.contains("TREASURY:"));
    }

    #[test]
    fn amounts_use_the_event_currency() {
        let event = dinner_event().with_currency(Currency::Eur);
        let text = Report::new(&event).to_text();
        assert!(text.contains("Share per Contributing Member: €75.00\n"));
        assert!(text.contains("Bob: €25.00\n"));
    }

    #[test]
    fn report_is_deterministic() {
        let event = dinner_event();
        assert_eq!(Report::new(&event).to_text(), Report::new(&event).to_text());
    }

    #[test]
    fn csv_lists_contributions_then_reimbursements() {
        let csv = Report::new(&dinner_event()).to_csv().unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert_eq!(
            csv,
            "member,direction,amount\nBob,contribute,25.00\nAlice,reimburse,25.00\n"
        );
    }
}
