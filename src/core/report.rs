//! Dashboard report generation.
//!
//! This module derives the weekly financial summary and the 7-point chart series from
//! the active transactions. Weeks run Sunday 00:00:00.000 to Saturday 23:59:59.999 in
//! the time zone of the reference date, both bounds inclusive. All functions are pure
//! and return structured data that the presentation layer formats.

use crate::models::{Transaction, TransactionKind};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

const WEEKDAY_LABELS: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];

/// Inclusive bounds of a calendar week.
#[derive(Debug, Clone)]
pub struct WeekRange<Tz: TimeZone> {
    /// Sunday at 00:00:00.000
    pub start: DateTime<Tz>,
    /// Saturday at 23:59:59.999
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> WeekRange<Tz> {
    /// Returns true if `instant` falls within the week, bounds included.
    #[must_use]
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start.with_timezone(&Utc) && *instant <= self.end.with_timezone(&Utc)
    }

    /// The seven calendar days of the week, starting on Sunday.
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        let first = self.start.date_naive();
        (0..7).map(|offset| first + TimeDelta::days(offset)).collect()
    }
}

/// Buy/sell totals for a period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeeklyStats {
    /// Sum of BUY totals
    pub total_buy: f64,
    /// Sum of SELL totals
    pub total_sell: f64,
    /// `total_sell - total_buy`
    pub profit: f64,
}

/// One point of the weekly chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    /// Calendar day in the report's time zone
    pub day: NaiveDate,
    /// Sum of BUY totals on that day
    pub buy: f64,
    /// Sum of SELL totals on that day
    pub sell: f64,
}

impl DailyPoint {
    /// Chart axis label, e.g. `"07/01"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.day.format("%d/%m").to_string()
    }
}

/// Everything the dashboard shows for one week.
#[derive(Debug, Clone)]
pub struct WeeklyReport<'a, Tz: TimeZone> {
    /// Week bounds
    pub range: WeekRange<Tz>,
    /// Totals and profit
    pub stats: WeeklyStats,
    /// Seven daily points, Sunday first
    pub series: Vec<DailyPoint>,
    /// Transactions dated within the week, in stored order
    pub transactions_in_period: Vec<&'a Transaction>,
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Tz> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Computes the week containing `reference`: the most recent Sunday at or before it,
/// at midnight, through six days later at 23:59:59.999.
#[must_use]
pub fn week_range<Tz: TimeZone>(reference: &DateTime<Tz>) -> WeekRange<Tz> {
    let tz = reference.timezone();
    let days_since_sunday = i64::from(reference.weekday().num_days_from_sunday());
    let first_day = reference.date_naive() - TimeDelta::days(days_since_sunday);

    let start = start_of_day(&tz, first_day);
    let end = start_of_day(&tz, first_day + TimeDelta::days(7)) - TimeDelta::milliseconds(1);

    WeekRange { start, end }
}

/// Transactions dated within `range`, in stored order.
#[must_use]
pub fn transactions_in_range<'a, Tz: TimeZone>(
    transactions: &'a [Transaction],
    range: &WeekRange<Tz>,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| range.contains(&t.date)).collect()
}

fn sum_kind<'a>(transactions: impl Iterator<Item = &'a Transaction>, kind: TransactionKind) -> f64 {
    transactions.filter(|t| t.kind == kind).map(|t| t.total).sum()
}

/// Totals and profit over a set of transactions.
#[must_use]
pub fn weekly_stats(transactions: &[&Transaction]) -> WeeklyStats {
    let total_buy = sum_kind(transactions.iter().copied(), TransactionKind::Buy);
    let total_sell = sum_kind(transactions.iter().copied(), TransactionKind::Sell);
    WeeklyStats {
        total_buy,
        total_sell,
        profit: total_sell - total_buy,
    }
}

/// Per-day BUY and SELL sums for each day of `range`.
///
/// A transaction belongs to the day whose calendar date (in the range's time zone)
/// matches its own.
#[must_use]
pub fn daily_series<Tz: TimeZone>(
    range: &WeekRange<Tz>,
    transactions: &[&Transaction],
) -> Vec<DailyPoint> {
    let tz = range.start.timezone();
    range
        .days()
        .into_iter()
        .map(|day| {
            let on_day = || {
                transactions
                    .iter()
                    .copied()
                    .filter(|t| t.date.with_timezone(&tz).date_naive() == day)
            };
            DailyPoint {
                day,
                buy: sum_kind(on_day(), TransactionKind::Buy),
                sell: sum_kind(on_day(), TransactionKind::Sell),
            }
        })
        .collect()
}

/// Builds the dashboard report for the week containing `reference`.
#[must_use]
pub fn weekly_report<'a, Tz: TimeZone>(
    transactions: &'a [Transaction],
    reference: &DateTime<Tz>,
) -> WeeklyReport<'a, Tz> {
    let range = week_range(reference);
    let in_period = transactions_in_range(transactions, &range);
    let stats = weekly_stats(&in_period);
    let series = daily_series(&range, &in_period);

    WeeklyReport {
        range,
        stats,
        series,
        transactions_in_period: in_period,
    }
}

/// Reference date for the dashboard, moved a week at a time.
#[derive(Debug, Clone)]
pub struct WeekCursor<Tz: TimeZone> {
    reference: DateTime<Tz>,
}

impl<Tz: TimeZone> WeekCursor<Tz> {
    /// Starts at `reference`.
    #[must_use]
    pub const fn new(reference: DateTime<Tz>) -> Self {
        Self { reference }
    }

    /// Current reference date
    #[must_use]
    pub const fn reference(&self) -> &DateTime<Tz> {
        &self.reference
    }

    /// Week containing the reference date.
    #[must_use]
    pub fn range(&self) -> WeekRange<Tz> {
        week_range(&self.reference)
    }

    /// Moves seven days back.
    pub fn previous_week(&mut self) {
        self.reference = self.reference.clone() - TimeDelta::days(7);
    }

    /// Moves seven days forward.
    pub fn next_week(&mut self) {
        self.reference = self.reference.clone() + TimeDelta::days(7);
    }

    /// Jumps back to `today`.
    pub fn reset_to(&mut self, today: DateTime<Tz>) {
        self.reference = today;
    }

    /// Jumps to noon of a picked calendar day.
    pub fn select_day(&mut self, day: NaiveDate) {
        let tz = self.reference.timezone();
        self.reference = start_of_day(&tz, day) + TimeDelta::hours(12);
    }
}

/// Formats a value as Brazilian reais, e.g. `R$ 1.234,56` or `-R$ 425,00`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Plain-text dashboard block for logs and the command line.
#[must_use]
pub fn format_weekly_summary<Tz: TimeZone>(report: &WeeklyReport<'_, Tz>) -> String {
    let mut lines = vec![
        format!(
            "Semana {} a {} ({} transações)",
            report.range.start.date_naive().format("%d/%m/%Y"),
            report.range.end.date_naive().format("%d/%m/%Y"),
            report.transactions_in_period.len()
        ),
        format!(
            "  Compras: {} | Vendas: {} | Balanço: {}",
            format_currency(report.stats.total_buy),
            format_currency(report.stats.total_sell),
            format_currency(report.stats.profit)
        ),
    ];

    for point in &report.series {
        let weekday = WEEKDAY_LABELS[point.day.weekday().num_days_from_sunday() as usize];
        lines.push(format!(
            "  {weekday} {}  compra {}  venda {}",
            point.label(),
            format_currency(point.buy),
            format_currency(point.sell)
        ));
    }

    lines.join("\n")
}
