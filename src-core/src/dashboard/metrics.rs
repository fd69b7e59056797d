//! Display values derived from the dashboard aggregate.

use chrono::{DateTime, NaiveDateTime};

use crate::api::{DashboardAggregate, OptimizationRecord};

/// Maximum number of history entries plotted in the energy chart.
pub const CHART_LIMIT: usize = 10;

/// One headline figure on the overview page.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// The four headline figures, in display order. Without an aggregate
/// (nothing fetched yet) every value is zero.
pub fn kpi_cards(aggregate: Option<&DashboardAggregate>) -> [Kpi; 4] {
    let (count, kwh, co2, eur) = aggregate
        .map(|a| (a.total_optimizations, a.total_kwh_saved, a.total_co2_saved, a.total_eur_saved))
        .unwrap_or_default();

    [
        Kpi {
            label: "Total Optimizations",
            value: count.to_string(),
            unit: "",
        },
        Kpi {
            label: "Energy Saved",
            value: format!("{:.2}", kwh),
            unit: "kWh",
        },
        Kpi {
            label: "CO\u{2082} Reduced",
            value: format!("{:.2}", co2),
            unit: "kg",
        },
        Kpi {
            label: "Cost Saved",
            value: format!("{:.2}", eur),
            unit: "EUR",
        },
    ]
}

/// A before/after bar pair in the energy chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub before: f64,
    pub after: f64,
}

/// Chart series for the most recent optimizations, oldest first.
///
/// History arrives newest first; the first [`CHART_LIMIT`] records are
/// taken and reversed so bars read left to right in time.
pub fn energy_chart_series(history: &[OptimizationRecord]) -> Vec<ChartPoint> {
    history
        .iter()
        .take(CHART_LIMIT)
        .rev()
        .map(|r| ChartPoint {
            label: base_name(&r.filename).to_string(),
            before: r.energy_before,
            after: r.energy_after,
        })
        .collect()
}

/// Largest value in the series, for scaling bars. Never below 1.
pub fn chart_max(series: &[ChartPoint]) -> f64 {
    series
        .iter()
        .flat_map(|p| [p.before, p.after])
        .filter(|v| v.is_finite())
        .fold(1.0, f64::max)
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

impl OptimizationRecord {
    /// Calendar date of the record, `YYYY-MM-DD`. Accepts RFC 3339 and the
    /// service's `YYYY-MM-DD HH:MM:SS`; anything else is shown verbatim.
    pub fn date_label(&self) -> String {
        let raw = self.timestamp.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.date_naive().format("%Y-%m-%d").to_string();
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return dt.date().format("%Y-%m-%d").to_string();
            }
        }
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, filename: &str, timestamp: &str) -> OptimizationRecord {
        OptimizationRecord {
            id,
            timestamp: timestamp.to_string(),
            filename: filename.to_string(),
            language: None,
            patterns_found: 1,
            energy_before: 30.0 + id as f64,
            energy_after: 5.0,
            savings_kwh: 0.01,
            savings_co2_kg: 0.004,
            savings_eur: 0.0025,
            original_code: None,
            optimized_code: None,
            chain_of_thought: None,
        }
    }

    #[test]
    fn test_kpis_without_data_are_zero() {
        let kpis = kpi_cards(None);
        assert_eq!(kpis[0].value, "0");
        assert_eq!(kpis[1].value, "0.00");
        assert_eq!(kpis[3].unit, "EUR");
    }

    #[test]
    fn test_kpis_format_two_decimals() {
        let aggregate = DashboardAggregate {
            total_optimizations: 12,
            total_kwh_saved: 1.23456,
            total_co2_saved: 0.475,
            total_eur_saved: 0.3,
            sustainability_score: 100.0,
            history: vec![],
        };
        let kpis = kpi_cards(Some(&aggregate));
        assert_eq!(kpis[0].value, "12");
        assert_eq!(kpis[1].value, "1.23");
        assert_eq!(kpis[2].value, "0.47");
        assert_eq!(kpis[3].value, "0.30");
    }

    #[test]
    fn test_chart_series_takes_latest_ten_oldest_first() {
        // newest first, as the service sends it
        let history: Vec<_> = (0..12)
            .rev()
            .map(|i| record(i, &format!("src/dir/file{}.cpp", i), "2026-01-01 00:00:00"))
            .collect();
        let series = energy_chart_series(&history);
        assert_eq!(series.len(), 10);
        assert_eq!(series[0].label, "file2.cpp");
        assert_eq!(series[9].label, "file11.cpp");
        assert_eq!(series[9].before, 41.0);
        assert_eq!(chart_max(&series), 41.0);
    }

    #[test]
    fn test_chart_max_floor() {
        assert_eq!(chart_max(&[]), 1.0);
    }

    #[test]
    fn test_date_label_formats() {
        assert_eq!(record(1, "a.cpp", "2026-03-01 10:15:00").date_label(), "2026-03-01");
        assert_eq!(record(1, "a.cpp", "2026-03-01T10:15:00Z").date_label(), "2026-03-01");
        assert_eq!(record(1, "a.cpp", "2026-03-01T10:15:00.123").date_label(), "2026-03-01");
        assert_eq!(record(1, "a.cpp", "yesterday").date_label(), "yesterday");
    }
}
