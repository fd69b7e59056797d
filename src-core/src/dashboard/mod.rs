//! Dashboard aggregate polling and the figures derived from it.

pub mod metrics;
pub mod store;

pub use metrics::{chart_max, energy_chart_series, kpi_cards, ChartPoint, Kpi, CHART_LIMIT};
pub use store::{DashboardSnapshot, DashboardStore, RefreshOutcome, CONNECTION_ERROR};
