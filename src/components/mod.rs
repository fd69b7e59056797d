pub mod code_diff;
pub mod energy_chart;
pub mod error_banner;
pub mod header;
pub mod history_panel;
pub mod kpi_cards;
pub mod pattern_list;
pub mod roi_calculator;
pub mod score_ring;
