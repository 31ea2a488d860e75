pub mod stat_chart;
