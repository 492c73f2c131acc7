pub const TIME_SOURCE_QUERY_TOTAL: &str = "time_source_query_total";
pub const TIME_SOURCE_QUERY_DURATION_METRIC: &str = "time_source_query_duration_seconds";
pub const TIME_SOURCE_QUERY_DURATION_BUCKETS: &[f64; 12] = &[
    0.005, 0.01, 0.02, 0.05, 0.075, 0.1, 0.15, 0.2, 0.3, 0.5, 0.75, 1.0,
];
