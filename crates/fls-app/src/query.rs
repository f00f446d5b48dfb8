//! Query helpers for reading a throughput series.

use fls_results::ThroughputPoint;

/// Summary of a run's time range and throughput.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub point_count: usize,
    pub time_range: (f64, f64),
    pub mean_throughput_mbps: f64,
    pub peak_throughput_mbps: f64,
    pub peak_time_s: f64,
}

/// `None` for an empty series.
pub fn summarize(series: &[ThroughputPoint]) -> Option<RunSummary> {
    let first = series.first()?;
    let last = series.last()?;

    let mut peak = *first;
    let mut total = 0.0;
    for point in series {
        total += point.throughput_mbps;
        if point.throughput_mbps > peak.throughput_mbps {
            peak = *point;
        }
    }

    Some(RunSummary {
        point_count: series.len(),
        time_range: (first.time_s, last.time_s),
        mean_throughput_mbps: total / series.len() as f64,
        peak_throughput_mbps: peak.throughput_mbps,
        peak_time_s: peak.time_s,
    })
}

pub fn series_to_csv(series: &[ThroughputPoint]) -> String {
    let mut csv = String::from("time_s,throughput_mbps\n");
    for point in series {
        csv.push_str(&format!("{},{}\n", point.time_s, point.throughput_mbps));
    }
    csv
}

/// `[time, throughput]` pairs for plotting.
pub fn plot_points(series: &[ThroughputPoint]) -> Vec<[f64; 2]> {
    series
        .iter()
        .map(|p| [p.time_s, p.throughput_mbps])
        .collect()
}
