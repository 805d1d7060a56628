use crate::logic::calculations::{max_value, mean, min_value, round_half_up};
use crate::models::{city_offset, DailySummary, DayBoundary, ForecastSample, IconCode};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

/// Number of days shown in the forecast
pub const MAX_FORECAST_DAYS: usize = 5;

/// Running totals for one calendar day
struct DayBucket {
    date: NaiveDate,
    temps: Vec<f64>,
    humidity: Vec<f64>,
    wind: Vec<f64>,
    condition: String,
    description: String,
    icon: IconCode,
}

impl DayBucket {
    fn seed(date: NaiveDate, sample: &ForecastSample) -> Self {
        Self {
            date,
            temps: Vec::new(),
            humidity: Vec::new(),
            wind: Vec::new(),
            condition: sample.condition.clone(),
            description: sample.description.clone(),
            icon: sample.icon.to_day_variant(),
        }
    }

    fn push(&mut self, sample: &ForecastSample) {
        self.temps.push(sample.temperature);
        self.humidity.push(sample.humidity);
        self.wind.push(sample.wind_speed);

        // Day readings win over the night-derived default; the latest one wins
        if sample.icon.is_day() {
            self.condition.clone_from(&sample.condition);
            self.description.clone_from(&sample.description);
            self.icon = sample.icon.clone();
        }
    }

    fn finish(self) -> DailySummary {
        DailySummary {
            date: self.date,
            temp_high: round_half_up(max_value(&self.temps)),
            temp_low: round_half_up(min_value(&self.temps)),
            condition: self.condition,
            description: self.description,
            icon: self.icon,
            humidity_avg: round_half_up(mean(&self.humidity)),
            wind_speed_avg: round_half_up(mean(&self.wind)),
        }
    }
}

/// Bucket 3-hour samples into calendar days of `tz` and summarise each day.
///
/// Days appear in the order their first sample appears and at most
/// [`MAX_FORECAST_DAYS`] are returned. Samples are expected in ascending
/// timestamp order, as the API delivers them.
pub fn aggregate_daily<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailySummary> {
    let mut buckets: Vec<DayBucket> = Vec::new();
    let mut slots: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();
        let slot = *slots.entry(date).or_insert_with(|| {
            buckets.push(DayBucket::seed(date, sample));
            buckets.len() - 1
        });
        buckets[slot].push(sample);
    }

    tracing::debug!(
        samples = samples.len(),
        days = buckets.len(),
        "Aggregated forecast samples"
    );

    buckets
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(DayBucket::finish)
        .collect()
}

/// [`aggregate_daily`] with the timezone picked by `boundary`
pub fn aggregate_for_boundary(
    samples: &[ForecastSample],
    boundary: DayBoundary,
    utc_offset_seconds: i32,
) -> Vec<DailySummary> {
    match boundary {
        DayBoundary::City => aggregate_daily(samples, &city_offset(utc_offset_seconds)),
        DayBoundary::Local => aggregate_daily(samples, &Local),
        DayBoundary::Utc => aggregate_daily(samples, &Utc),
    }
}
