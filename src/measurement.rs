use chrono::NaiveDate;

/// One depth-binned record observed by the tag: the minimum and maximum
/// value seen in that depth bin over the day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthMeasurement {
    pub depth: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl DepthMeasurement {
    pub fn new(depth: f64, min_value: f64, max_value: f64) -> Self {
        Self {
            depth,
            min_value,
            max_value,
        }
    }
}

/// Daily minimum and maximum of the matched quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummary {
    pub min: f64,
    pub max: f64,
}

impl DaySummary {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Everything the tag observed on one day. `profile` is empty for
/// surface-only quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub day: NaiveDate,
    pub summary: DaySummary,
    pub profile: Vec<DepthMeasurement>,
}

impl DayRecord {
    pub fn new(day: NaiveDate, summary: DaySummary, profile: Vec<DepthMeasurement>) -> Self {
        Self {
            day,
            summary,
            profile,
        }
    }
}
