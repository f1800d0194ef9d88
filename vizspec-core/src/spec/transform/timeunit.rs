use crate::spec::transform::TransformDefTrait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeUnitTransformDef {
    #[serde(rename = "timeUnit")]
    pub time_unit: TimeUnit,

    pub field: String,

    #[serde(rename = "as")]
    pub as_: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    DayOfYear,
    Date,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    YearQuarter,
    YearMonth,
    YearMonthDate,
    YearMonthDateHours,
    YearMonthDateHoursMinutes,
    MonthDate,
    HoursMinutes,
    HoursMinutesSeconds,
    MinutesSeconds,
    UtcYear,
    UtcQuarter,
    UtcMonth,
    UtcWeek,
    UtcDay,
    UtcDate,
    UtcHours,
    UtcMinutes,
    UtcSeconds,
    UtcYearMonth,
    UtcYearMonthDate,
}

impl TransformDefTrait for TimeUnitTransformDef {
    fn input_fields(&self) -> Vec<String> {
        vec![self.field.clone()]
    }

    fn produced_fields(&self) -> Vec<String> {
        vec![self.as_.clone(), format!("{}_end", self.as_)]
    }
}
