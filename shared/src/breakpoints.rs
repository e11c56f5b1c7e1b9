//! CPCB (India) sub-index computation from particulate concentrations
//!
//! The backend derives its headline AQI as the worst of the PM2.5 and PM10
//! sub-indices. The same math is used client-side to name the dominant
//! pollutant on a reading card.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AqiReading, Pollutant};

/// Sub-index reported when a concentration falls outside every segment
pub const OUT_OF_RANGE_INDEX: i32 = 500;

/// One linear segment: concentration `[c_low, c_high]` maps onto index `[i_low, i_high]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub c_low: i64,
    pub c_high: i64,
    pub i_low: i64,
    pub i_high: i64,
}

const fn bp(c_low: i64, c_high: i64, i_low: i64, i_high: i64) -> Breakpoint {
    Breakpoint {
        c_low,
        c_high,
        i_low,
        i_high,
    }
}

/// PM2.5 breakpoints, µg/m³ (24-hour average)
pub const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    bp(0, 30, 0, 50),
    bp(31, 60, 51, 100),
    bp(61, 90, 101, 200),
    bp(91, 120, 201, 300),
    bp(121, 250, 301, 400),
    bp(251, 500, 401, 500),
];

/// PM10 breakpoints, µg/m³ (24-hour average)
pub const PM10_BREAKPOINTS: [Breakpoint; 6] = [
    bp(0, 50, 0, 50),
    bp(51, 100, 51, 100),
    bp(101, 250, 101, 200),
    bp(251, 350, 201, 300),
    bp(351, 430, 301, 400),
    bp(431, 600, 401, 500),
];

impl Breakpoint {
    fn covers(&self, concentration: Decimal) -> bool {
        concentration >= Decimal::from(self.c_low) && concentration <= Decimal::from(self.c_high)
    }

    fn interpolate(&self, concentration: Decimal) -> i32 {
        let index_span = Decimal::from(self.i_high - self.i_low);
        let conc_span = Decimal::from(self.c_high - self.c_low);
        let value = index_span * (concentration - Decimal::from(self.c_low)) / conc_span
            + Decimal::from(self.i_low);

        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i32()
            .unwrap_or(OUT_OF_RANGE_INDEX)
    }
}

/// Breakpoint table for a pollutant, if the index defines one
pub fn breakpoints_for(pollutant: Pollutant) -> Option<&'static [Breakpoint]> {
    match pollutant {
        Pollutant::Pm25 => Some(&PM25_BREAKPOINTS),
        Pollutant::Pm10 => Some(&PM10_BREAKPOINTS),
        _ => None,
    }
}

/// Sub-index for one pollutant concentration.
///
/// Returns `None` for pollutants without a table and for negative input.
/// Concentrations that no segment covers (above the top, or between two
/// integer segments) report [`OUT_OF_RANGE_INDEX`].
pub fn sub_index(pollutant: Pollutant, concentration: Decimal) -> Option<i32> {
    let table = breakpoints_for(pollutant)?;
    if concentration.is_sign_negative() && !concentration.is_zero() {
        return None;
    }

    let index = table
        .iter()
        .find(|segment| segment.covers(concentration))
        .map(|segment| segment.interpolate(concentration))
        .unwrap_or(OUT_OF_RANGE_INDEX);
    Some(index)
}

/// Headline AQI: the worst of the available particulate sub-indices
pub fn compute_aqi(pm25: Option<Decimal>, pm10: Option<Decimal>) -> Option<i32> {
    let pm25_index = pm25.and_then(|c| sub_index(Pollutant::Pm25, c));
    let pm10_index = pm10.and_then(|c| sub_index(Pollutant::Pm10, c));
    match (pm25_index, pm10_index) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Pollutant with the highest sub-index on a reading, with that index.
///
/// Ties go to PM2.5.
pub fn dominant_pollutant(reading: &AqiReading) -> Option<(Pollutant, i32)> {
    [Pollutant::Pm25, Pollutant::Pm10]
        .into_iter()
        .filter_map(|p| {
            p.value_in(reading)
                .and_then(|c| sub_index(p, c))
                .map(|index| (p, index))
        })
        .fold(None, |best: Option<(Pollutant, i32)>, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        })
}
