//! Air Quality Index classification
//!
//! The severity ladder lives here and nowhere else. Every display surface
//! (card, map popup, chart tooltip, forecast legend, alert banner) goes
//! through [`classify`] or [`advisory`] so one reading always renders with
//! the same label, color and advice.

use serde::{Deserialize, Serialize};

/// AQI category, ordered from best to worst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.band().label)
    }
}

impl AqiCategory {
    /// The band record for this category
    pub fn band(self) -> &'static SeverityBand {
        &SEVERITY_BANDS[self as usize]
    }
}

/// Alert severity tier used by the UI to pick an alert style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous AQI range with its display attributes
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeverityBand {
    pub category: AqiCategory,
    /// Inclusive upper bound; `None` for the open-ended last band
    pub upper_bound: Option<u16>,
    pub label: &'static str,
    /// Hex display color, e.g. `#009966`
    pub color: &'static str,
    pub severity: Severity,
    pub advisory: &'static str,
}

impl SeverityBand {
    /// Whether `aqi` is at or below this band's upper bound.
    ///
    /// This is the test the ordered scan applies; it says nothing about the
    /// lower side, which is implied by the bands before it.
    pub fn admits(&self, aqi: f64) -> bool {
        match self.upper_bound {
            Some(upper) => aqi <= f64::from(upper),
            None => true,
        }
    }

    /// Smallest integer AQI that lands in this band (0 for the first band)
    pub fn lower_bound(&self) -> u16 {
        let index = self.category as usize;
        if index == 0 {
            return 0;
        }
        SEVERITY_BANDS[index - 1]
            .upper_bound
            .map(|upper| upper + 1)
            .unwrap_or(u16::MAX)
    }

    /// Whether `aqi` falls inside `[lower_bound, upper_bound]`
    pub fn contains(&self, aqi: f64) -> bool {
        let above_lower = self.category as usize == 0 || aqi >= f64::from(self.lower_bound());
        above_lower && self.admits(aqi)
    }

    /// Range text for legends, e.g. `51-100` or `301+`
    pub fn range_label(&self) -> String {
        match self.upper_bound {
            Some(upper) => format!("{}-{}", self.lower_bound(), upper),
            None => format!("{}+", self.lower_bound()),
        }
    }
}

/// The severity ladder, ascending by upper bound
pub static SEVERITY_BANDS: [SeverityBand; 6] = [
    SeverityBand {
        category: AqiCategory::Good,
        upper_bound: Some(50),
        label: "Good",
        color: "#009966",
        severity: Severity::Success,
        advisory: "Air quality is considered satisfactory, and air pollution poses little or no risk.",
    },
    SeverityBand {
        category: AqiCategory::Moderate,
        upper_bound: Some(100),
        label: "Moderate",
        color: "#ffde33",
        severity: Severity::Warning,
        advisory: "Air quality is acceptable; however, some pollutants may be a concern for a small number of people.",
    },
    SeverityBand {
        category: AqiCategory::UnhealthyForSensitiveGroups,
        upper_bound: Some(150),
        label: "Unhealthy for Sensitive Groups",
        color: "#ff9933",
        severity: Severity::Warning,
        advisory: "Members of sensitive groups may experience health effects. The general public is not likely to be affected.",
    },
    SeverityBand {
        category: AqiCategory::Unhealthy,
        upper_bound: Some(200),
        label: "Unhealthy",
        color: "#cc0033",
        severity: Severity::Error,
        advisory: "Everyone may begin to experience health effects; members of sensitive groups may experience more serious effects.",
    },
    SeverityBand {
        category: AqiCategory::VeryUnhealthy,
        upper_bound: Some(300),
        label: "Very Unhealthy",
        color: "#660099",
        severity: Severity::Error,
        advisory: "Health warnings of emergency conditions. The entire population is more likely to be affected.",
    },
    SeverityBand {
        category: AqiCategory::Hazardous,
        upper_bound: None,
        label: "Hazardous",
        color: "#7e0023",
        severity: Severity::Error,
        advisory: "Health alert: everyone may experience more serious health effects.",
    },
];

/// Index into [`SEVERITY_BANDS`] for an AQI value.
///
/// First band whose upper bound admits the value wins. Negative values land
/// in the first band; anything no bounded band admits (above 300, or NaN)
/// lands in the last.
pub fn band_index(aqi: f64) -> usize {
    SEVERITY_BANDS
        .iter()
        .position(|band| band.admits(aqi))
        .unwrap_or(SEVERITY_BANDS.len() - 1)
}

/// Classify an AQI value into its severity band
pub fn classify(aqi: f64) -> &'static SeverityBand {
    &SEVERITY_BANDS[band_index(aqi)]
}

/// Health advisory shown to end users for an AQI value
pub fn advisory(aqi: f64) -> &'static str {
    classify(aqi).advisory
}

/// All bands in display order, for chart legends
pub fn legend() -> &'static [SeverityBand] {
    &SEVERITY_BANDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_examples() {
        let good = classify(35.0);
        assert_eq!(good.label, "Good");
        assert_eq!(good.color, "#009966");
        assert_eq!(good.severity, Severity::Success);

        let unhealthy = classify(156.0);
        assert_eq!(unhealthy.label, "Unhealthy");
        assert_eq!(unhealthy.color, "#cc0033");
        assert_eq!(unhealthy.severity, Severity::Error);

        let hazardous = classify(500.0);
        assert_eq!(hazardous.label, "Hazardous");
        assert_eq!(hazardous.color, "#7e0023");
        assert_eq!(hazardous.severity, Severity::Error);
    }

    #[test]
    fn test_boundaries_inclusive_on_lower_band() {
        let cases = [
            (50.0, "Good"),
            (51.0, "Moderate"),
            (100.0, "Moderate"),
            (101.0, "Unhealthy for Sensitive Groups"),
            (150.0, "Unhealthy for Sensitive Groups"),
            (151.0, "Unhealthy"),
            (200.0, "Unhealthy"),
            (201.0, "Very Unhealthy"),
            (300.0, "Very Unhealthy"),
            (301.0, "Hazardous"),
        ];
        for (aqi, label) in cases {
            assert_eq!(classify(aqi).label, label, "aqi {}", aqi);
        }
    }

    #[test]
    fn test_advisory_moderate() {
        assert!(advisory(75.0).starts_with("Air quality is acceptable; however, some pollutants may be a concern"));
    }

    #[test]
    fn test_negative_falls_into_good() {
        assert_eq!(classify(-1.0).category, AqiCategory::Good);
        assert_eq!(classify(-10_000.0).category, AqiCategory::Good);
    }

    #[test]
    fn test_nan_falls_into_catch_all() {
        assert_eq!(classify(f64::NAN).category, AqiCategory::Hazardous);
    }

    #[test]
    fn test_huge_values_are_hazardous() {
        assert_eq!(classify(1_000_000.0).category, AqiCategory::Hazardous);
        assert_eq!(classify(f64::INFINITY).category, AqiCategory::Hazardous);
    }

    #[test]
    fn test_table_is_ordered_and_gapless() {
        for (index, band) in SEVERITY_BANDS.iter().enumerate() {
            assert_eq!(band.category as usize, index);
        }
        for pair in SEVERITY_BANDS.windows(2) {
            let upper = pair[0].upper_bound.expect("only the last band is open");
            assert_eq!(pair[1].lower_bound(), upper + 1);
        }
        assert!(SEVERITY_BANDS[SEVERITY_BANDS.len() - 1].upper_bound.is_none());
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(SEVERITY_BANDS[0].range_label(), "0-50");
        assert_eq!(SEVERITY_BANDS[2].range_label(), "101-150");
        assert_eq!(SEVERITY_BANDS[5].range_label(), "301+");
    }

    #[test]
    fn test_category_display_uses_label() {
        assert_eq!(
            AqiCategory::UnhealthyForSensitiveGroups.to_string(),
            "Unhealthy for Sensitive Groups"
        );
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_legend_lists_every_band() {
        let labels: Vec<&str> = legend().iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            vec![
                "Good",
                "Moderate",
                "Unhealthy for Sensitive Groups",
                "Unhealthy",
                "Very Unhealthy",
                "Hazardous"
            ]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_integer_ranges_map_to_expected_labels(aqi in 0i32..=1000) {
            let expected = match aqi {
                0..=50 => "Good",
                51..=100 => "Moderate",
                101..=150 => "Unhealthy for Sensitive Groups",
                151..=200 => "Unhealthy",
                201..=300 => "Very Unhealthy",
                _ => "Hazardous",
            };
            prop_assert_eq!(classify(f64::from(aqi)).label, expected);
        }

        #[test]
        fn prop_advisory_matches_classified_band(aqi in -100.0f64..2000.0) {
            let band = classify(aqi);
            prop_assert_eq!(advisory(aqi), band.advisory);
            prop_assert_eq!(band_index(aqi), band.category as usize);
        }

        #[test]
        fn prop_classification_is_pure(aqi in any::<f64>()) {
            prop_assert_eq!(classify(aqi), classify(aqi));
            prop_assert_eq!(advisory(aqi), advisory(aqi));
        }

        #[test]
        fn prop_contains_agrees_with_scan(aqi in 0i32..=600) {
            let value = f64::from(aqi);
            let matching: Vec<usize> = SEVERITY_BANDS
                .iter()
                .enumerate()
                .filter(|(_, band)| band.contains(value))
                .map(|(index, _)| index)
                .collect();
            prop_assert_eq!(matching, vec![band_index(value)]);
        }
    }
}
