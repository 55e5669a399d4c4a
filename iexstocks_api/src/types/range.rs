use std::str::FromStr;

/// Supported historical lookback windows for the chart, dividends, and
/// splits endpoints. `1m` is the server default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChartRange {
    /// One month. This is the default.
    #[default]
    OneMonth,
    FiveYears,
    TwoYears,
    OneYear,
    YearToDate,
    SixMonths,
    ThreeMonths,
    OneDay,
}

impl ChartRange {
    /// Wire value for the `range` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::OneMonth => "1m",
            ChartRange::FiveYears => "5y",
            ChartRange::TwoYears => "2y",
            ChartRange::OneYear => "1y",
            ChartRange::YearToDate => "ytd",
            ChartRange::SixMonths => "6m",
            ChartRange::ThreeMonths => "3m",
            ChartRange::OneDay => "1d",
        }
    }
}

impl std::fmt::Display for ChartRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(ChartRange::OneMonth),
            "5y" => Ok(ChartRange::FiveYears),
            "2y" => Ok(ChartRange::TwoYears),
            "1y" => Ok(ChartRange::OneYear),
            "ytd" => Ok(ChartRange::YearToDate),
            "6m" => Ok(ChartRange::SixMonths),
            "3m" => Ok(ChartRange::ThreeMonths),
            "1d" => Ok(ChartRange::OneDay),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::ChartRange;

    #[test]
    fn default_is_one_month() {
        assert_eq!(ChartRange::default(), ChartRange::OneMonth);
    }

    #[test]
    fn rejects_unknown_range() {
        assert!(ChartRange::from_str("1yy").is_err());
        assert_eq!(ChartRange::from_str("5y"), Ok(ChartRange::FiveYears));
    }
}
