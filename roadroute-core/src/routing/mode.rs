use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::model::Segment;

/// Cost model of a shortest-path query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Edge length in meters
    #[default]
    #[serde(alias = "shortest")]
    Distance,
    /// Travel time in minutes at the posted speed limit
    #[serde(alias = "fastest")]
    Time,
}

impl CostMode {
    /// Cost of traversing `segment` (edge table position `edge`).
    ///
    /// # Errors
    ///
    /// In time mode, returns [`Error::InvalidEdgeData`] if the speed limit is not positive.
    pub fn edge_cost(self, segment: &Segment, edge: u32) -> Result<f64, Error> {
        match self {
            CostMode::Distance => Ok(segment.length_m),
            CostMode::Time => {
                if segment.speed_limit_kph <= 0.0 {
                    return Err(Error::InvalidEdgeData {
                        edge: edge as usize,
                        speed: segment.speed_limit_kph,
                    }
                    .logged());
                }
                let length_km = segment.length_m / 1000.0;
                Ok(length_km / segment.speed_limit_kph * 60.0)
            }
        }
    }

    /// Unit of accumulated costs
    pub fn unit(self) -> &'static str {
        match self {
            CostMode::Distance => "m",
            CostMode::Time => "min",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CostMode::Distance => "distance",
            CostMode::Time => "time",
        }
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" | "shortest" => Ok(CostMode::Distance),
            "time" | "fastest" => Ok(CostMode::Time),
            other => Err(Error::InvalidArgument(format!(
                "unknown routing mode '{other}' (expected 'distance' or 'time')"
            ))
            .logged()),
        }
    }
}

impl TryFrom<u8> for CostMode {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(CostMode::Distance),
            1 => Ok(CostMode::Time),
            other => {
                Err(Error::InvalidArgument(format!("invalid routing mode tag {other}")).logged())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(length_m: f64, speed_limit_kph: f64) -> Segment {
        Segment {
            from: 0,
            to: 1,
            length_m,
            speed_limit_kph,
            one_way: false,
        }
    }

    #[test]
    fn time_cost_is_minutes() {
        let cost = CostMode::Time.edge_cost(&segment(1000.0, 60.0), 0).unwrap();
        assert!((cost - 1.0).abs() < 1e-12);
        let cost = CostMode::Distance.edge_cost(&segment(1000.0, 60.0), 0).unwrap();
        assert_eq!(cost, 1000.0);
    }

    #[test]
    fn zero_speed_fails_in_time_mode_only() {
        let seg = segment(100.0, 0.0);
        assert!(matches!(
            CostMode::Time.edge_cost(&seg, 4),
            Err(Error::InvalidEdgeData { edge: 4, .. })
        ));
        assert!(CostMode::Distance.edge_cost(&seg, 4).is_ok());
    }

    #[test]
    fn parses_mode_tags() {
        assert_eq!("Fastest".parse::<CostMode>().unwrap(), CostMode::Time);
        assert_eq!("distance".parse::<CostMode>().unwrap(), CostMode::Distance);
        assert!(matches!(
            "scenic".parse::<CostMode>(),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(CostMode::try_from(1).unwrap(), CostMode::Time);
        assert!(CostMode::try_from(2).is_err());
    }
}
