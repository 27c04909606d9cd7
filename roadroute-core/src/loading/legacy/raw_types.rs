use csv::ByteRecord;

use crate::model::Node;
use crate::model::streets::legacy::LegacyEdge;
use crate::{DEFAULT_SPEED_KPH, NodeId};

/// Node row `id,latitude,longitude`
#[derive(Debug, Clone, PartialEq)]
pub struct RawNodeRow {
    pub id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Edge row `from,to,name,speed,highway,length[,oneway]`
#[derive(Debug, Clone, PartialEq)]
pub struct RawEdgeRow {
    pub field_count: usize,
    pub from: Option<String>,
    pub to: Option<String>,
    pub name: Option<String>,
    pub speed: Option<String>,
    pub highway: Option<String>,
    pub length: Option<String>,
    pub oneway: Option<String>,
}

fn field(record: &ByteRecord, i: usize) -> Option<String> {
    let value = String::from_utf8_lossy(record.get(i)?);
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&ByteRecord> for RawNodeRow {
    fn from(record: &ByteRecord) -> Self {
        Self {
            id: field(record, 0),
            latitude: field(record, 1),
            longitude: field(record, 2),
        }
    }
}

impl From<&ByteRecord> for RawEdgeRow {
    fn from(record: &ByteRecord) -> Self {
        Self {
            field_count: record.len(),
            from: field(record, 0),
            to: field(record, 1),
            name: field(record, 2),
            speed: field(record, 3),
            highway: field(record, 4),
            length: field(record, 5),
            oneway: field(record, 6),
        }
    }
}

impl RawNodeRow {
    /// Converts the row, or explains why it must be skipped
    pub fn into_node(self) -> Result<Node, String> {
        let (Some(id), Some(lat), Some(lon)) = (self.id, self.latitude, self.longitude) else {
            return Err("missing field".to_string());
        };
        let id: NodeId = id.parse().map_err(|_| format!("invalid id '{id}'"))?;
        let latitude: f64 = lat.parse().map_err(|_| format!("invalid latitude '{lat}'"))?;
        let longitude: f64 = lon
            .parse()
            .map_err(|_| format!("invalid longitude '{lon}'"))?;
        Ok(Node::new(id, latitude, longitude))
    }
}

impl RawEdgeRow {
    /// Converts the row, substituting defaults for optional fields,
    /// or explains why it must be skipped
    pub fn into_edge(self) -> Result<LegacyEdge, String> {
        if self.field_count < 6 {
            return Err(format!("insufficient fields ({})", self.field_count));
        }
        let from_id = parse_id(self.from, "from_node")?;
        let to_id = parse_id(self.to, "to_node")?;
        let length = self.length.ok_or("missing length")?;
        let length_m: f64 = length
            .parse()
            .map_err(|_| format!("invalid length '{length}'"))?;
        if length_m <= 0.0 || !length_m.is_finite() {
            return Err(format!("invalid length ({length_m:.2})"));
        }

        Ok(LegacyEdge {
            from_id,
            to_id,
            name: self.name.unwrap_or_default(),
            speed_limit_kph: self.speed.as_deref().map_or(DEFAULT_SPEED_KPH, parse_speed_limit),
            highway: self.highway.unwrap_or_else(|| "unknown".to_string()),
            length_m,
            one_way: self.oneway.as_deref().is_some_and(parse_oneway),
        })
    }
}

fn parse_id(value: Option<String>, what: &str) -> Result<NodeId, String> {
    let value = value.ok_or_else(|| format!("missing {what}"))?;
    value
        .parse()
        .map_err(|_| format!("invalid {what} '{value}'"))
}

/// Positive speed in km/h, or the default
pub fn parse_speed_limit(value: &str) -> u16 {
    match value.parse::<u16>() {
        Ok(speed) if speed > 0 => speed,
        _ => DEFAULT_SPEED_KPH,
    }
}

pub fn parse_oneway(value: &str) -> bool {
    matches!(value, "yes" | "true" | "1")
}
