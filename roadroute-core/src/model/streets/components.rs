//! Road network components - nodes, edges and resolved segments

use geo::Point;

use crate::NodeId;

/// Road network node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Externally assigned identifier
    pub id: NodeId,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Node {
    pub fn new(id: NodeId, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
        }
    }

    /// Node position as a `geo` point (x = longitude, y = latitude)
    pub fn geometry(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Road network edge (street segment) as stored in the edge table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from_id: NodeId,
    pub to_id: NodeId,
    /// Segment length in meters
    pub length_m: u32,
    pub speed_limit_kph: u16,
    pub highway_class: u8,
    /// Traversable only from `from_id` to `to_id`
    pub one_way: bool,
}

impl Edge {
    pub fn new(from_id: NodeId, to_id: NodeId, length_m: u32, speed_limit_kph: u16) -> Self {
        Self {
            from_id,
            to_id,
            length_m,
            speed_limit_kph,
            highway_class: 0,
            one_way: false,
        }
    }

    #[must_use]
    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }
}

/// Edge with endpoints resolved to node array indices, as seen by the router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
    pub length_m: f64,
    pub speed_limit_kph: f64,
    pub one_way: bool,
}

impl Segment {
    /// The node reached by traversing this segment from `current`, if the
    /// segment may be entered from that side.
    pub fn neighbor_of(&self, current: usize) -> Option<usize> {
        if self.from == current {
            Some(self.to)
        } else if self.to == current && !self.one_way {
            Some(self.from)
        } else {
            None
        }
    }
}
