use std::fmt;

/// Region/city pair addressing the lookup service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeQuery {
    pub region: String,
    pub city: String,
}

impl TimeQuery {
    /// Builds a query from raw input fields, trimming surrounding whitespace.
    /// Empty values are kept; the lookup decides what to do with them.
    pub fn from_inputs(region: &str, city: &str) -> Self {
        Self {
            region: region.trim().to_string(),
            city: city.trim().to_string(),
        }
    }

    pub fn location(&self) -> String {
        format!("{}/{}", self.region, self.city)
    }
}

impl fmt::Display for TimeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.region, self.city)
    }
}
