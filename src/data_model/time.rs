use chrono::{FixedOffset, NaiveDateTime};

/// Timestamp reported by the lookup service, anchoring local ticking.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthoritativeTime {
    /// Wall-clock time at the queried location. The zone offset stays implicit.
    pub local: NaiveDateTime,
    pub zone: ZoneInfo,
}

/// Optional zone metadata returned next to the timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneInfo {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub offset: Option<FixedOffset>,
}

impl AuthoritativeTime {
    pub fn new(local: NaiveDateTime) -> Self {
        Self {
            local,
            zone: ZoneInfo::default(),
        }
    }
}

impl ZoneInfo {
    /// Short label such as `CEST (UTC+02:00)`, if anything is known.
    pub fn label(&self) -> Option<String> {
        match (&self.abbreviation, self.offset) {
            (Some(abbr), Some(offset)) => Some(format!("{abbr} (UTC{offset})")),
            (Some(abbr), None) => Some(abbr.clone()),
            (None, Some(offset)) => Some(format!("UTC{offset}")),
            (None, None) => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ZoneInfo;
    use chrono::FixedOffset;

    #[test]
    fn label_prefers_abbreviation_with_offset() {
        let zone = ZoneInfo {
            name: Some("Europe/Berlin".to_string()),
            abbreviation: Some("CEST".to_string()),
            offset: FixedOffset::east_opt(2 * 3600),
        };
        assert_eq!(zone.label().as_deref(), Some("CEST (UTC+02:00)"));
    }

    #[test]
    fn label_falls_back_to_name_then_none() {
        let named = ZoneInfo {
            name: Some("Asia/Tokyo".to_string()),
            ..ZoneInfo::default()
        };
        assert_eq!(named.label().as_deref(), Some("Asia/Tokyo"));
        assert_eq!(ZoneInfo::default().label(), None);
    }
}
