use crate::data_model::TimeQuery;

/// Minimum terminal width required (columns)
pub(super) const MIN_TERMINAL_WIDTH: u16 = 50;
/// Minimum terminal height required (rows)
pub(super) const MIN_TERMINAL_HEIGHT: u16 = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Field {
    Region,
    City,
}

impl Field {
    pub(super) fn other(self) -> Self {
        match self {
            Field::Region => Field::City,
            Field::City => Field::Region,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum InputMode {
    Normal,
    Editing(Field),
    Help,
}

/// The region/city text fields of the trigger form.
#[derive(Clone, Debug, Default)]
pub(super) struct FormState {
    pub(super) region: String,
    pub(super) city: String,
}

impl FormState {
    pub(super) fn from_query(query: Option<&TimeQuery>) -> Self {
        match query {
            Some(query) => Self {
                region: query.region.clone(),
                city: query.city.clone(),
            },
            None => Self::default(),
        }
    }

    pub(super) fn field(&self, field: Field) -> &str {
        match field {
            Field::Region => &self.region,
            Field::City => &self.city,
        }
    }

    pub(super) fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Region => &mut self.region,
            Field::City => &mut self.city,
        }
    }

    pub(super) fn query(&self) -> TimeQuery {
        TimeQuery::from_inputs(&self.region, &self.city)
    }
}
