//! Incremental assembly of the composite wind attribute.
//!
//! Each source field sets only its own slot, so the three wind fields can
//! arrive in any order. The builder is flattened into [`Wind`] once, after
//! every field of the record has been routed.

use crate::models::{Gust, Unit, Wind, WindVector};

/// Variable-wind detail recovered from the raw report text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindVariability {
    pub variable: Option<bool>,
    pub variable_first: Option<String>,
    pub variable_second: Option<String>,
}

impl WindVariability {
    pub fn is_empty(&self) -> bool {
        self.variable.is_none() && self.variable_first.is_none() && self.variable_second.is_none()
    }
}

/// Builder for [`Wind`]
#[derive(Debug, Clone, Default)]
pub struct WindBuilder {
    direction: Option<i64>,
    speed: Option<i64>,
    gust: Option<i64>,
    variability: WindVariability,
}

impl WindBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-flattened wind value
    pub fn from_wind(wind: &Wind) -> Self {
        let mut builder = Self::new();
        if let Some(vector) = &wind.wind {
            builder.direction = vector.direction;
            builder.speed = vector.speed;
            builder.variability = WindVariability {
                variable: vector.variable,
                variable_first: vector.variable_first.clone(),
                variable_second: vector.variable_second.clone(),
            };
        }
        builder.gust = wind.gusting.map(|g| g.value);
        builder
    }

    pub fn direction(&mut self, degrees: i64) -> &mut Self {
        self.direction = Some(degrees);
        self
    }

    pub fn speed(&mut self, knots: i64) -> &mut Self {
        self.speed = Some(knots);
        self
    }

    pub fn gust(&mut self, knots: i64) -> &mut Self {
        self.gust = Some(knots);
        self
    }

    /// Fill variability slots that are still empty; returns whether anything changed.
    pub fn add_variability(&mut self, detail: WindVariability) -> bool {
        let mut changed = false;
        if self.variability.variable.is_none() && detail.variable.is_some() {
            self.variability.variable = detail.variable;
            changed = true;
        }
        if self.variability.variable_first.is_none() && detail.variable_first.is_some() {
            self.variability.variable_first = detail.variable_first;
            changed = true;
        }
        if self.variability.variable_second.is_none() && detail.variable_second.is_some() {
            self.variability.variable_second = detail.variable_second;
            changed = true;
        }
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.direction.is_none()
            && self.speed.is_none()
            && self.gust.is_none()
            && self.variability.is_empty()
    }

    /// Flatten into the output shape; `None` when no wind data was seen
    pub fn build(self) -> Option<Wind> {
        if self.is_empty() {
            return None;
        }

        let has_vector =
            self.direction.is_some() || self.speed.is_some() || !self.variability.is_empty();
        let wind = has_vector.then(|| WindVector {
            direction: self.direction,
            speed: self.speed,
            unit: self.speed.map(|_| Unit::Knot),
            variable: self.variability.variable,
            variable_first: self.variability.variable_first,
            variable_second: self.variability.variable_second,
        });
        let gusting = self.gust.map(|value| Gust {
            value,
            unit: Unit::Knot,
        });

        Some(Wind { wind, gusting })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_yields_none() {
        assert_eq!(WindBuilder::new().build(), None);
    }

    #[test]
    fn test_gust_only_has_no_vector() {
        let mut builder = WindBuilder::new();
        builder.gust(25);
        let wind = builder.build().unwrap();
        assert_eq!(wind.wind, None);
        assert_eq!(
            wind.gusting,
            Some(Gust {
                value: 25,
                unit: Unit::Knot
            })
        );
    }

    #[test]
    fn test_speed_carries_knot_unit() {
        let mut builder = WindBuilder::new();
        builder.direction(270).speed(12);
        let vector = builder.build().unwrap().wind.unwrap();
        assert_eq!(vector.direction, Some(270));
        assert_eq!(vector.speed, Some(12));
        assert_eq!(vector.unit, Some(Unit::Knot));
    }

    #[test]
    fn test_direction_without_speed_has_no_unit() {
        let mut builder = WindBuilder::new();
        builder.direction(90);
        let vector = builder.build().unwrap().wind.unwrap();
        assert_eq!(vector.unit, None);
    }

    #[test]
    fn test_add_variability_never_overwrites() {
        let mut builder = WindBuilder::new();
        let first = WindVariability {
            variable: Some(true),
            variable_first: Some("180".to_string()),
            variable_second: Some("240".to_string()),
        };
        assert!(builder.add_variability(first.clone()));

        let second = WindVariability {
            variable: Some(false),
            variable_first: Some("010".to_string()),
            variable_second: Some("050".to_string()),
        };
        assert!(!builder.add_variability(second));

        let vector = builder.build().unwrap().wind.unwrap();
        assert_eq!(vector.variable, Some(true));
        assert_eq!(vector.variable_first.as_deref(), Some("180"));
        assert_eq!(vector.variable_second.as_deref(), Some("240"));
    }

    #[test]
    fn test_from_wind_round_trips() {
        let mut builder = WindBuilder::new();
        builder.direction(200).speed(8).gust(18);
        let wind = builder.build().unwrap();
        assert_eq!(WindBuilder::from_wind(&wind).build(), Some(wind));
    }
}
