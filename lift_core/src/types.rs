//! Core domain types for Lift.
//!
//! This module defines the values the grouper reads:
//! - Exercise names with case-insensitive identity
//! - Measurements (weight, distance, duration) tagged with their unit
//! - Log entries, one per set actually performed

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// Exercise Names
// ============================================================================

/// Name of an exercise as logged.
///
/// Two names are the same exercise iff they match after trimming and
/// lowercasing. The name as written is kept for display.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ExerciseName {
    raw: String,
    key: String,
}

impl ExerciseName {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let key = raw.trim().to_lowercase();
        Self { raw, key }
    }

    /// The name exactly as logged
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Normalized identity key (trimmed, lowercase)
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for ExerciseName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ExerciseName {}

impl Hash for ExerciseName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl From<String> for ExerciseName {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for ExerciseName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<ExerciseName> for String {
    fn from(name: ExerciseName) -> Self {
        name.raw
    }
}

impl fmt::Display for ExerciseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw.trim())
    }
}

// ============================================================================
// Measurements
// ============================================================================

/// A unit belonging to one physical dimension.
pub trait Unit: Copy + fmt::Debug {
    /// Multiplier that converts a value in this unit to the dimension's base unit
    fn base_factor(self) -> f64;

    /// Short symbol used in logs ("kg", "min", ...)
    fn symbol(self) -> &'static str;

    /// Parse a symbol back into a unit
    fn from_symbol(symbol: &str) -> Option<Self>;
}

/// Units of weight. Base unit: kilograms.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeightUnit {
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lb")]
    Pounds,
}

impl Unit for WeightUnit {
    fn base_factor(self) -> f64 {
        match self {
            WeightUnit::Kilograms => 1.0,
            WeightUnit::Pounds => 0.453_592_37,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "kg",
            WeightUnit::Pounds => "lb",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_lowercase().as_str() {
            "kg" | "kgs" => Some(WeightUnit::Kilograms),
            "lb" | "lbs" => Some(WeightUnit::Pounds),
            _ => None,
        }
    }
}

/// Units of distance. Base unit: meters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl Unit for DistanceUnit {
    fn base_factor(self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => 1_000.0,
            DistanceUnit::Miles => 1_609.344,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_lowercase().as_str() {
            "m" => Some(DistanceUnit::Meters),
            "km" => Some(DistanceUnit::Kilometers),
            "mi" => Some(DistanceUnit::Miles),
            _ => None,
        }
    }
}

/// Units of time. Base unit: seconds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DurationUnit {
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "min")]
    Minutes,
    #[serde(rename = "h")]
    Hours,
}

impl Unit for DurationUnit {
    fn base_factor(self) -> f64 {
        match self {
            DurationUnit::Seconds => 1.0,
            DurationUnit::Minutes => 60.0,
            DurationUnit::Hours => 3_600.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "min",
            DurationUnit::Hours => "h",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_lowercase().as_str() {
            "s" | "sec" => Some(DurationUnit::Seconds),
            "min" => Some(DurationUnit::Minutes),
            "h" => Some(DurationUnit::Hours),
            _ => None,
        }
    }
}

/// A scalar value in some unit of dimension `U`.
///
/// Measurements only compare within one dimension; the comparison is made
/// on the value expressed in the base unit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Measurement<U> {
    pub value: f64,
    pub unit: U,
}

impl<U: Unit> Measurement<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    /// Value expressed in the dimension's base unit
    pub fn base_value(&self) -> f64 {
        self.value * self.unit.base_factor()
    }
}

impl<U: Unit> PartialEq for Measurement<U> {
    fn eq(&self, other: &Self) -> bool {
        self.base_value() == other.base_value()
    }
}

impl<U: Unit> PartialOrd for Measurement<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.base_value().partial_cmp(&other.base_value())
    }
}

pub type Weight = Measurement<WeightUnit>;
pub type Distance = Measurement<DistanceUnit>;
pub type Duration = Measurement<DurationUnit>;

// ============================================================================
// Log Entries
// ============================================================================

/// One logged performance of an exercise (a single set).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub name: ExerciseName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Distance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    /// Pause taken after this entry, before the next one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<Duration>,
    /// Position within the workout, used when reading a log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl Entry {
    /// Create an entry with only a name; fill in the rest with the `with_*` methods
    pub fn new(name: impl Into<ExerciseName>) -> Self {
        Self {
            name: name.into(),
            weight: None,
            reps: None,
            distance: None,
            duration: None,
            rest: None,
            order: None,
        }
    }

    pub fn with_weight(mut self, value: f64, unit: WeightUnit) -> Self {
        self.weight = Some(Weight::new(value, unit));
        self
    }

    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn with_distance(mut self, value: f64, unit: DistanceUnit) -> Self {
        self.distance = Some(Distance::new(value, unit));
        self
    }

    pub fn with_duration(mut self, value: f64, unit: DurationUnit) -> Self {
        self.duration = Some(Duration::new(value, unit));
        self
    }

    pub fn with_rest(mut self, value: f64, unit: DurationUnit) -> Self {
        self.rest = Some(Duration::new(value, unit));
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Whether the entry records reps, distance or duration
    pub fn has_measurement(&self) -> bool {
        self.reps.is_some() || self.distance.is_some() || self.duration.is_some()
    }
}
