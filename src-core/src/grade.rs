//! Sustainability score banding.

use std::f64::consts::PI;
use std::fmt;

/// Letter grade for a 0-100 sustainability score. `A` is the greenest band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    A,
    B,
    C,
}

pub const GRADE_B_THRESHOLD: f64 = 30.0;
pub const GRADE_A_THRESHOLD: f64 = 70.0;

/// Grade a score. Lower bounds are inclusive: 30 is `B`, 70 is `A`.
///
/// Values outside 0-100 are compared as-is, so negative scores grade `C`
/// and scores above 100 grade `A`. NaN grades `C`.
pub fn grade(score: f64) -> Grade {
    if score.is_nan() || score < GRADE_B_THRESHOLD {
        Grade::C
    } else if score < GRADE_A_THRESHOLD {
        Grade::B
    } else {
        Grade::A
    }
}

impl Grade {
    pub fn letter(&self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
        }
    }

    /// CSS class used to color score displays.
    pub fn color_class(&self) -> &'static str {
        match self {
            Grade::A => "grade-a",
            Grade::B => "grade-b",
            Grade::C => "grade-c",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Geometry of the circular score gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRing {
    pub radius: f64,
    pub circumference: f64,
    /// `stroke-dashoffset` for the filled arc
    pub dash_offset: f64,
}

impl ScoreRing {
    pub const RADIUS: f64 = 58.0;

    pub fn for_score(score: f64) -> Self {
        let circumference = 2.0 * PI * Self::RADIUS;
        let filled = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) / 100.0 };
        Self {
            radius: Self::RADIUS,
            circumference,
            dash_offset: circumference - filled * circumference,
        }
    }
}
