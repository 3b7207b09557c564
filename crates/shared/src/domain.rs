use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(pub u32);

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometry of one section for a single scroll frame.
///
/// `viewport_top` is the offset of the section's top edge from the top of the
/// visible viewport. `None` means the host could not measure the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    pub id: SectionId,
    #[serde(default)]
    pub viewport_top: Option<f64>,
}

impl SectionGeometry {
    pub fn new(id: impl Into<SectionId>, viewport_top: f64) -> Self {
        Self {
            id: id.into(),
            viewport_top: Some(viewport_top),
        }
    }

    pub fn missing(id: impl Into<SectionId>) -> Self {
        Self {
            id: id.into(),
            viewport_top: None,
        }
    }

    /// Whether the top edge has reached `threshold`. Missing or NaN geometry
    /// never qualifies.
    pub fn has_crossed(&self, threshold: f64) -> bool {
        match self.viewport_top {
            Some(top) if !top.is_nan() => top <= threshold,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub id: SectionId,
    pub label: String,
    /// Two-digit ordinal shown next to the label ("01", "02", ...).
    pub number: String,
}

impl NavLink {
    pub fn new(position: usize, id: &str, label: &str) -> Self {
        Self {
            id: SectionId::from(id),
            label: label.to_string(),
            number: format!("{:02}", position + 1),
        }
    }
}

pub fn default_nav_links() -> Vec<NavLink> {
    [
        ("home", "Home"),
        ("about", "About"),
        ("skills", "Skills"),
        ("hobbies", "Hobbies"),
        ("contact", "Contact"),
    ]
    .into_iter()
    .enumerate()
    .map(|(position, (id, label))| NavLink::new(position, id, label))
    .collect()
}

/// Sense of the most recent slide change. Only selects a transition visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Direction reported for a jump; compares raw indices, not circular
    /// distance, so `last -> 0` is `Backward`.
    pub fn for_jump(current: usize, target: usize) -> Self {
        if target > current {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// Horizontal sign of where incoming content starts (+1 = right).
    pub fn enter_offset(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// Horizontal sign of where outgoing content leaves to.
    pub fn exit_offset(self) -> i8 {
        -self.enter_offset()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide<P> {
    pub id: SlideId,
    pub payload: P,
}

impl<P> Slide<P> {
    pub fn new(id: u32, payload: P) -> Self {
        Self {
            id: SlideId(id),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    pub subtitle: String,
    pub icon: String,
}

impl SlideContent {
    pub fn new(title: &str, subtitle: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            icon: icon.to_string(),
        }
    }
}

pub fn default_slides() -> Vec<Slide<SlideContent>> {
    vec![
        Slide::new(
            1,
            SlideContent::new("Design", "Creating spaces that inspire", "📐"),
        ),
        Slide::new(
            2,
            SlideContent::new("Build", "Bringing visions to reality", "🏗️"),
        ),
        Slide::new(
            3,
            SlideContent::new("Innovate", "Pushing boundaries in architecture", "💡"),
        ),
        Slide::new(
            4,
            SlideContent::new("Sustain", "Building for the future", "🌱"),
        ),
    ]
}
