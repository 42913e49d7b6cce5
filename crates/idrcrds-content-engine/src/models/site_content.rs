use std::fmt;

use serde::{Deserialize, Serialize};

/// A recording package, e.g. `Basic – $150` followed by its bullet points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    pub title: String,
    pub price: String,
    pub bullets: Vec<String>,
}

/// A sample budget scenario with its line items and estimated total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub title: String,
    pub items: Vec<String>,
    pub total: String,
}

/// Structured view of the site content document.
///
/// Every field falls back to its empty value when the marker that introduces
/// it is missing from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteContent {
    pub subtitle: String,
    pub mission: String,
    pub booking: String,
    pub closing: String,
    pub packages: Vec<Package>,
    pub additional_services: Vec<String>,
    pub scenario_a: Scenario,
    pub scenario_b: Scenario,
}

/// An update to some fields of [`SiteContent`]. Absent fields are left as
/// they are in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialSiteContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_a: Option<Scenario>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_b: Option<Scenario>,
}

impl PartialSiteContent {
    /// Fields carried by this update, in patch order.
    pub fn fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| match field {
                Field::Subtitle => self.subtitle.is_some(),
                Field::Mission => self.mission.is_some(),
                Field::Packages => self.packages.is_some(),
                Field::AdditionalServices => self.additional_services.is_some(),
                Field::ScenarioA => self.scenario_a.is_some(),
                Field::ScenarioB => self.scenario_b.is_some(),
                Field::Booking => self.booking.is_some(),
                Field::Closing => self.closing.is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

impl From<SiteContent> for PartialSiteContent {
    fn from(content: SiteContent) -> Self {
        Self {
            subtitle: Some(content.subtitle),
            mission: Some(content.mission),
            booking: Some(content.booking),
            closing: Some(content.closing),
            packages: Some(content.packages),
            additional_services: Some(content.additional_services),
            scenario_a: Some(content.scenario_a),
            scenario_b: Some(content.scenario_b),
        }
    }
}

/// Names the fields of [`SiteContent`]. `ALL` is in document order, which is
/// also the order patches are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Subtitle,
    Mission,
    Packages,
    AdditionalServices,
    ScenarioA,
    ScenarioB,
    Booking,
    Closing,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Subtitle,
        Field::Mission,
        Field::Packages,
        Field::AdditionalServices,
        Field::ScenarioA,
        Field::ScenarioB,
        Field::Booking,
        Field::Closing,
    ];

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Subtitle => "subtitle",
            Field::Mission => "mission",
            Field::Packages => "packages",
            Field::AdditionalServices => "additionalServices",
            Field::ScenarioA => "scenarioA",
            Field::ScenarioB => "scenarioB",
            Field::Booking => "booking",
            Field::Closing => "closing",
        }
    }

    /// Human-readable heading.
    pub fn label(self) -> &'static str {
        match self {
            Field::Subtitle => "Subtitle",
            Field::Mission => "Mission",
            Field::Packages => "Recording Packages",
            Field::AdditionalServices => "Additional Studio Services",
            Field::ScenarioA => "Scenario A",
            Field::ScenarioB => "Scenario B",
            Field::Booking => "Booking Information",
            Field::Closing => "Closing",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
