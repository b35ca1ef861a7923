//! Entity types stored in the document collections.
//!
//! Entities have no identifier of their own. Their id is the position
//! inside the owning collection, which keeps the wire format identical
//! to what the site consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highlighted event card on the landing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedEvent {
    pub name: String,
    pub time: String,
    pub icon: String,
}

impl FeaturedEvent {
    pub fn new(
        name: impl Into<String>,
        time: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        FeaturedEvent {
            name: name.into(),
            time: time.into(),
            icon: icon.into(),
        }
    }
}

/// Recurring weekly event shown in the agenda table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaEvent {
    pub weekday: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub icon: String,
}

impl AgendaEvent {
    /// Creates an agenda event with the usual location and icon.
    pub fn new(
        weekday: impl Into<String>,
        time: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        AgendaEvent {
            weekday: weekday.into(),
            time: time.into(),
            title: title.into(),
            description: String::new(),
            location: "Templo Principal".to_string(),
            icon: "fas fa-map-marker-alt".to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Regular worship service time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub name: String,
    pub time: String,
}

impl Service {
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Service {
            name: name.into(),
            time: time.into(),
        }
    }
}

/// One date/team pair in a ministry roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterEntry {
    pub date: String,
    pub team: String,
}

impl RosterEntry {
    pub fn new(date: impl Into<String>, team: impl Into<String>) -> Self {
        RosterEntry {
            date: date.into(),
            team: team.into(),
        }
    }
}

/// Social network link shown in the footer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
}

impl SocialLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>, icon: impl Into<String>) -> Self {
        SocialLink {
            name: name.into(),
            url: url.into(),
            icon: icon.into(),
        }
    }
}

/// Ministry roster categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterCategory {
    Worship,
    Reception,
    SundaySchool,
    Sound,
}

impl RosterCategory {
    pub const ALL: [RosterCategory; 4] = [
        RosterCategory::Worship,
        RosterCategory::Reception,
        RosterCategory::SundaySchool,
        RosterCategory::Sound,
    ];

    pub fn parse(value: &str) -> Option<RosterCategory> {
        match value {
            "worship" => Some(RosterCategory::Worship),
            "reception" => Some(RosterCategory::Reception),
            "sunday-school" => Some(RosterCategory::SundaySchool),
            "sound" => Some(RosterCategory::Sound),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            RosterCategory::Worship => "worship",
            RosterCategory::Reception => "reception",
            RosterCategory::SundaySchool => "sunday-school",
            RosterCategory::Sound => "sound",
        }
    }

    /// Title used in section headers and modal titles
    pub fn label(&self) -> &'static str {
        match self {
            RosterCategory::Worship => "Escala de Louvor",
            RosterCategory::Reception => "Escala de Recepção",
            RosterCategory::SundaySchool => "Escala de Escola Dominical",
            RosterCategory::Sound => "Escala de Sonoplastia",
        }
    }

    /// Lowercase noun used inside sentences
    pub fn list_name(&self) -> &'static str {
        match self {
            RosterCategory::Worship => "escala de louvor",
            RosterCategory::Reception => "escala de recepção",
            RosterCategory::SundaySchool => "escala da escola dominical",
            RosterCategory::Sound => "escala de sonoplastia",
        }
    }
}

/// The editable collection kinds of the document.
///
/// The slug form appears in panel routes and CLI arguments, the label
/// in everything shown to the administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    FeaturedEvent,
    AgendaEvent,
    Service,
    Roster(RosterCategory),
    SocialLink,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::FeaturedEvent,
        EntityKind::AgendaEvent,
        EntityKind::Service,
        EntityKind::Roster(RosterCategory::Worship),
        EntityKind::Roster(RosterCategory::Reception),
        EntityKind::Roster(RosterCategory::SundaySchool),
        EntityKind::Roster(RosterCategory::Sound),
        EntityKind::SocialLink,
    ];

    pub fn parse(value: &str) -> Option<EntityKind> {
        match value {
            "featured-event" => Some(EntityKind::FeaturedEvent),
            "agenda-event" => Some(EntityKind::AgendaEvent),
            "service" => Some(EntityKind::Service),
            "social-link" => Some(EntityKind::SocialLink),
            other => other
                .strip_prefix("roster-")
                .and_then(RosterCategory::parse)
                .map(EntityKind::Roster),
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::FeaturedEvent => "featured-event",
            EntityKind::AgendaEvent => "agenda-event",
            EntityKind::Service => "service",
            EntityKind::Roster(RosterCategory::Worship) => "roster-worship",
            EntityKind::Roster(RosterCategory::Reception) => "roster-reception",
            EntityKind::Roster(RosterCategory::SundaySchool) => "roster-sunday-school",
            EntityKind::Roster(RosterCategory::Sound) => "roster-sound",
            EntityKind::SocialLink => "social-link",
        }
    }

    /// Display name used in modal titles and success messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::FeaturedEvent => "Evento",
            EntityKind::AgendaEvent => "Evento na Agenda",
            EntityKind::Service => "Culto",
            EntityKind::Roster(category) => category.label(),
            EntityKind::SocialLink => "Rede Social",
        }
    }

    /// Placeholder row text for an empty collection
    pub fn empty_message(&self) -> &'static str {
        match self {
            EntityKind::FeaturedEvent => "Nenhum evento destacado cadastrado",
            EntityKind::AgendaEvent => "Nenhum evento da agenda cadastrado",
            EntityKind::Service => "Nenhum culto cadastrado",
            EntityKind::Roster(RosterCategory::Worship) => {
                "Nenhuma escala de louvor cadastrada"
            }
            EntityKind::Roster(RosterCategory::Reception) => {
                "Nenhuma escala de recepção cadastrada"
            }
            EntityKind::Roster(RosterCategory::SundaySchool) => {
                "Nenhuma escala da escola dominical cadastrada"
            }
            EntityKind::Roster(RosterCategory::Sound) => {
                "Nenhuma escala de sonoplastia cadastrada"
            }
            EntityKind::SocialLink => "Nenhuma rede social cadastrada",
        }
    }

    /// Column count of the collection's table, actions included
    pub fn table_width(&self) -> usize {
        match self {
            EntityKind::FeaturedEvent => 4,
            EntityKind::AgendaEvent => 6,
            EntityKind::Service => 3,
            EntityKind::Roster(_) => 3,
            EntityKind::SocialLink => 4,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.slug()), Some(kind));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(EntityKind::parse("sermon"), None);
        assert_eq!(EntityKind::parse("roster-kitchen"), None);
        assert_eq!(EntityKind::parse(""), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(EntityKind::FeaturedEvent.label(), "Evento");
        assert_eq!(EntityKind::AgendaEvent.label(), "Evento na Agenda");
        assert_eq!(EntityKind::Service.label(), "Culto");
        assert_eq!(
            EntityKind::Roster(RosterCategory::Sound).label(),
            "Escala de Sonoplastia"
        );
        assert_eq!(EntityKind::SocialLink.label(), "Rede Social");
    }

    #[test]
    fn test_empty_messages() {
        assert_eq!(
            EntityKind::FeaturedEvent.empty_message(),
            "Nenhum evento destacado cadastrado"
        );
        assert_eq!(
            EntityKind::Roster(RosterCategory::SundaySchool).empty_message(),
            "Nenhuma escala da escola dominical cadastrada"
        );
    }

    #[test]
    fn test_agenda_event_defaults() {
        let event = AgendaEvent::new("QUA", "19:30", "Estudo Bíblico");

        assert_eq!(event.location, "Templo Principal");
        assert_eq!(event.icon, "fas fa-map-marker-alt");
        assert!(event.description.is_empty());
    }

    #[test]
    fn test_agenda_event_builders() {
        let event = AgendaEvent::new("SEX", "22:00", "Vigília")
            .with_description("Noite de oração.")
            .with_location("Salão Social")
            .with_icon("fas fa-praying-hands");

        assert_eq!(event.description, "Noite de oração.");
        assert_eq!(event.location, "Salão Social");
        assert_eq!(event.icon, "fas fa-praying-hands");
    }
}
