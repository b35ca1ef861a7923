//! Aggregate document for the public site.
//!
//! All content the site renders lives in one JSON document so it can be
//! cached, synchronized and exported as a unit. Field names follow the
//! wire format used by the HTTP API (camelCase keys), while the content
//! itself is written in Portuguese.

use chrono::{Datelike, Local};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::entity::{AgendaEvent, FeaturedEvent, RosterCategory, RosterEntry, Service, SocialLink};

/// Identity and hero content of the site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub name: String,
    pub description: String,
    pub verse: Verse,
}

/// Highlighted Bible verse shown on the landing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verse {
    pub text: String,
    pub reference: String,
}

/// Weekly ministry rosters, one list per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rosters {
    pub worship: Vec<RosterEntry>,
    pub reception: Vec<RosterEntry>,
    pub sunday_school: Vec<RosterEntry>,
    pub sound: Vec<RosterEntry>,
}

impl Rosters {
    pub fn category(&self, category: RosterCategory) -> &Vec<RosterEntry> {
        match category {
            RosterCategory::Worship => &self.worship,
            RosterCategory::Reception => &self.reception,
            RosterCategory::SundaySchool => &self.sunday_school,
            RosterCategory::Sound => &self.sound,
        }
    }

    pub fn category_mut(&mut self, category: RosterCategory) -> &mut Vec<RosterEntry> {
        match category {
            RosterCategory::Worship => &mut self.worship,
            RosterCategory::Reception => &mut self.reception,
            RosterCategory::SundaySchool => &mut self.sunday_school,
            RosterCategory::Sound => &mut self.sound,
        }
    }

    /// Total entries across all categories
    pub fn total(&self) -> usize {
        self.worship.len() + self.reception.len() + self.sunday_school.len() + self.sound.len()
    }
}

/// Contact details shown in the site footer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Donation details (bank transfer and Pix)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financial {
    pub bank: BankAccount,
    pub pix: PixKey,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankAccount {
    pub name: String,
    pub branch: String,
    pub account: String,
    pub holder: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixKey {
    /// Key type as published (CNPJ, e-mail, phone...)
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
}

/// Column layout flags for the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layout {
    pub column_count: u8,
    pub column1_visible: bool,
    pub column2_visible: bool,
    pub column3_visible: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            column_count: 3,
            column1_visible: true,
            column2_visible: true,
            column3_visible: true,
        }
    }
}

/// Per-collection totals shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentCounts {
    pub featured_events: usize,
    pub agenda_events: usize,
    pub services: usize,
    pub roster_entries: usize,
    pub social_links: usize,
}

/// The complete site content document.
///
/// Every field is present after [`SiteDocument::ensure_completeness`]
/// runs, so consumers never need to null-check. `current_year` is
/// derived on load and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteDocument {
    pub site: SiteInfo,
    pub featured_events: Vec<FeaturedEvent>,
    pub agenda_events: Vec<AgendaEvent>,
    pub services: Vec<Service>,
    pub rosters: Rosters,
    pub contact: Contact,
    pub social_links: Vec<SocialLink>,
    pub financial: Financial,
    pub layout: Layout,
    #[serde(skip)]
    pub current_year: i32,
}

impl SiteDocument {
    /// Builds the full sample document used when no stored data exists.
    pub fn sample_default() -> Self {
        let mut doc = SiteDocument {
            site: SiteInfo {
                name: "Igreja Presbiteriana de Macaé".to_string(),
                description: "Uma comunidade de fé comprometida com a Palavra de Deus, \
                              adoração verdadeira e crescimento espiritual, fundamentada \
                              nos princípios da Reforma Protestante."
                    .to_string(),
                verse: Verse {
                    text: "Tudo para a glória de Deus".to_string(),
                    reference: "1 Coríntios 10:31".to_string(),
                },
            },
            featured_events: vec![
                FeaturedEvent::new("Escola Dominical", "Domingo às 9h", "fas fa-users"),
                FeaturedEvent::new("Culto", "Domingo às 18h", "fas fa-bible"),
            ],
            agenda_events: vec![
                AgendaEvent::new("DOM", "09:00", "Escola Dominical").with_description(
                    "Participe dos estudos bíblicos para todas as idades, com classes \
                     específicas para crianças, jovens e adultos.",
                ),
                AgendaEvent::new("DOM", "18:00", "Culto de Adoração").with_description(
                    "Momento de adoração, louvor e pregação da Palavra de Deus para \
                     toda a família.",
                ),
                AgendaEvent::new("QUA", "19:30", "Estudo Bíblico")
                    .with_description("Aprofundamento no estudo das Escrituras.")
                    .with_location("Sala de Estudos"),
            ],
            services: vec![
                Service::new("Escola Dominical", "Domingo às 9h"),
                Service::new("Culto Dominical", "Domingo às 18h"),
                Service::new("Estudo Bíblico", "Quarta às 19:30h"),
            ],
            rosters: Rosters {
                worship: vec![
                    RosterEntry::new("07/06/2025 - Domingo Manhã", "Equipe de Louvor 1"),
                    RosterEntry::new("07/06/2025 - Domingo Noite", "Equipe de Louvor 2"),
                ],
                reception: vec![
                    RosterEntry::new("07/06/2025 - Domingo", "José e Maria"),
                    RosterEntry::new("14/06/2025 - Domingo", "Carlos e Beatriz"),
                ],
                sunday_school: vec![
                    RosterEntry::new("07/06/2025 - Classe Infantil", "Professores 1"),
                    RosterEntry::new("07/06/2025 - Classe Adolescentes", "Professores 2"),
                ],
                sound: vec![
                    RosterEntry::new("07/06/2025 - Domingo", "Operador 1"),
                    RosterEntry::new("14/06/2025 - Domingo", "Operador 2"),
                ],
            },
            contact: Contact {
                address: "R. Pref. Eduardo Serrano, 93 - Imbetiba, Macaé - RJ, 27915-170"
                    .to_string(),
                phone: "(22)20203678".to_string(),
                email: "4igrejapresbiterianademacae@gmail.com".to_string(),
            },
            social_links: vec![
                SocialLink::new(
                    "Facebook",
                    "https://facebook.com/ipmacae",
                    "fab fa-facebook-f",
                ),
                SocialLink::new(
                    "Instagram",
                    "https://instagram.com/ipmacae",
                    "fab fa-instagram",
                ),
            ],
            financial: Financial {
                bank: BankAccount {
                    name: "Banco do Brasil".to_string(),
                    branch: "1234-5".to_string(),
                    account: "12345-6".to_string(),
                    holder: "Igreja Presbiteriana de Macaé".to_string(),
                    tax_id: "12.345.678/0001-90".to_string(),
                },
                pix: PixKey {
                    kind: "CNPJ".to_string(),
                    key: "12.345.678/0001-90".to_string(),
                },
            },
            layout: Layout::default(),
            current_year: 0,
        };
        doc.current_year = Local::now().year();
        doc
    }

    /// Fills every missing or blank required field in place.
    ///
    /// Scalar fields fall back to the sample values, collections stay
    /// as they are (an empty list is valid content). Calling this twice
    /// changes nothing the second time.
    pub fn ensure_completeness(&mut self) {
        let defaults = Self::sample_default();

        fill_blank(&mut self.site.name, &defaults.site.name);
        fill_blank(&mut self.site.description, &defaults.site.description);
        fill_blank(&mut self.site.verse.text, &defaults.site.verse.text);
        fill_blank(&mut self.site.verse.reference, &defaults.site.verse.reference);

        fill_blank(&mut self.contact.address, &defaults.contact.address);
        fill_blank(&mut self.contact.phone, &defaults.contact.phone);
        fill_blank(&mut self.contact.email, &defaults.contact.email);

        fill_blank(&mut self.financial.bank.name, &defaults.financial.bank.name);
        fill_blank(&mut self.financial.bank.branch, &defaults.financial.bank.branch);
        fill_blank(&mut self.financial.bank.account, &defaults.financial.bank.account);
        fill_blank(&mut self.financial.bank.holder, &defaults.financial.bank.holder);
        fill_blank(&mut self.financial.bank.tax_id, &defaults.financial.bank.tax_id);
        fill_blank(&mut self.financial.pix.kind, &defaults.financial.pix.kind);
        fill_blank(&mut self.financial.pix.key, &defaults.financial.pix.key);

        if self.layout.column_count == 0 {
            self.layout.column_count = defaults.layout.column_count;
        }

        self.current_year = Local::now().year();
    }

    /// Parses a document from arbitrary JSON, keeping whatever fields
    /// have the right shape and defaulting the rest field by field.
    pub fn from_value_lenient(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return SiteDocument::default();
        };

        let rosters = match map.get("rosters").and_then(Value::as_object) {
            Some(inner) => Rosters {
                worship: field_or_default(inner, "worship"),
                reception: field_or_default(inner, "reception"),
                sunday_school: field_or_default(inner, "sundaySchool"),
                sound: field_or_default(inner, "sound"),
            },
            None => Rosters::default(),
        };

        SiteDocument {
            site: field_or_default(map, "site"),
            featured_events: field_or_default(map, "featuredEvents"),
            agenda_events: field_or_default(map, "agendaEvents"),
            services: field_or_default(map, "services"),
            rosters,
            contact: field_or_default(map, "contact"),
            social_links: field_or_default(map, "socialLinks"),
            financial: field_or_default(map, "financial"),
            layout: field_or_default(map, "layout"),
            current_year: 0,
        }
    }

    pub fn counts(&self) -> ContentCounts {
        ContentCounts {
            featured_events: self.featured_events.len(),
            agenda_events: self.agenda_events.len(),
            services: self.services.len(),
            roster_entries: self.rosters.total(),
            social_links: self.social_links.len(),
        }
    }
}

impl fmt::Display for SiteDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts();
        write!(
            f,
            "{} ({} eventos, {} agenda, {} cultos, {} escalas, {} redes sociais)",
            self.site.name,
            counts.featured_events,
            counts.agenda_events,
            counts.services,
            counts.roster_entries,
            counts.social_links
        )
    }
}

fn fill_blank(target: &mut String, fallback: &str) {
    if target.trim().is_empty() {
        *target = fallback.to_string();
    }
}

fn field_or_default<T>(map: &serde_json::Map<String, Value>, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    map.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sample_default_is_complete() {
        let doc = SiteDocument::sample_default();

        assert_eq!(doc.site.name, "Igreja Presbiteriana de Macaé");
        assert_eq!(doc.site.verse.reference, "1 Coríntios 10:31");
        assert_eq!(doc.featured_events.len(), 2);
        assert_eq!(doc.agenda_events.len(), 3);
        assert_eq!(doc.services.len(), 3);
        assert_eq!(doc.rosters.total(), 8);
        assert_eq!(doc.social_links.len(), 2);
        assert_eq!(doc.layout.column_count, 3);
        assert_eq!(doc.current_year, Local::now().year());
    }

    #[test]
    fn test_ensure_completeness_fills_blank_scalars() {
        let mut doc = SiteDocument::default();
        doc.ensure_completeness();

        let defaults = SiteDocument::sample_default();
        assert_eq!(doc.site.name, defaults.site.name);
        assert_eq!(doc.contact.email, defaults.contact.email);
        assert_eq!(doc.financial.pix.kind, "CNPJ");
        assert_eq!(doc.layout.column_count, 3);
    }

    #[test]
    fn test_ensure_completeness_keeps_collections_empty() {
        let mut doc = SiteDocument::default();
        doc.ensure_completeness();

        assert!(doc.featured_events.is_empty());
        assert!(doc.agenda_events.is_empty());
        assert!(doc.rosters.worship.is_empty());
        assert!(doc.social_links.is_empty());
    }

    #[test]
    fn test_ensure_completeness_preserves_existing_values() {
        let mut doc = SiteDocument::default();
        doc.site.name = "Outra Igreja".to_string();
        doc.services.push(Service::new("Vigília", "Sexta às 22h"));
        doc.ensure_completeness();

        assert_eq!(doc.site.name, "Outra Igreja");
        assert_eq!(doc.services.len(), 1);
    }

    #[test]
    fn test_ensure_completeness_is_idempotent() {
        let mut doc = SiteDocument::default();
        doc.ensure_completeness();
        let first = doc.clone();
        doc.ensure_completeness();

        assert_eq!(doc, first);
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let doc: SiteDocument = serde_json::from_value(json!({
            "site": { "name": "Igreja Teste" }
        }))
        .unwrap();

        assert_eq!(doc.site.name, "Igreja Teste");
        assert!(doc.site.description.is_empty());
        assert!(doc.agenda_events.is_empty());
        assert_eq!(doc.layout.column_count, 3);
        assert!(doc.layout.column2_visible);
    }

    #[test]
    fn test_missing_roster_categories_default_empty() {
        let doc: SiteDocument = serde_json::from_value(json!({
            "rosters": { "reception": [{ "date": "07/06/2025 - Domingo", "team": "Equipe 1" }] }
        }))
        .unwrap();

        assert_eq!(doc.rosters.reception.len(), 1);
        assert!(doc.rosters.worship.is_empty());
        assert!(doc.rosters.sunday_school.is_empty());
        assert!(doc.rosters.sound.is_empty());
    }

    #[test]
    fn test_from_value_lenient_recovers_from_wrong_shapes() {
        let doc = SiteDocument::from_value_lenient(&json!({
            "site": { "name": "Igreja Teste" },
            "featuredEvents": "não é uma lista",
            "services": [{ "name": "Culto", "time": "18h" }],
            "rosters": { "worship": 42, "sound": [{ "date": "07/06", "team": "Operador 1" }] }
        }));

        assert_eq!(doc.site.name, "Igreja Teste");
        assert!(doc.featured_events.is_empty());
        assert_eq!(doc.services.len(), 1);
        assert!(doc.rosters.worship.is_empty());
        assert_eq!(doc.rosters.sound.len(), 1);
    }

    #[test]
    fn test_from_value_lenient_with_non_object() {
        let doc = SiteDocument::from_value_lenient(&json!([1, 2, 3]));
        assert_eq!(doc, SiteDocument::default());
    }

    #[test]
    fn test_wire_format_uses_camel_case_keys() {
        let value = serde_json::to_value(SiteDocument::sample_default()).unwrap();
        let map = value.as_object().unwrap();

        assert!(map.contains_key("featuredEvents"));
        assert!(map.contains_key("agendaEvents"));
        assert!(map.contains_key("socialLinks"));
        assert!(map["rosters"].as_object().unwrap().contains_key("sundaySchool"));
        assert_eq!(map["financial"]["pix"]["type"], "CNPJ");
        assert_eq!(map["layout"]["columnCount"], 3);
        assert!(!map.contains_key("currentYear"));
    }

    #[test]
    fn test_counts() {
        let counts = SiteDocument::sample_default().counts();

        assert_eq!(counts.featured_events, 2);
        assert_eq!(counts.agenda_events, 3);
        assert_eq!(counts.services, 3);
        assert_eq!(counts.roster_entries, 8);
        assert_eq!(counts.social_links, 2);
    }
}
