mod document;
mod entity;

pub use document::{
    BankAccount, Contact, ContentCounts, Financial, Layout, PixKey, Rosters, SiteDocument,
    SiteInfo, Verse,
};
pub use entity::{
    AgendaEvent, EntityKind, FeaturedEvent, RosterCategory, RosterEntry, Service, SocialLink,
};
