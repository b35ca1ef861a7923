//! The edited content document and its mutations.
//!
//! `ContentModel` owns the working copy of the document. Collection
//! entries are addressed by position; deleting shifts everything after
//! the removed entry one slot down, exactly like the tables the panel
//! shows. Every mutation persists through the storage adapter before it
//! returns.

use std::fmt;
use std::sync::Arc;

use crate::models::{
    AgendaEvent, Contact, ContentCounts, EntityKind, FeaturedEvent, Financial, Layout,
    RosterEntry, Service, SiteDocument, SiteInfo, SocialLink,
};
use crate::site::SiteContent;
use crate::storage::{ContentStore, SaveOutcome, StoreError, DOCUMENT_KEY};

use super::forms::FormRecord;

/// Where the document came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Server or local cache, through the store
    Store,
    /// The published site data
    Site,
    /// Nothing stored anywhere, the sample content
    Sample,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadSource::Store => "servidor/cache",
            LoadSource::Site => "dados publicados do site",
            LoadSource::Sample => "conteúdo de exemplo",
        };
        write!(f, "{}", label)
    }
}

/// Errors that can occur during model operations.
#[derive(Debug)]
pub enum ModelError {
    /// No entry with this id in the collection
    NotFound { kind: EntityKind, id: usize },
    /// Persistence failure
    StoreError(StoreError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFound { kind, id } => {
                write!(f, "No entry {} in collection '{}'", id, kind)
            }
            ModelError::StoreError(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::StoreError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ModelError {
    fn from(e: StoreError) -> Self {
        ModelError::StoreError(e)
    }
}

/// The working copy of the content document.
pub struct ContentModel {
    document: SiteDocument,
    store: ContentStore,
    site: Arc<dyn SiteContent>,
}

impl ContentModel {
    pub fn new(store: ContentStore, site: Arc<dyn SiteContent>) -> Self {
        Self {
            document: SiteDocument::default(),
            store,
            site,
        }
    }

    pub fn document(&self) -> &SiteDocument {
        &self.document
    }

    pub fn counts(&self) -> ContentCounts {
        self.document.counts()
    }

    /// Resolves the document into memory, trying the store (server,
    /// then cache), then the published site data, then the sample
    /// content.
    ///
    /// Whatever the source, the loaded document is completed in place,
    /// so every field is usable afterwards. Nothing is written back;
    /// the inspection commands rely on that.
    pub async fn load(&mut self) -> Result<LoadSource, ModelError> {
        let (mut document, source) = match self.store.get(DOCUMENT_KEY).await? {
            Some(document) => (document, LoadSource::Store),
            None => match self.site.data() {
                Some(document) => (document, LoadSource::Site),
                None => (SiteDocument::sample_default(), LoadSource::Sample),
            },
        };

        document.ensure_completeness();
        self.document = document;
        tracing::info!("content document loaded from {:?}", source);

        Ok(source)
    }

    /// Resolves the document like [`load`](Self::load), then hands it
    /// to the site consumer and writes it back through the store, so
    /// every copy agrees with what was resolved.
    ///
    /// Propagation failures are logged and do not fail the load.
    pub async fn load_all(&mut self) -> Result<LoadSource, ModelError> {
        let source = self.load().await?;

        if let Err(e) = self.site.update_data(&self.document) {
            tracing::warn!("failed to hand loaded document to the site: {}", e);
        }
        if let Err(e) = self.store.save(DOCUMENT_KEY, &self.document).await {
            tracing::warn!("failed to write loaded document back: {}", e);
        }

        Ok(source)
    }

    /// Persists the current document through the store.
    pub async fn save(&self) -> Result<SaveOutcome, ModelError> {
        Ok(self.store.save(DOCUMENT_KEY, &self.document).await?)
    }

    /// Replaces the whole document, persisting the new one.
    pub async fn replace_document(
        &mut self,
        document: SiteDocument,
    ) -> Result<SaveOutcome, ModelError> {
        self.document = document;
        self.save().await
    }

    /// Appends an entry built from the record and persists.
    pub async fn add(
        &mut self,
        kind: EntityKind,
        record: &FormRecord,
    ) -> Result<SaveOutcome, ModelError> {
        match kind {
            EntityKind::FeaturedEvent => self
                .document
                .featured_events
                .push(build_featured_event(record)),
            EntityKind::AgendaEvent => {
                self.document.agenda_events.push(build_agenda_event(record))
            }
            EntityKind::Service => self.document.services.push(build_service(record)),
            EntityKind::Roster(category) => self
                .document
                .rosters
                .category_mut(category)
                .push(build_roster_entry(record)),
            EntityKind::SocialLink => {
                self.document.social_links.push(build_social_link(record))
            }
        }

        tracing::debug!("added entry to {}", kind);
        self.save().await
    }

    /// Replaces the entry at `id` with one built from the record.
    pub async fn update(
        &mut self,
        kind: EntityKind,
        id: usize,
        record: &FormRecord,
    ) -> Result<SaveOutcome, ModelError> {
        if id >= self.collection_len(kind) {
            return Err(ModelError::NotFound { kind, id });
        }

        match kind {
            EntityKind::FeaturedEvent => {
                self.document.featured_events[id] = build_featured_event(record)
            }
            EntityKind::AgendaEvent => {
                self.document.agenda_events[id] = build_agenda_event(record)
            }
            EntityKind::Service => self.document.services[id] = build_service(record),
            EntityKind::Roster(category) => {
                self.document.rosters.category_mut(category)[id] = build_roster_entry(record)
            }
            EntityKind::SocialLink => {
                self.document.social_links[id] = build_social_link(record)
            }
        }

        tracing::debug!("updated entry {} of {}", id, kind);
        self.save().await
    }

    /// Removes the entry at `id`, shifting later entries down.
    ///
    /// An out-of-range id removes nothing; the save still runs.
    pub async fn delete(
        &mut self,
        kind: EntityKind,
        id: usize,
    ) -> Result<SaveOutcome, ModelError> {
        let removed = match kind {
            EntityKind::FeaturedEvent => remove_at(&mut self.document.featured_events, id),
            EntityKind::AgendaEvent => remove_at(&mut self.document.agenda_events, id),
            EntityKind::Service => remove_at(&mut self.document.services, id),
            EntityKind::Roster(category) => {
                remove_at(self.document.rosters.category_mut(category), id)
            }
            EntityKind::SocialLink => remove_at(&mut self.document.social_links, id),
        };

        if removed {
            tracing::debug!("deleted entry {} of {}", id, kind);
        } else {
            tracing::debug!("delete ignored, no entry {} in {}", id, kind);
        }

        self.save().await
    }

    /// Replaces the site identity block and persists.
    pub async fn set_site_info(&mut self, info: SiteInfo) -> Result<SaveOutcome, ModelError> {
        self.document.site = info;
        self.save().await
    }

    /// Replaces the contact block and persists.
    pub async fn set_contact(&mut self, contact: Contact) -> Result<SaveOutcome, ModelError> {
        self.document.contact = contact;
        self.save().await
    }

    /// Replaces the donation details and persists.
    pub async fn set_financial(
        &mut self,
        financial: Financial,
    ) -> Result<SaveOutcome, ModelError> {
        self.document.financial = financial;
        self.save().await
    }

    /// Replaces the layout flags and persists.
    pub async fn set_layout(&mut self, layout: Layout) -> Result<SaveOutcome, ModelError> {
        self.document.layout = layout;
        self.save().await
    }

    pub fn collection_len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::FeaturedEvent => self.document.featured_events.len(),
            EntityKind::AgendaEvent => self.document.agenda_events.len(),
            EntityKind::Service => self.document.services.len(),
            EntityKind::Roster(category) => self.document.rosters.category(category).len(),
            EntityKind::SocialLink => self.document.social_links.len(),
        }
    }

    /// Form values of an existing entry, for prefilling the edit dialog.
    pub fn entity_record(&self, kind: EntityKind, id: usize) -> Option<FormRecord> {
        match kind {
            EntityKind::FeaturedEvent => self.document.featured_events.get(id).map(|e| {
                FormRecord::new()
                    .with("name", e.name.clone())
                    .with("time", e.time.clone())
                    .with("icon", e.icon.clone())
            }),
            EntityKind::AgendaEvent => self.document.agenda_events.get(id).map(|e| {
                FormRecord::new()
                    .with("weekday", e.weekday.clone())
                    .with("time", e.time.clone())
                    .with("title", e.title.clone())
                    .with("description", e.description.clone())
                    .with("location", e.location.clone())
                    .with("icon", e.icon.clone())
            }),
            EntityKind::Service => self.document.services.get(id).map(|e| {
                FormRecord::new()
                    .with("name", e.name.clone())
                    .with("time", e.time.clone())
            }),
            EntityKind::Roster(category) => {
                self.document.rosters.category(category).get(id).map(|e| {
                    FormRecord::new()
                        .with("date", e.date.clone())
                        .with("team", e.team.clone())
                })
            }
            EntityKind::SocialLink => self.document.social_links.get(id).map(|e| {
                FormRecord::new()
                    .with("name", e.name.clone())
                    .with("url", e.url.clone())
                    .with("icon", e.icon.clone())
            }),
        }
    }
}

fn remove_at<T>(list: &mut Vec<T>, id: usize) -> bool {
    if id < list.len() {
        list.remove(id);
        true
    } else {
        false
    }
}

fn build_featured_event(record: &FormRecord) -> FeaturedEvent {
    FeaturedEvent::new(record.get("name"), record.get("time"), record.get("icon"))
}

fn build_agenda_event(record: &FormRecord) -> AgendaEvent {
    let mut event = AgendaEvent::new(
        record.get("weekday"),
        record.get("time"),
        record.get("title"),
    )
    .with_description(record.get("description"));

    // Blank optional fields keep the defaults from AgendaEvent::new
    if !record.is_blank("location") {
        event = event.with_location(record.get("location"));
    }
    if !record.is_blank("icon") {
        event = event.with_icon(record.get("icon"));
    }

    event
}

fn build_service(record: &FormRecord) -> Service {
    Service::new(record.get("name"), record.get("time"))
}

fn build_roster_entry(record: &FormRecord) -> RosterEntry {
    RosterEntry::new(record.get("date"), record.get("team"))
}

fn build_social_link(record: &FormRecord) -> SocialLink {
    SocialLink::new(record.get("name"), record.get("url"), record.get("icon"))
}
