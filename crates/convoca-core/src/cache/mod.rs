//! Client-side document cache.
//!
//! Holds the last known state of each checklist document keyed by
//! `(collection, document)` and merges it against fresh server batches so a
//! stale refresh never wipes client-only knowledge such as a freshly uploaded
//! file name or guide. Writes are sequence-numbered: every refresh takes a
//! [`RefreshTicket`] before its request goes out, and a merge never overwrites
//! an entry written under a newer ticket. Overlapping refreshes therefore
//! resolve by request order, not by completion order.
//!
//! The cache is purely in-memory and every operation is total.

use std::collections::{HashMap, HashSet};

use crate::models::{CollectionId, Document, DocumentId, Guide};
use crate::util::is_blank;

/// Ordering token handed out before a refresh request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    document: Document,
    /// Sequence of the write that produced `document`
    written_by: u64,
    /// First-insertion order within the collection
    order: u64,
}

/// In-memory map of `(collection, document)` to the last merged snapshot.
#[derive(Debug, Default)]
pub struct DocumentCache {
    collections: HashMap<CollectionId, HashMap<DocumentId, CacheEntry>>,
    sequence: u64,
    next_order: u64,
}

impl DocumentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a ticket for a refresh that is about to be requested.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        RefreshTicket(self.bump_sequence())
    }

    /// Store a copy of `document`, replacing any previous snapshot.
    pub fn cache(&mut self, collection_id: &CollectionId, document: &Document) {
        let sequence = self.bump_sequence();
        let Self {
            collections,
            next_order,
            ..
        } = self;
        let entries = collections.entry(collection_id.clone()).or_default();

        if let Some(entry) = entries.get_mut(&document.id) {
            entry.document = document.clone();
            entry.written_by = sequence;
        } else {
            entries.insert(
                document.id.clone(),
                CacheEntry {
                    document: document.clone(),
                    written_by: sequence,
                    order: take_order(next_order),
                },
            );
        }
        tracing::debug!(collection = %collection_id, document = %document.id, "cached document");
    }

    /// Last known snapshot of a document, if any.
    #[must_use]
    pub fn get(&self, collection_id: &CollectionId, document_id: &DocumentId) -> Option<&Document> {
        self.collections
            .get(collection_id)
            .and_then(|entries| entries.get(document_id))
            .map(|entry| &entry.document)
    }

    /// All cached documents of a collection in first-cached order.
    #[must_use]
    pub fn documents(&self, collection_id: &CollectionId) -> Vec<Document> {
        let Some(entries) = self.collections.get(collection_id) else {
            return Vec::new();
        };
        let mut ordered = entries.values().collect::<Vec<_>>();
        ordered.sort_by_key(|entry| entry.order);
        ordered.into_iter().map(|entry| entry.document.clone()).collect()
    }

    /// Merge a server batch as the newest write.
    ///
    /// See [`DocumentCache::merge_with_ticket`].
    pub fn merge(&mut self, collection_id: &CollectionId, server_docs: &[Document]) -> Vec<Document> {
        let ticket = self.begin_refresh();
        self.merge_with_ticket(ticket, collection_id, server_docs)
    }

    /// Merge a server batch fetched under `ticket` into the cache.
    ///
    /// Server fields win, except `file_name` and `guide`, which keep the cached
    /// value when the server leaves them empty. Documents known only to the
    /// cache are appended after the server batch in first-cached order. Entries
    /// written under a newer ticket are returned as cached and left untouched.
    /// The merged snapshots are written back.
    pub fn merge_with_ticket(
        &mut self,
        ticket: RefreshTicket,
        collection_id: &CollectionId,
        server_docs: &[Document],
    ) -> Vec<Document> {
        let Self {
            collections,
            next_order,
            ..
        } = self;
        let entries = collections.entry(collection_id.clone()).or_default();

        let mut merged = Vec::with_capacity(server_docs.len().max(entries.len()));
        let mut seen = HashSet::with_capacity(server_docs.len());
        let mut stale = 0usize;

        for incoming in server_docs {
            if !seen.insert(incoming.id.clone()) {
                continue;
            }

            match entries.get_mut(&incoming.id) {
                Some(entry) if entry.written_by > ticket.0 => {
                    stale += 1;
                    merged.push(entry.document.clone());
                }
                Some(entry) => {
                    let document = merge_document(incoming, &entry.document);
                    entry.document = document.clone();
                    entry.written_by = ticket.0;
                    merged.push(document);
                }
                None => {
                    entries.insert(
                        incoming.id.clone(),
                        CacheEntry {
                            document: incoming.clone(),
                            written_by: ticket.0,
                            order: take_order(next_order),
                        },
                    );
                    merged.push(incoming.clone());
                }
            }
        }

        let mut cache_only = entries
            .values()
            .filter(|entry| !seen.contains(&entry.document.id))
            .collect::<Vec<_>>();
        cache_only.sort_by_key(|entry| entry.order);
        let retained = cache_only.len();
        merged.extend(cache_only.into_iter().map(|entry| entry.document.clone()));

        tracing::debug!(
            collection = %collection_id,
            ticket = ticket.0,
            server = server_docs.len(),
            retained,
            stale,
            "merged documents"
        );
        merged
    }

    /// Drop one document, returning its last snapshot.
    pub fn remove(
        &mut self,
        collection_id: &CollectionId,
        document_id: &DocumentId,
    ) -> Option<Document> {
        let entries = self.collections.get_mut(collection_id)?;
        let removed = entries.remove(document_id).map(|entry| entry.document);
        if entries.is_empty() {
            self.collections.remove(collection_id);
        }
        removed
    }

    /// Forget every document of one collection.
    pub fn invalidate(&mut self, collection_id: &CollectionId) {
        if let Some(entries) = self.collections.remove(collection_id) {
            tracing::debug!(collection = %collection_id, dropped = entries.len(), "invalidated collection");
        }
    }

    /// Forget everything. Ticket sequencing keeps counting so tickets issued
    /// before the reset still order correctly against later writes.
    pub fn clear_all(&mut self) {
        self.collections.clear();
        tracing::debug!("cleared document cache");
    }

    /// Total number of cached documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cached documents for one collection.
    #[must_use]
    pub fn collection_len(&self, collection_id: &CollectionId) -> usize {
        self.collections.get(collection_id).map_or(0, HashMap::len)
    }

    fn bump_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

fn take_order(next_order: &mut u64) -> u64 {
    let order = *next_order;
    *next_order += 1;
    order
}

/// Combine a server snapshot with the cached one.
#[must_use]
pub fn merge_document(server: &Document, cached: &Document) -> Document {
    let mut merged = server.clone();

    if is_blank(merged.file_name.as_deref()) && !is_blank(cached.file_name.as_deref()) {
        merged.file_name.clone_from(&cached.file_name);
    }

    if guide_is_blank(merged.guide.as_ref()) && !guide_is_blank(cached.guide.as_ref()) {
        merged.guide.clone_from(&cached.guide);
    }

    merged
}

fn guide_is_blank(guide: Option<&Guide>) -> bool {
    guide.map_or(true, |guide| guide.file_name.trim().is_empty())
}
