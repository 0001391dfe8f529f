//! The ordered, id-addressed collection of one document's annotations.

use std::path::Path;

use log::{debug, info};

use crate::document::Document;
use crate::error::DoclabelError;
use crate::ir::io_sidecar::{read_sidecar, write_sidecar};
use crate::ir::{Annotation, AnnotationId, Coord, Doc};
use crate::text::backfill_text;

/// Annotations of one document, in insertion order.
///
/// The store assigns every record an [`AnnotationId`] when it enters, so
/// records with identical content stay distinguishable.
#[derive(Clone, Debug)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_id: u64,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a store from records, assigning fresh ids.
    pub fn from_annotations(annotations: impl IntoIterator<Item = Annotation>) -> Self {
        let mut store = Self::new();
        store.extend(annotations);
        store
    }

    /// Reads a sidecar. A missing file gives an empty store.
    pub fn load(path: &Path) -> Result<Self, DoclabelError> {
        let store = Self::from_annotations(read_sidecar(path)?);
        debug!("loaded {} annotation(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Backfills text from `document`, then writes the sidecar atomically.
    ///
    /// Annotations on pages the document doesn't have keep their text.
    pub fn save<D>(&mut self, path: &Path, document: &D) -> Result<(), DoclabelError>
    where
        D: Document + ?Sized,
    {
        backfill_text(&mut self.annotations, document, document.page_count());
        write_sidecar(path, &self.annotations)?;
        info!(
            "saved {} annotation(s) to {}",
            self.annotations.len(),
            path.display()
        );
        Ok(())
    }

    /// Appends `annotation` and returns its new id.
    pub fn add(&mut self, mut annotation: Annotation) -> AnnotationId {
        let id = AnnotationId::new(self.next_id);
        self.next_id += 1;
        annotation.id = id;
        self.annotations.push(annotation);
        id
    }

    pub fn extend(&mut self, annotations: impl IntoIterator<Item = Annotation>) {
        for ann in annotations {
            self.add(ann);
        }
    }

    /// Removes the record with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let idx = self.annotations.iter().position(|a| a.id == id)?;
        Some(self.annotations.remove(idx))
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn on_page(&self, page: usize) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.page == page)
    }

    /// First annotation on `page`, in store order, containing `point`.
    pub fn hit_test(&self, page: usize, point: &Coord<Doc>) -> Option<AnnotationId> {
        self.on_page(page)
            .find(|a| a.bbox.contains(point))
            .map(|a| a.id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Owned copy of the records, for writing from another thread.
    pub fn snapshot(&self) -> Vec<Annotation> {
        self.annotations.clone()
    }
}

/// Backfills and writes a [`snapshot`](AnnotationStore::snapshot).
pub fn save_snapshot<D>(
    path: &Path,
    mut annotations: Vec<Annotation>,
    document: &D,
) -> Result<(), DoclabelError>
where
    D: Document + ?Sized,
{
    backfill_text(&mut annotations, document, document.page_count());
    write_sidecar(path, &annotations)?;
    info!("saved {} annotation(s) to {}", annotations.len(), path.display());
    Ok(())
}
