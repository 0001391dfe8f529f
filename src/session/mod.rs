//! The one live document: its store, editor, page cursor, zoom and renders.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};

use crate::config::Workspace;
use crate::detect::HeadingDetector;
use crate::document::{
    list_documents, Document, DocumentOpener, PageImage, RenderCache, TextSource,
};
use crate::edit::{BoxEditor, EditorConfig};
use crate::error::DoclabelError;
use crate::ir::zoom::ZOOM_STEP;
use crate::ir::Zoom;
use crate::store::AnnotationStore;

/// An open document together with everything the editing host needs.
///
/// Navigation saves nothing by itself; [`switch_to`](Self::switch_to) saves
/// the outgoing store before replacing it.
pub struct DocumentSession {
    /// Documents reachable by [`next_document`](Self::next_document), in
    /// folder order.
    documents: Vec<PathBuf>,
    index: usize,
    document: Box<dyn Document>,
    workspace: Workspace,
    sidecar: PathBuf,
    store: AnnotationStore,
    editor: BoxEditor,
    cache: RenderCache,
    page: usize,
    zoom: Zoom,
}

impl DocumentSession {
    /// Opens `path` and loads its sidecar.
    ///
    /// A corrupt sidecar is logged and replaced by an empty store; the file
    /// is only overwritten on the next save.
    pub fn open(
        opener: &dyn DocumentOpener,
        path: &Path,
        workspace: Workspace,
        editor: EditorConfig,
    ) -> Result<Self, DoclabelError> {
        let document = opener.open(path)?;
        let sidecar = workspace.sidecar_for(path);
        let store = load_or_recover(&sidecar)?;
        info!(
            "opened {} ({} page(s), {} annotation(s))",
            path.display(),
            document.page_count(),
            store.len()
        );

        let zoom = Zoom::default();
        let mut editor = BoxEditor::new(editor);
        editor.set_zoom(zoom);

        Ok(Self {
            documents: vec![path.to_path_buf()],
            index: 0,
            document,
            workspace,
            sidecar,
            store,
            editor,
            cache: RenderCache::default(),
            page: 0,
            zoom,
        })
    }

    /// Lists `folder` and opens its first document.
    pub fn open_folder(
        opener: &dyn DocumentOpener,
        folder: &Path,
        workspace: Workspace,
        editor: EditorConfig,
    ) -> Result<Self, DoclabelError> {
        let documents = list_documents(folder)?;
        let mut session = Self::open(opener, &documents[0], workspace, editor)?;
        session.documents = documents;
        Ok(session)
    }

    pub fn document(&self) -> &dyn Document {
        self.document.as_ref()
    }

    pub fn sidecar_path(&self) -> &Path {
        &self.sidecar
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// The store and the editor, borrowed together for event dispatch.
    pub fn editing(&mut self) -> (&mut BoxEditor, &mut AnnotationStore) {
        (&mut self.editor, &mut self.store)
    }

    pub fn editor(&self) -> &BoxEditor {
        &self.editor
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// The current page at the current zoom, from cache when possible.
    pub fn render_current(&mut self) -> Result<Arc<PageImage>, DoclabelError> {
        self.cache
            .get_or_render(self.document.as_ref(), self.page, self.zoom)
    }

    /// Moves to the next page. Returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 >= self.page_count() {
            return false;
        }
        self.go_to_page(self.page + 1);
        true
    }

    /// Moves to the previous page. Returns false on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.go_to_page(self.page - 1);
        true
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
        self.editor.set_page(page);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.stepped(ZOOM_STEP));
    }

    /// Zooms out, stopping at the minimum zoom.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.stepped(-ZOOM_STEP));
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
        self.editor.set_zoom(zoom);
    }

    /// Runs heading detection on the current page and appends the results.
    ///
    /// Returns how many annotations were added.
    pub fn auto_detect_current_page(
        &mut self,
        detector: &HeadingDetector,
    ) -> Result<usize, DoclabelError> {
        self.document.check_page(self.page)?;
        let spans = self.document.spans(self.page)?;
        let found = detector.detect(self.page, &spans);
        let added = found.len();
        self.store.extend(found);
        info!("detected {} heading(s) on page {}", added, self.page + 1);
        Ok(added)
    }

    /// Backfills text and writes the sidecar.
    pub fn save(&mut self) -> Result<(), DoclabelError> {
        self.store.save(&self.sidecar, self.document.as_ref())
    }

    /// Saves, then opens `path` in place of the current document.
    ///
    /// Selection and render cache are reset; page goes back to 0, zoom is
    /// kept. If the save or the open fails the current document stays live.
    pub fn switch_to(
        &mut self,
        opener: &dyn DocumentOpener,
        path: &Path,
    ) -> Result<(), DoclabelError> {
        self.save()?;
        self.replace_document(opener, path)
    }

    /// Saves and opens the next document of the folder. Returns false on
    /// the last one.
    pub fn next_document(&mut self, opener: &dyn DocumentOpener) -> Result<bool, DoclabelError> {
        if self.index + 1 >= self.documents.len() {
            return Ok(false);
        }
        self.switch_to_index(opener, self.index + 1)?;
        Ok(true)
    }

    /// Saves and opens the previous document of the folder. Returns false on
    /// the first one.
    pub fn prev_document(&mut self, opener: &dyn DocumentOpener) -> Result<bool, DoclabelError> {
        if self.index == 0 {
            return Ok(false);
        }
        self.switch_to_index(opener, self.index - 1)?;
        Ok(true)
    }

    /// Documents of the open folder and the index of the live one.
    pub fn documents(&self) -> (&[PathBuf], usize) {
        (&self.documents, self.index)
    }

    fn switch_to_index(
        &mut self,
        opener: &dyn DocumentOpener,
        index: usize,
    ) -> Result<(), DoclabelError> {
        self.save()?;
        let path = self.documents[index].clone();
        self.replace_document(opener, &path)?;
        self.index = index;
        Ok(())
    }

    fn replace_document(
        &mut self,
        opener: &dyn DocumentOpener,
        path: &Path,
    ) -> Result<(), DoclabelError> {
        let document = opener.open(path)?;
        let sidecar = self.workspace.sidecar_for(path);
        let store = load_or_recover(&sidecar)?;

        self.editor.clear_selection();
        self.cache.clear();
        self.document = document;
        self.sidecar = sidecar;
        self.store = store;
        self.go_to_page(0);
        info!("switched to {}", path.display());
        Ok(())
    }
}

fn load_or_recover(sidecar: &Path) -> Result<AnnotationStore, DoclabelError> {
    match AnnotationStore::load(sidecar) {
        Ok(store) => Ok(store),
        Err(err @ DoclabelError::CorruptSidecar { .. }) => {
            warn!("{}; starting with no annotations", err);
            Ok(AnnotationStore::new())
        }
        Err(err) => Err(err),
    }
}
