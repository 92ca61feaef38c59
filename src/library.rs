use crate::models::{ApiRequest, DocumentSummary};

/// Documents already processed by the backend, for reopening.
#[derive(Debug, Default)]
pub struct Library {
    pub documents: Vec<DocumentSummary>,
    pub selected: usize,
    pub is_loading: bool,
    pub is_opening: bool,
}

impl Library {
    pub fn refresh(&mut self) -> Option<ApiRequest> {
        if self.is_loading || self.is_opening {
            return None;
        }
        self.is_loading = true;
        Some(ApiRequest::ListDocuments)
    }

    pub fn finish_refresh(&mut self, documents: Vec<DocumentSummary>) {
        self.documents = documents;
        self.selected = self.selected.min(self.documents.len().saturating_sub(1));
        self.is_loading = false;
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected < self.documents.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn open_selected(&mut self) -> Option<ApiRequest> {
        if self.is_loading || self.is_opening {
            return None;
        }
        let summary = self.documents.get(self.selected)?.clone();
        self.is_opening = true;
        Some(ApiRequest::OpenDocument { summary })
    }
}
