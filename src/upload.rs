use crate::models::ApiRequest;
use std::fs;
use std::path::{Path, PathBuf};

pub const UPLOAD_ERROR_MESSAGE: &str = "Error uploading file. Please try again.";

/// PDF files directly inside `dir`, sorted by path. The extension check is
/// the only filtering done on the client.
pub fn get_pdf_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let is_pdf = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if is_pdf && path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

#[derive(Debug)]
pub struct UploadController {
    pub pdf_dir: PathBuf,
    pub pdf_files: Vec<PathBuf>,
    pub highlighted: usize,
    pub selected_file: Option<PathBuf>,
    pub is_uploading: bool,
}

impl UploadController {
    pub fn new(pdf_dir: PathBuf, preselected: Option<PathBuf>) -> Self {
        let mut controller = Self {
            pdf_dir,
            pdf_files: Vec::new(),
            highlighted: 0,
            selected_file: preselected,
            is_uploading: false,
        };
        controller.refresh();
        controller
    }

    pub fn refresh(&mut self) {
        self.pdf_files = get_pdf_files(&self.pdf_dir);
        self.highlighted = self.highlighted.min(self.pdf_files.len().saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.highlighted < self.pdf_files.len().saturating_sub(1) {
            self.highlighted += 1;
        }
    }

    pub fn select_highlighted(&mut self) {
        if let Some(path) = self.pdf_files.get(self.highlighted) {
            self.selected_file = Some(path.clone());
        }
    }

    pub fn selected_name(&self) -> Option<String> {
        self.selected_file.as_ref().map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string())
        })
    }

    /// Start an upload of the selected file. Returns `None` when nothing is
    /// selected or an upload is already running.
    pub fn upload(&mut self) -> Option<ApiRequest> {
        if self.is_uploading {
            return None;
        }
        let path = self.selected_file.clone()?;
        self.is_uploading = true;
        Some(ApiRequest::Upload { path })
    }

    pub fn finish(&mut self) {
        self.is_uploading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf"] {
            File::create(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();
        dir
    }

    #[test]
    fn test_lists_only_pdf_files_sorted() {
        let dir = fixture_dir();
        let names: Vec<String> = get_pdf_files(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        assert!(get_pdf_files(Path::new("/no/such/dir")).is_empty());
    }

    #[test]
    fn test_upload_without_selection_is_noop() {
        let dir = fixture_dir();
        let mut upload = UploadController::new(dir.path().to_path_buf(), None);
        assert_eq!(upload.upload(), None);
        assert!(!upload.is_uploading);
    }

    #[test]
    fn test_upload_selected_file_sets_busy() {
        let dir = fixture_dir();
        let mut upload = UploadController::new(dir.path().to_path_buf(), None);
        upload.move_down();
        upload.select_highlighted();
        assert_eq!(upload.selected_name().as_deref(), Some("b.pdf"));

        let request = upload.upload();
        assert_eq!(
            request,
            Some(ApiRequest::Upload {
                path: dir.path().join("b.pdf")
            })
        );
        assert!(upload.is_uploading);

        // A second trigger while busy does nothing.
        assert_eq!(upload.upload(), None);

        upload.finish();
        assert!(!upload.is_uploading);
    }

    #[test]
    fn test_preselected_path_is_not_validated() {
        let mut upload = UploadController::new(
            PathBuf::from("/no/such/dir"),
            Some(PathBuf::from("report.docx")),
        );
        assert!(upload.upload().is_some());
    }

    #[test]
    fn test_highlight_stays_in_bounds() {
        let dir = fixture_dir();
        let mut upload = UploadController::new(dir.path().to_path_buf(), None);
        upload.move_up();
        assert_eq!(upload.highlighted, 0);
        for _ in 0..10 {
            upload.move_down();
        }
        assert_eq!(upload.highlighted, 2);
    }
}
