//! In-memory remote used by the engine tests.

use super::types::{
    FileUpload, FileVersionItem, FileVersionPage, Pagination, RemoteFileContent, SourceDescriptor,
};
use super::{RemoteError, RemoteSource};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct MockRemote {
    pub source_id: String,
    pub source_name: String,
    files: Mutex<BTreeMap<String, String>>,
    /// Page size the mock paginates with, regardless of the requested limit
    page_size: usize,
    fail_uploads: Mutex<HashSet<String>>,
    fail_fetch: AtomicBool,
    /// Every accepted upload, in arrival order
    pub uploads: Mutex<Vec<FileUpload>>,
    /// Additional descriptors reported by `list_sources`
    extra_sources: Mutex<Vec<SourceDescriptor>>,
    pub list_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub single_calls: AtomicUsize,
    pub push_calls: AtomicUsize,
}

impl MockRemote {
    pub fn new(source_id: &str, source_name: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            source_name: source_name.to_string(),
            files: Mutex::new(BTreeMap::new()),
            page_size: 99,
            fail_uploads: Mutex::new(HashSet::new()),
            fail_fetch: AtomicBool::new(false),
            uploads: Mutex::new(Vec::new()),
            extra_sources: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            single_calls: AtomicUsize::new(0),
            push_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn insert_file(&self, relative_path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(relative_path.to_string(), content.to_string());
    }

    pub fn remote_content(&self, relative_path: &str) -> Option<String> {
        self.files.lock().unwrap().get(relative_path).cloned()
    }

    pub fn fail_upload_of(&self, relative_path: &str) {
        self.fail_uploads
            .lock()
            .unwrap()
            .insert(relative_path.to_string());
    }

    pub fn fail_fetches(&self) {
        self.fail_fetch.store(true, Ordering::SeqCst);
    }

    pub fn add_source(&self, source_id: &str, source_name: &str, version: Option<&str>) {
        self.extra_sources.lock().unwrap().push(SourceDescriptor {
            source_id: source_id.to_string(),
            source_name: source_name.to_string(),
            version: version.map(ToString::to_string),
        });
    }

    fn check_source(&self, source_id: &str) -> Result<(), RemoteError> {
        if source_id == self.source_id {
            Ok(())
        } else {
            Err(RemoteError::NotFound(source_id.to_string()))
        }
    }
}

#[async_trait]
impl RemoteSource for MockRemote {
    async fn list_sources(&self) -> Result<Vec<SourceDescriptor>, RemoteError> {
        let mut sources = vec![SourceDescriptor {
            source_id: self.source_id.clone(),
            source_name: self.source_name.clone(),
            version: None,
        }];
        sources.extend(self.extra_sources.lock().unwrap().iter().cloned());
        Ok(sources)
    }

    async fn list_file_versions(
        &self,
        source_id: &str,
        page: u32,
        _limit: u32,
    ) -> Result<FileVersionPage, RemoteError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_source(source_id)?;

        let files = self.files.lock().unwrap();
        let total = files.len();
        let total_pages = total.div_ceil(self.page_size).max(1);
        let start = (page as usize - 1) * self.page_size;
        let page_files: Vec<FileVersionItem> = files
            .keys()
            .skip(start)
            .take(self.page_size)
            .map(|file_path| FileVersionItem {
                file_path: file_path.clone(),
            })
            .collect();

        Ok(FileVersionPage {
            source: self.source_name.clone(),
            total_files: total as u32,
            total_changes: 0,
            files: page_files,
            pagination: Pagination {
                total,
                page,
                total_pages: total_pages as u32,
            },
        })
    }

    async fn fetch_contents(
        &self,
        source_id: &str,
        file_paths: &[String],
    ) -> Result<Vec<RemoteFileContent>, RemoteError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_source(source_id)?;
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(RemoteError::Upstream {
                status: 500,
                message: "content service unavailable".to_string(),
            });
        }

        let files = self.files.lock().unwrap();
        Ok(file_paths
            .iter()
            .filter_map(|path| {
                files.get(path).map(|content| RemoteFileContent {
                    file_path: path.clone(),
                    content: content.clone(),
                    version: None,
                })
            })
            .collect())
    }

    async fn fetch_single_content(
        &self,
        source_id: &str,
        relative_path: &str,
    ) -> Result<String, RemoteError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.check_source(source_id)?;
        self.files
            .lock()
            .unwrap()
            .get(relative_path)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(relative_path.to_string()))
    }

    async fn push_file(&self, upload: &FileUpload) -> Result<(), RemoteError> {
        self.push_calls.fetch_add(1, Ordering::SeqCst);
        self.check_source(&upload.source_id)?;
        if self.fail_uploads.lock().unwrap().contains(&upload.file_path) {
            return Err(RemoteError::Upstream {
                status: 500,
                message: format!("upload rejected for {}", upload.file_path),
            });
        }
        self.uploads.lock().unwrap().push(upload.clone());
        self.files
            .lock()
            .unwrap()
            .insert(upload.file_path.clone(), upload.content.clone());
        Ok(())
    }
}
