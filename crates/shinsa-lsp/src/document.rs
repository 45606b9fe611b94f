use dashmap::DashMap;
use shinsa_core::parser::ParsedModule;
use tower_lsp::lsp_types::Url;

/// Thread-safe cache of the latest parsed revision of every open document.
pub struct DocumentStore {
    documents: DashMap<Url, ParsedModule>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    pub fn open(&self, uri: Url, content: &str) {
        let filename = uri_to_filename(&uri);
        let parsed = ParsedModule::from_source(&filename, content);
        self.documents.insert(uri, parsed);
    }

    pub fn update(&self, uri: &Url, content: &str) {
        let filename = uri_to_filename(uri);
        let parsed = ParsedModule::from_source(&filename, content);
        self.documents.insert(uri.clone(), parsed);
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &Url) -> Option<dashmap::mapref::one::Ref<'_, Url, ParsedModule>> {
        self.documents.get(uri)
    }

    #[allow(dead_code)]
    pub fn contains(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn uri_to_filename(uri: &Url) -> String {
    uri.path().to_string()
}
