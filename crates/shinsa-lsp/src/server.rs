use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    DidSaveTextDocumentParams, InitializeParams, InitializeResult, InitializedParams, MessageType,
    Url,
};
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, info, instrument, warn};

use shinsa_core::analysis::AnalysisEngine;
use shinsa_core::config::{PathFilter, find_config_file, load_config_with_warnings};

use crate::capabilities::server_capabilities;
use crate::diagnostics::convert_issues;
use crate::document::DocumentStore;

pub struct ShinsaLanguageServer {
    client: Client,
    documents: Arc<DocumentStore>,
    engine: Arc<AnalysisEngine>,
    workspace_root: Arc<RwLock<Option<PathBuf>>>,
    path_filter: Arc<RwLock<Option<PathFilter>>>,
}

impl ShinsaLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentStore::new()),
            engine: Arc::new(AnalysisEngine::new()),
            workspace_root: Arc::new(RwLock::new(None)),
            path_filter: Arc::new(RwLock::new(None)),
        }
    }

    /// Load `shinsa.toml` from the workspace root, off the async runtime.
    /// A missing or broken config leaves the server analyzing everything.
    async fn load_workspace_config(&self) {
        let workspace_root = self.workspace_root.read().clone();

        let loaded = tokio::task::spawn_blocking(move || {
            let root = workspace_root?;
            let path = find_config_file(&root)?;
            match load_config_with_warnings(&path) {
                Ok(result) => match result.config.path_filter() {
                    Ok(filter) => Some((path, result.warnings, filter)),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "invalid configuration");
                        None
                    }
                },
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to load configuration");
                    None
                }
            }
        })
        .await
        .ok()
        .flatten();

        if let Some((path, warnings, filter)) = loaded {
            for warning in &warnings {
                warn!(path = %path.display(), "{}", warning);
            }
            info!(path = %path.display(), "loaded configuration");
            *self.path_filter.write() = Some(filter);
        }
    }

    fn is_allowed(&self, uri: &Url) -> bool {
        let filter = self.path_filter.read();
        let Some(filter) = filter.as_ref() else {
            return true;
        };
        let Ok(path) = uri.to_file_path() else {
            return true;
        };
        let root = self.workspace_root.read();
        filter.allows(&workspace_relative(&path, root.as_deref()))
    }

    async fn analyze_and_publish(&self, uri: &Url) {
        if !self.is_allowed(uri) {
            debug!(uri = %uri, "document excluded by configuration");
            self.client
                .publish_diagnostics(uri.clone(), vec![], None)
                .await;
            return;
        }

        let diagnostics = self
            .documents
            .get(uri)
            .map(|module| {
                let result = self.engine.check_module(&module);
                convert_issues(&result.issues)
            })
            .unwrap_or_default();

        self.client
            .publish_diagnostics(uri.clone(), diagnostics, None)
            .await;
    }
}

/// Config patterns are written against workspace-relative paths, so strip the
/// root before matching. Paths outside the workspace are matched as-is.
fn workspace_relative(path: &Path, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) => path.strip_prefix(root).unwrap_or(path).to_path_buf(),
        None => path.to_path_buf(),
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for ShinsaLanguageServer {
    #[instrument(skip(self, params), name = "lsp/initialize")]
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("initializing LSP server");

        if let Some(root_uri) = params.root_uri {
            if let Ok(path) = root_uri.to_file_path() {
                *self.workspace_root.write() = Some(path);
            }
        }

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            ..Default::default()
        })
    }

    #[instrument(skip(self, _params), name = "lsp/initialized")]
    async fn initialized(&self, _params: InitializedParams) {
        info!("LSP server initialized");

        self.load_workspace_config().await;

        self.client
            .log_message(MessageType::INFO, "shinsa-lsp initialized")
            .await;
    }

    #[instrument(skip(self), name = "lsp/shutdown")]
    async fn shutdown(&self) -> Result<()> {
        info!("shutting down LSP server");
        Ok(())
    }

    #[instrument(skip(self, params), fields(uri = %params.text_document.uri), name = "lsp/textDocument/didOpen")]
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        debug!(uri = %uri, "opening document");
        self.documents.open(uri.clone(), &text);
        self.analyze_and_publish(&uri).await;
    }

    #[instrument(skip(self, params), fields(uri = %params.text_document.uri), name = "lsp/textDocument/didChange")]
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().next() {
            debug!(uri = %uri, "document changed");
            self.documents.update(&uri, &change.text);
            self.analyze_and_publish(&uri).await;
        }
    }

    #[instrument(skip(self, params), fields(uri = %params.text_document.uri), name = "lsp/textDocument/didSave")]
    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!(uri = %uri, "document saved");
        if let Some(text) = params.text {
            self.documents.update(&uri, &text);
        }
        self.analyze_and_publish(&uri).await;
    }

    #[instrument(skip(self, params), fields(uri = %params.text_document.uri), name = "lsp/textDocument/didClose")]
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!(uri = %uri, "closing document");
        self.documents.close(&uri);
        self.client.publish_diagnostics(uri, vec![], None).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shinsa_core::config::Config;
    use tower_lsp::lsp_types::{TextDocumentSyncCapability, TextDocumentSyncKind};

    #[test]
    fn server_responds_to_initialize_with_capabilities() {
        let capabilities = server_capabilities();
        assert!(
            capabilities.text_document_sync.is_some(),
            "Server must declare textDocumentSync capability"
        );
    }

    #[test]
    fn server_declares_full_text_sync() {
        let capabilities = server_capabilities();

        match &capabilities.text_document_sync {
            Some(TextDocumentSyncCapability::Options(opts)) => {
                assert_eq!(opts.change, Some(TextDocumentSyncKind::FULL));
            }
            _ => panic!("textDocumentSync must use Options variant"),
        }
    }

    #[test]
    fn workspace_relative_strips_root() {
        let relative = workspace_relative(
            Path::new("/workspace/src/app.py"),
            Some(Path::new("/workspace")),
        );

        assert_eq!(relative, Path::new("src/app.py"));
    }

    #[test]
    fn workspace_relative_keeps_paths_outside_root() {
        let relative = workspace_relative(
            Path::new("/elsewhere/app.py"),
            Some(Path::new("/workspace")),
        );

        assert_eq!(relative, Path::new("/elsewhere/app.py"));
    }

    #[test]
    fn workspace_relative_without_root_is_identity() {
        let relative = workspace_relative(Path::new("/workspace/src/app.py"), None);

        assert_eq!(relative, Path::new("/workspace/src/app.py"));
    }

    #[test]
    fn excluded_document_is_rejected_by_filter() {
        let config = Config {
            include: Vec::new(),
            exclude: vec!["^tests/".to_string()],
        };
        let filter = config.path_filter().unwrap();
        let root = Path::new("/workspace");

        let excluded = workspace_relative(Path::new("/workspace/tests/test_app.py"), Some(root));
        let allowed = workspace_relative(Path::new("/workspace/src/app.py"), Some(root));

        assert!(!filter.allows(&excluded));
        assert!(filter.allows(&allowed));
    }
}
