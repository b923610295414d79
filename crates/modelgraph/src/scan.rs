//! The scan driver: locator, reader and analyzer feeding the assembler.

use std::path::{self, Path};

use log::{debug, info};

use modelgraph_core::model::Graph;
use modelgraph_parser::{AnalyzeError, PhpAnalyzer, SourceAnalyzer};

use crate::{
    assembler::GraphAssembler,
    config::ScanConfig,
    error::ScanError,
    locator::SourceLocator,
    reader::{FsReader, SourceReader},
};

/// Runs a scan over a workspace.
///
/// Each call to [`Scanner::scan`] owns a fresh [`GraphAssembler`], so no state
/// leaks between runs.
pub struct Scanner {
    config: ScanConfig,
    reader: Box<dyn SourceReader>,
    analyzer: Box<dyn SourceAnalyzer>,
}

impl Scanner {
    /// Creates a scanner reading from the filesystem with a [`PhpAnalyzer`]
    /// limited to `config.max_file_bytes()`.
    pub fn new(config: ScanConfig) -> Self {
        let analyzer = PhpAnalyzer::new().with_max_source_len(config.max_file_bytes());
        Self {
            config,
            reader: Box::new(FsReader),
            analyzer: Box::new(analyzer),
        }
    }

    /// Replaces the file-reading collaborator.
    pub fn with_reader(mut self, reader: impl SourceReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Replaces the source analyzer.
    pub fn with_analyzer(mut self, analyzer: impl SourceAnalyzer + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    /// Scans `root` and returns the graph.
    ///
    /// Never fails: fatal errors produce an empty graph carrying
    /// [`Graph::fatal_error`], per-file errors end up in [`Graph::warnings`].
    pub fn scan(&self, root: Option<&Path>) -> Graph {
        self.try_scan(root)
            .unwrap_or_else(|err| Graph::failed(err.to_string()))
    }

    /// Like [`Scanner::scan`], but returns fatal errors as `Err`.
    ///
    /// A relative `root` is made absolute against the working directory, so
    /// every declared node carries an absolute source path.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NoWorkspace`] if `root` is `None` and
    /// [`ScanError::WorkspaceUnavailable`] if it cannot be enumerated.
    pub fn try_scan(&self, root: Option<&Path>) -> Result<Graph, ScanError> {
        let root = root.ok_or(ScanError::NoWorkspace)?;
        let root = path::absolute(root).map_err(|err| ScanError::WorkspaceUnavailable {
            root: root.to_path_buf(),
            reason: err.to_string(),
        })?;
        info!(root:? = root; "Scanning workspace");

        let locator = SourceLocator::from_config(&root, &self.config);
        let files = locator.files()?;
        let mut assembler = GraphAssembler::new(&root);
        let mut file_count = 0usize;
        let limit = self.config.max_file_bytes();

        for file in files {
            let path = match file {
                Ok(path) => path,
                Err(err) => {
                    assembler.add_error(err);
                    continue;
                }
            };
            file_count += 1;

            if let Some(len) = self.reader.source_len(&path).filter(|&len| len > limit as u64) {
                let source = AnalyzeError::SourceTooLarge {
                    len: usize::try_from(len).unwrap_or(usize::MAX),
                    limit,
                };
                assembler.add_error(ScanError::Analyze { path, source });
                continue;
            }

            let source = match self.reader.read_to_string(&path) {
                Ok(source) => source,
                Err(source) => {
                    assembler.add_error(ScanError::FileRead { path, source });
                    continue;
                }
            };

            match self.analyzer.analyze(&source) {
                Ok(analysis) => {
                    debug!(path:? = path, model = analysis.model().is_some(); "File analysed");
                    assembler.add_analysis(&path, analysis);
                }
                Err(source) => assembler.add_error(ScanError::Analyze { path, source }),
            }
        }

        let graph = assembler.finish();
        info!(
            files = file_count,
            models = graph.node_count(),
            relationships = graph.relationships().len(),
            warnings = graph.warnings().len();
            "Scan finished"
        );
        Ok(graph)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
