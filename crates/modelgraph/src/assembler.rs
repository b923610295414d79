//! Graph assembler: folds per-file analyses into one [`Graph`].
//!
//! The assembler is an owned accumulator local to a single scan. Nodes are
//! keyed by canonical id, so a real declaration always overwrites a
//! placeholder created earlier for the same id.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, trace, warn};

use modelgraph_core::model::{Graph, ModelNode, Relationship};
use modelgraph_parser::{ClassDeclaration, FileAnalysis};

use crate::error::ScanError;

/// Accumulates nodes, relationships and warnings for one scan run.
#[derive(Debug)]
pub struct GraphAssembler {
    root: PathBuf,
    nodes: IndexMap<String, ModelNode>,
    relationships: Vec<Relationship>,
    warnings: Vec<String>,
    /// Classes whose parent did not mark them as models on its own.
    deferred: Vec<(PathBuf, ClassDeclaration)>,
}

impl GraphAssembler {
    /// Creates an empty assembler; display paths are made relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            nodes: IndexMap::new(),
            relationships: Vec::new(),
            warnings: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Path of `path` relative to the scan root, with `/` separators.
    pub fn display_path(&self, path: &Path) -> String {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return path.to_string_lossy().into_owned();
        };
        relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Folds in the analysis of the file at `path`.
    pub fn add_analysis(&mut self, path: &Path, analysis: FileAnalysis) {
        let Some(class) = analysis.into_class() else {
            trace!(path:? = path; "No class declaration");
            return;
        };

        if class.is_model() {
            self.add_model(path, class);
        } else {
            debug!(class = class.id(), parent = class.parent_id(); "Deferring non-model class");
            self.deferred.push((path.to_path_buf(), class));
        }
    }

    /// Records a non-fatal per-file failure as a warning.
    pub fn add_error(&mut self, error: ScanError) {
        let message = error.to_string();
        warn!(warning = message; "Scan warning");
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Promotes deferred classes whose parent turned out to be a model, then
    /// builds the graph.
    pub fn finish(mut self) -> Graph {
        loop {
            let (promoted, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
                .into_iter()
                .partition(|(_, class)| self.is_declared_model(class.parent_id()));
            self.deferred = rest;

            if promoted.is_empty() {
                break;
            }
            for (path, class) in promoted {
                debug!(class = class.id(), parent = class.parent_id(); "Promoting subclass of model");
                self.add_model(&path, class);
            }
        }

        debug!(
            nodes = self.nodes.len(),
            relationships = self.relationships.len(),
            warnings = self.warnings.len();
            "Graph assembled"
        );
        Graph::from_parts(self.nodes.into_values(), self.relationships, self.warnings)
    }

    fn is_declared_model(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(|node| !node.is_placeholder())
    }

    fn add_model(&mut self, path: &Path, class: ClassDeclaration) {
        let node = ModelNode::declared(class.id(), path, self.display_path(path));
        match self.nodes.insert(node.id().to_string(), node) {
            Some(previous) if previous.is_placeholder() => {
                debug!(id = class.id(); "Placeholder replaced by declaration");
            }
            Some(_) => {
                debug!(id = class.id(), path:? = path; "Duplicate declaration, keeping the later one");
            }
            None => {}
        }

        for extracted in class.relationships() {
            let relationship = Relationship::new(
                class.id(),
                extracted.target_id(),
                extracted.kind().clone(),
                extracted.method(),
                path,
            );
            if !self.nodes.contains_key(relationship.target_id()) {
                let placeholder = ModelNode::placeholder(relationship.target_id());
                self.nodes.insert(placeholder.id().to_string(), placeholder);
            }
            trace!(
                source = relationship.source_id(),
                target = relationship.target_id(),
                method = relationship.method();
                "Relationship added"
            );
            self.relationships.push(relationship);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use modelgraph_parser::analyze;

    fn add_source(assembler: &mut GraphAssembler, path: &str, source: &str) {
        let analysis = analyze(source).unwrap();
        assembler.add_analysis(Path::new(path), analysis);
    }

    #[test]
    fn test_placeholder_promoted_by_later_declaration() {
        let mut assembler = GraphAssembler::new("/ws");
        add_source(
            &mut assembler,
            "/ws/app/Foo.php",
            r#"<?php
namespace Ns;
class Foo extends Model {
    public function bar() { return $this->hasOne(Bar::class); }
}"#,
        );
        add_source(
            &mut assembler,
            "/ws/app/Bar.php",
            "<?php\nnamespace Ns;\nclass Bar extends Model {}\n",
        );

        let graph = assembler.finish();

        assert_eq!(graph.node_count(), 2);
        let bar = graph.node("Ns\\Bar").unwrap();
        assert!(!bar.is_placeholder());
        assert_eq!(bar.source_path(), Some(Path::new("/ws/app/Bar.php")));
        assert_eq!(bar.display_path(), Some("app/Bar.php"));
    }

    #[test]
    fn test_placeholder_synthesized_for_unscanned_target() {
        let mut assembler = GraphAssembler::new("/ws");
        add_source(
            &mut assembler,
            "/ws/Post.php",
            r#"<?php
namespace App;
use Billing\Models\Invoice;
class Post extends Model {
    public function invoice() { return $this->hasOne(Invoice::class); }
}"#,
        );

        let graph = assembler.finish();

        let invoice = graph.node("Billing\\Models\\Invoice").unwrap();
        assert!(invoice.is_placeholder());
        assert_eq!(invoice.simple_name(), "Invoice");
        assert_eq!(invoice.namespace(), "Billing\\Models");
        assert_eq!(graph.relationships()[0].source_id(), "App\\Post");
    }

    #[test]
    fn test_subclass_of_scanned_model_promoted_transitively() {
        let mut assembler = GraphAssembler::new("/ws");
        add_source(
            &mut assembler,
            "/ws/SuperAdmin.php",
            r#"<?php
namespace App;
class SuperAdmin extends Admin {
    public function audits() { return $this->hasMany(Audit::class); }
}"#,
        );
        add_source(
            &mut assembler,
            "/ws/Admin.php",
            "<?php\nnamespace App;\nclass Admin extends User {}\n",
        );
        add_source(
            &mut assembler,
            "/ws/User.php",
            "<?php\nnamespace App;\nuse Illuminate\\Database\\Eloquent\\Model;\nclass User extends Model {}\n",
        );
        add_source(
            &mut assembler,
            "/ws/Job.php",
            "<?php\nnamespace App;\nclass Job extends Dispatchable {}\n",
        );

        let graph = assembler.finish();

        assert!(graph.contains_node("App\\User"));
        assert!(graph.contains_node("App\\Admin"));
        assert!(graph.contains_node("App\\SuperAdmin"));
        assert!(!graph.contains_node("App\\Job"));
        assert_eq!(graph.relationships().len(), 1);
        assert!(graph.node("App\\Audit").unwrap().is_placeholder());
    }

    #[test]
    fn test_errors_become_warnings() {
        let mut assembler = GraphAssembler::new("/ws");
        assembler.add_error(ScanError::FileRead {
            path: PathBuf::from("/ws/Broken.php"),
            source: std::io::Error::other("boom"),
        });

        assert_eq!(assembler.warnings(), ["Could not parse /ws/Broken.php: boom"]);
        let graph = assembler.finish();
        assert_eq!(graph.warnings().len(), 1);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_display_path_outside_root_kept() {
        let assembler = GraphAssembler::new("/ws");
        assert_eq!(assembler.display_path(Path::new("/ws/a/b.php")), "a/b.php");
        assert_eq!(assembler.display_path(Path::new("/other/c.php")), "/other/c.php");
    }
}
