use std::{fs, path::Path};

use tempfile::tempdir;

use modelgraph::ModelGraphError;
use modelgraph_cli::{Args, OutputFormat, run};

fn write(root: &Path, relative: &str, source: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

fn blog_workspace(root: &Path) {
    write(
        root,
        "app/Models/Post.php",
        r"<?php
namespace App\Models;

use Illuminate\Database\Eloquent\Model;

class Post extends Model
{
    public function comments()
    {
        return $this->hasMany(Comment::class);
    }

    public function author()
    {
        return $this->belongsTo(User::class, 'user_id');
    }
}
",
    );
    write(
        root,
        "app/Models/Comment.php",
        r"<?php
namespace App\Models;

use Illuminate\Database\Eloquent\Model;

class Comment extends Model
{
    public function post()
    {
        return $this->belongsTo(Post::class);
    }
}
",
    );
    write(
        root,
        "app/Http/Controllers/PostController.php",
        r"<?php
namespace App\Http\Controllers;

class PostController extends Controller
{
}
",
    );
}

fn args(root: &Path, format: OutputFormat, output: &Path) -> Args {
    Args {
        root: Some(root.to_string_lossy().to_string()),
        format,
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        filter: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_text_report() {
    let workspace = tempdir().expect("Failed to create temp directory");
    let out = tempdir().expect("Failed to create temp directory");
    blog_workspace(workspace.path());
    let output = out.path().join("report.txt");

    run(&args(workspace.path(), OutputFormat::Text, &output)).expect("Text run failed");

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("Models: 3 (1 placeholder)\n"));
    assert!(report.contains("App\\Models\\Post (app/Models/Post.php)"));
    assert!(report.contains("comments() hasMany -> App\\Models\\Comment"));
    assert!(report.contains("App\\Models\\User (placeholder)"));
    assert!(!report.contains("PostController"));
}

#[test]
fn e2e_smoke_test_json_graph() {
    let workspace = tempdir().expect("Failed to create temp directory");
    let out = tempdir().expect("Failed to create temp directory");
    blog_workspace(workspace.path());
    let output = out.path().join("graph.json");

    run(&args(workspace.path(), OutputFormat::Json, &output)).expect("JSON run failed");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json["nodes"]["App\\Models\\Comment"].is_object());
    assert_eq!(json["relationships"].as_array().unwrap().len(), 3);
}

#[test]
fn e2e_smoke_test_filtered_svg() {
    let workspace = tempdir().expect("Failed to create temp directory");
    let out = tempdir().expect("Failed to create temp directory");
    blog_workspace(workspace.path());
    let output = out.path().join("graph.svg");

    let mut args = args(workspace.path(), OutputFormat::Svg, &output);
    args.filter = Some("user".to_string());
    run(&args).expect("SVG run failed");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("data-id=\"App\\Models\\User\""));
    assert!(svg.contains("data-id=\"App\\Models\\Post\""));
    assert!(!svg.contains("data-id=\"App\\Models\\Comment\""));
}

#[test]
fn e2e_smoke_test_config_file_applied() {
    let workspace = tempdir().expect("Failed to create temp directory");
    let out = tempdir().expect("Failed to create temp directory");
    blog_workspace(workspace.path());
    write(workspace.path(), "legacy/Old.php", "<?php\nclass Old extends Model {}\n");
    let config_path = out.path().join("config.toml");
    fs::write(&config_path, "[scan]\nexcluded_dirs = [\"legacy\"]\n").unwrap();
    let output = out.path().join("report.txt");

    let mut args = args(workspace.path(), OutputFormat::Text, &output);
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Run with config failed");

    let report = fs::read_to_string(&output).unwrap();
    assert!(!report.contains("legacy/"));
    assert!(report.starts_with("Models: 3 "));
}

#[test]
fn e2e_missing_workspace_is_scan_error() {
    let out = tempdir().expect("Failed to create temp directory");
    let output = out.path().join("report.txt");

    let err = run(&args(&out.path().join("missing"), OutputFormat::Text, &output)).unwrap_err();

    assert!(matches!(err, ModelGraphError::Scan(_)));
    assert!(!output.exists());
}
