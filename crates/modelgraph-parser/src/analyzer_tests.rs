//! Whole-file tests for the PHP analyzer.
//!
//! These run complete model sources through [`PhpAnalyzer`] and check the
//! classification and relationship extraction together.

use modelgraph_core::model::{Cardinality, RelationKind};

use crate::{AnalyzeError, FileAnalysis, PhpAnalyzer, SourceAnalyzer};

fn analyze(source: &str) -> FileAnalysis {
    PhpAnalyzer::default()
        .analyze(source)
        .expect("analysis should succeed")
}

const POST: &str = r#"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;
use Illuminate\Database\Eloquent\Relations\HasMany;
use App\Models\Taxonomy\Tag as Label;

class Post extends Model
{
    use HasFactory;

    protected $fillable = ['title', 'body'];

    public function comments(): HasMany
    {
        return $this->hasMany(Comment::class);
    }

    public function author()
    {
        return $this->belongsTo(User::class, 'author_id');
    }

    public function labels()
    {
        return $this->belongsToMany(Label::class)->withTimestamps();
    }

    public function image()
    {
        return $this->morphOne('App\Models\Image', 'imageable');
    }

    public function getTitleAttribute($value)
    {
        return ucfirst($value);
    }
}
"#;

#[test]
fn test_post_model_is_classified() {
    let analysis = analyze(POST);

    assert_eq!(analysis.namespace(), "App\\Models");
    let class = analysis.model().expect("Post is a model");
    assert_eq!(class.id(), "App\\Models\\Post");
    assert_eq!(class.name(), "Post");
    assert_eq!(class.parent_id(), "Illuminate\\Database\\Eloquent\\Model");
}

#[test]
fn test_post_relationships_in_declaration_order() {
    let analysis = analyze(POST);
    let class = analysis.model().expect("Post is a model");

    let found: Vec<(&str, &str, &str)> = class
        .relationships()
        .iter()
        .map(|rel| (rel.method(), rel.kind().helper_name(), rel.target_id()))
        .collect();

    assert_eq!(
        found,
        vec![
            ("comments", "hasMany", "App\\Models\\Comment"),
            ("author", "belongsTo", "App\\Models\\User"),
            ("labels", "belongsToMany", "App\\Models\\Taxonomy\\Tag"),
            ("image", "morphOne", "App\\Models\\Image"),
        ]
    );
}

#[test]
fn test_authenticatable_user_is_a_model() {
    let source = r#"<?php
namespace App\Models;

use Illuminate\Foundation\Auth\User as Authenticatable;

class User extends Authenticatable
{
    public function posts()
    {
        return $this->hasMany(Post::class, 'author_id');
    }
}
"#;
    let analysis = analyze(source);
    let class = analysis.model().expect("User is a model");
    assert_eq!(class.parent_id(), "Illuminate\\Foundation\\Auth\\User");
    assert_eq!(class.relationships().len(), 1);
}

#[test]
fn test_custom_base_model_suffix() {
    let source = r#"<?php
namespace App\Models;

abstract class Invoice extends TenantModel
{
}
"#;
    let analysis = analyze(source);
    let class = analysis.model().expect("suffix heuristic applies");
    assert_eq!(class.parent_id(), "App\\Models\\TenantModel");
}

#[test]
fn test_non_model_class_keeps_declaration() {
    let source = r#"<?php
namespace App\Models;

class Admin extends User
{
    public function team()
    {
        return $this->belongsTo(Team::class);
    }
}
"#;
    let analysis = analyze(source);
    assert!(analysis.model().is_none());

    let class = analysis.class().expect("declaration is kept");
    assert!(!class.is_model());
    assert_eq!(class.parent_id(), "App\\Models\\User");
    assert_eq!(class.relationships()[0].target_id(), "App\\Models\\Team");
}

#[test]
fn test_controller_is_not_a_model() {
    let source = r#"<?php
namespace App\Http\Controllers;

class PostController extends Controller
{
    public function index()
    {
        return view('posts.index');
    }
}
"#;
    let analysis = analyze(source);
    assert!(analysis.model().is_none());
}

#[test]
fn test_file_without_class() {
    let analysis = analyze("<?php\n\nreturn ['debug' => true];\n");
    assert!(analysis.class().is_none());
    assert_eq!(analysis.namespace(), "");
}

#[test]
fn test_global_namespace_model() {
    let source = r#"<?php
use Illuminate\Database\Eloquent\Model;

class Setting extends Model
{
    public function owner()
    {
        return $this->belongsTo(Account::class);
    }
}
"#;
    let analysis = analyze(source);
    let class = analysis.model().expect("Setting is a model");
    assert_eq!(class.id(), "Setting");
    assert_eq!(class.relationships()[0].target_id(), "Account");
}

#[test]
fn test_dynamic_target_is_dropped() {
    let source = r#"<?php
namespace App;

use Illuminate\Database\Eloquent\Model;

class Widget extends Model
{
    public function parts()
    {
        return $this->belongsToMany($this->buildDynamicClass());
    }
}
"#;
    let analysis = analyze(source);
    let class = analysis.model().expect("Widget is a model");
    assert!(class.relationships().is_empty());
}

#[test]
fn test_concatenated_string_target_is_dropped() {
    let source = r#"<?php
namespace App\Models;

use Illuminate\Database\Eloquent\Model;

class Comment extends Model
{
    public function author()
    {
        return $this->belongsTo('App\\Models\\' . 'User');
    }

    public function post()
    {
        return $this->belongsTo('App\\Models\\Post');
    }
}
"#;
    let analysis = analyze(source);
    let class = analysis.model().expect("Comment is a model");
    let targets: Vec<&str> = class
        .relationships()
        .iter()
        .map(|relationship| relationship.target_id())
        .collect();
    assert_eq!(targets, vec!["App\\Models\\Post"]);
}

#[test]
fn test_morph_to_without_arguments_is_dropped() {
    let source = r#"<?php
namespace App;

class Comment extends Model
{
    public function commentable()
    {
        return $this->morphTo();
    }
}
"#;
    let analysis = analyze(source);
    assert!(analysis.model().expect("model").relationships().is_empty());
}

#[test]
fn test_unknown_helpers_are_not_relationships() {
    let source = r#"<?php
namespace App;

class Order extends Model
{
    public function total()
    {
        return $this->sumLines(Line::class);
    }

    public function customer()
    {
        return $this->belongsToThrough(Customer::class, Account::class);
    }
}
"#;
    let analysis = analyze(source);
    let relationships = analysis.model().expect("model").relationships();

    assert_eq!(relationships.len(), 1);
    let rel = &relationships[0];
    assert_eq!(rel.method(), "customer");
    assert_eq!(rel.kind(), &RelationKind::Other("belongsToThrough".to_string()));
    assert_eq!(rel.kind().label(), "belongsToThrough");
    assert_eq!(rel.kind().cardinalities(), (Cardinality::One, Cardinality::One));
}

#[test]
fn test_only_first_relationship_per_method() {
    let source = r#"<?php
namespace App;

class Post extends Model
{
    public function related()
    {
        if ($this->legacy) return $this->hasMany(LegacyComment::class);
        return $this->hasMany(Comment::class);
    }
}
"#;
    let analysis = analyze(source);
    let relationships = analysis.model().expect("model").relationships();
    assert_eq!(relationships.len(), 1);
    assert_eq!(relationships[0].target_id(), "App\\LegacyComment");
}

#[test]
fn test_self_referencing_relationship() {
    let source = r#"<?php
namespace App;

class Category extends Model
{
    public function parent()
    {
        return $this->belongsTo(self::class, 'parent_id');
    }
}
"#;
    let analysis = analyze(source);
    let relationships = analysis.model().expect("model").relationships();
    assert_eq!(relationships[0].target_id(), "App\\Category");
}

#[test]
fn test_second_class_methods_are_attributed_to_first() {
    let source = r#"<?php
namespace App;

class Post extends Model
{
}

class Draft extends Model
{
    public function editor()
    {
        return $this->belongsTo(Editor::class);
    }
}
"#;
    let analysis = analyze(source);
    let class = analysis.model().expect("model");
    assert_eq!(class.id(), "App\\Post");
    assert_eq!(class.relationships()[0].target_id(), "App\\Editor");
}

#[test]
fn test_source_too_large() {
    let analyzer = PhpAnalyzer::default().with_max_source_len(8);
    let err = analyzer
        .analyze("<?php class A extends Model {}")
        .expect_err("source exceeds the limit");
    assert_eq!(err, AnalyzeError::SourceTooLarge { len: 30, limit: 8 });
    assert_eq!(
        err.to_string(),
        "source is 30 bytes, larger than the 8 byte analysis limit"
    );
}
