//! Binding references to fully qualified names through the facade.

mod helpers;

use helpers::{FixtureOracle, parse_expr, parse_file, reference};
use rebind::base::FqName;
use rebind::parser::SyntaxKind;
use rebind::parser::ast::{AstNode, NameRef};
use rebind::resolve::{DeclKind, ProjectModel};
use rebind::{ExecutionContext, FileId, Refactoring, ShorteningMode, SimpleNameReference};

#[test]
fn call_arguments_are_preserved() {
    let oracle = FixtureOracle::new();
    let root = parse_expr("Foo(x, y)");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "Foo", FileId::new(0)),
            &FqName::from_dotted("pkg.Foo"),
            ShorteningMode::NoShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "pkg.Foo(x, y)");
}

#[test]
fn existing_qualifier_is_replaced_not_stacked() {
    let oracle = FixtureOracle::new();
    let root = parse_expr("wrong.pkg.Foo(x)");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "Foo", FileId::new(0)),
            &FqName::from_dotted("right.Foo"),
            ShorteningMode::NoShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "right.Foo(x)");
}

#[test]
fn callable_reference_receiver_becomes_qualifier() {
    let oracle = FixtureOracle::new();
    let root = parse_expr("instance::method");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "method", FileId::new(0)),
            &FqName::from_dotted("a.b.method"),
            ShorteningMode::NoShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "a.b::method");
}

#[test]
fn callable_reference_to_top_level_target_gains_an_import() {
    let mut oracle = FixtureOracle::new();
    let target = oracle.declare("a.b.bar", DeclKind::Function, FileId::new(1), true);

    let root = parse_file("package p\nthis::bar");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "bar", FileId::new(0)),
            &FqName::from_dotted("a.b.bar"),
            ShorteningMode::NoShortening,
            Some(target),
        )
        .unwrap();
    // The receiver goes away instead of becoming a package qualifier; the
    // target is imported when the queue is processed.
    assert_eq!(root.text().to_string(), "package p\n::bar");
    assert!(!refactoring.queue().is_empty());
    assert_eq!(refactoring.process_shortening(), 0);
    assert_eq!(root.text().to_string(), "package p\nimport a.b.bar\n::bar");
    assert!(refactoring.queue().is_empty());
}

#[test]
fn quoted_segments_render_with_backticks() {
    let oracle = FixtureOracle::new();
    let root = parse_expr("C(x)");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "C", FileId::new(0)),
            &FqName::from_dotted("a.`this`.C"),
            ShorteningMode::NoShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "a.`this`.C(x)");
}

#[test]
fn instance_receiver_is_never_requalified() {
    let oracle = FixtureOracle::new();
    let root = parse_expr("this.field");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "this", FileId::new(0)),
            &FqName::from_dotted("a.b.T"),
            ShorteningMode::NoShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "this.field");
}

#[test]
fn shadowed_root_segment_forces_the_root_marker() {
    let oracle = FixtureOracle::new();
    let mut project = ProjectModel::new();
    project.add_shadowed_root(FileId::new(0), "collections");

    let root = parse_expr("List(x)");
    let refactoring = Refactoring::new(&oracle).with_project(project);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "List", FileId::new(0)),
            &FqName::from_dotted("collections.List"),
            ShorteningMode::NoShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "_root_.collections.List(x)");
}

#[test]
fn bind_then_shorten_round_trips_when_import_exists() {
    let mut oracle = FixtureOracle::new();
    oracle.declare("a.b.C", DeclKind::Type, FileId::new(1), true);

    let root = parse_file("package p\nimport a.b.C\nC(x)");
    let before = root.text().to_string();
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "C", FileId::new(0)),
            &FqName::from_dotted("a.b.C"),
            ShorteningMode::ForcedShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), before);
}

#[test]
fn delayed_shortening_applies_on_queue_processing() {
    let mut oracle = FixtureOracle::new();
    let target = oracle.declare("a.b.C", DeclKind::Type, FileId::new(1), true);
    oracle.make_visible(target);

    let root = parse_file("package p\nC(x)");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "C", FileId::new(0)),
            &FqName::from_dotted("a.b.C"),
            ShorteningMode::DelayedShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "package p\na.b.C(x)");
    assert_eq!(refactoring.process_shortening(), 1);
    assert_eq!(root.text().to_string(), "package p\nC(x)");
}

#[test]
fn background_execution_shortens_without_a_queue_flush() {
    let mut oracle = FixtureOracle::new();
    let target = oracle.declare("a.b.C", DeclKind::Type, FileId::new(1), true);
    oracle.make_visible(target);

    let root = parse_file("package p\nC(x)");
    let refactoring = Refactoring::new(&oracle).with_execution(ExecutionContext::Background);
    refactoring
        .bind_to_fq_name(
            &reference(&root, "C", FileId::new(0)),
            &FqName::from_dotted("a.b.C"),
            ShorteningMode::DelayedShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "package p\nC(x)");
}

#[test]
fn bind_to_declaration_resolves_the_fq_name() {
    let mut oracle = FixtureOracle::new();
    let target = oracle.declare("lib.util.helper", DeclKind::Function, FileId::new(1), true);

    let root = parse_expr("helper(x)");
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_declaration(&reference(&root, "helper", FileId::new(0)), target)
        .unwrap();
    // Delayed shortening by default: the qualified form stays until the
    // queue is processed.
    assert_eq!(root.text().to_string(), "lib.util.helper(x)");
}

#[test]
fn import_directive_references_are_rewritten_but_not_shortened() {
    let mut oracle = FixtureOracle::new();
    let target = oracle.declare("a.b.C", DeclKind::Type, FileId::new(1), true);
    oracle.make_visible(target);

    let root = parse_file("import old.C\nC(x)");
    let import_ref = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::IMPORT_DIRECTIVE)
        .and_then(|directive| {
            directive
                .descendants()
                .filter_map(NameRef::cast)
                .find(|n| n.name() == "C")
        })
        .map(|name| SimpleNameReference::new(name, FileId::new(0)))
        .unwrap();
    let refactoring = Refactoring::new(&oracle);
    refactoring
        .bind_to_fq_name(
            &import_ref,
            &FqName::from_dotted("a.b.C"),
            ShorteningMode::ForcedShortening,
            None,
        )
        .unwrap();
    assert_eq!(root.text().to_string(), "import a.b.C\nC(x)");
    assert!(refactoring.queue().is_empty());
}
