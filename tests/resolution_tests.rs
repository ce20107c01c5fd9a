//! Reference resolution: accessor decomposition, the candidate filter, and
//! import-alias lookup.

mod helpers;

use helpers::{FixtureOracle, parse_expr, parse_file, reference};
use rebind::FileId;
use rebind::Refactoring;
use rebind::resolve::{DeclKind, DeclarationId, ProjectModel, RawTarget};

fn property_oracle() -> (FixtureOracle, DeclarationId, DeclarationId, DeclarationId) {
    let mut oracle = FixtureOracle::new();
    let property = oracle.declare("pkg.value", DeclKind::Property, FileId::new(1), true);
    let getter = oracle.declare("pkg.value.get", DeclKind::Getter, FileId::new(1), false);
    let setter = oracle.declare("pkg.value.set", DeclKind::Setter, FileId::new(1), false);
    oracle.bind(
        "value",
        RawTarget::Property {
            property,
            getter: Some(getter),
            setter: Some(setter),
        },
    );
    (oracle, property, getter, setter)
}

#[test]
fn read_reference_resolves_to_getter() {
    let (oracle, _, getter, _) = property_oracle();
    let root = parse_expr("f(value)");
    let refactoring = Refactoring::new(&oracle);
    let targets = refactoring.resolve(&reference(&root, "value", FileId::new(0)));
    assert_eq!(targets, vec![getter]);
}

#[test]
fn write_reference_resolves_to_setter() {
    let (oracle, _, _, setter) = property_oracle();
    let root = parse_expr("value = x");
    let refactoring = Refactoring::new(&oracle);
    let targets = refactoring.resolve(&reference(&root, "value", FileId::new(0)));
    assert_eq!(targets, vec![setter]);
}

#[test]
fn read_write_reference_resolves_to_both_accessors() {
    let (oracle, _, getter, setter) = property_oracle();
    let root = parse_expr("value += x");
    let refactoring = Refactoring::new(&oracle);
    let targets = refactoring.resolve(&reference(&root, "value", FileId::new(0)));
    assert_eq!(targets, vec![getter, setter]);
}

#[test]
fn property_without_accessors_resolves_to_itself() {
    let mut oracle = FixtureOracle::new();
    let property = oracle.declare("pkg.bare", DeclKind::Property, FileId::new(1), true);
    oracle.bind(
        "bare",
        RawTarget::Property {
            property,
            getter: None,
            setter: None,
        },
    );
    let root = parse_expr("bare += x");
    let refactoring = Refactoring::new(&oracle);
    let targets = refactoring.resolve(&reference(&root, "bare", FileId::new(0)));
    assert_eq!(targets, vec![property]);
}

#[test]
fn unresolved_reference_yields_empty_set() {
    let oracle = FixtureOracle::new();
    let root = parse_expr("mystery");
    let refactoring = Refactoring::new(&oracle);
    assert!(refactoring
        .resolve(&reference(&root, "mystery", FileId::new(0)))
        .is_empty());
}

#[test]
fn candidate_filter_accepts_same_file_and_project_sources() {
    let mut oracle = FixtureOracle::new();
    let same_file = oracle.declare("pkg.here", DeclKind::Function, FileId::new(0), true);
    let elsewhere = oracle.declare("pkg.there", DeclKind::Function, FileId::new(9), true);

    let mut project = ProjectModel::new();
    project.add_project_file(FileId::new(5));

    let refactoring = Refactoring::new(&oracle).with_project(project);

    let root = parse_expr("here");
    let outside = reference(&root, "here", FileId::new(0));
    assert!(refactoring.can_be_reference_to(&outside, same_file));
    assert!(!refactoring.can_be_reference_to(&outside, elsewhere));

    // From a project file every candidate passes the coarse filter.
    let in_project = reference(&root, "here", FileId::new(5));
    assert!(refactoring.can_be_reference_to(&in_project, elsewhere));
}

#[test]
fn import_alias_is_found_when_targets_agree() {
    let mut oracle = FixtureOracle::new();
    let target = oracle.declare("a.b.C", DeclKind::Type, FileId::new(1), true);
    oracle.bind("AC", RawTarget::Declaration(target));

    let root = parse_file("import a.b.C as AC\nAC(x)");
    let refactoring = Refactoring::new(&oracle);
    let alias = refactoring
        .import_alias(&reference(&root, "AC", FileId::new(0)))
        .expect("alias should be found");
    assert_eq!(alias.name(), "AC");
}

#[test]
fn coincidental_alias_name_is_not_an_alias_reference() {
    let mut oracle = FixtureOracle::new();
    oracle.declare("a.b.C", DeclKind::Type, FileId::new(1), true);
    let unrelated = oracle.declare("d.E", DeclKind::Type, FileId::new(2), true);
    // The reference named AC resolves to an unrelated declaration.
    oracle.bind("AC", RawTarget::Declaration(unrelated));

    let root = parse_file("import a.b.C as AC\nAC(x)");
    let refactoring = Refactoring::new(&oracle);
    assert!(refactoring
        .import_alias(&reference(&root, "AC", FileId::new(0)))
        .is_none());
}
