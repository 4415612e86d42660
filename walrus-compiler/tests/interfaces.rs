mod common;

use common::*;
use walrus_compiler::{ErrorKind, FunctionType, ScopeKind, Severity, Type, TypeChecker};

#[test]
fn builds_methods_in_source_order() {
    let mut checker = TypeChecker::new("shapes.wal");
    let root = checker.root_scope();
    let declaration = interface_decl(
        vec![
            method("area", Vec::new(), Some(named("f64", span(2, 12))), span(2, 3)),
            method(
                "scale",
                vec![
                    param("factor", named("f32", span(3, 17)), span(3, 9)),
                    optional_param(
                        "origin",
                        array_of(named("i32", span(3, 33)), span(3, 31)),
                        span(3, 22),
                    ),
                ],
                None,
                span(3, 3),
            ),
        ],
        span(1, 1),
    );

    let checked = checker.declare_interface("Shape", &declaration, root);
    assert!(checked.is_clean());

    let interface = &checked.value;
    assert_eq!(interface.name, "Shape");
    let names: Vec<&str> = interface.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["area", "scale"]);

    let area = interface.method("area").unwrap();
    assert_eq!(area.function, FunctionType::new(Vec::new(), Type::float(64)));

    let scale = interface.method("scale").unwrap();
    assert_eq!(*scale.function.return_type, Type::Void);
    assert_eq!(scale.function.params.len(), 2);
    assert_eq!(scale.function.params[0].name, "factor");
    assert_eq!(scale.function.params[0].ty, Type::float(32));
    assert!(scale.function.params[1].is_optional);
    assert_eq!(scale.function.params[1].ty, Type::array(Type::i32()));
    assert_eq!(
        Type::Function(scale.function.clone()).to_string(),
        "fn(f32, []i32?) -> void"
    );
}

#[test]
fn method_scopes_hold_parameters() {
    let mut checker = TypeChecker::new("shapes.wal");
    let root = checker.root_scope();
    let declaration = interface_decl(
        vec![method(
            "resize",
            vec![param("width", named("u32", span(1, 20)), span(1, 13))],
            Some(named("bool", span(1, 28))),
            span(1, 6),
        )],
        span(1, 1),
    );

    let checked = checker.declare_interface("Resizable", &declaration, root);
    let scope = &checked.value.methods[0].scope;
    assert_eq!(scope.kind(), ScopeKind::Method);
    assert_eq!(scope.label(), "resize");
    assert_eq!(scope.parent(), Some(root));
    assert_eq!(scope.binding("width"), Some(&Type::int(32, false)));
    assert_eq!(scope.file_path().to_str(), Some("shapes.wal"));

    // Method scopes do not outlive the declaration.
    assert_eq!(checker.environment().len(), 1);
    assert!(checker.environment().resolve(root, "width").is_err());
}

#[test]
fn duplicate_method_is_reported_once_and_both_kept() {
    let mut checker = TypeChecker::new("runner.wal");
    let root = checker.root_scope();
    let declaration = interface_decl(
        vec![
            method("run", Vec::new(), None, span(2, 3)),
            method(
                "run",
                vec![param("fast", named("bool", span(3, 13)), span(3, 7))],
                None,
                span(3, 3),
            ),
        ],
        span(1, 1),
    );

    let checked = checker.declare_interface("Runner", &declaration, root);
    assert_eq!(checked.value.methods.len(), 2);
    assert_eq!(checked.diagnostics.len(), 1);

    let diagnostic = &checked.diagnostics[0];
    assert_eq!(diagnostic.kind, ErrorKind::DuplicateMethod);
    assert_eq!(diagnostic.severity, Severity::Critical);
    assert_eq!(diagnostic.span, span(3, 3));
    assert_eq!(
        diagnostic.message,
        "method 'run' already exists in interface 'Runner'"
    );
    assert!(!checked.is_blocking());
}

#[test]
fn duplicate_parameter_is_reported_once_and_both_kept() {
    let mut checker = TypeChecker::new("math.wal");
    let root = checker.root_scope();
    let declaration = interface_decl(
        vec![method(
            "add",
            vec![
                param("x", named("i32", span(1, 10)), span(1, 7)),
                param("x", named("i64", span(1, 18)), span(1, 15)),
            ],
            Some(named("i32", span(1, 26))),
            span(1, 3),
        )],
        span(1, 1),
    );

    let checked = checker.declare_interface("Adder", &declaration, root);
    assert_eq!(checked.count_of(ErrorKind::DuplicateParameter), 1);
    assert_eq!(checked.diagnostics.len(), 1);
    assert_eq!(checked.diagnostics[0].severity, Severity::Critical);
    assert_eq!(checked.diagnostics[0].span, span(1, 15));
    assert_eq!(
        checked.diagnostics[0].message,
        "parameter 'x' is already defined for method 'add'"
    );

    let method = &checked.value.methods[0];
    assert_eq!(method.function.params.len(), 2);
    assert_eq!(method.function.params[1].ty, Type::int(64, true));
    // The first declaration owns the binding.
    assert_eq!(method.scope.binding("x"), Some(&Type::i32()));
}

#[test]
fn same_parameter_name_in_different_methods_is_fine() {
    let mut checker = TypeChecker::new("math.wal");
    let root = checker.root_scope();
    let declaration = interface_decl(
        vec![
            method(
                "inc",
                vec![param("x", named("i32", span(1, 8)), span(1, 5))],
                None,
                span(1, 1),
            ),
            method(
                "dec",
                vec![param("x", named("i32", span(2, 8)), span(2, 5))],
                None,
                span(2, 1),
            ),
        ],
        span(1, 1),
    );
    let checked = checker.declare_interface("Counter", &declaration, root);
    assert!(checked.is_clean());
}

#[test]
fn undefined_parameter_type_falls_back_to_unknown() {
    let mut checker = TypeChecker::new("io.wal");
    let root = checker.root_scope();
    let declaration = interface_decl(
        vec![method(
            "write",
            vec![param("buffer", named("Bytes", span(1, 15)), span(1, 7))],
            None,
            span(1, 1),
        )],
        span(1, 1),
    );

    let checked = checker.declare_interface("Writer", &declaration, root);
    assert_eq!(checked.value.methods.len(), 1);
    assert_eq!(checked.value.methods[0].function.params[0].ty, Type::Unknown);
    assert_eq!(checked.diagnostics.len(), 1);
    assert_eq!(checked.diagnostics[0].kind, ErrorKind::UndefinedType);
    assert_eq!(checked.diagnostics[0].message, "undefined type 'Bytes'");
}

#[test]
fn interface_statement_registers_named_type() {
    let mut checker = TypeChecker::new("nodes.wal");
    let module = walrus_compiler::Module::new(vec![
        interface_stmt(
            "Node",
            vec![method(
                "next",
                Vec::new(),
                Some(named("Node", span(2, 13))),
                span(2, 3),
            )],
            span(1, 1),
        ),
        let_stmt("head", Some(named("Node", span(4, 11))), None, span(4, 5)),
    ]);
    checker.check_module(&module);
    assert!(checker.diagnostics().is_empty(), "{:?}", checker.diagnostics());

    let root = checker.root_scope();
    let registered = checker
        .environment()
        .resolve_type(root, "Node")
        .cloned()
        .unwrap();
    let Type::Interface(node) = &registered else {
        panic!("expected interface, found {registered:?}");
    };
    assert_eq!(node.methods.len(), 1);
    assert_eq!(node.methods[0].function.return_type.to_string(), "Node");
    assert_eq!(
        checker.environment().binding_type(root, "head"),
        Some(&registered)
    );
}

#[test]
fn duplicate_interface_name_is_already_declared() {
    let mut checker = TypeChecker::new("dup.wal");
    let module = walrus_compiler::Module::new(vec![
        interface_stmt("Shape", Vec::new(), span(1, 6)),
        interface_stmt(
            "Shape",
            vec![
                method("area", Vec::new(), None, span(3, 3)),
                method("area", Vec::new(), None, span(4, 3)),
            ],
            span(2, 6),
        ),
    ]);
    checker.check_module(&module);

    let diagnostics = checker.diagnostics();
    assert_eq!(diagnostics.count_of(ErrorKind::AlreadyDeclared), 1);
    assert_eq!(diagnostics.count_of(ErrorKind::DuplicateMethod), 1);

    let root = checker.root_scope();
    let Some(Type::Interface(shape)) = checker.environment().resolve_type(root, "Shape") else {
        panic!("Shape should stay registered");
    };
    assert!(shape.methods.is_empty());
}
