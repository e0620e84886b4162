use indoc::indoc;
use pyskel_engine::{
    multisub, scaffold_class, scaffold_project, Action, CIdent, Config, RelPath, Scaffolder,
    Skeleton, SkeletonError, SkeletonFile, SkeletonSet, VarMap,
};

macro_rules! test_multisub {
    {
        $(#[$meta:meta])*
        $test_name:ident: [$(($key:literal, $value:literal)),* $(,)?]
        applied_to $template:expr => $expected:expr
    } => {
        $(#[$meta])*
        #[test]
        fn $test_name() {
            // Arrange
            let mut vars = VarMap::new();
            $(
                vars.set($key, $value);
            )*

            // Act
            let (output, _) = multisub($template, &vars);

            // Assert
            assert_eq!(output, $expected);
        }
    };
}

test_multisub! {
    renders_a_function_definition: [
        ("PROJECT_MODULE", "spam"),
        ("CLASS_NAME", "Egg"),
    ]
    applied_to indoc! {r#"
        static PyObject *${PROJECT_MODULE}_${CLASS_NAME}_new(PyTypeObject *type) {
          return type->tp_alloc(type, 0);
        }
    "#} => indoc! {r#"
        static PyObject *spam_Egg_new(PyTypeObject *type) {
          return type->tp_alloc(type, 0);
        }
    "#}
}

test_multisub! {
    renders_an_include_guard: [
        ("PROJECT_MODULE_UPPER", "SPAM"),
        ("CLASS_NAME_UPPER", "EGG"),
    ]
    applied_to indoc! {r#"
        #ifndef ${PROJECT_MODULE_UPPER}_${CLASS_NAME_UPPER}_H
        #define ${PROJECT_MODULE_UPPER}_${CLASS_NAME_UPPER}_H
        #endif
    "#} => indoc! {r#"
        #ifndef SPAM_EGG_H
        #define SPAM_EGG_H
        #endif
    "#}
}

test_multisub! {
    leaves_shell_like_text_alone: [
        ("PROJECT_MODULE", "spam"),
    ]
    applied_to "PATH=$PATH:${HOME}/bin build ${PROJECT_MODULE}"
        => "PATH=$PATH:${HOME}/bin build spam"
}

#[test]
fn class_header_renders_completely() {
    // Arrange
    let module = CIdent::new("spam").unwrap();
    let class = CIdent::new("Egg").unwrap();

    // Act
    let plan = scaffold_class(&module, &class, Config::default()).unwrap();

    // Assert
    let header = plan
        .entries
        .iter()
        .find(|entry| entry.dest.as_str() == "Egg.h")
        .unwrap();
    let Action::Render { text, .. } = &header.action else {
        panic!("expected a rendered header, got {:?}", header.action);
    };
    assert_eq!(
        text,
        indoc! {r#"
            #ifndef SPAM_EGG_H
            #define SPAM_EGG_H

            #include "__init__.h"

            typedef struct {
              PyObject_HEAD
              /* Define any instance storage */
            } spam_Egg;

            extern PyTypeObject spam_EggType;

            int spam_Egg_register(PyObject *module);

            #define spam_Egg_CheckExact(op) (Py_TYPE(op) == &spam_EggType)
            #define spam_Egg_Check(op) \
              ((Py_TYPE(op) == &spam_EggType) || PyObject_TypeCheck((PyObject *)(op), &spam_EggType))

            #endif
        "#}
    );
}

#[test]
fn project_scaffolding_writes_all_files() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let module = CIdent::new("mylib").unwrap();
    let plan = scaffold_project(&module, Config::default()).unwrap();

    // Act
    let applied = plan.apply(dir.path()).unwrap();

    // Assert
    assert_eq!(applied.len(), 2);
    let init_c = std::fs::read_to_string(dir.path().join("src/__init__.c")).unwrap();
    assert!(init_c.contains("PyObject *mylib_module;"));
    assert!(init_c.contains("PyMODINIT_FUNC  PyInit__mylib(void)"));
    assert!(!init_c.contains("${"));
    let init_h = std::fs::read_to_string(dir.path().join("src/__init__.h")).unwrap();
    assert!(init_h.contains("#ifndef MYLIB_INIT_H"));
    assert!(init_h.contains("extern PyObject *mylib_module;"));
}

#[test]
fn class_scaffolding_names_files_after_the_class() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let module = CIdent::new("mylib").unwrap();
    let class = CIdent::new("Interval").unwrap();

    // Act
    let applied = scaffold_class(&module, &class, Config::default())
        .unwrap()
        .apply(dir.path())
        .unwrap();

    // Assert
    assert_eq!(
        applied.dest_of("Class.c"),
        Some(dir.path().join("Interval.c")).as_deref()
    );
    let source = std::fs::read_to_string(dir.path().join("Interval.c")).unwrap();
    assert!(source.contains("#include \"Interval.h\""));
    assert!(source.contains("int mylib_Interval_register(PyObject *module)"));
    let header = std::fs::read_to_string(dir.path().join("Interval.h")).unwrap();
    assert!(header.contains("#ifndef MYLIB_INTERVAL_H"));
}

#[test]
fn repeated_scaffolds_collide_without_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let module = CIdent::new("mylib").unwrap();
    let class = CIdent::new("Egg").unwrap();
    scaffold_class(&module, &class, Config::default())
        .unwrap()
        .apply(dir.path())
        .unwrap();

    // Act
    let second = scaffold_class(&module, &class, Config::default())
        .unwrap()
        .apply(dir.path());

    // Assert
    assert!(matches!(second, Err(SkeletonError::DestinationExists(_))));
}

#[test]
fn overwrite_replaces_previous_output() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let module = CIdent::new("mylib").unwrap();
    let class = CIdent::new("Egg").unwrap();
    scaffold_class(&module, &class, Config::default())
        .unwrap()
        .apply(dir.path())
        .unwrap();
    let cfg = Config::builder().overwrite(true).build();

    // Act
    let other = CIdent::new("other").unwrap();
    scaffold_class(&other, &class, cfg).unwrap().apply(dir.path()).unwrap();

    // Assert
    let source = std::fs::read_to_string(dir.path().join("Egg.c")).unwrap();
    assert!(source.contains("other_Egg_register"));
}

#[test]
fn user_skeletons_round_trip_through_the_registry() {
    // Arrange
    let root = tempfile::tempdir().unwrap();
    let skel_dir = root.path().join("webmod");
    std::fs::create_dir_all(skel_dir.join("include")).unwrap();
    std::fs::write(
        skel_dir.join("include/${PROJECT_MODULE}.h"),
        "#pragma once\n\n/* Public API of ${PROJECT_MODULE}. */\n",
    )
    .unwrap();
    let set = SkeletonSet::default().with_root(root.path());
    let dest = tempfile::tempdir().unwrap();

    // Act
    let skeleton = set.find("webmod", &Config::default()).unwrap();
    let applied = Scaffolder::new(Config::default())
        .skeleton(skeleton)
        .var_derived("PROJECT_MODULE", "webmod")
        .build(dest.path())
        .unwrap();

    // Assert
    assert_eq!(applied.len(), 1);
    assert_eq!(
        std::fs::read_to_string(dest.path().join("include/webmod.h")).unwrap(),
        "#pragma once\n\n/* Public API of webmod. */\n"
    );
}

#[test]
fn multiple_skeletons_merge_into_one_plan() {
    // Arrange
    let docs = Skeleton::from_files(
        "docs",
        vec![SkeletonFile::text(
            RelPath::new("README").unwrap(),
            "${PROJECT_MODULE} documentation\n",
        )],
    );

    // Act
    let plan = Scaffolder::new(Config::default())
        .builtin("project")
        .unwrap()
        .skeleton(docs)
        .var_derived("PROJECT_MODULE", "mylib")
        .render()
        .unwrap();

    // Assert
    let dests: Vec<_> = plan
        .entries
        .iter()
        .map(|entry| entry.dest.as_str())
        .collect();
    assert_eq!(
        dests,
        vec!["src", "README", "src/__init__.c", "src/__init__.h"]
    );
}
