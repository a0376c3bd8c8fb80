use super::*;
use crate::env::Environment;
use proptest::{strategy::ValueTree, test_runner::TestRunner};
use protostrat_schema::{
    FieldDescriptor, FieldKind, FileDescriptor, Label, MessageDescriptor, ScalarKind,
};

// ---- helpers -----------------------------------------------------------

fn file() -> FileDescriptor {
    FileDescriptor::new("t.proto", "t")
        .with_enum(
            protostrat_schema::EnumDescriptor::new("t.Color")
                .with_value("RED", 0)
                .with_value("GREEN", 5)
                .with_value("BLUE", 9),
        )
        .with_message(MessageDescriptor::new("t.Old").deprecated())
        .with_message(
            MessageDescriptor::new("t.Holder")
                .with_field(FieldDescriptor::scalar(
                    "count",
                    1,
                    Label::Required,
                    ScalarKind::Uint32,
                ))
                .with_field(FieldDescriptor::enumeration(
                    "color",
                    2,
                    Label::Optional,
                    "t.Color",
                ))
                .with_field(FieldDescriptor::message("old", 3, Label::Required, "t.Old"))
                .with_field(FieldDescriptor::message(
                    "labels",
                    4,
                    Label::Repeated,
                    "t.Holder.LabelsEntry",
                ))
                .with_nested_message(
                    MessageDescriptor::new("t.Holder.LabelsEntry")
                        .map_entry()
                        .with_field(FieldDescriptor::scalar(
                            "key",
                            1,
                            Label::Optional,
                            ScalarKind::String,
                        ))
                        .with_field(FieldDescriptor::scalar(
                            "value",
                            2,
                            Label::Optional,
                            ScalarKind::Sint32,
                        )),
                ),
        )
}

fn with_compiler<R>(
    files: &[FileDescriptor],
    overrides: &Overrides,
    f: impl FnOnce(&Compiler<'_>, &mut Environment) -> R,
) -> R {
    let pool = DescriptorPool::new(files);
    let config = Config::default();
    let guard = RecursionGuard::new(config.max_recursion_depth);
    let mut env = Environment::new(guard.clone());
    let compiler = Compiler::new(&pool, overrides, &config, guard);

    f(&compiler, &mut env)
}

fn samples(generator: &Generator, n: usize) -> Vec<Value> {
    let mut runner = TestRunner::deterministic();
    (0..n)
        .map(|_| generator.new_tree(&mut runner).unwrap().current())
        .collect()
}

fn holder(files: &[FileDescriptor]) -> &MessageDescriptor {
    files[0].messages.iter().find(|m| m.full_name == "t.Holder").unwrap()
}

// ---- enums -------------------------------------------------------------

#[test]
fn enums_sample_declared_numbers_only() {
    let files = vec![file()];
    with_compiler(&files, &Overrides::new(), |compiler, _| {
        let generator = compiler.compile_enum(&files[0].enums[0]).unwrap();

        for v in samples(&generator, 100) {
            assert!(matches!(v, Value::Enum(0 | 5 | 9)), "unexpected {v:?}");
        }
    });
}

#[test]
fn empty_enum_is_fatal() {
    let files = vec![FileDescriptor::new("e.proto", "e")];
    with_compiler(&files, &Overrides::new(), |compiler, _| {
        let err = compiler
            .compile_enum(&protostrat_schema::EnumDescriptor::new("e.Nothing"))
            .unwrap_err();

        assert_eq!(
            err,
            CompileError::EmptyEnum {
                name: "e.Nothing".to_string()
            }
        );
    });
}

#[test]
fn enum_override_is_keyed_by_type_name() {
    let files = vec![file()];
    let overrides = Overrides::new().replace("t.Color", Just(Value::Enum(5)));
    with_compiler(&files, &overrides, |compiler, _| {
        let generator = compiler.compile_enum(&files[0].enums[0]).unwrap();

        assert!(samples(&generator, 20).iter().all(|v| *v == Value::Enum(5)));
    });
}

// ---- fields ------------------------------------------------------------

#[test]
fn enum_field_before_enum_is_loaded_is_not_found() {
    let files = vec![file()];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let holder = holder(&files);
        let err = compiler
            .compile_field(env, holder, holder.field("color").unwrap(), &mut Uses::new())
            .unwrap_err();

        assert_eq!(err, CompileError::not_found("t.Color"));
    });
}

#[test]
fn deprecated_message_field_is_always_absent() {
    let files = vec![file()];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let holder = holder(&files);
        // t.Old is never loaded, yet the field still compiles
        let generator = compiler
            .compile_field(env, holder, holder.field("old").unwrap(), &mut Uses::new())
            .unwrap();

        assert!(samples(&generator, 50).iter().all(Value::is_absent));
    });
}

#[test]
fn deprecated_applies_to_every_label() {
    for label in [Label::Optional, Label::Repeated, Label::Required] {
        let files = vec![
            FileDescriptor::new("d.proto", "d")
                .with_message(MessageDescriptor::new("d.Old").deprecated())
                .with_message(
                    MessageDescriptor::new("d.User")
                        .with_field(FieldDescriptor::message("old", 1, label, "d.Old")),
                ),
        ];
        with_compiler(&files, &Overrides::new(), |compiler, env| {
            let user = &files[0].messages[1];
            let generator = compiler
                .compile_field(env, user, &user.fields[0], &mut Uses::new())
                .unwrap();

            assert!(
                samples(&generator, 20).iter().all(Value::is_absent),
                "{label} reference to a deprecated type should be absent"
            );
        });
    }
}

#[test]
fn map_fields_never_contain_absent_keys_or_values() {
    let files = vec![file()];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let holder = holder(&files);
        let generator = compiler
            .compile_field(env, holder, holder.field("labels").unwrap(), &mut Uses::new())
            .unwrap();

        let values = samples(&generator, 100);
        let mut saw_entry = false;
        for v in &values {
            let map = v.as_map().expect("map fields yield maps");
            for (key, value) in map {
                saw_entry = true;
                assert!(matches!(key, crate::value::MapKey::Text(_)));
                assert!(matches!(value, Value::Int32(_)));
            }
        }
        assert!(saw_entry);
    });
}

#[test]
fn malformed_map_entry_is_fatal() {
    let files = vec![
        FileDescriptor::new("m.proto", "m").with_message(
            MessageDescriptor::new("m.Bad")
                .with_field(FieldDescriptor::message(
                    "entries",
                    1,
                    Label::Repeated,
                    "m.Bad.Entry",
                ))
                .with_nested_message(MessageDescriptor::new("m.Bad.Entry").map_entry()),
        ),
    ];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let bad = &files[0].messages[0];
        let err = compiler
            .compile_field(env, bad, &bad.fields[0], &mut Uses::new())
            .unwrap_err();

        assert!(matches!(err, CompileError::MalformedMapEntry { found: 0, .. }));
    });
}

#[test]
fn group_fields_are_unsupported() {
    let files = vec![
        FileDescriptor::new("g.proto", "g").with_message(MessageDescriptor::new("g.M").with_field(
            FieldDescriptor::new("legacy", 1, Label::Optional, FieldKind::Group("g.M.Legacy".into())),
        )),
    ];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let m = &files[0].messages[0];
        let err = compiler
            .compile_field(env, m, &m.fields[0], &mut Uses::new())
            .unwrap_err();

        assert_eq!(
            err,
            CompileError::UnsupportedKind {
                field: "g.M.legacy".to_string(),
                kind: "group g.M.Legacy".to_string(),
            }
        );
        assert!(!err.is_not_found());
    });
}

#[test]
fn literal_field_override_skips_missing_reference() {
    let files = vec![file()];
    let overrides = Overrides::new().replace("t.Holder.color", Just(Value::Enum(7)));
    with_compiler(&files, &overrides, |compiler, env| {
        let holder = holder(&files);
        let generator = compiler
            .compile_field(env, holder, holder.field("color").unwrap(), &mut Uses::new())
            .expect("override bypasses the lookup");

        assert!(samples(&generator, 10).iter().all(|v| *v == Value::Enum(7)));
    });
}

// ---- messages ----------------------------------------------------------

#[test]
fn messages_omit_absent_optionals() {
    let files = vec![file()];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let color = compiler.compile_enum(&files[0].enums[0]).unwrap();
        env.fill("t.Color", color);
        let generator = compiler.compile_message(env, holder(&files)).unwrap().generator;

        let messages: Vec<_> = samples(&generator, 200)
            .into_iter()
            .map(|v| v.as_message().cloned().expect("message"))
            .collect();

        assert!(messages.iter().all(|m| m.type_name == "t.Holder"));
        assert!(messages.iter().all(|m| m.has("count") && m.has("labels")));
        assert!(messages.iter().all(|m| !m.has("old")));
        assert!(messages.iter().any(|m| m.has("color")));
        assert!(messages.iter().any(|m| !m.has("color")));
    });
}

#[test]
fn message_override_replaces_the_whole_type() {
    let files = vec![file()];
    let overrides = Overrides::new().replace(
        "t.Holder",
        Just(Value::Message(crate::value::Message::new("t.Holder"))),
    );
    with_compiler(&files, &overrides, |compiler, env| {
        // t.Color is not loaded; the replacement never looks it up
        let generator = compiler.compile_message(env, holder(&files)).unwrap().generator;
        let message = samples(&generator, 1)[0].as_message().cloned().unwrap();

        assert!(message.fields.is_empty());
    });
}

#[test]
fn message_records_the_types_it_samples_through() {
    let files = vec![file()];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let color = compiler.compile_enum(&files[0].enums[0]).unwrap();
        env.fill("t.Color", color);
        let compiled = compiler.compile_message(env, holder(&files)).unwrap();

        // t.Old is deprecated and the map entry holds only scalars
        assert_eq!(compiled.uses, Uses::from(["t.Color".to_string()]));
    });
}

#[test]
fn replaced_message_uses_nothing() {
    let files = vec![file()];
    let overrides = Overrides::new().replace(
        "t.Holder",
        Just(Value::Message(crate::value::Message::new("t.Holder"))),
    );
    with_compiler(&files, &overrides, |compiler, env| {
        let compiled = compiler.compile_message(env, holder(&files)).unwrap();

        assert!(compiled.uses.is_empty());
    });
}

// ---- maps --------------------------------------------------------------

#[test]
fn map_entry_key_and_value_overrides_apply() {
    let files = vec![file()];
    let overrides = Overrides::new()
        .replace("t.Holder.LabelsEntry.key", Just(Value::Text("k".to_string())))
        .replace("t.Holder.LabelsEntry.value", Just(Value::Int32(7)));
    with_compiler(&files, &overrides, |compiler, env| {
        let holder = holder(&files);
        let generator = compiler
            .compile_field(env, holder, holder.field("labels").unwrap(), &mut Uses::new())
            .unwrap();

        let values = samples(&generator, 50);
        for v in &values {
            let map = v.as_map().expect("map fields yield maps");
            assert!(map.len() <= 1);
            for (key, value) in map {
                assert_eq!(key, &crate::value::MapKey::Text("k".to_string()));
                assert_eq!(value, &Value::Int32(7));
            }
        }
        assert!(values.iter().any(|v| v.as_map().is_some_and(|m| m.len() == 1)));
    });
}

#[test]
fn map_keys_must_be_integral_bool_or_string() {
    let files = vec![
        FileDescriptor::new("m.proto", "m").with_message(
            MessageDescriptor::new("m.Bad")
                .with_field(FieldDescriptor::message(
                    "entries",
                    1,
                    Label::Repeated,
                    "m.Bad.EntriesEntry",
                ))
                .with_nested_message(
                    MessageDescriptor::new("m.Bad.EntriesEntry")
                        .map_entry()
                        .with_field(FieldDescriptor::scalar(
                            "key",
                            1,
                            Label::Optional,
                            ScalarKind::Double,
                        ))
                        .with_field(FieldDescriptor::scalar(
                            "value",
                            2,
                            Label::Optional,
                            ScalarKind::Bool,
                        )),
                ),
        ),
    ];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        let bad = &files[0].messages[0];
        let err = compiler
            .compile_field(env, bad, &bad.fields[0], &mut Uses::new())
            .unwrap_err();

        assert_eq!(
            err,
            CompileError::UnsupportedKind {
                field: "m.Bad.EntriesEntry.key".to_string(),
                kind: "double".to_string(),
            }
        );
    });
}

#[test]
fn map_of_messages_records_the_value_type() {
    let files = vec![
        FileDescriptor::new("p.proto", "p").with_message(
            MessageDescriptor::new("p.Tree")
                .with_field(FieldDescriptor::message(
                    "children",
                    1,
                    Label::Repeated,
                    "p.Tree.ChildrenEntry",
                ))
                .with_nested_message(
                    MessageDescriptor::new("p.Tree.ChildrenEntry")
                        .map_entry()
                        .with_field(FieldDescriptor::scalar(
                            "key",
                            1,
                            Label::Optional,
                            ScalarKind::String,
                        ))
                        .with_field(FieldDescriptor::message(
                            "value",
                            2,
                            Label::Optional,
                            "p.Tree",
                        )),
                ),
        ),
    ];
    with_compiler(&files, &Overrides::new(), |compiler, env| {
        env.reserve("p.Tree");
        let tree = &files[0].messages[0];
        let mut uses = Uses::new();
        compiler
            .compile_field(env, tree, &tree.fields[0], &mut uses)
            .unwrap();

        assert_eq!(uses, Uses::from(["p.Tree".to_string()]));
    });
}
