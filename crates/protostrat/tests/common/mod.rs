#![allow(dead_code)]

use proptest::test_runner::TestRunner;
use protostrat::{Environment, Message, Value, schema::FileDescriptor};
use std::path::PathBuf;

pub fn fixture(name: &str) -> FileDescriptor {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.json"));

    FileDescriptor::from_json_file(&path).expect("fixture should load")
}

pub fn example(env: &Environment, name: &str) -> Message {
    let mut runner = TestRunner::deterministic();
    let value = env.example(name, &mut runner).expect("type should sample");

    into_message(value)
}

pub fn examples(env: &Environment, name: &str, n: usize) -> Vec<Message> {
    let mut runner = TestRunner::deterministic();

    (0..n)
        .map(|_| into_message(env.example(name, &mut runner).expect("type should sample")))
        .collect()
}

pub fn into_message(value: Value) -> Message {
    match value {
        Value::Message(message) => message,
        other => panic!("expected a message, got {other:?}"),
    }
}
