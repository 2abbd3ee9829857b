#![allow(missing_docs)]

use jsonwrap::{JsonWrap, NullText, Text, WrapError, record};
use serde_json::json;

record! {
    pub struct Son {
        pub name: obj(Text),
        pub age: obj(i32),
        pub birthday: obj(Text),
        pub sex: obj(char),
    }
}

record! {
    pub struct Person {
        pub name: obj(Text),
        pub age: obj(i32),
        pub birthday: obj(Text),
        pub sex: obj(char),
        pub couple: obj(Text),
        pub son: obj(Son),
        pub sons: array(Son, 2),
        pub v_sons: va_array(Son),
    }
}

record! {
    pub struct Flags {
        pub enabled: obj(bool),
        pub levels: array(i32, 3),
        pub notes: va_array(Text),
    }
}

const EMPTY_SON: &str = r#"{"name":null,"age":0,"birthday":null,"sex":0}"#;

fn alice(cx: &JsonWrap) -> jsonwrap::Result<Person> {
    let mut person = Person::default();
    person.name = cx.text("Alice")?;
    person.age = 9;
    Ok(person)
}

#[test]
fn test_person_encodes_like_the_reference_program() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = alice(&cx)?;

    let expected = format!(
        r#"{{"name":"Alice","age":9,"birthday":null,"sex":0,"couple":null,"son":{EMPTY_SON},"sons":[{EMPTY_SON},{EMPTY_SON}],"v_sons":[]}}"#
    );
    assert_eq!(cx.to_json(&person)?, expected);

    let mut decoded = Person::default();
    cx.from_json(&expected, &mut decoded)?;
    assert_eq!(decoded.name, "Alice");
    assert_eq!(decoded.age, 9);
    assert!(decoded.v_sons.elements().is_none());
    assert_eq!(decoded.v_sons.size(), 0);
    assert_eq!(decoded, person);

    cx.recycle(&mut person);
    cx.recycle(&mut decoded);
    Ok(())
}

#[test]
fn test_empty_text_policy_writes_empty_strings() -> jsonwrap::Result<()> {
    let cx = JsonWrap::builder().null_text(NullText::Empty).build();
    let person = alice(&cx)?;

    let document = cx.encode(&person);
    assert_eq!(document["son"], json!({"name": "", "age": 0, "birthday": "", "sex": 0}));
    assert_eq!(document["couple"], json!(""));

    // Empty strings come back as present, empty Text.
    let mut decoded = Person::default();
    cx.decode(&document, &mut decoded)?;
    assert_eq!(decoded.son.name.as_str(), Some(""));
    assert!(!decoded.son.name.is_null());
    Ok(())
}

#[test]
fn test_person_with_empty_text_defaults() -> jsonwrap::Result<()> {
    let cx = JsonWrap::builder().null_text(NullText::Empty).build();
    let mut person = alice(&cx)?;

    let son = r#"{"name":"","age":0,"birthday":"","sex":0}"#;
    let expected = format!(
        r#"{{"name":"Alice","age":9,"birthday":"","sex":0,"couple":"","son":{son},"sons":[{son},{son}],"v_sons":[]}}"#
    );
    assert_eq!(cx.to_json(&person)?, expected);

    let mut decoded = Person::default();
    cx.from_json(&expected, &mut decoded)?;
    assert_eq!(decoded.name, "Alice");
    assert_eq!(decoded.age, 9);
    assert!(decoded.v_sons.elements().is_none());
    assert_eq!(decoded.v_sons.size(), 0);

    cx.recycle(&mut person);
    cx.recycle(&mut decoded);
    Ok(())
}

#[test]
fn test_omit_text_policy_drops_keys() -> jsonwrap::Result<()> {
    let cx = JsonWrap::builder().null_text(NullText::Omit).build();
    let person = alice(&cx)?;

    let document = cx.encode(&person);
    let map = document.as_object().expect("record encodes as object");
    assert!(map.contains_key("name"));
    assert!(!map.contains_key("birthday"));
    assert!(!map.contains_key("couple"));
    assert_eq!(document["son"], json!({"age": 0, "sex": 0}));

    let mut decoded = Person::default();
    cx.decode(&document, &mut decoded)?;
    assert_eq!(decoded, person);
    Ok(())
}

#[test]
fn test_full_round_trip() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = alice(&cx)?;
    person.birthday = cx.text("2001-02-03")?;
    person.sex = 'F';
    person.couple = cx.text("Bob")?;
    person.son.name = cx.text("Carl")?;
    person.son.age = 4;
    person.sons[1].sex = 'M';
    let mut kid = Son::default();
    kid.name = cx.text("Dana")?;
    kid.sex = '€';
    person.v_sons = cx.va_array(vec![kid, Son::default()])?;

    let document = cx.encode(&person);
    assert_eq!(document["sex"], json!(70));
    assert_eq!(document["v_sons"][0]["sex"], json!(8364));
    assert_eq!(document["v_sons"].as_array().map(Vec::len), Some(2));

    let mut decoded = Person::default();
    cx.decode(&document, &mut decoded)?;
    assert_eq!(decoded, person);
    Ok(())
}

#[test]
fn test_fixed_array_consumes_at_most_its_length() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = Person::default();
    cx.from_json(
        r#"{"sons":[{"age":1},{"age":2},{"age":3},{"age":4},{"age":5}]}"#,
        &mut person,
    )?;
    assert_eq!(person.sons[0].age, 1);
    assert_eq!(person.sons[1].age, 2);

    // A short input leaves the remaining slots as they were.
    cx.from_json(r#"{"sons":[{"age":7}]}"#, &mut person)?;
    assert_eq!(person.sons[0].age, 7);
    assert_eq!(person.sons[1].age, 2);
    Ok(())
}

#[test]
fn test_missing_keys_leave_fields_untouched() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = alice(&cx)?;
    person.son.age = 11;

    cx.from_json(r#"{"age": 30, "son": {"name": "Eve"}}"#, &mut person)?;
    assert_eq!(person.name, "Alice");
    assert_eq!(person.age, 30);
    assert_eq!(person.son.name, "Eve");
    assert_eq!(person.son.age, 11);
    Ok(())
}

#[test]
fn test_null_text_decodes_as_absent() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = alice(&cx)?;
    cx.from_json(r#"{"name": null}"#, &mut person)?;
    assert!(person.name.is_null());
    Ok(())
}

#[test]
fn test_text_is_cut_at_nul() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    assert_eq!(cx.text("ab\0cd")?, "ab");

    let mut person = Person::default();
    cx.from_json(r#"{"name": "Al\u0000ice"}"#, &mut person)?;
    assert_eq!(person.name, "Al");
    Ok(())
}

#[test]
fn test_empty_variable_array_round_trip() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = Person::default();
    person.v_sons = cx.va_array(vec![Son::default()])?;

    // An empty input replaces the previous content with an absent container.
    cx.from_json(r#"{"v_sons": []}"#, &mut person)?;
    assert!(person.v_sons.elements().is_none());
    assert_eq!(cx.encode(&person)["v_sons"], json!([]));
    Ok(())
}

#[test]
fn test_lenient_scalar_conversions() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = Person::default();

    cx.from_json(r#"{"age": 3.9, "sex": 65}"#, &mut person)?;
    assert_eq!(person.age, 3);
    assert_eq!(person.sex, 'A');

    cx.from_json(r#"{"age": true}"#, &mut person)?;
    assert_eq!(person.age, 1);

    cx.from_json(r#"{"age": "nine"}"#, &mut person)?;
    assert_eq!(person.age, 0);

    cx.from_json(r#"{"age": -1e20}"#, &mut person)?;
    assert_eq!(person.age, i32::MIN);

    cx.from_json(r#"{"sex": -5}"#, &mut person)?;
    assert_eq!(person.sex, '\0');

    let mut flags = Flags::default();
    cx.from_json(r#"{"enabled": 1, "levels": [1.5, false, 9]}"#, &mut flags)?;
    assert!(flags.enabled);
    assert_eq!(flags.levels, [1, 0, 9]);

    cx.from_json(r#"{"enabled": "yes"}"#, &mut flags)?;
    assert!(!flags.enabled);
    Ok(())
}

#[test]
fn test_lenient_decode_skips_mistyped_nodes() -> jsonwrap::Result<()> {
    // Skipped nodes are reported at debug level; RUST_LOG=jsonwrap=debug shows them.
    let _ = env_logger::builder().is_test(true).try_init();
    let cx = JsonWrap::default();
    let mut person = alice(&cx)?;
    person.v_sons = cx.va_array(vec![Son::default()])?;

    cx.from_json(
        r#"{"name": 5, "son": "nobody", "sons": {}, "v_sons": 3}"#,
        &mut person,
    )?;
    assert_eq!(person.name, "Alice");
    assert_eq!(person.v_sons.size(), 1);

    // A non-object root is ignored too.
    cx.from_json("[1, 2, 3]", &mut person)?;
    assert_eq!(person.age, 9);
    Ok(())
}

#[test]
fn test_strict_decode_reports_field_path() {
    let cx = JsonWrap::builder().strict(true).build();
    let mut person = Person::default();

    let err = cx
        .from_json(r#"{"sons":[{"age":1},{"age":"x"}]}"#, &mut person)
        .expect_err("mistyped age must fail");
    match err {
        WrapError::Type {
            path,
            expected,
            found,
        } => {
            assert_eq!(path, "sons[1].age");
            assert_eq!(expected, "number");
            assert_eq!(found, "string");
        }
        other => panic!("unexpected error {other:?}"),
    }
    // Fields decoded before the failure keep their values.
    assert_eq!(person.sons[0].age, 1);
}

#[test]
fn test_strict_decode_rejections() {
    let cx = JsonWrap::builder().strict(true).build();
    let mut person = Person::default();

    let err = cx.from_json(r#"{"name": 5}"#, &mut person).expect_err("number into text");
    assert!(matches!(err, WrapError::Type { ref path, expected: "string", .. } if path == "name"));

    let err = cx.from_json("[]", &mut person).expect_err("array root");
    assert!(matches!(err, WrapError::Type { ref path, expected: "object", found: "array" } if path.is_empty()));
    assert!(err.to_string().contains("at root"));

    let err = cx.from_json(r#"{"age": 2.5}"#, &mut person).expect_err("fractional age");
    assert!(matches!(
        err,
        WrapError::Type { expected: "integer", found: "fractional number", .. }
    ));

    let err = cx.from_json(r#"{"age": 3e10}"#, &mut person).expect_err("overflow float");
    assert!(matches!(err, WrapError::Type { found: "out-of-range number", .. }));

    let err = cx.from_json(r#"{"age": 4294967296}"#, &mut person).expect_err("overflow");
    assert!(matches!(err, WrapError::Type { found: "out-of-range number", .. }));

    let err = cx.from_json(r#"{"v_sons": [{"sex": -1}]}"#, &mut person).expect_err("bad char");
    assert!(matches!(err, WrapError::Type { ref path, .. } if path == "v_sons[0].sex"));

    let mut flags = Flags::default();
    let err = cx.from_json(r#"{"enabled": 1}"#, &mut flags).expect_err("number into bool");
    assert!(matches!(err, WrapError::Type { expected: "bool", .. }));

    let err = cx.from_json(r#"{"notes": ["a", 2]}"#, &mut flags).expect_err("number in notes");
    assert!(matches!(err, WrapError::Type { ref path, .. } if path == "notes[1]"));
}

#[test]
fn test_strict_decode_accepts_well_typed_documents() -> jsonwrap::Result<()> {
    let cx = JsonWrap::builder().strict(true).build();
    let mut person = Person::default();
    cx.from_json(
        r#"{"name":"Zed","age":-4,"birthday":null,"sex":90,"son":{"age":1},"v_sons":[{"name":"Y"}]}"#,
        &mut person,
    )?;
    assert_eq!(person.age, -4);
    assert_eq!(person.sex, 'Z');
    assert_eq!(person.v_sons.get(0).map(|s| s.name.as_str()), Some(Some("Y")));

    // Whole-valued floats are integers.
    cx.from_json(r#"{"age": 3.0, "sex": 66.0}"#, &mut person)?;
    assert_eq!(person.age, 3);
    assert_eq!(person.sex, 'B');
    Ok(())
}

#[test]
fn test_parse_failure_leaves_record_untouched() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut person = alice(&cx)?;

    let err = cx.from_json(r#"{"name": "Bob""#, &mut person).expect_err("truncated input");
    assert!(matches!(err, WrapError::Parse(_)));
    assert!(err.to_string().starts_with("Parse Error"));
    assert_eq!(person.name, "Alice");
    Ok(())
}

#[test]
fn test_text_array_fields() -> jsonwrap::Result<()> {
    let cx = JsonWrap::default();
    let mut flags = Flags::default();
    cx.from_json(r#"{"notes": ["one", null, "three"]}"#, &mut flags)?;
    assert_eq!(flags.notes.size(), 3);
    assert_eq!(flags.notes.get(0), Some(&Text::new("one")));
    assert!(flags.notes.get(1).is_some_and(Text::is_null));

    assert_eq!(cx.encode(&flags)["notes"], json!(["one", null, "three"]));
    cx.recycle(&mut flags);
    Ok(())
}
