#![allow(missing_docs)]

use jsonwrap::schema::FieldKind;
use jsonwrap::{SchemaInspector, Text, record};

record! {
    pub struct Son {
        pub name: obj(Text),
        pub age: obj(i32),
    }
}

record! {
    pub struct Person {
        pub name: obj(Text),
        pub son: obj(Son),
        pub sons: array(Son, 2),
        pub v_sons: va_array(Son),
        pub older: va_array(Son),
        pub scores: va_array(i32),
    }
}

record! {
    pub struct Node {
        pub value: obj(i32),
        pub children: va_array(Node),
    }
}

#[test]
fn test_inspect_person() {
    let report = SchemaInspector::inspect::<Person>();
    assert_eq!(report.name, "Person");
    assert_eq!(report.fields.len(), 6);
    // Each element type needing a container is listed once.
    assert_eq!(report.container_types, ["Son", "Integer"]);

    let sons = &report.fields[2];
    assert_eq!(sons.name, "sons");
    assert_eq!(sons.kind, FieldKind::FixedArray);
    assert_eq!(sons.cardinality, Some(2));
    assert!(!sons.owned);
    assert_eq!(sons.children.len(), 2);

    let name = &report.fields[0];
    assert_eq!(name.element, "Text");
    assert!(name.owned);
    assert!(name.children.is_empty());
}

#[test]
fn test_report_display() {
    let text = SchemaInspector::inspect::<Person>().to_string();
    println!("{text}");
    assert!(text.starts_with("Person\n"));
    assert!(text.contains("  son: Son\n    name: Text\n    age: Integer\n"));
    assert!(text.contains("  sons: [Son; 2]\n"));
    assert!(text.contains("  v_sons: VarArray<Son>\n"));
    assert!(text.contains("  scores: VarArray<Integer>\n"));
}

#[test]
fn test_recursive_schema_terminates() {
    let report = SchemaInspector::inspect::<Node>();
    assert_eq!(report.container_types, ["Node"]);
    let children = &report.fields[1];
    assert_eq!(children.element, "Node");
    assert!(children.children.is_empty());
}

#[test]
fn test_report_serializes() -> Result<(), serde_json::Error> {
    let report = SchemaInspector::inspect::<Son>();
    let value = serde_json::to_value(&report)?;
    assert_eq!(value["name"], "Son");
    assert_eq!(value["fields"][1]["kind"], "Scalar");
    assert_eq!(value["fields"][1]["element"], "Integer");
    assert_eq!(value["container_types"], serde_json::json!([]));
    Ok(())
}
