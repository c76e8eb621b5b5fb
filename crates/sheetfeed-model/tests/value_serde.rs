use pretty_assertions::assert_eq;
use serde_json::json;
use sheetfeed_model::{FunctionRef, Record, StructValue, Value};

#[test]
fn tagged_layout_is_stable() {
    assert_eq!(
        serde_json::to_value(Value::Number(12.0)).unwrap(),
        json!({"type": "number", "value": 12.0})
    );
    assert_eq!(
        serde_json::to_value(Value::Text("Banana".into())).unwrap(),
        json!({"type": "text", "value": "Banana"})
    );
    assert_eq!(
        serde_json::to_value(Value::Array(vec![Value::Number(1.0)])).unwrap(),
        json!({"type": "array", "value": [{"type": "number", "value": 1.0}]})
    );
}

#[test]
fn nested_value_round_trips() {
    let value = Value::Struct(StructValue::from_iter([
        (
            "tags".to_string(),
            Value::Array(vec![Value::Number(0.0), Value::Text("x".into())]),
        ),
        (
            "on_use".to_string(),
            Value::Function(FunctionRef::new(
                "heal",
                vec![Value::Number(5.0)],
                "heal(5)",
            )),
        ),
    ]));

    let encoded = serde_json::to_string(&value).unwrap();
    let decoded: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn struct_serialization_preserves_insertion_order() {
    let value = Value::Struct(StructValue::from_iter([
        ("z".to_string(), Value::Number(1.0)),
        ("a".to_string(), Value::Number(2.0)),
    ]));
    let encoded = serde_json::to_string(&value).unwrap();
    assert!(encoded.find("\"z\"").unwrap() < encoded.find("\"a\"").unwrap());
}

#[test]
fn record_round_trips() {
    let record = Record::from_iter([
        ("name".to_string(), Value::Text("Banana".into())),
        ("price".to_string(), Value::Number(12.0)),
    ]);
    let encoded = serde_json::to_string(&record).unwrap();
    let decoded: Record = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, record);
}
