//! Prints the wire bytes and the decoded JSON view of two sample messages.
//!
//! ```bash
//! cargo run --package galactic-core --example sample_messages
//! ```

use galactic_core::{decode_message, encode_message, peek_header, Object, Value};

fn user_message() -> Object {
    let mut msg = Object::new();
    msg.insert("user_id".to_string(), Value::Int(1001));
    msg.insert("name".to_string(), Value::from("Alice"));
    msg.insert("scores".to_string(), Value::from(vec![100i64, 200, 300]));
    msg
}

fn trades_message() -> Object {
    let trade = |id: i64, price: i64| {
        let mut t = Object::new();
        t.insert("id".to_string(), Value::Int(id));
        t.insert("price".to_string(), Value::Int(price));
        Value::Object(t)
    };
    let mut msg = Object::new();
    msg.insert("timestamp".to_string(), Value::Int(1_698_765_432));
    msg.insert(
        "trades".to_string(),
        Value::List(vec![trade(1, 100), trade(2, 200)]),
    );
    msg
}

fn show(label: &str, msg: &Object) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = encode_message(msg)?;
    let header = peek_header(&bytes)?;
    let decoded = decode_message(&bytes)?;

    println!("== {label} ==");
    println!(
        "version={} fields={} length={}",
        header.version, header.field_count, header.total_length
    );
    println!("hex:  {}", hex::encode(&bytes));
    println!("json: {}", serde_json::to_string_pretty(&decoded)?);
    println!();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    show("user", &user_message())?;
    show("trades", &trades_message())?;
    Ok(())
}
