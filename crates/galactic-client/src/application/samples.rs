//! Messages the client sends or shows.

use galactic_core::{Object, Value};

/// `{user_id: 1001, name: "Alice", scores: [100, 200, 300]}`
pub fn user_message() -> Object {
    let mut msg = Object::new();
    msg.insert("user_id".to_string(), Value::Int(1001));
    msg.insert("name".to_string(), Value::from("Alice"));
    msg.insert("scores".to_string(), Value::from(vec![100i64, 200, 300]));
    msg
}

/// `{timestamp: 1698765432, trades: [{id: 1, price: 100}, {id: 2, price: 200}]}`
pub fn trades_message() -> Object {
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

/// Body of the `/example` request.
pub fn example_request() -> Object {
    let mut msg = Object::new();
    msg.insert("name".to_string(), Value::from("Alice"));
    msg.insert("user_id".to_string(), Value::Int(1001));
    msg
}

/// Body of a `POST /trades` request.  The server assigns the id and
/// timestamp.
pub fn trade_submission(buyer_id: &str, seller_id: &str, price: i64, quantity: i64) -> Object {
    let mut msg = Object::new();
    msg.insert("buyer_id".to_string(), Value::from(buyer_id));
    msg.insert("seller_id".to_string(), Value::from(seller_id));
    msg.insert("price".to_string(), Value::Int(price));
    msg.insert("quantity".to_string(), Value::Int(quantity));
    msg
}
