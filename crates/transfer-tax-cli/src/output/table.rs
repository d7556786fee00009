use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// A transfer result prints the breakdown as a row-per-tax table followed by
/// a totals table; anything else falls back to a flat field/value listing.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(breakdown)) = map.get("breakdown") {
                print_breakdown_table(breakdown);
                if let Some(totals) = map.get("totals") {
                    println!();
                    print_flat_object(totals);
                }
                if let Some(savings) = map.get("incentive_savings") {
                    println!("\nIncentive:");
                    print_flat_object(savings);
                }
                print_warnings(map);
            } else {
                print_flat_object(value);
                print_warnings(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_breakdown_table(items: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Tax", "Rate", "Applicable", "Amount", "Buyer", "Seller"]);
    for item in items {
        builder.push_record([
            field(item, "label"),
            field(item, "rate_label"),
            field(item, "applicable"),
            field(item, "amount"),
            field(item, "buyer_amount"),
            field(item, "seller_amount"),
        ]);
    }
    println!("{}", Table::from(builder));
}

fn print_warnings(map: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn field(item: &Value, key: &str) -> String {
    item.get(key).map(format_value).unwrap_or_default()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
