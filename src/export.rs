use crate::datatypes::ContactMessage;

const COLUMNS: [&str; 7] = ["Name", "Email", "Phone", "Service", "Message", "Status", "Date"];

/// Renders messages as CSV, one row per message after a header row.
///
/// Every field is wrapped in double quotes with embedded quotes doubled, so
/// commas and newlines inside a message body survive a round trip through
/// spreadsheet tools. Callers are expected to pass the already-filtered list;
/// this function exports exactly what it is given.
pub fn to_csv(messages: &[ContactMessage]) -> String {
    let mut rows = Vec::with_capacity(messages.len() + 1);
    rows.push(COLUMNS.iter().map(|c| quote(c)).collect::<Vec<_>>().join(","));

    for m in messages {
        let date = m.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let fields = [
            m.name.as_str(),
            m.email.as_str(),
            m.phone.as_deref().unwrap_or(""),
            m.service.as_deref().unwrap_or(""),
            m.message.as_str(),
            m.status_label(),
            date.as_str(),
        ];
        rows.push(fields.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","));
    }

    rows.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
