use std::io::{self, Write};

use contact_desk::datatypes::ContactMessage;

pub fn prompt_password() -> io::Result<String> {
    print!("Admin password: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

pub fn print_message_row(message: &ContactMessage) {
    let marker = if message.is_read { " " } else { "*" };
    let when = message
        .created_at
        .with_timezone(&chrono::Local)
        .format("%Y.%m.%d %H:%M:%S");
    let service = message.service.as_deref().unwrap_or("-");

    println!(
        "{marker} [{when}] {} <{}> | {service} | {} | {}",
        message.name,
        message.email,
        preview(&message.message, 48),
        message.id,
    );
}

pub fn print_message_detail(message: &ContactMessage) {
    println!("Id:      {}", message.id);
    println!("Name:    {}", message.name);
    println!("Email:   {}", message.email);
    if let Some(phone) = &message.phone {
        println!("Phone:   {phone}");
    }
    if let Some(service) = &message.service {
        println!("Service: {service}");
    }
    println!("Status:  {}", message.status_label());
    println!(
        "Date:    {}",
        message
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y.%m.%d %H:%M:%S")
    );
    println!();
    println!("{}", message.message);
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
