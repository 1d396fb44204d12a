use core_types::ClientRecord;

/// The text an administrator sends a client so they can log in.
pub fn share_message(client: &ClientRecord, public_url: Option<&str>) -> String {
    let access = public_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or("(ask your administrator for the access link)");

    format!(
        "Hello {}!\nHere are your FinancePro credentials:\n\nAccess: {}\nUsername: {}\nPassword: {}\n\nYou can start entering your data right away.",
        client.business_name, access, client.username, client.password
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_credentials_and_url() {
        let client = ClientRecord::new("pyme-demo", "Empresa Demo S.A.", "pyme1", "123");
        let message = share_message(&client, Some("https://finance.example.com"));

        assert!(message.starts_with("Hello Empresa Demo S.A.!"));
        assert!(message.contains("Access: https://finance.example.com"));
        assert!(message.contains("Username: pyme1"));
        assert!(message.contains("Password: 123"));
    }

    #[test]
    fn blank_url_gets_a_placeholder() {
        let client = ClientRecord::new("pyme-demo", "Demo", "pyme1", "123");
        assert!(share_message(&client, Some("  ")).contains("ask your administrator"));
        assert!(share_message(&client, None).contains("ask your administrator"));
    }
}
