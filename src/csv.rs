use crate::contact::Contact;

pub const HEADER: &str = "First Name,Last Name,Internal Number,Wireless Number,Function,Direct Line,GSM Number,Fax Number";

/// Lines before the records start, i.e. the single header row.
const PREAMBLE_LINES: usize = 1;

/// Parses CSV text into the contacts it describes.
///
/// The format is deliberately naive: one header row, comma-separated fields
/// without any quoting or escaping support, at least eight fields per row
/// mapped positionally onto [`Contact`]. Rows with fewer fields, blank lines
/// and records failing [`Contact::is_valid`] are skipped, never fatal.
/// Surrounding double quotes are stripped per field so that the output of
/// [`serialize`] parses back.
pub fn parse(text: &str) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for line in text.lines().skip(PREAMBLE_LINES) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = line.split(',').map(field).collect::<Vec<_>>();

        if fields.len() < 8 {
            tracing::debug!("Skipping row with only {} fields", fields.len());
            continue;
        }

        let mut fields = fields.into_iter();

        let contact = Contact {
            first_name: fields.next().unwrap(),
            last_name: fields.next().unwrap(),
            internal_number: fields.next().unwrap(),
            wireless_number: fields.next().unwrap(),
            function: fields.next().unwrap(),
            direct_line: fields.next().unwrap(),
            gsm_number: fields.next().unwrap(),
            fax_number: fields.next().unwrap(),
        };

        if contact.is_valid() {
            contacts.push(contact);
        } else {
            tracing::debug!("Dropping invalid record for {}", contact.display_name());
        }
    }

    contacts
}

fn field(raw: &str) -> String {
    let val = raw.trim();

    let val = val
        .strip_prefix('"')
        .and_then(|val| val.strip_suffix('"'))
        .unwrap_or(val);

    val.trim().to_owned()
}

/// Renders the list as CSV, fields double-quoted, rows newline-terminated.
pub fn serialize(contacts: &[Contact]) -> String {
    let mut text = String::new();

    text.push_str(HEADER);
    text.push('\n');

    for contact in contacts {
        text.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"\n",
            contact.first_name,
            contact.last_name,
            contact.internal_number,
            contact.wireless_number,
            contact.function,
            contact.direct_line,
            contact.gsm_number,
            contact.fax_number,
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_maps_fields_positionally() {
        let text = "First Name,Last Name,Internal Number,Wireless,Function,Direct,GSM,Fax\n\
            John,Doe,1001,+32 123 456 789,Manager,+32 123 456 790,+32 123 456 791,+32 123 456 792\n";

        let contacts = parse(text);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "John");
        assert_eq!(contacts[0].last_name, "Doe");
        assert_eq!(contacts[0].internal_number, "1001");
        assert_eq!(contacts[0].function, "Manager");
        assert_eq!(contacts[0].fax_number, "+32 123 456 792");
    }

    #[test]
    fn parse_skips_short_rows() {
        let text = "header\nJohn,Doe,1001\nJane,Smith,1002,,Developer,,,\n";

        let contacts = parse(text);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].last_name, "Smith");
    }

    #[test]
    fn parse_skips_blank_lines_and_trims_fields() {
        let text = "header\n\n  John , Doe , 1001 ,,,,, \n\n";

        let contacts = parse(text);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "John");
        assert_eq!(contacts[0].internal_number, "1001");
    }

    #[test]
    fn parse_drops_invalid_records() {
        let text = "header\n,,1001,,,,,\nJohn,Doe,,,,,,\nJane,,1002,,,,,\n";

        let contacts = parse(text);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "Jane");
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let text = "header\nJohn,Doe,1001,,,,,,ignored,also ignored\n";

        let contacts = parse(text);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].fax_number, "");
    }

    #[test]
    fn serialize_parses_back_in_order() {
        let contacts = vec![
            Contact {
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                internal_number: "1002".to_owned(),
                ..Default::default()
            },
            Contact {
                first_name: "John".to_owned(),
                last_name: "Smith".to_owned(),
                internal_number: "1001".to_owned(),
                function: "Manager".to_owned(),
                ..Default::default()
            },
        ];

        assert_eq!(parse(&serialize(&contacts)), contacts);
    }
}
