use crate::config::Dial;

/// Builds the `tel:` URI for a contact number.
///
/// Internal extensions cannot be dialled from outside directly, so they are
/// prefixed with the configured PBX access sequence (outside line, pause,
/// access code). All other numbers dial as-is.
pub fn tel_uri(number: &str, internal: bool, config: &Dial) -> String {
    if internal {
        format!("tel:{}{}", config.pbx_prefix, number)
    } else {
        format!("tel:{}", number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_extensions_are_prefixed_with_the_pbx_sequence() {
        let config = Dial::default();

        assert_eq!(tel_uri("1001", true, &config), "tel:+3251610764,99,1001");
    }

    #[test]
    fn external_numbers_dial_as_is() {
        let config = Dial::default();

        assert_eq!(
            tel_uri("+32 470 11 22 33", false, &config),
            "tel:+32 470 11 22 33"
        );
    }
}
