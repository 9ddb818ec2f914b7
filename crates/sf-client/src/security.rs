//! Input hygiene for values that end up in SOQL strings or REST paths.
//!
//! Query strings are passed through verbatim, so caller-supplied literals
//! must be escaped with [`soql::escape_string`] before being spliced in:
//!
//! ```rust
//! use salesforce_rest_client::security::soql;
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM Contact WHERE LastName = '{}'", name);
//! assert_eq!(query, "SELECT Id FROM Contact WHERE LastName = 'O\\'Brien'");
//! ```
//!
//! Path segments are validated (identifiers, record IDs) or encoded
//! (external ID values) with the helpers in [`url`].

/// SOQL literal escaping and identifier validation.
pub mod soql {
    /// Escape a value for use inside a single-quoted SOQL string literal.
    ///
    /// Quotes and backslashes are backslash-escaped; newline, carriage
    /// return and tab become `\n`, `\r` and `\t`.
    ///
    /// ```rust
    /// use salesforce_rest_client::security::soql;
    ///
    /// assert_eq!(soql::escape_string("' OR Name != '"), "\\' OR Name != \\'");
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escape a value for a `LIKE` pattern, including the `%` and `_` wildcards.
    #[must_use]
    pub fn escape_like(value: &str) -> String {
        escape_string(value)
            .chars()
            .fold(String::with_capacity(value.len() + 8), |mut out, ch| {
                if ch == '%' || ch == '_' {
                    out.push('\\');
                }
                out.push(ch);
                out
            })
    }

    /// Whether `name` is a plausible field name: an ASCII letter followed by
    /// letters, digits or underscores (`Name`, `Custom_Field__c`).
    ///
    /// ```rust
    /// use salesforce_rest_client::security::soql;
    ///
    /// assert!(soql::is_safe_field_name("Region__c"));
    /// assert!(!soql::is_safe_field_name("Name) FROM User--"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    /// SObject API names follow the field-name rules.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }

    /// Keep only the safe names from `fields`.
    pub fn filter_safe_fields<'a>(
        fields: impl IntoIterator<Item = &'a str>,
    ) -> impl Iterator<Item = &'a str> {
        fields.into_iter().filter(|f| is_safe_field_name(f))
    }

    /// Join the safe names from `fields` into a `SELECT` list.
    ///
    /// Returns `None` when nothing safe remains.
    #[must_use]
    pub fn build_safe_select(fields: &[&str]) -> Option<String> {
        let safe: Vec<_> = filter_safe_fields(fields.iter().copied()).collect();
        (!safe.is_empty()).then(|| safe.join(", "))
    }
}

/// REST path segment helpers.
pub mod url {
    use super::soql::{is_safe_field_name, is_safe_sobject_name};

    /// Percent-encode a single path segment or query value.
    ///
    /// ```rust
    /// use salesforce_rest_client::security::url;
    ///
    /// assert_eq!(url::encode_param("ACME/42 b"), "ACME%2F42%20b");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Record and list-view IDs are 15 (case-sensitive) or 18
    /// (case-insensitive) ASCII alphanumeric characters.
    #[must_use]
    pub fn is_valid_salesforce_id(id: &str) -> bool {
        matches!(id.len(), 15 | 18) && id.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// `sobjects/{sobject}/{id}`, or `None` if either part is unsafe.
    ///
    /// ```rust
    /// use salesforce_rest_client::security::url;
    ///
    /// assert_eq!(
    ///     url::sobject_path("Account", "001xx000003DGb2AAG").as_deref(),
    ///     Some("sobjects/Account/001xx000003DGb2AAG")
    /// );
    /// assert_eq!(url::sobject_path("Account", "../limits"), None);
    /// ```
    #[must_use]
    pub fn sobject_path(sobject: &str, id: &str) -> Option<String> {
        (is_safe_sobject_name(sobject) && is_valid_salesforce_id(id))
            .then(|| format!("sobjects/{}/{}", sobject, id))
    }

    /// `sobjects/{sobject}/{field}/{encoded value}` for upserts by external ID.
    #[must_use]
    pub fn external_id_path(sobject: &str, field: &str, value: &str) -> Option<String> {
        (is_safe_sobject_name(sobject) && is_safe_field_name(field) && !value.is_empty())
            .then(|| format!("sobjects/{}/{}/{}", sobject, field, encode_param(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::soql::*;
    use super::url::*;

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("plain"), "plain");
        assert_eq!(escape_string("O'Brien"), "O\\'Brien");
        assert_eq!(escape_string("C:\\temp"), "C:\\\\temp");
        assert_eq!(escape_string("a\nb\tc\r"), "a\\nb\\tc\\r");
        assert_eq!(
            escape_string("'; DELETE FROM Account--"),
            "\\'; DELETE FROM Account--"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("Jo'%"), "Jo\\'\\%");
    }

    #[test]
    fn test_field_name_validation() {
        for ok in ["Id", "Name", "Custom_Field__c", "Parent__r", "X1"] {
            assert!(is_safe_field_name(ok), "{ok} should be accepted");
        }
        for bad in ["", "1Name", "Name-2", "Owner.Name", "Na'me", "Id, Password"] {
            assert!(!is_safe_field_name(bad), "{bad:?} should be rejected");
        }
        assert!(is_safe_sobject_name("Invoice__c"));
        assert!(!is_safe_sobject_name("Account/../User"));
    }

    #[test]
    fn test_build_safe_select() {
        assert_eq!(
            build_safe_select(&["Id", "Bad'--", "Name"]),
            Some("Id, Name".to_string())
        );
        assert_eq!(build_safe_select(&["1x", ""]), None);
        let kept: Vec<_> = filter_safe_fields(["Id", "x y"]).collect();
        assert_eq!(kept, vec!["Id"]);
    }

    #[test]
    fn test_salesforce_id_validation() {
        assert!(is_valid_salesforce_id("001xx000003DGb2"));
        assert!(is_valid_salesforce_id("001xx000003DGb2AAG"));
        assert!(!is_valid_salesforce_id("001xx000003DGb2AA"));
        assert!(!is_valid_salesforce_id("001xx000003DGb2AA!"));
        assert!(!is_valid_salesforce_id(""));
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            sobject_path("Contact", "003xx000004TmiQ"),
            Some("sobjects/Contact/003xx000004TmiQ".to_string())
        );
        assert_eq!(sobject_path("Bad'", "003xx000004TmiQ"), None);
        assert_eq!(
            external_id_path("Account", "Ext_Id__c", "ACME/42"),
            Some("sobjects/Account/Ext_Id__c/ACME%2F42".to_string())
        );
        assert_eq!(external_id_path("Account", "Ext Id", "1"), None);
        assert_eq!(external_id_path("Account", "Ext_Id__c", ""), None);
        assert_eq!(encode_param("a b&c"), "a%20b%26c");
    }
}
