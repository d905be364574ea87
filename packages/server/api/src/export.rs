use search_collector::ResultSet;

/// Prefix of every line listing a path that could not be decoded.
pub const UNDECODED_MARKER: &str = "undecoded;";

pub const ATTACHMENT_FILENAME: &str = "results.csv";

/// Renders a result set as semicolon separated lines.
///
/// Records come first as `name;path;created;modified;`, followed by one
/// `undecoded;path;` line per undecoded path.
pub fn render_csv(result: &ResultSet) -> String {
    let mut out = String::new();

    for record in &result.records {
        out.push_str(&record.storage_name);
        out.push(';');
        out.push_str(&record.canonical_path);
        out.push(';');
        out.push_str(record.creation_date_or_empty());
        out.push(';');
        out.push_str(record.last_modified_or_empty());
        out.push_str(";\n");
    }

    for path in &result.undecoded {
        out.push_str(UNDECODED_MARKER);
        out.push_str(path);
        out.push_str(";\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_collector::DecodedRecord;

    #[test]
    fn test_render_records_then_undecoded() {
        let result = ResultSet {
            records: vec![
                DecodedRecord {
                    storage_name: "report.pdf".to_string(),
                    canonical_path: "docs/report.pdf".to_string(),
                    creation_date: Some("2023-01-01T00:00:00Z".to_string()),
                    last_modified_date: Some("2023-02-01T00:00:00Z".to_string()),
                    decode_succeeded: true,
                },
                DecodedRecord {
                    storage_name: "notes.txt".to_string(),
                    canonical_path: "docs/notes.txt".to_string(),
                    creation_date: None,
                    last_modified_date: None,
                    decode_succeeded: true,
                },
            ],
            undecoded: vec!["not-base64!!".to_string()],
        };

        assert_eq!(
            render_csv(&result),
            "report.pdf;docs/report.pdf;2023-01-01T00:00:00Z;2023-02-01T00:00:00Z;\n\
             notes.txt;docs/notes.txt;;;\n\
             undecoded;not-base64!!;\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_csv(&ResultSet::default()), "");
    }
}
