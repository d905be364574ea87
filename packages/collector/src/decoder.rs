//! Storage path decoding.
//!
//! The index stores paths as base64 where the trailing `=` padding is replaced
//! by a single digit holding the number of padding characters (`0`, `1` or
//! `2`). Decoding reverses that. A path that genuinely ends in one of those
//! digits is indistinguishable from an encoded one and gets the same
//! treatment.

use crate::record::{DecodedRecord, SearchRecord};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

// Input reaching the engine is already stripped of padding.
const PATH_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn is_base64_symbol(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}

/// Lenient cleanup ahead of decoding: bytes outside the alphabet are dropped
/// and everything after the first `=` is ignored, as long as enough padding
/// follows to complete the last quantum. Returns the unpadded data symbols.
fn strip_to_symbols(input: &str) -> Option<Vec<u8>> {
    let filtered: Vec<u8> = input
        .bytes()
        .filter(|&b| is_base64_symbol(b) || b == b'=')
        .collect();

    let data_len = filtered
        .iter()
        .position(|&b| b == b'=')
        .unwrap_or(filtered.len());
    let (data, rest) = filtered.split_at(data_len);

    match data.len() % 4 {
        0 => Some(data.to_vec()),
        1 => None,
        partial => {
            let pads = rest.iter().take_while(|&&b| b == b'=').count();
            (pads >= 4 - partial).then(|| data.to_vec())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    pub canonical: String,
    pub succeeded: bool,
}

/// Replaces a trailing padding digit with the `=` characters it stands for.
/// Anything else is returned unchanged.
pub fn restore_padding(raw: &str) -> String {
    let Some(last) = raw.chars().last() else {
        return String::new();
    };
    let stem = &raw[..raw.len() - last.len_utf8()];

    match last {
        '0' => stem.to_string(),
        '1' => format!("{stem}="),
        '2' => format!("{stem}=="),
        _ => raw.to_string(),
    }
}

pub fn decode_storage_path(raw: &str) -> DecodedPath {
    let fixed = restore_padding(raw);

    let decoded = strip_to_symbols(&fixed)
        .and_then(|symbols| PATH_ENGINE.decode(symbols).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .map(|text| text.trim_end().to_string());

    match decoded {
        Some(text) if text != fixed => DecodedPath {
            canonical: text,
            succeeded: true,
        },
        _ => DecodedPath {
            canonical: fixed,
            succeeded: false,
        },
    }
}

impl From<SearchRecord> for DecodedRecord {
    fn from(record: SearchRecord) -> Self {
        let path = decode_storage_path(&record.storage_path);
        Self {
            storage_name: record.storage_name,
            canonical_path: path.canonical,
            creation_date: record.creation_date,
            last_modified_date: record.last_modified_date,
            decode_succeeded: path.succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD_NO_PAD;

    fn encode_for_index(text: &str) -> String {
        let stripped = STANDARD_NO_PAD.encode(text);
        let padding = (3 - text.len() % 3) % 3;
        format!("{stripped}{padding}")
    }

    #[test]
    fn test_restore_padding_digits() {
        assert_eq!(restore_padding("abcd0"), "abcd");
        assert_eq!(restore_padding("abc1"), "abc=");
        assert_eq!(restore_padding("ab2"), "ab==");
        assert_eq!(restore_padding("abcd"), "abcd");
        assert_eq!(restore_padding("abc3"), "abc3");
        assert_eq!(restore_padding(""), "");
    }

    #[test]
    fn test_restore_padding_is_noop_without_digit() {
        for input in ["aGVsbG8=", "docs/report.pdf", "x==", "ü"] {
            let once = restore_padding(input);
            assert_eq!(once, input);
            assert_eq!(restore_padding(&once), once);
        }
    }

    #[test]
    fn test_decode_hello_with_one_padding_digit() {
        let decoded = decode_storage_path("aGVsbG81");
        assert_eq!(decoded.canonical, "hello");
        assert!(decoded.succeeded);
    }

    #[test]
    fn test_decode_invalid_base64_falls_back() {
        let decoded = decode_storage_path("not-base64!!");
        assert_eq!(decoded.canonical, "not-base64!!");
        assert!(!decoded.succeeded);
    }

    #[test]
    fn test_decode_failure_keeps_padding_fixed_path() {
        // "abcde1" becomes "abcde=", five data symbols cannot be decoded
        let decoded = decode_storage_path("abcde1");
        assert_eq!(decoded.canonical, "abcde=");
        assert!(!decoded.succeeded);
    }

    #[test]
    fn test_decode_tolerates_extra_padding_and_noise() {
        for input in ["aGVsbG8==", "aGVs bG8=", "aGVsbG8=x", "aGVs\nbG8="] {
            let decoded = decode_storage_path(input);
            assert_eq!(decoded.canonical, "hello", "input {input:?}");
            assert!(decoded.succeeded, "input {input:?}");
        }
    }

    #[test]
    fn test_decode_requires_enough_padding() {
        // unpadded quantum with no padding digit
        let decoded = decode_storage_path("aGVsbG8");
        assert_eq!(decoded.canonical, "aGVsbG8");
        assert!(!decoded.succeeded);

        let decoded = decode_storage_path("aGVsbA=");
        assert!(!decoded.succeeded);
    }

    #[test]
    fn test_strip_to_symbols() {
        assert_eq!(strip_to_symbols("aGVs bG8="), Some(b"aGVsbG8".to_vec()));
        assert_eq!(strip_to_symbols("aGVsbG8=x"), Some(b"aGVsbG8".to_vec()));
        assert_eq!(strip_to_symbols("aGVsbA=="), Some(b"aGVsbA".to_vec()));
        assert_eq!(strip_to_symbols("not-base64!!"), None);
        assert_eq!(strip_to_symbols("aGVsbA="), None);
        assert_eq!(strip_to_symbols(""), Some(Vec::new()));
    }

    #[test]
    fn test_decode_invalid_utf8_falls_back() {
        // "//4=" is 0xff 0xfe, which is not UTF-8
        let decoded = decode_storage_path("//41");
        assert_eq!(decoded.canonical, "//4=");
        assert!(!decoded.succeeded);
    }

    #[test]
    fn test_decode_trims_trailing_whitespace() {
        let encoded = encode_for_index("docs/a.txt \n");
        let decoded = decode_storage_path(&encoded);
        assert_eq!(decoded.canonical, "docs/a.txt");
        assert!(decoded.succeeded);
    }

    #[test]
    fn test_decode_empty_path_is_undecoded() {
        let decoded = decode_storage_path("");
        assert_eq!(decoded.canonical, "");
        assert!(!decoded.succeeded);
    }

    #[test]
    fn test_round_trip_through_index_encoding() {
        let samples = [
            "hello",
            "https://account.blob.core.windows.net/docs/report.pdf",
            "https://account.blob.core.windows.net/docs/Résumé final.docx",
            "a",
            "ab",
            "abc",
            "ümlaut/ß",
        ];

        for sample in samples {
            let decoded = decode_storage_path(&encode_for_index(sample));
            assert_eq!(decoded.canonical, sample, "sample {sample:?}");
            assert!(decoded.succeeded, "sample {sample:?}");
        }
    }

    #[test]
    fn test_record_conversion_keeps_metadata() {
        let record = SearchRecord::new("report.pdf", encode_for_index("docs/report.pdf"))
            .with_dates(Some("2023-05-01T10:00:00Z"), None);

        let decoded = DecodedRecord::from(record);
        assert_eq!(decoded.storage_name, "report.pdf");
        assert_eq!(decoded.canonical_path, "docs/report.pdf");
        assert_eq!(decoded.creation_date.as_deref(), Some("2023-05-01T10:00:00Z"));
        assert_eq!(decoded.last_modified_date, None);
        assert!(decoded.decode_succeeded);
    }
}
