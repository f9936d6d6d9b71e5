use crate::normalizer::Record;
use serde_json::json;

/// Sample records served in mock mode: (name, fname, email, address).
const SAMPLES: [(&str, &str, &str, &str); 3] = [
    ("Rahul Kumar", "Suresh Kumar", "rahul.k@example.com", "Delhi"),
    ("Priya Sharma", "Anil Sharma", "priya.sh@example.com", "Mumbai"),
    ("Amit Verma", "R.C. Verma", "amit.v@example.com", "Kolkata"),
];

/// Index of the sample served for `term`: CRC32 of the term modulo the
/// number of samples.
pub fn sample_index(term: &str) -> usize {
    crc32fast::hash(term.as_bytes()) as usize % SAMPLES.len()
}

/// Deterministic stand-in for the lookup API.
///
/// Returns one of the fixed samples with `mobile` set to the literal term.
pub fn mock_lookup(term: &str) -> Record {
    let (name, fname, email, address) = SAMPLES[sample_index(term)];
    tracing::debug!("Mock lookup for '{}' served sample '{}'", term, name);

    let mut record = Record::new();
    record.insert("name".to_string(), json!(name));
    record.insert("fname".to_string(), json!(fname));
    record.insert("mobile".to_string(), json!(term));
    record.insert("email".to_string(), json!(email));
    record.insert("address".to_string(), json!(address));
    record
}
