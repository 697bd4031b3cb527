mod common;

use common::{MIT_TEMPLATE, fixture_normalizer};
use licfp::hash_text;

#[test]
fn fingerprints_equivalent_inputs_match() {
    let normalizer = fixture_normalizer();

    let doc_a = normalizer.document("  Permission   is GRANTED\u{2014}free of charge.  ");
    let doc_b = normalizer.document("permission is granted-free of charge.");

    assert_eq!(doc_a.normalized_content(), doc_b.normalized_content());
    assert_eq!(doc_a.fingerprint(), doc_b.fingerprint());
}

#[test]
fn fresh_documents_normalize_identically() {
    let first = fixture_normalizer().document(MIT_TEMPLATE);
    let second = fixture_normalizer().document(MIT_TEMPLATE);

    assert_eq!(first.normalized_content(), second.normalized_content());
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.word_set(), second.word_set());
}

#[test]
fn fingerprint_is_hash_of_normalized_content() {
    let doc = fixture_normalizer().document(MIT_TEMPLATE);
    assert_eq!(doc.fingerprint(), hash_text(doc.normalized_content()));
}

#[test]
fn filename_only_matters_for_html() {
    let normalizer = fixture_normalizer();
    let plain = normalizer.document(MIT_TEMPLATE);
    let named = normalizer.document_with_filename(MIT_TEMPLATE, "LICENSE.md");
    assert_eq!(plain.fingerprint(), named.fingerprint());
}
