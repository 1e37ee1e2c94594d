use crate::core::Field;

/// Root-relative element path of a field in a Finvoice document.
pub fn tree_path(field: Field) -> &'static [&'static str] {
    match field {
        Field::SellerPartyIdentifier => &["SellerPartyDetails", "SellerPartyIdentifier"],
        Field::SellerOrganisationName => &["SellerPartyDetails", "SellerOrganisationName"],
        Field::InvoiceNumber => &["InvoiceDetails", "InvoiceNumber"],
        Field::EpiAccountId => &[
            "EpiDetails",
            "EpiPartyDetails",
            "EpiBeneficiaryPartyDetails",
            "EpiAccountID",
        ],
        Field::EpiRemittanceInfoIdentifier => &[
            "EpiDetails",
            "EpiPaymentInstructionDetails",
            "EpiRemittanceInfoIdentifier",
        ],
        Field::EpiInstructedAmount => &[
            "EpiDetails",
            "EpiPaymentInstructionDetails",
            "EpiInstructedAmount",
        ],
        Field::EpiDateOptionDate => &[
            "EpiDetails",
            "EpiPaymentInstructionDetails",
            "EpiDateOptionDate",
        ],
    }
}

/// Field whose path equals the given open-element path.
///
/// `path` starts with the root element, which is not part of the schema
/// paths and is ignored.
pub fn field_at_path(path: &[String]) -> Option<Field> {
    let (_root, below_root) = path.split_first()?;
    Field::ALL.into_iter().find(|&field| {
        let expected = tree_path(field);
        expected.len() == below_root.len()
            && expected.iter().zip(below_root).all(|(a, b)| *a == b.as_str())
    })
}

/// Local name of a possibly prefixed XML name (`fin:InvoiceNumber` → `InvoiceNumber`).
pub fn local_name(bytes: &[u8]) -> String {
    let name = String::from_utf8_lossy(bytes);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.into_owned(),
    }
}
