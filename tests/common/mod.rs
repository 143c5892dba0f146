#![allow(dead_code)]

use std::path::PathBuf;

use goassoc::{Namespace, Ontology, Relationship};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// A small excerpt of the Gene Ontology
///
/// ```text
/// BP: 8150 <- 9987 <- 8219 <- 12501 <- 6915 (alt id 8632)
///     8150 <- 43067 --regulates--> 12501
/// MF: 3674 <- 3824 <- 16787
/// CC: 5575 <- 110165 <- 5737
///                    <- 5634
/// ```
pub fn ontology() -> Ontology {
    let mut ont = Ontology::default();
    let terms: [(u32, &str, Namespace); 13] = [
        (8150, "biological_process", Namespace::BP),
        (9987, "cellular process", Namespace::BP),
        (8219, "cell death", Namespace::BP),
        (12501, "programmed cell death", Namespace::BP),
        (6915, "apoptotic process", Namespace::BP),
        (43067, "regulation of programmed cell death", Namespace::BP),
        (3674, "molecular_function", Namespace::MF),
        (3824, "catalytic activity", Namespace::MF),
        (16787, "hydrolase activity", Namespace::MF),
        (5575, "cellular_component", Namespace::CC),
        (110165, "cellular anatomical entity", Namespace::CC),
        (5737, "cytoplasm", Namespace::CC),
        (5634, "nucleus", Namespace::CC),
    ];
    for (id, name, namespace) in terms {
        ont.insert_term(id, name, namespace);
    }

    for (parent, child) in [
        (8150u32, 9987u32),
        (9987, 8219),
        (8219, 12501),
        (12501, 6915),
        (8150, 43067),
        (3674, 3824),
        (3824, 16787),
        (5575, 110165),
        (110165, 5737),
        (110165, 5634),
    ] {
        ont.add_parent(parent, child).unwrap();
    }
    ont.add_relationship(43067u32, Relationship::Regulates, 12501u32)
        .unwrap();
    ont.add_alt_id(6915u32, 8632u32).unwrap();
    ont.create_cache();
    ont
}
