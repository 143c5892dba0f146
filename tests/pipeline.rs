use std::collections::HashSet;

use goassoc::annotations::{Association, Id2Gos};
use goassoc::parser::gaf::GafReader;
use goassoc::parser::gene2go::Gene2GoReader;
use goassoc::parser::gpad::GpadReader;
use goassoc::parser::id2gos::IdToGosReader;
use goassoc::similarity::{lin_sim, resnik_sim, Lin, Similarity};
use goassoc::{
    AnnoReader, AnnotationOptions, AnnotationSource, DatabaseId, Direction, GoError, GoTermId,
    Namespace, Relationship, Relationships, TermCounts,
};

mod common;

fn id(n: u32) -> GoTermId {
    GoTermId::from(n)
}

fn gaf_reader(ontology: &goassoc::Ontology) -> AnnoReader<'_> {
    let annotations = GafReader::default()
        .parse_file(common::fixture("sample.gaf"))
        .unwrap();
    AnnoReader::new(annotations).with_godag(ontology)
}

fn pair_count(id2gos: &Id2Gos) -> usize {
    id2gos.values().map(HashSet::len).sum()
}

#[test]
fn direct_counts_match_retained_records() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);
    let options = AnnotationOptions::default();

    let retained = reader.reduce(None, &options).len();
    assert_eq!(retained, 7);
    let id2gos = reader.get_id2gos(None, &options).unwrap();
    assert_eq!(pair_count(&id2gos), retained);
}

#[test]
fn namespace_split() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);
    let options = AnnotationOptions::default();

    let ns2assc = reader.get_ns2assc(&options).unwrap();
    assert_eq!(ns2assc.len(), 3);
    assert_eq!(ns2assc[&Namespace::BP].pair_count(), 4);
    assert_eq!(ns2assc[&Namespace::MF].pair_count(), 2);
    assert_eq!(ns2assc[&Namespace::CC].pair_count(), 1);

    let total: usize = ns2assc.values().map(Association::pair_count).sum();
    assert!(total <= reader.reduce(None, &options).len());
}

#[test]
fn evidence_filters() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);

    let no_iea = AnnotationOptions::default()
        .with_evidence_exclude(["IEA"])
        .unwrap();
    assert_eq!(pair_count(&reader.get_id2gos(None, &no_iea).unwrap()), 5);

    let experimental = AnnotationOptions::default()
        .with_evidence_include(["Experimental"])
        .unwrap();
    assert_eq!(pair_count(&reader.get_id2gos(None, &experimental).unwrap()), 4);

    let everything = AnnotationOptions::default()
        .with_keep_not(true)
        .with_keep_nd(true);
    assert_eq!(reader.reduce(None, &everything).len(), 9);
}

#[test]
fn gpad_needs_dag_for_namespaces() {
    let annotations = GpadReader::default()
        .parse_file(common::fixture("sample.gpad"))
        .unwrap();
    let options = AnnotationOptions::default();

    let reader = AnnoReader::new(annotations.clone());
    assert!(matches!(
        reader.get_ns2assc(&options),
        Err(GoError::MissingGoDag(_))
    ));
    // a plain namespace restriction is ignored instead
    assert_eq!(
        reader.get_id2gos(Some(Namespace::MF), &options).unwrap().len(),
        3
    );

    let ontology = common::ontology();
    let reader = AnnoReader::new(annotations).with_godag(&ontology);
    let ns2assc = reader.get_ns2assc(&options).unwrap();
    assert_eq!(ns2assc[&Namespace::BP].pair_count(), 2);
    assert_eq!(ns2assc[&Namespace::MF].pair_count(), 1);
    assert_eq!(ns2assc[&Namespace::CC].pair_count(), 0);
}

#[test]
fn propagation() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);
    let options = AnnotationOptions::default().with_propagate_counts(true);

    let id2gos = reader.get_id2gos(Some(Namespace::BP), &options).unwrap();
    let p53 = &id2gos[&DatabaseId::from("P04637")];
    let expected: HashSet<GoTermId> = [6915, 12501, 8219, 9987, 8150].map(id).into();
    assert_eq!(p53, &expected);

    let unattached = AnnoReader::new(reader.annotations().clone());
    assert!(matches!(
        unattached.get_id2gos(None, &options),
        Err(GoError::MissingGoDag(_))
    ));
}

#[test]
fn go_to_gene_direction() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);
    let options = AnnotationOptions::default().with_direction(Direction::GoToGene);

    let Association::GoToGene(go2ids) = reader.get_association(None, &options).unwrap() else {
        panic!("GO to gene association expected");
    };
    assert_eq!(go2ids[&id(6915)].len(), 2);
}

#[test]
fn term_counts_from_gaf() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);
    let id2gos = reader
        .get_id2gos(Some(Namespace::BP), &AnnotationOptions::default())
        .unwrap();

    let counts = TermCounts::new(&ontology, &id2gos, &Relationships::new());
    assert_eq!(counts.get_total_count(Namespace::BP), 3);
    assert_eq!(counts.get_count(12501u32), 3);
    assert_eq!(counts.get_count(6915u32), 2);
    assert_eq!(counts.get_count(8632u32), 2);
    assert_eq!(counts.genes(8632u32), counts.genes(6915u32));
    assert_eq!(counts.get_count(43067u32), 0);

    let ic = counts.information_content(6915u32);
    assert!((ic - 1.5f64.ln()).abs() < 1e-12);
}

#[test]
fn relationships_are_monotonic() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);
    let mut id2gos = reader
        .get_id2gos(Some(Namespace::BP), &AnnotationOptions::default())
        .unwrap();
    id2gos.insert(DatabaseId::from("REG"), HashSet::from([id(43067)]));

    let is_a = TermCounts::new(&ontology, &id2gos, &Relationships::new());
    let regulates: Relationships = [Relationship::Regulates].into_iter().collect();
    let with_regulates = TermCounts::new(&ontology, &id2gos, &regulates);

    assert_eq!(is_a.get_count(12501u32), 3);
    assert_eq!(with_regulates.get_count(12501u32), 4);
    for (term, count) in is_a.iter() {
        assert!(with_regulates.get_count(term) >= count);
    }
}

#[test]
fn id2gos_alt_ids() {
    let ontology = common::ontology();
    let annotations = IdToGosReader::default()
        .parse_file(common::fixture("sample.id2gos"))
        .unwrap();
    let reader = AnnoReader::new(annotations).with_godag(&ontology);
    let id2gos = reader
        .get_id2gos(None, &AnnotationOptions::default())
        .unwrap();

    let counts = TermCounts::new(&ontology, &id2gos, &Relationships::new());
    assert_eq!(counts.get_count(6915u32), 3);
    assert_eq!(counts.get_count(8632u32), 3);
    assert!(counts.unknown_go_ids().is_empty());

    // id2gos records have no evidence code
    let filtered = AnnotationOptions::default()
        .with_evidence_include(["Experimental"])
        .unwrap();
    assert!(reader.get_id2gos(None, &filtered).unwrap().is_empty());
}

#[test]
fn gene2go_counts() {
    let ontology = common::ontology();
    let annotations = Gene2GoReader::default()
        .parse_file(common::fixture("gene2go"))
        .unwrap();
    let reader = AnnoReader::new(annotations).with_godag(&ontology);
    let id2gos = reader
        .get_id2gos(Some(Namespace::BP), &AnnotationOptions::default())
        .unwrap();
    assert_eq!(id2gos.len(), 3);
    assert!(id2gos.contains_key(&DatabaseId::Ncbi(7157)));

    let counts = TermCounts::new(&ontology, &id2gos, &Relationships::new());
    assert_eq!(counts.get_count(8219u32), 3);
    assert_eq!(counts.get_count(6915u32), 2);
}

#[test]
fn similarity() {
    let ontology = common::ontology();
    let reader = gaf_reader(&ontology);
    let id2gos = reader
        .get_id2gos(None, &AnnotationOptions::default())
        .unwrap();
    let counts = TermCounts::new(&ontology, &id2gos, &Relationships::new());

    assert_eq!(lin_sim(id(6915), id(6915), &ontology, &counts), Some(1.0));
    assert_eq!(lin_sim(id(6915), id(8632), &ontology, &counts), Some(1.0));
    assert_eq!(Lin::new(&counts).calculate(id(8632), id(6915)), Some(1.0));

    // the deepest common ancestor of apoptosis and cell death is cell death
    let resnik = resnik_sim(id(6915), id(8219), &ontology, &counts).unwrap();
    assert_eq!(resnik, counts.information_content(8219u32));

    assert_eq!(resnik_sim(id(6915), id(16787), &ontology, &counts), None);
}
