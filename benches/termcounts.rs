use std::collections::{HashMap, HashSet};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use goassoc::similarity::lin_sim;
use goassoc::{DatabaseId, GoTermId, Namespace, Ontology, Relationship, Relationships, TermCounts};

/// A layered DAG where every term has two parents in the layer above
fn ontology(layers: u32, width: u32) -> Ontology {
    let mut ont = Ontology::default();
    ont.insert_term(8150u32, "biological_process", Namespace::BP);
    for layer in 0..layers {
        for pos in 0..width {
            let id = 10_000 + layer * width + pos;
            ont.insert_term(id, format!("term {id}"), Namespace::BP);
            if layer == 0 {
                ont.add_parent(8150u32, id).unwrap();
            } else {
                let above = 10_000 + (layer - 1) * width;
                ont.add_parent(above + pos, id).unwrap();
                ont.add_parent(above + (pos + 1) % width, id).unwrap();
                if pos % 7 == 0 {
                    ont.add_relationship(id, Relationship::PartOf, above + (pos + 3) % width)
                        .unwrap();
                }
            }
        }
    }
    ont.create_cache();
    ont
}

fn id2gos(genes: u32, layers: u32, width: u32) -> HashMap<DatabaseId, HashSet<GoTermId>> {
    let terms = layers * width;
    (0..genes)
        .map(|gene| {
            let gos = (0..5)
                .map(|n| GoTermId::from(10_000 + (gene * 13 + n * 101) % terms))
                .collect();
            (DatabaseId::from(format!("gene{gene}")), gos)
        })
        .collect()
}

fn termcounts_benchmark(c: &mut Criterion) {
    let ont = ontology(12, 400);
    let assoc = id2gos(5_000, 12, 400);
    let part_of: Relationships = [Relationship::PartOf].into_iter().collect();

    c.bench_function("termcounts is_a", |b| {
        b.iter(|| TermCounts::new(black_box(&ont), black_box(&assoc), &Relationships::new()))
    });

    c.bench_function("termcounts part_of", |b| {
        b.iter(|| TermCounts::new(black_box(&ont), black_box(&assoc), &part_of))
    });

    let counts = TermCounts::new(&ont, &assoc, &Relationships::new());
    c.bench_function("lin 100x100", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for x in 0..100u32 {
                for y in 0..100u32 {
                    let a = GoTermId::from(14_000 + x);
                    let b = GoTermId::from(13_000 + y);
                    total += lin_sim(a, b, &ont, &counts).unwrap_or_default();
                }
            }
            total
        })
    });
}

criterion_group!(termcounts, termcounts_benchmark);
criterion_main!(termcounts);
