use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ms2triage::classifier::{Assessment, Classifier};
use ms2triage::food_key::FoodKeyPatterns;
use ms2triage::remote::MarkerSet;
use ms2triage::terms::TermTables;

const STEMS: &[&str] = &[
    "ctrl_raw_grain",
    "beer_final",
    "QC_pool",
    "maize_leaf",
    "rice-grain",
    "infected_grain",
    "untreated_kernel",
    "run",
];

/// Generate a dataset-sized listing of plausible filenames
fn filenames(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}_{:04}.mzML", STEMS[i % STEMS.len()], i))
        .collect()
}

/// Benchmark classifying a listing under each assessment
fn bench_classify(c: &mut Criterion) {
    let classifier = Classifier::new(TermTables::standard().unwrap());
    let food = FoodKeyPatterns::from_key("brown_rice_grain").unwrap();
    let mut group = c.benchmark_group("classify");

    for count in [100, 1000, 10000] {
        let names = filenames(count);
        group.throughput(Throughput::Elements(count as u64));

        for assessment in [Assessment::Accepted, Assessment::Maybe] {
            group.bench_with_input(
                BenchmarkId::new(assessment.as_str(), count),
                &names,
                |b, names| {
                    b.iter(|| {
                        names
                            .iter()
                            .filter(|name| {
                                classifier
                                    .classify(black_box(name), &food, assessment)
                                    .keep
                            })
                            .count()
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark compiling the standard tables
fn bench_table_compile(c: &mut Criterion) {
    c.bench_function("term_tables_standard", |b| {
        b.iter(|| TermTables::standard().unwrap())
    });
}

/// Benchmark the streaming marker counter on an in-memory mzML body
fn bench_marker_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("marker_count");

    for spectra in [1000, 10000] {
        let mut body = String::from("<mzML>\n");
        for i in 0..spectra {
            let accession = if i % 3 == 0 { "MS:1000579" } else { "MS:1000580" };
            body.push_str(&format!(
                "<spectrum index=\"{}\"><cvParam cvRef=\"MS\" accession=\"{}\"/>\n<binaryDataArray>QUJDREVGR0g=</binaryDataArray></spectrum>\n",
                i, accession
            ));
        }
        body.push_str("</mzML>\n");
        let bytes = body.into_bytes();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        let markers = MarkerSet::mzml();
        group.bench_with_input(BenchmarkId::from_parameter(spectra), &bytes, |b, bytes| {
            b.iter(|| markers.count(black_box(bytes.as_slice())).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_table_compile, bench_marker_count);
criterion_main!(benches);
