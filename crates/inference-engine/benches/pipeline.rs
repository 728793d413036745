use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_assembler::{assemble, reorder, FormInput};
use inference_engine::{ArtifactPaths, ClassConvention, InferencePipeline, ModelArtifacts};
use std::path::Path;
use std::sync::Arc;

fn fixture_pipeline() -> InferencePipeline {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let artifacts = ModelArtifacts::load(&ArtifactPaths::default().relative_to(&base)).unwrap();
    InferencePipeline::new(Arc::new(artifacts), ClassConvention::default()).unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = fixture_pipeline();
    let input = FormInput::defaults();

    c.bench_function("assemble defaults", |b| {
        b.iter(|| assemble(black_box(&input.selections), black_box(&input.numerics)))
    });

    let record = assemble(&input.selections, &input.numerics).unwrap();
    let ordered = reorder(&record, pipeline.artifacts().columns()).unwrap();
    let scaled = pipeline.scale(&ordered).unwrap();

    c.bench_function("forest predict_with_proba", |b| {
        b.iter(|| pipeline.predict(black_box(&scaled)))
    });

    c.bench_function("full pipeline run", |b| {
        b.iter(|| pipeline.run(black_box(&input.selections), black_box(&input.numerics)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
