//! Latency benchmarks for the prediction pipeline
//!
//! Prediction is synchronous and bounded by input length and vocabulary size;
//! these benches track both the vectorizer alone and a full predict call.
//!
//! Run with: cargo bench -p veracity-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

use veracity_classifiers::{ModelContext, ModelPaths, Predictor, TfidfVectorizer, Vectorizer};
use veracity_core::Article;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn test_cases() -> Vec<(&'static str, Article)> {
    let paragraph = "Officials said the city council will publish the budget report next week. ";
    vec![
        (
            "short",
            Article::new("SHOCKING news", "Click to share the secret truth", "blog"),
        ),
        (
            "medium",
            Article::new("Council approves budget", paragraph.repeat(10), "cityhall.gov"),
        ),
        (
            "long",
            Article::new("Council approves budget", paragraph.repeat(130), "cityhall.gov"),
        ),
    ]
}

fn benchmark_vectorizer(c: &mut Criterion) {
    let vectorizer =
        TfidfVectorizer::from_file(fixture("vectorizer.json")).expect("Failed to load vectorizer");

    let mut group = c.benchmark_group("TfidfVectorizer");
    group.sample_size(100);

    for (name, article) in test_cases() {
        let text = article.combined_text();
        group.bench_with_input(BenchmarkId::new("vectorize", name), &text, |b, text| {
            b.iter(|| vectorizer.vectorize(black_box(text)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let paths = ModelPaths {
        vectorizer_path: fixture("vectorizer.json"),
        classifier_path: fixture("fake_news_model.json"),
    };
    let predictor = Predictor::new(ModelContext::load(&paths).expect("Failed to load model"));

    let mut group = c.benchmark_group("Predictor");
    group.sample_size(100);

    for (name, article) in test_cases() {
        group.bench_with_input(BenchmarkId::new("predict", name), &article, |b, article| {
            b.iter(|| predictor.predict(black_box(article)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_vectorizer, benchmark_predict);
criterion_main!(benches);
