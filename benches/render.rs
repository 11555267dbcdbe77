//! Benchmarks for newsletter rendering
//!
//! Measures template rendering and CSS inlining for both layouts across
//! a range of item counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plexletter::config::NewsletterConfig;
use plexletter::metadata::MediaKind;
use plexletter::newsletter::render::render;
use plexletter::newsletter::inline::inline_css;
use plexletter::newsletter::{ClassicDocument, EnrichedItem, MagazineDocument, NewsletterDocument};

fn item(n: usize) -> EnrichedItem {
    EnrichedItem {
        kind: if n % 3 == 0 { MediaKind::Tv } else { MediaKind::Movie },
        title: format!("Feature Presentation {n}"),
        year: "2024".to_string(),
        rating: 7.4,
        votes: 12_345,
        genres: "Drama, Thriller".to_string(),
        poster_url: format!("https://image.tmdb.org/t/p/w500/poster{n}.jpg"),
        overview: "A long overview sentence that stands in for a real synopsis. ".repeat(4),
        blurb: (n % 2 == 0).then(|| "Worth a watch this weekend.".to_string()),
        critic_score: (n % 3 != 0).then(|| "88%".to_string()),
    }
}

fn items(count: usize) -> Vec<EnrichedItem> {
    (0..count).map(item).collect()
}

fn classic(count: usize) -> NewsletterDocument {
    NewsletterDocument::Classic(ClassicDocument {
        intro_text: "Here is what landed this week.\nEnjoy!".to_string(),
        new_items: items(count),
        featured_intro_text: "Some picks from the library.".to_string(),
        featured_items: items(count / 2),
    })
}

fn magazine(count: usize) -> NewsletterDocument {
    NewsletterDocument::Magazine(MagazineDocument {
        intro_text: "Here is what landed this week.\nEnjoy!".to_string(),
        featured_new_item: Some(item(100)),
        new_items: items(count),
        new_items_longform: "Editor notes.\nSecond paragraph.".to_string(),
        featured_library_item: Some(item(101)),
        featured_items: items(count / 2),
        library_picks_longform: String::new(),
    })
}

fn bench_render(c: &mut Criterion) {
    let config = NewsletterConfig::default();
    let mut group = c.benchmark_group("render");

    for count in [1usize, 10, 50] {
        group.throughput(Throughput::Elements(count as u64));

        let doc = classic(count);
        group.bench_with_input(BenchmarkId::new("classic", count), &doc, |b, doc| {
            b.iter(|| render(black_box(doc), &config))
        });

        let doc = magazine(count);
        group.bench_with_input(BenchmarkId::new("magazine", count), &doc, |b, doc| {
            b.iter(|| render(black_box(doc), &config))
        });
    }

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline_css");

    for count in [1usize, 10, 50] {
        let html = render(&classic(count), &NewsletterConfig::default()).expect("render");
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("classic", count), &html, |b, html| {
            b.iter(|| inline_css(black_box(html)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_inline);
criterion_main!(benches);
