use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use libvpblog::{
    config::SiteConfig,
    derive::{DeriveOptions, extend_page_data},
    posts::posts,
    summary::summarize,
    types::Page,
};

fn body(paragraphs: usize) -> String {
    let mut out = String::from("# A heading\n\n");
    for i in 0..paragraphs {
        out.push_str(&format!(
            "Paragraph {i} with *emphasis*, `code` and a [link](https://example.com/{i}).\n\n"
        ));
    }
    out
}

fn make_pages(count: usize, paragraphs: usize) -> Vec<Page> {
    (0..count)
        .map(|i| {
            let day = i % 28 + 1;
            Page::new(format!("/2021/05/{day:02}/post-{i}/"))
                .with_id("post")
                .with_content(body(paragraphs))
        })
        .collect()
}

fn bench_summary(c: &mut Criterion) {
    let config = SiteConfig::default();
    let mut group = c.benchmark_group("summarize");

    for paragraphs in [1, 20, 200] {
        let text = body(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(paragraphs), |b| {
            b.iter(|| black_box(summarize(black_box(&text), &config.summary)))
        });
    }

    group.finish();
}

fn bench_derive(c: &mut Criterion) {
    let config = SiteConfig::default();
    let options = DeriveOptions::new(&config.blog, &config.summary);
    let mut group = c.benchmark_group("extend_page_data");

    for count in [10, 400] {
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter_batched(
                || make_pages(count, 20),
                |mut pages| {
                    for page in &mut pages {
                        extend_page_data(page, &options);
                    }
                    black_box(posts(&pages, "post").count())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_summary, bench_derive);
criterion_main!(benches);
